pub mod common;
pub mod config;
pub mod country;
pub mod detail;
pub mod intent;
pub mod result;

pub use common::{Guidance, StatusBadge, StatusLevel};
pub use config::ConfigViewModel;
pub use country::{CountryEntryViewModel, CountryListViewModel};
pub use detail::{
    CommentEntryViewModel, CountryDetailViewModel, CountryPageViewModel, FeedsViewModel,
    MediaEntryViewModel, PricesViewModel,
};
pub use intent::{IntentKind, IntentResultViewModel};
pub use result::CommandResultViewModel;

use std::fmt;

use crate::presentation::views::Style;

/// View models that know their text layout.
pub trait CreateView {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a>;
}
