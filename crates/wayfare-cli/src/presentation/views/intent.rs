use std::fmt;

use crate::presentation::view_models::{CreateView, IntentKind, IntentResultViewModel};
use crate::presentation::views::Style;

impl CreateView for IntentResultViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(IntentResultView { data: self, style })
    }
}

struct IntentResultView<'a> {
    data: &'a IntentResultViewModel,
    style: Style,
}

impl fmt::Display for IntentResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let subject = match self.data.kind {
            IntentKind::CommentAdded | IntentKind::CommentDeleted => "comment",
            IntentKind::MediaUploaded | IntentKind::MediaDeleted => "media",
            IntentKind::Skipped => {
                if let Some(detail) = &self.data.detail {
                    writeln!(f, "{}", detail)?;
                }
                return Ok(());
            }
        };

        if let Some(id) = &self.data.id {
            writeln!(
                f,
                "{} {} on {}",
                subject,
                self.style.accent(id),
                self.data.country_id
            )?;
        }
        if let Some(detail) = &self.data.detail {
            writeln!(f, "  {}", detail)?;
        }
        Ok(())
    }
}
