use wayfare_runtime::{DetailViewModel, Feed, FeedStatus, Page};

use crate::presentation::formatters::time::format_timestamp;
use crate::presentation::view_models::{
    CommandResultViewModel, CommentEntryViewModel, CountryDetailViewModel, CountryPageViewModel,
    FeedsViewModel, Guidance, MediaEntryViewModel, PricesViewModel, StatusBadge,
};

/// Snapshot of the page as the view-model currently holds it.
pub fn present_detail(
    vm: &DetailViewModel,
    sponsored_links: &[String],
) -> CommandResultViewModel<CountryDetailViewModel> {
    let content = match vm.page() {
        Page::Loading => CountryDetailViewModel::Loading,
        Page::NotFound(id) => {
            return CommandResultViewModel::new(CountryDetailViewModel::NotFound {
                id: id.to_string(),
            })
            .with_badge(StatusBadge::warning("Country not found"))
            .with_suggestion(
                Guidance::new("List known countries").with_command("wayfare countries"),
            );
        }
        Page::Ready(id, country) => CountryDetailViewModel::Ready(Box::new(CountryPageViewModel {
            id: id.to_string(),
            name: country.name.clone(),
            capital: country.capital.clone(),
            visa: country.visa_rule.clone(),
            prices: PricesViewModel {
                meal: country.prices.meal.clone(),
                beer: country.prices.beer.clone(),
                taxi: country.prices.taxi.clone(),
            },
            safety: country.safety_note.clone(),
            airport: country.airport_code.clone(),
            media: vm
                .media()
                .iter()
                .map(|m| MediaEntryViewModel {
                    id: m.id.to_string(),
                    url: m.url.clone(),
                })
                .collect(),
            comments: vm
                .comments()
                .iter()
                .map(|c| CommentEntryViewModel {
                    id: c.id.to_string(),
                    text: c.text.clone(),
                    created_at: format_timestamp(&c.created_at),
                })
                .collect(),
            sponsored_links: sponsored_links.to_vec(),
            feeds: FeedsViewModel {
                comments: feed_label(vm.feed_status(Feed::Comments)),
                media: feed_label(vm.feed_status(Feed::Media)),
            },
            last_error: vm.last_error().map(str::to_string),
        })),
    };

    let mut result = CommandResultViewModel::new(content);
    if let Some(error) = vm.last_error() {
        result = result.with_badge(StatusBadge::warning(error));
    }
    result
}

fn feed_label(status: &FeedStatus) -> String {
    match status {
        FeedStatus::Idle => "idle".to_string(),
        FeedStatus::Connecting => "connecting".to_string(),
        FeedStatus::Live => "live".to_string(),
        FeedStatus::Failed(reason) => format!("failed: {}", reason),
    }
}
