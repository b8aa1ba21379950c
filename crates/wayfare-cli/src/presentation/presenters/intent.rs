use wayfare_types::CountryId;

use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, IntentKind, IntentResultViewModel, StatusBadge,
};

pub fn present_intent(
    kind: IntentKind,
    country_id: &CountryId,
    id: Option<String>,
    detail: Option<String>,
) -> CommandResultViewModel<IntentResultViewModel> {
    let badge = match kind {
        IntentKind::CommentAdded => StatusBadge::success("Comment posted"),
        IntentKind::CommentDeleted => StatusBadge::success("Comment deleted"),
        IntentKind::MediaUploaded => StatusBadge::success("Media uploaded"),
        IntentKind::MediaDeleted => StatusBadge::success("Media record deleted"),
        IntentKind::Skipped => StatusBadge::info("Nothing to send"),
    };

    CommandResultViewModel::new(IntentResultViewModel {
        kind,
        country_id: country_id.to_string(),
        id,
        detail,
    })
    .with_badge(badge)
    .with_suggestion(
        Guidance::new("See the page").with_command(format!("wayfare show {}", country_id)),
    )
}
