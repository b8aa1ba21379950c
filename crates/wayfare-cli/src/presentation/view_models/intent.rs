use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    CommentAdded,
    CommentDeleted,
    MediaUploaded,
    MediaDeleted,
    /// Blank draft or no file: nothing was sent
    Skipped,
}

/// Outcome of a one-shot intent.
#[derive(Debug, Serialize)]
pub struct IntentResultViewModel {
    pub kind: IntentKind,
    pub country_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
