use serde::Serialize;

/// One render of the country page.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CountryDetailViewModel {
    Loading,
    NotFound { id: String },
    Ready(Box<CountryPageViewModel>),
}

#[derive(Debug, Serialize)]
pub struct CountryPageViewModel {
    pub id: String,
    pub name: String,
    pub capital: String,
    pub visa: String,
    pub prices: PricesViewModel,
    pub safety: String,
    pub airport: String,
    pub media: Vec<MediaEntryViewModel>,
    pub comments: Vec<CommentEntryViewModel>,
    pub sponsored_links: Vec<String>,
    pub feeds: FeedsViewModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PricesViewModel {
    pub meal: String,
    pub beer: String,
    pub taxi: String,
}

#[derive(Debug, Serialize)]
pub struct MediaEntryViewModel {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CommentEntryViewModel {
    pub id: String,
    pub text: String,
    pub created_at: String,
}

/// Status of the two live queries ("idle", "connecting", "live", "failed: ...").
#[derive(Debug, Serialize)]
pub struct FeedsViewModel {
    pub comments: String,
    pub media: String,
}
