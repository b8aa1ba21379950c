use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub path: String,
    /// False when the values shown are built-in defaults
    pub from_file: bool,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    pub poll_interval_ms: u64,
    pub sponsored_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}
