use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog key for a country (e.g. "thailand")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(String);

impl CountryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CountryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CountryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<CountryId> for String {
    fn from(id: CountryId) -> Self {
        id.0
    }
}

impl AsRef<str> for CountryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Typical prices a traveller pays, kept as display strings ("$3", "$0.50/km")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    pub meal: String,
    pub beer: String,
    pub taxi: String,
}

/// Static travel facts for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: String,
    #[serde(rename = "visa")]
    pub visa_rule: String,
    pub prices: Prices,
    #[serde(rename = "safety")]
    pub safety_note: String,
    #[serde(rename = "airport")]
    pub airport_code: String,
}
