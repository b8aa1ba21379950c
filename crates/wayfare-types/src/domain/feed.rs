use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::country::CountryId;
use super::document::{COUNTRY_FIELD, Document, DocumentId, Fields};
use crate::{Error, Result};

/// User comment on a country page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DocumentId,
    #[serde(rename = "countryId")]
    pub country_id: CountryId,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Uploaded image attached to a country page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: DocumentId,
    #[serde(rename = "countryId")]
    pub country_id: CountryId,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

fn required<'a>(doc: &'a Document, field: &str) -> Result<&'a str> {
    doc.str_field(field)
        .ok_or_else(|| Error::Decode(format!("document {} has no '{}' string", doc.id, field)))
}

impl TryFrom<&Document> for Comment {
    type Error = Error;

    fn try_from(doc: &Document) -> Result<Self> {
        Ok(Self {
            id: doc.id.clone(),
            country_id: CountryId::from(required(doc, COUNTRY_FIELD)?),
            text: required(doc, "text")?.to_string(),
            created_at: doc.created_at,
        })
    }
}

impl TryFrom<&Document> for MediaItem {
    type Error = Error;

    fn try_from(doc: &Document) -> Result<Self> {
        Ok(Self {
            id: doc.id.clone(),
            country_id: CountryId::from(required(doc, COUNTRY_FIELD)?),
            url: required(doc, "url")?.to_string(),
            created_at: doc.created_at,
        })
    }
}

/// Fields written when a comment is created; the store stamps `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub country_id: CountryId,
    pub text: String,
}

impl NewComment {
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(COUNTRY_FIELD.to_string(), Value::String(self.country_id.into()));
        fields.insert("text".to_string(), Value::String(self.text));
        fields
    }
}

/// Metadata written once a blob has been stored and its URL resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub country_id: CountryId,
    pub url: String,
}

impl NewMedia {
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(COUNTRY_FIELD.to_string(), Value::String(self.country_id.into()));
        fields.insert("url".to_string(), Value::String(self.url));
        fields
    }
}

/// A file the user picked for upload but has not sent yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMedia {
    /// Original file name, used as the last blob path segment
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PendingMedia {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}
