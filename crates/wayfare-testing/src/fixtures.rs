//! Sample uploads and seeded documents.

use serde_json::json;
use wayfare_types::{Fields, PendingMedia};

/// Smallest byte string that still starts like a PNG file.
const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A picked image file named `name`.
pub fn sample_image(name: &str) -> PendingMedia {
    let mut bytes = PNG_HEADER.to_vec();
    bytes.extend_from_slice(name.as_bytes());
    PendingMedia::new(name, bytes)
}

pub fn comment_fields(country: &str, text: &str) -> Fields {
    object(json!({ "countryId": country, "text": text }))
}

pub fn media_fields(country: &str, url: &str) -> Fields {
    object(json!({ "countryId": country, "url": url }))
}

fn object(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Fields::new(),
    }
}
