use crate::CountryId;

/// True when the text has nothing but whitespace in it
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Blob path for an upload: `media/{country}/{file name}`.
///
/// Only the final path component of `original_name` is kept. Two uploads with
/// the same file name for the same country map to the same path. Returns `None`
/// when no usable file name remains (blank, `.` or `..`).
pub fn media_blob_path(country: &CountryId, original_name: &str) -> Option<String> {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    if is_blank(name) || name == "." || name == ".." {
        return None;
    }
    Some(format!("media/{}/{}", country, name))
}

/// Truncate a string for single-line display
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars).collect();
    format!("{}...", kept)
}
