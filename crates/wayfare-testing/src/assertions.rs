//! Custom assertions for view-model state.
//!
//! Each returns an error describing the mismatch, so tests can use `?`.

use anyhow::{Result, bail};
use wayfare_runtime::DetailViewModel;

/// Assert the rendered comment list is exactly `expected`, in order.
pub fn assert_comment_texts(vm: &DetailViewModel, expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = vm.comments().iter().map(|c| c.text.as_str()).collect();
    if actual != expected {
        bail!("Expected comments {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the media grid shows exactly these URLs, in order.
pub fn assert_media_urls(vm: &DetailViewModel, expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = vm.media().iter().map(|m| m.url.as_str()).collect();
    if actual != expected {
        bail!("Expected media {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert every mirrored record belongs to the page's country.
pub fn assert_single_country(vm: &DetailViewModel) -> Result<()> {
    let Some(current) = vm.country_id() else {
        if !vm.comments().is_empty() || !vm.media().is_empty() {
            bail!("Records mirrored while no country is selected");
        }
        return Ok(());
    };

    for comment in vm.comments() {
        if &comment.country_id != current {
            bail!("Comment {} belongs to {} on page {}", comment.id, comment.country_id, current);
        }
    }
    for item in vm.media() {
        if &item.country_id != current {
            bail!("Media {} belongs to {} on page {}", item.id, item.country_id, current);
        }
    }
    Ok(())
}
