use std::path::Path;

use anyhow::{Context, Result};
use wayfare_runtime::Workspace;
use wayfare_types::{CountryId, DocumentId, PendingMedia};

use super::HandlerContext;
use super::detail::open_known;
use crate::presentation::presenters;
use crate::presentation::view_models::IntentKind;

/// Reads a local file into an upload selection named after the file.
pub async fn read_pending(file: &Path) -> Result<PendingMedia> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file name: {}", file.display()))?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok(PendingMedia::new(name, bytes))
}

pub async fn upload(
    workspace: &Workspace,
    country_id: CountryId,
    file: &Path,
    ctx: &HandlerContext,
) -> Result<()> {
    let pending = read_pending(file).await?;
    let mut vm = open_known(workspace, country_id.clone()).await?;

    vm.select_media(Some(pending));
    let Some(id) = vm.upload_media().await? else {
        return ctx.render(presenters::present_intent(
            IntentKind::Skipped,
            &country_id,
            None,
            Some("No file selected.".to_string()),
        ));
    };

    // The record shows up with the next media snapshot; wait briefly for its URL.
    let url = wait_for_media_url(&mut vm, &id).await;
    ctx.render(presenters::present_intent(
        IntentKind::MediaUploaded,
        &country_id,
        Some(id.to_string()),
        url,
    ))
}

async fn wait_for_media_url(
    vm: &mut wayfare_runtime::DetailViewModel,
    id: &DocumentId,
) -> Option<String> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
    loop {
        if let Some(item) = vm.media().iter().find(|m| &m.id == id) {
            return Some(item.url.clone());
        }
        match tokio::time::timeout_at(deadline, vm.next_change()).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => return None,
        }
    }
}

pub async fn remove(
    workspace: &Workspace,
    country_id: CountryId,
    media_id: DocumentId,
    ctx: &HandlerContext,
) -> Result<()> {
    let mut vm = open_known(workspace, country_id.clone()).await?;
    vm.delete_media(&media_id).await?;

    ctx.render(presenters::present_intent(
        IntentKind::MediaDeleted,
        &country_id,
        Some(media_id.to_string()),
        Some("The stored file is kept.".to_string()),
    ))
}
