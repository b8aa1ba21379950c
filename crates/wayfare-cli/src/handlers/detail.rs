use std::time::Duration;

use anyhow::Result;
use tokio::time::{Instant, timeout_at};
use wayfare_runtime::{DetailViewModel, Page, Workspace};
use wayfare_types::CountryId;

use super::HandlerContext;
use crate::presentation::presenters;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Applies deliveries until both feeds have reported once.
///
/// Gives up after a bounded wait and renders whatever arrived.
pub async fn wait_until_settled(vm: &mut DetailViewModel) {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    while !vm.is_settled() {
        match timeout_at(deadline, vm.next_change()).await {
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => {
                tracing::warn!("feeds did not deliver within {:?}", SETTLE_TIMEOUT);
                break;
            }
        }
    }
}

/// Opens the detail view-model, failing only on store errors.
pub fn open_detail(workspace: &Workspace, id: CountryId) -> Result<DetailViewModel> {
    Ok(workspace.detail(Some(id))?)
}

/// Like `open_detail` but errors when the country is not in the catalog.
pub async fn open_known(workspace: &Workspace, id: CountryId) -> Result<DetailViewModel> {
    let mut vm = open_detail(workspace, id)?;
    if let Page::NotFound(id) = vm.page() {
        anyhow::bail!("Country not found: {}", id);
    }
    wait_until_settled(&mut vm).await;
    Ok(vm)
}

pub fn render(vm: &DetailViewModel, workspace: &Workspace, ctx: &HandlerContext) -> Result<()> {
    ctx.render(presenters::present_detail(
        vm,
        &workspace.config().sponsored_links,
    ))
}

pub async fn show(workspace: &Workspace, id: CountryId, ctx: &HandlerContext) -> Result<()> {
    let mut vm = open_detail(workspace, id)?;
    wait_until_settled(&mut vm).await;
    render(&vm, workspace, ctx)
}

pub async fn watch(workspace: &Workspace, id: CountryId, ctx: &HandlerContext) -> Result<()> {
    let mut vm = open_detail(workspace, id)?;
    wait_until_settled(&mut vm).await;
    render(&vm, workspace, ctx)?;

    if !vm.is_live() {
        return Ok(());
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted, closing live queries");
                break;
            }
            update = vm.next_change() => {
                let Some(update) = update else { break };
                tracing::debug!(?update, "page changed");
                render(&vm, workspace, ctx)?;
            }
        }
    }
    Ok(())
}
