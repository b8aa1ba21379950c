use anyhow::Result;
use wayfare_runtime::Workspace;
use wayfare_types::{CountryId, DocumentId};

use super::HandlerContext;
use super::detail::open_known;
use crate::presentation::presenters;
use crate::presentation::view_models::IntentKind;

pub async fn add(
    workspace: &Workspace,
    country_id: CountryId,
    text: String,
    ctx: &HandlerContext,
) -> Result<()> {
    let mut vm = open_known(workspace, country_id.clone()).await?;
    vm.set_draft(text);

    let view_model = match vm.add_comment().await? {
        Some(id) => presenters::present_intent(
            IntentKind::CommentAdded,
            &country_id,
            Some(id.to_string()),
            None,
        ),
        None => presenters::present_intent(
            IntentKind::Skipped,
            &country_id,
            None,
            Some("Comment text is empty.".to_string()),
        ),
    };
    ctx.render(view_model)
}

pub async fn remove(
    workspace: &Workspace,
    country_id: CountryId,
    comment_id: DocumentId,
    ctx: &HandlerContext,
) -> Result<()> {
    let mut vm = open_known(workspace, country_id.clone()).await?;
    vm.delete_comment(&comment_id).await?;

    ctx.render(presenters::present_intent(
        IntentKind::CommentDeleted,
        &country_id,
        Some(comment_id.to_string()),
        None,
    ))
}
