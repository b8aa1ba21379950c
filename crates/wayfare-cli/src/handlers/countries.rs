use anyhow::Result;
use wayfare_runtime::Workspace;

use super::HandlerContext;
use crate::presentation::presenters;

pub fn handle(workspace: &Workspace, ctx: &HandlerContext) -> Result<()> {
    ctx.render(presenters::present_country_list(workspace.catalog()))
}
