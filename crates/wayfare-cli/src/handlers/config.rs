use std::path::Path;

use anyhow::Result;
use wayfare_runtime::Config;

use super::HandlerContext;
use crate::presentation::presenters;

pub fn init(data_dir: &Path, force: bool, ctx: &HandlerContext) -> Result<()> {
    let path = Config::path_in(data_dir);

    if path.exists() && !force {
        let config = Config::load_from(&path)?;
        return ctx.render(
            presenters::present_config(&config, &path, true, false).with_suggestion(
                crate::presentation::view_models::Guidance::new("Already present; overwrite with")
                    .with_command("wayfare config init --force"),
            ),
        );
    }

    let config = Config::default();
    config.save_to(&path)?;
    tracing::info!(path = %path.display(), "wrote default config");

    ctx.render(presenters::present_config(&config, &path, true, true))
}

pub fn show(data_dir: &Path, ctx: &HandlerContext) -> Result<()> {
    let path = Config::path_in(data_dir);
    let from_file = path.exists();
    let config = Config::load_from(&path)?;

    ctx.render(presenters::present_config(&config, &path, from_file, false))
}
