use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use wayfare_runtime::{Config, Workspace, resolve_data_dir};

use crate::args::{Cli, Commands, CommentCommand, ConfigCommand, MediaCommand};
use crate::handlers::{self, HandlerContext};
use crate::logging;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = HandlerContext::new(cli.format);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = runtime.block_on(dispatch(cli.command, data_dir, cli.ephemeral, &ctx));
    // A pending stdin read must not hold the process open.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn dispatch(
    command: Commands,
    data_dir: PathBuf,
    ephemeral: bool,
    ctx: &HandlerContext,
) -> Result<()> {
    let open = || open_workspace(&data_dir, ephemeral);

    match command {
        Commands::Countries => handlers::countries::handle(&open()?, ctx),

        Commands::Show { country_id } => {
            handlers::detail::show(&open()?, country_id.into(), ctx).await
        }

        Commands::Watch { country_id } => {
            handlers::detail::watch(&open()?, country_id.into(), ctx).await
        }

        Commands::Open { country_id } => {
            handlers::interactive::handle(&open()?, country_id.into(), ctx).await
        }

        Commands::Comment { command } => match command {
            CommentCommand::Add { country_id, text } => {
                handlers::comment::add(&open()?, country_id.into(), text, ctx).await
            }
            CommentCommand::Rm {
                country_id,
                comment_id,
            } => handlers::comment::remove(&open()?, country_id.into(), comment_id.into(), ctx)
                .await,
        },

        Commands::Media { command } => match command {
            MediaCommand::Upload { country_id, file } => {
                handlers::media::upload(&open()?, country_id.into(), &file, ctx).await
            }
            MediaCommand::Rm {
                country_id,
                media_id,
            } => handlers::media::remove(&open()?, country_id.into(), media_id.into(), ctx).await,
        },

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => handlers::config::init(&data_dir, force, ctx),
            ConfigCommand::Show => handlers::config::show(&data_dir, ctx),
        },
    }
}

fn open_workspace(data_dir: &Path, ephemeral: bool) -> Result<Workspace> {
    if ephemeral {
        let config = Config::load_from(&Config::path_in(data_dir))?;
        tracing::debug!("using in-memory stores");
        return Ok(Workspace::ephemeral(config)?);
    }

    Workspace::open(data_dir)
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))
}
