use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use wayfare_runtime::{DetailViewModel, Workspace};
use wayfare_types::{CountryId, DocumentId};

use super::HandlerContext;
use super::detail::{open_detail, render, wait_until_settled};
use super::media::read_pending;

/// One line typed into an open page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Post(String),
    RemoveComment(DocumentId),
    Attach(PathBuf),
    Upload,
    RemoveMedia(DocumentId),
    Go(CountryId),
    Quit,
    Empty,
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let line = line.trim();
    if line.is_empty() {
        return Line::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word, rest.is_empty()) {
        ("post", _) => Line::Post(rest.to_string()),
        ("rm-comment", false) => Line::RemoveComment(rest.into()),
        ("attach", false) => Line::Attach(PathBuf::from(rest)),
        ("upload", true) => Line::Upload,
        ("rm-media", false) => Line::RemoveMedia(rest.into()),
        ("go", false) => Line::Go(rest.into()),
        ("quit" | "exit", true) => Line::Quit,
        _ => Line::Unknown(line.to_string()),
    }
}

/// Runs an interactive page session on stdin until `quit`, EOF or Ctrl-C.
///
/// The page is re-rendered after every applied snapshot and after every
/// intent; intents never touch the lists themselves.
pub async fn handle(workspace: &Workspace, id: CountryId, ctx: &HandlerContext) -> Result<()> {
    let mut vm = open_detail(workspace, id)?;
    wait_until_settled(&mut vm).await;
    render(&vm, workspace, ctx)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(_) = vm.next_change() => {
                render(&vm, workspace, ctx)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Line::Quit => break,
                    Line::Empty => {}
                    Line::Unknown(text) => {
                        tracing::warn!(command = %text, "unknown command (post, rm-comment, attach, upload, rm-media, go, quit)");
                    }
                    command => {
                        apply(&mut vm, command).await;
                        render(&vm, workspace, ctx)?;
                    }
                }
            }
        }
    }

    vm.teardown();
    Ok(())
}

/// Runs one command against the view-model.
///
/// Intent failures are already recorded in the view-model's last error and
/// rendered with the page, so they do not end the session.
async fn apply(vm: &mut DetailViewModel, command: Line) {
    let outcome = match command {
        Line::Post(text) => {
            vm.set_draft(text);
            vm.add_comment().await.map(|_| ())
        }
        Line::RemoveComment(id) => vm.delete_comment(&id).await,
        Line::Attach(path) => {
            match read_pending(&path).await {
                Ok(pending) => vm.select_media(Some(pending)),
                Err(err) => vm.record_error(format!("Attaching file failed: {:#}", err)),
            }
            Ok(())
        }
        Line::Upload => vm.upload_media().await.map(|_| ()),
        Line::RemoveMedia(id) => vm.delete_media(&id).await,
        Line::Go(id) => {
            let navigated = vm.navigate(Some(id));
            wait_until_settled(vm).await;
            navigated
        }
        Line::Quit | Line::Empty | Line::Unknown(_) => Ok(()),
    };

    if let Err(err) = outcome {
        tracing::debug!(error = %err, "intent failed in interactive session");
    }
}
