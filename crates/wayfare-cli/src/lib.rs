// NOTE: wayfare layout
//
// The binary is a thin shell around `wayfare-runtime`:
// - args: clap definitions only
// - commands: opens the workspace and dispatches to a handler
// - handlers: drive the detail view-model (wait for feeds, call intents)
// - presentation: turns view-model state into text or JSON
//
// Handlers never print directly; everything user-facing goes through a
// renderer so `--format json` covers every command.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;

pub use args::{Cli, Commands, CommentCommand, ConfigCommand, LogLevel, MediaCommand, OutputFormat};
pub use commands::run;
