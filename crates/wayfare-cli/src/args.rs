use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wayfare")]
#[command(about = "Browse travel info per country with live comments and media", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory [default: $WAYFARE_PATH, then the platform data dir]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Keep documents and blobs in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the countries in the catalog")]
    Countries,

    #[command(about = "Show a country page once its comments and media have loaded")]
    Show { country_id: String },

    #[command(about = "Show a country page and re-render on every change until Ctrl-C")]
    Watch { country_id: String },

    #[command(
        about = "Open a country page interactively",
        long_about = "Open a country page interactively.\n\nCommands are read from stdin, one per line:\n  post <text>        add a comment\n  rm-comment <id>    delete a comment\n  attach <file>      select a file for upload\n  upload             upload the selected file\n  rm-media <id>      delete a media record\n  go <country-id>    switch country\n  quit               leave"
    )]
    Open { country_id: String },

    #[command(about = "Post or delete comments")]
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },

    #[command(about = "Upload or delete media")]
    Media {
        #[command(subcommand)]
        command: MediaCommand,
    },

    #[command(about = "Manage config.toml")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum CommentCommand {
    #[command(about = "Post a comment on a country page")]
    Add { country_id: String, text: String },

    #[command(about = "Delete a comment by id")]
    Rm {
        country_id: String,
        comment_id: String,
    },
}

#[derive(Subcommand)]
pub enum MediaCommand {
    #[command(about = "Upload a file to a country page")]
    Upload { country_id: String, file: PathBuf },

    #[command(about = "Delete a media record by id (the stored file is kept)")]
    Rm { country_id: String, media_id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a config.toml with default settings")]
    Init {
        #[arg(long, help = "Overwrite an existing config.toml")]
        force: bool,
    },

    #[command(about = "Print the effective configuration")]
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
