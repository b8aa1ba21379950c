//! # Presentation Layer
//!
//! MVVM-style output for every command:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//! ```
//!
//! - `view_models/`: serializable data contracts, no logic. What `--format json` prints.
//! - `presenters/`: pure functions from runtime state to view models.
//! - `views/`: `fmt::Display` layouts for the plain format.
//! - `renderers/`: picks JSON or text, decides on colour, writes to stdout.
//! - `formatters/`: small string helpers shared by views.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use views::Style;
