pub mod comment;
pub mod config;
mod context;
pub mod countries;
pub mod detail;
pub mod interactive;
pub mod media;

pub use context::HandlerContext;
