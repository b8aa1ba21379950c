pub mod country;
pub mod document;
pub mod feed;

pub use country::*;
pub use document::*;
pub use feed::*;
