// Types representing an examination question pool

mod error;
mod topics;
mod types;

// Re-export all public symbols
pub use error::*;
pub use topics::*;
pub use types::*;

pub(crate) use types::blank_as_none;
