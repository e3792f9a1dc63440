// Diagnostics raised while reading a question pool

mod diagnostic;
mod format;

// Re-export all public symbols
pub use diagnostic::*;
pub use format::*;
