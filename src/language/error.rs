use std::path::Path;
use thiserror::Error;

/// Failure to read a question pool document off disk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{problem}: {details}")]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}
