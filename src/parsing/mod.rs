//! parser for examination question pool documents

use chrono::Local;
use std::path::Path;
use tracing::debug;

use crate::language::{Element, LoadingError};
use crate::problem::{Diagnostics, Severity};

pub mod classify;
pub mod parser;
pub mod source;
mod summary;

pub use summary::*;

/// Settings for a single parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Recorded in the Element as the source of the pool.
    pub filename: String,
    pub filetype: String,
    /// Diagnostics below this severity are not retained.
    pub minimum: Severity,
    /// Fixed creation time for the Element; the current local time if not
    /// given.
    pub timestamp: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            filename: String::new(),
            filetype: String::new(),
            minimum: Severity::Info,
            timestamp: None,
        }
    }
}

impl ParseOptions {
    pub fn timestamp(&self) -> String {
        match &self.timestamp {
            Some(timestamp) => timestamp.clone(),
            None => Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
        }
    }
}

/// The outcome of a parse. There is no success flag: check the error count
/// in the diagnostics before relying on the Element being complete.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// None only if no element header was ever recognized.
    pub element: Option<Element>,
    pub diagnostics: Diagnostics,
    pub summary: Option<Summary>,
}

impl Parsed {
    pub fn errors(&self) -> usize {
        self.diagnostics
            .errors()
    }
}

/// Read a file and return an owned String. Word processor documents need to
/// have their paragraphs extracted beforehand; only text is read here.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                std::io::ErrorKind::InvalidData => Err(LoadingError {
                    problem: "Not a text file".to_string(),
                    details: "content is not valid UTF-8".to_string(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Split loaded content into lines, dropping any byte order mark.
pub fn lines(content: &str) -> Vec<String> {
    let content = content
        .strip_prefix('\u{feff}')
        .unwrap_or(content);

    content
        .lines()
        .map(|line| line.to_string())
        .collect()
}

/// Describe the kind of text content, in the same terms the pool files have
/// historically been labelled with.
pub fn file_type(content: &str) -> &'static str {
    if content.is_ascii() {
        "ASCII text"
    } else {
        "UTF-8 Unicode"
    }
}

/// Parse lines into an Element, collecting diagnostics along the way.
pub fn parse(lines: &[String], options: &ParseOptions) -> Parsed {
    let parsed = parser::parse_lines(lines, options);

    match &parsed.element {
        Some(element) => {
            let count = element
                .questions()
                .count();
            debug!(
                "Found {} question{} in element {}",
                count,
                if count == 1 { "" } else { "s" },
                element.elem
            );
        }
        None => {
            debug!("No element found");
        }
    }
    debug!("errors: {}", parsed.errors());

    parsed
}
