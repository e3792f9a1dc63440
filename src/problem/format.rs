use owo_colors::OwoColorize;

use super::{Diagnostic, Severity};
use crate::language::LoadingError;

/// Format a diagnostic as a single line of the form
///
/// ```text
/// Error   : E005: Missing question end ~~ :  123 : D. All of these choices are correct
/// ```
///
/// The line number and excerpt columns are left blank when the diagnostic
/// isn't attached to a particular line.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    layout(diagnostic, diagnostic.severity().label(), diagnostic.code())
}

/// As format_diagnostic(), with ANSI colouring on the severity and code
/// columns when `colour` is set.
pub fn render_diagnostic(diagnostic: &Diagnostic, colour: bool) -> String {
    if !colour {
        return format_diagnostic(diagnostic);
    }

    let label = format!("{:8}", diagnostic.severity().label());
    let label = match diagnostic.severity() {
        Severity::Error => label
            .bright_red()
            .to_string(),
        Severity::Warning => label
            .bright_yellow()
            .to_string(),
        Severity::Info => label
            .bright_blue()
            .to_string(),
        Severity::Debug => label
            .dimmed()
            .to_string(),
    };
    let code = diagnostic
        .code()
        .bold()
        .to_string();

    layout(diagnostic, &label, &code)
}

fn layout(diagnostic: &Diagnostic, label: &str, code: &str) -> String {
    let line = match diagnostic.line {
        Some(line) => format!("{:4}", line),
        None => String::new(),
    };
    let excerpt = diagnostic
        .excerpt
        .as_deref()
        .unwrap_or("");

    format!(
        "{:8}: {:4}: {:20}: {:>4} : {}",
        label, code, diagnostic.message, line, excerpt
    )
    .trim_end()
    .to_string()
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}
