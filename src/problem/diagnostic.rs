use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// How serious a diagnostic is. Ordered so that a minimum severity can be
/// used to filter: `Debug < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase()
            .as_str()
        {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity '{}'", s)),
        }
    }
}

/// Everything the parser can report. Each kind carries a fixed identifier
/// and severity so the same situation is always reported the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Problem {
    LineBeforeElement,
    HeaderData,
    Transition,
    QuestionRead,
    PrematureEnd,
    UnexpectedEnd,
    UnexpectedLine,
    MissingTerminator,
    NonAscii,
    GroupCountMismatch,
    DuplicateQuestion,
    Misplaced,
    SummaryElement,
    SummarySubelements,
    SummarySubelement,
    SummaryGroup,
    SummaryTotals,
    SummaryDone,
}

impl Problem {
    pub fn code(self) -> &'static str {
        match self {
            Problem::LineBeforeElement => "I001",
            Problem::HeaderData => "I002",
            Problem::QuestionRead => "D003",
            Problem::Transition => "D004",
            Problem::PrematureEnd => "E001",
            Problem::UnexpectedEnd => "E002",
            Problem::UnexpectedLine => "E003",
            Problem::MissingTerminator => "E005",
            Problem::NonAscii => "W001",
            Problem::GroupCountMismatch => "W002",
            Problem::DuplicateQuestion => "W003",
            Problem::Misplaced => "W004",
            Problem::SummaryElement => "I300",
            Problem::SummarySubelements => "I301",
            Problem::SummarySubelement => "I302",
            Problem::SummaryGroup => "I303",
            Problem::SummaryTotals => "I304",
            Problem::SummaryDone => "I305",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Problem::PrematureEnd
            | Problem::UnexpectedEnd
            | Problem::UnexpectedLine
            | Problem::MissingTerminator => Severity::Error,
            Problem::NonAscii
            | Problem::GroupCountMismatch
            | Problem::DuplicateQuestion
            | Problem::Misplaced => Severity::Warning,
            Problem::Transition | Problem::QuestionRead => Severity::Debug,
            _ => Severity::Info,
        }
    }
}

/// A single report, optionally pinned to the line that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub problem: Problem,
    pub message: String,
    pub line: Option<usize>,
    pub excerpt: Option<String>,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.problem
            .severity()
    }

    pub fn code(&self) -> &'static str {
        self.problem
            .code()
    }
}

/// Collects diagnostics during a parse. Everything reported is forwarded to
/// tracing; only diagnostics at or above the minimum severity are retained.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    minimum: Severity,
    entries: Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::new(Severity::Info)
    }
}

impl Diagnostics {
    pub fn new(minimum: Severity) -> Diagnostics {
        Diagnostics {
            minimum,
            entries: Vec::new(),
        }
    }

    pub fn report(&mut self, problem: Problem, message: impl Into<String>) {
        self.push(Diagnostic {
            problem,
            message: message.into(),
            line: None,
            excerpt: None,
        });
    }

    pub fn report_at(&mut self, problem: Problem, message: impl Into<String>, line: usize, text: &str) {
        self.push(Diagnostic {
            problem,
            message: message.into(),
            line: Some(line),
            excerpt: Some(
                text.trim()
                    .to_string(),
            ),
        });
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code();
        let line = diagnostic
            .line
            .unwrap_or(0);
        let message = &diagnostic.message;

        match diagnostic.severity() {
            Severity::Error => error!(code, line, "{}", message),
            Severity::Warning => warn!(code, line, "{}", message),
            Severity::Info => info!(code, line, "{}", message),
            Severity::Debug => debug!(code, line, "{}", message),
        }

        if diagnostic.severity() >= self.minimum {
            self.entries
                .push(diagnostic);
        }
    }

    pub fn minimum(&self) -> Severity {
        self.minimum
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|diagnostic| diagnostic.severity() == severity)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn has(&self, problem: Problem) -> bool {
        self.entries
            .iter()
            .any(|diagnostic| diagnostic.problem == problem)
    }
}
