use serde::{Deserialize, Serialize};
use windlass_parser::ast::Span;

/// How serious a finding is for the host surfacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// The closed set of checks a diagnostic can come from. Hosts match on this
/// to route findings (quick fixes, severity overrides) without comparing
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A `(`, `[` or opacity bracket never found its closer.
    UnclosedBracket,
    /// A group with nothing inside it.
    EmptyGroup,
    /// A variant whose separator is followed by nothing adjacent.
    EmptyVariant,
    /// The resolver does not recognize the class as a utility.
    UnknownClass,
    /// Two or more items set the same property under equivalent conditions.
    ConflictingProperties,
}

/// One finding over a class string, anchored to the byte range it is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    /// A concrete edit the host can offer, when one exists.
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            code,
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code,
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
