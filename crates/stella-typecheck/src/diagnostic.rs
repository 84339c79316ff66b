//! Diagnostic reporting for type errors.
//!
//! A [`Diagnostic`] is a rendered-agnostic description of a problem; the
//! [`Emitter`] turns it into text with the offending source line and a caret
//! under the reported column.

use crate::error::TypeError;
use std::fmt::{self, Write as _};
use stella_syntax::Position;

/// A diagnostic message (error, warning, note, or help).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic level
    pub level: DiagnosticLevel,
    /// Stella error tag (e.g., "ERROR_NOT_A_FUNCTION")
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Where the problem is, if known
    pub position: Option<Position>,
    /// Optional suggestions
    pub suggestions: Vec<String>,
    /// Related notes
    pub notes: Vec<String>,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Error: the program is rejected
    Error,
    /// Warning: suspicious code
    Warning,
    /// Note: additional information
    Note,
    /// Help: suggestion for fixing the issue
    Help,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
            Self::Help => write!(f, "help"),
        }
    }
}

impl DiagnosticLevel {
    /// Returns the ANSI color code for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Note => "\x1b[36m",
            Self::Help => "\x1b[32m",
        }
    }

    /// Returns the reset ANSI code.
    #[must_use]
    pub const fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Formats this level with colors if enabled.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}{}", self.color_code(), self, Self::reset_code())
        } else {
            self.to_string()
        }
    }
}

/// Builder for creating diagnostics.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new(
        level: DiagnosticLevel,
        message: impl Into<String>,
        position: Option<Position>,
    ) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                code: None,
                message: message.into(),
                position,
                suggestions: Vec::new(),
                notes: Vec::new(),
            },
        }
    }

    /// Adds an error code to the diagnostic.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.diagnostic.code = Some(code.into());
        self
    }

    /// Adds a suggestion to the diagnostic.
    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.diagnostic.suggestions.push(suggestion.into());
        self
    }

    /// Adds a note to the diagnostic.
    #[must_use]
    pub fn note(mut self, message: impl Into<String>) -> Self {
        self.diagnostic.notes.push(message.into());
        self
    }

    /// Builds the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

impl From<&TypeError> for Diagnostic {
    fn from(error: &TypeError) -> Self {
        let builder =
            DiagnosticBuilder::new(DiagnosticLevel::Error, error.to_string(), error.position())
                .code(error.code());
        let builder = match error {
            TypeError::AmbiguousType { .. } => builder.suggest("add a type ascription"),
            TypeError::ExceptionTypeNotDeclared { .. } => {
                builder.suggest("declare one with `exception type = <type>`")
            }
            TypeError::MissingMain => builder.suggest("add `fn main(n : Nat) -> Nat`"),
            TypeError::IllegalCast { .. } => {
                builder.note("casts require the types to be related by subtyping")
            }
            _ => builder,
        };
        builder.build()
    }
}

/// Emitter for diagnostics.
///
/// Formats diagnostics with source highlighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    /// Use colors in output
    use_colors: bool,
}

impl Emitter {
    /// Creates a new diagnostic emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Renders a diagnostic against the source it was reported for.
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut out = String::new();
        let level = diagnostic.level.format_colored(self.use_colors);

        // Writing into a String cannot fail.
        let _ = match diagnostic.position {
            Some(pos) => writeln!(out, "{}: {}: {}", pos, level, diagnostic.message),
            None => writeln!(out, "{}: {}", level, diagnostic.message),
        };

        if let Some(code) = &diagnostic.code {
            let _ = writeln!(out, "   [{code}]");
        }

        if let Some(pos) = diagnostic.position {
            self.render_source_line(&mut out, diagnostic.level, pos, source);
        }

        for suggestion in &diagnostic.suggestions {
            let prefix = DiagnosticLevel::Help.format_colored(self.use_colors);
            let _ = writeln!(out, "   {prefix}: {suggestion}");
        }

        for note in &diagnostic.notes {
            let prefix = DiagnosticLevel::Note.format_colored(self.use_colors);
            let _ = writeln!(out, "   {prefix}: {note}");
        }

        out
    }

    fn render_source_line(
        &self,
        out: &mut String,
        level: DiagnosticLevel,
        pos: Position,
        source: &str,
    ) {
        let Some(line) = source.lines().nth(pos.line.saturating_sub(1)) else {
            return;
        };

        let _ = writeln!(out, "{:4} | {}", pos.line, line);

        let indent = " ".repeat(pos.column.saturating_sub(1));
        if self.use_colors {
            let _ = writeln!(
                out,
                "     | {}{}^{}",
                indent,
                level.color_code(),
                DiagnosticLevel::reset_code()
            );
        } else {
            let _ = writeln!(out, "     | {indent}^");
        }
    }

    /// Emits a diagnostic to stderr.
    pub fn emit(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render(diagnostic, source));
    }

    /// Emits every type error to stderr.
    pub fn emit_type_errors(&self, errors: &[TypeError], source: &str) {
        for error in errors {
            self.emit(&Diagnostic::from(error), source);
        }
    }
}
