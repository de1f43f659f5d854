//! Mantra error handling.
//!
//! Every failure in the crate is a [`MantraError`]: three syntax variants
//! raised by the parser and five runtime variants raised by the evaluator.
//! Each variant carries an [`ErrorContext`] so `compile` can attach the
//! source text and the offending span, and `miette` can render the error
//! with the token underlined. Rewriting and generation never construct
//! errors; they are total over well-formed trees.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub type SourceArc = Arc<NamedSource<String>>;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The source text this error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Returns an empty error context (no source, span, or help).
    pub fn none() -> Self {
        Self::default()
    }
}

/// Unified error type for all mantra failure modes.
#[derive(Debug, Error)]
pub enum MantraError {
    #[error("empty tokens: expected an expression")]
    EmptyTokens { ctx: ErrorContext },

    #[error("invalid atom '{token}'")]
    InvalidAtom { token: String, ctx: ErrorContext },

    #[error("missing ')' before end of input")]
    MissingCloser { ctx: ErrorContext },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, ctx: ErrorContext },

    #[error("invalid parameter count for '{name}': expected {expected}, found {actual}")]
    ParameterCount {
        name: String,
        expected: String,
        actual: usize,
        ctx: ErrorContext,
    },

    #[error("unknown key for 'env': {key}")]
    UnknownKey { key: String, ctx: ErrorContext },

    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        ctx: ErrorContext,
    },

    #[error("recursion limit exceeded")]
    RecursionLimit { ctx: ErrorContext },
}

/// Error classification for dispatch-free test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed input text; raised only by the parser.
    Syntax,
    /// Malformed program semantics; raised only by the evaluator.
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "syntax"),
            ErrorCategory::Runtime => write!(f, "runtime"),
        }
    }
}

impl MantraError {
    pub fn empty_tokens() -> Self {
        Self::EmptyTokens {
            ctx: ErrorContext::none(),
        }
    }

    pub fn invalid_atom(token: impl Into<String>) -> Self {
        Self::InvalidAtom {
            token: token.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub fn missing_closer() -> Self {
        Self::MissingCloser {
            ctx: ErrorContext::none(),
        }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction {
            name: name.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub fn parameter_count(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: usize,
    ) -> Self {
        Self::ParameterCount {
            name: name.into(),
            expected: expected.into(),
            actual,
            ctx: ErrorContext::none(),
        }
    }

    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey {
            key: key.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub fn recursion_limit() -> Self {
        Self::RecursionLimit {
            ctx: ErrorContext::none(),
        }
    }

    fn ctx(&self) -> &ErrorContext {
        match self {
            Self::EmptyTokens { ctx }
            | Self::InvalidAtom { ctx, .. }
            | Self::MissingCloser { ctx }
            | Self::UnknownFunction { ctx, .. }
            | Self::ParameterCount { ctx, .. }
            | Self::UnknownKey { ctx, .. }
            | Self::TypeMismatch { ctx, .. }
            | Self::RecursionLimit { ctx } => ctx,
        }
    }

    fn ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::EmptyTokens { ctx }
            | Self::InvalidAtom { ctx, .. }
            | Self::MissingCloser { ctx }
            | Self::UnknownFunction { ctx, .. }
            | Self::ParameterCount { ctx, .. }
            | Self::UnknownKey { ctx, .. }
            | Self::TypeMismatch { ctx, .. }
            | Self::RecursionLimit { ctx } => ctx,
        }
    }

    /// Returns the primary span, if one was attached.
    pub fn span(&self) -> Option<Span> {
        self.ctx().span
    }

    /// Attaches the source text the error points into.
    pub fn with_source(mut self, source: SourceArc) -> Self {
        self.ctx_mut().source = Some(source);
        self
    }

    /// Attaches the primary span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.ctx_mut().span = Some(span);
        self
    }

    /// Attaches a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.ctx_mut().help = Some(help.into());
        self
    }

    /// Returns the error classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTokens { .. } | Self::InvalidAtom { .. } | Self::MissingCloser { .. } => {
                ErrorCategory::Syntax
            }
            Self::UnknownFunction { .. }
            | Self::ParameterCount { .. }
            | Self::UnknownKey { .. }
            | Self::TypeMismatch { .. }
            | Self::RecursionLimit { .. } => ErrorCategory::Runtime,
        }
    }

    /// Stable code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::EmptyTokens { .. } => "empty_tokens",
            Self::InvalidAtom { .. } => "invalid_atom",
            Self::MissingCloser { .. } => "missing_closer",
            Self::UnknownFunction { .. } => "unknown_function",
            Self::ParameterCount { .. } => "parameter_count",
            Self::UnknownKey { .. } => "unknown_key",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::RecursionLimit { .. } => "recursion_limit",
        }
    }

    /// Full diagnostic code, e.g. `mantra::syntax::invalid_atom`.
    pub fn diagnostic_code(&self) -> String {
        format!("mantra::{}::{}", self.category(), self.code_suffix())
    }

    fn primary_label(&self) -> String {
        match self {
            Self::EmptyTokens { .. } => "expression expected here".into(),
            Self::InvalidAtom { .. } => "not a valid atom".into(),
            Self::MissingCloser { .. } => "form never closed".into(),
            Self::UnknownFunction { .. } => "not in the registry".into(),
            Self::ParameterCount { .. } => "wrong number of arguments".into(),
            Self::UnknownKey { .. } => "key not in environment".into(),
            Self::TypeMismatch { .. } => "unexpected type".into(),
            Self::RecursionLimit { .. } => "nesting too deep".into(),
        }
    }
}

impl Diagnostic for MantraError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diagnostic_code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx().span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.primary_label()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps source text into the shared handle error contexts carry.
pub fn to_error_source(name: impl AsRef<str>, text: impl AsRef<str>) -> SourceArc {
    Arc::new(NamedSource::new(
        name.as_ref().to_string(),
        text.as_ref().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn categories_split_parser_from_evaluator() {
        assert_eq!(MantraError::empty_tokens().category(), ErrorCategory::Syntax);
        assert_eq!(
            MantraError::invalid_atom("(").category(),
            ErrorCategory::Syntax
        );
        assert_eq!(MantraError::missing_closer().category(), ErrorCategory::Syntax);
        assert_eq!(
            MantraError::unknown_function("booz").category(),
            ErrorCategory::Runtime
        );
        assert_eq!(
            MantraError::parameter_count("not", "1", 2).category(),
            ErrorCategory::Runtime
        );
        assert_eq!(
            MantraError::unknown_key("falsekey").category(),
            ErrorCategory::Runtime
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let err = MantraError::unknown_function("booz");
        assert!(err.to_string().contains("unknown function 'booz'"));

        let err = MantraError::parameter_count("env", "1", 2);
        let msg = err.to_string();
        assert!(msg.contains("invalid parameter count for 'env'"));
        assert!(msg.contains("expected 1"));
        assert!(msg.contains("found 2"));
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        assert_eq!(
            MantraError::invalid_atom("(").diagnostic_code(),
            "mantra::syntax::invalid_atom"
        );
        assert_eq!(
            MantraError::recursion_limit().diagnostic_code(),
            "mantra::runtime::recursion_limit"
        );
    }

    #[test]
    fn report_renders_source_span_and_help() {
        let src = to_error_source("input", "(list ())");
        let err = MantraError::invalid_atom("(")
            .with_source(src)
            .with_span(Span::new(6, 7))
            .with_help("a form head must be a plain atom");
        let report = Report::new(err);
        let output = format!("{report:?}");
        assert!(output.contains("invalid atom"));
        assert!(output.contains("a form head must be a plain atom"));
    }
}
