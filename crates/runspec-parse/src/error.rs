//! A [`SpannedError`] is the error type returned by `Parser::parse*` functions.

use std::fmt::Display;

use annotate_snippets::*;
use thiserror::Error;

use crate::span::Span;

#[derive(Error, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParseError {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("missing run name in run spec")]
    MissingRunName,
    #[error("missing top design unit in run spec")]
    MissingTop,
    #[error("bad generic assignment in run spec: {0}")]
    BadGeneric(String),
    #[error("bad SDF section in run spec")]
    BadSdfSection(String),
    #[error("bad SDF delay spec in run spec: {0}")]
    BadSdfDelay(String),
    #[error("bad SDF mapping: {0}")]
    BadSdfMapping(String),
    #[error("unexpected text in SDF section of run spec")]
    UnexpectedText(String),
}

/// A [`ParseError`] with the byte range it was raised at.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{error}")]
pub struct Error {
    pub error: ParseError,
    pub span: Span,
}

impl Error {
    pub(crate) fn new(error: ParseError, span: Span) -> Self {
        Self { error, span }
    }
}

/// An [`Error`] together with the text it was raised in.
///
/// The [`Display`] implementation renders a report pointing at the offending part
/// of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpannedError {
    inner: Error,
    source: String,
}

impl SpannedError {
    pub(crate) fn new(inner: Error, source: &str) -> Self {
        Self {
            inner,
            source: source.to_string(),
        }
    }
    pub fn error(&self) -> &ParseError {
        &self.inner.error
    }
    pub fn span(&self) -> &Span {
        &self.inner.span
    }
    pub fn input(&self) -> &str {
        &self.source
    }
    pub fn into_inner(self) -> Error {
        self.inner
    }
}

impl From<SpannedError> for Error {
    fn from(err: SpannedError) -> Self {
        err.inner
    }
}

impl std::error::Error for SpannedError {}

impl Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = self.source.as_str();
        let span = self.inner.span.range();
        let title = self.inner.error.to_string();
        let label = match &self.inner.error {
            ParseError::InvalidToken => "this token is unknown",
            ParseError::MissingRunName => "expected a run name before `:`",
            ParseError::MissingTop => "expected a top level design unit",
            ParseError::BadGeneric(_) => "expected `name=value`",
            ParseError::BadSdfSection(_) => "expected `delay:path=file`",
            ParseError::BadSdfDelay(_) => "expected `typ`, `min` or `max`",
            ParseError::BadSdfMapping(_) => "expected `path=file`",
            ParseError::UnexpectedText(_) => "unexpected text here",
        };
        let renderer = Renderer::styled();
        if span.end > source.len() {
            let message = Level::Error
                .title(&title)
                .footer(Level::Note.title("cannot display snippet: invalid source location"));
            let rendered = renderer.render(message);
            return write!(f, "{rendered}");
        }
        let message = Level::Error.title(&title).snippet(
            Snippet::source(source)
                .fold(true)
                .annotation(Level::Error.span(span).label(label)),
        );
        let rendered = renderer.render(message);
        write!(f, "{rendered}")
    }
}
