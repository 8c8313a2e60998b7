use std::fmt::Display;

use runspec_parse::{error::SpannedError, span::Span};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    ParseError(#[from] runspec_parse::Error),
    #[error("library `{0}` has no sources")]
    EmptyLibrary(String),
}

/// An [`Error`] with what is known about where it came from: the flag, the flag
/// value and the offending range in that value.
#[derive(Clone, Debug)]
pub struct Diagnostic<E: std::error::Error> {
    pub error: Box<E>,
    pub source: Option<String>,
    pub flag: Option<String>,
    pub span: Option<Span>,
}

impl From<SpannedError> for Diagnostic<Error> {
    fn from(error: SpannedError) -> Self {
        let source = error.input().to_string();
        let error = error.into_inner();
        let mut res = Self::new(Error::ParseError(error.clone()));
        res.span = Some(error.span);
        res.source = Some(source);
        res
    }
}

impl From<Error> for Diagnostic<Error> {
    fn from(error: Error) -> Self {
        Self::new(error)
    }
}

impl<E: std::error::Error> Diagnostic<E> {
    fn new(error: E) -> Diagnostic<E> {
        Self {
            error: Box::new(error),
            source: None,
            flag: None,
            span: None,
        }
    }
    pub fn with_flag(mut self, flag: &str) -> Self {
        self.flag = Some(flag.to_string());
        self
    }
}

impl<E: std::error::Error> std::error::Error for Diagnostic<E> {}

impl<E: std::error::Error> Display for Diagnostic<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use annotate_snippets::*;
        let title = format!("{}", self.error);
        let mut msg = Level::Error.title(&title);

        let origin = self.flag.as_ref().map(|flag| format!("--{flag}"));

        if let Some(source) = &self.source {
            match &self.span {
                Some(span) if span.end <= source.len() => {
                    let annot = Level::Error.span(span.range()).label(&title);
                    let mut snip = Snippet::source(source).fold(true).annotation(annot);
                    if let Some(origin) = origin.as_ref() {
                        snip = snip.origin(origin);
                    }
                    msg = msg.snippet(snip);
                }
                Some(_) => {
                    msg = msg.footer(
                        Level::Note.title("cannot display snippet: invalid source location"),
                    )
                }
                None => {}
            }
        }

        let note;
        if let Some(origin) = origin.as_ref() {
            note = format!("in argument of `{origin}`");
            msg = msg.footer(Level::Note.title(&note));
        }

        let renderer = Renderer::styled();
        let rendered = renderer.render(msg);
        write!(f, "{rendered}")
    }
}
