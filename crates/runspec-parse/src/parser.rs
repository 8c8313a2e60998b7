//! The [`Parser`] takes run specs, generic assignments and SDF mappings as they
//! appear on the command line and returns their [structured form].
//!
//! [structured form]: crate::syntax

use std::str::FromStr;

use crate::{
    error::{Error, ParseError, SpannedError},
    lexer::{Lexer, Token},
    span::Span,
    syntax::{Delay, GenericAssignment, RunRecord, SdfMapping, DEFAULT_RUN_NAME},
};

pub struct Parser;

impl Parser {
    /// Parse a run spec: `[name:]top[,gen=val...][;delay:path=file...]`.
    pub fn parse_run(source: &str) -> Result<RunRecord, SpannedError> {
        Cursor::new(source)
            .and_then(|mut cursor| cursor.run())
            .map_err(|e| SpannedError::new(e, source))
    }

    /// Parse a single global generic assignment: `name=value`.
    ///
    /// Unlike in a run spec, the value extends to the end of the token, commas included.
    pub fn parse_generic(source: &str) -> Result<GenericAssignment, SpannedError> {
        Cursor::new(source)
            .and_then(|mut cursor| {
                let assign = cursor.segment(|_| false);
                cursor.generic(&assign)
            })
            .map_err(|e| SpannedError::new(e, source))
    }

    /// Parse a single global SDF mapping: `delay:path=file`.
    pub fn parse_sdf_mapping(source: &str) -> Result<SdfMapping, SpannedError> {
        Cursor::new(source)
            .and_then(|mut cursor| {
                let mapping = cursor.segment(|_| false);
                cursor.sdf_mapping(&mapping)
            })
            .map_err(|e| SpannedError::new(e, source))
    }

    /// Parse global generic assignments, one per token, keeping their order.
    pub fn parse_generics(
        tokens: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Vec<GenericAssignment>, SpannedError> {
        tokens
            .into_iter()
            .map(|tok| Self::parse_generic(tok.as_ref()))
            .collect()
    }

    /// Parse global SDF mappings, one per token, keeping their order.
    pub fn parse_sdf(
        tokens: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Vec<SdfMapping>, SpannedError> {
        tokens
            .into_iter()
            .map(|tok| Self::parse_sdf_mapping(tok.as_ref()))
            .collect()
    }

    /// Parse run specs, keeping their order.
    pub fn parse_runs(
        specs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Vec<RunRecord>, SpannedError> {
        specs
            .into_iter()
            .map(|spec| Self::parse_run(spec.as_ref()))
            .collect()
    }
}

impl FromStr for RunRecord {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Parser::parse_run(source).map_err(Error::from)
    }
}

impl FromStr for GenericAssignment {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Parser::parse_generic(source).map_err(Error::from)
    }
}

impl FromStr for SdfMapping {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Parser::parse_sdf_mapping(source).map_err(Error::from)
    }
}

fn is_separator(tok: Token) -> bool {
    matches!(tok, Token::SymComma | Token::SymSemicolon)
}

/// Walks the tokens of one source string. Quoted strings are single tokens, so every
/// separator seen by the cursor is an unquoted one.
struct Cursor<'s> {
    source: &'s str,
    tokens: Vec<(Token, Span)>,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn new(source: &'s str) -> Result<Self, Error> {
        let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(tok, _)| *tok)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Byte offset of the next token, or the end of the source.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len())
    }

    fn text(&self, span: &Span) -> &'s str {
        &self.source[span.range()]
    }

    /// Consume tokens up to (excluding) the first one matching `stop`.
    fn segment(&mut self, stop: impl Fn(Token) -> bool) -> Span {
        let start = self.offset();
        while let Some(tok) = self.peek() {
            if stop(tok) {
                break;
            }
            self.bump();
        }
        Span::new(start..self.offset())
    }

    /// Split `span` around the first token `at` it contains.
    fn split(&self, span: &Span, at: Token) -> Option<(Span, Span)> {
        self.tokens
            .iter()
            .find(|(tok, tok_span)| *tok == at && span.contains_span(tok_span))
            .map(|(_, tok_span)| {
                (
                    Span::new(span.start..tok_span.start),
                    Span::new(tok_span.end..span.end),
                )
            })
    }

    fn run(&mut self) -> Result<RunRecord, Error> {
        let head = self.segment(is_separator);

        let (name, top) = match self.split(&head, Token::SymColon) {
            Some((name, top)) => {
                if name.is_empty() {
                    return Err(Error::new(ParseError::MissingRunName, head));
                }
                (self.text(&name).to_string(), top)
            }
            None => (DEFAULT_RUN_NAME.to_string(), head.clone()),
        };
        if top.is_empty() {
            return Err(Error::new(ParseError::MissingTop, head));
        }
        let mut run = RunRecord::new(self.text(&top)).with_name(name);

        while self.peek() == Some(Token::SymComma) {
            self.bump();
            let assign = self.segment(is_separator);
            run.generics.push(self.generic(&assign)?);
        }

        // SDF files and paths may contain commas: only `;` ends an entry.
        while self.peek() == Some(Token::SymSemicolon) {
            self.bump();
            let mapping = self.segment(|tok| tok == Token::SymSemicolon);
            run.sdf.push(self.sdf_mapping(&mapping)?);
        }

        if self.peek().is_some() {
            let rest = Span::new(self.offset()..self.source.len());
            let text = self.text(&rest).to_string();
            return Err(Error::new(ParseError::UnexpectedText(text), rest));
        }

        log::trace!("parsed run spec `{}` as `{run}`", self.source);
        Ok(run)
    }

    fn generic(&self, assign: &Span) -> Result<GenericAssignment, Error> {
        let text = self.text(assign);
        let bad_generic =
            || Error::new(ParseError::BadGeneric(text.to_string()), assign.clone());

        let (name, value) = self.split(assign, Token::SymEqual).ok_or_else(bad_generic)?;
        if name.is_empty() {
            return Err(bad_generic());
        }
        Ok(GenericAssignment::new(self.text(&name), self.text(&value)))
    }

    fn sdf_mapping(&self, mapping: &Span) -> Result<SdfMapping, Error> {
        let text = self.text(mapping);

        let (delay, rest) = self.split(mapping, Token::SymColon).ok_or_else(|| {
            Error::new(ParseError::BadSdfSection(text.to_string()), mapping.clone())
        })?;
        let delay = self
            .text(&delay)
            .parse::<Delay>()
            .map_err(|e| Error::new(e, delay))?;

        let bad_mapping =
            || Error::new(ParseError::BadSdfMapping(text.to_string()), mapping.clone());
        let (path, file) = self.split(&rest, Token::SymEqual).ok_or_else(bad_mapping)?;
        if path.is_empty() || file.is_empty() {
            return Err(bad_mapping());
        }
        Ok(SdfMapping::new(delay, self.text(&path), self.text(&file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(name: &str, value: &str) -> GenericAssignment {
        GenericAssignment {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn top_only() {
        let run = Parser::parse_run("tb1").unwrap();
        assert_eq!(run, RunRecord::new("tb1"));
        assert_eq!(run.name, "sim");
    }

    #[test]
    fn named_with_generics() {
        let run = Parser::parse_run("run2:tb2,g1=123,g2=abc def").unwrap();
        assert_eq!(run.name, "run2");
        assert_eq!(run.top, "tb2");
        assert_eq!(
            run.generics,
            vec![generic("g1", "123"), generic("g2", "\"abc def\"")]
        );
        assert!(run.sdf.is_empty());
    }

    #[test]
    fn sdf_in_order() {
        let run = Parser::parse_run("run3:tb3;typ:/TOP/U1=u1.sdf;min:/TOP/U2=u2.sdf").unwrap();
        assert_eq!(
            run.sdf,
            vec![
                SdfMapping::new(Delay::Typ, "/TOP/U1", "u1.sdf"),
                SdfMapping::new(Delay::Min, "/TOP/U2", "u2.sdf"),
            ]
        );
        assert!(run.generics.is_empty());
    }

    #[test]
    fn generics_then_sdf() {
        let run = Parser::parse_run("r:tb,g1=123,g2=\"abc\";max:/TOP/U1=u1.sdf").unwrap();
        assert_eq!(run.generics, vec![generic("g1", "123"), generic("g2", "\"abc\"")]);
        assert_eq!(run.sdf, vec![SdfMapping::new(Delay::Max, "/TOP/U1", "u1.sdf")]);
    }

    #[test]
    fn semicolon_ends_head_before_comma() {
        let run = Parser::parse_run("tb;typ:/a=b.sdf").unwrap();
        assert_eq!(run.top, "tb");
        assert_eq!(run.sdf.len(), 1);
    }

    #[test]
    fn quoted_separators_stay_in_value() {
        let run = Parser::parse_run(r#"tb,msg="a, b; c",x='1,2'"#).unwrap();
        assert_eq!(
            run.generics,
            vec![generic("msg", r#""a, b; c""#), generic("x", "'1,2'")]
        );
    }

    #[test]
    fn unbalanced_quote_extends_to_end() {
        let run = Parser::parse_run(r#"tb,msg="abc,def;typ:/a=b"#).unwrap();
        assert_eq!(run.generics, vec![generic("msg", r#""abc,def;typ:/a=b"#)]);
        assert!(run.sdf.is_empty());
    }

    #[test]
    fn bad_delay() {
        let err = Parser::parse_run("x;bad:/a=b").unwrap_err();
        assert_eq!(err.error(), &ParseError::BadSdfDelay("bad".to_string()));
        assert_eq!(err.span().range(), 2..5);
        assert!(err.error().to_string().contains("bad SDF delay spec in run spec: bad"));
        let report = err.to_string();
        assert!(report.contains("bad SDF delay spec in run spec: bad"));
    }

    #[test]
    fn sdf_without_colon() {
        let err = Parser::parse_run("x;typ=/a=b").unwrap_err();
        assert!(matches!(err.error(), ParseError::BadSdfSection(_)));
    }

    #[test]
    fn sdf_without_file() {
        let err = Parser::parse_run("x;typ:/a").unwrap_err();
        assert_eq!(err.error(), &ParseError::BadSdfMapping("typ:/a".to_string()));
        let err = Parser::parse_run("x;typ:/a=").unwrap_err();
        assert!(matches!(err.error(), ParseError::BadSdfMapping(_)));
    }

    #[test]
    fn sdf_entry_ends_at_semicolon_only() {
        let run = Parser::parse_run("r:tb;typ:/TOP/U1=a,b.sdf").unwrap();
        assert_eq!(run.sdf, vec![SdfMapping::new(Delay::Typ, "/TOP/U1", "a,b.sdf")]);

        let run = Parser::parse_run("r:tb;typ:/TOP/U1,x=a.sdf;min:/TOP/U2=b.sdf").unwrap();
        assert_eq!(
            run.sdf,
            vec![
                SdfMapping::new(Delay::Typ, "/TOP/U1,x", "a.sdf"),
                SdfMapping::new(Delay::Min, "/TOP/U2", "b.sdf"),
            ]
        );
        assert!(run.generics.is_empty());
    }

    #[test]
    fn generic_without_equal() {
        let err = Parser::parse_run("tb,g1").unwrap_err();
        assert_eq!(err.error(), &ParseError::BadGeneric("g1".to_string()));
        let err = Parser::parse_run("tb,=1").unwrap_err();
        assert!(matches!(err.error(), ParseError::BadGeneric(_)));
    }

    #[test]
    fn missing_name_or_top() {
        let err = Parser::parse_run(":tb").unwrap_err();
        assert_eq!(err.error(), &ParseError::MissingRunName);
        let err = Parser::parse_run("run:,g=1").unwrap_err();
        assert_eq!(err.error(), &ParseError::MissingTop);
        let err = Parser::parse_run("").unwrap_err();
        assert_eq!(err.error(), &ParseError::MissingTop);
    }

    #[test]
    fn stray_double_quote_is_not_wrapped() {
        let run = Parser::parse_run(r#"tb,g=a b"c,d"#).unwrap();
        assert_eq!(run.generics, vec![generic("g", r#"a b"c,d"#)]);
    }

    #[test]
    fn global_generic_keeps_commas() {
        let gens = Parser::parse_generics(["a=1", "b=x,y", "c=hello world"]).unwrap();
        assert_eq!(
            gens,
            vec![
                generic("a", "1"),
                generic("b", "x,y"),
                generic("c", "\"hello world\""),
            ]
        );
    }

    #[test]
    fn global_generic_value_with_equal() {
        let gen = Parser::parse_generic("expr=a=b").unwrap();
        assert_eq!(gen, generic("expr", "a=b"));
    }

    #[test]
    fn global_sdf() {
        let sdf = Parser::parse_sdf(["typ:/TOP/U1=u1.sdf", "max:/TOP/U2=u2.sdf"]).unwrap();
        assert_eq!(
            sdf,
            vec![
                SdfMapping::new(Delay::Typ, "/TOP/U1", "u1.sdf"),
                SdfMapping::new(Delay::Max, "/TOP/U2", "u2.sdf"),
            ]
        );
        let err = Parser::parse_sdf(["sdf:/TOP/U1=u1.sdf"]).unwrap_err();
        assert_eq!(err.error(), &ParseError::BadSdfDelay("sdf".to_string()));
        assert_eq!(err.input(), "sdf:/TOP/U1=u1.sdf");
    }

    #[test]
    fn canonical_round_trip() {
        for spec in [
            "tb1",
            "run2:tb2,g1=123,g2=abc def",
            "run3:tb3;typ:/TOP/U1=u1.sdf;min:/TOP/U2=u2.sdf",
            r#"r:tb,s='a b',t="x;y";max:/T/U:V=f.sdf"#,
            "r:tb;typ:/TOP/U1=a,b.sdf",
            r#"tb,g=a b"c;typ:/a=b"#,
            r#"tb,g=a b"c,d"#,
        ] {
            let run = Parser::parse_run(spec).unwrap();
            let reparsed = Parser::parse_run(&run.to_string()).unwrap();
            assert_eq!(run, reparsed, "round trip of `{spec}` via `{run}`");
        }
    }
}
