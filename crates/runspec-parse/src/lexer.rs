//! Prefer using [`Parser::parse_run`][crate::Parser::parse_run]. You shouldn't need to
//! manipulate the lexer.
//!
//! The lexer never skips anything: the tokens of a run spec always cover the whole
//! string, so the text between two tokens can be sliced back out of the source.

use std::fmt::Display;

use logos::{Logos, SpannedIter};

use crate::{
    error::{Error, ParseError},
    span::Span,
};

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(error = ParseError)]
pub enum Token {
    #[token(",")]
    SymComma,
    #[token(";")]
    SymSemicolon,
    #[token(":")]
    SymColon,
    #[token("=")]
    SymEqual,
    // an unterminated quote extends to the end of the string.
    #[regex(r#""[^"]*"?"#)]
    DoubleQuoted,
    #[regex(r"'[^']*'?")]
    SingleQuoted,
    #[regex(r#"[^,;:='"]+"#)]
    Text,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::SymComma => write!(f, ","),
            Token::SymSemicolon => write!(f, ";"),
            Token::SymColon => write!(f, ":"),
            Token::SymEqual => write!(f, "="),
            Token::DoubleQuoted => write!(f, "double-quoted string"),
            Token::SingleQuoted => write!(f, "single-quoted string"),
            Token::Text => write!(f, "text"),
        }
    }
}

#[derive(Clone)]
pub struct Lexer<'s> {
    token_stream: SpannedIter<'s, Token>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            token_stream: Token::lexer(source).spanned(),
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Result<(Token, Span), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.token_stream.next().map(|(tok, span)| match tok {
            Ok(tok) => Ok((tok, Span::new(span))),
            Err(err) => Err(Error::new(err, Span::new(span))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<(Token, &str)> {
        Lexer::new(source)
            .map(|res| {
                let (tok, span) = res.expect("lexer error");
                (tok, &source[span.range()])
            })
            .collect()
    }

    #[test]
    fn punctuation_and_text() {
        assert_eq!(
            tokens("run1:tb,g=1;typ:/TOP/U1=u1.sdf"),
            vec![
                (Token::Text, "run1"),
                (Token::SymColon, ":"),
                (Token::Text, "tb"),
                (Token::SymComma, ","),
                (Token::Text, "g"),
                (Token::SymEqual, "="),
                (Token::Text, "1"),
                (Token::SymSemicolon, ";"),
                (Token::Text, "typ"),
                (Token::SymColon, ":"),
                (Token::Text, "/TOP/U1"),
                (Token::SymEqual, "="),
                (Token::Text, "u1.sdf"),
            ]
        );
    }

    #[test]
    fn quotes_swallow_separators() {
        assert_eq!(
            tokens(r#"g="a,b;c" h='x:y'"#),
            vec![
                (Token::Text, "g"),
                (Token::SymEqual, "="),
                (Token::DoubleQuoted, r#""a,b;c""#),
                (Token::Text, " h"),
                (Token::SymEqual, "="),
                (Token::SingleQuoted, "'x:y'"),
            ]
        );
    }

    #[test]
    fn quotes_nest() {
        assert_eq!(
            tokens(r#""it's, fine",x"#),
            vec![
                (Token::DoubleQuoted, r#""it's, fine""#),
                (Token::SymComma, ","),
                (Token::Text, "x"),
            ]
        );
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(
            tokens(r#"g="abc,def;x"#),
            vec![
                (Token::Text, "g"),
                (Token::SymEqual, "="),
                (Token::DoubleQuoted, r#""abc,def;x"#),
            ]
        );
    }

    #[test]
    fn tokens_cover_source() {
        let source = "a b:'c d',e=\"f\";;=:";
        let covered: String = tokens(source).into_iter().map(|(_, s)| s).collect();
        assert_eq!(covered, source);
    }
}
