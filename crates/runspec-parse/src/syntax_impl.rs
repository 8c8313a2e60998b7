use std::str::FromStr;

use super::{error::ParseError, syntax::*};

impl FromStr for Delay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typ" => Ok(Self::Typ),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(ParseError::BadSdfDelay(s.to_string())),
        }
    }
}

/// Wraps `value` in double quotes if it contains whitespace.
///
/// A value containing a double quote anywhere is considered already quoted and is
/// returned unchanged, so an unbalanced quote stays unbalanced.
///
/// ```rust
/// # use runspec_parse::quote_value;
/// assert_eq!(quote_value("123"), "123");
/// assert_eq!(quote_value("abc def"), "\"abc def\"");
/// assert_eq!(quote_value("\"abc def\""), "\"abc def\"");
/// assert_eq!(quote_value("a b\"c"), "a b\"c");
/// assert_eq!(quote_value("'a b'"), "\"'a b'\"");
/// ```
pub fn quote_value(value: &str) -> String {
    if value.contains(char::is_whitespace) && !value.contains('"') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

impl GenericAssignment {
    /// The value is quoted with [`quote_value`].
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            value: quote_value(value),
        }
    }
}

impl SdfMapping {
    pub fn new(delay: Delay, path: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            delay,
            path: path.into(),
            file: file.into(),
        }
    }
}

impl RunRecord {
    /// A run of `top` named [`DEFAULT_RUN_NAME`], without generics or SDF mappings.
    pub fn new(top: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_RUN_NAME.to_string(),
            top: top.into(),
            generics: Vec::new(),
            sdf: Vec::new(),
        }
    }
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
    pub fn with_generic(mut self, generic: GenericAssignment) -> Self {
        self.generics.push(generic);
        self
    }
    pub fn with_sdf(mut self, sdf: SdfMapping) -> Self {
        self.sdf.push(sdf);
        self
    }
}
