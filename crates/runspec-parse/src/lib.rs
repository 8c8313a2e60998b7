//! A parser for the compact simulation run specs, generic assignments and SDF
//! mappings given to the `make-fpga` command line.
//!
//! # Parsing a run spec
//!
//! ```rust
//! use runspec_parse::{syntax::Delay, Parser};
//!
//! let run = Parser::parse_run("run4:my_design4,gen1=123;min:/TOP/U2=unit2.sdf").unwrap();
//! assert_eq!(run.name, "run4");
//! assert_eq!(run.top, "my_design4");
//! assert_eq!(run.generics[0].value, "123");
//! assert_eq!(run.sdf[0].delay, Delay::Min);
//! ```
//!
//! # Grammar
//!
//! ```text
//! run          := [name ':'] top [',' generic-list] (';' sdf-entry)*
//! generic-list := name '=' value (',' name '=' value)*
//! sdf-entry    := delay ':' path '=' file
//! delay        := 'typ' | 'min' | 'max'
//! ```
//!
//! Commas, semicolons, colons and equal signs inside single or double quotes are part
//! of the text they appear in. A quote that is never closed extends to the end of the
//! string.
//!
//! # Stringification
//!
//! The syntax types implement [`Display`][std::fmt::Display]. A [`syntax::RunRecord`]
//! is displayed in a canonical form that parses back to an equal record.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod syntax;

mod syntax_display;
mod syntax_impl;

pub use error::Error;
pub use lexer::Lexer;
pub use parser::Parser;
pub use syntax_impl::quote_value;
