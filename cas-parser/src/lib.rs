//! Tokenizer and parser for the expressions accepted by the math bot.
//!
//! Input text is first split into [`tokenizer::Token`]s with [`logos`], then the
//! [`parser::Parser`] builds an abstract syntax tree out of them. Every node of the tree keeps the
//! span of source text it was parsed from, so errors can point back into the user's input.
//!
//! ```
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x^2+5x+6");
//! assert!(parser.try_parse_full::<Expr>().is_ok());
//!
//! // implicit multiplication needs adjacent operands
//! let mut parser = Parser::new("hello world");
//! assert!(parser.try_parse_full::<Expr>().is_err());
//! ```

pub mod parser;
pub mod tokenizer;
