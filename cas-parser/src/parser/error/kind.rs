use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error, used to reject a speculative parse. It should never reach the
/// user.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = format!("terms must be joined by an operator, or written {} to be multiplied", "next to each other".fg(EXPR)),
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed, or a closing parenthesis has no opening partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if self.opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis is never opened"
    }],
    help = if self.opening {
        format!("add a closing parenthesis `{}` somewhere after this", ")".fg(EXPR))
    } else {
        format!("add an opening parenthesis `{}` somewhere before this", "(".fg(EXPR))
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the unclosed parenthesis is the opening one. Otherwise it is a stray closing one.
    pub opening: bool,
}

/// A square bracket was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed bracket",
    labels = ["this bracket is never closed"],
    help = format!("add a closing bracket `{}` after the last element", "]".fg(EXPR)),
)]
pub struct UnclosedBracket;

/// Nothing was written between a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A number literal is malformed, such as `1.2.3`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid number",
    labels = ["this number has more than one decimal point"],
)]
pub struct InvalidNumber;

/// The expression nests parentheses, operators or calls deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["nesting goes past the limit here"],
    help = format!("try splitting the {} into smaller parts", "expression".fg(EXPR)),
)]
pub struct TooDeeplyNested;
