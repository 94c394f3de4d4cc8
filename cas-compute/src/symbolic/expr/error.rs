//! Errors that can occur while converting a parsed expression into an [`Expr`](super::Expr).

use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;

/// A function was called that the symbolic engine does not know.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", self.name),
    labels = ["this function"],
    help = match &self.suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => "check the spelling of the function name".to_string(),
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// The name of a known function that is close to the unknown one.
    pub suggestion: Option<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "`{}` takes {} argument{}, but {} {} given",
        self.name,
        self.expected,
        if self.expected == "1" { "" } else { "s" },
        self.given,
        if self.given == 1 { "was" } else { "were" },
    ),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// A description of the accepted argument counts, such as `1` or `1 or 2`.
    pub expected: &'static str,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A bracketed list appeared somewhere a scalar expression was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected list",
    labels = ["lists can only be used to write matrices"],
)]
pub struct UnexpectedList;
