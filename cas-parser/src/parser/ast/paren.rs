use std::ops::Range;
use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression inside any number of nested parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &*self.expr;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

/// Parses the closing token of a group opened at `open_span`, reporting the group as unclosed if
/// the input ends first.
pub(crate) fn expect_close<T: Parse>(
    input: &mut Parser,
    open_span: Range<usize>,
    unclosed: impl cas_error::ErrorKind + 'static,
) -> Result<T, Error> {
    if input.peek_kind().is_none() {
        return Err(Error::new(vec![open_span], unclosed));
    }
    input.try_parse::<T>()
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let close_paren = input.try_parse::<CloseParen>()?;
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                kind::EmptyParenthesis,
            ));
        }

        let expr = Expr::parse(input)?;
        let close_paren = expect_close::<CloseParen>(
            input,
            open_paren.span.clone(),
            kind::UnclosedParenthesis { opening: true },
        )?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
