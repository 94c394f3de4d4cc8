use std::ops::Range;
use crate::{
    parser::{
        ast::{expr::Expr, paren::expect_close},
        error::{kind, Error},
        token::{CloseSquare, OpenSquare},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// A bracketed list of expressions, such as `[1, 2, x]`. Lists nest, so `[[1, 2], [3, 4]]` is a
/// list of two lists.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// The elements of the list.
    pub values: Vec<Expr>,

    /// The region of the source code that this list was parsed from.
    pub span: Range<usize>,
}

impl List {
    /// Returns the span of the list.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for List {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenSquare>()?;

        let values = if input.peek_kind() == Some(TokenKind::CloseSquare) {
            Vec::new()
        } else {
            input.try_parse_delimited::<Expr>()?
        };

        let close = expect_close::<CloseSquare>(input, open.span.clone(), kind::UnclosedBracket)?;
        Ok(Self {
            values,
            span: open.span.start..close.span.end,
        })
    }
}
