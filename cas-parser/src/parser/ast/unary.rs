use std::ops::Range;
use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    ///
    /// A leading `-` or `+` commits to a unary expression, so errors in its operand are reported
    /// directly instead of being hidden by a fallback.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        input.nested(|input| match input.peek_kind() {
            Some(TokenKind::Sub | TokenKind::Add) => Self::parse(input).map(Expr::Unary),
            _ => Primary::parse(input).map(Into::into),
        })
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;

        // the operand only absorbs operators binding tighter than negation, so that `-x^2` is
        // `-(x^2)` while `-2 + 1` is `(-2) + 1`
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?.0
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }
}
