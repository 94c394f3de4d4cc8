use std::ops::Range;
use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            iter::ExprIter,
            list::List,
            literal::{LitSym, Literal},
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};

/// Represents a general mathematical expression.
///
/// An expression is any valid piece of input that can be handed to the symbolic engine, such as
/// `x^2 + 5x + 6`, `sin(x)` or `[[1, 2], [3, 4]]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `abs(-1)`.
    Call(Call),

    /// A bracketed list, such as `[1, 2]`.
    List(List),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::List(list) => list.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the innermost expression, looking through any parentheses.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Returns true if this expression may appear as the right-hand side of implicit
    /// multiplication. A bare number cannot, since `(x)2` reads as a typo.
    pub fn is_implicit_mul_target(&self) -> bool {
        !matches!(self, Expr::Literal(literal) if literal.is_number())
            && !matches!(self, Expr::Unary(_))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            return Err(input.error(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        Binary::parse_expr(input, lhs, Precedence::Any).map(|(expr, _)| expr)
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the simplest expressions, and are the building blocks of more complex
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `abs(-1)`.
    Call(Call),

    /// A bracketed list, such as `[1, 2]`.
    List(List),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
            Primary::List(list) => list.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Name) => {
                // a name followed by an opening parenthesis is a function call; look ahead so
                // that errors inside the arguments are reported as-is
                let mut input_ahead = input.clone();
                let is_call = input_ahead.try_parse::<LitSym>().is_ok()
                    && input_ahead.peek_kind() == Some(TokenKind::OpenParen);
                if is_call {
                    input.try_parse::<Call>().map(Self::Call)
                } else {
                    input.try_parse::<Literal>().map(Self::Literal)
                }
            },
            Some(TokenKind::Int | TokenKind::Float) => input.try_parse::<Literal>().map(Self::Literal),
            Some(TokenKind::OpenParen) => input.try_parse::<Paren>().map(Self::Paren),
            Some(TokenKind::OpenSquare) => input.try_parse::<List>().map(Self::List),
            Some(TokenKind::CloseParen) => Err(input.error(kind::UnclosedParenthesis { opening: false })),
            Some(found) => Err(input.error(kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                    TokenKind::OpenSquare,
                ],
                found,
            })),
            None => Err(input.error(kind::UnexpectedEof)),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
            Primary::List(list) => Self::List(list),
        }
    }
}
