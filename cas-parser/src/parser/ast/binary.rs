use std::ops::Range;
use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind, Error},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};

/// A binary operator, including implicit multiplication.
#[derive(Debug, Clone, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before building the `1 + 2` node, we
    /// check if the operator after `2` has higher precedence than `+`. It does, so `2 * 3` is
    /// parsed first by calling into [`Self::parse_expr`] with `2` as its left-hand-side.
    ///
    /// Implicit multiplication is handled here too. In `1 + 2x`, there is no operator after `2`,
    /// so we assume one with the precedence of multiplication and continue as if it existed. The
    /// `changed` flag returned by [`Self::parse_expr`] tells us whether anything was actually
    /// parsed; if not, there is nothing left to multiply and the loop must end.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = input.nested(|input| Self::parse_expr(input, rhs, next_op.precedence()))?.0;
                } else {
                    // lower precedence, or equal precedence and left-associativity, as in
                    // `1 * 2 + 3` or `1 * 2 * 3`; let `lhs op rhs` be built first
                    break;
                }
            } else {
                // there is no operator; if the previous operator binds at least as tightly as
                // multiplication, implicit multiplication cannot take priority
                if precedence >= Precedence::Factor {
                    break;
                }

                // operands separated by whitespace are never multiplied
                if input.at_whitespace() {
                    break;
                }

                let (expr, changed) = input.nested(|input| Self::parse_expr(input, rhs, Precedence::Factor))?;

                // `rhs = expr;` must happen in all cases, even if `changed` is false, otherwise it
                // would've been moved into `Self::parse_expr` above
                rhs = expr;

                if !changed {
                    break;
                }
            }
        }

        // create the binary node representing `lhs op rhs`
        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        let op = match op {
            BinOpExt::Op(op) => op,
            BinOpExt::ImplicitMultiplication => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };

        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span: start_span..end_span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator and a right-hand-side.
    ///
    /// The returned flag is true if any operator (explicit or implicit) was consumed. See
    /// [`Self::complete_rhs`] for why it is needed.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                *input = input_ahead;
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op.into(), rhs)?;
            } else if Precedence::Factor >= precedence {
                // implicit multiplication test

                // do not continue if there is whitespace after `lhs`
                if input.at_whitespace() {
                    break;
                }

                // ensure that we get here because there is *no* operator, not because the
                // operator has lower precedence
                if input_ahead.clone().try_parse::<BinOp>().is_ok() {
                    break;
                }

                // if there is no expression, there is no implicit multiplication
                let Ok(rhs) = Unary::parse_or_lower(&mut input_ahead) else {
                    break;
                };

                if rhs.is_implicit_mul_target() {
                    *input = input_ahead;
                    lhs = Self::complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
                } else {
                    break;
                }
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}
