//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply.

pub mod add;
pub mod distribute;
pub mod float;
pub mod imaginary;
pub mod log;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use rug::Rational;
use crate::primitive::{float as make_float, PRECISION};
use crate::symbolic::expr::{Expr, Func, Primary};
use super::step::{Step, StepCollector};

/// If the expression is a call to the given function, calls the given transformation function
/// with the argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &Expr,
    func: Func,
    f: impl Copy + Fn(&Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Primary(Primary::Call(target, arg)) if *target == func => f(arg),
        _ => None,
    }
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl Copy + Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp(base, exp) = expr {
        f(base, exp)
    } else {
        None
    }
}

/// Adds two numeric expressions. The sum is exact if both are exact, and a float otherwise.
///
/// Returns `None` if either expression is not numeric.
pub(crate) fn add_numeric(lhs: &Expr, rhs: &Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (Expr::Primary(Primary::Number(a)), Expr::Primary(Primary::Number(b))) => {
            Some(Expr::number(Rational::from(a + b)))
        },
        (Expr::Primary(Primary::Number(a)), Expr::Primary(Primary::Float(b)))
            | (Expr::Primary(Primary::Float(b)), Expr::Primary(Primary::Number(a))) => {
            Some(Expr::float(make_float(a) + b))
        },
        (Expr::Primary(Primary::Float(a)), Expr::Primary(Primary::Float(b))) => {
            Some(Expr::float(rug::Float::with_val(PRECISION, a + b)))
        },
        _ => None,
    }
}

/// Multiplies two numeric expressions. The product is exact if both are exact, and a float
/// otherwise.
///
/// Returns `None` if either expression is not numeric.
pub(crate) fn mul_numeric(lhs: &Expr, rhs: &Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (Expr::Primary(Primary::Number(a)), Expr::Primary(Primary::Number(b))) => {
            Some(Expr::number(Rational::from(a * b)))
        },
        (Expr::Primary(Primary::Number(a)), Expr::Primary(Primary::Float(b)))
            | (Expr::Primary(Primary::Float(b)), Expr::Primary(Primary::Number(a))) => {
            Some(Expr::float(make_float(a) * b))
        },
        (Expr::Primary(Primary::Float(a)), Expr::Primary(Primary::Float(b))) => {
            Some(Expr::float(rug::Float::with_val(PRECISION, a * b)))
        },
        _ => None,
    }
}

/// Returns the expression multiplied by `-1`, folding the sign into its numeric coefficient.
pub(crate) fn negate(expr: &Expr) -> Expr {
    let (coeff, rest) = expr.coeff_and_rest();
    let coeff = mul_numeric(&coeff, &Expr::int(-1)).unwrap_or(coeff);
    if coeff.is_one() {
        rest
    } else if rest.is_one() {
        coeff
    } else {
        coeff * rest
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| float::all(expr, step_collector))
        .or_else(|| imaginary::all(expr, step_collector))
        .or_else(|| trigonometry::all(expr, step_collector))
        .or_else(|| log::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
}
