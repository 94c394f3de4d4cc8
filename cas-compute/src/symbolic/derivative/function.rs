//! Symbolic derivatives of the known functions.

use crate::symbolic::{
    error::SymbolicError,
    expr::{Expr, Func},
};
use super::{derivative, MultBuilder};

/// `(1 - u^2)^(-1/2)`
fn inverse_sqrt_one_minus_square(u: &Expr) -> Expr {
    let square = Expr::pow(u.clone(), Expr::int(2));
    Expr::pow(Expr::one() - square, Expr::number((-1, 2)))
}

/// Returns `f'(u)`, the derivative of the function with respect to its argument.
fn outer_derivative(func: Func, u: &Expr) -> Result<Expr, SymbolicError> {
    let call = |func| Expr::call(func, u.clone());
    let square = |e: Expr| Expr::pow(e, Expr::int(2));
    Ok(match func {
        Func::Sin => call(Func::Cos),
        Func::Cos => -call(Func::Sin),
        Func::Tan => square(call(Func::Tan)) + Expr::one(),
        Func::Asin => inverse_sqrt_one_minus_square(u),
        Func::Acos => -inverse_sqrt_one_minus_square(u),
        Func::Atan => (square(u.clone()) + Expr::one()).recip(),
        Func::Sinh => call(Func::Cosh),
        Func::Cosh => call(Func::Sinh),
        Func::Tanh => Expr::one() - square(call(Func::Tanh)),
        Func::Log => u.clone().recip(),
        Func::Abs => call(Func::Sign),
        Func::Sign => return Err(SymbolicError::NotDifferentiable(call(Func::Sign).to_string())),
    })
}

/// Computes the derivative of a known function and performs the chain rule.
pub(super) fn function_derivative(func: Func, arg: &Expr, var: &str) -> Result<Expr, SymbolicError> {
    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(arg, var)?);
    mult_group.mult(outer_derivative(func, arg)?);
    Ok(mult_group.into())
}
