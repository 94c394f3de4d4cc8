//! Antiderivatives of the basic forms, for arguments linear in the variable.

use rug::Rational;
use crate::symbolic::{
    expand::expand,
    expr::{Const, Expr, Func},
    poly::Poly,
};
use super::linear_coeff;

/// `∫ f(u) dx` for a known function `f` and `u = a*x + b`.
fn call(func: Func, u: &Expr, a: &Expr) -> Option<Expr> {
    let f = |func| Expr::call(func, u.clone());
    let square = || Expr::pow(u.clone(), Expr::int(2));
    let sqrt_one_minus_square = || (Expr::one() - square()).sqrt();
    let antiderivative = match func {
        Func::Sin => -f(Func::Cos),
        Func::Cos => f(Func::Sin),
        Func::Tan => -f(Func::Cos).log(),
        Func::Sinh => f(Func::Cosh),
        Func::Cosh => f(Func::Sinh),
        Func::Tanh => f(Func::Cosh).log(),
        Func::Log => u.clone() * f(Func::Log) - u.clone(),
        Func::Asin => u.clone() * f(Func::Asin) + sqrt_one_minus_square(),
        Func::Acos => u.clone() * f(Func::Acos) - sqrt_one_minus_square(),
        Func::Atan => {
            u.clone() * f(Func::Atan) - (square() + Expr::one()).log() / Expr::int(2)
        },
        Func::Abs | Func::Sign => return None,
    };
    Some(antiderivative / a.clone())
}

/// `∫ sin(u)^2 dx` and `∫ cos(u)^2 dx` for `u = a*x + b`.
fn trig_square(func: Func, u: &Expr, a: &Expr, var: &str) -> Option<Expr> {
    let half_x = Expr::symbol(var) / Expr::int(2);
    let sin_2u = Expr::call(Func::Sin, Expr::int(2) * u.clone()) / (Expr::int(4) * a.clone());
    match func {
        Func::Sin => Some(half_x - sin_2u),
        Func::Cos => Some(half_x + sin_2u),
        _ => None,
    }
}

/// Returns `(p, q)` if the expression is `p*x^2 + q` for positive rationals `p` and `q`, or
/// `q - p*x^2` if `negated` is true.
fn pure_quadratic(expr: &Expr, var: &str, negated: bool) -> Option<(Expr, Expr)> {
    let poly = Poly::from_expr(&expand(expr), var)?;
    match poly.coeffs() {
        [q, zero, p] if *zero == 0 => {
            let p = if negated { Expr::number(-p.clone()) } else { Expr::number(p.clone()) };
            let q = Expr::number(q.clone());
            let positive = |e: &Expr| e.as_number().map_or(false, |n| *n > 0);
            (positive(&p) && positive(&q)).then_some((p, q))
        },
        _ => None,
    }
}

/// `∫ base^exp dx`
fn power(base: &Expr, exp: &Expr, var: &str) -> Option<Expr> {
    let x = || Expr::symbol(var);

    // `∫ u^n dx`
    if exp.is_free_of(var) {
        if let Some(a) = linear_coeff(base, var) {
            return Some(if exp.as_number().map_or(false, |n| *n == -1) {
                base.clone().log() / a
            } else {
                let n = exp.clone() + Expr::one();
                Expr::pow(base.clone(), n.clone()) / (n * a)
            });
        }

        // `∫ 1/(p*x^2 + q) dx = atan(x*sqrt(p/q)) / sqrt(p*q)`
        if exp.as_number().map_or(false, |n| *n == -1) {
            if let Some((p, q)) = pure_quadratic(base, var, false) {
                let scale = (p.clone() / q.clone()).sqrt();
                return Some(Expr::call(Func::Atan, x() * scale) / (p * q).sqrt());
            }
        }

        // `∫ 1/sqrt(q - p*x^2) dx = asin(x*sqrt(p/q)) / sqrt(p)`
        if exp.as_number().map_or(false, |n| *n == Rational::from((-1, 2))) {
            if let Some((p, q)) = pure_quadratic(base, var, true) {
                let scale = (p.clone() / q).sqrt();
                return Some(Expr::call(Func::Asin, x() * scale) / p.sqrt());
            }
        }

        // `∫ sin(u)^2 dx`, `∫ cos(u)^2 dx`
        if exp.as_integer().map_or(false, |n| *n == 2) {
            let (func, u) = base.as_call()?;
            let a = linear_coeff(u, var)?;
            return trig_square(func, u, &a, var);
        }

        return None;
    }

    // `∫ c^u dx`
    if base.is_free_of(var) {
        let a = linear_coeff(exp, var)?;
        let value = Expr::pow(base.clone(), exp.clone());
        return Some(if base.is_const(Const::E) {
            value / a
        } else {
            value / (a * base.clone().log())
        });
    }

    None
}

/// Looks up the antiderivative of a single factor in the table.
pub(super) fn lookup(expr: &Expr, var: &str) -> Option<Expr> {
    match expr {
        Expr::Exp(base, exp) => power(base, exp, var),
        _ if expr.as_symbol() == Some(var) => {
            Some(Expr::pow(expr.clone(), Expr::int(2)) / Expr::int(2))
        },
        _ => {
            let (func, u) = expr.as_call()?;
            let a = linear_coeff(u, var)?;
            call(func, u, &a)
        },
    }
}
