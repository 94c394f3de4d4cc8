//! Simplification rules for trigonometric and hyperbolic functions.

use rug::Rational;
use crate::symbolic::{
    expr::{Const, Expr, Func, Primary},
    simplify::{rules::{do_add, negate}, step::{Step, StepCollector}},
};

/// Returns `k` if the expression is `k*pi` for a rational `k`.
fn pi_multiple(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Primary(Primary::Number(n)) if *n == 0 => Some(Rational::new()),
        Expr::Primary(Primary::Const(Const::Pi)) => Some(Rational::from(1)),
        Expr::Mul(factors) => match factors.as_slice() {
            [a, b] if b.is_const(Const::Pi) => a.as_number().cloned(),
            [a, b] if a.is_const(Const::Pi) => b.as_number().cloned(),
            _ => None,
        },
        _ => None,
    }
}

/// Returns `k*pi`.
fn times_pi(k: Rational) -> Expr {
    if k == 0 {
        Expr::zero()
    } else if k == 1 {
        Expr::constant(Const::Pi)
    } else {
        Expr::Mul(vec![Expr::number(k), Expr::constant(Const::Pi)])
    }
}

/// Returns `sqrt(n) / d`.
fn surd(n: i64, d: i64) -> Expr {
    Expr::Mul(vec![Expr::number(Rational::from((1, d))), Expr::int(n).sqrt()])
}

fn rational(n: i64, d: i64) -> Rational {
    Rational::from((n, d))
}

/// Reduces `k` into the range `[0, period)`.
fn reduce(k: &Rational, period: i64) -> Rational {
    let turns = Rational::from(k / period).floor();
    Rational::from(k - turns * period)
}

/// `sin(k*pi)` for `k` in `[0, 1/2]`, for multiples of `pi/6` and `pi/4`.
fn sin_first_quadrant(k: &Rational) -> Option<Expr> {
    let value = if *k == 0 {
        Expr::zero()
    } else if *k == rational(1, 6) {
        Expr::number(rational(1, 2))
    } else if *k == rational(1, 4) {
        surd(2, 2)
    } else if *k == rational(1, 3) {
        surd(3, 2)
    } else if *k == rational(1, 2) {
        Expr::one()
    } else {
        return None;
    };
    Some(value)
}

/// `sin(k*pi)`
fn sin_value(k: &Rational) -> Option<Expr> {
    let k = reduce(k, 2);
    if k >= 1 {
        return sin_value(&Rational::from(&k - 1u32)).map(|value| negate(&value));
    }
    if k > rational(1, 2) {
        return sin_first_quadrant(&Rational::from(1 - &k));
    }
    sin_first_quadrant(&k)
}

/// `cos(k*pi) = sin((k + 1/2)*pi)`
fn cos_value(k: &Rational) -> Option<Expr> {
    sin_value(&Rational::from(k + rational(1, 2)))
}

/// `tan(k*pi)`, which is undefined at odd multiples of `pi/2`.
fn tan_value(k: &Rational) -> Option<Expr> {
    let k = reduce(k, 1);
    if k > rational(1, 2) {
        return tan_value(&Rational::from(1 - &k)).map(|value| negate(&value));
    }

    let value = if k == 0 {
        Expr::zero()
    } else if k == rational(1, 6) {
        surd(3, 3)
    } else if k == rational(1, 4) {
        Expr::one()
    } else if k == rational(1, 3) {
        Expr::int(3).sqrt()
    } else {
        return None;
    };
    Some(value)
}

/// Exact values of trigonometric functions at multiples of `pi/6` and `pi/4`, and of hyperbolic
/// functions at `0`.
///
/// `sin(pi/6) = 1/2`
/// `cos(3*pi/4) = -sqrt(2)/2`
/// `cosh(0) = 1`
pub fn trig_value(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    let value = match func {
        Func::Sin => sin_value(&pi_multiple(arg)?),
        Func::Cos => cos_value(&pi_multiple(arg)?),
        Func::Tan => tan_value(&pi_multiple(arg)?),
        Func::Sinh | Func::Tanh if arg.is_zero() => Some(Expr::zero()),
        Func::Cosh if arg.is_zero() => Some(Expr::one()),
        _ => None,
    }?;

    step_collector.push(Step::TrigValue);
    Some(value)
}

/// `sin(-x) = -sin(x)`
/// `cos(-x) = cos(x)`
/// etc. for all odd and even functions
pub fn symmetry(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    if !func.is_odd() && !func.is_even() {
        return None;
    }

    let (coeff, _) = arg.coeff_and_rest();
    if !coeff.is_negative_number() {
        return None;
    }

    let positive = Expr::call(func, negate(arg));
    step_collector.push(Step::Symmetry);
    if func.is_odd() {
        Some(negate(&positive))
    } else {
        Some(positive)
    }
}

/// Known values of `asin`, as `(value, k)` with `asin(value) = k*pi`.
fn asin_table() -> [(Expr, Rational); 5] {
    [
        (Expr::zero(), Rational::new()),
        (Expr::number(rational(1, 2)), rational(1, 6)),
        (surd(2, 2), rational(1, 4)),
        (surd(3, 2), rational(1, 3)),
        (Expr::one(), rational(1, 2)),
    ]
}

/// Known values of `atan`, as `(value, k)` with `atan(value) = k*pi`.
fn atan_table() -> [(Expr, Rational); 4] {
    [
        (Expr::zero(), Rational::new()),
        (surd(3, 3), rational(1, 6)),
        (Expr::one(), rational(1, 4)),
        (Expr::int(3).sqrt(), rational(1, 3)),
    ]
}

fn lookup<const N: usize>(table: [(Expr, Rational); N], value: &Expr) -> Option<Rational> {
    table.into_iter()
        .find(|(known, _)| known == value)
        .map(|(_, k)| k)
}

/// Exact values of inverse trigonometric functions. Negative arguments of `asin` and `atan` are
/// handled by [`symmetry`].
///
/// `asin(1/2) = pi/6`
/// `acos(-1) = pi`
/// `atan(1) = pi/4`
pub fn inverse_trig_value(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    let k = match func {
        Func::Asin => lookup(asin_table(), arg)?,
        Func::Acos => {
            // acos(x) = pi/2 - asin(x), acos(-x) = pi - acos(x)
            let (coeff, _) = arg.coeff_and_rest();
            if coeff.is_negative_number() {
                rational(1, 2) + lookup(asin_table(), &negate(arg))?
            } else {
                rational(1, 2) - lookup(asin_table(), arg)?
            }
        },
        Func::Atan => lookup(atan_table(), arg)?,
        _ => return None,
    };

    step_collector.push(Step::InverseTrigValue);
    Some(times_pi(k))
}

/// `sin(asin(x)) = x`
/// `cos(acos(x)) = x`
/// `tan(atan(x)) = x`
pub fn function_of_inverse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (outer, arg) = expr.as_call()?;
    let (inner, inner_arg) = arg.as_call()?;
    let cancels = matches!(
        (outer, inner),
        (Func::Sin, Func::Asin) | (Func::Cos, Func::Acos) | (Func::Tan, Func::Atan)
    );
    if !cancels {
        return None;
    }

    step_collector.push(Step::FunctionOfInverse);
    Some(inner_arg.clone())
}

/// If the term is `c*f(u)^2`, returns `(c, u)`.
fn squared_call(term: &Expr, func: Func) -> Option<(Expr, Expr)> {
    let (coeff, rest) = term.coeff_and_rest();
    let Expr::Exp(base, exp) = rest else {
        return None;
    };
    if !exp.as_number().map_or(false, |n| *n == 2) {
        return None;
    }

    let (base_func, arg) = base.as_call()?;
    if base_func == func {
        Some((coeff, arg.clone()))
    } else {
        None
    }
}

/// `c*sin(x)^2 + c*cos(x)^2 = c`
pub fn pythagorean(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        for (i, term) in terms.iter().enumerate() {
            let Some((sin_coeff, sin_arg)) = squared_call(term, Func::Sin) else {
                continue;
            };

            let partner = terms.iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .find(|(_, other)| {
                    squared_call(other, Func::Cos)
                        .map_or(false, |(coeff, arg)| coeff == sin_coeff && arg == sin_arg)
                });

            if let Some((j, _)) = partner {
                let mut new_terms = terms.iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != i && *idx != j)
                    .map(|(_, term)| term.clone())
                    .collect::<Vec<_>>();
                new_terms.push(sin_coeff);
                return Some(Expr::Add(new_terms).downgrade());
            }
        }

        None
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    trig_value(expr, step_collector)
        .or_else(|| inverse_trig_value(expr, step_collector))
        .or_else(|| symmetry(expr, step_collector))
        .or_else(|| function_of_inverse(expr, step_collector))
        .or_else(|| pythagorean(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sin_at(n: i64, d: i64) -> String {
        sin_value(&rational(n, d)).map(|expr| expr.to_string()).unwrap_or_default()
    }

    #[test]
    fn sine_table_with_symmetry() {
        assert_eq!(sin_at(1, 6), "1/2");
        assert_eq!(sin_at(5, 6), "1/2");
        assert_eq!(sin_at(7, 6), "-1/2");
        assert_eq!(sin_at(-1, 2), "-1");
        assert_eq!(sin_at(3, 4), "sqrt(2)/2");
        assert_eq!(sin_at(1, 5), "");
    }

    #[test]
    fn cosine_and_tangent() {
        let cos = |n, d| cos_value(&rational(n, d)).map(|expr| expr.to_string());
        assert_eq!(cos(1, 1).as_deref(), Some("-1"));
        assert_eq!(cos(1, 3).as_deref(), Some("1/2"));
        let tan = |n, d| tan_value(&rational(n, d)).map(|expr| expr.to_string());
        assert_eq!(tan(3, 4).as_deref(), Some("-1"));
        assert_eq!(tan(1, 2), None);
    }
}
