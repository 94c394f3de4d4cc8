//! Simplification rules for logarithms, exponentials and absolute values.

use rug::{Integer, Rational};
use crate::symbolic::{
    expr::{Const, Expr, Func},
    simplify::{rules::{do_call, do_power}, step::{Step, StepCollector}},
};

/// If `n = b^k` for some integer `b` and `k > 1`, returns `(b, k)` with the largest such `k`.
fn perfect_power(n: &Integer) -> Option<(Integer, u32)> {
    if *n <= 1 || !n.is_perfect_power() {
        return None;
    }

    let bits = n.significant_bits();
    (2..=bits).rev().find_map(|k| {
        let root = n.clone().root(k);
        if root > 1 && root.clone().pow(k) == *n {
            Some((root, k))
        } else {
            None
        }
    })
}

/// `log(1) = 0`
/// `log(E) = 1`
/// `log(E^n) = n` for numeric `n`
/// `log(8) = 3*log(2)`
/// `log(1/2) = -log(2)`
pub fn log_value(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Log, |arg| {
        if arg.is_one() {
            return Some(Expr::zero());
        }
        if arg.is_const(Const::E) {
            return Some(Expr::one());
        }
        if let Expr::Exp(base, exp) = arg {
            if base.is_const(Const::E) && exp.as_number().is_some() {
                return Some((**exp).clone());
            }
        }

        let n = arg.as_number()?;
        if *n.numer() == 1 && *n.denom() > 1 {
            return Some(-Expr::number(Rational::from(n.denom().clone())).log());
        }

        if *n.denom() != 1 {
            return None;
        }
        let (root, k) = perfect_power(n.numer())?;
        Some(Expr::int(i64::from(k)) * Expr::number(root).log())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::LogValue);
    Some(opt)
}

/// `E^log(x) = x`
/// `E^(n*log(x)) = x^n` for numeric `n`
pub fn exp_log(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        if !base.is_const(Const::E) {
            return None;
        }

        if let Some((Func::Log, arg)) = exp.as_call() {
            return Some(arg.clone());
        }

        match exp {
            Expr::Mul(factors) => match factors.as_slice() {
                [n, call] | [call, n] if n.is_numeric() => match call.as_call() {
                    Some((Func::Log, arg)) => Some(Expr::pow(arg.clone(), n.clone())),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::ExpLog);
    Some(opt)
}

/// `Abs(-3) = 3`
/// `sign(-3) = -1`
/// `Abs(pi) = pi`
pub fn abs_value(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    let positive_const = arg.is_const(Const::Pi) || arg.is_const(Const::E);
    let value = match func {
        Func::Abs if positive_const => arg.clone(),
        Func::Abs => Expr::number(Rational::from(arg.as_number()?.abs_ref())),
        Func::Sign if positive_const => Expr::one(),
        Func::Sign => Expr::int(i64::from(arg.as_number()?.cmp0() as i8)),
        _ => return None,
    };

    step_collector.push(Step::AbsValue);
    Some(value)
}

/// Applies all logarithm rules.
///
/// All logarithm rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    log_value(expr, step_collector)
        .or_else(|| exp_log(expr, step_collector))
        .or_else(|| abs_value(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn perfect_powers() {
        assert_eq!(perfect_power(&Integer::from(8)), Some((Integer::from(2), 3)));
        assert_eq!(perfect_power(&Integer::from(36)), Some((Integer::from(6), 2)));
        assert_eq!(perfect_power(&Integer::from(64)), Some((Integer::from(2), 6)));
        assert_eq!(perfect_power(&Integer::from(12)), None);
    }
}
