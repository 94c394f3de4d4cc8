//! Simplification rules for power expressions.

use rug::{ops::Pow, Integer, Rational};
use crate::symbolic::{
    expr::{Const, Expr},
    simplify::{rules::{do_power, mul_numeric}, step::{Step, StepCollector}},
};

/// The largest exponent numerator that is evaluated exactly.
const MAX_EXACT_EXP: u32 = 1024;

/// The largest root index that is evaluated exactly.
const MAX_ROOT: u32 = 64;

/// Trial divisors above this bound are not tried when extracting perfect powers.
const MAX_TRIAL_DIVISOR: u32 = 10_000;

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, exp| {
        if exp.as_number().map_or(false, |n| *n == 0) {
            Some(Expr::one())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0` for positive `a`
pub fn power_zero_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let positive_exp = exp.as_number().map_or(false, |n| *n > 0);
        if base.as_number().map_or(false, |n| *n == 0) && positive_exp {
            Some(Expr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, _| {
        if base.is_one() {
            Some(Expr::one())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        if exp.is_one() {
            Some(base.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)` for integer `c`
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        exp.as_integer()?;
        match base {
            Expr::Exp(inner_base, inner_exp) => {
                let new_exp = mul_numeric(inner_exp, exp)
                    .unwrap_or_else(|| (**inner_exp).clone() * exp.clone());
                Some(Expr::pow((**inner_base).clone(), new_exp))
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Splits `n` into `(k, m)` such that `n = k^q * m`, pulling out every `q`-th power that can be
/// found by trial division.
fn extract_power(n: Integer, q: u32) -> (Integer, Integer) {
    // the whole number may be a perfect power, even if its prime factors are large
    let root = n.clone().root(q);
    if root.clone().pow(q) == n {
        return (root, Integer::from(1));
    }

    let mut k = Integer::from(1);
    let mut m = n;
    for d in 2..MAX_TRIAL_DIVISOR {
        let dq = Integer::from(d).pow(q);
        if dq > m {
            break;
        }
        while m.is_divisible(&dq) {
            m /= &dq;
            k *= d;
        }
    }
    (k, m)
}

/// Evaluates `base^exp` exactly, leaving an irreducible root behind if necessary. The denominator
/// of the result is rationalized, and square roots of negative numbers become multiples of `I`.
///
/// - `2^3 = 8`
/// - `12^(1/2) = 2*sqrt(3)`
/// - `(1/2)^(1/2) = sqrt(2)/2`
/// - `(-4)^(1/2) = 2*I`
/// - `(-8)^(1/3) = -2`
pub(crate) fn exact_power(base: &Rational, exp: &Rational) -> Option<Expr> {
    let p = exp.numer().to_i32()?;
    let q = exp.denom().to_u32()?;
    if p.unsigned_abs() > MAX_EXACT_EXP || q > MAX_ROOT {
        return None;
    }

    if *base == 0 {
        return if p > 0 { Some(Expr::zero()) } else { None };
    }

    let power = base.clone().pow(p);
    if q == 1 {
        return Some(Expr::number(power));
    }

    let negative = power < 0;
    if negative && q % 2 == 0 && q != 2 {
        return None;
    }

    let (numer, denom) = power.abs().into_numer_denom();
    let radicand = numer * denom.clone().pow(q - 1);
    let (k, m) = extract_power(radicand, q);

    let mut coeff = Rational::from((k, denom));
    if negative && q % 2 == 1 {
        coeff = -coeff;
    }

    let mut factors = Vec::new();
    if coeff != 1 {
        factors.push(Expr::number(coeff));
    }
    if m != 1 {
        factors.push(Expr::pow(Expr::number(m), Expr::number(Rational::from((1, q)))));
    }
    if negative && q == 2 {
        factors.push(Expr::constant(Const::I));
    }
    Some(Expr::Mul(factors).downgrade())
}

/// Evaluates powers of exact numbers.
///
/// `2^3 = 8`
/// `sqrt(12) = 2*sqrt(3)`
pub fn numeric_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let result = exact_power(base.as_number()?, exp.as_number()?)?;
        if &result == expr {
            None
        } else {
            Some(result)
        }
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn power(base: i64, p: i32, q: u32) -> String {
        exact_power(&Rational::from(base), &Rational::from((p, q)))
            .map(|expr| expr.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn integer_powers() {
        assert_eq!(power(2, 10, 1), "1024");
        assert_eq!(power(2, -2, 1), "1/4");
        assert_eq!(power(0, 3, 1), "0");
    }

    #[test]
    fn roots() {
        assert_eq!(power(12, 1, 2), "2*sqrt(3)");
        assert_eq!(power(16, 1, 4), "2");
        assert_eq!(power(2, 3, 2), "2*sqrt(2)");
        assert_eq!(power(2, -1, 2), "sqrt(2)/2");
        assert_eq!(power(-4, 1, 2), "2*I");
        assert_eq!(power(-8, 1, 3), "-2");
        assert_eq!(power(-3, 1, 2), "sqrt(3)*I");
    }

    #[test]
    fn irreducible_root_is_unchanged() {
        let expr = Expr::int(2).sqrt();
        assert_eq!(numeric_power(&expr, &mut ()), None);
    }
}
