//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::{add_numeric, do_multiply, mul_numeric}, step::{Step, StepCollector}},
};

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .flat_map(|factor| factor.factors().iter().cloned())
            .collect::<Vec<_>>();
        Some(Expr::Mul(new_factors))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let exact_zero = factors.iter().any(|factor| factor.as_number().map_or(false, |n| *n == 0));
        if exact_zero {
            Some(Expr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies every numeric factor together into a single factor, placed first.
///
/// `2*x*3 = 6*x`
pub fn multiply_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(Expr::is_numeric);
        if numbers.len() < 2 {
            return None;
        }

        let product = numbers.iter()
            .skip(1)
            .try_fold(numbers[0].clone(), |acc, n| mul_numeric(&acc, n))?;
        let mut new_factors = vec![product];
        new_factors.extend(rest);
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `2^c*3^c = 6^c` for a non-integer numeric `c`
/// etc.
///
/// A bare number is never combined with a power of the same number, so that `2*sqrt(2)` stays as
/// it is.
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            if new_factors[current_factor_idx].is_numeric() {
                current_factor_idx += 1;
                continue;
            }

            let (mut current_base, mut current_exp) = new_factors[current_factor_idx].base_and_exp();
            let mut merged = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                if new_factors[next_factor_idx].is_numeric() {
                    next_factor_idx += 1;
                    continue;
                }

                let (next_base, next_exp) = new_factors[next_factor_idx].base_and_exp();
                let numeric_roots = current_base.as_number().is_some()
                    && next_base.as_number().is_some()
                    && current_exp == next_exp
                    && current_exp.as_number().map_or(false, |n| *n.denom() != 1);

                if current_base == next_base {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_exp = add_numeric(&current_exp, &next_exp)
                        .unwrap_or_else(|| current_exp.clone() + next_exp);
                    new_factors.remove(next_factor_idx);
                    merged = true;
                } else if numeric_roots {
                    // exponents must be strictly equal
                    // if they are, apply a^c*b^c = (a*b)^c
                    current_base = mul_numeric(&current_base, &next_base)
                        .unwrap_or_else(|| current_base.clone() * next_base);
                    new_factors.remove(next_factor_idx);
                    merged = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            // after all combining, update the current factor
            if merged {
                new_factors[current_factor_idx] = if current_exp.is_one() {
                    current_base
                } else {
                    Expr::pow(current_base, current_exp)
                };
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
