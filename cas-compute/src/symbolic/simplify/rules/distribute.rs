//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::{do_multiply, do_power}, step::{Step, StepCollector}},
};

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `Expr::Add`, and distribute every other factor over it
        let idx = factors.iter().position(|factor| matches!(factor, Expr::Add(_)))?;
        let mut others = factors.to_vec();
        let add_terms = match others.remove(idx) {
            Expr::Add(terms) => terms,
            _ => return None,
        };

        let new_terms = add_terms.into_iter()
            .map(|term| Expr::Mul(others.clone()) * term)
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c` for integer `c`
///
/// For other numeric `c`, only positive numbers are pulled out of the power:
/// `(4*x)^(1/2) = 4^(1/2) * x^(1/2)`
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let Expr::Mul(factors) = base else {
            return None;
        };

        if exp.as_integer().is_some() {
            let new_factors = factors.iter()
                .map(|factor| Expr::pow(factor.clone(), exp.clone()))
                .collect::<Vec<_>>();
            return Some(Expr::Mul(new_factors));
        }

        exp.as_number()?;
        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.as_number().map_or(false, |n| *n > 0));
        if positive.is_empty() {
            return None;
        }

        let mut new_factors = positive.into_iter()
            .map(|factor| Expr::pow(factor, exp.clone()))
            .collect::<Vec<_>>();
        new_factors.push(Expr::pow(Expr::Mul(rest).downgrade(), exp.clone()));
        Some(Expr::Mul(new_factors))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}
