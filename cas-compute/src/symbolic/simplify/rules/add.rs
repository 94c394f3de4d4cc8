//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::{add_numeric, do_add}, step::{Step, StepCollector}},
};

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .flat_map(|term| term.terms().iter().cloned())
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Adds every numeric term together into a single term.
///
/// `2+x+3 = x+5`
pub fn add_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let (numbers, mut new_terms): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(Expr::is_numeric);
        if numbers.len() < 2 {
            return None;
        }

        let sum = numbers.iter()
            .skip(1)
            .try_fold(numbers[0].clone(), |acc, n| add_numeric(&acc, n))?;
        new_terms.push(sum);
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_coeff, current_rest) = new_terms[current_term_idx].coeff_and_rest();
            let mut merged = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_coeff, next_rest) = new_terms[next_term_idx].coeff_and_rest();

                // the non-numeric factors must be strictly equal
                if current_rest == next_rest {
                    // if so, apply a*n + a*m = (n+m)*a
                    current_coeff = add_numeric(&current_coeff, &next_coeff)?;
                    new_terms.remove(next_term_idx);
                    merged = true;
                } else {
                    next_term_idx += 1;
                }
            }

            if merged {
                new_terms[current_term_idx] = if current_coeff.is_one() {
                    current_rest
                } else if current_rest.is_one() {
                    current_coeff
                } else {
                    current_coeff * current_rest
                };
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
