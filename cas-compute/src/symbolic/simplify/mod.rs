//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce the complexity of an
//! expression. It does this by repeatedly applying rewriting rules to the expression in multiple
//! passes, until no more rules apply.
//!
//! The rules alone never undo a power of a sum or cancel a common factor of a fraction, since
//! neither is a local rewrite. After the rules reach a fixed point, the simplifier also builds the
//! full expansion and the rational cancellation of the result, and keeps whichever of the three
//! forms has the lowest complexity.
//!
//! Complexity is an informal, arbitrary metric that is used to determine whether one expression is
//! simpler than another. The default complexity heuristic used is [`default_complexity`] (click
//! for more information). However, this can be overridden by providing a custom complexity
//! function to the [`simplify_with`] function.

pub mod rules;
pub mod step;

use rug::Integer;
use step::{Step, StepCollector};
use super::{expand::expand, expr::{Expr, Primary}, rational::cancel};

/// The maximum number of passes made over a single node. Rules are written to make progress on
/// every application, so this bound is only reached by expressions that oscillate between
/// equivalent forms.
const MAX_PASSES: usize = 64;

/// The cost of a single integer is capped so that huge numbers don't overflow the sum.
const MAX_NUMBER_COST: usize = 1_000_000;

fn integer_cost(n: &Integer) -> usize {
    n.to_usize().map_or(MAX_NUMBER_COST, |n| n.min(MAX_NUMBER_COST))
}

/// The default complexity heuristic function.
///
/// This function computes complexity using these simple rules:
///
/// - `complexity(integer) = abs(integer)`
/// - `complexity(fraction) = abs(numerator) + denominator`
/// - `complexity(float) = 2`
/// - `complexity(symbol) = length(symbol)`
/// - `complexity(constant) = 1`
/// - `complexity(call) = length(name) + complexity(argument)`
/// - `complexity(add) = 3 + sum(complexity(terms))`
/// - `complexity(mul) = 2 + sum(complexity(factors))`
/// - `complexity(exp) = 1 + complexity(lhs) + complexity(rhs)`
pub fn default_complexity(expr: &Expr) -> usize {
    let mut complexity = 0;
    let mut stack = vec![expr];
    while let Some(expr) = stack.pop() {
        complexity += match expr {
            Expr::Primary(primary) => match primary {
                Primary::Number(n) => {
                    let numer = integer_cost(&Integer::from(n.numer().abs_ref()));
                    if *n.denom() == 1 {
                        numer
                    } else {
                        numer + integer_cost(n.denom())
                    }
                },
                Primary::Float(_) => 2,
                Primary::Symbol(sym) => sym.len(),
                Primary::Const(_) => 1,
                Primary::Call(func, arg) => {
                    stack.push(arg);
                    func.name().len()
                },
            },
            Expr::Add(terms) => {
                stack.extend(terms.iter());
                3
            },
            Expr::Mul(factors) => {
                stack.extend(factors.iter());
                2
            },
            Expr::Exp(lhs, rhs) => {
                stack.push(lhs);
                stack.push(rhs);
                1
            },
        };
    }
    complexity
}

/// Base implementation of the simplification algorithm. Returns the simplified expression and
/// whether any rule was applied.
fn inner_simplify_with(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> (Expr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            Expr::Primary(Primary::Call(_, ref mut arg)) => {
                let result = inner_simplify_with(arg, step_collector);
                **arg = result.0;
                changed_in_this_pass |= result.1;
                changed_at_least_once |= result.1;
            },
            Expr::Primary(_) => {},
            Expr::Add(ref mut children) | Expr::Mul(ref mut children) => {
                for child in children.iter_mut() {
                    let result = inner_simplify_with(child, step_collector);
                    *child = result.0;
                    // use |= instead of = to not reset these variables to false if already true
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            Expr::Exp(ref mut lhs, ref mut rhs) => {
                let result_l = inner_simplify_with(lhs, step_collector);
                let result_r = inner_simplify_with(rhs, step_collector);

                **lhs = result_l.0;
                **rhs = result_r.0;
                changed_in_this_pass |= result_l.1 || result_r.1;
                changed_at_least_once |= result_l.1 || result_r.1;
            },
        }

        if !changed_in_this_pass {
            break;
        }
    }

    (expr, changed_at_least_once)
}

/// Applies the simplification rules until a fixed point, without comparing against the expanded
/// and cancelled forms.
pub(crate) fn simplify_rules(expr: &Expr) -> Expr {
    inner_simplify_with(expr, &mut ()).0
}

/// Picks the least complex of the rule-simplified form, its expansion, and its cancellation. The
/// rule-simplified form wins ties.
fn choose<F>(simplified: Expr, complexity: F) -> Expr
where
    F: Fn(&Expr) -> usize,
{
    let mut best_complexity = complexity(&simplified);
    let mut best = simplified;
    for candidate in [expand(&best), cancel(&best)] {
        let candidate_complexity = complexity(&candidate);
        if candidate_complexity < best_complexity {
            best_complexity = candidate_complexity;
            best = candidate;
        }
    }
    best
}

/// Simplify the given expression, using the default complexity heuristic function.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, default_complexity)
}

/// Simplify the given expression, using the given complexity heuristic function.
///
/// The complexity heuristic function should return a number that represents the complexity of the
/// given expression. The lower the number, the simpler the expression.
pub fn simplify_with<F>(expr: &Expr, complexity: F) -> Expr
where
    F: Fn(&Expr) -> usize,
{
    choose(simplify_rules(expr), complexity)
}

/// Simplify the given expression, using the default complexity heuristic function. The steps taken
/// by the simplification rules will also be collected and returned. This is useful for debugging,
/// and also for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify_with(expr, &mut steps).0;
    (choose(expr, default_complexity), steps)
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast).unwrap()
    }

    fn simplified(input: &str) -> String {
        simplify(&parse(input)).to_string()
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        assert_eq!(simplified("0+0*(3x+5b^2)+0+(3a)"), "3*a");
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*(3x+5b^2)*1*(3a)"), "0");
        assert_eq!(simplified("1*3*1*1*1*(1+(x^2+5x+6)*0)*1*1"), "3");
    }

    #[test]
    fn combine_like_factors() {
        let expr = simplify(&parse("a * b * a^3 * c^2 * d^2 * a^2 * b^4 * d^2"));
        assert_eq!(expr, parse("a^6 * b^5 * c^2 * d^4"));
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("2x + 3y - x + y/2"), "x + 7*y/2");
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplified("(1^0)^(3x+5b^2)^1^(3a)"), "1");
        assert_eq!(simplified("(0^1)^0"), "1");
        assert_eq!(simplified("sqrt(x)^2"), "x");
    }

    #[test]
    fn power_rule_steps() {
        let (expr, steps) = simplify_with_steps(&parse("(1^0)^(3x)"));
        assert_eq!(expr, Expr::one());
        assert_eq!(steps, vec![Step::PowerZero, Step::PowerOneLeft]);
    }

    #[test]
    fn exact_numbers() {
        assert_eq!(simplified("1/2 + 1/3"), "5/6");
        assert_eq!(simplified("sqrt(12)"), "2*sqrt(3)");
        assert_eq!(simplified("sqrt(1/2)"), "sqrt(2)/2");
        assert_eq!(simplified("sqrt(-4)"), "2*I");
        assert_eq!(simplified("I^2"), "-1");
        assert_eq!(simplified("0.5 + 1/4"), "0.75");
    }

    #[test]
    fn distribute_and_expand() {
        assert_eq!(simplified("(x+2)*(x+3)"), "x**2 + 5*x + 6");
        assert_eq!(simplified("(x+1)^2 - x^2"), "2*x + 1");
        assert_eq!(simplified("(x+1)^3"), "(x + 1)**3");
    }

    #[test]
    fn cancel_common_factor() {
        assert_eq!(simplified("(x^2-1)/(x-1)"), "x + 1");
    }

    #[test]
    fn trigonometry() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("sin(-x)"), "-sin(x)");
        assert_eq!(simplified("cos(-2x)"), "cos(2*x)");
        assert_eq!(simplified("sin(x)^2 + cos(x)^2"), "1");
        assert_eq!(simplified("asin(1)"), "pi/2");
        assert_eq!(simplified("acos(-1/2)"), "2*pi/3");
    }

    #[test]
    fn logarithms() {
        assert_eq!(simplified("log(1)"), "0");
        assert_eq!(simplified("log(e)"), "1");
        assert_eq!(simplified("exp(log(x))"), "x");
        assert_eq!(simplified("exp(2*log(x))"), "x**2");
        assert_eq!(simplified("log(8)/log(2)"), "3");
        assert_eq!(simplified("abs(-3)"), "3");
    }

    #[test]
    fn complexity_of_fractions() {
        assert_eq!(default_complexity(&parse("3/4")), 7);
        assert_eq!(default_complexity(&parse("x + 1")), 5);
    }
}
