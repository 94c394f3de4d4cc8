//! Solving equations for a single variable.
//!
//! [`solve`] finds the values of a variable that make an expression equal to zero. Polynomials
//! are solved exactly where possible, falling back to numerical approximations for the parts of a
//! polynomial with no rational roots. Other expressions are solved by isolating the variable.

mod invert;

use rug::{Complex, Rational};
use std::cmp::Ordering;
use crate::numerical::{Ctxt, Eval, EvalError};
use crate::primitive::float;
use super::{
    error::SymbolicError,
    expand::expand,
    expr::{Const, Expr},
    poly::{roots::durand_kerner, Poly, MAX_DEGREE},
    rational::as_numer_denom,
    simplify::{simplify, simplify_rules},
};

/// Candidates from isolation are kept if the expression evaluates to within this distance of
/// zero.
const CHECK_TOLERANCE: f64 = 1e-20;

/// Collects the expression into a polynomial in `var` with coefficients free of `var`. The
/// coefficients are returned in ascending order of degree, without trailing zeros.
fn collect(expr: &Expr, var: &str) -> Option<Vec<Expr>> {
    let mut coeffs: Vec<Vec<Expr>> = Vec::new();
    for term in expr.terms() {
        let mut degree = 0;
        let mut rest = Vec::new();
        for factor in term.factors() {
            match factor {
                Expr::Exp(base, exp) if base.as_symbol() == Some(var) => {
                    degree += exp.as_integer()?.to_usize()?;
                },
                factor if factor.as_symbol() == Some(var) => degree += 1,
                factor if factor.is_free_of(var) => rest.push(factor.clone()),
                _ => return None,
            }
        }

        if degree > MAX_DEGREE {
            return None;
        }
        if coeffs.len() <= degree {
            coeffs.resize(degree + 1, Vec::new());
        }
        coeffs[degree].push(Expr::Mul(rest).downgrade());
    }

    let mut coeffs = coeffs.into_iter()
        .map(|terms| simplify_rules(&Expr::Add(terms).downgrade()))
        .collect::<Vec<_>>();
    while coeffs.last().map_or(false, Expr::is_zero) {
        coeffs.pop();
    }
    Some(coeffs)
}

/// Returns the roots of `a*x^2 + b*x + c` from the quadratic formula.
fn quadratic(a: &Expr, b: &Expr, c: &Expr) -> Vec<Expr> {
    let disc = simplify_rules(&(b.clone() * b.clone() - Expr::int(4) * a.clone() * c.clone()));
    let root = disc.sqrt();
    let denom = Expr::int(2) * a.clone();
    if root.is_zero() {
        return vec![-b.clone() / denom];
    }
    vec![
        (-b.clone() - root.clone()) / denom.clone(),
        (-b.clone() + root) / denom,
    ]
}

/// Converts a numerical root into an expression with float parts.
fn float_root(root: Complex) -> Expr {
    let (re, im) = root.into_real_imag();
    if im.is_zero() {
        Expr::float(re)
    } else {
        Expr::float(re) + Expr::float(im) * Expr::constant(Const::I)
    }
}

/// Solves a polynomial with rational coefficients.
///
/// Zero roots and rational roots are found exactly. What remains is solved exactly if it is a
/// quadratic or biquadratic, and numerically otherwise.
fn solve_rational(poly: &Poly) -> Vec<Expr> {
    let mut roots = Vec::new();
    let mut rest = poly.clone();

    let zeros = rest.zero_root_multiplicity();
    if zeros > 0 {
        roots.push(Expr::zero());
        rest = rest.shift_down(zeros);
    }

    for root in rest.rational_roots() {
        while rest.degree() > 0 && rest.eval(&root) == 0 {
            rest = rest.deflate(&root);
        }
        roots.push(Expr::number(root));
    }

    let coeffs = rest.coeffs().iter().cloned().map(Expr::number).collect::<Vec<_>>();
    match coeffs.as_slice() {
        [] | [_] => {},
        [c, b, a] => roots.extend(quadratic(a, b, c)),

        // `a*x^4 + b*x^2 + c`, solved as a quadratic in `y = x^2`
        [c, zero1, b, zero3, a] if zero1.is_zero() && zero3.is_zero() => {
            for y in quadratic(a, b, c) {
                let x = simplify(&y.sqrt());
                roots.push(-x.clone());
                roots.push(x);
            }
        },
        _ => {
            // approximate the square-free part so that repeated roots converge
            let square_free = rest.div_rem(&rest.gcd(&rest.derivative())).0;
            roots.extend(durand_kerner(&square_free).into_iter().map(float_root));
        },
    }

    roots
}

/// Solves a polynomial with symbolic coefficients, up to degree 2.
fn solve_symbolic(coeffs: &[Expr]) -> Result<Vec<Expr>, SymbolicError> {
    match coeffs {
        [c, b] => Ok(vec![-c.clone() / b.clone()]),
        [c, b, a] => Ok(quadratic(a, b, c)),
        _ => Err(SymbolicError::SymbolicPolynomial { degree: coeffs.len().saturating_sub(1) }),
    }
}

/// Evaluates the expression with `var` bound to the candidate. Returns [`None`] if the candidate
/// itself cannot be evaluated, such as when it contains other variables.
fn eval_at(expr: &Expr, var: &str, candidate: &Expr) -> Option<Result<Complex, EvalError>> {
    let value = candidate.eval_default().ok()?;
    Some(expr.eval(&Ctxt::with_var(var, value)))
}

/// Returns true if the candidate is a solution, or if it cannot be checked.
fn check(expr: &Expr, var: &str, candidate: &Expr) -> bool {
    match eval_at(expr, var, candidate) {
        Some(Ok(value)) => {
            let distance = float(value.abs_ref()).to_f64();
            distance <= CHECK_TOLERANCE
        },
        Some(Err(_)) => false,
        None => true,
    }
}

/// Orders numerically evaluable solutions by real part, then imaginary part. Solutions that
/// cannot be evaluated go last, in their original order.
fn compare_solutions(a: &Option<(f64, f64)>, b: &Option<(f64, f64)>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Solves `expr = 0` for `var`.
///
/// The solutions are simplified, deduplicated, and sorted by their real and imaginary parts when
/// they can be evaluated. An expression that does not contain `var` has no solutions.
///
/// ```
/// use cas_compute::symbolic::{expr::Expr, solve};
/// use cas_parser::parser::{ast::Expr as AstExpr, Parser};
///
/// let ast = Parser::new("x^2+5x+6").try_parse_full::<AstExpr>().unwrap();
/// let solutions = solve(&Expr::try_from(ast).unwrap(), "x").unwrap();
/// let solutions = solutions.iter().map(ToString::to_string).collect::<Vec<_>>();
/// assert_eq!(solutions, ["-3", "-2"]);
/// ```
pub fn solve(expr: &Expr, var: &str) -> Result<Vec<Expr>, SymbolicError> {
    let simplified = simplify_rules(expr);
    if simplified.is_free_of(var) {
        return Ok(Vec::new());
    }

    let (numer, denom) = as_numer_denom(&simplified);
    let numer = expand(&numer);
    let denom = simplify_rules(&denom);

    let candidates = match collect(&numer, var) {
        Some(coeffs) if coeffs.iter().all(|c| c.as_number().is_some()) => {
            let poly = Poly::new(
                coeffs.iter()
                    .map(|c| c.as_number().cloned().unwrap_or_else(Rational::new))
                    .collect(),
            );
            solve_rational(&poly)
        },
        Some(coeffs) => solve_symbolic(&coeffs)?,
        None => invert::isolate(&numer, Expr::zero(), var)?
            .into_iter()
            .filter(|candidate| check(&simplified, var, candidate))
            .collect(),
    };

    let mut solutions: Vec<Expr> = Vec::new();
    for candidate in candidates {
        let candidate = simplify(&candidate);
        let zeroes_denom = !denom.is_one()
            && simplify(&denom.substitute(&Expr::symbol(var), &candidate)).is_zero();
        if !zeroes_denom && !solutions.contains(&candidate) {
            solutions.push(candidate);
        }
    }

    let mut keyed = solutions.into_iter()
        .map(|solution| {
            let key = solution.eval_default()
                .ok()
                .map(|value| (value.real().to_f64(), value.imag().to_f64()));
            (key, solution)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| compare_solutions(a, b));
    Ok(keyed.into_iter().map(|(_, solution)| solution).collect())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast).unwrap()
    }

    fn solved(input: &str) -> Vec<String> {
        solve(&parse(input), "x")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn linear() {
        assert_eq!(solved("2x+4"), vec!["-2"]);
        assert_eq!(solved("a*x + b"), vec!["-b/a"]);
    }

    #[test]
    fn quadratic_roots() {
        assert_eq!(solved("x^2+5x+6"), vec!["-3", "-2"]);
        assert_eq!(solved("x^2-2"), vec!["-sqrt(2)", "sqrt(2)"]);
        assert_eq!(solved("x^2+1"), vec!["-I", "I"]);
        assert_eq!(solved("x^2+5x+3"), vec!["-5/2 - sqrt(13)/2", "-5/2 + sqrt(13)/2"]);
    }

    #[test]
    fn higher_degree() {
        assert_eq!(solved("x^3-6x^2+11x-6"), vec!["1", "2", "3"]);
        assert_eq!(solved("x^3-x"), vec!["-1", "0", "1"]);
        assert_eq!(solved("x^4-5x^2+6"), vec!["-sqrt(3)", "-sqrt(2)", "sqrt(2)", "sqrt(3)"]);
    }

    #[test]
    fn numerical_roots() {
        let solutions = solve(&parse("x^5-x-1"), "x").unwrap();
        assert_eq!(solutions.len(), 5);

        let real = solutions.iter()
            .filter_map(|solution| solution.as_float())
            .map(|f| f.to_f64())
            .collect::<Vec<_>>();
        assert_eq!(real.len(), 1);
        assert_float_absolute_eq!(real[0], 1.1673039782614187, 1e-12);
    }

    #[test]
    fn rational_function() {
        assert_eq!(solved("(x^2-1)/(x-1)"), vec!["-1"]);
    }

    #[test]
    fn transcendental() {
        assert_eq!(solved("sin(x) - 1/2"), vec!["pi/6", "5*pi/6"]);
        assert_eq!(solved("exp(x) - 5"), vec!["log(5)"]);
        assert_eq!(solved("2^x - 8"), vec!["3"]);
    }

    #[test]
    fn extraneous_roots_are_dropped() {
        assert_eq!(solved("sqrt(x) + 2"), Vec::<String>::new());
        assert_eq!(solved("sqrt(x) - 2"), vec!["4"]);
    }

    #[test]
    fn no_variable() {
        assert_eq!(solved("5"), Vec::<String>::new());
    }
}
