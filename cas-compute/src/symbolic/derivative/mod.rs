//! Symbolic differentiation.

mod function;

use crate::symbolic::{
    error::SymbolicError,
    expr::{Expr, Primary},
    simplify::{simplify, simplify_rules},
};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to clean up the
/// result while building it and is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(_) => e.is_zero(),
        Expr::Add(terms) => terms.iter().all(is_trivially_zero),
        Expr::Mul(factors) => factors.iter().any(is_trivially_zero),
        Expr::Exp(base, exp) => is_trivially_zero(base) && exp.as_number().map_or(false, |n| *n > 0),
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if self.0.first().is_some_and(Expr::is_zero) {
            return;
        }
        if is_trivially_zero(&e) {
            self.0 = vec![Expr::zero()];
            return;
        }

        if !e.is_one() {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], var: &str) -> Result<Expr, SymbolicError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], var: &str) -> Result<Expr, SymbolicError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // factors free of `var` contribute nothing
        if product[derivative_index].is_free_of(var) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, var)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// The general power rule.
///
/// - `(f^n)' = n f^(n-1) f'` when `n` is free of `var`
/// - `(a^g)' = a^g log(a) g'` when `a` is free of `var`
/// - `(f^g)' = f^g (g' log(f) + g f' / f)` otherwise
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Result<Expr, SymbolicError> {
    let mut mult_group = MultBuilder::default();
    match (base.is_free_of(var), exp.is_free_of(var)) {
        (true, true) => return Ok(Expr::zero()),
        (false, true) => {
            mult_group.mult(exp.clone());
            mult_group.mult(Expr::pow(base.clone(), exp.clone() - Expr::one()));
            mult_group.mult(derivative(base, var)?);
        },
        (true, false) => {
            mult_group.mult(Expr::pow(base.clone(), exp.clone()));
            mult_group.mult(simplify_rules(&base.clone().log()));
            mult_group.mult(derivative(exp, var)?);
        },
        (false, false) => {
            let mut inner = SumBuilder::default();
            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exp, var)?);
            log_term.mult(base.clone().log());
            inner.add(log_term.into());

            let mut ratio_term = MultBuilder::default();
            ratio_term.mult(exp.clone());
            ratio_term.mult(derivative(base, var)?);
            ratio_term.mult(base.clone().recip());
            inner.add(ratio_term.into());

            mult_group.mult(Expr::pow(base.clone(), exp.clone()));
            mult_group.mult(inner.into());
        },
    }
    Ok(mult_group.into())
}

/// Computes the derivative of the given expression with respect to `var`, without simplifying the
/// result. Returns [`Err`] if the derivative could not be computed symbolically.
pub fn derivative(f: &Expr, var: &str) -> Result<Expr, SymbolicError> {
    if is_trivially_zero(f) || f.is_free_of(var) {
        return Ok(Expr::zero());
    }

    let expr = match f {
        Expr::Primary(Primary::Symbol(_)) => Expr::one(),
        Expr::Primary(Primary::Call(func, arg)) => function::function_derivative(*func, arg, var)?,
        Expr::Primary(_) => Expr::zero(),
        Expr::Add(terms) => sum_rule(terms, var)?,
        Expr::Mul(factors) => product_rule(factors, var)?,
        Expr::Exp(base, exp) => power_rule(base, exp, var)?,
    };

    if is_trivially_zero(&expr) {
        Ok(Expr::zero())
    } else {
        Ok(expr)
    }
}

/// Differentiates the expression with respect to `var`, and simplifies the result.
///
/// `d/dx (x^2 + 3x) = 2x + 3`
pub fn differentiate(f: &Expr, var: &str) -> Result<Expr, SymbolicError> {
    let f = simplify_rules(f);
    Ok(simplify(&derivative(&f, var)?))
}

#[cfg(test)]
pub mod tests {
    use crate::numerical::Func;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast).unwrap()
    }

    /// Performs finite difference to approximate the derivative of the provided function.
    fn finite_difference(f: &Func, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (f.call(x + DX).unwrap() - f.call(x - DX).unwrap()) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let expr = parse(function);
        let symbolic = Func::new(differentiate(&expr, "x").unwrap(), "x");
        let numeric = Func::new(expr, "x");

        for point in points {
            let symbolically_computed = symbolic.call(point).unwrap();
            let numerically_computed = finite_difference(&numeric, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "For \"{function}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
            );
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("sqrt(x) + 1/x", [0.5, 1., 2., 5.]);
    }

    #[test]
    fn exponentials() {
        test_for_function("2^x", [-1., 0., 1., 3.]);
        test_for_function("x^x", [0.5, 1., 2.]);
        test_for_function("exp(sin(x))", [-1., 0., 1., 3.]);
    }

    #[test]
    fn chain_rule() {
        test_for_function("sin(x^2)", [-1., 0., 1., 2.]);
        test_for_function("log(x^2 + 1)", [-2., 0., 2.]);
        test_for_function("atan(2x) + acos(x/2)", [-1., 0., 1.]);
        test_for_function("tanh(x) * cosh(x)", [-1., 0., 1.]);
    }

    #[test]
    fn simplified_output() {
        let d = |input: &str| differentiate(&parse(input), "x").unwrap().to_string();
        assert_eq!(d("x^2+3x"), "2*x + 3");
        assert_eq!(d("sin(x)"), "cos(x)");
        assert_eq!(d("tan(x)"), "tan(x)**2 + 1");
        assert_eq!(d("exp(2x)"), "2*exp(2*x)");
        assert_eq!(d("x*log(x)"), "log(x) + 1");
        assert_eq!(d("y^2"), "0");
    }
}
