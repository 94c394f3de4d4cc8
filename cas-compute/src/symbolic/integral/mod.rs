//! Symbolic integration.
//!
//! [`integrate`] finds an antiderivative by trying, in order:
//!
//! - linearity over sums and constant factors,
//! - a table of basic forms whose argument is linear in the variable,
//! - u-substitution, for integrands of the form `f(u) * u'`,
//! - integration by parts, for a polynomial times an exponential, sine, cosine or logarithm,
//! - all of the above again, after expanding the integrand.
//!
//! The constant of integration is not included.

mod table;

use crate::symbolic::{
    derivative::derivative,
    error::SymbolicError,
    expand::expand,
    expr::{Expr, Func, Primary},
    poly::Poly,
    simplify::{simplify, simplify_rules},
};

/// Maximum nesting of substitutions, integrations by parts, and expansions.
const MAX_DEPTH: usize = 12;

/// The name of the variable introduced by u-substitution. It cannot be written in an input, so it
/// never collides with a user's variable.
const SUBSTITUTE: &str = "u'";

/// Returns `a` if the expression is `a*x + b` for some `a` and `b` free of `x`.
pub(crate) fn linear_coeff(u: &Expr, var: &str) -> Option<Expr> {
    if u.is_free_of(var) {
        return None;
    }
    let a = simplify_rules(&derivative(u, var).ok()?);
    (a.is_free_of(var) && !a.is_zero()).then_some(a)
}

/// Returns the inner expressions of `f` worth substituting: function arguments, and the bases and
/// exponents of powers, excluding the bare variable.
fn substitution_candidates(f: &Expr, var: &str) -> Vec<Expr> {
    let mut found: Vec<Expr> = Vec::new();
    for sub in f.post_order_iter() {
        let inner = match sub {
            Expr::Primary(Primary::Call(_, arg)) => vec![&**arg],
            Expr::Exp(base, exp) => vec![&**base, &**exp],
            _ => continue,
        };
        for u in inner {
            if u.contains_symbol(var) && u.as_symbol().is_none() && !found.contains(u) {
                found.push(u.clone());
            }
        }
    }
    found
}

/// `∫ f(u) u' dx = ∫ f(u) du`
fn substitution(f: &Expr, var: &str, depth: usize) -> Option<Expr> {
    let t = Expr::symbol(SUBSTITUTE);
    for u in substitution_candidates(f, var) {
        let Ok(du) = derivative(&u, var) else {
            continue;
        };
        let du = simplify_rules(&du);
        if du.is_zero() {
            continue;
        }

        let ratio = simplify_rules(&(f.clone() / du));
        let replaced = simplify_rules(&ratio.substitute(&u, &t));
        if replaced.is_free_of(var) {
            if let Some(integral) = try_integrate(&replaced, SUBSTITUTE, depth + 1) {
                return Some(integral.substitute(&t, &u));
            }
        }
    }
    None
}

/// `∫ p h dx = p H - ∫ p' H dx`, where `p` is a polynomial and `H = ∫ h dx`. If `h` is a
/// logarithm, the roles are swapped.
fn by_parts(f: &Expr, var: &str, depth: usize) -> Option<Expr> {
    let (poly, other): (Vec<_>, Vec<_>) = f.factors()
        .iter()
        .cloned()
        .partition(|factor| Poly::from_expr(factor, var).is_some());
    let [other] = other.as_slice() else {
        return None;
    };
    if poly.is_empty() {
        return None;
    }
    let p = Expr::Mul(poly).downgrade();

    let transcendental = match other {
        Expr::Exp(base, exp) => base.is_free_of(var) && linear_coeff(exp, var).is_some(),
        _ => matches!(
            other.as_call(),
            Some((Func::Sin | Func::Cos, u)) if linear_coeff(u, var).is_some()
        ),
    };
    if transcendental {
        let h = table::lookup(other, var)?;
        let dp = simplify_rules(&derivative(&p, var).ok()?);
        let rest = try_integrate(&simplify_rules(&(dp * h.clone())), var, depth + 1)?;
        return Some(p * h - rest);
    }

    let logarithm = matches!(
        other.as_call(),
        Some((Func::Log, u)) if linear_coeff(u, var).is_some()
    );
    if logarithm {
        let v = try_integrate(&p, var, depth + 1)?;
        let dlog = simplify_rules(&derivative(other, var).ok()?);
        let rest = try_integrate(&simplify_rules(&(v.clone() * dlog)), var, depth + 1)?;
        return Some(v * other.clone() - rest);
    }

    None
}

/// Integrates an expression with no constant factors.
fn integrate_dependent(f: &Expr, var: &str, depth: usize) -> Option<Expr> {
    table::lookup(f, var)
        .or_else(|| substitution(f, var, depth))
        .or_else(|| by_parts(f, var, depth))
        .or_else(|| {
            let expanded = expand(f);
            if expanded != *f {
                try_integrate(&expanded, var, depth + 1)
            } else {
                None
            }
        })
}

fn try_integrate(f: &Expr, var: &str, depth: usize) -> Option<Expr> {
    if depth > MAX_DEPTH {
        return None;
    }
    if f.is_free_of(var) {
        return Some(f.clone() * Expr::symbol(var));
    }

    match f {
        Expr::Add(terms) => terms.iter()
            .map(|term| try_integrate(term, var, depth))
            .collect::<Option<Vec<_>>>()
            .map(Expr::Add),
        Expr::Mul(factors) => {
            let (dependent, constant): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.contains_symbol(var));
            let g = Expr::Mul(dependent).downgrade();
            if constant.is_empty() {
                integrate_dependent(&g, var, depth)
            } else {
                let integral = try_integrate(&g, var, depth)?;
                Some(Expr::Mul(constant).downgrade() * integral)
            }
        },
        _ => integrate_dependent(f, var, depth),
    }
}

/// Computes an antiderivative of the expression with respect to `var`, and simplifies it.
/// Returns [`Err`] if no closed form was found.
///
/// `∫ sin(x) dx = -cos(x)`
pub fn integrate(f: &Expr, var: &str) -> Result<Expr, SymbolicError> {
    let f = simplify_rules(f);
    try_integrate(&f, var, 0)
        .map(|integral| simplify(&integral))
        .ok_or_else(|| SymbolicError::NoClosedForm(f.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::numerical::Func as Callable;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast).unwrap()
    }

    fn integrated(input: &str) -> String {
        integrate(&parse(input), "x").unwrap().to_string()
    }

    /// Checks that the derivative of the integral matches the integrand, using a central finite
    /// difference.
    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const DX: f64 = 0.00001;
        const TOL: f64 = 0.0001;

        let integrand = parse(function);
        let antiderivative = Callable::new(integrate(&integrand, "x").unwrap(), "x");
        let integrand = Callable::new(integrand, "x");

        for point in points {
            let expected = integrand.call(point).unwrap();
            let actual = (antiderivative.call(point + DX).unwrap()
                - antiderivative.call(point - DX).unwrap()) / (2.0 * DX);
            assert!(
                (expected - actual).abs() < TOL,
                "For \"{function}\" at x={point}, the integrand was {expected} but the derivative of the integral was {actual}",
            );
        }
    }

    #[test]
    fn basic_forms() {
        assert_eq!(integrated("sin(x)"), "-cos(x)");
        assert_eq!(integrated("x^2"), "x**3/3");
        assert_eq!(integrated("1/x"), "log(x)");
        assert_eq!(integrated("exp(x)"), "exp(x)");
        assert_eq!(integrated("3x^2 + 2x"), "x**3 + x**2");
        assert_eq!(integrated("5"), "5*x");
    }

    #[test]
    fn linear_arguments() {
        test_for_function("cos(3x+1)", [-1., 0., 2.]);
        test_for_function("exp(2x) + 2^x", [-1., 0., 1.]);
        test_for_function("(2x+1)^4", [-1., 0., 1.]);
        test_for_function("1/(2x+1)", [1., 2., 3.]);
        test_for_function("tan(x) + tanh(x)", [-1., 0., 1.]);
        test_for_function("log(x) + atan(x)", [0.5, 1., 2.]);
    }

    #[test]
    fn special_forms() {
        test_for_function("1/(x^2+4)", [-1., 0., 1.]);
        test_for_function("1/sqrt(1-x^2)", [-0.5, 0., 0.5]);
        test_for_function("sin(x)^2 + cos(x)^2", [-1., 0., 1.]);
    }

    #[test]
    fn substitution_forms() {
        test_for_function("2x*cos(x^2)", [-1., 0., 1.]);
        test_for_function("x/(x^2+1)", [-1., 0., 1.]);
        test_for_function("cos(x)*exp(sin(x))", [-1., 0., 1.]);
    }

    #[test]
    fn by_parts_forms() {
        test_for_function("x*exp(x)", [-1., 0., 1.]);
        test_for_function("x^2*sin(x)", [-1., 0., 1.]);
        test_for_function("x*log(x)", [0.5, 1., 2.]);
    }

    #[test]
    fn expansion_retry() {
        test_for_function("x*(x+1)", [-1., 0., 1.]);
    }

    #[test]
    fn no_closed_form() {
        assert!(matches!(
            integrate(&parse("exp(x^2)"), "x"),
            Err(SymbolicError::NoClosedForm(_)),
        ));
    }
}
