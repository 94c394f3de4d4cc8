//! Rational functions: splitting an expression into a numerator and denominator, and cancelling
//! their common factors.

use super::{expand::expand, expr::Expr, poly::Poly, simplify::simplify_rules};

/// Multiplies the given factors together, skipping factors of `1`.
fn product(factors: Vec<Expr>) -> Expr {
    Expr::Mul(factors.into_iter().filter(|factor| !factor.is_one()).collect()).downgrade()
}

/// Splits the expression into a numerator and denominator, putting every sum over a common
/// denominator. Neither part is simplified.
///
/// - `x/2` -> `(x, 2)`
/// - `1/x + 1` -> `(1 + x, x)`
/// - `x^-2` -> `(1, x^2)`
pub fn as_numer_denom(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Primary(_) => match expr.as_number() {
            Some(n) if *n.denom() != 1 => {
                (Expr::number(n.numer().clone()), Expr::number(n.denom().clone()))
            },
            _ => (expr.clone(), Expr::one()),
        },
        Expr::Exp(base, exp) if exp.is_negative_number() => {
            let positive = -(**exp).clone();
            let denom = if positive.is_one() {
                (**base).clone()
            } else {
                Expr::pow((**base).clone(), positive)
            };
            (Expr::one(), denom)
        },
        Expr::Exp(..) => (expr.clone(), Expr::one()),
        Expr::Mul(factors) => {
            let (numers, denoms): (Vec<_>, Vec<_>) = factors.iter().map(as_numer_denom).unzip();
            (product(numers), product(denoms))
        },
        Expr::Add(terms) => {
            let mut parts = terms.iter().map(as_numer_denom);
            let Some(first) = parts.next() else {
                return (Expr::zero(), Expr::one());
            };

            parts.fold(first, |(n1, d1), (n2, d2)| {
                if d1 == d2 {
                    (n1 + n2, d1)
                } else if d2.is_one() {
                    (n1 + product(vec![n2, d1.clone()]), d1)
                } else if d1.is_one() {
                    (product(vec![n1, d2.clone()]) + n2, d2)
                } else {
                    (
                        product(vec![n1, d2.clone()]) + product(vec![n2, d1.clone()]),
                        product(vec![d1, d2]),
                    )
                }
            })
        },
    }
}

/// Divides a univariate numerator and denominator by their greatest common divisor. Returns
/// `None` if the parts are not polynomials in the same single variable.
pub(crate) fn cancel_parts(numer: &Expr, denom: &Expr) -> Option<(Expr, Expr)> {
    let mut symbols = numer.symbols();
    symbols.extend(denom.symbols());
    let var = match symbols.len() {
        0 => "x".to_string(),
        1 => symbols.into_iter().next()?,
        _ => return None,
    };

    let numer_poly = Poly::from_expr(numer, &var)?;
    let denom_poly = Poly::from_expr(denom, &var)?;
    if denom_poly.is_zero() {
        return None;
    }

    let gcd = numer_poly.gcd(&denom_poly);
    let numer_poly = numer_poly.div_rem(&gcd).0;
    let denom_poly = denom_poly.div_rem(&gcd).0;

    // keep the leading coefficient of the denominator positive
    let lead_sign = denom_poly.leading().map_or(1, |c| c.cmp0() as i32);
    let (numer_poly, denom_poly) = if lead_sign < 0 {
        (-numer_poly, -denom_poly)
    } else {
        (numer_poly, denom_poly)
    };

    Some((numer_poly.to_expr(&var), denom_poly.to_expr(&var)))
}

/// Cancels the common factors of the numerator and denominator of a univariate rational
/// expression. Other expressions are returned unchanged.
///
/// `(x^2-1)/(x-1) = x+1`
pub fn cancel(expr: &Expr) -> Expr {
    let (numer, denom) = as_numer_denom(expr);
    if denom.is_one() {
        return expr.clone();
    }

    match cancel_parts(&expand(&numer), &expand(&denom)) {
        Some((numer, denom)) => simplify_rules(&(numer / denom)),
        None => expr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        simplify_rules(&Expr::try_from(ast).unwrap())
    }

    #[test]
    fn common_denominator() {
        let (numer, denom) = as_numer_denom(&parse("1/x + 1/y"));
        assert_eq!(simplify_rules(&numer).to_string(), "x + y");
        assert_eq!(simplify_rules(&denom).to_string(), "x*y");
    }

    #[test]
    fn cancel_quadratic() {
        assert_eq!(cancel(&parse("(x^2+5x+6)/(x+2)")).to_string(), "x + 3");
        assert_eq!(cancel(&parse("(2x+2)/(x^2-1)")).to_string(), "2/(x - 1)");
    }

    #[test]
    fn multivariate_is_unchanged() {
        let expr = parse("x/y");
        assert_eq!(cancel(&expr), expr);
    }
}
