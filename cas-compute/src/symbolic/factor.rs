//! Factoring of polynomials and rational expressions.

use rug::{Integer, Rational};
use std::collections::BTreeMap;
use super::{
    expand::expand,
    expr::{Expr, Primary},
    poly::Poly,
    rational::{as_numer_denom, cancel_parts},
    simplify::{simplify, simplify_rules},
};

/// Raises `base` to the power of `exp`, skipping the power if `exp` is 1.
fn power(base: Expr, exp: usize) -> Expr {
    if exp == 1 {
        base
    } else {
        Expr::pow(base, Expr::int(exp as i64))
    }
}

/// Factors a univariate polynomial into its content, a power of `var`, one linear factor per
/// rational root, and an irreducible remainder.
fn factor_univariate(poly: &Poly, var: &str) -> Expr {
    let (content, ints) = poly.primitive();
    let mut rest = Poly::from_integers(&ints);
    let mut factors = Vec::new();
    if content != 1 {
        factors.push(Expr::number(content));
    }

    let zeros = rest.zero_root_multiplicity();
    if zeros > 0 {
        factors.push(power(Expr::symbol(var), zeros));
        rest = rest.shift_down(zeros);
    }

    // larger roots first, then grouped by the leading coefficient of the linear factor
    let mut roots = rest.rational_roots();
    roots.reverse();
    roots.sort_by(|a, b| a.denom().cmp(b.denom()));

    for root in roots {
        // `q*x - p` for the root `p/q`
        let linear = Poly::new(vec![
            Rational::from(-root.numer().clone()),
            Rational::from(root.denom().clone()),
        ]);

        let mut multiplicity = 0;
        while rest.degree() > 0 && rest.eval(&root) == 0 {
            rest = rest.div_rem(&linear).0;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push(power(linear.to_expr(var), multiplicity));
        }
    }

    if rest.degree() > 0 {
        factors.push(rest.to_expr(var));
    } else if let Some(c) = rest.leading().filter(|c| **c != 1) {
        factors.push(Expr::number(c.clone()));
    }

    Expr::Mul(factors).downgrade()
}

/// Pulls the common numeric content and common symbol powers out of a sum.
///
/// `2xy + 4x = 2x(y + 2)`
fn factor_common(expr: &Expr) -> Option<Expr> {
    let terms = match expr {
        Expr::Add(terms) if terms.len() > 1 => terms,
        _ => return None,
    };

    // numeric content, only if every coefficient is exact
    let coeffs = terms.iter()
        .map(|term| match term.coeff_and_rest().0 {
            Expr::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        })
        .collect::<Option<Vec<_>>>();
    let content = coeffs.map_or(Rational::from(1), |coeffs| {
        let numer = coeffs.iter().fold(Integer::new(), |acc, c| acc.gcd(c.numer()));
        let denom = coeffs.iter().fold(Integer::from(1), |acc, c| acc.lcm(c.denom()));
        Rational::from((numer, denom))
    });

    // the smallest positive integer power of each symbol, across all terms
    let mut common: Option<BTreeMap<String, Integer>> = None;
    for term in terms {
        let mut powers = BTreeMap::new();
        for factor in term.factors() {
            let (base, exp) = factor.base_and_exp();
            if let (Some(sym), Some(n)) = (base.as_symbol(), exp.as_integer()) {
                if *n > 0 {
                    *powers.entry(sym.to_owned()).or_insert_with(Integer::new) += n;
                }
            }
        }

        common = Some(match common {
            None => powers,
            Some(common) => common.into_iter()
                .filter_map(|(sym, n)| {
                    let other = powers.get(&sym)?;
                    Some((sym, n.min(other.clone())))
                })
                .collect(),
        });
    }
    let common = common.unwrap_or_default();

    if content == 1 && common.is_empty() {
        return None;
    }

    let reduced = terms.iter()
        .map(|term| divide_monomial(term, &content, &common))
        .collect::<Vec<_>>();

    let mut factors = Vec::new();
    if content != 1 {
        factors.push(Expr::number(content));
    }
    for (sym, n) in common {
        let exp = n.to_usize().unwrap_or(1);
        factors.push(power(Expr::symbol(sym), exp));
    }
    factors.push(simplify_rules(&Expr::Add(reduced)));
    Some(Expr::Mul(factors))
}

/// Divides a single term by `content` times the given symbol powers.
fn divide_monomial(term: &Expr, content: &Rational, common: &BTreeMap<String, Integer>) -> Expr {
    let mut factors = Vec::new();
    let mut coeff = Rational::from(1) / content;
    for factor in term.factors() {
        if let Some(n) = factor.as_number() {
            coeff *= n;
            continue;
        }

        let (base, exp) = factor.base_and_exp();
        match (base.as_symbol().and_then(|sym| common.get(sym)), exp.as_integer()) {
            (Some(k), Some(n)) => {
                let left = Integer::from(n - k);
                if left == 1 {
                    factors.push(base);
                } else if left != 0 {
                    factors.push(Expr::pow(base, Expr::number(left)));
                }
            },
            _ => factors.push(factor.clone()),
        }
    }

    if coeff != 1 {
        factors.insert(0, Expr::number(coeff));
    }
    Expr::Mul(factors).downgrade()
}

/// Factors a polynomial numerator or denominator.
fn factor_part(expr: &Expr) -> Expr {
    let expanded = expand(expr);
    let symbols = expanded.symbols();
    if symbols.len() <= 1 {
        let var = symbols.into_iter().next().unwrap_or_else(|| "x".to_string());
        if let Some(poly) = Poly::from_expr(&expanded, &var) {
            if poly.degree() > 0 {
                return factor_univariate(&poly, &var);
            }
        }
    }

    factor_common(&expanded).unwrap_or_else(|| simplify(expr))
}

/// Factors the expression.
///
/// - A univariate polynomial with rational coefficients is split into its content and one linear
/// factor per rational root, leaving any irreducible remainder as is.
/// - Other sums have their common numeric content and symbol powers pulled out.
/// - A rational expression is cancelled first, then its numerator and denominator are factored
/// separately.
///
/// If there is nothing to factor, the simplified expression is returned.
///
/// `x^2 + 5x + 6 = (x + 2)(x + 3)`
pub fn factor(expr: &Expr) -> Expr {
    let simplified = simplify_rules(expr);
    let (numer, denom) = as_numer_denom(&simplified);
    if denom.is_one() {
        return factor_part(&numer);
    }

    let (numer, denom) = cancel_parts(&expand(&numer), &expand(&denom))
        .unwrap_or((numer, denom));
    let numer = factor_part(&numer);
    let denom = factor_part(&denom);

    // fold both numeric coefficients into one leading number
    let (numer_coeff, numer_rest) = numer.coeff_and_rest();
    let (denom_coeff, denom_rest) = denom.coeff_and_rest();
    let coeff = simplify_rules(&(numer_coeff / denom_coeff));

    let mut factors = Vec::new();
    if !coeff.is_one() {
        factors.push(coeff);
    }
    factors.extend(numer_rest.factors().iter().filter(|f| !f.is_one()).cloned());
    for factor in denom_rest.factors().iter().filter(|f| !f.is_one()) {
        let (base, exp) = factor.base_and_exp();
        factors.push(Expr::pow(base, -exp));
    }
    Expr::Mul(factors).downgrade()
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn factored(input: &str) -> String {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        factor(&Expr::try_from(ast).unwrap()).to_string()
    }

    #[test]
    fn quadratic() {
        assert_eq!(factored("x^2+5x+6"), "(x + 2)*(x + 3)");
        assert_eq!(factored("2x^2-2"), "2*(x - 1)*(x + 1)");
    }

    #[test]
    fn repeated_and_zero_roots() {
        assert_eq!(factored("x^3+2x^2+x"), "x*(x + 1)**2");
        assert_eq!(factored("6x^2-x-1"), "(2*x + 1)*(3*x - 1)");
    }

    #[test]
    fn irreducible_remainder() {
        assert_eq!(factored("x^3-x^2+x-1"), "(x - 1)*(x**2 + 1)");
    }

    #[test]
    fn common_monomial() {
        assert_eq!(factored("2x*y + 4x"), "2*x*(y + 2)");
    }

    #[test]
    fn rational_expression() {
        assert_eq!(factored("(x^2-1)/(x^2+2x+1)"), "(x - 1)/(x + 1)");
    }

    #[test]
    fn nothing_to_factor() {
        assert_eq!(factored("x + y"), "x + y");
        assert_eq!(factored("5"), "5");
    }
}
