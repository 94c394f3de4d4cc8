//! Expansion of products and integer powers of sums.

use super::{expr::{Expr, Primary}, simplify::simplify_rules};

/// Powers of sums with a larger exponent than this are left unexpanded.
const MAX_DEGREE: u32 = 64;

/// Multiplies two expressions, distributing every term of one over every term of the other.
fn distribute(lhs: &Expr, rhs: &Expr) -> Expr {
    let terms = lhs.terms()
        .iter()
        .flat_map(|a| rhs.terms().iter().map(move |b| a.clone() * b.clone()))
        .collect::<Vec<_>>();
    simplify_rules(&Expr::Add(terms).downgrade())
}

fn expand_node(expr: &Expr) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(func, arg)) => Expr::call(*func, expand_node(arg)),
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => simplify_rules(&Expr::Add(terms.iter().map(expand_node).collect())),
        Expr::Mul(factors) => factors.iter()
            .map(expand_node)
            .fold(Expr::one(), |acc, factor| distribute(&acc, &factor)),
        Expr::Exp(base, exp) => {
            let base = expand_node(base);
            let exp = expand_node(exp);
            let n = exp.as_integer().and_then(|n| n.to_i32());
            match n {
                Some(n) if matches!(base, Expr::Add(_)) && (2..=MAX_DEGREE).contains(&n.unsigned_abs()) => {
                    let mut acc = base.clone();
                    for _ in 1..n.unsigned_abs() {
                        acc = distribute(&acc, &base);
                    }
                    if n < 0 {
                        acc.recip()
                    } else {
                        acc
                    }
                },
                _ => Expr::pow(base, exp),
            }
        },
    }
}

/// Expands the expression: products are distributed over sums, and sums raised to a positive
/// integer power are multiplied out. A sum raised to a negative integer power has its reciprocal
/// expanded instead.
///
/// `(x+1)^3 = x^3 + 3x^2 + 3x + 1`
pub fn expand(expr: &Expr) -> Expr {
    let expr = simplify_rules(expr);
    simplify_rules(&expand_node(&expr))
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str) -> String {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        expand(&Expr::try_from(ast).unwrap()).to_string()
    }

    #[test]
    fn cube_of_sum() {
        assert_eq!(expanded("(x+1)^3"), "x**3 + 3*x**2 + 3*x + 1");
    }

    #[test]
    fn product_of_sums() {
        assert_eq!(expanded("(x-1)(x+1)"), "x**2 - 1");
        assert_eq!(expanded("2(x+y)^2"), "2*x**2 + 4*x*y + 2*y**2");
    }

    #[test]
    fn inside_functions() {
        assert_eq!(expanded("sin((x+1)^2)"), "sin(x**2 + 2*x + 1)");
    }

    #[test]
    fn negative_power() {
        assert_eq!(expanded("(x+1)^-2"), "1/(x**2 + 2*x + 1)");
    }
}
