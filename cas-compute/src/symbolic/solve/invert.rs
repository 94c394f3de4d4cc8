//! Isolation of a single occurrence of the variable by inverting the outer operation of the
//! side that contains it, one step at a time.

use crate::symbolic::{
    error::SymbolicError,
    expr::{Const, Expr, Func, Primary},
    simplify::simplify_rules,
};

fn cannot_isolate(expr: &Expr, var: &str) -> SymbolicError {
    SymbolicError::CannotIsolate {
        var: var.to_string(),
        expr: expr.to_string(),
    }
}

/// Splits the items into the ones that contain `var` and the ones that don't.
fn split_dependent<'a>(items: &'a [Expr], var: &str) -> (Vec<&'a Expr>, Vec<Expr>) {
    let (dependent, independent): (Vec<_>, Vec<_>) = items.iter()
        .partition(|item| item.contains_symbol(var));
    (dependent, independent.into_iter().cloned().collect())
}

/// Solves `lhs = rhs` for `var`, where `lhs` contains `var` and `rhs` does not. The candidates
/// returned may include extraneous solutions.
pub(crate) fn isolate(lhs: &Expr, rhs: Expr, var: &str) -> Result<Vec<Expr>, SymbolicError> {
    let rhs = simplify_rules(&rhs);
    match lhs {
        Expr::Primary(Primary::Symbol(sym)) if sym == var => Ok(vec![rhs]),
        Expr::Primary(Primary::Call(func, arg)) => {
            inverse_candidates(*func, &rhs)
                .ok_or_else(|| cannot_isolate(lhs, var))?
                .into_iter()
                .map(|rhs| isolate(arg, rhs, var))
                .collect::<Result<Vec<_>, _>>()
                .map(|groups| groups.concat())
        },
        Expr::Primary(_) => Err(cannot_isolate(lhs, var)),
        Expr::Add(terms) => {
            let (dependent, independent) = split_dependent(terms, var);
            match dependent.as_slice() {
                [term] => isolate(term, rhs - Expr::Add(independent).downgrade(), var),
                _ => Err(cannot_isolate(lhs, var)),
            }
        },
        Expr::Mul(factors) => {
            let (dependent, independent) = split_dependent(factors, var);
            match dependent.as_slice() {
                [factor] => isolate(factor, rhs / Expr::Mul(independent).downgrade(), var),

                // zero product property
                many if rhs.is_zero() => many.iter()
                    .map(|factor| isolate(factor, Expr::zero(), var))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|groups| groups.concat()),
                _ => Err(cannot_isolate(lhs, var)),
            }
        },
        Expr::Exp(base, exp) => {
            match (base.contains_symbol(var), exp.contains_symbol(var)) {
                // `g^n = t`
                (true, false) => {
                    if rhs.is_zero() && exp.as_number().map_or(false, |n| *n > 0) {
                        return isolate(base, rhs, var);
                    }

                    let root = Expr::pow(rhs, (**exp).clone().recip());
                    let even = exp.as_integer().map_or(false, |n| n.is_even());
                    if even {
                        let negative = -root.clone();
                        Ok([isolate(base, root, var)?, isolate(base, negative, var)?].concat())
                    } else {
                        isolate(base, root, var)
                    }
                },

                // `a^g = t`
                (false, true) => {
                    let log = if base.is_const(Const::E) {
                        rhs.log()
                    } else {
                        rhs.log() / (**base).clone().log()
                    };
                    isolate(exp, log, var)
                },
                _ => Err(cannot_isolate(lhs, var)),
            }
        },
    }
}

/// Returns the values `u` can take such that `f(u) = t`.
fn inverse_candidates(func: Func, t: &Expr) -> Option<Vec<Expr>> {
    let pi = || Expr::constant(Const::Pi);
    let t = t.clone();
    Some(match func {
        Func::Sin => {
            let asin = Expr::call(Func::Asin, t);
            vec![asin.clone(), pi() - asin]
        },
        Func::Cos => {
            let acos = Expr::call(Func::Acos, t);
            vec![acos.clone(), Expr::int(2) * pi() - acos]
        },
        Func::Tan => vec![Expr::call(Func::Atan, t)],
        Func::Asin => vec![Expr::call(Func::Sin, t)],
        Func::Acos => vec![Expr::call(Func::Cos, t)],
        Func::Atan => vec![Expr::call(Func::Tan, t)],

        // `asinh(t) = log(t + sqrt(t^2 + 1))`
        Func::Sinh => {
            let root = (Expr::pow(t.clone(), Expr::int(2)) + Expr::one()).sqrt();
            vec![(t + root).log()]
        },

        // `acosh(t) = log(t + sqrt(t^2 - 1))`, and `cosh` is even
        Func::Cosh => {
            let root = (Expr::pow(t.clone(), Expr::int(2)) - Expr::one()).sqrt();
            let acosh = (t + root).log();
            vec![acosh.clone(), -acosh]
        },

        // `atanh(t) = log((1 + t) / (1 - t)) / 2`
        Func::Tanh => {
            let ratio = (Expr::one() + t.clone()) / (Expr::one() - t);
            vec![ratio.log() / Expr::int(2)]
        },
        Func::Log => vec![t.exp()],
        Func::Abs => vec![t.clone(), -t],
        Func::Sign => return None,
    })
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::simplify;
    use super::*;

    fn candidates(input: &str) -> Vec<String> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let expr = simplify_rules(&Expr::try_from(ast).unwrap());
        isolate(&expr, Expr::zero(), "x")
            .unwrap()
            .iter()
            .map(|candidate| simplify(candidate).to_string())
            .collect()
    }

    #[test]
    fn inverse_of_log() {
        assert_eq!(candidates("log(x) - 2"), vec!["exp(2)"]);
    }

    #[test]
    fn inverse_of_abs() {
        assert_eq!(candidates("abs(x - 1) - 3"), vec!["4", "-2"]);
    }

    #[test]
    fn zero_product() {
        assert_eq!(candidates("x*sin(x)"), vec!["0", "0", "pi"]);
    }

    #[test]
    fn mixed_terms_cannot_be_isolated() {
        let ast = Parser::new("x + sin(x)").try_parse_full::<AstExpr>().unwrap();
        let expr = Expr::try_from(ast).unwrap();
        assert!(matches!(
            isolate(&expr, Expr::zero(), "x"),
            Err(SymbolicError::CannotIsolate { .. }),
        ));
    }
}
