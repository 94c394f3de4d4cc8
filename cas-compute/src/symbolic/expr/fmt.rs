//! Prints expressions in the same string form as common computer algebra systems, such as
//! `x**2 + 5*x + 6` or `-5/2 - sqrt(13)/2`.

use rug::{Float, Rational};
use std::{cmp::Ordering, collections::BTreeSet, fmt::{self, Display, Formatter}};
use super::{Const, Expr, Func, Primary};

/// Binding strength of the printed form of an expression. An expression is wrapped in
/// parentheses when it appears as an operand of an operator that binds at least as tightly.
const ADD: u8 = 40;
const MUL: u8 = 50;
const POW: u8 = 60;
const ATOM: u8 = 100;

/// Formats a float through its shortest `f64` form, always with a decimal point.
fn format_float(f: &Float) -> String {
    let value = f.to_f64();
    if value.is_nan() {
        return "nan".to_string();
    } else if value.is_infinite() {
        return if value > 0.0 { "oo" } else { "-oo" }.to_string();
    }

    let s = value.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Returns true if the exponent is the exact rational `n / d`.
fn exp_is(exp: &Expr, n: i32, d: u32) -> bool {
    exp.as_number().map_or(false, |r| *r == Rational::from((n, d)))
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Primary(Primary::Number(n)) => {
            if *n < 0 {
                ADD
            } else if *n.denom() != 1 {
                MUL
            } else {
                ATOM
            }
        },
        Expr::Primary(Primary::Float(f)) if *f < 0 => ADD,
        Expr::Primary(_) => ATOM,
        Expr::Add(_) => ADD,
        Expr::Mul(factors) => {
            let negative = factors.iter().any(Expr::is_negative_number);
            if negative { ADD } else { MUL }
        },
        Expr::Exp(base, exp) => {
            if base.is_const(Const::E) || exp_is(exp, 1, 2) {
                ATOM
            } else if exp_is(exp, -1, 1) || exp_is(exp, -1, 2) {
                MUL
            } else {
                POW
            }
        },
    }
}

/// Prints the expression, wrapped in parentheses if it binds no tighter than `level`.
fn parenthesize(expr: &Expr, level: u8) -> String {
    if precedence(expr) <= level {
        format!("({})", expr)
    } else {
        expr.to_string()
    }
}

/// Ordering class of a factor in a printed product: numeric radicals, then `I` and `pi`, then
/// symbols, then calls and exponentials, then everything else.
fn factor_rank(factor: &Expr) -> (u8, &str) {
    let base = match factor {
        Expr::Exp(base, _) => &**base,
        factor => factor,
    };
    match base {
        Expr::Primary(Primary::Number(_) | Primary::Float(_)) => (1, ""),
        Expr::Primary(Primary::Const(Const::I)) => (2, "I"),
        Expr::Primary(Primary::Const(Const::Pi)) => (2, "pi"),
        Expr::Primary(Primary::Symbol(sym)) => (3, sym),
        Expr::Primary(Primary::Const(Const::E) | Primary::Call(..)) => (4, ""),
        _ => (5, ""),
    }
}

fn fmt_mul(factors: &[Expr], f: &mut Formatter) -> fmt::Result {
    let mut coeff = Rational::from(1);
    let mut float_coeff: Option<Float> = None;
    let mut rest = Vec::new();
    for factor in factors {
        match factor {
            Expr::Primary(Primary::Number(n)) => coeff *= n,
            Expr::Primary(Primary::Float(x)) => {
                float_coeff = Some(match float_coeff {
                    Some(acc) => acc * x,
                    None => x.clone(),
                });
            },
            factor => rest.push(factor),
        }
    }
    rest.sort_by(|a, b| factor_rank(a).cmp(&factor_rank(b)));

    let negative = (coeff < 0) != float_coeff.as_ref().map_or(false, |x| *x < 0);
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    if let Some(x) = float_coeff {
        numer.push(format_float(&x.abs()));
    }
    let coeff = coeff.abs();
    if *coeff.numer() != 1 {
        numer.push(coeff.numer().to_string());
    }
    if *coeff.denom() != 1 {
        denom.push(coeff.denom().to_string());
    }

    for factor in rest {
        match factor {
            Expr::Exp(base, exp) if exp.is_negative_number() && !base.is_const(Const::E) => {
                if exp_is(exp, -1, 1) {
                    denom.push(parenthesize(base, MUL));
                } else {
                    let flipped = Expr::pow((**base).clone(), -(**exp).clone());
                    denom.push(parenthesize(&flipped, MUL));
                }
            },
            factor => numer.push(parenthesize(factor, MUL)),
        }
    }

    if negative {
        write!(f, "-")?;
    }
    if numer.is_empty() {
        write!(f, "1")?;
    } else {
        write!(f, "{}", numer.join("*"))?;
    }
    match denom.len() {
        0 => Ok(()),
        1 => write!(f, "/{}", denom[0]),
        _ => write!(f, "/({})", denom.join("*")),
    }
}

/// Returns the exponent of each symbol in a term, in the order of `symbols`. Only bare symbols and
/// symbols raised to a number count.
fn monomial(term: &Expr, symbols: &BTreeSet<String>) -> Vec<Rational> {
    let mut exps = vec![Rational::new(); symbols.len()];
    for factor in term.factors() {
        let (sym, exp) = match factor {
            Expr::Primary(Primary::Symbol(sym)) => (sym, Rational::from(1)),
            Expr::Exp(base, exp) => match (&**base, exp.as_number()) {
                (Expr::Primary(Primary::Symbol(sym)), Some(n)) => (sym, n.clone()),
                _ => continue,
            },
            _ => continue,
        };
        if let Some(idx) = symbols.iter().position(|s| s == sym) {
            exps[idx] += exp;
        }
    }
    exps
}

/// Orders the terms of a sum: polynomial terms by descending degree, symbol-free terms last.
fn order_terms(terms: &[Expr]) -> Vec<&Expr> {
    // `1 - x` keeps the positive number first
    if let [a, b] = terms {
        for (number, other) in [(a, b), (b, a)] {
            let positive_number = matches!(number, Expr::Primary(Primary::Number(n)) if *n > 0)
                || number.is_const(Const::Pi)
                || number.is_const(Const::E);
            let negated = matches!(other, Expr::Mul(factors)
                if factors.len() == 2 && factors.iter().any(Expr::is_negative_number));
            if positive_number && negated {
                return vec![number, other];
            }
        }
    }

    let symbols = terms.iter()
        .flat_map(Expr::symbols)
        .collect::<BTreeSet<_>>();
    let all_constant = terms.iter().all(Expr::is_constant);
    let rank = |term: &Expr| -> u8 {
        match (term.is_constant(), term.is_numeric()) {
            (false, _) => 0,
            (true, true) if all_constant => 1,
            (true, true) => 3,
            (true, false) => 2,
        }
    };

    let mut ordered = terms.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        rank(a).cmp(&rank(b)).then_with(|| {
            if rank(a) == 0 {
                // descending degree
                monomial(b, &symbols).cmp(&monomial(a, &symbols))
            } else {
                Ordering::Equal
            }
        })
    });
    ordered
}

fn fmt_add(terms: &[Expr], f: &mut Formatter) -> fmt::Result {
    for (idx, term) in order_terms(terms).into_iter().enumerate() {
        let s = term.to_string();
        if idx == 0 {
            write!(f, "{}", s)?;
        } else if let Some(stripped) = s.strip_prefix('-') {
            write!(f, " - {}", stripped)?;
        } else {
            write!(f, " + {}", s)?;
        }
    }
    Ok(())
}

fn fmt_exp(base: &Expr, exp: &Expr, f: &mut Formatter) -> fmt::Result {
    if base.is_const(Const::E) {
        return write!(f, "exp({})", exp);
    }
    if exp_is(exp, 1, 2) {
        return write!(f, "sqrt({})", base);
    }
    if exp_is(exp, -1, 2) {
        return write!(f, "1/sqrt({})", base);
    }
    if exp_is(exp, -1, 1) {
        return write!(f, "1/{}", parenthesize(base, MUL));
    }
    write!(f, "{}**{}", parenthesize(base, POW), parenthesize(exp, POW))
}

impl Display for Const {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Const::Pi => write!(f, "pi"),
            Const::E => write!(f, "E"),
            Const::I => write!(f, "I"),
        }
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Primary::Number(n) => write!(f, "{}", n),
            Primary::Float(x) => write!(f, "{}", format_float(x)),
            Primary::Symbol(sym) => write!(f, "{}", sym),
            Primary::Const(c) => write!(f, "{}", c),
            Primary::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Primary(primary) => write!(f, "{}", primary),
            Expr::Add(terms) => fmt_add(terms, f),
            Expr::Mul(factors) => fmt_mul(factors, f),
            Expr::Exp(base, exp) => fmt_exp(base, exp, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn half(n: i32) -> Expr {
        Expr::number(Rational::from((n, 2)))
    }

    #[test]
    fn polynomial_by_descending_degree() {
        let expr = Expr::Add(vec![
            Expr::int(6),
            Expr::Mul(vec![Expr::int(5), x()]),
            Expr::pow(x(), Expr::int(2)),
        ]);
        assert_eq!(expr.to_string(), "x**2 + 5*x + 6");
    }

    #[test]
    fn fractions() {
        let expr = Expr::Mul(vec![half(1), Expr::int(2).recip(), Expr::pow(x(), Expr::int(3))]);
        assert_eq!(expr.to_string(), "x**3/4");
        let expr = Expr::Mul(vec![half(3), Expr::pow(x(), Expr::int(2))]);
        assert_eq!(expr.to_string(), "3*x**2/2");
        let expr = Expr::Mul(vec![half(1), Expr::constant(Const::Pi)]);
        assert_eq!(expr.to_string(), "pi/2");
        assert_eq!(x().recip().to_string(), "1/x");
        assert_eq!(Expr::pow(x(), Expr::int(-2)).to_string(), "x**(-2)");
    }

    #[test]
    fn negated_terms() {
        let expr = Expr::Add(vec![
            half(-5),
            Expr::Mul(vec![half(-1), Expr::int(13).sqrt()]),
        ]);
        assert_eq!(expr.to_string(), "-5/2 - sqrt(13)/2");
        assert_eq!((-Expr::call(Func::Cos, x())).to_string(), "-cos(x)");
    }

    #[test]
    fn one_minus_x() {
        let expr = Expr::Add(vec![Expr::one(), -Expr::pow(x(), Expr::int(2))]);
        assert_eq!(expr.to_string(), "1 - x**2");
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(x().sqrt().to_string(), "sqrt(x)");
        assert_eq!(x().exp().to_string(), "exp(x)");
        assert_eq!(Expr::call(Func::Abs, x()).to_string(), "Abs(x)");
        let expr = Expr::Mul(vec![Expr::int(2), Expr::constant(Const::I)]);
        assert_eq!(expr.to_string(), "2*I");
    }

    #[test]
    fn products_of_sums() {
        let expr = Expr::Mul(vec![
            Expr::Add(vec![x(), Expr::int(2)]),
            Expr::Add(vec![x(), Expr::int(3)]),
        ]);
        assert_eq!(expr.to_string(), "(x + 2)*(x + 3)");
        let expr = Expr::pow(Expr::Add(vec![x(), Expr::one()]), Expr::int(3));
        assert_eq!(expr.to_string(), "(x + 1)**3");
    }

    #[test]
    fn factors_are_ordered() {
        let expr = Expr::Mul(vec![
            Expr::Add(vec![Expr::symbol("y"), Expr::int(2)]),
            Expr::symbol("x"),
            Expr::int(2),
        ]);
        assert_eq!(expr.to_string(), "2*x*(y + 2)");
    }

    #[test]
    fn floats() {
        let expr = Expr::float(Float::with_val(crate::primitive::PRECISION, 2));
        assert_eq!(expr.to_string(), "2.0");
        let expr = Expr::float(Float::with_val(crate::primitive::PRECISION, -0.5));
        assert_eq!(expr.to_string(), "-0.5");
    }
}
