//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::ast::expr::Expr) type from `cas_parser` is a recursive `enum`
//! that represents the AST of a mathematical expression. It's convenient for parsing, but not so
//! much for algebraic manipulation.
//!
//! This module defines a separate [`Expr`] that flattens the AST into lists of terms and factors,
//! normalizing the expression into a sum of products. Subtraction becomes addition of a term
//! multiplied by `-1`, and division becomes multiplication by a power of `-1`.
//!
//! All submodules in this crate that deal with symbolic manipulation use [`Expr`], and any
//! occurrences of the word `expression` refer to this type.
//!
//! # Strict equality
//!
//! Determining if two expressions are mathematically equal is extremely difficult, because there
//! are an infinite number of ways to represent the same expression. Consider `x^2 + 2x + 1` and
//! `(x + 1)^2`: both are equal, but this is not obvious without expanding or factoring first.
//!
//! Instead, we define a subset of semantic equality, called **strict equality**. Two expressions
//! are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both expressions must have strictly equal values.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
//! factors, in any order.
//! - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can **never** report false positives, and it does not depend on any
//! simplification to work. This means that it can be used while simplifying to decide if terms
//! or factors are similar enough to be combined.
//!
//! The [`PartialEq`] implementation for [`Expr`] implements **strict equality**.

mod convert;
pub mod error;
mod fmt;
mod iter;

use iter::ExprIter;
use rug::{Float, Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

/// A mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Const {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,

    /// The imaginary unit.
    I,
}

/// A function known to the symbolic engine. Every function takes exactly one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,

    /// The natural logarithm.
    Log,
    Abs,
    Sign,
}

impl Func {
    /// Every known function.
    pub const ALL: [Func; 12] = [
        Func::Sin, Func::Cos, Func::Tan,
        Func::Asin, Func::Acos, Func::Atan,
        Func::Sinh, Func::Cosh, Func::Tanh,
        Func::Log, Func::Abs, Func::Sign,
    ];

    /// Returns the name this function is printed with.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Log => "log",
            Func::Abs => "Abs",
            Func::Sign => "sign",
        }
    }

    /// Looks up a function by any of the names it can be written with.
    pub fn from_name(name: &str) -> Option<Func> {
        let func = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" | "arcsin" => Func::Asin,
            "acos" | "arccos" => Func::Acos,
            "atan" | "arctan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "log" | "ln" => Func::Log,
            "abs" | "Abs" => Func::Abs,
            "sign" => Func::Sign,
            _ => return None,
        };
        Some(func)
    }

    /// Returns true if `f(-u) = -f(u)`.
    pub fn is_odd(self) -> bool {
        matches!(
            self,
            Func::Sin | Func::Tan | Func::Asin | Func::Atan | Func::Sinh | Func::Tanh | Func::Sign
        )
    }

    /// Returns true if `f(-u) = f(u)`.
    pub fn is_even(self) -> bool {
        matches!(self, Func::Cos | Func::Cosh | Func::Abs)
    }
}

/// A single term / factor, such as a number, variable, constant or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An exact rational number, such as `2` or `3/4`.
    Number(Rational),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A mathematical constant.
    Const(Const),

    /// A function call, such as `sin(x)`.
    Call(Func, Box<Expr>),
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`cas_parser::parser::ast::Expr`] type, which is
/// produced by [`cas_parser`]. The main difference is that this type **flattens** out the tree
/// structure. For example, the expression `x + (y + z)` is represented as a single [`Expr::Add`]
/// node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates an exact number.
    pub fn number(n: impl Into<Rational>) -> Self {
        Self::Primary(Primary::Number(n.into()))
    }

    /// Creates an exact integer.
    pub fn int(n: i64) -> Self {
        Self::number(Integer::from(n))
    }

    /// Creates the number `0`.
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// Creates the number `1`.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// Creates a floating-point number.
    pub fn float(f: Float) -> Self {
        Self::Primary(Primary::Float(f))
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a constant.
    pub fn constant(c: Const) -> Self {
        Self::Primary(Primary::Const(c))
    }

    /// Creates a call to a known function.
    pub fn call(func: Func, arg: Expr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Raises `base` to the power of `exp`. No simplification is done.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns the reciprocal of this expression. Non-zero numbers are inverted directly, anything
    /// else is raised to the power of `-1`.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(n)) if n != 0 => Self::number(n.recip()),
            Self::Primary(Primary::Float(f)) if !f.is_zero() => Self::float(f.recip()),
            expr => Self::pow(expr, Self::int(-1)),
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::number(Rational::from((1, 2))))
    }

    /// Returns `e` raised to the power of this expression.
    pub fn exp(self) -> Self {
        Self::pow(Self::constant(Const::E), self)
    }

    /// Returns the natural logarithm of this expression.
    pub fn log(self) -> Self {
        Self::call(Func::Log, self)
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`] with no fractional part, returns a reference to
    /// the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|n| *n.denom() == 1)
            .map(Rational::numer)
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(f)) => Some(f),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`] or a [`Primary::Float`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is the number zero (exact or floating-point).
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(n)) => *n == 0,
            Self::Primary(Primary::Float(f)) => f.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the exact number one.
    pub fn is_one(&self) -> bool {
        self.as_number().map_or(false, |n| *n == 1)
    }

    /// Returns true if the expression is a negative number (exact or floating-point).
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(n)) => *n < 0,
            Self::Primary(Primary::Float(f)) => *f < 0,
            _ => false,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression is the given constant.
    pub fn is_const(&self, c: Const) -> bool {
        matches!(self, Self::Primary(Primary::Const(other)) if *other == c)
    }

    /// If the expression is a call, returns the function and its argument.
    pub fn as_call(&self) -> Option<(Func, &Expr)> {
        match self {
            Self::Primary(Primary::Call(func, arg)) => Some((*func, arg)),
            _ => None,
        }
    }

    /// Returns the terms of the expression: the terms of an [`Expr::Add`], or the expression
    /// itself.
    pub fn terms(&self) -> &[Expr] {
        match self {
            Self::Add(terms) => terms,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Returns the factors of the expression: the factors of an [`Expr::Mul`], or the expression
    /// itself.
    pub fn factors(&self) -> &[Expr] {
        match self {
            Self::Mul(factors) => factors,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Splits the expression into its numeric coefficient and the remaining factors.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a*b` -> `(3, a*b)`
    /// - `a` -> `(1, a)`
    pub fn coeff_and_rest(&self) -> (Expr, Expr) {
        match self {
            Self::Primary(Primary::Number(_) | Primary::Float(_)) => (self.clone(), Self::one()),
            Self::Mul(factors) => {
                let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
                    .cloned()
                    .partition(Expr::is_numeric);
                let coeff = numbers.into_iter().fold(Self::one(), |acc, n| acc * n);
                (coeff, Self::Mul(rest).downgrade())
            },
            expr => (Self::one(), expr.clone()),
        }
    }

    /// Splits the expression into its base and exponent. If the expression is not an
    /// [`Expr::Exp`], the exponent is `1`.
    pub fn base_and_exp(&self) -> (Expr, Expr) {
        match self {
            Self::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
            expr => (expr.clone(), Self::one()),
        }
    }

    /// Returns true if the given variable appears anywhere in the expression.
    pub fn contains_symbol(&self, var: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(var))
    }

    /// Returns true if the given variable does not appear in the expression.
    pub fn is_free_of(&self, var: &str) -> bool {
        !self.contains_symbol(var)
    }

    /// Returns the set of variables in the expression.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| expr.as_symbol().map(str::to_owned))
            .collect()
    }

    /// Returns true if the expression contains no variables. It may still contain constants and
    /// function calls.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter().all(|expr| expr.as_symbol().is_none())
    }

    /// Returns a copy of the expression with every subexpression strictly equal to `from`
    /// replaced by `to`. No simplification is done.
    pub fn substitute(&self, from: &Expr, to: &Expr) -> Expr {
        if self == from {
            return to.clone();
        }

        match self {
            Self::Primary(Primary::Call(func, arg)) => Self::call(*func, arg.substitute(from, to)),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|t| t.substitute(from, to)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|f| f.substitute(from, to)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(from, to), exp.substitute(from, to)),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::zero(),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::one(),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Returns true if both lists contain strictly equal expressions, in any order.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, other)| !used[idx] && item == other);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for adding two numbers of the
/// same kind, and flattening nested [`Expr::Add`]s into one list of terms.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::number(lhs + rhs)
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                Self::float(lhs + rhs)
            },
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Subtracts two [`Expr`]s, as `lhs + -1 * rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for multiplying two
/// numbers of the same kind, and flattening nested [`Expr::Mul`]s into one list of factors.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::number(lhs * rhs)
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                Self::float(lhs * rhs)
            },
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Divides two [`Expr`]s, as `lhs * rhs^-1`.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            Self::Primary(Primary::Float(f)) => Self::float(-f),
            expr => Self::int(-1) * expr,
        }
    }
}

/// NOTE: Strict equality allows different orderings of terms and factors, but `pretty_assertions`
/// doesn't know that; a failing comparison may show a confusing diff.
#[cfg(test)]
mod tests {
    use cas_parser::parser::{ast::expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`Expr`] representation.
    fn parse_expr(input: &str) -> Expr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(expr).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_repeats() {
        assert_ne!(parse_expr("x + x + y"), parse_expr("x + y + y"));
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, Expr::Add(vec![
            Expr::int(6),
            Expr::Mul(vec![Expr::symbol("x"), Expr::int(5)]),
            Expr::pow(Expr::symbol("x"), Expr::int(2)),
        ]));
    }

    #[test]
    fn division_of_literals_is_exact() {
        assert_eq!(parse_expr("1/2"), Expr::number(Rational::from((1, 2))));
        assert_eq!(parse_expr("x/4"), Expr::Mul(vec![
            Expr::symbol("x"),
            Expr::number(Rational::from((1, 4))),
        ]));
    }

    #[test]
    fn factors_only() {
        let expr = parse_expr("-2x^2y^-3/5");
        assert_eq!(expr, Expr::Mul(vec![
            Expr::int(-2),
            Expr::pow(Expr::symbol("x"), Expr::int(2)),
            Expr::pow(Expr::symbol("y"), Expr::int(-3)),
            Expr::number(Rational::from((1, 5))),
        ]));
    }

    #[test]
    fn constants_and_rewrites() {
        assert_eq!(parse_expr("pi"), Expr::constant(Const::Pi));
        assert_eq!(parse_expr("e"), Expr::constant(Const::E));
        assert_eq!(parse_expr("exp(x)"), Expr::symbol("x").exp());
        assert_eq!(parse_expr("sqrt(x)"), Expr::symbol("x").sqrt());
        assert_eq!(parse_expr("ln(x)"), Expr::symbol("x").log());
        assert_eq!(parse_expr("sec(x)"), Expr::call(Func::Cos, Expr::symbol("x")).recip());
    }

    #[test]
    fn symbols_and_substitution() {
        let expr = parse_expr("x*y + sin(z)");
        assert_eq!(
            expr.symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );
        assert!(expr.contains_symbol("z"));
        assert!(expr.is_free_of("t"));

        let substituted = expr.substitute(&Expr::symbol("z"), &Expr::int(0));
        assert_eq!(substituted, parse_expr("x*y + sin(0)"));
    }

    #[test]
    fn coefficient_split() {
        let (coeff, rest) = parse_expr("3*a*b").coeff_and_rest();
        assert_eq!(coeff, Expr::int(3));
        assert_eq!(rest, Expr::Mul(vec![Expr::symbol("a"), Expr::symbol("b")]));
    }
}
