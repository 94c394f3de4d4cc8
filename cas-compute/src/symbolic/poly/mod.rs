//! Univariate polynomials with rational coefficients.
//!
//! A [`Poly`] is built from an expanded expression in a single variable with
//! [`Poly::from_expr`], and turned back into an expression with [`Poly::to_expr`]. In between, it
//! supports the exact arithmetic needed to factor and solve polynomials: division with remainder,
//! greatest common divisors, and finding rational roots.

pub mod roots;

use rug::{Integer, Rational};
use std::ops::Neg;
use super::expr::{Expr, Primary};

/// Polynomials with a larger degree than this are not built.
pub const MAX_DEGREE: usize = 64;

/// The rational root search gives up on constant or leading coefficients larger than this, since
/// enumerating their divisors would take too long.
const MAX_ROOT_SEARCH: u64 = 1_000_000_000_000;

/// A univariate polynomial with rational coefficients.
///
/// The coefficients are stored in ascending order of degree, with no trailing zeros. The zero
/// polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    /// Creates a polynomial from its coefficients, in ascending order of degree.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().map_or(false, |c| *c == 0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Creates a polynomial from integer coefficients, in ascending order of degree.
    pub fn from_integers(coeffs: &[Integer]) -> Self {
        Self::new(coeffs.iter().map(|c| Rational::from(c.clone())).collect())
    }

    /// Returns the coefficients, in ascending order of degree.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns the coefficient of the highest power.
    pub fn leading(&self) -> Option<&Rational> {
        self.coeffs.last()
    }

    /// Builds a polynomial from an expanded expression. Every term must be a rational number
    /// times a non-negative integer power of `var`.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        let mut coeffs = Vec::new();
        for term in expr.terms() {
            let mut coeff = Rational::from(1);
            let mut degree = 0;
            for factor in term.factors() {
                match factor {
                    Expr::Primary(Primary::Number(n)) => coeff *= n,
                    Expr::Primary(Primary::Symbol(sym)) if sym == var => degree += 1,
                    Expr::Exp(base, exp) if base.as_symbol() == Some(var) => {
                        degree += exp.as_integer()?.to_usize()?;
                    },
                    _ => return None,
                }
            }

            if degree > MAX_DEGREE {
                return None;
            }
            if coeffs.len() <= degree {
                coeffs.resize(degree + 1, Rational::new());
            }
            coeffs[degree] += coeff;
        }
        Some(Self::new(coeffs))
    }

    /// Converts the polynomial into an expression in `var`, with terms in descending order of
    /// degree.
    pub fn to_expr(&self, var: &str) -> Expr {
        let terms = self.coeffs.iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != 0)
            .map(|(degree, c)| {
                let monomial = match degree {
                    0 => return Expr::number(c.clone()),
                    1 => Expr::symbol(var),
                    _ => Expr::pow(Expr::symbol(var), Expr::int(degree as i64)),
                };
                if *c == 1 {
                    monomial
                } else {
                    Expr::Mul(vec![Expr::number(c.clone()), monomial])
                }
            })
            .collect::<Vec<_>>();
        Expr::Add(terms).downgrade()
    }

    /// Evaluates the polynomial at `x`.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(Rational::new(), |acc, c| acc * x + c)
    }

    /// Divides this polynomial by `divisor`, returning the quotient and remainder. Dividing by the
    /// zero polynomial returns a zero quotient and this polynomial as the remainder.
    pub fn div_rem(&self, divisor: &Poly) -> (Poly, Poly) {
        let Some(lead) = divisor.leading() else {
            return (Poly::new(Vec::new()), self.clone());
        };

        let mut rem = self.coeffs.clone();
        if rem.len() < divisor.coeffs.len() {
            return (Poly::new(Vec::new()), self.clone());
        }

        let shift = rem.len() - divisor.coeffs.len();
        let mut quot = vec![Rational::new(); shift + 1];
        for i in (0..=shift).rev() {
            let factor = Rational::from(&rem[i + divisor.degree()] / lead);
            for (j, c) in divisor.coeffs.iter().enumerate() {
                rem[i + j] -= Rational::from(&factor * c);
            }
            quot[i] = factor;
        }
        (Poly::new(quot), Poly::new(rem))
    }

    /// Returns this polynomial divided by its leading coefficient.
    pub fn monic(&self) -> Poly {
        match self.leading() {
            Some(lead) => Poly::new(self.coeffs.iter().map(|c| Rational::from(c / lead)).collect()),
            None => self.clone(),
        }
    }

    /// Returns the monic greatest common divisor of two polynomials.
    pub fn gcd(&self, other: &Poly) -> Poly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let rem = a.div_rem(&b).1;
            a = b;
            b = rem;
        }
        a.monic()
    }

    /// Returns the derivative of the polynomial.
    pub fn derivative(&self) -> Poly {
        Poly::new(
            self.coeffs.iter()
                .enumerate()
                .skip(1)
                .map(|(degree, c)| c.clone() * Integer::from(degree))
                .collect(),
        )
    }

    /// Splits the polynomial into a rational content and an integer polynomial with coprime
    /// coefficients and a positive leading coefficient, such that `self = content * primitive`.
    pub fn primitive(&self) -> (Rational, Vec<Integer>) {
        let Some(lead) = self.leading() else {
            return (Rational::new(), Vec::new());
        };

        let lcm = self.coeffs.iter()
            .fold(Integer::from(1), |acc, c| acc.lcm(c.denom()));
        let scaled = self.coeffs.iter()
            .map(|c| Integer::from(c.numer() * (Integer::from(&lcm / c.denom()))))
            .collect::<Vec<_>>();
        let gcd = scaled.iter().fold(Integer::new(), |acc, c| acc.gcd(c));

        let mut content = Rational::from((gcd.clone(), lcm));
        let mut ints = scaled.into_iter()
            .map(|c| c / &gcd)
            .collect::<Vec<_>>();
        if *lead < 0 {
            content = -content;
            ints.iter_mut().for_each(|c| *c = -c.clone());
        }
        (content, ints)
    }

    /// Returns the number of times `x = 0` is a root.
    pub fn zero_root_multiplicity(&self) -> usize {
        self.coeffs.iter().take_while(|c| **c == 0).count()
    }

    /// Divides the polynomial by `x^k`. The lowest `k` coefficients are discarded.
    pub fn shift_down(&self, k: usize) -> Poly {
        Poly::new(self.coeffs.iter().skip(k).cloned().collect())
    }

    /// Divides the polynomial by `x - root`, discarding the remainder.
    pub fn deflate(&self, root: &Rational) -> Poly {
        let mut quot = vec![Rational::new(); self.degree()];
        let mut carry = Rational::new();
        for (i, c) in self.coeffs.iter().enumerate().rev().take(self.degree()) {
            carry = carry * root + c;
            quot[i - 1] = carry.clone();
        }
        Poly::new(quot)
    }

    /// Returns the distinct rational roots of the polynomial, found with the rational root
    /// theorem. The result is sorted in ascending order.
    pub fn rational_roots(&self) -> Vec<Rational> {
        let mut roots = Vec::new();
        let zeros = self.zero_root_multiplicity();
        if zeros > 0 {
            roots.push(Rational::new());
        }

        let (_, ints) = self.shift_down(zeros).primitive();
        let (Some(constant), Some(lead)) = (ints.first(), ints.last()) else {
            return roots;
        };
        let (Some(ps), Some(qs)) = (divisors(constant), divisors(lead)) else {
            return roots;
        };

        let reduced = Poly::from_integers(&ints);
        for p in &ps {
            for q in &qs {
                for sign in [1, -1] {
                    let candidate = Rational::from((Integer::from(p * sign), q.clone()));
                    if !roots.contains(&candidate) && reduced.eval(&candidate) == 0 {
                        roots.push(candidate);
                    }
                }
            }
        }

        roots.sort();
        roots
    }

    /// Returns how many times `root` is a root of the polynomial.
    pub fn multiplicity(&self, root: &Rational) -> usize {
        let mut poly = self.clone();
        let mut count = 0;
        while !poly.is_zero() && poly.degree() > 0 && poly.eval(root) == 0 {
            poly = poly.deflate(root);
            count += 1;
        }
        count
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(self) -> Self::Output {
        Poly::new(self.coeffs.into_iter().map(|c| -c).collect())
    }
}

/// Returns the positive divisors of `n`, or `None` if `n` is too large to enumerate them.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs().to_u64()?;
    if n == 0 || n > MAX_ROOT_SEARCH {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(Integer::from(d));
            if d * d != n {
                large.push(Integer::from(n / d));
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::new(coeffs.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn division_with_remainder() {
        // (x^3 - 1) / (x - 1) = x^2 + x + 1
        let (quot, rem) = poly(&[-1, 0, 0, 1]).div_rem(&poly(&[-1, 1]));
        assert_eq!(quot, poly(&[1, 1, 1]));
        assert!(rem.is_zero());
    }

    #[test]
    fn gcd_is_monic() {
        // gcd(2x^2 - 2, 4x + 4) = x + 1
        assert_eq!(poly(&[-2, 0, 2]).gcd(&poly(&[4, 4])), poly(&[1, 1]));
    }

    #[test]
    fn primitive_part() {
        let p = Poly::new(vec![Rational::from((-1, 2)), Rational::from(0), Rational::from((-3, 2))]);
        let (content, ints) = p.primitive();
        assert_eq!(content, Rational::from((-1, 2)));
        assert_eq!(ints, vec![Integer::from(1), Integer::from(0), Integer::from(3)]);
    }

    #[test]
    fn rational_roots_of_cubic() {
        // (2x - 1)(x + 3)x = 2x^3 + 5x^2 - 3x
        let roots = poly(&[0, -3, 5, 2]).rational_roots();
        assert_eq!(roots, vec![Rational::from(-3), Rational::from(0), Rational::from((1, 2))]);
    }

    #[test]
    fn deflate_and_multiplicity() {
        // (x - 1)^2 (x + 2) = x^3 - 3x + 2
        let p = poly(&[2, -3, 0, 1]);
        assert_eq!(p.multiplicity(&Rational::from(1)), 2);
        assert_eq!(p.deflate(&Rational::from(1)), poly(&[-2, 1, 1]));
    }

    #[test]
    fn round_trip_through_expr() {
        let p = poly(&[6, 5, 1]);
        assert_eq!(p.to_expr("x").to_string(), "x**2 + 5*x + 6");
        assert_eq!(Poly::from_expr(&p.to_expr("x"), "x"), Some(p));
    }
}
