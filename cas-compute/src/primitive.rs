//! Functions to construct [`Integer`]s, [`Rational`]s, [`Float`]s, and [`Complex`] numbers from
//! various types.

use rug::{Assign, Complex, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Parses an [`Integer`] from a string of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses a [`Float`] from a decimal literal. Literals with a leading or trailing decimal point,
/// such as `.5` or `3.`, are accepted.
pub fn float_from_str(s: &str) -> Option<Float> {
    let mut normalized = String::with_capacity(s.len() + 2);
    if s.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(s);
    if s.ends_with('.') {
        normalized.push('0');
    }

    Float::parse(&normalized).ok().map(float)
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_decimal_forms() {
        assert_eq!(float_from_str("2.5").map(|f| f.to_f64()), Some(2.5));
        assert_eq!(float_from_str(".5").map(|f| f.to_f64()), Some(0.5));
        assert_eq!(float_from_str("3.").map(|f| f.to_f64()), Some(3.0));
    }

    #[test]
    fn parse_big_integer() {
        let n = int_from_str("123456789012345678901234567890").unwrap();
        assert_eq!(n.to_string(), "123456789012345678901234567890");
    }
}
