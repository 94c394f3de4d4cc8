//! Numerical approximation of polynomial roots.

use rug::Complex;
use crate::primitive::{complex, float};
use super::Poly;

/// Maximum number of Durand-Kerner iterations.
const MAX_ITERATIONS: usize = 1000;

/// Iteration stops once no root moves by more than this amount.
const TOLERANCE: f64 = 1e-60;

/// Imaginary parts this small relative to the root's magnitude are treated as zero.
const REAL_TOLERANCE: f64 = 1e-40;

/// Evaluates the polynomial with the given complex coefficients at `z`.
fn eval(coeffs: &[Complex], z: &Complex) -> Complex {
    coeffs.iter()
        .rev()
        .fold(complex(0), |acc, c| acc * z + c)
}

/// Approximates every complex root of the polynomial, with multiplicity, using the
/// Durand-Kerner (Weierstrass) method.
///
/// Roots whose imaginary part vanishes are returned with an imaginary part of exactly zero.
pub fn durand_kerner(poly: &Poly) -> Vec<Complex> {
    let degree = poly.degree();
    if poly.is_zero() || degree == 0 {
        return Vec::new();
    }

    let coeffs = poly.monic()
        .coeffs()
        .iter()
        .map(|c| complex((float(c), 0)))
        .collect::<Vec<_>>();

    // the usual starting points: powers of a complex number that is neither real nor a root of
    // unity
    let seed = complex((0.4, 0.9));
    let mut roots = Vec::with_capacity(degree);
    let mut power = complex(1);
    for _ in 0..degree {
        roots.push(power.clone());
        power *= &seed;
    }

    for _ in 0..MAX_ITERATIONS {
        let mut max_step = 0.0_f64;
        for i in 0..degree {
            let mut denom = complex(1);
            for (j, other) in roots.iter().enumerate() {
                if i != j {
                    denom *= complex(&roots[i] - other);
                }
            }
            if denom.is_zero() {
                continue;
            }

            let step = eval(&coeffs, &roots[i]) / denom;
            let size = float(step.abs_ref()).to_f64();
            max_step = max_step.max(size);
            roots[i] -= step;
        }

        if max_step < TOLERANCE {
            break;
        }
    }

    roots.into_iter()
        .map(|mut root| {
            let magnitude = float(root.abs_ref()).to_f64().max(1.0);
            if root.imag().to_f64().abs() <= REAL_TOLERANCE * magnitude {
                *root.mut_imag() = float(0);
            }
            root
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use rug::Rational;
    use super::*;

    #[test]
    fn cube_root_of_two() {
        // x^3 - 2
        let poly = Poly::new(vec![Rational::from(-2), Rational::new(), Rational::new(), Rational::from(1)]);
        let roots = durand_kerner(&poly);
        assert_eq!(roots.len(), 3);

        let real = roots.iter()
            .filter(|root| root.imag().is_zero())
            .collect::<Vec<_>>();
        assert_eq!(real.len(), 1);
        assert_float_absolute_eq!(real[0].real().to_f64(), 2f64.cbrt(), 1e-12);

        // the other two roots are complex conjugates
        let imag_sum = roots.iter().map(|root| root.imag().to_f64()).sum::<f64>();
        assert_float_absolute_eq!(imag_sum, 0.0, 1e-12);
    }

    #[test]
    fn quintic_roots_satisfy_polynomial() {
        // x^5 - x - 1 has no rational roots
        let poly = Poly::new(vec![
            Rational::from(-1), Rational::from(-1), Rational::new(),
            Rational::new(), Rational::new(), Rational::from(1),
        ]);
        for root in durand_kerner(&poly) {
            let coeffs = poly.coeffs().iter().map(|c| complex((float(c), 0))).collect::<Vec<_>>();
            let value = float(eval(&coeffs, &root).abs_ref()).to_f64();
            assert_float_absolute_eq!(value, 0.0, 1e-20);
        }
    }
}
