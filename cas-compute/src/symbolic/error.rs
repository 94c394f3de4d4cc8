use thiserror::Error;

/// Errors produced by the symbolic operations that can fail: solving, integrating and
/// differentiating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolicError {
    /// The variable could not be isolated in the equation.
    #[error("cannot isolate `{var}` in `{expr}`")]
    CannotIsolate {
        var: String,
        expr: String,
    },

    /// A polynomial with symbolic coefficients has too high a degree to be solved in closed form.
    #[error("cannot solve a polynomial of degree {degree} with symbolic coefficients")]
    SymbolicPolynomial {
        degree: usize,
    },

    /// No antiderivative was found for the integrand.
    #[error("cannot find a closed form for the integral of `{0}`")]
    NoClosedForm(String),

    /// The function has no derivative rule, such as `sign` at zero.
    #[error("cannot differentiate `{0}`")]
    NotDifferentiable(String),
}
