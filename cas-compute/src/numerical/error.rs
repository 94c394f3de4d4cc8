use thiserror::Error;

/// An error that can occur while evaluating an expression numerically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The variable is not bound in the context.
    #[error("`{0}` is not defined")]
    UndefinedVariable(String),

    /// The expression evaluated to infinity or NaN, such as `1/0` or `log(0)`.
    #[error("`{0}` does not evaluate to a finite number")]
    NonFinite(String),
}
