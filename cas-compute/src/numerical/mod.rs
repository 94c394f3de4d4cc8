//! Numerical evaluation of symbolic expressions.
//!
//! Any [`Expr`](crate::symbolic::expr::Expr) whose variables are bound in a [`Ctxt`] can be
//! evaluated to an arbitrary-precision complex number with the [`Eval`] trait. Plotting and
//! checking candidate solutions both go through here.
//!
//! A [`Func`] wraps an expression in a single variable and evaluates it as an ordinary `f64`
//! function, returning [`None`] wherever the value is not a finite real number.

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod func;

pub use ctxt::Ctxt;
pub use error::EvalError;
pub use eval::Eval;
pub use func::Func;
