//! The computation engine of the math bot.
//!
//! - [`symbolic`] manipulates expressions exactly: simplification, expansion, factoring, solving,
//! differentiation and integration.
//! - [`numerical`] evaluates expressions to arbitrary-precision complex numbers, and builds the
//! numeric callables used for plotting.
//! - [`matrix`] reads nested list literals as matrices and computes determinants.
//!
//! Every public operation takes an expression in the [`symbolic::expr::Expr`] form, which is built
//! from a parsed [`cas_parser::parser::ast::Expr`] with [`TryFrom`].

pub mod consts;
pub mod matrix;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
