//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`Expr`] nodes. It's similar
//! to the [`cas_parser::parser::ast::Expr`] nodes produced by [`cas_parser`], with the main
//! difference being that [`Expr`] nodes **flatten** out the tree structure, and only know about
//! the functions and constants this module can reason about.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`cas_parser::parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! If you have a [`cas_parser::parser::ast::Expr`], you can convert it to an [`Expr`] using the
//! [`TryFrom`] trait. Conversion fails for unknown functions, calls with the wrong number of
//! arguments, and list literals.
//!
//! ```
//! use cas_compute::symbolic::expr::{Expr, Primary};
//! use cas_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<AstExpr>().unwrap();
//!
//! let expr = Expr::try_from(ast_expr).unwrap();
//! assert_eq!(expr, Expr::Add(vec![
//!     Expr::Primary(Primary::Symbol("x".to_string())),
//!     Expr::Primary(Primary::Symbol("y".to_string())),
//!     Expr::Primary(Primary::Symbol("z".to_string())),
//! ]));
//! ```
//!
//! # Simplification
//!
//! A primary use case for algebraic manipulation is to reduce expressions to some canonical form.
//! This is done with the [`simplify()`] function, which applies a set of rules in multiple passes,
//! then compares the result against its expansion and its rational cancellation, and keeps
//! whichever has the lowest _complexity_.
//!
//! ```
//! use cas_compute::symbolic::{expr::Expr, simplify};
//! use cas_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let mut parser = Parser::new("(x+2)*(x+3)");
//! let ast_expr = parser.try_parse_full::<AstExpr>().unwrap();
//! let simplified = simplify(&Expr::try_from(ast_expr).unwrap());
//! assert_eq!(simplified.to_string(), "x**2 + 5*x + 6");
//! ```
//!
//! For more information, see the [`mod@simplify`] module.
//!
//! # Other operations
//!
//! - [`expand()`] multiplies out products and integer powers of sums.
//! - [`factor()`] splits polynomials into linear factors over the rationals.
//! - [`solve()`] finds the roots of an expression in one variable.
//! - [`differentiate()`] and [`integrate()`] do calculus in one variable.

pub mod derivative;
pub mod error;
pub mod expand;
pub mod expr;
pub mod factor;
pub mod integral;
pub mod poly;
pub mod rational;
pub mod simplify;
pub mod solve;

pub use derivative::differentiate;
pub use error::SymbolicError;
pub use expand::expand;
pub use expr::Expr;
pub use factor::factor;
pub use integral::integrate;
pub use rational::cancel;
pub use simplify::{simplify, simplify_with, simplify_with_steps, step::StepCollector};
pub use solve::solve;
