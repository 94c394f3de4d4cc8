//! Line plots of expressions in `x`.
//!
//! A [`Graph`] holds one or more curves, samples each of them over a fixed `x` range, fits the
//! `y` range to the samples, and renders the result with [`cairo`] into an in-memory PNG.
//!
//! ```no_run
//! use cas_graph::{Graph, GraphOptions};
//!
//! # fn main() -> Result<(), cas_graph::GraphError> {
//! let png = Graph::with_opts(GraphOptions::default())
//!     .try_add_exprs("x^2, sin(x)")?
//!     .title("f(x) = x^2, sin(x)")
//!     .to_png()?;
//! assert!(!png.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod graph;
mod text_align;

pub use graph::{CanvasPoint, Graph, GraphError, GraphOptions, GraphPoint};
