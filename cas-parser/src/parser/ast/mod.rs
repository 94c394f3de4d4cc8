//! The abstract syntax tree produced by the parser. Every node keeps the span of the source code
//! it was parsed from.

pub mod binary;
pub mod call;
pub mod expr;
pub mod iter;
pub mod list;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::{Expr, Primary};
pub use list::List;
pub use literal::{LitFloat, LitInt, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;
