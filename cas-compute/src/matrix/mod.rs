//! Matrices read from nested list literals.
//!
//! A list of lists of equal length, such as `[[1, 2], [3, 4]]`, is read as a matrix with one row
//! per inner list. A flat list, such as `[1, 2, 3]`, is read as a column vector. The elements can
//! be any expression.

mod det;

use cas_parser::parser::ast::Expr as AstExpr;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;
use crate::symbolic::{expr::Expr, simplify};

/// Matrices with more rows than this cannot have their determinant computed symbolically.
pub const MAX_SYMBOLIC_DET: usize = 6;

/// An error that can occur while reading a matrix or computing its determinant.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// The input is not a bracketed list.
    #[error("expected a list of rows, such as `[[1, 2], [3, 4]]`")]
    NotAList,

    /// The input is an empty list, or contains an empty row.
    #[error("a matrix must have at least one row and one column")]
    Empty,

    /// The rows of the matrix have different lengths.
    #[error("row {row} has {found} elements, but the first row has {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An element of the matrix is not a valid expression.
    #[error("invalid element: {0}")]
    Element(#[from] cas_error::Error),

    /// The determinant was requested for a matrix that is not square.
    #[error("the determinant of a {rows}×{cols} matrix is undefined")]
    NotSquare {
        rows: usize,
        cols: usize,
    },

    /// The matrix is too large to compute the determinant of symbolically.
    #[error("cannot compute the symbolic determinant of a {0}×{0} matrix")]
    TooLarge(usize),
}

/// A matrix of expressions, stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    entries: Vec<Expr>,
}

impl Matrix {
    /// Creates a matrix from its rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MatrixError::Empty);
        }

        let num_rows = rows.len();
        let mut entries = Vec::with_capacity(num_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::Ragged { row: row + 1, expected: cols, found: values.len() });
            }
            entries.extend(values);
        }

        Ok(Self { rows: num_rows, cols, entries })
    }

    /// Reads a matrix from a list literal. Each element is converted and simplified.
    pub fn from_ast(ast: AstExpr) -> Result<Self, MatrixError> {
        let AstExpr::List(list) = ast.innermost().clone() else {
            return Err(MatrixError::NotAList);
        };

        let is_row = |value: &AstExpr| matches!(value.innermost(), AstExpr::List(_));
        let rows = if list.values.iter().any(is_row) {
            list.values.into_iter()
                .map(|value| match value.innermost().clone() {
                    AstExpr::List(row) => row.values.into_iter().map(convert).collect(),
                    other => Ok(vec![convert(other)?]),
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            // a flat list is a column vector
            list.values.into_iter()
                .map(|value| Ok(vec![convert(value)?]))
                .collect::<Result<Vec<_>, MatrixError>>()?
        };

        Self::from_rows(rows)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> &Expr {
        &self.entries[row * self.cols + col]
    }

    /// Returns true if every element is an exact number.
    pub fn is_rational(&self) -> bool {
        self.entries.iter().all(|entry| entry.as_number().is_some())
    }

    /// Computes the determinant of the matrix.
    ///
    /// Matrices of exact numbers use Gaussian elimination. Other matrices use cofactor expansion,
    /// up to a size of [`MAX_SYMBOLIC_DET`].
    pub fn det(&self) -> Result<Expr, MatrixError> {
        if self.rows != self.cols {
            return Err(MatrixError::NotSquare { rows: self.rows, cols: self.cols });
        }

        if self.is_rational() {
            Ok(Expr::number(det::gaussian(self)))
        } else if self.rows <= MAX_SYMBOLIC_DET {
            Ok(simplify(&det::cofactor(self)))
        } else {
            Err(MatrixError::TooLarge(self.rows))
        }
    }
}

fn convert(ast: AstExpr) -> Result<Expr, MatrixError> {
    Ok(simplify(&Expr::try_from(ast)?))
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix([")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.get(row, col))?;
            }
            write!(f, "]")?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn matrix(input: &str) -> Result<Matrix, MatrixError> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Matrix::from_ast(ast)
    }

    #[test]
    fn square_matrix() {
        let m = matrix("[[1,2],[3,4]]").unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 2));
        assert_eq!(m.to_string(), "Matrix([[1, 2], [3, 4]])");
        assert_eq!(m.det().unwrap().to_string(), "-2");
    }

    #[test]
    fn column_vector() {
        let m = matrix("[1, x, x^2]").unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 1));
        assert_eq!(m.to_string(), "Matrix([[1], [x], [x**2]])");
        assert!(matches!(m.det(), Err(MatrixError::NotSquare { rows: 3, cols: 1 })));
    }

    #[test]
    fn symbolic_determinant() {
        let m = matrix("[[a, b], [c, d]]").unwrap();
        assert_eq!(m.det().unwrap().to_string(), "a*d - b*c");

        let m = matrix("[[x, 1, 0], [1, x, 1], [0, 1, x]]").unwrap();
        assert_eq!(m.det().unwrap().to_string(), "x**3 - 2*x");
    }

    #[test]
    fn rational_determinant() {
        let m = matrix("[[2, 0, 1], [1, 3, 2], [1, 1, 2]]").unwrap();
        assert_eq!(m.det().unwrap().to_string(), "6");

        let m = matrix("[[1/2, 1], [1, 4]]").unwrap();
        assert_eq!(m.det().unwrap().to_string(), "1");
    }

    #[test]
    fn invalid_shapes() {
        assert!(matches!(matrix("[[1, 2], [3]]"), Err(MatrixError::Ragged { row: 2, expected: 2, found: 1 })));
        assert!(matches!(matrix("[]"), Err(MatrixError::Empty)));
        assert!(matches!(matrix("5"), Err(MatrixError::NotAList)));
        assert!(matches!(matrix("[[foo(1)]]"), Err(MatrixError::Element(_))));
    }
}
