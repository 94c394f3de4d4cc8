use rug::Rational;
use crate::symbolic::expr::Expr;
use super::Matrix;

/// Computes the determinant of a square matrix of exact numbers by Gaussian elimination.
pub(super) fn gaussian(matrix: &Matrix) -> Rational {
    let n = matrix.rows();
    let mut rows = (0..n)
        .map(|row| {
            (0..n)
                .map(|col| matrix.get(row, col).as_number().cloned().unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut det = Rational::from(1);
    for col in 0..n {
        let Some(pivot) = (col..n).find(|&row| rows[row][col] != 0) else {
            return Rational::new();
        };
        if pivot != col {
            rows.swap(pivot, col);
            det = -det;
        }

        det *= &rows[col][col];
        for row in col + 1..n {
            let factor = Rational::from(&rows[row][col] / &rows[col][col]);
            if factor == 0 {
                continue;
            }
            for k in col..n {
                let delta = Rational::from(&factor * &rows[col][k]);
                rows[row][k] -= delta;
            }
        }
    }

    det
}

/// Computes the determinant of a square matrix by cofactor expansion along the first row. The
/// result is not simplified.
pub(super) fn cofactor(matrix: &Matrix) -> Expr {
    let cols = (0..matrix.cols()).collect::<Vec<_>>();
    expand_minor(matrix, 0, &cols)
}

/// The determinant of the minor made of the rows from `row` down, and the given columns.
fn expand_minor(matrix: &Matrix, row: usize, cols: &[usize]) -> Expr {
    if let [col] = cols {
        return matrix.get(row, *col).clone();
    }

    let terms = cols.iter()
        .enumerate()
        .filter(|(_, col)| !matrix.get(row, **col).is_zero())
        .map(|(i, &col)| {
            let rest = cols.iter()
                .copied()
                .filter(|&other| other != col)
                .collect::<Vec<_>>();
            let term = matrix.get(row, col).clone() * expand_minor(matrix, row + 1, &rest);
            if i % 2 == 0 {
                term
            } else {
                -term
            }
        })
        .collect::<Vec<_>>();
    Expr::Add(terms).downgrade()
}
