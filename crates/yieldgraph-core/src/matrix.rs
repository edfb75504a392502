//! Dense row-major matrix of [`Rational`] cells.
//!
//! The matrix is the working storage for the tableau solver. It has a fixed
//! shape for its whole life; variables and constraints are disabled by
//! zeroing their column or row rather than by resizing.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::rational::Rational;

/// Errors raised when building a matrix from nested rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A `rows x cols` grid of rationals, zero-initialized.
///
/// Cell access is not bounds-checked against the logical shape beyond what
/// the backing `Vec` enforces; out-of-range coordinates panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Rational>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Rational::zero(); rows * cols],
        }
    }

    /// Build from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn index(&self, row: usize, col: usize) -> &Rational {
        &self.cells[row * self.cols + col]
    }

    pub fn set_index(&mut self, row: usize, col: usize, value: Rational) {
        self.cells[row * self.cols + col] = value;
    }

    /// Accumulate `value` into a cell.
    pub fn add_index(&mut self, row: usize, col: usize, value: &Rational) {
        let cell = &mut self.cells[row * self.cols + col];
        *cell = &*cell + value;
    }

    /// A read-only view of one row.
    pub fn row(&self, row: usize) -> &[Rational] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Scale every cell of `row` by `scalar`.
    pub fn mul_row(&mut self, row: usize, scalar: &Rational) {
        let start = row * self.cols;
        for cell in &mut self.cells[start..start + self.cols] {
            *cell = &*cell * scalar;
        }
    }

    pub fn zero_row(&mut self, row: usize) {
        let start = row * self.cols;
        for cell in &mut self.cells[start..start + self.cols] {
            *cell = Rational::zero();
        }
    }

    pub fn zero_column(&mut self, col: usize) {
        for row in 0..self.rows {
            self.cells[row * self.cols + col] = Rational::zero();
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (row, col): (usize, usize)) -> &Rational {
        &self.cells[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Rational {
        &mut self.cells[row * self.cols + col]
    }
}

/// Debug rendering: each cell as a 3-digit decimal, columns right-aligned.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.cells.iter().map(|c| c.to_decimal(3)).collect();
        let widths: Vec<usize> = (0..self.cols)
            .map(|col| {
                (0..self.rows)
                    .map(|row| rendered[row * self.cols + col].len())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &width) in widths.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>width$}", rendered[row * self.cols + col])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64, q: i64) -> Rational {
        Rational::new(p, q).unwrap()
    }

    #[test]
    fn new_is_zeroed() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        for r in 0..2 {
            for c in 0..3 {
                assert!(m.index(r, c).is_zero());
            }
        }
    }

    #[test]
    fn set_and_add_index() {
        let mut m = Matrix::new(2, 2);
        m.set_index(1, 0, rat(1, 2));
        m.add_index(1, 0, &rat(1, 3));
        assert_eq!(m.index(1, 0), &rat(5, 6));
        assert_eq!(m[(1, 0)], rat(5, 6));
        m[(0, 1)] = rat(7, 1);
        assert_eq!(m.index(0, 1), &rat(7, 1));
    }

    #[test]
    fn mul_row_scales_only_that_row() {
        let mut m = Matrix::from_rows(vec![
            vec![rat(1, 1), rat(2, 1)],
            vec![rat(3, 1), rat(4, 1)],
        ])
        .unwrap();
        m.mul_row(0, &rat(1, 2));
        assert_eq!(m.row(0), &[rat(1, 2), rat(1, 1)]);
        assert_eq!(m.row(1), &[rat(3, 1), rat(4, 1)]);
    }

    #[test]
    fn zero_row_and_column() {
        let mut m = Matrix::from_rows(vec![
            vec![rat(1, 1), rat(2, 1), rat(3, 1)],
            vec![rat(4, 1), rat(5, 1), rat(6, 1)],
        ])
        .unwrap();
        m.zero_column(1);
        assert!(m.index(0, 1).is_zero() && m.index(1, 1).is_zero());
        assert_eq!(m.index(1, 2), &rat(6, 1));
        m.zero_row(0);
        assert!(m.row(0).iter().all(Rational::is_zero));
        assert_eq!(m.index(1, 0), &rat(4, 1));
    }

    #[test]
    fn copies_are_independent() {
        let original = Matrix::from_rows(vec![vec![rat(1, 1)]]).unwrap();
        let mut copy = original.clone();
        copy.set_index(0, 0, rat(9, 1));
        assert_eq!(original.index(0, 0), &rat(1, 1));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![rat(1, 1), rat(2, 1)], vec![rat(3, 1)]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn display_aligns_columns() {
        let m = Matrix::from_rows(vec![
            vec![rat(1, 3), rat(10, 1)],
            vec![rat(-1, 2), rat(1, 1)],
        ])
        .unwrap();
        assert_eq!(m.to_string(), "0.333 10\n -0.5  1");
    }
}
