//! Tableau simplex solver.
//!
//! Operates in place on a [`Matrix`] of shape `(m + 1) x (n + 1)`: the first
//! `m` rows are constraints, the last row is the objective, the first `n`
//! columns are decision variables and the last column is the right-hand side.
//!
//! The tableau must already describe a basic feasible solution. There is no
//! phase-one search; starting from an infeasible tableau yields meaningless
//! values rather than an error.
//!
//! Entering columns are chosen by the most negative objective coefficient
//! (Dantzig's rule). The first degenerate pivot switches the run to Bland's
//! rule, which cannot cycle, and an iteration cap bounds the loop regardless.

use tracing::{debug, trace, warn};

use crate::matrix::Matrix;
use crate::rational::{Rational, RationalError};

// ---------------------------------------------------------------------------
// Options and outcomes
// ---------------------------------------------------------------------------

/// How entering columns and tied leaving rows are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most negative objective coefficient; ties go to the first column.
    #[default]
    Dantzig,
    /// First negative objective coefficient; tied ratios go to the row whose
    /// basic variable has the lowest column index.
    Bland,
}

/// Sign an entry in the entering column must have for its row to take part
/// in the ratio test. In both cases the ratio is `rhs / entry` and the
/// smallest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowSign {
    /// Textbook ratio test for `<=` rows with slack columns: an eligible row
    /// has a strictly positive entry.
    #[default]
    Positive,
    /// For constraint assembly that stores rows negated, so an eligible row
    /// has a strictly negative entry.
    Negative,
}

impl RowSign {
    fn admits(self, x: &Rational) -> bool {
        match self {
            RowSign::Positive => x.is_positive(),
            RowSign::Negative => x.is_negative(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplexOptions {
    /// Pivot budget before giving up with
    /// [`SimplexOutcome::IterationLimitExceeded`].
    pub max_iterations: usize,
    pub rule: PivotRule,
    /// Switch to [`PivotRule::Bland`] after the first zero-ratio pivot.
    pub bland_fallback: bool,
    pub row_sign: RowSign,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            rule: PivotRule::Dantzig,
            bland_fallback: true,
            row_sign: RowSign::Positive,
        }
    }
}

/// Result of a simplex run. The tableau is left in whatever state the run
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexOutcome {
    /// No negative objective coefficient remains.
    Optimal { pivots: usize },
    /// The entering column has no eligible pivot row.
    Unbounded { column: usize },
    IterationLimitExceeded { pivots: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimplexError {
    #[error("tableau needs at least one constraint row and one variable column, got {rows}x{cols}")]
    Degenerate { rows: usize, cols: usize },
    #[error(transparent)]
    Rational(#[from] RationalError),
}

// ---------------------------------------------------------------------------
// Pivoting
// ---------------------------------------------------------------------------

/// Gauss-Jordan step: scale `row` so `(row, col)` becomes 1, then eliminate
/// `col` from every other row.
///
/// Fails with [`RationalError::DivisionByZero`] if the pivot cell is zero.
pub fn pivot(a: &mut Matrix, row: usize, col: usize) -> Result<(), RationalError> {
    let inverse = a.index(row, col).invert()?;
    a.mul_row(row, &inverse);
    let pivot_row = a.row(row).to_vec();
    for r in 0..a.rows() {
        if r == row {
            continue;
        }
        let ratio = a.index(r, col).clone();
        if ratio.is_zero() {
            continue;
        }
        for (c, other) in pivot_row.iter().enumerate() {
            if other.is_zero() {
                continue;
            }
            let x = a.index(r, c) - &(other * &ratio);
            a.set_index(r, c, x);
        }
    }
    Ok(())
}

/// Ratio test on `col` followed by a pivot on the winning row.
///
/// Eligible rows have an entry in `col` of the given sign; the smallest
/// `rhs / entry` wins, first row on ties. Returns the pivot row, or `None`
/// when no row is eligible (the tableau is left untouched).
pub fn pivot_col(
    a: &mut Matrix,
    col: usize,
    sign: RowSign,
) -> Result<Option<usize>, RationalError> {
    if a.rows() == 0 || a.cols() == 0 {
        return Ok(None);
    }
    let Some((row, _)) = leaving_row(a, col, PivotRule::Dantzig, sign)? else {
        return Ok(None);
    };
    pivot(a, row, col)?;
    Ok(Some(row))
}

fn entering_column(a: &Matrix, rule: PivotRule) -> Option<usize> {
    let objective = a.row(a.rows() - 1);
    let structural = &objective[..objective.len() - 1];
    match rule {
        PivotRule::Bland => structural.iter().position(Rational::is_negative),
        PivotRule::Dantzig => {
            let mut best: Option<(usize, &Rational)> = None;
            for (col, x) in structural.iter().enumerate() {
                if !x.is_negative() {
                    continue;
                }
                if best.is_none_or(|(_, min)| x < min) {
                    best = Some((col, x));
                }
            }
            best.map(|(col, _)| col)
        }
    }
}

fn leaving_row(
    a: &Matrix,
    col: usize,
    rule: PivotRule,
    sign: RowSign,
) -> Result<Option<(usize, Rational)>, RationalError> {
    let rhs = a.cols() - 1;
    let mut best: Option<(usize, Rational)> = None;
    for row in 0..a.rows().saturating_sub(1) {
        let x = a.index(row, col);
        if !sign.admits(x) {
            continue;
        }
        let ratio = a.index(row, rhs).checked_div(x)?;
        let better = match &best {
            None => true,
            Some((best_row, best_ratio)) => {
                ratio < *best_ratio
                    || (rule == PivotRule::Bland
                        && ratio == *best_ratio
                        && bland_key(a, row) < bland_key(a, *best_row))
            }
        };
        if better {
            best = Some((row, ratio));
        }
    }
    Ok(best)
}

fn bland_key(a: &Matrix, row: usize) -> (usize, usize) {
    (basic_column(a, row).unwrap_or(usize::MAX), row)
}

/// The structural column that is basic in `row`, if any.
fn basic_column(a: &Matrix, row: usize) -> Option<usize> {
    (0..a.cols() - 1).find(|&col| is_unit_column(a, col, row))
}

fn is_unit_column(a: &Matrix, col: usize, row: usize) -> bool {
    (0..a.rows()).all(|r| {
        let x = a.index(r, col);
        if r == row { x.is_one() } else { x.is_zero() }
    })
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Pivot until the objective row has no negative coefficient.
pub fn simplex(a: &mut Matrix, options: &SimplexOptions) -> Result<SimplexOutcome, SimplexError> {
    if a.rows() < 2 || a.cols() < 2 {
        return Err(SimplexError::Degenerate {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    debug!(rows = a.rows(), cols = a.cols(), "running simplex");

    let mut rule = options.rule;
    let mut pivots = 0;
    loop {
        let Some(col) = entering_column(a, rule) else {
            debug!(pivots, "tableau optimal");
            return Ok(SimplexOutcome::Optimal { pivots });
        };
        if pivots >= options.max_iterations {
            warn!(pivots, "simplex iteration limit reached");
            return Ok(SimplexOutcome::IterationLimitExceeded { pivots });
        }
        let Some((row, ratio)) = leaving_row(a, col, rule, options.row_sign)? else {
            warn!(column = col, "no eligible pivot row, objective unbounded");
            return Ok(SimplexOutcome::Unbounded { column: col });
        };
        if ratio.is_zero() && options.bland_fallback && rule == PivotRule::Dantzig {
            debug!(pivots, "degenerate pivot, switching to Bland's rule");
            rule = PivotRule::Bland;
        }
        trace!(row, col, %ratio, "pivot");
        pivot(a, row, col)?;
        pivots += 1;
    }
}

/// Bottom-right cell of the tableau.
pub fn objective_value(a: &Matrix) -> Option<&Rational> {
    let row = a.rows().checked_sub(1)?;
    let col = a.cols().checked_sub(1)?;
    Some(a.index(row, col))
}

/// Value of each structural variable in the tableau's current basis.
///
/// Each constraint row contributes its right-hand side to the first column
/// that is a unit vector on that row; every other variable is zero.
pub fn basic_solution(a: &Matrix) -> Vec<Rational> {
    if a.rows() == 0 || a.cols() == 0 {
        return Vec::new();
    }
    let rhs = a.cols() - 1;
    let mut values = vec![Rational::zero(); rhs];
    for row in 0..a.rows() - 1 {
        if let Some(col) = basic_column(a, row) {
            values[col] = a.index(row, rhs).clone();
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64, q: i64) -> Rational {
        Rational::new(p, q).unwrap()
    }

    fn tableau(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&x| Rational::from(x)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn pivot_produces_unit_column() {
        // x + y = 3, x - y = 1
        let mut a = tableau(&[&[1, 1, 3], &[1, -1, 1]]);
        pivot(&mut a, 0, 0).unwrap();
        assert_eq!(a.index(0, 0), &rat(1, 1));
        assert!(a.index(1, 0).is_zero());
        pivot(&mut a, 1, 1).unwrap();
        assert_eq!(a, tableau(&[&[1, 0, 2], &[0, 1, 1]]));
    }

    #[test]
    fn pivot_on_zero_fails() {
        let mut a = tableau(&[&[0, 1, 3], &[1, -1, 1]]);
        assert_eq!(pivot(&mut a, 0, 0), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn pivot_col_picks_min_ratio() {
        let mut a = tableau(&[&[1, 2, 1, 0, 4], &[3, 1, 0, 1, 6], &[-1, -1, 0, 0, 0]]);
        assert_eq!(pivot_col(&mut a, 0, RowSign::Positive), Ok(Some(1)));
        assert_eq!(a.row(1), &[rat(1, 1), rat(1, 3), rat(0, 1), rat(1, 3), rat(2, 1)]);
    }

    #[test]
    fn pivot_col_without_eligible_row_is_noop() {
        let mut a = tableau(&[&[-1, 1, 1, 1], &[-1, 0, 0, 0]]);
        let before = a.clone();
        assert_eq!(pivot_col(&mut a, 0, RowSign::Positive), Ok(None));
        assert_eq!(a, before);
    }

    #[test]
    fn solves_two_constraint_lp() {
        // maximize x + y  s.t.  x + 2y <= 4,  3x + y <= 6
        let mut a = tableau(&[&[1, 2, 1, 0, 4], &[3, 1, 0, 1, 6], &[-1, -1, 0, 0, 0]]);
        let outcome = simplex(&mut a, &SimplexOptions::default()).unwrap();
        assert_eq!(outcome, SimplexOutcome::Optimal { pivots: 2 });
        assert_eq!(objective_value(&a), Some(&rat(14, 5)));
        let solution = basic_solution(&a);
        assert_eq!(solution[..2], [rat(8, 5), rat(6, 5)]);
        assert!(solution[2..].iter().all(Rational::is_zero));
    }

    #[test]
    fn solves_three_constraint_lp() {
        // maximize 3x + 5y  s.t.  x <= 4,  2y <= 12,  3x + 2y <= 18
        let mut a = tableau(&[
            &[1, 0, 1, 0, 0, 4],
            &[0, 2, 0, 1, 0, 12],
            &[3, 2, 0, 0, 1, 18],
            &[-3, -5, 0, 0, 0, 0],
        ]);
        let outcome = simplex(&mut a, &SimplexOptions::default()).unwrap();
        assert_eq!(outcome, SimplexOutcome::Optimal { pivots: 2 });
        assert_eq!(objective_value(&a), Some(&rat(36, 1)));
        let solution = basic_solution(&a);
        assert_eq!(solution[0], rat(2, 1));
        assert_eq!(solution[1], rat(6, 1));
    }

    #[test]
    fn already_optimal_does_nothing() {
        let mut a = tableau(&[&[1, 0, 5], &[0, 2, 7]]);
        let before = a.clone();
        let outcome = simplex(&mut a, &SimplexOptions::default()).unwrap();
        assert_eq!(outcome, SimplexOutcome::Optimal { pivots: 0 });
        assert_eq!(a, before);
    }

    #[test]
    fn reports_unbounded_column() {
        // maximize x  s.t.  -x + y <= 1
        let mut a = tableau(&[&[-1, 1, 1, 1], &[-1, 0, 0, 0]]);
        let outcome = simplex(&mut a, &SimplexOptions::default()).unwrap();
        assert_eq!(outcome, SimplexOutcome::Unbounded { column: 0 });
    }

    #[test]
    fn negated_rows_need_negative_sign() {
        // maximize x  s.t.  x <= 4, with the constraint row stored negated
        let negated = tableau(&[&[-1, -1, -4], &[-1, 0, 0]]);

        let mut a = negated.clone();
        let outcome = simplex(&mut a, &SimplexOptions::default()).unwrap();
        assert_eq!(outcome, SimplexOutcome::Unbounded { column: 0 });

        let mut a = negated;
        let options = SimplexOptions {
            row_sign: RowSign::Negative,
            ..SimplexOptions::default()
        };
        let outcome = simplex(&mut a, &options).unwrap();
        assert_eq!(outcome, SimplexOutcome::Optimal { pivots: 1 });
        assert_eq!(objective_value(&a), Some(&rat(4, 1)));
    }

    #[test]
    fn respects_iteration_limit() {
        let mut a = tableau(&[&[1, 2, 1, 0, 4], &[3, 1, 0, 1, 6], &[-1, -1, 0, 0, 0]]);
        let options = SimplexOptions {
            max_iterations: 1,
            ..SimplexOptions::default()
        };
        let outcome = simplex(&mut a, &options).unwrap();
        assert_eq!(outcome, SimplexOutcome::IterationLimitExceeded { pivots: 1 });
    }

    #[test]
    fn rejects_empty_tableau() {
        let mut a = Matrix::new(1, 3);
        assert_eq!(
            simplex(&mut a, &SimplexOptions::default()),
            Err(SimplexError::Degenerate { rows: 1, cols: 3 })
        );
    }

    #[test]
    fn bland_rule_takes_first_negative_column() {
        let a = tableau(&[&[1, 1, 1, 4], &[-1, -3, 0, 0]]);
        assert_eq!(entering_column(&a, PivotRule::Bland), Some(0));
        assert_eq!(entering_column(&a, PivotRule::Dantzig), Some(1));
    }

    #[test]
    fn basic_column_detection() {
        let a = tableau(&[&[1, 2, 0, 4], &[0, 3, 1, 6], &[0, -1, 0, 0]]);
        assert_eq!(basic_column(&a, 0), Some(0));
        assert_eq!(basic_column(&a, 1), Some(2));
    }
}
