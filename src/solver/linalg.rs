// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dense complex linear solves.
//!
//! LU factorization with partial pivoting, sized for the small Liouville
//! dimensions this crate works at. The Rosenbrock stages factor once and
//! solve twice; the steady-state solve factors once.
//!
//! Ref: Golub & Van Loan, "Matrix Computations" (2013), §3.4.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// LU factors of a square matrix, multipliers stored in the lower triangle.
pub(crate) struct LuFactors {
    lu: Array2<Complex64>,
    pivots: Vec<usize>,
}

impl LuFactors {
    /// Factor PA = LU. Returns `None` on a zero pivot column.
    pub fn factor(mut a: Array2<Complex64>) -> Option<Self> {
        let n = a.nrows();
        assert_eq!(n, a.ncols(), "LU requires a square matrix");
        let mut pivots = Vec::with_capacity(n);

        for col in 0..n {
            let mut max_val = 0.0;
            let mut max_row = col;
            for row in col..n {
                let val = a[[row, col]].norm();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }
            if max_val == 0.0 {
                return None;
            }
            pivots.push(max_row);
            if max_row != col {
                for j in 0..n {
                    let tmp = a[[col, j]];
                    a[[col, j]] = a[[max_row, j]];
                    a[[max_row, j]] = tmp;
                }
            }

            let pivot = a[[col, col]];
            for row in (col + 1)..n {
                let factor = a[[row, col]] / pivot;
                a[[row, col]] = factor;
                for j in (col + 1)..n {
                    let val = a[[col, j]];
                    a[[row, j]] -= factor * val;
                }
            }
        }

        Some(Self { lu: a, pivots })
    }

    /// Solve A·x = b using the stored factors.
    pub fn solve(&self, b: &Array1<Complex64>) -> Array1<Complex64> {
        let n = self.lu.nrows();
        let mut x = b.clone();

        // Permute b the way the rows were swapped during factorization.
        for (col, &p) in self.pivots.iter().enumerate() {
            if p != col {
                x.swap(col, p);
            }
        }

        // Forward substitution with the unit lower triangle.
        for col in 0..n {
            for row in (col + 1)..n {
                let m = self.lu[[row, col]];
                let v = x[col];
                x[row] -= m * v;
            }
        }

        // Back substitution with the upper triangle.
        for col in (0..n).rev() {
            let mut sum = x[col];
            for k in (col + 1)..n {
                sum -= self.lu[[col, k]] * x[k];
            }
            x[col] = sum / self.lu[[col, col]];
        }

        x
    }
}

/// One-shot solve A·x = b; `None` when the system is singular or the
/// solution is not finite.
pub(crate) fn solve_dense(a: Array2<Complex64>, b: &Array1<Complex64>) -> Option<Array1<Complex64>> {
    let factors = LuFactors::factor(a)?;
    let x = factors.solve(b);
    x.iter()
        .all(|z| z.re.is_finite() && z.im.is_finite())
        .then_some(x)
}
