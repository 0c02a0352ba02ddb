//! Linear algebra utilities.
//!
//! Spline construction solves its not-a-knot system densely, and the
//! least-squares solver reuses the same solve for its damped normal
//! equations.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Solves a dense linear system `Ax = b` using LU decomposition with
/// partial pivoting.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` for a non-square matrix or a
/// right-hand side of the wrong length, and `MathError::SingularMatrix` if
/// the factorisation breaks down or yields a non-finite solution.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: a.ncols(),
            rows2: b.len(),
            cols2: 1,
        });
    }

    let x = a.clone().lu().solve(b).ok_or(MathError::SingularMatrix)?;

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(MathError::SingularMatrix)
    }
}
