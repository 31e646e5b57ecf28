use crate::somelinalg::cholesky_dense::cholesky_solve;
use crate::somelinalg::doolittle_dense::doolittle_solve;
use crate::somelinalg::matrix_checks::{is_positive_definite, is_symmetric};
use log::info;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Error types for the direct solvers
#[derive(Debug, Clone, PartialEq)]
pub enum DirectSolveError {
    NonSquare { nrows: usize, ncols: usize },
    DimensionMismatch { expected: usize, got: usize },
    NotPositiveDefinite,
    SingularMatrix,
    NotDecomposed,
}

impl fmt::Display for DirectSolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirectSolveError::NonSquare { nrows, ncols } => {
                write!(f, "matrix must be square, got {}x{}", nrows, ncols)
            }
            DirectSolveError::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "right-hand side length {} does not match matrix dimension {}",
                    got, expected
                )
            }
            DirectSolveError::NotPositiveDefinite => {
                write!(f, "matrix is not positive definite")
            }
            DirectSolveError::SingularMatrix => write!(f, "matrix is singular"),
            DirectSolveError::NotDecomposed => {
                write!(f, "decompose() must be called before solve()")
            }
        }
    }
}

impl std::error::Error for DirectSolveError {}

/// Enum to represent the direct solution methods
#[derive(Debug, Clone, PartialEq)]
pub enum DirectMethod {
    Cholesky,
    DoolittleLU,
}

impl DirectMethod {
    pub fn description(&self) -> &'static str {
        match self {
            DirectMethod::Cholesky => {
                "Cholesky decomposition A = L*L^T for symmetric positive definite matrices"
            }
            DirectMethod::DoolittleLU => {
                "Doolittle LU decomposition A = P*L*U with partial pivoting for general matrices"
            }
        }
    }
}

/// Solve Ax = b choosing the decomposition from the matrix properties:
/// a symmetric positive definite matrix goes to Cholesky (half the flops of
/// LU and stable without pivoting), everything else falls back to Doolittle
/// LU with partial pivoting. Returns the solution together with the method
/// actually used.
pub fn solve_linear_system(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<(DVector<f64>, DirectMethod), DirectSolveError> {
    if is_symmetric(A) && is_positive_definite(A) {
        info!("matrix is symmetric positive definite, solving by Cholesky");
        let x = cholesky_solve(A, b)?;
        Ok((x, DirectMethod::Cholesky))
    } else {
        info!("matrix is not symmetric positive definite, solving by Doolittle LU");
        let x = doolittle_solve(A, b)?;
        Ok((x, DirectMethod::DoolittleLU))
    }
}

/// ||Ax - b||, cheap a posteriori accuracy check of a computed solution
pub fn residual_norm(A: &DMatrix<f64>, x: &DVector<f64>, b: &DVector<f64>) -> f64 {
    (A * x - b).norm()
}
