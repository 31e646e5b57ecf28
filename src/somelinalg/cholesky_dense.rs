use crate::somelinalg::direct_solver_api::DirectSolveError;
use log::info;
use nalgebra::{DMatrix, DVector};

/// Cholesky decomposition of a symmetric positive definite matrix A into
/// A = L*L^T where L is lower triangular. Solving Ax = b then costs two
/// triangular solves: Ly = b by forward substitution and L^T x = y by back
/// substitution. No pivoting is performed, positive definiteness makes the
/// elimination stable on its own.
///
/// Caller is expected to have checked symmetry (see
/// `matrix_checks::is_symmetric`); a matrix that is not actually positive
/// definite is caught during `decompose` as a non-positive pivot.
pub struct Cholesky_dense {
    A: DMatrix<f64>,
    l: DMatrix<f64>,
    n: usize,
    decomposed: bool,
}

impl Cholesky_dense {
    pub fn new(A: DMatrix<f64>) -> Cholesky_dense {
        let n = A.nrows();
        Cholesky_dense {
            A,
            l: DMatrix::zeros(n, n),
            n,
            decomposed: false,
        }
    }

    /// Standard Cholesky elimination: for each column j
    /// L[(j,j)] = sqrt(A[(j,j)] - sum_k L[(j,k)]^2),
    /// L[(i,j)] = (A[(i,j)] - sum_k L[(i,k)]*L[(j,k)]) / L[(j,j)], i > j.
    /// A non-positive value under the square root means the matrix is not
    /// positive definite.
    pub fn decompose(&mut self) -> Result<(), DirectSolveError> {
        if !self.A.is_square() {
            return Err(DirectSolveError::NonSquare {
                nrows: self.A.nrows(),
                ncols: self.A.ncols(),
            });
        }
        let n = self.n;
        let mut L: DMatrix<f64> = DMatrix::zeros(n, n);
        for j in 0..n {
            let mut diag = self.A[(j, j)];
            for k in 0..j {
                diag -= L[(j, k)] * L[(j, k)];
            }
            if diag <= 0.0 {
                return Err(DirectSolveError::NotPositiveDefinite);
            }
            L[(j, j)] = diag.sqrt();
            for i in (j + 1)..n {
                let mut sum = self.A[(i, j)];
                for k in 0..j {
                    sum -= L[(i, k)] * L[(j, k)];
                }
                L[(i, j)] = sum / L[(j, j)];
            }
        }
        self.l = L;
        self.decomposed = true;
        Ok(())
    }

    pub fn l(&self) -> DMatrix<f64> {
        self.l.clone()
    }

    pub fn solve(&self, b: &DVector<f64>) -> Result<DVector<f64>, DirectSolveError> {
        if !self.decomposed {
            return Err(DirectSolveError::NotDecomposed);
        }
        let n = self.n;
        if b.len() != n {
            return Err(DirectSolveError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }
        let L = &self.l;
        // forward substitution Ly = b
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut s = b[i];
            for j in 0..i {
                s -= L[(i, j)] * y[j];
            }
            y[i] = s / L[(i, i)];
        }
        // back substitution L^T x = y
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            let mut s = y[i];
            for j in (i + 1)..n {
                // L^T[(i,j)] = L[(j,i)]
                s -= L[(j, i)] * x[j];
            }
            x[i] = s / L[(i, i)];
        }
        Ok(x)
    }
}

/// decompose and solve in one call
pub fn cholesky_solve(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, DirectSolveError> {
    let mut chol = Cholesky_dense::new(A.clone());
    chol.decompose()?;
    let x = chol.solve(b)?;
    info!("Cholesky solve done, n = {}", b.len());
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_factor_against_nalgebra() {
        let A = DMatrix::from_row_slice(
            3,
            3,
            &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
        );
        let mut chol = Cholesky_dense::new(A.clone());
        chol.decompose().unwrap();
        let L = chol.l();
        let expected = A.clone().cholesky().unwrap().unpack();
        for (li, ei) in L.iter().zip(expected.iter()) {
            assert_relative_eq!(*li, *ei, epsilon = 1e-12);
        }
        // reconstruction A = L*L^T
        let reconstructed = &L * &L.transpose();
        for (ri, ai) in reconstructed.iter().zip(A.iter()) {
            assert_relative_eq!(*ri, *ai, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_round_trip() {
        let A = DMatrix::from_row_slice(
            4,
            4,
            &[
                1.0, -1.0, 3.0, 2.0, -1.0, 5.0, -5.0, -2.0, 3.0, -5.0, 19.0, 3.0, 2.0, -2.0, 3.0,
                21.0,
            ],
        );
        let b = DVector::from_vec(vec![15.0, -35.0, 94.0, 1.0]);
        let x = cholesky_solve(&A, &b).unwrap();
        let r = &A * &x - &b;
        assert!(r.norm() < 1e-9);
    }

    #[test]
    fn test_not_positive_definite() {
        let mut I = DMatrix::identity(3, 3);
        I[(1, 1)] = -1.0;
        let b = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        let res = cholesky_solve(&I, &b);
        assert!(matches!(res, Err(DirectSolveError::NotPositiveDefinite)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let A = DMatrix::identity(3, 3);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let res = cholesky_solve(&A, &b);
        assert!(matches!(
            res,
            Err(DirectSolveError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }
}
