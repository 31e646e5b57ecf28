use crate::somelinalg::direct_solver_api::DirectSolveError;
use log::info;
use nalgebra::{DMatrix, DVector};

/// pivot smaller than this means the whole column is zero and the matrix
/// is singular
pub const SINGULAR_PIVOT_TOL: f64 = 1e-12;

/// Doolittle LU decomposition with partial (row) pivoting of a general
/// square matrix: A = P*L*U where P is a row permutation (kept as a
/// permutation vector), L is unit lower triangular and U is upper
/// triangular. The system Ax = b is then solved as Ly = Pb (forward
/// substitution) followed by Ux = y (back substitution).
pub struct LU_dense {
    A: DMatrix<f64>,
    l: DMatrix<f64>,
    u: DMatrix<f64>,
    p: Vec<usize>,
    swaps: usize,
    n: usize,
    decomposed: bool,
}

impl LU_dense {
    pub fn new(A: DMatrix<f64>) -> LU_dense {
        let n = A.nrows();
        LU_dense {
            A,
            l: DMatrix::zeros(n, n),
            u: DMatrix::zeros(n, n),
            p: (0..n).collect(),
            swaps: 0,
            n,
            decomposed: false,
        }
    }

    /// For each column k the pivot is the entry of largest absolute value on
    /// or below the diagonal; its row is swapped up (the permutation vector
    /// and the already computed part of L are swapped along). Then the rows
    /// below are eliminated: L[(i,k)] = U[(i,k)]/U[(k,k)] and
    /// U[(i,j)] -= L[(i,k)]*U[(k,j)]. If no usable pivot exists in some
    /// column the matrix is singular - reported as an error, never as a
    /// silent division by zero.
    pub fn LU(&mut self) -> Result<(), DirectSolveError> {
        if !self.A.is_square() {
            return Err(DirectSolveError::NonSquare {
                nrows: self.A.nrows(),
                ncols: self.A.ncols(),
            });
        }
        let n = self.n;
        let mut U = self.A.clone();
        let mut L: DMatrix<f64> = DMatrix::zeros(n, n);
        let mut P: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for k in 0..n {
            // pivot search in column k, rows k..n
            let mut piv = k;
            let mut piv_val = U[(k, k)].abs();
            for i in (k + 1)..n {
                if U[(i, k)].abs() > piv_val {
                    piv = i;
                    piv_val = U[(i, k)].abs();
                }
            }
            if piv_val < SINGULAR_PIVOT_TOL {
                return Err(DirectSolveError::SingularMatrix);
            }
            if piv != k {
                P.swap(k, piv);
                U.swap_rows(k, piv);
                L.columns_range_mut(0..k).swap_rows(k, piv);
                swaps += 1;
            }
            L[(k, k)] = 1.0;
            for i in (k + 1)..n {
                L[(i, k)] = U[(i, k)] / U[(k, k)];
                U[(i, k)] = 0.0;
                for j in (k + 1)..n {
                    U[(i, j)] -= L[(i, k)] * U[(k, j)];
                }
            }
        }
        self.l = L;
        self.u = U;
        self.p = P;
        self.swaps = swaps;
        self.decomposed = true;
        Ok(())
    }

    pub fn l(&self) -> DMatrix<f64> {
        self.l.clone()
    }

    pub fn u(&self) -> DMatrix<f64> {
        self.u.clone()
    }

    pub fn p(&self) -> Vec<usize> {
        self.p.clone()
    }

    /// det(A) = (-1)^swaps * prod U[(i,i)]
    pub fn determinant(&self) -> f64 {
        let mut det: f64 = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        for i in 0..self.n {
            det *= self.u[(i, i)];
        }
        det
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
        // apply permutation to b
        let mut Pb = DVector::zeros(n);
        for i in 0..n {
            Pb[i] = b[self.p[i]];
        }
        // forward substitution Ly = Pb, unit diagonal
        let mut y = DVector::zeros(n);
        for i in 0..n {
            y[i] = Pb[i];
            for j in 0..i {
                y[i] -= self.l[(i, j)] * y[j];
            }
        }
        // back substitution Ux = y
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            x[i] = y[i];
            for j in (i + 1)..n {
                x[i] -= self.u[(i, j)] * x[j];
            }
            x[i] /= self.u[(i, i)];
        }
        Ok(x)
    }
}

/// decompose and solve in one call
pub fn doolittle_solve(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, DirectSolveError> {
    let mut lu = LU_dense::new(A.clone());
    lu.LU()?;
    let x = lu.solve(b)?;
    info!("Doolittle LU solve done, n = {}", b.len());
    Ok(x)
}
