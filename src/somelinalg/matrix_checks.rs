use crate::somelinalg::cholesky_dense::Cholesky_dense;
use log::warn;
use nalgebra::DMatrix;

/// default absolute tolerance for entrywise comparisons
pub const DEFAULT_ABS_TOL: f64 = 1e-10;
/// default relative tolerance for entrywise comparisons
pub const DEFAULT_REL_TOL: f64 = 1e-8;

/// A matrix is symmetric if A = A^T. Exact equality of floats is useless here:
/// a matrix assembled in different element order may differ in the last bits,
/// so every pair A[(i,j)], A[(j,i)] is compared with the combined tolerance
/// |a - b| <= abs_tol + rel_tol*|b|.
pub fn is_symmetric_with_tol(A: &DMatrix<f64>, abs_tol: f64, rel_tol: f64) -> bool {
    if !A.is_square() {
        return false;
    }
    let n = A.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let a_ij = A[(i, j)];
            let a_ji = A[(j, i)];
            if (a_ij - a_ji).abs() > abs_tol + rel_tol * a_ji.abs() {
                return false;
            }
        }
    }
    true
}

pub fn is_symmetric(A: &DMatrix<f64>) -> bool {
    is_symmetric_with_tol(A, DEFAULT_ABS_TOL, DEFAULT_REL_TOL)
}

/// A symmetric matrix is positive definite iff its Cholesky factorization
/// exists, i.e. no non-positive value appears under the square root during
/// elimination. So the check is operational: attempt the factorization and
/// interpret failure as "no". Failure here is not an error to propagate.
pub fn is_positive_definite(A: &DMatrix<f64>) -> bool {
    if !A.is_square() {
        return false;
    }
    Cholesky_dense::new(A.clone()).decompose().is_ok()
}

/// determinant close to zero means the matrix is singular and the system
/// Ax = b has no unique solution
pub fn is_singular(A: &DMatrix<f64>, epsilon: f64) -> bool {
    let det = A.determinant();
    let singular = det.abs() < epsilon;
    if singular {
        warn!("matrix is singular, det = {:.3e}", det);
    }
    singular
}

/// The condition number cond(A) = sigma_max/sigma_min tells how much the
/// solution is amplified by perturbations of the input data. Above the
/// threshold the direct solvers still return an answer but its accuracy
/// degrades.
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let singular_values = A.singular_values();
    let sigma_max = singular_values[0];
    let sigma_min = singular_values[singular_values.len() - 1];
    let condition_number = sigma_max / sigma_min;
    let poorly = condition_number > threshold;
    if poorly {
        warn!(
            "system is poorly conditioned, cond(A) = {:.3e} > {:.1e}",
            condition_number, threshold
        );
    }
    poorly
}

/// pre-flight check of a linear system before handing it to a direct
/// solver: warns and returns false when the matrix is singular or the
/// conditioning is bad enough that the computed solution should not be
/// trusted
pub fn linear_system_diagnostics(A: &DMatrix<f64>, epsilon: f64, threshold: f64) -> bool {
    if is_singular(A, epsilon) {
        return false;
    }
    !poorly_conditioned(A, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn hilbert_matrix(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| 1.0 / ((i + j + 1) as f64))
    }

    #[test]
    fn test_is_symmetric() {
        // M + M^T is symmetric by construction
        let M = DMatrix::from_row_slice(3, 3, &[1.0, 7.0, 3.0, 0.0, 4.0, -2.0, 5.0, 1.0, 9.0]);
        let S = &M + &M.transpose();
        assert!(is_symmetric(&S));
        // one off-diagonal entry perturbed beyond tolerance
        let mut P = S.clone();
        P[(0, 2)] += 1e-3;
        assert!(!is_symmetric(&P));
        // perturbation below tolerance is still "symmetric"
        let mut Q = S.clone();
        Q[(0, 2)] += 1e-12;
        assert!(is_symmetric(&Q));
    }

    #[test]
    fn test_is_symmetric_rejects_rectangular() {
        let M = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 1.0, 4.0]);
        assert!(!is_symmetric(&M));
    }

    #[test]
    fn test_is_positive_definite() {
        let A = DMatrix::from_row_slice(
            4,
            4,
            &[
                1.0, -1.0, 3.0, 2.0, -1.0, 5.0, -5.0, -2.0, 3.0, -5.0, 19.0, 3.0, 2.0, -2.0, 3.0,
                21.0,
            ],
        );
        assert!(is_positive_definite(&A));
        // identity with one negative eigenvalue
        let mut I = DMatrix::identity(4, 4);
        I[(2, 2)] = -1.0;
        assert!(!is_positive_definite(&I));
    }

    #[test]
    fn test_is_singular() {
        let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(is_singular(&A, 1e-10));
        let B = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert!(!is_singular(&B, 1e-10));
    }

    #[test]
    fn test_poorly_conditioned_hilbert() {
        let A = hilbert_matrix(6);
        assert!(poorly_conditioned(&A, 1e5));
        let I = DMatrix::<f64>::identity(6, 6);
        assert!(!poorly_conditioned(&I, 1e5));
    }

    #[test]
    fn test_linear_system_diagnostics() {
        let I = DMatrix::<f64>::identity(4, 4);
        assert!(linear_system_diagnostics(&I, 1e-10, 1e5));
        assert!(!linear_system_diagnostics(&hilbert_matrix(8), 1e-10, 1e5));
    }
}
