//! dense direct solvers for linear systems Ax = b
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// checks of matrix properties: symmetry, positive definiteness,
/// singularity and conditioning
pub mod matrix_checks;
/// Cholesky decomposition A = L*L^T for symmetric positive definite
/// matrices with forward/back substitution solver
pub mod cholesky_dense;
/// Doolittle LU decomposition A = P*L*U with partial (row) pivoting
pub mod doolittle_dense;
/// api choosing between Cholesky and Doolittle depending on matrix
/// properties
pub mod direct_solver_api;
