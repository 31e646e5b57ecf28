//! numerical integration of the Student's t-distribution density
#![allow(non_snake_case)]
/// closed-form probability density of the Student's t-distribution,
/// computed in log space through the gamma function
pub mod students_t;
/// composite Simpson's rule integrator and cumulative probability
/// P(0 <= T <= z), with Gauss-Legendre quadrature as an alternative
pub mod simpson_quad;
