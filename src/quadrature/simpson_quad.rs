use crate::quadrature::students_t::{TDistribution, TDistributionError};
use gauss_quad::GaussLegendre;
use log::info;
use std::fmt;

/// interval count used by `cumulative_probability`, enough for ~1e-10
/// accuracy on the t-density over any reasonable [0, z]
pub const DEFAULT_INTERVALS: usize = 1000;

/// Error types for the quadrature routines
#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    TooFewIntervals(usize),
    OddIntervalCount(usize),
    InvalidBounds { lower: f64, upper: f64 },
    Distribution(TDistributionError),
    QuadratureFailed(String),
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::TooFewIntervals(n) => {
                write!(f, "Simpson's rule needs at least 2 intervals, got {}", n)
            }
            QuadratureError::OddIntervalCount(n) => {
                write!(f, "Simpson's rule needs an even interval count, got {}", n)
            }
            QuadratureError::InvalidBounds { lower, upper } => {
                write!(
                    f,
                    "integration bounds must be finite with lower <= upper, got [{}, {}]",
                    lower, upper
                )
            }
            QuadratureError::Distribution(e) => write!(f, "{}", e),
            QuadratureError::QuadratureFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for QuadratureError {}

impl From<TDistributionError> for QuadratureError {
    fn from(e: TDistributionError) -> Self {
        QuadratureError::Distribution(e)
    }
}

/// Composite Simpson's rule on [lower, upper] with n equal sub-intervals of
/// width h = (upper-lower)/n: interior points get weight 4 at odd indices
/// and 2 at even indices, the result is (h/3)*(f(a) + 4*sum_odd + 2*sum_even
/// + f(b)). Odd n would silently produce a wrong answer, so it is rejected
/// instead; so are n < 2 and unordered or non-finite bounds. A zero-width
/// interval integrates to exactly 0.
pub fn simpsons_rule<F: Fn(f64) -> f64>(
    f: F,
    lower: f64,
    upper: f64,
    n: usize,
) -> Result<f64, QuadratureError> {
    if !lower.is_finite() || !upper.is_finite() || upper < lower {
        return Err(QuadratureError::InvalidBounds { lower, upper });
    }
    if n < 2 {
        return Err(QuadratureError::TooFewIntervals(n));
    }
    if n % 2 != 0 {
        return Err(QuadratureError::OddIntervalCount(n));
    }
    if lower == upper {
        return Ok(0.0);
    }

    let h = (upper - lower) / (n as f64);
    let mut sum = f(lower) + f(upper);
    for i in 1..n {
        let x = lower + (i as f64) * h;
        if i % 2 == 0 {
            sum += 2.0 * f(x);
        } else {
            sum += 4.0 * f(x);
        }
    }
    Ok(sum * h / 3.0)
}

/// Enum to represent the quadrature methods
#[derive(Debug, Clone)]
pub enum QuadMethod {
    /// composite Simpson's rule with n sub-intervals
    Simpson,
    /// Gauss-Legendre quadrature of degree n from the gauss-quad crate
    GaussLegendre,
}

impl QuadMethod {
    /// Get a description of the quadrature method
    pub fn description(&self) -> &'static str {
        match self {
            QuadMethod::Simpson => "composite Simpson's rule over n equal sub-intervals",
            QuadMethod::GaussLegendre => "Gauss-Legendre quadrature of degree n",
        }
    }

    /// both methods work on finite intervals only
    pub fn is_suitable_for_interval(&self, lower: f64, upper: f64) -> bool {
        lower.is_finite() && upper.is_finite()
    }
}

/// Integrate the t-distribution density with v degrees of freedom over
/// [lower, upper]. For `QuadMethod::Simpson` n is the sub-interval count
/// (even, >= 2), for `QuadMethod::GaussLegendre` n is the polynomial degree.
pub fn t_probability(
    freedom: f64,
    lower: f64,
    upper: f64,
    n: usize,
    method: QuadMethod,
) -> Result<f64, QuadratureError> {
    let dist = TDistribution::new(freedom)?;
    match method {
        QuadMethod::Simpson => simpsons_rule(|t| dist.pdf(t), lower, upper, n),
        QuadMethod::GaussLegendre => {
            if !lower.is_finite() || !upper.is_finite() || upper < lower {
                return Err(QuadratureError::InvalidBounds { lower, upper });
            }
            if lower == upper {
                return Ok(0.0);
            }
            let quad = GaussLegendre::new(n).map_err(|e| {
                QuadratureError::QuadratureFailed(format!(
                    "failed to create Gauss-Legendre quadrature: {:?}",
                    e
                ))
            })?;
            Ok(quad.integrate(lower, upper, |t| dist.pdf(t)))
        }
    }
}

/// Cumulative probability P(0 <= T <= z) of the t-distribution with v
/// degrees of freedom, integrated by Simpson's rule with 1000 intervals.
pub fn cumulative_probability(freedom: f64, z: f64) -> Result<f64, QuadratureError> {
    let p = t_probability(freedom, 0.0, z, DEFAULT_INTERVALS, QuadMethod::Simpson)?;
    info!("P(0 <= T <= {}) = {} for v = {}", z, p, freedom);
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::students_t::t_distribution_pdf;
    use approx::assert_relative_eq;
    use statrs::distribution::{ContinuousCDF, StudentsT};

    #[test]
    fn test_simpson_exact_for_cubics() {
        // Simpson integrates polynomials up to degree 3 exactly
        let res = simpsons_rule(|x| x * x * x - 2.0 * x + 1.0, 0.0, 2.0, 2).unwrap();
        // integral of x^3 - 2x + 1 over [0,2] is 4 - 4 + 2 = 2
        assert_relative_eq!(res, 2.0, epsilon = 1e-13);
    }

    #[test]
    fn test_simpson_sine() {
        let res = simpsons_rule(|x| x.sin(), 0.0, std::f64::consts::PI, 100).unwrap();
        assert_relative_eq!(res, 2.0, epsilon = 1e-7);
    }

    #[test]
    fn test_simpson_rejects_bad_input() {
        let f = |x: f64| x;
        assert!(matches!(
            simpsons_rule(f, 0.0, 1.0, 3),
            Err(QuadratureError::OddIntervalCount(3))
        ));
        assert!(matches!(
            simpsons_rule(f, 0.0, 1.0, 0),
            Err(QuadratureError::TooFewIntervals(0))
        ));
        assert!(matches!(
            simpsons_rule(f, 1.0, 0.0, 10),
            Err(QuadratureError::InvalidBounds { .. })
        ));
        assert!(matches!(
            simpsons_rule(f, 0.0, f64::INFINITY, 10),
            Err(QuadratureError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_zero_width_interval() {
        let res = simpsons_rule(|t| t_distribution_pdf(t, 5.0), 1.5, 1.5, 1000).unwrap();
        assert_eq!(res, 0.0);
        let res = t_probability(5.0, 1.5, 1.5, 1000, QuadMethod::GaussLegendre).unwrap();
        assert_eq!(res, 0.0);
    }

    #[test]
    fn test_cumulative_probability_against_statrs() {
        // P(0 <= T <= z) = cdf(z) - 1/2 by symmetry
        for (v, z) in [(3.0, 1.5), (10.0, 0.7), (1.0, 2.0)] {
            let reference = StudentsT::new(0.0, 1.0, v).unwrap();
            let expected = reference.cdf(z) - 0.5;
            let p = cumulative_probability(v, z).unwrap();
            assert_relative_eq!(p, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_half_mass_for_large_z() {
        let p = cumulative_probability(8.0, 10.0).unwrap();
        assert!((p - 0.5).abs() < 1e-3, "got {}", p);
    }

    #[test]
    fn test_simpson_agrees_with_gauss_legendre() {
        let by_simpson = t_probability(6.0, 0.0, 2.0, 1000, QuadMethod::Simpson).unwrap();
        let by_gauss = t_probability(6.0, 0.0, 2.0, 40, QuadMethod::GaussLegendre).unwrap();
        assert_relative_eq!(by_simpson, by_gauss, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_freedom_propagates() {
        assert!(matches!(
            cumulative_probability(-1.0, 1.0),
            Err(QuadratureError::Distribution(_))
        ));
    }

    #[test]
    fn test_method_descriptions() {
        assert!(QuadMethod::Simpson.description().contains("Simpson"));
        assert!(QuadMethod::GaussLegendre.description().contains("Gauss"));
        assert!(QuadMethod::Simpson.is_suitable_for_interval(0.0, 1.0));
        assert!(!QuadMethod::GaussLegendre.is_suitable_for_interval(0.0, f64::INFINITY));
    }
}
