use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;
use std::fmt;

/// Error type for invalid t-distribution parameters
#[derive(Debug, Clone, PartialEq)]
pub enum TDistributionError {
    FreedomInvalid(f64),
}

impl fmt::Display for TDistributionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TDistributionError::FreedomInvalid(v) => {
                write!(f, "degrees of freedom must be positive, got {}", v)
            }
        }
    }
}

impl std::error::Error for TDistributionError {}

/// Probability density of the Student's t-distribution with v degrees of
/// freedom:
///
/// pdf(t, v) = G((v+1)/2) / (sqrt(v*pi)*G(v/2)) * (1 + t^2/v)^(-(v+1)/2)
///
/// The two gamma factors overflow f64 already around v = 170, so the whole
/// expression is evaluated as exp of a sum of logarithms. Pure function,
/// caller guarantees v > 0 (see `TDistribution::new` for the validated
/// wrapper).
pub fn t_distribution_pdf(t: f64, v: f64) -> f64 {
    let ln_const = ln_gamma(0.5 * (v + 1.0)) - ln_gamma(0.5 * v) - 0.5 * (v * PI).ln();
    (ln_const - 0.5 * (v + 1.0) * (1.0 + t * t / v).ln()).exp()
}

/// Student's t-distribution with validated degrees of freedom. The constant
/// part of the density depends only on v and is precomputed once.
pub struct TDistribution {
    freedom: f64,
    ln_pdf_const: f64,
}

impl TDistribution {
    pub fn new(freedom: f64) -> Result<TDistribution, TDistributionError> {
        if freedom.is_nan() || freedom <= 0.0 {
            return Err(TDistributionError::FreedomInvalid(freedom));
        }
        let ln_pdf_const =
            ln_gamma(0.5 * (freedom + 1.0)) - ln_gamma(0.5 * freedom) - 0.5 * (freedom * PI).ln();
        Ok(TDistribution {
            freedom,
            ln_pdf_const,
        })
    }

    pub fn freedom(&self) -> f64 {
        self.freedom
    }

    pub fn ln_pdf(&self, t: f64) -> f64 {
        self.ln_pdf_const - 0.5 * (self.freedom + 1.0) * (1.0 + t * t / self.freedom).ln()
    }

    pub fn pdf(&self, t: f64) -> f64 {
        self.ln_pdf(t).exp()
    }
}
