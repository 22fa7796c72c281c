//! Reduction of raw counts into probability estimates.

use std::fmt;

use serde::Serialize;

use crate::SimError;

/// Two-sided z-score for a 95% normal confidence interval.
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Returns `count / total`.
///
/// A zero `total` is an error rather than NaN. `count == total` yields
/// exactly `1.0` and `count == 0` exactly `0.0`.
pub fn to_fraction(count: u64, total: u64) -> Result<f64, SimError> {
    if total == 0 {
        return Err(SimError::UndefinedEstimate {
            estimate: "fraction",
            reason: "total is zero",
        });
    }
    debug_assert!(count <= total, "count {count} exceeds total {total}");
    Ok(count as f64 / total as f64)
}

/// Fraction of diagnosed people who are actually sick.
pub fn precision(num_sick: u64, num_diagnosed: u64) -> Result<Estimate, SimError> {
    if num_diagnosed == 0 {
        return Err(SimError::UndefinedEstimate {
            estimate: "precision",
            reason: "no diagnosed cases",
        });
    }
    Estimate::from_counts(num_sick, num_diagnosed)
}

/// Monte Carlo estimate of a probability together with its sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    value: f64,
    samples: u64,
}

impl Estimate {
    /// Estimate from `count` successes out of `total` samples.
    pub fn from_counts(count: u64, total: u64) -> Result<Self, SimError> {
        Ok(Self {
            value: to_fraction(count, total)?,
            samples: total,
        })
    }

    /// Point estimate in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of samples the estimate was derived from.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Binomial standard error `sqrt(p(1-p)/n)`.
    pub fn standard_error(&self) -> f64 {
        (self.value * (1.0 - self.value) / self.samples as f64).sqrt()
    }

    /// Normal-approximation interval `p ± z·se`, clamped to `[0, 1]`.
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let margin = z * self.standard_error();
        (
            (self.value - margin).max(0.0),
            (self.value + margin).min(1.0),
        )
    }

    /// 95% confidence interval.
    pub fn confidence_95(&self) -> (f64, f64) {
        self.confidence_interval(Z_95)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} ± {:.4}", self.value, Z_95 * self.standard_error())
    }
}
