//! Steady-state AC metrics engine.
//!
//! Every placed component is treated as part of a single series loop driven
//! by the first voltage source, regardless of how the schematic is wired.
//! Under that model the circuit reduces to four lumped totals:
//!
//! ```text
//! R  = Σ R_i                    (floored at RESISTANCE_FLOOR)
//! L  = Σ L_i
//! C  = 1 / Σ (1 / C_i)          (0 when there is no capacitance)
//! V  = peak of the first source (DEFAULT_SOURCE_VOLTAGE when absent)
//! ```
//!
//! and, at a drive frequency f with ω = 2πf:
//!
//! ```text
//! Xl = ωL      Xc = 1/(ωC)      X = Xl - Xc
//! |Z| = √(R² + X²)   φ = atan2(X, R)   I = V / |Z|
//! f0 = 1 / (2π √(LC))
//! ```
//!
//! All functions here are pure and total: degenerate inputs are normalised
//! so that results stay finite.

mod analyzer;
mod metrics;
mod sweep;
mod totals;

pub use analyzer::{Analyzer, AnalyzerConfig, CapacitorlessPolicy};
pub use metrics::{compute_metrics, compute_metrics_with, CircuitMetrics, OperatingPoint};
pub use sweep::{
    sample_frequency_response, FrequencyResponse, FrequencySample, SweepRange, MAX_SWEEP_SAMPLES,
};
pub use totals::SeriesTotals;

use std::f64::consts::PI;

use crate::MIN_DRIVE_FREQUENCY_HZ;

/// Series resistance substituted when the resistor sum is exactly zero.
pub const RESISTANCE_FLOOR: f64 = 1e-6;

/// Capacitive reactance used when there is no capacitance in the loop.
pub const OPEN_CIRCUIT_REACTANCE: f64 = 1e12;

/// Source amplitude assumed when no source is placed.
pub const DEFAULT_SOURCE_VOLTAGE: f64 = 10.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Map a drive frequency onto the engine's domain.
///
/// Non-finite and non-positive frequencies become [`MIN_DRIVE_FREQUENCY_HZ`].
#[inline]
pub fn normalize_frequency(hz: f64) -> f64 {
    if hz.is_finite() && hz > 0.0 {
        hz
    } else {
        MIN_DRIVE_FREQUENCY_HZ
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_angular_frequency() {
        assert_relative_eq!(angular_frequency(60.0), 376.991_118_430_775_2, max_relative = 1e-12);
    }

    #[test]
    fn test_normalize_frequency() {
        assert_eq!(normalize_frequency(60.0), 60.0);
        assert_eq!(normalize_frequency(0.0), MIN_DRIVE_FREQUENCY_HZ);
        assert_eq!(normalize_frequency(-5.0), MIN_DRIVE_FREQUENCY_HZ);
        assert_eq!(normalize_frequency(f64::NAN), MIN_DRIVE_FREQUENCY_HZ);
        assert_eq!(normalize_frequency(f64::INFINITY), MIN_DRIVE_FREQUENCY_HZ);
    }
}
