//! Steady-state metrics at a single drive frequency.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use log::trace;

use crate::components::Component;

use super::{
    angular_frequency, normalize_frequency, AnalyzerConfig, CapacitorlessPolicy, SeriesTotals,
    OPEN_CIRCUIT_REACTANCE,
};

/// Reactances, impedance and current of a series loop at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Drive frequency in Hz, after normalisation
    pub frequency_hz: f64,
    /// Inductive reactance Xl in ohms
    pub inductive_reactance: f64,
    /// Capacitive reactance Xc in ohms
    pub capacitive_reactance: f64,
    /// Impedance magnitude |Z| in ohms
    pub impedance: f64,
    /// Phase of Z in radians; positive is inductive (current lags)
    pub phase_rad: f64,
    /// Peak loop current in amperes
    pub peak_current: f64,
}

impl OperatingPoint {
    /// Solve the loop described by `totals` at `frequency_hz`.
    pub fn solve(totals: &SeriesTotals, frequency_hz: f64, policy: CapacitorlessPolicy) -> Self {
        let frequency_hz = normalize_frequency(frequency_hz);
        let omega = angular_frequency(frequency_hz);

        let inductive_reactance = omega * totals.inductance;
        let capacitive_reactance = if totals.has_capacitance() {
            1.0 / (omega * totals.capacitance)
        } else {
            match policy {
                CapacitorlessPolicy::OpenCircuit => OPEN_CIRCUIT_REACTANCE,
                CapacitorlessPolicy::Bypass => 0.0,
            }
        };

        let reactance = inductive_reactance - capacitive_reactance;
        let impedance = totals.resistance.hypot(reactance);
        let phase_rad = reactance.atan2(totals.resistance);

        Self {
            frequency_hz,
            inductive_reactance,
            capacitive_reactance,
            impedance,
            phase_rad,
            peak_current: totals.source_voltage / impedance,
        }
    }

    /// Net reactance X = Xl - Xc.
    pub fn reactance(&self) -> f64 {
        self.inductive_reactance - self.capacitive_reactance
    }

    pub fn phase_deg(&self) -> f64 {
        self.phase_rad.to_degrees()
    }
}

/// The full metrics record for a component set at a drive frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitMetrics {
    /// Drive frequency in Hz
    pub frequency_hz: f64,
    /// Total series resistance (Ω)
    pub resistance: f64,
    /// Total series inductance (H)
    pub inductance: f64,
    /// Series-combined capacitance (F); 0 when there is none
    pub capacitance: f64,
    /// Xl (Ω)
    pub inductive_reactance: f64,
    /// Xc (Ω)
    pub capacitive_reactance: f64,
    /// |Z| (Ω)
    pub impedance: f64,
    pub phase_rad: f64,
    pub phase_deg: f64,
    /// Peak current (A)
    pub peak_current: f64,
    /// Resonance frequency (Hz); exactly 0 without both L and C
    pub resonance_hz: f64,
    /// Peak source amplitude (V)
    pub source_voltage: f64,
}

impl CircuitMetrics {
    /// Combine series totals with the operating point at one frequency.
    pub fn from_parts(totals: &SeriesTotals, point: &OperatingPoint) -> Self {
        Self {
            frequency_hz: point.frequency_hz,
            resistance: totals.resistance,
            inductance: totals.inductance,
            capacitance: totals.capacitance,
            inductive_reactance: point.inductive_reactance,
            capacitive_reactance: point.capacitive_reactance,
            impedance: point.impedance,
            phase_rad: point.phase_rad,
            phase_deg: point.phase_deg(),
            peak_current: point.peak_current,
            resonance_hz: resonance_frequency(totals),
            source_voltage: totals.source_voltage,
        }
    }

    /// Net reactance X = Xl - Xc (Ω).
    pub fn reactance(&self) -> f64 {
        self.inductive_reactance - self.capacitive_reactance
    }

    /// RMS source voltage of the sinusoidal drive.
    pub fn rms_voltage(&self) -> f64 {
        self.source_voltage * FRAC_1_SQRT_2
    }

    /// RMS loop current.
    pub fn rms_current(&self) -> f64 {
        self.peak_current * FRAC_1_SQRT_2
    }

    /// Current lags voltage.
    pub fn is_inductive(&self) -> bool {
        self.phase_rad > 0.0
    }

    /// Current leads voltage.
    pub fn is_capacitive(&self) -> bool {
        self.phase_rad < 0.0
    }

    /// Check if the loop has a resonance.
    pub fn has_resonance(&self) -> bool {
        self.resonance_hz > 0.0
    }

    /// The resonance frequency rounded to a whole hertz, as used when locking
    /// the drive to resonance.
    pub fn resonance_lock_hz(&self) -> f64 {
        self.resonance_hz.round()
    }
}

/// f0 = 1 / (2π√(LC)) when both L and C are positive, otherwise exactly 0.
fn resonance_frequency(totals: &SeriesTotals) -> f64 {
    if totals.inductance > 0.0 && totals.capacitance > 0.0 {
        1.0 / (2.0 * PI * (totals.inductance * totals.capacitance).sqrt())
    } else {
        0.0
    }
}

/// Compute the metrics record with the default configuration.
pub fn compute_metrics(components: &[Component], frequency_hz: f64) -> CircuitMetrics {
    compute_metrics_with(components, frequency_hz, &AnalyzerConfig::default())
}

/// Compute the metrics record for `components` driven at `frequency_hz`.
///
/// Never fails. Frequencies outside the engine's domain are normalised, see
/// [`normalize_frequency`](super::normalize_frequency).
pub fn compute_metrics_with(
    components: &[Component],
    frequency_hz: f64,
    config: &AnalyzerConfig,
) -> CircuitMetrics {
    let totals = SeriesTotals::from_components(components);
    let point = OperatingPoint::solve(&totals, frequency_hz, config.capacitorless);
    let metrics = CircuitMetrics::from_parts(&totals, &point);
    trace!(
        "metrics @ {} Hz: |Z|={:.4e} Ω, phase={:.3}°, I={:.4e} A, f0={:.3} Hz",
        metrics.frequency_hz,
        metrics.impedance,
        metrics.phase_deg,
        metrics.peak_current,
        metrics.resonance_hz
    );
    metrics
}
