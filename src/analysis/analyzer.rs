//! Stateful workbench tying a schematic to a drive frequency.

use log::debug;

use crate::circuit::Schematic;
use crate::{DEFAULT_FREQUENCY_HZ, MAX_DRIVE_FREQUENCY_HZ, MIN_DRIVE_FREQUENCY_HZ};

use super::{compute_metrics_with, CircuitMetrics, FrequencyResponse, SweepRange};

/// How capacitive reactance is defined when the loop has no capacitance.
///
/// The analyzer historically reported the open-circuit sentinel even when no
/// capacitor was placed at all, so a pure R or R-L loop shows an impedance of
/// roughly 1e12 Ω. That behaviour is the default. `Bypass` instead treats a
/// missing capacitor as a short (Xc = 0), which is what a textbook series
/// R or RL circuit would give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacitorlessPolicy {
    /// Xc = 1e12 Ω when there is no capacitance
    #[default]
    OpenCircuit,
    /// Xc = 0 when there is no capacitance
    Bypass,
}

impl CapacitorlessPolicy {
    /// Parse a policy name (`open` / `bypass`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "open" | "open_circuit" => Some(Self::OpenCircuit),
            "bypass" | "short" => Some(Self::Bypass),
            _ => None,
        }
    }
}

/// Configuration for the analyzer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    /// Reactance rule for loops without capacitance.
    pub capacitorless: CapacitorlessPolicy,
    /// Frequencies sampled by the frequency response.
    pub sweep: SweepRange,
}

impl AnalyzerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacitorless reactance policy.
    pub fn with_capacitorless(mut self, policy: CapacitorlessPolicy) -> Self {
        self.capacitorless = policy;
        self
    }

    /// Set the frequency-response sweep range.
    pub fn with_sweep(mut self, sweep: SweepRange) -> Self {
        self.sweep = sweep;
        self
    }
}

/// The editing session a presentation layer drives.
///
/// Owns the schematic, the user-adjustable drive frequency and the engine
/// configuration. Metrics are recomputed from scratch on every call, so they
/// always reflect the latest mutation.
#[derive(Debug, Clone)]
pub struct Analyzer {
    schematic: Schematic,
    frequency_hz: f64,
    config: AnalyzerConfig,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with an empty schematic and default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            schematic: Schematic::new(),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            config,
        }
    }

    pub fn schematic(&self) -> &Schematic {
        &self.schematic
    }

    pub fn schematic_mut(&mut self) -> &mut Schematic {
        &mut self.schematic
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    /// The current drive frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency_hz
    }

    /// Set the drive frequency, clamped to the supported drive range.
    ///
    /// NaN is ignored. Returns the frequency actually applied.
    pub fn set_frequency(&mut self, hz: f64) -> f64 {
        if !hz.is_nan() {
            self.frequency_hz = hz.clamp(MIN_DRIVE_FREQUENCY_HZ, MAX_DRIVE_FREQUENCY_HZ);
            debug!("drive frequency set to {} Hz", self.frequency_hz);
        }
        self.frequency_hz
    }

    /// Return the drive frequency to its default.
    pub fn reset_frequency(&mut self) -> f64 {
        self.set_frequency(DEFAULT_FREQUENCY_HZ)
    }

    /// Drive the circuit at its resonance frequency rounded to a whole hertz.
    ///
    /// Without a resonance the frequency falls to the bottom of the range.
    pub fn lock_resonance(&mut self) -> f64 {
        let target = self.metrics().resonance_lock_hz();
        self.set_frequency(target)
    }

    /// Check if the drive frequency sits on the rounded resonance frequency.
    pub fn is_locked_to_resonance(&self) -> bool {
        let metrics = self.metrics();
        metrics.has_resonance() && self.frequency_hz == metrics.resonance_lock_hz()
    }

    /// Metrics of the current schematic at the current drive frequency.
    pub fn metrics(&self) -> CircuitMetrics {
        compute_metrics_with(self.schematic.components(), self.frequency_hz, &self.config)
    }

    /// Frequency response of the current schematic over the configured sweep.
    pub fn frequency_response(&self) -> FrequencyResponse {
        FrequencyResponse::with_config(self.schematic.components(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    #[test]
    fn test_frequency_clamped() {
        let mut a = Analyzer::new();
        assert_eq!(a.frequency(), 60.0);
        assert_eq!(a.set_frequency(5000.0), 1000.0);
        assert_eq!(a.set_frequency(0.0), 1.0);
        assert_eq!(a.set_frequency(f64::NAN), 1.0);
        assert_eq!(a.set_frequency(440.0), 440.0);
        assert_eq!(a.reset_frequency(), 60.0);
    }

    #[test]
    fn test_metrics_follow_mutations() {
        let mut a = Analyzer::new();
        let r = a.schematic_mut().add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        a.schematic_mut().add_component(ComponentKind::Capacitor, 40.0, 0.0);
        assert_eq!(a.metrics().resistance, 220.0);

        a.schematic_mut().set_component_value(r, 1000.0);
        assert_eq!(a.metrics().resistance, 1000.0);

        a.schematic_mut().delete_component(r);
        assert_eq!(a.metrics().resistance, crate::analysis::RESISTANCE_FLOOR);
    }

    #[test]
    fn test_lock_resonance() {
        let mut a = Analyzer::new();
        a.schematic_mut().add_component(ComponentKind::Inductor, 0.0, 0.0);
        a.schematic_mut().add_component(ComponentKind::Capacitor, 0.0, 0.0);
        // 0.1 H with 10 µF resonates near 159.15 Hz.
        assert!(!a.is_locked_to_resonance());
        assert_eq!(a.lock_resonance(), 159.0);
        assert!(a.is_locked_to_resonance());
    }

    #[test]
    fn test_lock_without_resonance() {
        let mut a = Analyzer::new();
        a.schematic_mut().add_component(ComponentKind::Resistor, 0.0, 0.0);
        assert_eq!(a.lock_resonance(), MIN_DRIVE_FREQUENCY_HZ);
        assert!(!a.is_locked_to_resonance());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::new()
            .with_capacitorless(CapacitorlessPolicy::Bypass)
            .with_sweep(SweepRange::new(10.0, 100.0, 5.0));
        let mut a = Analyzer::with_config(config);
        a.schematic_mut().add_component(ComponentKind::Resistor, 0.0, 0.0);
        assert_eq!(a.metrics().impedance, 220.0);
        assert_eq!(a.frequency_response().len(), 19);
        assert_eq!(CapacitorlessPolicy::from_name("OPEN"), Some(CapacitorlessPolicy::OpenCircuit));
        assert_eq!(CapacitorlessPolicy::from_name("nope"), None);
    }
}
