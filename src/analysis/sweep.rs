//! Sampled frequency response for charting.

use std::iter::FusedIterator;

use crate::components::Component;

use super::{AnalyzerConfig, CapacitorlessPolicy, OperatingPoint, SeriesTotals};

/// Upper bound on the number of points a sweep yields.
pub const MAX_SWEEP_SAMPLES: usize = 100_000;

/// Linear frequency grid: `start_hz, start_hz + step_hz, ...` up to and
/// including `stop_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start_hz: f64,
    pub stop_hz: f64,
    pub step_hz: f64,
}

impl Default for SweepRange {
    /// 1 Hz to 1000 Hz in 10 Hz steps: 1, 11, ..., 991.
    fn default() -> Self {
        Self {
            start_hz: 1.0,
            stop_hz: 1000.0,
            step_hz: 10.0,
        }
    }
}

impl SweepRange {
    pub fn new(start_hz: f64, stop_hz: f64, step_hz: f64) -> Self {
        Self {
            start_hz,
            stop_hz,
            step_hz,
        }
    }

    /// Number of grid points. Zero for an inverted range or a step that is
    /// not a positive finite number; at most [`MAX_SWEEP_SAMPLES`].
    pub fn len(&self) -> usize {
        let valid = self.step_hz.is_finite()
            && self.step_hz > 0.0
            && self.start_hz.is_finite()
            && self.stop_hz.is_finite()
            && self.stop_hz >= self.start_hz;
        if !valid {
            return 0;
        }
        let steps = ((self.stop_hz - self.start_hz) / self.step_hz).floor();
        if !steps.is_finite() || steps >= MAX_SWEEP_SAMPLES as f64 {
            return MAX_SWEEP_SAMPLES;
        }
        (steps as usize).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frequency of the `index`-th grid point.
    pub fn frequency_at(&self, index: usize) -> f64 {
        self.start_hz + self.step_hz * index as f64
    }
}

/// One row of the frequency-response table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySample {
    pub frequency_hz: f64,
    /// Peak current in milliamperes
    pub current_ma: f64,
    /// |Z| in ohms
    pub impedance: f64,
    pub phase_deg: f64,
}

/// Lazily evaluated frequency response of a fixed component set.
///
/// The series totals are reduced once at construction and held fixed while
/// the drive frequency is swept. The iterator is cheap to clone, and a clone
/// taken before iteration replays the same samples.
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    totals: SeriesTotals,
    policy: CapacitorlessPolicy,
    range: SweepRange,
    next: usize,
    len: usize,
}

impl FrequencyResponse {
    /// Sweep `components` over the default range with the default policy.
    pub fn new(components: &[Component]) -> Self {
        Self::with_config(components, &AnalyzerConfig::default())
    }

    /// Sweep `components` over the configured range with the configured policy.
    pub fn with_config(components: &[Component], config: &AnalyzerConfig) -> Self {
        Self::from_totals(
            SeriesTotals::from_components(components),
            config.capacitorless,
            config.sweep,
        )
    }

    /// Sweep precomputed series totals.
    pub fn from_totals(
        totals: SeriesTotals,
        policy: CapacitorlessPolicy,
        range: SweepRange,
    ) -> Self {
        Self {
            totals,
            policy,
            range,
            next: 0,
            len: range.len(),
        }
    }

    /// The totals held fixed during the sweep.
    pub fn totals(&self) -> &SeriesTotals {
        &self.totals
    }

    fn sample(&self, index: usize) -> FrequencySample {
        let frequency_hz = self.range.frequency_at(index);
        let point = OperatingPoint::solve(&self.totals, frequency_hz, self.policy);
        FrequencySample {
            frequency_hz,
            current_ma: point.peak_current * 1000.0,
            impedance: point.impedance,
            phase_deg: point.phase_deg(),
        }
    }
}

impl Iterator for FrequencyResponse {
    type Item = FrequencySample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let sample = self.sample(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrequencyResponse {}

impl FusedIterator for FrequencyResponse {}

/// Frequency response of `components` over 1..=1000 Hz in 10 Hz steps.
pub fn sample_frequency_response(components: &[Component]) -> FrequencyResponse {
    FrequencyResponse::new(components)
}
