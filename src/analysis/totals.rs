//! Reduction of a component set to its series-equivalent totals.

use crate::components::{Component, ComponentKind};

use super::{DEFAULT_SOURCE_VOLTAGE, RESISTANCE_FLOOR};

/// Lumped series-equivalent values of a component set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesTotals {
    /// Total resistance in ohms, never zero
    pub resistance: f64,
    /// Total inductance in henries
    pub inductance: f64,
    /// Series-combined capacitance in farads; 0 means no capacitance
    pub capacitance: f64,
    /// Peak source amplitude in volts
    pub source_voltage: f64,
}

impl SeriesTotals {
    /// Reduce a component set to its series totals.
    ///
    /// - Resistances add. A sum of exactly zero becomes [`RESISTANCE_FLOOR`].
    /// - Inductances add.
    /// - Capacitors combine by reciprocal sum, skipping non-positive values.
    /// - The source amplitude is taken from the first source. When there is
    ///   none, or its value is zero, [`DEFAULT_SOURCE_VOLTAGE`] is used.
    pub fn from_components(components: &[Component]) -> Self {
        let mut resistance = 0.0;
        let mut inductance = 0.0;
        let mut elastance = 0.0;
        let mut source = None;

        for component in components {
            match component.kind {
                ComponentKind::Resistor => resistance += component.value,
                ComponentKind::Inductor => inductance += component.value,
                ComponentKind::Capacitor => {
                    if component.value > 0.0 {
                        elastance += 1.0 / component.value;
                    }
                }
                ComponentKind::Source => {
                    source.get_or_insert(component.value);
                }
                ComponentKind::Ground => {}
            }
        }

        Self {
            resistance: nonzero_or(resistance, RESISTANCE_FLOOR),
            inductance,
            capacitance: if elastance > 0.0 { 1.0 / elastance } else { 0.0 },
            source_voltage: nonzero_or(source.unwrap_or(0.0), DEFAULT_SOURCE_VOLTAGE),
        }
    }

    /// Check if the loop contains any capacitance.
    pub fn has_capacitance(&self) -> bool {
        self.capacitance > 0.0
    }
}

/// Zero and NaN fall back to `fallback`.
fn nonzero_or(value: f64, fallback: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        fallback
    } else {
        value
    }
}
