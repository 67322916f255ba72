//! Placeable schematic components.
//!
//! Every component is one of a closed set of lumped elements:
//! - Passive: Resistor (Ω), Inductor (H), Capacitor (F)
//! - Source: sinusoidal voltage source, value is the peak amplitude (V)
//! - Ground: reference marker, carries no value
//!
//! Per-kind defaults (value, unit, label rule) live in one table, see
//! [`ComponentKind::spec`].

mod kind;

pub use kind::{ComponentKind, KindSpec, LabelStyle};

use crate::circuit::{ComponentId, Position};

/// A component placed on the schematic.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub position: Position,
    /// Magnitude in the kind's unit
    pub value: f64,
    /// Display unit, fixed at creation
    pub unit: &'static str,
    /// Human-readable tag, fixed at creation
    pub label: String,
}

impl Component {
    /// Create a component with the kind's default value and unit.
    ///
    /// `same_kind_count` is the number of components of this kind already on
    /// the schematic and drives the label ordinal.
    pub fn new(
        id: ComponentId,
        kind: ComponentKind,
        position: Position,
        same_kind_count: usize,
    ) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            position,
            value: spec.default_value,
            unit: spec.unit,
            label: kind.label_for(same_kind_count),
        }
    }

    /// Check if this component contributes reactance.
    pub fn is_reactive(&self) -> bool {
        matches!(self.kind, ComponentKind::Inductor | ComponentKind::Capacitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_defaults() {
        let c = Component::new(
            ComponentId(4),
            ComponentKind::Capacitor,
            Position { x: 20, y: 40 },
            1,
        );
        assert_eq!(c.label, "C2");
        assert_eq!(c.unit, "F");
        assert_eq!(c.value, 1e-5);
        assert!(c.is_reactive());

        let r = Component::new(ComponentId(5), ComponentKind::Resistor, Position::default(), 0);
        assert!(!r.is_reactive());
    }
}
