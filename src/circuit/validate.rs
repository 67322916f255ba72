//! Schematic integrity checks.

use std::collections::HashSet;

use crate::error::{CircuitError, Result};

use super::{Schematic, Selection};

/// Verify that a schematic satisfies its structural invariants.
///
/// Checks:
/// - Component ids and wire ids are unique
/// - Every wire endpoint references a present component
/// - No wire joins a component to itself
/// - No two wires join the same pair of endpoints
/// - Selection and pending wire origin reference live items
pub fn check_integrity(schematic: &Schematic) -> Result<()> {
    let mut component_ids = HashSet::new();
    for component in schematic.components() {
        if !component_ids.insert(component.id) {
            return Err(CircuitError::integrity(format!(
                "component id {} appears twice",
                component.id
            )));
        }
    }

    let mut wire_ids = HashSet::new();
    for (index, wire) in schematic.wires().iter().enumerate() {
        if !wire_ids.insert(wire.id) {
            return Err(CircuitError::integrity(format!(
                "wire id {} appears twice",
                wire.id
            )));
        }
        for end in [wire.from, wire.to] {
            if !component_ids.contains(&end.component) {
                return Err(CircuitError::integrity(format!(
                    "wire {} references missing component {}",
                    wire.id, end.component
                )));
            }
        }
        if wire.from.component == wire.to.component {
            return Err(CircuitError::integrity(format!(
                "wire {} joins {} to itself",
                wire.id, wire.from.component
            )));
        }
        if let Some(other) = schematic.wires()[..index]
            .iter()
            .find(|w| w.joins(wire.from, wire.to))
        {
            return Err(CircuitError::integrity(format!(
                "wires {} and {} join the same terminals",
                other.id, wire.id
            )));
        }
    }

    match schematic.selection() {
        Selection::Component(id) if !component_ids.contains(&id) => {
            return Err(CircuitError::integrity(format!(
                "selected component {} is not present",
                id
            )));
        }
        Selection::Wire(id) if !wire_ids.contains(&id) => {
            return Err(CircuitError::integrity(format!(
                "selected wire {} is not present",
                id
            )));
        }
        _ => {}
    }

    if let Some(origin) = schematic.pending_wire() {
        if !component_ids.contains(&origin.component) {
            return Err(CircuitError::integrity(format!(
                "pending wire starts on missing component {}",
                origin.component
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ComponentId, Endpoint, Position, Terminal, Wire, WireId};
    use crate::components::{Component, ComponentKind};

    fn resistor(id: u64) -> Component {
        Component::new(ComponentId(id), ComponentKind::Resistor, Position::default(), 0)
    }

    fn wire(id: u64, from: u64, to: u64) -> Wire {
        Wire {
            id: WireId(id),
            from: Endpoint::new(ComponentId(from), Terminal::Right),
            to: Endpoint::new(ComponentId(to), Terminal::Left),
        }
    }

    fn violation(s: &Schematic) -> String {
        match check_integrity(s) {
            Err(CircuitError::IntegrityViolation { message }) => message,
            other => panic!("expected an integrity violation, got {:?}", other),
        }
    }

    #[test]
    fn test_integrity_holds_through_edits() {
        let mut s = Schematic::new();
        let r = s.add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        let c = s.add_component(ComponentKind::Capacitor, 40.0, 0.0).id;
        let v = s.add_component(ComponentKind::Source, 80.0, 0.0).id;
        s.connect(r, Terminal::Right, c, Terminal::Left);
        s.connect(c, Terminal::Right, v, Terminal::Left);
        s.connect(v, Terminal::Right, r, Terminal::Left);
        s.select_component(c);
        s.click_terminal(v, Terminal::Left);
        check_integrity(&s).unwrap();

        s.delete_component(c);
        check_integrity(&s).unwrap();
        assert_eq!(s.wires().len(), 1);

        s.clear();
        check_integrity(&s).unwrap();
    }

    #[test]
    fn test_integrity_violations() {
        let parts = |components, wires| {
            Schematic::from_raw_parts(components, wires, Selection::Nothing, None)
        };

        let s = parts(vec![resistor(0), resistor(0)], vec![]);
        assert!(violation(&s).contains("component id c0 appears twice"));

        let s = parts(vec![resistor(0), resistor(1)], vec![wire(0, 0, 1), wire(0, 1, 0)]);
        assert!(violation(&s).contains("wire id w0 appears twice"));

        let s = parts(vec![resistor(0)], vec![wire(0, 0, 9)]);
        assert!(violation(&s).contains("missing component c9"));

        let s = parts(vec![resistor(0)], vec![wire(0, 0, 0)]);
        assert!(violation(&s).contains("to itself"));

        let original = wire(0, 0, 1);
        let reversed = Wire {
            id: WireId(1),
            from: original.to,
            to: original.from,
        };
        let s = parts(vec![resistor(0), resistor(1)], vec![original, reversed]);
        assert!(violation(&s).contains("join the same terminals"));

        let s = Schematic::from_raw_parts(
            vec![resistor(0)],
            vec![],
            Selection::Component(ComponentId(3)),
            None,
        );
        assert!(violation(&s).contains("selected component c3"));

        let s = Schematic::from_raw_parts(
            vec![resistor(0)],
            vec![],
            Selection::Wire(WireId(2)),
            None,
        );
        assert!(violation(&s).contains("selected wire w2"));

        let s = Schematic::from_raw_parts(
            vec![resistor(0)],
            vec![],
            Selection::Nothing,
            Some(Endpoint::new(ComponentId(5), Terminal::Left)),
        );
        assert!(violation(&s).contains("pending wire starts on missing component c5"));
    }
}
