//! Schematic graph structure.

use log::{debug, warn};

use super::selection::Selection;
use super::types::{ComponentId, Endpoint, Position, Terminal, Wire, WireId};
use crate::components::{Component, ComponentKind};

/// The authoritative set of placed components and the wires between them,
/// together with the editor's selection and wiring-in-progress state.
///
/// Every mutation keeps these invariants:
/// - component and wire ids are unique and never reused
/// - every wire endpoint references a component that is present
/// - no two wires join the same unordered pair of endpoints
/// - no wire joins a component to itself
/// - the selection and pending wire origin reference live items only
#[derive(Debug, Clone, Default)]
pub struct Schematic {
    /// Placed components, in placement order
    components: Vec<Component>,

    /// Wires, in creation order
    wires: Vec<Wire>,

    /// Selected component or wire
    selection: Selection,

    /// First terminal clicked while drawing a wire
    pending_wire: Option<Endpoint>,

    next_component_id: u64,
    next_wire_id: u64,
}

impl Schematic {
    /// Create an empty schematic.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Component mutations ============

    /// Place a new component of `kind` at the grid point nearest `(x, y)`.
    ///
    /// The component receives the kind's default value and unit, and a label
    /// numbered after the components of the same kind already present.
    pub fn add_component(&mut self, kind: ComponentKind, x: f64, y: f64) -> &Component {
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;

        let same_kind = self.components_by_kind(kind).count();
        let component = Component::new(id, kind, Position::snapped(x, y), same_kind);
        debug!(
            "placed {} {} ({}) at ({}, {})",
            kind, component.label, id, component.position.x, component.position.y
        );

        self.components.push(component);
        &self.components[self.components.len() - 1]
    }

    /// Move a component to the grid point nearest `(x, y)`.
    ///
    /// Returns `false` if no component has this id.
    pub fn move_component(&mut self, id: ComponentId, x: f64, y: f64) -> bool {
        match self.find_component_mut(id) {
            Some(component) => {
                component.position = Position::snapped(x, y);
                true
            }
            None => {
                debug!("move ignored: no component {}", id);
                false
            }
        }
    }

    /// Replace a component's value.
    ///
    /// Non-finite values are rejected and leave the schematic unchanged, as
    /// are unknown ids. Returns whether the value was applied.
    pub fn set_component_value(&mut self, id: ComponentId, value: f64) -> bool {
        if !value.is_finite() {
            warn!("rejected non-finite value {} for {}", value, id);
            return false;
        }
        match self.find_component_mut(id) {
            Some(component) => {
                component.value = value;
                true
            }
            None => {
                debug!("value edit ignored: no component {}", id);
                false
            }
        }
    }

    /// Remove a component and every wire attached to it.
    ///
    /// Selection and the pending wire origin are cleared when they refer to
    /// anything removed. Returns `false` if no component has this id.
    pub fn delete_component(&mut self, id: ComponentId) -> bool {
        let Some(index) = self.components.iter().position(|c| c.id == id) else {
            debug!("delete ignored: no component {}", id);
            return false;
        };
        self.components.remove(index);

        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(id));
        debug!(
            "deleted component {} and {} attached wire(s)",
            id,
            before - self.wires.len()
        );

        match self.selection {
            Selection::Component(selected) if selected == id => {
                self.selection = Selection::Nothing;
            }
            Selection::Wire(selected) if self.find_wire(selected).is_none() => {
                self.selection = Selection::Nothing;
            }
            _ => {}
        }
        if self.pending_wire.is_some_and(|p| p.component == id) {
            self.pending_wire = None;
        }
        true
    }

    // ============ Wire mutations ============

    /// Draw a wire from `(id1, terminal1)` to `(id2, terminal2)`.
    ///
    /// Returns `None` without changing anything when the two ends are on the
    /// same component, when either component is missing, or when an
    /// equivalent wire already exists in either direction.
    pub fn connect(
        &mut self,
        id1: ComponentId,
        terminal1: Terminal,
        id2: ComponentId,
        terminal2: Terminal,
    ) -> Option<&Wire> {
        if id1 == id2 {
            debug!("connect ignored: {} cannot be wired to itself", id1);
            return None;
        }
        if self.find_component(id1).is_none() || self.find_component(id2).is_none() {
            debug!("connect ignored: {} or {} not present", id1, id2);
            return None;
        }

        let from = Endpoint::new(id1, terminal1);
        let to = Endpoint::new(id2, terminal2);
        if self.wires.iter().any(|w| w.joins(from, to)) {
            debug!("connect ignored: {} and {} already wired", from, to);
            return None;
        }

        let id = WireId(self.next_wire_id);
        self.next_wire_id += 1;
        debug!("wired {} -> {} ({})", from, to, id);

        self.wires.push(Wire { id, from, to });
        self.wires.last()
    }

    /// Remove a wire. Returns `false` if no wire has this id.
    pub fn delete_wire(&mut self, id: WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|w| w.id != id);
        if self.wires.len() == before {
            debug!("delete ignored: no wire {}", id);
            return false;
        }
        if self.selection == Selection::Wire(id) {
            self.selection = Selection::Nothing;
        }
        true
    }

    /// Remove every component and wire and reset the editor state.
    ///
    /// Id counters keep running, so ids issued before the clear are never
    /// handed out again.
    pub fn clear(&mut self) {
        debug!(
            "cleared {} component(s) and {} wire(s)",
            self.components.len(),
            self.wires.len()
        );
        self.components.clear();
        self.wires.clear();
        self.selection = Selection::Nothing;
        self.pending_wire = None;
    }

    // ============ Editor state ============

    /// Select a component, dropping any wire selection.
    pub fn select_component(&mut self, id: ComponentId) -> bool {
        if self.find_component(id).is_none() {
            return false;
        }
        self.selection = Selection::Component(id);
        true
    }

    /// Select a wire, dropping any component selection.
    pub fn select_wire(&mut self, id: WireId) -> bool {
        if self.find_wire(id).is_none() {
            return false;
        }
        self.selection = Selection::Wire(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::Nothing;
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Delete whatever is selected. Returns `false` if nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Selection::Component(id) => self.delete_component(id),
            Selection::Wire(id) => self.delete_wire(id),
            Selection::Nothing => false,
        }
    }

    /// Handle a click on a component terminal while wiring.
    ///
    /// The first click records the pending origin. The second click tries to
    /// connect the origin to the clicked terminal and always ends the wiring
    /// gesture. Returns the id of a newly created wire.
    pub fn click_terminal(&mut self, id: ComponentId, terminal: Terminal) -> Option<WireId> {
        if self.find_component(id).is_none() {
            return None;
        }
        match self.pending_wire.take() {
            None => {
                self.pending_wire = Some(Endpoint::new(id, terminal));
                None
            }
            Some(origin) => self
                .connect(origin.component, origin.terminal, id, terminal)
                .map(|w| w.id),
        }
    }

    /// Abandon a wire in progress.
    pub fn cancel_wiring(&mut self) {
        self.pending_wire = None;
    }

    /// The first terminal of a wire in progress.
    pub fn pending_wire(&self) -> Option<Endpoint> {
        self.pending_wire
    }

    // ============ Queries ============

    /// All components, in placement order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All wires, in creation order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Components of one kind, in placement order.
    pub fn components_by_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    /// Find a component by id.
    pub fn find_component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Find a wire by id.
    pub fn find_wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    /// Wires with at least one end on `id`.
    pub fn wires_of(&self, id: ComponentId) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(move |w| w.touches(id))
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Assemble a schematic from raw parts, bypassing every mutation check.
    #[cfg(test)]
    pub(crate) fn from_raw_parts(
        components: Vec<Component>,
        wires: Vec<Wire>,
        selection: Selection,
        pending_wire: Option<Endpoint>,
    ) -> Self {
        Self {
            next_component_id: components.len() as u64,
            next_wire_id: wires.len() as u64,
            components,
            wires,
            selection,
            pending_wire,
        }
    }

    fn find_component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Schematic, ComponentId, ComponentId) {
        let mut s = Schematic::new();
        let a = s.add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        let b = s.add_component(ComponentKind::Capacitor, 100.0, 0.0).id;
        (s, a, b)
    }

    #[test]
    fn test_add_component_snaps_and_labels() {
        let mut s = Schematic::new();
        let r1 = s.add_component(ComponentKind::Resistor, 33.0, 47.0).clone();
        assert_eq!(r1.position, Position { x: 40, y: 40 });
        assert_eq!(r1.label, "R1");
        assert_eq!(r1.value, 220.0);
        assert_eq!(r1.unit, "Ω");

        let r2 = s.add_component(ComponentKind::Resistor, 0.0, 0.0).clone();
        assert_eq!(r2.label, "R2");
        assert_ne!(r1.id, r2.id);

        let src = s.add_component(ComponentKind::Source, 0.0, 0.0).clone();
        assert_eq!(src.label, "SOURCE");
        assert_eq!(s.components_by_kind(ComponentKind::Resistor).count(), 2);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut s = Schematic::new();
        let a = s.add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        s.delete_component(a);
        let b = s.add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        assert_ne!(a, b);
        s.clear();
        let c = s.add_component(ComponentKind::Resistor, 0.0, 0.0).id;
        assert!(c > b);
    }

    #[test]
    fn test_label_counts_present_components_only() {
        let mut s = Schematic::new();
        let first = s.add_component(ComponentKind::Inductor, 0.0, 0.0).id;
        s.add_component(ComponentKind::Inductor, 0.0, 0.0);
        s.delete_component(first);
        let third = s.add_component(ComponentKind::Inductor, 0.0, 0.0);
        assert_eq!(third.label, "L2");
    }

    #[test]
    fn test_move_component() {
        let (mut s, a, _) = pair();
        assert!(s.move_component(a, 51.0, 69.0));
        assert_eq!(s.find_component(a).unwrap().position, Position { x: 60, y: 60 });
        assert!(!s.move_component(ComponentId(999), 0.0, 0.0));
    }

    #[test]
    fn test_set_value_rejects_non_finite() {
        let (mut s, a, _) = pair();
        assert!(s.set_component_value(a, 470.0));
        assert!(!s.set_component_value(a, f64::NAN));
        assert!(!s.set_component_value(a, f64::INFINITY));
        assert_eq!(s.find_component(a).unwrap().value, 470.0);
        assert!(!s.set_component_value(ComponentId(999), 1.0));
    }

    #[test]
    fn test_delete_cascades_to_wires() {
        let (mut s, a, b) = pair();
        let wire = s.connect(a, Terminal::Left, b, Terminal::Right).unwrap().id;
        assert!(s.delete_component(a));
        assert!(s.find_component(a).is_none());
        assert!(s.find_wire(wire).is_none());
        assert!(s.wires().is_empty());
        assert!(s.find_component(b).is_some());
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut s, a, b) = pair();
        let wire = s.connect(a, Terminal::Right, b, Terminal::Left).unwrap().id;

        s.select_component(a);
        s.delete_component(a);
        assert_eq!(s.selection(), Selection::Nothing);

        let c = s.add_component(ComponentKind::Inductor, 0.0, 0.0).id;
        let wire2 = s.connect(b, Terminal::Right, c, Terminal::Left).unwrap().id;
        assert_ne!(wire, wire2);
        s.select_wire(wire2);
        s.delete_component(c);
        assert_eq!(s.selection(), Selection::Nothing);
    }

    #[test]
    fn test_duplicate_connection_rejected() {
        let (mut s, a, b) = pair();
        assert!(s.connect(a, Terminal::Left, b, Terminal::Right).is_some());
        assert!(s.connect(a, Terminal::Left, b, Terminal::Right).is_none());
        assert!(s.connect(b, Terminal::Right, a, Terminal::Left).is_none());
        assert_eq!(s.wires().len(), 1);

        // A different terminal pair is a different connection.
        assert!(s.connect(a, Terminal::Right, b, Terminal::Right).is_some());
        assert_eq!(s.wires_of(a).count(), 2);
    }

    #[test]
    fn test_connect_rejects_self_and_missing() {
        let (mut s, a, _) = pair();
        assert!(s.connect(a, Terminal::Left, a, Terminal::Right).is_none());
        assert!(s.connect(a, Terminal::Left, ComponentId(42), Terminal::Left).is_none());
        assert!(s.wires().is_empty());
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (mut s, a, b) = pair();
        let wire = s.connect(a, Terminal::Left, b, Terminal::Left).unwrap().id;

        assert!(s.select_component(a));
        assert_eq!(s.selection().component(), Some(a));
        assert!(s.select_wire(wire));
        assert_eq!(s.selection().component(), None);
        assert_eq!(s.selection().wire(), Some(wire));
        assert!(!s.select_component(ComponentId(77)));
        assert_eq!(s.selection().wire(), Some(wire));

        assert!(s.delete_selected());
        assert!(s.wires().is_empty());
        assert!(s.selection().is_empty());
        assert!(!s.delete_selected());
    }

    #[test]
    fn test_click_terminal_two_step_wiring() {
        let (mut s, a, b) = pair();
        assert_eq!(s.click_terminal(a, Terminal::Right), None);
        assert_eq!(s.pending_wire(), Some(Endpoint::new(a, Terminal::Right)));

        let wire = s.click_terminal(b, Terminal::Left);
        assert!(wire.is_some());
        assert_eq!(s.pending_wire(), None);

        // Second click on the same component ends the gesture without a wire.
        s.click_terminal(a, Terminal::Left);
        assert_eq!(s.click_terminal(a, Terminal::Right), None);
        assert_eq!(s.pending_wire(), None);
        assert_eq!(s.wires().len(), 1);

        s.click_terminal(a, Terminal::Left);
        s.cancel_wiring();
        assert_eq!(s.pending_wire(), None);
    }

    #[test]
    fn test_delete_drops_pending_origin() {
        let (mut s, a, _) = pair();
        s.click_terminal(a, Terminal::Left);
        s.delete_component(a);
        assert_eq!(s.pending_wire(), None);
    }

    #[test]
    fn test_delete_wire() {
        let (mut s, a, b) = pair();
        let wire = s.connect(a, Terminal::Left, b, Terminal::Right).unwrap().id;
        s.select_wire(wire);
        assert!(s.delete_wire(wire));
        assert!(s.selection().is_empty());
        assert!(!s.delete_wire(wire));
        assert_eq!(s.components().len(), 2);
    }
}
