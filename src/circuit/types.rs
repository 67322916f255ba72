//! Core types for schematic representation.

use std::fmt;

use crate::GRID_SIZE;

/// A unique identifier for a placed component.
///
/// Ids come from a monotonic counter owned by the schematic and are never
/// reused, even after the component is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// One of the two connection points of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Left,
    Right,
}

impl Terminal {
    /// Parse a terminal name (`left`/`l`, `right`/`r`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Self::Left),
            "right" | "r" => Some(Self::Right),
            _ => None,
        }
    }

    /// The lowercase name of this terminal.
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Left => "left",
            Terminal::Right => "right",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (component, terminal) pair: one end of a wire, or a pending wire origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub component: ComponentId,
    pub terminal: Terminal,
}

impl Endpoint {
    pub fn new(component: ComponentId, terminal: Terminal) -> Self {
        Self {
            component,
            terminal,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.terminal)
    }
}

/// A connection drawn between two component terminals.
///
/// Wires are purely visual: the metrics engine treats every component as part
/// of one series loop regardless of how they are wired.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub from: Endpoint,
    pub to: Endpoint,
}

impl Wire {
    /// Check whether this wire joins `a` and `b`, in either direction.
    pub fn joins(&self, a: Endpoint, b: Endpoint) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Check whether either end of this wire sits on `component`.
    pub fn touches(&self, component: ComponentId) -> bool {
        self.from.component == component || self.to.component == component
    }
}

/// Grid-snapped canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Snap raw canvas coordinates onto the grid.
    pub fn snapped(x: f64, y: f64) -> Self {
        Self {
            x: snap_to_grid(x),
            y: snap_to_grid(y),
        }
    }
}

/// Round a coordinate to the nearest grid line, halves rounding toward +inf.
///
/// Non-finite input lands on 0; finite out-of-range input saturates.
pub fn snap_to_grid(value: f64) -> i32 {
    let grid = GRID_SIZE as f64;
    let snapped = (value / grid + 0.5).floor() * grid;
    if snapped.is_finite() {
        snapped as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(0.0), 0);
        assert_eq!(snap_to_grid(9.9), 0);
        assert_eq!(snap_to_grid(10.0), 20);
        assert_eq!(snap_to_grid(29.0), 20);
        assert_eq!(snap_to_grid(31.0), 40);
        assert_eq!(snap_to_grid(-10.0), 0);
        assert_eq!(snap_to_grid(-11.0), -20);
        assert_eq!(snap_to_grid(f64::NAN), 0);
    }

    #[test]
    fn test_wire_joins_either_direction() {
        let a = Endpoint::new(ComponentId(1), Terminal::Left);
        let b = Endpoint::new(ComponentId(2), Terminal::Right);
        let wire = Wire {
            id: WireId(0),
            from: a,
            to: b,
        };
        assert!(wire.joins(a, b));
        assert!(wire.joins(b, a));
        assert!(!wire.joins(a, Endpoint::new(ComponentId(2), Terminal::Left)));
        assert!(wire.touches(ComponentId(2)));
        assert!(!wire.touches(ComponentId(3)));
    }

    #[test]
    fn test_terminal_names() {
        assert_eq!(Terminal::from_name("LEFT"), Some(Terminal::Left));
        assert_eq!(Terminal::from_name("r"), Some(Terminal::Right));
        assert_eq!(Terminal::from_name("middle"), None);
        assert_eq!(
            Endpoint::new(ComponentId(3), Terminal::Right).to_string(),
            "c3.right"
        );
    }
}
