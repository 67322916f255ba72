//! Ephemeral editor state: what is selected.

use super::types::{ComponentId, WireId};

/// The current selection.
///
/// A component and a wire can never be selected at the same time, so the
/// selection is a single tagged value rather than two independent slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Nothing,
    Component(ComponentId),
    Wire(WireId),
}

impl Selection {
    /// The selected component, if any.
    pub fn component(&self) -> Option<ComponentId> {
        match self {
            Selection::Component(id) => Some(*id),
            _ => None,
        }
    }

    /// The selected wire, if any.
    pub fn wire(&self) -> Option<WireId> {
        match self {
            Selection::Wire(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Selection::Nothing
    }
}
