//! Schematic graph model.
//!
//! This module holds the editable representation of a circuit: the placed
//! components, the wires drawn between their terminals, and the editor's
//! selection and wiring state. The [`Schematic`] struct enforces referential
//! integrity on every mutation; [`check_integrity`] verifies it after the fact.

mod graph;
mod selection;
mod types;
mod validate;

pub use graph::Schematic;
pub use selection::Selection;
pub use types::*;
pub use validate::check_integrity;
