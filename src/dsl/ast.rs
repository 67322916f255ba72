//! Abstract Syntax Tree types for the schematic script.

use crate::analysis::{CapacitorlessPolicy, SweepRange};
use crate::circuit::Terminal;
use crate::components::ComponentKind;

/// A parsed script: editor actions in source order.
#[derive(Debug, Clone, Default)]
pub struct ScriptAst {
    pub statements: Vec<Statement>,
}

impl ScriptAst {
    /// Create a new empty script AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One script line.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub action: Action,
    /// Source line number for error reporting
    pub line: usize,
}

/// A named component terminal, e.g. `rload.right`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalRef {
    pub name: String,
    pub terminal: Terminal,
}

/// Editor actions expressible in a script.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `.frequency <hz>`
    SetFrequency(f64),
    /// `.capacitorless open|bypass`
    SetCapacitorless(CapacitorlessPolicy),
    /// `.sweep <start> <stop> <step>`
    SetSweep(SweepRange),
    /// `<kind> <name> <x> <y> [value]`
    Place {
        kind: ComponentKind,
        name: String,
        x: f64,
        y: f64,
        value: Option<f64>,
    },
    /// `move <name> <x> <y>`
    Move { name: String, x: f64, y: f64 },
    /// `value <name> <value>`
    SetValue { name: String, value: f64 },
    /// `delete <name>`
    Delete { name: String },
    /// `wire <name>.<terminal> <name>.<terminal>`
    Connect { from: TerminalRef, to: TerminalRef },
    /// `unwire <name>.<terminal> <name>.<terminal>`
    Disconnect { from: TerminalRef, to: TerminalRef },
    /// `clear`
    Clear,
}
