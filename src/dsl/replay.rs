//! Replaying a parsed script onto an analyzer.

use std::collections::HashMap;

use log::debug;

use super::ast::{Action, ScriptAst, Statement, TerminalRef};
use crate::analysis::Analyzer;
use crate::circuit::{check_integrity, ComponentId, Endpoint};
use crate::error::{CircuitError, Result};

/// Script names bound to the components they placed.
pub type Bindings = HashMap<String, ComponentId>;

/// Apply every statement of `ast` to `analyzer`, in order.
///
/// Statements mirror editor gestures and share their semantics: a duplicate
/// or self wire is silently skipped, frequencies are clamped. Referring to a
/// name that was never placed (or has been deleted) is an error, as is
/// reusing a live name or unwiring terminals that are not wired.
///
/// Returns the names still bound after the last statement.
pub fn replay(ast: &ScriptAst, analyzer: &mut Analyzer) -> Result<Bindings> {
    let mut names = Bindings::new();
    for statement in &ast.statements {
        apply(statement, analyzer, &mut names)?;
    }
    check_integrity(analyzer.schematic())?;
    debug!(
        "replayed {} statement(s): {} component(s), {} wire(s)",
        ast.statements.len(),
        analyzer.schematic().components().len(),
        analyzer.schematic().wires().len()
    );
    Ok(names)
}

fn apply(statement: &Statement, analyzer: &mut Analyzer, names: &mut Bindings) -> Result<()> {
    let line = statement.line;
    match &statement.action {
        Action::SetFrequency(hz) => {
            analyzer.set_frequency(*hz);
        }
        Action::SetCapacitorless(policy) => {
            let config = analyzer.config().clone().with_capacitorless(*policy);
            analyzer.set_config(config);
        }
        Action::SetSweep(range) => {
            let config = analyzer.config().clone().with_sweep(*range);
            analyzer.set_config(config);
        }
        Action::Place {
            kind,
            name,
            x,
            y,
            value,
        } => {
            if names.contains_key(name) {
                return Err(CircuitError::DuplicateName {
                    name: name.clone(),
                    line,
                });
            }
            let schematic = analyzer.schematic_mut();
            let id = schematic.add_component(*kind, *x, *y).id;
            if let Some(value) = value {
                schematic.set_component_value(id, *value);
            }
            names.insert(name.clone(), id);
        }
        Action::Move { name, x, y } => {
            let id = resolve(names, name, line)?;
            analyzer.schematic_mut().move_component(id, *x, *y);
        }
        Action::SetValue { name, value } => {
            let id = resolve(names, name, line)?;
            analyzer.schematic_mut().set_component_value(id, *value);
        }
        Action::Delete { name } => {
            let id = resolve(names, name, line)?;
            analyzer.schematic_mut().delete_component(id);
            names.remove(name);
        }
        Action::Connect { from, to } => {
            let a = endpoint(names, from, line)?;
            let b = endpoint(names, to, line)?;
            if analyzer
                .schematic_mut()
                .connect(a.component, a.terminal, b.component, b.terminal)
                .is_none()
            {
                debug!("line {}: wire {} -> {} skipped", line, a, b);
            }
        }
        Action::Disconnect { from, to } => {
            let a = endpoint(names, from, line)?;
            let b = endpoint(names, to, line)?;
            let wire = analyzer
                .schematic()
                .wires()
                .iter()
                .find(|w| w.joins(a, b))
                .map(|w| w.id)
                .ok_or_else(|| CircuitError::WireNotFound {
                    from: describe(from),
                    to: describe(to),
                    line,
                })?;
            analyzer.schematic_mut().delete_wire(wire);
        }
        Action::Clear => {
            analyzer.schematic_mut().clear();
            names.clear();
        }
    }
    Ok(())
}

fn resolve(names: &Bindings, name: &str, line: usize) -> Result<ComponentId> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| CircuitError::undefined(name, line))
}

fn endpoint(names: &Bindings, reference: &TerminalRef, line: usize) -> Result<Endpoint> {
    let id = resolve(names, &reference.name, line)?;
    Ok(Endpoint::new(id, reference.terminal))
}

fn describe(reference: &TerminalRef) -> String {
    format!("{}.{}", reference.name, reference.terminal)
}
