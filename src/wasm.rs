//! WASM bindings for AC Circuit Core.
//!
//! This module exposes the editing session to a browser frontend. Every
//! mutation returns immediately and the metric getters recompute from the
//! current schematic, so a UI can re-render after each gesture.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmWorkbench } from 'ac_circuit_core';
//!
//! await init();
//!
//! const bench = new WasmWorkbench();
//! const v = bench.add_component("source", 0, 0);
//! const r = bench.add_component("resistor", 80, 0);
//! bench.connect(v, "right", r, "left");
//! bench.set_frequency(120);
//!
//! console.log(bench.impedance(), bench.phase_deg());
//!
//! // Chart data: [f0, mA0, f1, mA1, ...]
//! const curve = bench.current_response();
//! ```
//!
//! Component and wire ids cross the boundary as plain numbers.

use wasm_bindgen::prelude::*;

use crate::analysis::{Analyzer, CapacitorlessPolicy, CircuitMetrics};
use crate::circuit::{ComponentId, Selection, Terminal, WireId};
use crate::components::ComponentKind;
use crate::dsl;
use crate::error::CircuitError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: CircuitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn wasm_error(message: String) -> JsValue {
    js_error(CircuitError::WasmError { message })
}

fn parse_kind(kind: &str) -> Result<ComponentKind, JsValue> {
    ComponentKind::from_keyword(kind)
        .ok_or_else(|| wasm_error(format!("unknown component kind '{}'", kind)))
}

fn parse_terminal(terminal: &str) -> Result<Terminal, JsValue> {
    Terminal::from_name(terminal)
        .ok_or_else(|| wasm_error(format!("unknown terminal '{}'", terminal)))
}

/// Whole, non-negative JS numbers map onto ids; anything else matches nothing.
fn checked_id(id: f64) -> Option<u64> {
    if id.is_finite() && id >= 0.0 && id.fract() == 0.0 && id <= u64::MAX as f64 {
        Some(id as u64)
    } else {
        None
    }
}

fn component_id(id: f64) -> Option<ComponentId> {
    checked_id(id).map(ComponentId)
}

fn wire_id(id: f64) -> Option<WireId> {
    checked_id(id).map(WireId)
}

/// Browser-facing series AC workbench.
///
/// Wraps an [`Analyzer`] and flattens its API into numbers and strings.
#[wasm_bindgen]
pub struct WasmWorkbench {
    analyzer: Analyzer,
}

impl Default for WasmWorkbench {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmWorkbench {
    fn metrics(&self) -> CircuitMetrics {
        self.analyzer.metrics()
    }
}

#[wasm_bindgen]
impl WasmWorkbench {
    /// Create an empty workbench driven at the default frequency.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmWorkbench {
        WasmWorkbench {
            analyzer: Analyzer::new(),
        }
    }

    /// Replace the session with the result of a schematic script.
    ///
    /// On error the current session is left untouched.
    #[wasm_bindgen]
    pub fn load_script(&mut self, script: &str) -> Result<(), JsValue> {
        let (analyzer, _) = dsl::run_script(script).map_err(js_error)?;
        self.analyzer = analyzer;
        Ok(())
    }

    // ============ Schematic editing ============

    /// Place a component (`"resistor"`, `"L"`, `"cap"`, ...) and return its id.
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str, x: f64, y: f64) -> Result<f64, JsValue> {
        let kind = parse_kind(kind)?;
        let id = self.analyzer.schematic_mut().add_component(kind, x, y).id;
        Ok(id.0 as f64)
    }

    #[wasm_bindgen]
    pub fn move_component(&mut self, id: f64, x: f64, y: f64) -> bool {
        component_id(id).is_some_and(|id| self.analyzer.schematic_mut().move_component(id, x, y))
    }

    #[wasm_bindgen]
    pub fn set_component_value(&mut self, id: f64, value: f64) -> bool {
        component_id(id)
            .is_some_and(|id| self.analyzer.schematic_mut().set_component_value(id, value))
    }

    #[wasm_bindgen]
    pub fn delete_component(&mut self, id: f64) -> bool {
        component_id(id).is_some_and(|id| self.analyzer.schematic_mut().delete_component(id))
    }

    /// Draw a wire and return its id, or `undefined` if it was refused.
    #[wasm_bindgen]
    pub fn connect(
        &mut self,
        id1: f64,
        terminal1: &str,
        id2: f64,
        terminal2: &str,
    ) -> Result<Option<f64>, JsValue> {
        let t1 = parse_terminal(terminal1)?;
        let t2 = parse_terminal(terminal2)?;
        let (Some(id1), Some(id2)) = (component_id(id1), component_id(id2)) else {
            return Ok(None);
        };
        Ok(self
            .analyzer
            .schematic_mut()
            .connect(id1, t1, id2, t2)
            .map(|w| w.id.0 as f64))
    }

    #[wasm_bindgen]
    pub fn delete_wire(&mut self, id: f64) -> bool {
        wire_id(id).is_some_and(|id| self.analyzer.schematic_mut().delete_wire(id))
    }

    /// Remove every component and wire.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.analyzer.schematic_mut().clear();
    }

    #[wasm_bindgen]
    pub fn component_count(&self) -> usize {
        self.analyzer.schematic().components().len()
    }

    #[wasm_bindgen]
    pub fn wire_count(&self) -> usize {
        self.analyzer.schematic().wires().len()
    }

    /// Label of a component, e.g. `R2` or `GND`.
    #[wasm_bindgen]
    pub fn component_label(&self, id: f64) -> Option<String> {
        let id = component_id(id)?;
        self.analyzer
            .schematic()
            .find_component(id)
            .map(|c| c.label.clone())
    }

    // ============ Selection and wiring ============

    #[wasm_bindgen]
    pub fn select_component(&mut self, id: f64) -> bool {
        component_id(id).is_some_and(|id| self.analyzer.schematic_mut().select_component(id))
    }

    #[wasm_bindgen]
    pub fn select_wire(&mut self, id: f64) -> bool {
        wire_id(id).is_some_and(|id| self.analyzer.schematic_mut().select_wire(id))
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        self.analyzer.schematic_mut().clear_selection();
    }

    /// Selected component id, if a component is selected.
    #[wasm_bindgen]
    pub fn selected_component(&self) -> Option<f64> {
        match self.analyzer.schematic().selection() {
            Selection::Component(id) => Some(id.0 as f64),
            _ => None,
        }
    }

    /// Selected wire id, if a wire is selected.
    #[wasm_bindgen]
    pub fn selected_wire(&self) -> Option<f64> {
        match self.analyzer.schematic().selection() {
            Selection::Wire(id) => Some(id.0 as f64),
            _ => None,
        }
    }

    #[wasm_bindgen]
    pub fn delete_selected(&mut self) -> bool {
        self.analyzer.schematic_mut().delete_selected()
    }

    /// Handle a click on a terminal. The second click on another component
    /// draws the wire and returns its id.
    #[wasm_bindgen]
    pub fn click_terminal(&mut self, id: f64, terminal: &str) -> Result<Option<f64>, JsValue> {
        let terminal = parse_terminal(terminal)?;
        let Some(id) = component_id(id) else {
            return Ok(None);
        };
        Ok(self
            .analyzer
            .schematic_mut()
            .click_terminal(id, terminal)
            .map(|w| w.0 as f64))
    }

    #[wasm_bindgen]
    pub fn cancel_wiring(&mut self) {
        self.analyzer.schematic_mut().cancel_wiring();
    }

    #[wasm_bindgen]
    pub fn is_wiring(&self) -> bool {
        self.analyzer.schematic().pending_wire().is_some()
    }

    // ============ Drive frequency ============

    /// Set the drive frequency; returns the clamped value applied.
    #[wasm_bindgen]
    pub fn set_frequency(&mut self, hz: f64) -> f64 {
        self.analyzer.set_frequency(hz)
    }

    #[wasm_bindgen(getter)]
    pub fn frequency(&self) -> f64 {
        self.analyzer.frequency()
    }

    /// Jump to the rounded resonance frequency; returns the value applied.
    #[wasm_bindgen]
    pub fn lock_resonance(&mut self) -> f64 {
        self.analyzer.lock_resonance()
    }

    #[wasm_bindgen]
    pub fn is_locked_to_resonance(&self) -> bool {
        self.analyzer.is_locked_to_resonance()
    }

    /// Use `Xc = 0` instead of the open-circuit sentinel when no capacitor
    /// is placed.
    #[wasm_bindgen]
    pub fn set_bypass_open_capacitor(&mut self, bypass: bool) {
        let policy = if bypass {
            CapacitorlessPolicy::Bypass
        } else {
            CapacitorlessPolicy::OpenCircuit
        };
        let config = self.analyzer.config().clone().with_capacitorless(policy);
        self.analyzer.set_config(config);
    }

    // ============ Metrics ============

    #[wasm_bindgen]
    pub fn resistance(&self) -> f64 {
        self.metrics().resistance
    }

    #[wasm_bindgen]
    pub fn inductance(&self) -> f64 {
        self.metrics().inductance
    }

    #[wasm_bindgen]
    pub fn capacitance(&self) -> f64 {
        self.metrics().capacitance
    }

    #[wasm_bindgen]
    pub fn inductive_reactance(&self) -> f64 {
        self.metrics().inductive_reactance
    }

    #[wasm_bindgen]
    pub fn capacitive_reactance(&self) -> f64 {
        self.metrics().capacitive_reactance
    }

    #[wasm_bindgen]
    pub fn impedance(&self) -> f64 {
        self.metrics().impedance
    }

    #[wasm_bindgen]
    pub fn phase_deg(&self) -> f64 {
        self.metrics().phase_deg
    }

    #[wasm_bindgen]
    pub fn peak_current(&self) -> f64 {
        self.metrics().peak_current
    }

    /// Resonance frequency in Hz, 0 when the loop lacks L or C.
    #[wasm_bindgen]
    pub fn resonance_hz(&self) -> f64 {
        self.metrics().resonance_hz
    }

    #[wasm_bindgen]
    pub fn source_voltage(&self) -> f64 {
        self.metrics().source_voltage
    }

    /// Current-vs-frequency curve as interleaved `[hz, mA, hz, mA, ...]`.
    #[wasm_bindgen]
    pub fn current_response(&self) -> Vec<f64> {
        self.analyzer
            .frequency_response()
            .flat_map(|s| [s.frequency_hz, s.current_ma])
            .collect()
    }

    /// Full sweep as interleaved `[hz, mA, |Z|, phase°, ...]`.
    #[wasm_bindgen]
    pub fn frequency_response(&self) -> Vec<f64> {
        self.analyzer
            .frequency_response()
            .flat_map(|s| [s.frequency_hz, s.current_ma, s.impedance, s.phase_deg])
            .collect()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default drive frequency in Hz.
#[wasm_bindgen]
pub fn default_frequency() -> f64 {
    crate::DEFAULT_FREQUENCY_HZ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_id() {
        assert_eq!(checked_id(0.0), Some(0));
        assert_eq!(checked_id(7.0), Some(7));
        assert_eq!(checked_id(-1.0), None);
        assert_eq!(checked_id(0.5), None);
        assert_eq!(checked_id(f64::NAN), None);
        assert_eq!(checked_id(f64::INFINITY), None);
    }

    #[test]
    fn test_malformed_ids_are_no_ops() {
        let mut bench = WasmWorkbench::new();
        let r = bench.add_component("resistor", 0.0, 0.0).unwrap();
        assert_eq!(r, 0.0);

        assert!(!bench.delete_component(-1.0));
        assert!(!bench.delete_component(0.5));
        assert!(!bench.move_component(f64::NAN, 40.0, 40.0));
        assert!(!bench.set_component_value(-0.5, 1.0));
        assert!(!bench.select_component(f64::NAN));
        assert!(!bench.delete_wire(-1.0));
        assert_eq!(bench.component_label(f64::NAN), None);
        assert_eq!(bench.component_count(), 1);
        assert_eq!(bench.resistance(), 220.0);

        assert!(bench.delete_component(r));
        assert_eq!(bench.component_count(), 0);
    }
}
