//! # AC Circuit Core
//!
//! Schematic model and steady-state AC metrics engine for an interactive
//! series-circuit workbench.
//!
//! This library provides:
//! - A schematic graph of placed components (R, L, C, source, ground) and
//!   the wires between their terminals, with selection and wiring state
//! - A closed-form metrics engine: series totals, reactances, impedance,
//!   phase, peak current and resonance at a drive frequency
//! - A sampled frequency response for charting
//! - A line-oriented script format that replays editor actions
//!
//! ## Architecture
//!
//! - [`circuit`] - Schematic graph, selection and integrity checks
//! - [`components`] - Component kinds and their placement defaults
//! - [`analysis`] - Metrics engine, frequency sweep and the [`Analyzer`] session
//! - [`dsl`] - Parser and replayer for schematic scripts
//! - [`report`] - Text and CSV reports (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! accircuit rlc.acs --frequency 120 --sweep > response.csv
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmWorkbench } from 'ac_circuit_core';
//!
//! const bench = new WasmWorkbench();
//! const r = bench.add_component("resistor", 40, 60);
//! bench.set_frequency(120);
//! console.log(bench.impedance());
//! ```
//!
//! ## Circuit Model
//!
//! Wires are visual only. Every placed component is summed into one series
//! loop driven by the first source, and the loop is solved in closed form
//! with magnitudes and phases rather than complex arithmetic. The engine is
//! pure: the same components and frequency always yield the same record.

pub mod analysis;
pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use analysis::{
    compute_metrics, sample_frequency_response, Analyzer, AnalyzerConfig, CircuitMetrics,
    FrequencySample,
};
pub use circuit::Schematic;
pub use components::{Component, ComponentKind};
pub use error::{CircuitError, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmWorkbench;

/// Grid pitch, in canvas units, that component positions snap to.
pub const GRID_SIZE: i32 = 20;

/// Drive frequency of a fresh session, in Hz.
pub const DEFAULT_FREQUENCY_HZ: f64 = 60.0;

/// Lowest drive frequency the workbench accepts, in Hz.
pub const MIN_DRIVE_FREQUENCY_HZ: f64 = 1.0;

/// Highest drive frequency the workbench accepts, in Hz.
pub const MAX_DRIVE_FREQUENCY_HZ: f64 = 1000.0;
