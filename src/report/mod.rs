//! Text and CSV reports for the CLI frontend.
//!
//! Writers take any [`Write`] sink; the CLI hands them a locked stdout.

use std::io::Write;

use crate::analysis::{CircuitMetrics, FrequencySample};
use crate::circuit::{ComponentId, Schematic};
use crate::error::{CircuitError, Result};

/// Format a value with an SI prefix, e.g. `0.0047` F as `4.7 mF`.
pub fn format_si(value: f64, unit: &str) -> String {
    const PREFIXES: [(i32, &str); 9] = [
        (-12, "p"),
        (-9, "n"),
        (-6, "µ"),
        (-3, "m"),
        (0, ""),
        (3, "k"),
        (6, "M"),
        (9, "G"),
        (12, "T"),
    ];

    if value == 0.0 || !value.is_finite() {
        return format!("{} {unit}", value);
    }

    let exponent = (value.abs().log10() / 3.0).floor() as i32 * 3;
    match PREFIXES.iter().find(|&&(e, _)| e == exponent) {
        Some((e, symbol)) => {
            let scaled = value / 10_f64.powi(*e);
            format!("{} {symbol}{unit}", trim_number(scaled))
        }
        None => format!("{:e} {unit}", value),
    }
}

/// Four significant decimals without trailing zeros.
fn trim_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

fn output_error(e: std::io::Error) -> CircuitError {
    CircuitError::ReportOutputError {
        message: e.to_string(),
    }
}

/// Write the component list and the metrics summary.
pub fn write_metrics<W: Write>(
    out: &mut W,
    schematic: &Schematic,
    metrics: &CircuitMetrics,
) -> Result<()> {
    write_summary(out, schematic, metrics).map_err(output_error)
}

fn write_summary<W: Write>(
    out: &mut W,
    schematic: &Schematic,
    metrics: &CircuitMetrics,
) -> std::io::Result<()> {
    writeln!(out, "Components ({})", schematic.components().len())?;
    for c in schematic.components() {
        writeln!(
            out,
            "  {:<8} {:<10} {:>14}  @ ({}, {})",
            c.label,
            c.kind,
            format_si(c.value, c.unit),
            c.position.x,
            c.position.y
        )?;
    }
    writeln!(out, "Wires ({})", schematic.wires().len())?;
    for w in schematic.wires() {
        let from = label_of(schematic, w.from.component);
        let to = label_of(schematic, w.to.component);
        writeln!(out, "  {}.{} -> {}.{}", from, w.from.terminal, to, w.to.terminal)?;
    }

    writeln!(out)?;
    writeln!(out, "Drive frequency   {}", format_si(metrics.frequency_hz, "Hz"))?;
    writeln!(out, "Equiv R           {}", format_si(metrics.resistance, "Ω"))?;
    writeln!(out, "Equiv L           {}", format_si(metrics.inductance, "H"))?;
    writeln!(out, "Equiv C           {}", format_si(metrics.capacitance, "F"))?;
    writeln!(out, "Xl                {}", format_si(metrics.inductive_reactance, "Ω"))?;
    writeln!(out, "Xc                {}", format_si(metrics.capacitive_reactance, "Ω"))?;
    writeln!(out, "Impedance |Z|     {}", format_si(metrics.impedance, "Ω"))?;
    writeln!(out, "Phase shift       {:.2}°", metrics.phase_deg)?;
    writeln!(out, "Peak current      {}", format_si(metrics.peak_current, "A"))?;
    writeln!(
        out,
        "Source            {} ({} RMS)",
        format_si(metrics.source_voltage, "V"),
        format_si(metrics.rms_voltage(), "V")
    )?;
    if metrics.has_resonance() {
        writeln!(out, "Resonance f0      {}", format_si(metrics.resonance_hz, "Hz"))?;
    } else {
        writeln!(out, "Resonance f0      none")?;
    }
    Ok(())
}

fn label_of(schematic: &Schematic, id: ComponentId) -> String {
    schematic
        .find_component(id)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Write a frequency response as CSV with a header row.
pub fn write_response_csv<W, I>(out: &mut W, samples: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = FrequencySample>,
{
    writeln!(out, "frequency_hz,current_ma,impedance_ohm,phase_deg").map_err(output_error)?;
    for s in samples {
        writeln!(
            out,
            "{},{},{},{}",
            s.frequency_hz, s.current_ma, s.impedance, s.phase_deg
        )
        .map_err(output_error)?;
    }
    out.flush().map_err(output_error)
}
