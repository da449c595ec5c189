//! Terminal and JSON rendering of view outputs.

use std::fmt::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::domain::{Metric, Sample};
use crate::view::{AggregateView, HourlyView, ViewOutput};

pub fn render(output: &ViewOutput<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Text => Ok(match output {
            ViewOutput::Hourly(view) => hourly_text(view)?,
            ViewOutput::Aggregate(view) => aggregate_text(view)?,
        }),
    }
}

/// Render a plain list (month options, labels)
pub fn render_list(items: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Text => Ok(items.join("\n")),
    }
}

/// Render raw hourly rows: a JSON array of samples, or one line per hour
pub fn render_samples(samples: &[&Sample], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(samples)?),
        OutputFormat::Text => Ok(samples_text(samples)?),
    }
}

fn samples_text(samples: &[&Sample]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<20}{:>8}{:>10}{:>10}{:>10}{:>8}{:>8}{:>8}  status",
        "hour", "flow", "generated", "load", "surplus", "PR", "voltage", "sep"
    )?;
    for s in samples {
        writeln!(
            out,
            "{:<20}{:>8.3}{:>10.1}{:>10.1}{:>10.1}{:>8.1}{:>8.2}{:>8.2}  {}",
            s.label(),
            s.flow_rate,
            s.power_generated,
            s.power_load,
            s.power_surplus(),
            s.turbine_performance_ratio,
            s.voltage,
            s.separation_pct,
            s.status
        )?;
    }
    Ok(out)
}

fn card(out: &mut String, label: &str, value: String, unit: &str) -> std::fmt::Result {
    writeln!(out, "  {label:<24}{value:>12} {unit}")
}

fn hourly_text(view: &HourlyView<'_>) -> Result<String, std::fmt::Error> {
    let s = view.sample;
    let mut out = String::new();

    writeln!(out, "== REAL-TIME (Hourly) | {} ==", s.label())?;
    writeln!(out, "SYSTEM ANALYSIS")?;
    writeln!(out, "  {}", view.insight.narrative)?;
    writeln!(out)?;

    writeln!(out, "1. Energy balance & turbine efficiency")?;
    card(&mut out, "TURBINE OUTPUT", format!("{:.0}", s.power_generated), Metric::PowerGenerated.unit())?;
    card(&mut out, "ED LOAD", format!("{:.0}", s.power_load), Metric::PowerLoad.unit())?;
    card(&mut out, "ENERGY SURPLUS", format!("{:.0}", s.power_surplus()), Metric::PowerSurplus.unit())?;
    let pr_state = if view.insight.performance_healthy { "ok" } else { "low" };
    card(
        &mut out,
        "TURBINE PR",
        format!("{:.1}", s.turbine_performance_ratio),
        &format!("{} efficiency ({pr_state})", Metric::TurbinePerformanceRatio.unit()),
    )?;
    writeln!(out)?;

    writeln!(out, "2. Hybrid multicell ED performance")?;
    let target = if view.insight.separation_on_target { "on target" } else { "below target" };
    card(
        &mut out,
        "SEPARATION",
        format!("{:.2}", s.separation_pct),
        &format!("{} ({target})", Metric::SeparationPct.unit()),
    )?;
    card(&mut out, "CELL VOLTAGE", format!("{:.1}", s.voltage), Metric::Voltage.unit())?;
    card(&mut out, "ROTOR", format!("{:.1}", s.rotor_rpm), Metric::RotorRpm.unit())?;
    card(&mut out, "GENERATOR", format!("{:.1}", s.generator_rpm), Metric::GeneratorRpm.unit())?;
    writeln!(out)?;

    writeln!(out, "Trend ({} h)", view.window.len())?;
    writeln!(
        out,
        "  {:<20}{:>10}{:>16}",
        "hour",
        format!("flow {}", Metric::FlowRate.unit()),
        format!("separation {}", Metric::SeparationPct.unit())
    )?;
    for row in view.window {
        let marker = if row.timestamp == s.timestamp { " <" } else { "" };
        writeln!(
            out,
            "  {:<20}{:>10.2}{:>16.2}{marker}",
            row.label(),
            row.flow_rate,
            row.separation_pct
        )?;
    }

    Ok(out)
}

fn aggregate_text(view: &AggregateView) -> Result<String, std::fmt::Error> {
    let summary = &view.summary;
    let v = &summary.values;
    let mut out = String::new();

    let scope = view.selection.as_deref().unwrap_or("2024");
    writeln!(
        out,
        "== {} | {} | {} ==",
        view.mode,
        scope,
        summary.method.to_string().to_uppercase()
    )?;
    card(&mut out, "ENERGY GENERATED", format!("{:.0}", v.power_generated), summary.unit)?;
    card(&mut out, "ENERGY DESALINATION", format!("{:.0}", v.power_load), summary.unit)?;
    card(&mut out, "ENERGY SURPLUS", format!("{:.0}", v.power_surplus), summary.unit)?;
    card(
        &mut out,
        "AVG TURBINE EFFICIENCY",
        format!("{:.0}", v.turbine_performance_ratio),
        &format!("{} ratio", Metric::TurbinePerformanceRatio.unit()),
    )?;

    let split = summary.energy_split;
    let total = split.desalination + split.surplus;
    if total > 0.0 {
        writeln!(
            out,
            "  split: desalination {:.1}% / surplus {:.1}%",
            split.desalination / total * 100.0,
            split.surplus / total * 100.0
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "  {:<12}{:>12}{:>12}{:>12}{:>10}{:>12}{:>8}",
        view.table.group_by.to_string(),
        "generated",
        "used (ED)",
        "surplus",
        "voltage",
        "separation",
        "hours"
    )?;
    for row in &view.table.rows {
        writeln!(
            out,
            "  {:<12}{:>12.1}{:>12.1}{:>12.1}{:>10.2}{:>12.2}{:>8}",
            row.label,
            row.values.power_generated,
            row.values.power_load,
            row.values.power_surplus,
            row.values.voltage,
            row.values.separation_pct,
            row.hours
        )?;
    }

    Ok(out)
}
