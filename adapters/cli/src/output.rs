use std::io::{self, Write};

use anyhow::{Context, Result};
use exvs_cost_core::{
    AggregateStatistics, BattleStep, EvaluatedSequence, Formation, UnitConfig, UnitSlot,
};
use exvs_cost_system_report::{RankedSequence, Report};
use serde::{Deserialize, Serialize};

/// Rendering used for command output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Writes a full formation report.
pub(crate) fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Text => render_report(out, report).context("failed to write report"),
    }
}

/// Writes the evaluation of a single sequence, if the formation produced one.
pub(crate) fn write_evaluation<W: Write>(
    out: &mut W,
    formation: &Formation,
    evaluated: Option<&EvaluatedSequence>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &evaluated),
        OutputFormat::Text => render_evaluation(out, formation, evaluated)
            .context("failed to write sequence evaluation"),
    }
}

/// Writes every valid (cost, health) combination.
pub(crate) fn write_catalog<W: Write>(out: &mut W, format: OutputFormat) -> Result<()> {
    let entries: Vec<CatalogEntry> = exvs_cost_catalog::combinations()
        .map(|(cost, health)| CatalogEntry {
            cost: cost.into(),
            health,
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Text => render_catalog(out, &entries).context("failed to write catalog"),
    }
}

#[derive(Serialize)]
struct CatalogEntry {
    cost: u32,
    health: u32,
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialise output")?;
    writeln!(out).context("failed to write output")
}

const NO_OUTCOMES: &str = "No outcomes: both units are required.";

fn render_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "Formation: {}", describe_formation(&report.formation))?;
    if report.is_empty() {
        return writeln!(out, "{NO_OUTCOMES}");
    }

    writeln!(
        out,
        "Evaluated {} sequences, showing {} distinct outcomes",
        report.evaluated_count,
        report.ranked.len()
    )?;

    for (rank, entry) in report.ranked.iter().enumerate() {
        writeln!(out)?;
        render_ranked(out, rank + 1, entry)?;
    }

    if let Some(stats) = &report.statistics {
        writeln!(out)?;
        render_statistics(out, stats)?;
    }
    Ok(())
}

fn render_ranked<W: Write>(out: &mut W, rank: usize, entry: &RankedSequence) -> io::Result<()> {
    let evaluated = &entry.evaluated;
    write!(
        out,
        "#{rank} {} (realized {})",
        evaluated.sequence,
        evaluated.realized_order()
    )?;
    if !entry.annotations.is_empty() {
        let labels: Vec<&str> = entry.annotations.iter().map(|tag| tag.label()).collect();
        write!(out, " [{}]", labels.join(", "))?;
    }
    writeln!(out)?;
    render_metrics(out, evaluated)?;
    render_trace(out, &evaluated.trace)
}

fn render_evaluation<W: Write>(
    out: &mut W,
    formation: &Formation,
    evaluated: Option<&EvaluatedSequence>,
) -> io::Result<()> {
    writeln!(out, "Formation: {}", describe_formation(formation))?;
    let Some(evaluated) = evaluated else {
        return writeln!(out, "{NO_OUTCOMES}");
    };
    writeln!(
        out,
        "Sequence {} (realized {})",
        evaluated.sequence,
        evaluated.realized_order()
    )?;
    render_metrics(out, evaluated)?;
    render_trace(out, &evaluated.trace)
}

fn render_metrics<W: Write>(out: &mut W, evaluated: &EvaluatedSequence) -> io::Result<()> {
    writeln!(
        out,
        "  total health {}, overdrafts {}, special threshold {}",
        evaluated.total_effective_health,
        evaluated.overdraft_count,
        if evaluated.can_reach_special_threshold {
            "reached"
        } else {
            "not reached"
        }
    )
}

fn render_trace<W: Write>(out: &mut W, trace: &[BattleStep]) -> io::Result<()> {
    for step in trace {
        write!(
            out,
            "  step {}: {} down, pool {:>5}",
            step.step_index + 1,
            step.eliminated,
            step.remaining_cost
        )?;
        if step.is_team_defeated {
            writeln!(out, ", defeated")?;
        } else if step.is_special_revival {
            writeln!(out, ", special revival at {}", step.respawn_health)?;
        } else if step.is_overdraft {
            writeln!(out, ", overdraft respawn at {}", step.respawn_health)?;
        } else {
            writeln!(out, ", respawn at {}", step.respawn_health)?;
        }
    }
    Ok(())
}

fn render_statistics<W: Write>(out: &mut W, stats: &AggregateStatistics) -> io::Result<()> {
    let health = stats.total_effective_health;
    writeln!(out, "Statistics over {} sequences:", stats.total_sequences)?;
    writeln!(
        out,
        "  total health max {}, min {}, average {}",
        health.max, health.min, health.average
    )?;
    writeln!(
        out,
        "  overdrafts max {}, min {}",
        stats.overdraft_count.max, stats.overdraft_count.min
    )?;
    writeln!(
        out,
        "  steps max {}, min {}",
        stats.step_count.max, stats.step_count.min
    )?;
    match stats.special_eligible_max_health {
        Some(max) => writeln!(
            out,
            "  special threshold reachable in {} sequences, best total health {max}",
            stats.special_eligible_count
        ),
        None => writeln!(out, "  special threshold never reachable"),
    }
}

fn render_catalog<W: Write>(out: &mut W, entries: &[CatalogEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}/{}", entry.cost, entry.health)?;
    }
    Ok(())
}

fn describe_formation(formation: &Formation) -> String {
    UnitSlot::ALL
        .into_iter()
        .map(|slot| format!("{slot} {}", describe_unit(formation.unit(slot))))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_unit(unit: Option<&UnitConfig>) -> String {
    match unit {
        Some(unit) if unit.special_revival() => {
            format!("{}/{} with revival", unit.cost(), unit.health())
        }
        Some(unit) => format!("{}/{}", unit.cost(), unit.health()),
        None => String::from("(empty)"),
    }
}
