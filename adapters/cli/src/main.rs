#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the EXVS2 team-cost calculator.

mod config;
mod output;
mod unit_arg;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use exvs_cost_catalog::RespawnTable;
use exvs_cost_core::{EliminationSequence, Formation, UnitSlot};
use exvs_cost_system_battle_simulation::simulate;
use exvs_cost_system_pattern_evaluation::evaluate_trace;
use exvs_cost_system_report::build_report;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{CliConfig, DEFAULT_LOG_FILTER},
    output::OutputFormat,
    unit_arg::UnitArg,
};

/// Computes elimination-order outcomes for a two-unit EXVS2 team.
#[derive(Debug, Parser)]
#[command(name = "exvs-cost", version)]
struct Cli {
    /// TOML config file; defaults to ./exvs-cost.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Ranks every distinct elimination outcome of a formation.
    Analyze {
        #[command(flatten)]
        formation: FormationArgs,
        /// Maximum number of outcomes to print.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replays a single elimination sequence.
    Simulate {
        #[command(flatten)]
        formation: FormationArgs,
        /// Elimination order such as ABAB.
        #[arg(long)]
        sequence: EliminationSequence,
    },
    /// Lists every valid cost and health combination.
    Catalog,
}

#[derive(Debug, Args)]
struct FormationArgs {
    /// First unit as COST:HEALTH[:revival].
    #[arg(long = "unit-a")]
    unit_a: Option<UnitArg>,
    /// Second unit as COST:HEALTH[:revival].
    #[arg(long = "unit-b")]
    unit_b: Option<UnitArg>,
}

impl FormationArgs {
    /// Overlays command-line units on the configured formation.
    fn resolve(&self, config: &CliConfig) -> Formation {
        let configured = config.formation;
        let pick = |arg: Option<UnitArg>, slot| {
            arg.map(|UnitArg(unit)| unit)
                .or_else(|| configured.unit(slot).copied())
        };

        let formation = Formation::new(
            pick(self.unit_a, UnitSlot::A),
            pick(self.unit_b, UnitSlot::B),
        );
        if !formation.is_complete() {
            tracing::warn!("formation is incomplete; no outcomes will be produced");
        }
        formation
    }
}

/// Entry point for the calculator command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(config.log_filter.as_deref());

    let format = cli.format.or(config.format).unwrap_or_default();
    let table = RespawnTable::standard();
    let mut stdout = io::stdout().lock();

    match cli.command {
        CliCommand::Analyze { formation, limit } => {
            let formation = formation.resolve(&config);
            let report = build_report(&formation, &table, limit.or(config.limit));
            output::write_report(&mut stdout, &report, format)
        }
        CliCommand::Simulate {
            formation,
            sequence,
        } => {
            let formation = formation.resolve(&config);
            let trace = simulate(&sequence, &formation, &table);
            let evaluated = evaluate_trace(sequence, trace, &formation);
            output::write_evaluation(&mut stdout, &formation, evaluated.as_ref(), format)
        }
        CliCommand::Catalog => output::write_catalog(&mut stdout, format),
    }
}

fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
