//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for faultline using
//! clap's derive API. Every command loads a topology document, replays it
//! into a fresh engine, runs one analysis, and prints the result.
//!
//! # Commands
//!
//! - `cascade`: Simulate the failure of a service
//! - `blast-radius`: Direct downstream teams of a team
//! - `critical-paths`: Services whose failure exceeds the impact threshold
//! - `spof`: Single points of failure
//! - `cycles`: Circular team dependencies
//! - `rank-teams` / `rank-services`: Risk rankings
//! - `report`: Aggregate cascade or risk report
//! - `assess`: Change risk assessment for an edge
//! - `services` / `deps`: Filtered listings
//! - `stats`: Engine counters
//!
//! # Global Flags
//!
//! - `--topology <PATH>`: Topology document to analyze (default `topology.yaml`)
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! faultline --topology prod.yaml cascade api-gateway
//! faultline --topology prod.yaml --json report cascade
//! faultline --topology prod.yaml assess 3 -D "upgrade API" --by alice
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{AssessArgs, BlastRadiusArgs, CascadeArgs, DepsArgs, ReportArgs, ServicesArgs};

// Re-export types
pub use types::{FailureTypeArg, PropagationModeArg, ReportKindArg};

// Re-export validators for external use
pub use validators::{validate_description, validate_name};

/// Faultline - dependency risk graph analyzer
///
/// Model service and team dependencies from a topology snapshot, simulate
/// cascading failures, and rank entities by risk.
#[derive(Parser, Debug)]
#[command(name = "faultline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Topology document to analyze
    #[arg(long, global = true, default_value = "topology.yaml")]
    pub topology: PathBuf,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Simulate the failure of a service
    ///
    /// Runs a bounded-depth breadth-first propagation across the reverse
    /// dependency graph and classifies the resulting cascade.
    Cascade(CascadeArgs),

    /// Show the teams directly downstream of a team
    ///
    /// Single-hop only: collects distinct target teams of edges sourced at
    /// the given team, without transitive expansion.
    #[command(name = "blast-radius")]
    BlastRadius(BlastRadiusArgs),

    /// Show services whose failure would exceed the critical impact threshold
    #[command(name = "critical-paths")]
    CriticalPaths,

    /// Show single points of failure
    ///
    /// Dependencies relied upon by more than three distinct services.
    Spof,

    /// Show circular team dependencies
    ///
    /// Explicitly declared circular edges plus mutual pairs, one entry per
    /// unordered pair.
    Cycles,

    /// Rank teams by summed dependency severity
    #[command(name = "rank-teams")]
    RankTeams,

    /// Rank services by cascade risk
    #[command(name = "rank-services")]
    RankServices,

    /// Generate an aggregate report
    Report(ReportArgs),

    /// Assess the risk of changing a dependency edge
    Assess(AssessArgs),

    /// List registered services with optional filters
    Services(ServicesArgs),

    /// List registered team dependencies with optional filters
    Deps(DepsArgs),

    /// Show engine counters
    Stats,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Faultline dependency risk analyzer");
            println!("Use --help for more information");
            return Ok(());
        };

        let mut engine = execute::load_engine(&self.topology)?;

        match command {
            Commands::Cascade(args) => execute::execute_cascade(&mut engine, args, output_mode),
            Commands::BlastRadius(args) => {
                execute::execute_blast_radius(&engine, args, output_mode)
            }
            Commands::CriticalPaths => execute::execute_critical_paths(&engine, output_mode),
            Commands::Spof => execute::execute_spof(&engine, output_mode),
            Commands::Cycles => execute::execute_cycles(&engine, output_mode),
            Commands::RankTeams => execute::execute_rank_teams(&engine, output_mode),
            Commands::RankServices => execute::execute_rank_services(&engine, output_mode),
            Commands::Report(args) => execute::execute_report(&engine, args, output_mode),
            Commands::Assess(args) => execute::execute_assess(&mut engine, args, output_mode),
            Commands::Services(args) => execute::execute_services(&engine, args, output_mode),
            Commands::Deps(args) => execute::execute_deps(&engine, args, output_mode),
            Commands::Stats => execute::execute_stats(&engine, output_mode),
        }
    }
}
