//! CLI argument structs for all commands.

use clap::Parser;

use super::types::{FailureTypeArg, PropagationModeArg, ReportKindArg};
use super::validators::{validate_description, validate_name};

/// Arguments for the `cascade` command
#[derive(Parser, Debug, Clone)]
pub struct CascadeArgs {
    /// Service name to fail
    #[arg(value_parser = validate_name)]
    pub service: String,
}

/// Arguments for the `blast-radius` command
#[derive(Parser, Debug, Clone)]
pub struct BlastRadiusArgs {
    /// Team whose direct downstream teams to collect
    #[arg(value_parser = validate_name)]
    pub team: String,
}

/// Arguments for the `assess` command
#[derive(Parser, Debug, Clone)]
pub struct AssessArgs {
    /// Numeric edge id, as printed by `deps`
    pub edge: u64,

    /// What is changing on this edge
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: String,

    /// Who is asking
    #[arg(long = "by", value_parser = validate_name)]
    pub assessed_by: String,
}

/// Arguments for the `services` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ServicesArgs {
    /// Filter by failure type
    #[arg(short = 'f', long = "failure", value_enum)]
    pub failure_type: Option<FailureTypeArg>,

    /// Filter by propagation mode
    #[arg(short = 'p', long = "propagation", value_enum)]
    pub propagation_mode: Option<PropagationModeArg>,

    /// Maximum number of services to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the `deps` command
#[derive(Parser, Debug, Clone, Default)]
pub struct DepsArgs {
    /// Filter by source team
    #[arg(short, long, value_parser = validate_name)]
    pub source_team: Option<String>,

    /// Filter by target team
    #[arg(short, long, value_parser = validate_name)]
    pub target_team: Option<String>,

    /// Maximum number of edges to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the `report` command
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Which report to generate
    #[arg(value_enum)]
    pub kind: ReportKindArg,
}
