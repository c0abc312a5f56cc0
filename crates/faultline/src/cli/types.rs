//! CLI value enums and domain type conversions.
//!
//! Filter parameters cross the CLI boundary as validated sum types, never
//! as raw strings: unknown values are rejected by clap at parse time.

use clap::ValueEnum;

use crate::domain::{FailureType, PropagationMode};

/// Failure type filter for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTypeArg {
    /// Process exits or becomes unreachable
    Crash,
    /// Requests hang until client deadlines fire
    Timeout,
    /// Partial loss of function, still serving
    Degradation,
    /// Writes lost or corrupted
    #[value(name = "data-loss")]
    DataLoss,
    /// Saturation under load
    Overload,
}

impl std::fmt::Display for FailureTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crash => write!(f, "crash"),
            Self::Timeout => write!(f, "timeout"),
            Self::Degradation => write!(f, "degradation"),
            Self::DataLoss => write!(f, "data-loss"),
            Self::Overload => write!(f, "overload"),
        }
    }
}

/// Propagation mode filter for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationModeArg {
    /// Dependents fail as soon as the service does
    Immediate,
    /// Dependents fail after caches/retries are exhausted
    Delayed,
    /// Dependents fail sporadically
    Intermittent,
    /// Failure is contained by bulkheads or fallbacks
    Isolated,
}

impl std::fmt::Display for PropagationModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Delayed => write!(f, "delayed"),
            Self::Intermittent => write!(f, "intermittent"),
            Self::Isolated => write!(f, "isolated"),
        }
    }
}

/// Which aggregate report to generate
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKindArg {
    /// Service-graph cascade exposure
    Cascade,
    /// Team-graph standing risk
    Risk,
}

impl std::fmt::Display for ReportKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cascade => write!(f, "cascade"),
            Self::Risk => write!(f, "risk"),
        }
    }
}

// ============================================================================
// Domain Type Conversions
// ============================================================================

impl From<FailureTypeArg> for FailureType {
    fn from(arg: FailureTypeArg) -> Self {
        match arg {
            FailureTypeArg::Crash => FailureType::Crash,
            FailureTypeArg::Timeout => FailureType::Timeout,
            FailureTypeArg::Degradation => FailureType::Degradation,
            FailureTypeArg::DataLoss => FailureType::DataLoss,
            FailureTypeArg::Overload => FailureType::Overload,
        }
    }
}

impl From<PropagationModeArg> for PropagationMode {
    fn from(arg: PropagationModeArg) -> Self {
        match arg {
            PropagationModeArg::Immediate => PropagationMode::Immediate,
            PropagationModeArg::Delayed => PropagationMode::Delayed,
            PropagationModeArg::Intermittent => PropagationMode::Intermittent,
            PropagationModeArg::Isolated => PropagationMode::Isolated,
        }
    }
}
