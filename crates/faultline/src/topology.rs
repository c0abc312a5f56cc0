//! Topology ingestion documents.
//!
//! A topology file is the snapshot a service catalog or CMDB exports for
//! analysis: the engine's limits plus the service nodes and cross-team
//! edges to register. The engine itself never touches the filesystem; the
//! CLI loads a document and replays it into a fresh engine per invocation.
//!
//! # Format
//!
//! ```yaml
//! limits:
//!   max-cascade-depth: 10
//! services:
//!   - name: api-gateway
//!     dependencies: [auth, core-db]
//!     failure-type: crash
//!     propagation-mode: immediate
//!     criticality: 8.5
//! dependencies:
//!   - source-team: platform
//!     target-team: payments
//!     source-service: api-gateway
//!     target-service: billing
//!     direction: downstream
//!     risk-level: high
//!     coordination-need: medium
//!     sla-impact: 25.0
//! ```

use crate::config::EngineConfig;
use crate::domain::{
    CoordinationNeed, EdgeDirection, FailureType, NewDependency, NewService, PropagationMode,
    RiskLevel,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parsed topology document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyFile {
    /// Optional engine limits; defaults apply when absent
    #[serde(default)]
    pub limits: Option<EngineConfig>,

    /// Service nodes to register, in document order
    #[serde(default)]
    pub services: Vec<ServiceSpec>,

    /// Cross-team edges to register, in document order
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

/// One service entry in a topology document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Service name
    pub name: String,

    /// Names of services this service depends on
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Failure mode
    #[serde(rename = "failure-type")]
    pub failure_type: FailureType,

    /// Propagation mode
    #[serde(rename = "propagation-mode")]
    pub propagation_mode: PropagationMode,

    /// Criticality score
    #[serde(rename = "criticality", default)]
    pub criticality_score: f64,
}

/// One cross-team edge entry in a topology document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Team that owns the depending side
    #[serde(rename = "source-team")]
    pub source_team: String,

    /// Team that owns the depended-on side
    #[serde(rename = "target-team")]
    pub target_team: String,

    /// Service on the source side
    #[serde(rename = "source-service")]
    pub source_service: String,

    /// Service on the target side
    #[serde(rename = "target-service")]
    pub target_service: String,

    /// Direction of the relationship
    pub direction: EdgeDirection,

    /// Standing risk of this edge
    #[serde(rename = "risk-level")]
    pub risk_level: RiskLevel,

    /// Coordination required to change either side
    #[serde(rename = "coordination-need")]
    pub coordination_need: CoordinationNeed,

    /// Share of the source team's SLA at stake, in percent
    #[serde(rename = "sla-impact", default)]
    pub sla_impact_pct: f64,
}

impl TopologyFile {
    /// Load a topology document from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Topology(format!("{}: {}", path.display(), e)))
    }
}

impl From<ServiceSpec> for NewService {
    fn from(spec: ServiceSpec) -> Self {
        Self {
            name: spec.name,
            dependencies: spec.dependencies,
            failure_type: spec.failure_type,
            propagation_mode: spec.propagation_mode,
            criticality_score: spec.criticality_score,
        }
    }
}

impl From<DependencySpec> for NewDependency {
    fn from(spec: DependencySpec) -> Self {
        Self {
            source_team: spec.source_team,
            target_team: spec.target_team,
            source_service: spec.source_service,
            target_service: spec.target_service,
            direction: spec.direction,
            risk_level: spec.risk_level,
            coordination_need: spec.coordination_need,
            sla_impact_pct: spec.sla_impact_pct,
        }
    }
}
