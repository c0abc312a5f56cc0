//! Domain types for dependency risk analysis.
//!
//! This module contains the core domain types for the faultline engine:
//! service nodes and their dependency declarations, cross-team dependency
//! edges, and the derived analysis outputs (cascade predictions, risk
//! assessments, rankings, reports).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a service node.
///
/// Assigned once at registration from a monotonic counter and never reused,
/// even after eviction or `clear_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svc-{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Unique identifier for a cross-team dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dep-{}", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A registered service in the dependency graph.
///
/// Immutable once created. Dependency entries are service *names*; a name
/// that never resolves to a registered node is tolerated (dangling) and
/// simply produces no reverse-index entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceNode {
    /// Unique identifier
    pub id: NodeId,

    /// Service name, the key other services reference in their dependency lists
    pub name: String,

    /// Names of services this service depends on
    pub dependencies: Vec<String>,

    /// How this service fails
    pub failure_type: FailureType,

    /// How a failure of this service spreads to dependents
    pub propagation_mode: PropagationMode,

    /// Operator-assigned criticality (0.0 = inert, 10.0 = business-critical)
    pub criticality_score: f64,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Failure mode of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    /// Process exits or becomes unreachable
    Crash,

    /// Requests hang until client deadlines fire
    Timeout,

    /// Partial loss of function, still serving
    Degradation,

    /// Writes lost or corrupted
    DataLoss,

    /// Saturation under load
    Overload,
}

/// How a failure propagates to dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationMode {
    /// Dependents fail as soon as the service does
    Immediate,

    /// Dependents fail after caches/retries are exhausted
    Delayed,

    /// Dependents fail sporadically
    Intermittent,

    /// Failure is contained by bulkheads or fallbacks
    Isolated,
}

/// Direction of a cross-team dependency edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// Source consumes from target
    Upstream,

    /// Source feeds target
    Downstream,

    /// Both teams call each other
    Bidirectional,

    /// Coupling through an intermediary
    Transitive,

    /// Declared mutual dependency
    Circular,
}

impl EdgeDirection {
    /// All directions, in declaration order. Used for report distributions.
    pub const ALL: [EdgeDirection; 5] = [
        Self::Upstream,
        Self::Downstream,
        Self::Bidirectional,
        Self::Transitive,
        Self::Circular,
    ];
}

/// Ordered risk level shared by cascade predictions and team edges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Not worth tracking
    Negligible,

    /// Routine exposure
    Low,

    /// Needs an owner
    Moderate,

    /// Needs a plan
    High,

    /// Needs attention now
    Critical,
}

impl RiskLevel {
    /// Numeric severity used for risk-score summation (1..=5).
    pub fn severity(self) -> u32 {
        match self {
            Self::Negligible => 1,
            Self::Low => 2,
            Self::Moderate => 3,
            Self::High => 4,
            Self::Critical => 5,
        }
    }

    /// All levels, lowest first. Used for report distributions.
    pub const ALL: [RiskLevel; 5] = [
        Self::Negligible,
        Self::Low,
        Self::Moderate,
        Self::High,
        Self::Critical,
    ];
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negligible => write!(f, "negligible"),
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// How much cross-team coordination a change on an edge requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationNeed {
    /// Announce and go
    Low,

    /// Agree on a window
    Medium,

    /// Joint rollout with both teams on call
    High,
}

impl fmt::Display for CoordinationNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A dependency relationship between two teams, anchored to the concrete
/// services that realize it.
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossTeamEdge {
    /// Unique identifier
    pub id: EdgeId,

    /// Team that owns the depending side
    pub source_team: String,

    /// Team that owns the depended-on side
    pub target_team: String,

    /// Service on the source side
    pub source_service: String,

    /// Service on the target side
    pub target_service: String,

    /// Direction of the relationship
    pub direction: EdgeDirection,

    /// Standing risk of this edge
    pub risk_level: RiskLevel,

    /// Coordination required to change either side
    pub coordination_need: CoordinationNeed,

    /// Share of the source team's SLA at stake, in percent
    pub sla_impact_pct: f64,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Data for registering a new service node.
#[derive(Debug, Clone)]
pub struct NewService {
    /// Service name
    pub name: String,

    /// Names of services this service depends on
    pub dependencies: Vec<String>,

    /// Failure mode
    pub failure_type: FailureType,

    /// Propagation mode
    pub propagation_mode: PropagationMode,

    /// Criticality score
    pub criticality_score: f64,
}

/// Data for registering a new cross-team dependency edge.
#[derive(Debug, Clone)]
pub struct NewDependency {
    /// Team that owns the depending side
    pub source_team: String,

    /// Team that owns the depended-on side
    pub target_team: String,

    /// Service on the source side
    pub source_service: String,

    /// Service on the target side
    pub target_service: String,

    /// Direction of the relationship
    pub direction: EdgeDirection,

    /// Standing risk of this edge
    pub risk_level: RiskLevel,

    /// Coordination required to change either side
    pub coordination_need: CoordinationNeed,

    /// Share of the source team's SLA at stake, in percent
    pub sla_impact_pct: f64,
}

/// Filter for querying service nodes.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// Filter by failure type
    pub failure_type: Option<FailureType>,

    /// Filter by propagation mode
    pub propagation_mode: Option<PropagationMode>,

    /// Keep only the most recently inserted matches
    pub limit: Option<usize>,
}

/// Filter for querying cross-team edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyFilter {
    /// Filter by source team
    pub source_team: Option<String>,

    /// Filter by target team
    pub target_team: Option<String>,

    /// Keep only the most recently inserted matches
    pub limit: Option<usize>,
}

/// Outcome of a cascade simulation from a single failing node.
///
/// Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadePrediction {
    /// The node assumed to fail
    pub source: NodeId,

    /// Nodes transitively affected, in BFS discovery order (source excluded)
    pub affected: Vec<NodeId>,

    /// Maximum BFS depth reached among affected nodes
    pub cascade_depth: usize,

    /// Classified risk for this cascade
    pub risk: RiskLevel,

    /// Affected share of the whole graph, in percent
    pub estimated_impact_pct: f64,

    /// When the simulation ran
    pub predicted_at: DateTime<Utc>,
}

/// Assessment of a proposed change on a cross-team edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The edge being changed
    pub edge_id: EdgeId,

    /// Free-form description of the change
    pub change_description: String,

    /// The two endpoint teams of the edge. No transitive expansion.
    pub blast_radius_teams: Vec<String>,

    /// Risk level, copied from the edge
    pub risk_level: RiskLevel,

    /// Templated mitigation guidance
    pub mitigation: String,

    /// Who requested the assessment
    pub assessed_by: String,

    /// When the assessment ran
    pub assessed_at: DateTime<Utc>,
}

/// Single-hop blast radius of a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlastRadius {
    /// The team assumed to fail
    pub team: String,

    /// Distinct target teams of edges sourced at `team`, first-seen order
    pub affected_teams: Vec<String>,

    /// `affected_teams.len()`, kept explicit for report consumers
    pub affected_count: usize,
}

/// A node whose failure cascade exceeds the critical-impact threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPath {
    /// The failing node
    pub node_id: NodeId,

    /// Name of the failing node
    pub name: String,

    /// Impact of its cascade, in percent
    pub impact_pct: f64,

    /// Depth of its cascade
    pub depth: usize,

    /// Classified risk of its cascade
    pub risk: RiskLevel,
}

/// A dependency relied upon by more distinct services than the SPOF threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpofEntry {
    /// The shared dependency node
    pub node: ServiceNode,

    /// Number of distinct services that declare a dependency on it
    pub dependent_count: usize,
}

/// A circular relationship between two teams, reported once per unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircularDependency {
    /// Lexicographically smaller team of the pair
    pub team_a: String,

    /// Lexicographically larger team of the pair
    pub team_b: String,
}

impl CircularDependency {
    /// Build the canonical unordered pair for two teams.
    pub fn pair(first: &str, second: &str) -> Self {
        if first <= second {
            Self {
                team_a: first.to_string(),
                team_b: second.to_string(),
            }
        } else {
            Self {
                team_a: second.to_string(),
                team_b: first.to_string(),
            }
        }
    }
}

/// A team ranked by summed edge severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRisk {
    /// Team name
    pub team: String,

    /// Sum of `RiskLevel::severity` over every edge touching the team
    pub score: u32,
}

/// A service ranked by its cascade risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRisk {
    /// The service
    pub node_id: NodeId,

    /// Name of the service
    pub name: String,

    /// Classified cascade risk
    pub risk: RiskLevel,

    /// Impact of its cascade, in percent
    pub impact_pct: f64,
}
