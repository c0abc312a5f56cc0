//! Rankings and aggregate reports.
//!
//! Reports are pure functions of current store contents: they simulate
//! fresh per-node cascades rather than reading prediction history, so two
//! calls without an intervening mutation produce structurally equal output.

use super::cascade;
use super::index::ReverseIndex;
use super::store::GraphStore;
use super::structure;
use crate::domain::{EdgeDirection, RiskLevel, ServiceRisk, TeamRisk};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average cascade depth above which the cascade report recommends
/// flattening dependency chains.
const DEEP_CASCADE_THRESHOLD: f64 = 3.0;

/// Average SLA impact above which the risk report recommends tightening
/// fallback budgets.
const SLA_IMPACT_THRESHOLD_PCT: f64 = 25.0;

/// Recommendation emitted when data exists but no threshold trigger fires.
const NOTHING_SIGNIFICANT: &str = "No significant risk indicators detected";

/// Aggregate view of service-graph cascade exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Live service count at report time
    pub total_services: usize,

    /// Mean cascade depth over a fresh per-node simulation
    pub average_cascade_depth: f64,

    /// Deepest cascade observed in the sweep
    pub max_cascade_depth_observed: usize,

    /// Per-level counts over the per-node cascade classifications
    pub risk_distribution: BTreeMap<RiskLevel, usize>,

    /// Nodes whose cascade impact exceeds the critical threshold
    pub critical_path_count: usize,

    /// Flagged shared dependencies
    pub single_point_of_failure_count: usize,

    /// Templated, threshold-triggered guidance
    pub recommendations: Vec<String>,
}

/// Aggregate view of team-graph standing risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Live edge count at report time
    pub total_dependencies: usize,

    /// Distinct teams appearing on either side of an edge
    pub team_count: usize,

    /// Per-direction edge counts
    pub direction_distribution: BTreeMap<EdgeDirection, usize>,

    /// Per-level edge counts
    pub risk_distribution: BTreeMap<RiskLevel, usize>,

    /// Mean declared SLA impact across edges
    pub average_sla_impact_pct: f64,

    /// Unordered circular team pairs
    pub circular_dependency_count: usize,

    /// Edges whose change requires high coordination
    pub high_coordination_count: usize,

    /// Templated, threshold-triggered guidance
    pub recommendations: Vec<String>,
}

fn zeroed_risk_distribution() -> BTreeMap<RiskLevel, usize> {
    RiskLevel::ALL.iter().map(|level| (*level, 0)).collect()
}

fn zeroed_direction_distribution() -> BTreeMap<EdgeDirection, usize> {
    EdgeDirection::ALL
        .iter()
        .map(|direction| (*direction, 0))
        .collect()
}

/// Rank every team touching the edge set by summed edge severity.
///
/// Equal scores are broken by team name so the ranking is stable across
/// calls.
pub(super) fn rank_teams(store: &GraphStore) -> Vec<TeamRisk> {
    let mut scores: BTreeMap<String, u32> = BTreeMap::new();
    for edge in store.edges_in_order() {
        let severity = edge.risk_level.severity();
        *scores.entry(edge.source_team.clone()).or_insert(0) += severity;
        if edge.target_team != edge.source_team {
            *scores.entry(edge.target_team.clone()).or_insert(0) += severity;
        }
    }

    let mut ranked: Vec<TeamRisk> = scores
        .into_iter()
        .map(|(team, score)| TeamRisk { team, score })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.team.cmp(&b.team)));
    ranked
}

/// Rank every service by its cascade classification, then impact.
pub(super) fn rank_services(store: &GraphStore, max_depth: usize) -> Vec<ServiceRisk> {
    let index = ReverseIndex::build(store.services_in_order());
    let total = store.service_count();

    let mut ranked: Vec<ServiceRisk> = store
        .services_in_order()
        .map(|node| {
            let prediction = cascade::predict(&index, node.id, total, max_depth);
            ServiceRisk {
                node_id: node.id,
                name: node.name.clone(),
                risk: prediction.risk,
                impact_pct: prediction.estimated_impact_pct,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.risk
            .severity()
            .cmp(&a.risk.severity())
            .then_with(|| b.impact_pct.total_cmp(&a.impact_pct))
    });
    ranked
}

/// Build the cascade report over the service graph.
pub(super) fn cascade_report(store: &GraphStore, max_depth: usize) -> CascadeReport {
    let total = store.service_count();
    let mut risk_distribution = zeroed_risk_distribution();

    if total == 0 {
        return CascadeReport {
            total_services: 0,
            average_cascade_depth: 0.0,
            max_cascade_depth_observed: 0,
            risk_distribution,
            critical_path_count: 0,
            single_point_of_failure_count: 0,
            recommendations: Vec::new(),
        };
    }

    let index = ReverseIndex::build(store.services_in_order());
    let mut depth_sum = 0usize;
    let mut max_observed = 0usize;
    let mut critical_count = 0usize;

    for node in store.services_in_order() {
        let prediction = cascade::predict(&index, node.id, total, max_depth);
        if let Some(count) = risk_distribution.get_mut(&prediction.risk) {
            *count += 1;
        }
        depth_sum += prediction.cascade_depth;
        if prediction.cascade_depth > max_observed {
            max_observed = prediction.cascade_depth;
        }
        if prediction.risk == RiskLevel::Critical {
            critical_count += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_cascade_depth = depth_sum as f64 / total as f64;
    let critical_path_count = structure::critical_paths(store, max_depth).len();
    let single_point_of_failure_count = structure::single_points_of_failure(store).len();

    let mut recommendations = Vec::new();
    if single_point_of_failure_count > 0 {
        recommendations.push(format!(
            "Introduce redundancy for {single_point_of_failure_count} single point(s) of failure"
        ));
    }
    if critical_path_count > 0 {
        recommendations.push(format!(
            "Review fallback plans for {critical_path_count} critical failure path(s)"
        ));
    }
    if critical_count > 0 {
        recommendations.push(format!(
            "{critical_count} service(s) predict a critical cascade; add bulkheads before the next change window"
        ));
    }
    if average_cascade_depth > DEEP_CASCADE_THRESHOLD {
        recommendations.push(format!(
            "Average cascade depth {average_cascade_depth:.1} exceeds {DEEP_CASCADE_THRESHOLD}; flatten deep dependency chains"
        ));
    }
    if recommendations.is_empty() {
        recommendations.push(NOTHING_SIGNIFICANT.to_string());
    }

    CascadeReport {
        total_services: total,
        average_cascade_depth,
        max_cascade_depth_observed: max_observed,
        risk_distribution,
        critical_path_count,
        single_point_of_failure_count,
        recommendations,
    }
}

/// Build the risk report over the team graph.
pub(super) fn risk_report(store: &GraphStore) -> RiskReport {
    let total = store.edge_count();
    let mut direction_distribution = zeroed_direction_distribution();
    let mut risk_distribution = zeroed_risk_distribution();

    if total == 0 {
        return RiskReport {
            total_dependencies: 0,
            team_count: 0,
            direction_distribution,
            risk_distribution,
            average_sla_impact_pct: 0.0,
            circular_dependency_count: 0,
            high_coordination_count: 0,
            recommendations: Vec::new(),
        };
    }

    let mut teams = std::collections::BTreeSet::new();
    let mut sla_sum = 0.0;
    let mut high_coordination_count = 0usize;

    for edge in store.edges_in_order() {
        if let Some(count) = direction_distribution.get_mut(&edge.direction) {
            *count += 1;
        }
        if let Some(count) = risk_distribution.get_mut(&edge.risk_level) {
            *count += 1;
        }
        teams.insert(edge.source_team.clone());
        teams.insert(edge.target_team.clone());
        sla_sum += edge.sla_impact_pct;
        if edge.coordination_need == crate::domain::CoordinationNeed::High {
            high_coordination_count += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_sla_impact_pct = sla_sum / total as f64;
    let circular_dependency_count = structure::circular_dependencies(store).len();
    let critical_edges = structure::edges_at_risk(store, RiskLevel::Critical);

    let mut recommendations = Vec::new();
    if circular_dependency_count > 0 {
        recommendations.push(format!(
            "Break {circular_dependency_count} circular team dependency(ies); they block independent rollouts"
        ));
    }
    if critical_edges > 0 {
        recommendations.push(format!(
            "{critical_edges} dependency(ies) carry critical standing risk; review their contracts"
        ));
    }
    if high_coordination_count > 0 {
        recommendations.push(format!(
            "{high_coordination_count} dependency(ies) need high coordination; pre-schedule joint change windows"
        ));
    }
    if average_sla_impact_pct > SLA_IMPACT_THRESHOLD_PCT {
        recommendations.push(format!(
            "Average SLA impact {average_sla_impact_pct:.1}% is above {SLA_IMPACT_THRESHOLD_PCT}%; tighten fallback budgets"
        ));
    }
    if recommendations.is_empty() {
        recommendations.push(NOTHING_SIGNIFICANT.to_string());
    }

    RiskReport {
        total_dependencies: total,
        team_count: teams.len(),
        direction_distribution,
        risk_distribution,
        average_sla_impact_pct,
        circular_dependency_count,
        high_coordination_count,
        recommendations,
    }
}
