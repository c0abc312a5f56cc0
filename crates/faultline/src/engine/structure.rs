//! Structural analysis: critical paths, single points of failure, and
//! circular team dependencies.

use super::cascade;
use super::index::ReverseIndex;
use super::store::GraphStore;
use crate::domain::{CircularDependency, CriticalPath, EdgeDirection, RiskLevel, SpofEntry};
use std::collections::HashSet;

/// A cascade whose impact exceeds this share of the graph is a critical path.
const CRITICAL_IMPACT_THRESHOLD_PCT: f64 = 30.0;

/// A dependency name referenced by more than this many distinct services is
/// a single point of failure.
const SPOF_DEPENDENT_THRESHOLD: usize = 3;

/// Simulate every node and keep the ones whose failure exceeds the critical
/// impact threshold, highest impact first.
pub(super) fn critical_paths(store: &GraphStore, max_depth: usize) -> Vec<CriticalPath> {
    let index = ReverseIndex::build(store.services_in_order());
    let total = store.service_count();

    let mut paths: Vec<CriticalPath> = store
        .services_in_order()
        .filter_map(|node| {
            let prediction = cascade::predict(&index, node.id, total, max_depth);
            if prediction.estimated_impact_pct > CRITICAL_IMPACT_THRESHOLD_PCT {
                Some(CriticalPath {
                    node_id: node.id,
                    name: node.name.clone(),
                    impact_pct: prediction.estimated_impact_pct,
                    depth: prediction.cascade_depth,
                    risk: prediction.risk,
                })
            } else {
                None
            }
        })
        .collect();

    paths.sort_by(|a, b| b.impact_pct.total_cmp(&a.impact_pct));
    paths
}

/// Dependency names relied upon by more than [`SPOF_DEPENDENT_THRESHOLD`]
/// distinct services, most-depended-upon first.
///
/// A flagged name yields an entry only when a service with that exact name
/// is registered; dangling flagged names are dropped without comment.
pub(super) fn single_points_of_failure(store: &GraphStore) -> Vec<SpofEntry> {
    let index = ReverseIndex::build(store.services_in_order());

    let mut entries: Vec<SpofEntry> = index
        .dependents_by_name()
        .filter(|(_, dependents)| dependents.len() > SPOF_DEPENDENT_THRESHOLD)
        .filter_map(|(name, dependents)| {
            store.service_by_name(name).map(|node| SpofEntry {
                node: node.clone(),
                dependent_count: dependents.len(),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.dependent_count
            .cmp(&a.dependent_count)
            .then_with(|| a.node.name.cmp(&b.node.name))
    });
    entries
}

/// Circular relationships in the team graph: the union of edges explicitly
/// declared [`EdgeDirection::Circular`] and unordered pairs with edges in
/// both directions, reported once per pair in first-encounter order.
pub(super) fn circular_dependencies(store: &GraphStore) -> Vec<CircularDependency> {
    let directed: HashSet<(&str, &str)> = store
        .edges_in_order()
        .map(|edge| (edge.source_team.as_str(), edge.target_team.as_str()))
        .collect();

    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for edge in store.edges_in_order() {
        let explicit = edge.direction == EdgeDirection::Circular;
        // A team's edge to itself is not a cross-team cycle.
        let implicit = edge.source_team != edge.target_team
            && directed.contains(&(edge.target_team.as_str(), edge.source_team.as_str()));

        if explicit || implicit {
            let pair = CircularDependency::pair(&edge.source_team, &edge.target_team);
            if seen.insert(pair.clone()) {
                result.push(pair);
            }
        }
    }

    if !result.is_empty() {
        tracing::debug!(count = result.len(), "circular team dependencies detected");
    }
    result
}

/// Count of edges at the given standing risk level.
pub(super) fn edges_at_risk(store: &GraphStore, level: RiskLevel) -> usize {
    store
        .edges_in_order()
        .filter(|edge| edge.risk_level == level)
        .count()
}
