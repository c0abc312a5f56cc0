//! Change risk assessment and single-hop blast radius.
//!
//! Both operations here are deliberately single-hop, in contrast to the
//! multi-hop cascade simulator: a change assessment names only the two
//! endpoint teams of the edge being changed, and a team's blast radius is
//! the distinct set of directly downstream teams. Neither performs
//! transitive closure.

use super::store::GraphStore;
use crate::domain::{BlastRadius, EdgeId, RiskAssessment};
use chrono::Utc;
use std::collections::HashSet;

/// Assess a proposed change on the given edge.
///
/// Returns `None` for an unknown (or evicted) edge id.
pub(super) fn assess(
    store: &GraphStore,
    edge_id: EdgeId,
    change_description: &str,
    assessed_by: &str,
) -> Option<RiskAssessment> {
    let edge = store.edge(edge_id)?;

    let mitigation = format!(
        "Standing risk is {}; schedule {} coordination between {} and {} before rollout",
        edge.risk_level, edge.coordination_need, edge.source_team, edge.target_team
    );

    Some(RiskAssessment {
        edge_id,
        change_description: change_description.to_string(),
        blast_radius_teams: vec![edge.source_team.clone(), edge.target_team.clone()],
        risk_level: edge.risk_level,
        mitigation,
        assessed_by: assessed_by.to_string(),
        assessed_at: Utc::now(),
    })
}

/// Collect the distinct target teams of edges sourced at `team`, in
/// first-seen order. A team with no outgoing edges gets an empty radius.
pub(super) fn blast_radius(store: &GraphStore, team: &str) -> BlastRadius {
    let mut seen = HashSet::new();
    let mut affected_teams = Vec::new();

    for edge in store.edges_in_order() {
        if edge.source_team == team && seen.insert(edge.target_team.as_str()) {
            affected_teams.push(edge.target_team.clone());
        }
    }

    let affected_count = affected_teams.len();
    BlastRadius {
        team: team.to_string(),
        affected_teams,
        affected_count,
    }
}
