//! Cascade simulation.
//!
//! Bounded-depth breadth-first propagation from a failing node across the
//! reverse-dependency graph. A node is enqueued at most once (visited-set
//! discipline), so traversal terminates on any graph, cycles included.
//! Nodes that would first become reachable beyond the depth bound are
//! silently truncated — not explored, not counted, not reported as partial.

use super::index::ReverseIndex;
use super::risk;
use crate::domain::{CascadePrediction, NodeId, RiskLevel};
use chrono::Utc;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

/// Simulate the failure of `source` against the given index.
///
/// An unknown source yields the empty prediction: no affected nodes, depth
/// zero, lowest risk. `total_nodes` is the live node count used for the
/// impact percentage (zero nodes means zero impact).
pub(super) fn predict(
    index: &ReverseIndex,
    source: NodeId,
    total_nodes: usize,
    max_depth: usize,
) -> CascadePrediction {
    let Some(&start) = index.node_map.get(&source) else {
        return CascadePrediction {
            source,
            affected: Vec::new(),
            cascade_depth: 0,
            risk: RiskLevel::Negligible,
            estimated_impact_pct: 0.0,
            predicted_at: Utc::now(),
        };
    };

    let mut affected = Vec::new();
    let mut cascade_depth = 0;
    let mut visited = HashSet::new();
    visited.insert(start);

    let mut queue: VecDeque<(_, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        // Children would land at depth + 1; past the bound they are
        // truncated rather than partially reported.
        if depth >= max_depth {
            continue;
        }

        for edge in index.graph.edges(current) {
            let target = edge.target();
            if visited.insert(target) {
                let next_depth = depth + 1;
                affected.push(index.graph[target]);
                if next_depth > cascade_depth {
                    cascade_depth = next_depth;
                }
                queue.push_back((target, next_depth));
            }
        }
    }

    let estimated_impact_pct = if total_nodes == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let pct = affected.len() as f64 / total_nodes as f64 * 100.0;
        pct
    };

    CascadePrediction {
        source,
        affected,
        cascade_depth,
        risk: risk::classify_cascade(cascade_depth, estimated_impact_pct),
        estimated_impact_pct,
        predicted_at: Utc::now(),
    }
}
