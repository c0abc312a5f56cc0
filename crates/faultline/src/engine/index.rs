//! Reverse-dependency index.
//!
//! Answers "who depends on X" for the current node set. The index is
//! rebuilt in full on every analysis call — O(V+E) against bounded stores —
//! rather than maintained incrementally; the output is always identical to
//! a naive rebuild, which keeps every analysis a pure function of current
//! store contents.
//!
//! # Graph Representation
//!
//! The petgraph `DiGraph` holds one node per live service and one edge per
//! *resolved* dependency declaration, directed **dependency -> dependent**:
//! the direction a failure propagates. Dependency names that resolve to no
//! registered service get no edge and no map entry (dangling names are
//! tolerated, not errors).

use crate::domain::{NodeId, ServiceNode};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Per-query index over the current node set.
pub(super) struct ReverseIndex {
    /// Dependency name -> ids of distinct services declaring it
    dependents_by_name: HashMap<String, Vec<NodeId>>,

    /// Propagation graph: edge `a -> b` means a failure of `a` reaches `b`
    pub(super) graph: DiGraph<NodeId, ()>,

    /// Service id -> graph node
    pub(super) node_map: HashMap<NodeId, NodeIndex>,
}

impl ReverseIndex {
    /// Build the index from services in insertion order.
    ///
    /// When several live services share a name, the name resolves to the
    /// most recently registered one, matching store lookup semantics.
    pub(super) fn build<'a>(services: impl Iterator<Item = &'a ServiceNode> + Clone) -> Self {
        let mut name_to_id: HashMap<&str, NodeId> = HashMap::new();
        for node in services.clone() {
            name_to_id.insert(node.name.as_str(), node.id);
        }

        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        for node in services.clone() {
            let idx = graph.add_node(node.id);
            node_map.insert(node.id, idx);
        }

        let mut dependents_by_name: HashMap<String, Vec<NodeId>> = HashMap::new();
        for node in services {
            // A service listing the same name twice still counts as one
            // distinct dependent.
            let mut declared: HashSet<&str> = HashSet::new();
            for dep_name in &node.dependencies {
                if !declared.insert(dep_name.as_str()) {
                    continue;
                }

                dependents_by_name
                    .entry(dep_name.clone())
                    .or_default()
                    .push(node.id);

                if let Some(&dep_id) = name_to_id.get(dep_name.as_str()) {
                    graph.add_edge(node_map[&dep_id], node_map[&node.id], ());
                }
            }
        }

        Self {
            dependents_by_name,
            graph,
            node_map,
        }
    }

    /// Dependency names with the distinct services declaring each.
    pub(super) fn dependents_by_name(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.dependents_by_name
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FailureType, PropagationMode};
    use chrono::Utc;

    fn node(id: u64, name: &str, deps: &[&str]) -> ServiceNode {
        ServiceNode {
            id: NodeId(id),
            name: name.to_string(),
            dependencies: deps.iter().map(|d| (*d).to_string()).collect(),
            failure_type: FailureType::Crash,
            propagation_mode: PropagationMode::Immediate,
            criticality_score: 5.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn records_dependents_under_each_name() {
        let nodes = vec![
            node(0, "db", &[]),
            node(1, "api", &["db"]),
            node(2, "worker", &["db"]),
        ];
        let index = ReverseIndex::build(nodes.iter());

        let (_, dependents) = index
            .dependents_by_name()
            .find(|(name, _)| *name == "db")
            .unwrap();
        assert_eq!(dependents, &[NodeId(1), NodeId(2)]);
    }

    #[test]
    fn dangling_names_get_map_entries_but_no_edges() {
        let nodes = vec![node(0, "api", &["ghost"])];
        let index = ReverseIndex::build(nodes.iter());

        assert!(
            index
                .dependents_by_name()
                .any(|(name, deps)| name == "ghost" && deps.len() == 1)
        );
        assert_eq!(index.graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_declarations_count_once() {
        let nodes = vec![node(0, "db", &[]), node(1, "api", &["db", "db"])];
        let index = ReverseIndex::build(nodes.iter());

        let (_, dependents) = index
            .dependents_by_name()
            .find(|(name, _)| *name == "db")
            .unwrap();
        assert_eq!(dependents.len(), 1);
        assert_eq!(index.graph.edge_count(), 1);
    }
}
