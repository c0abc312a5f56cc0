//! Bounded node and edge stores.
//!
//! Both collections are insertion-ordered and bounded: once a store reaches
//! its configured capacity, the oldest entries are evicted from the front
//! until the bound holds again (FIFO, not LRU — reads never reorder).
//! Surviving entries keep their original relative order.
//!
//! Ids come from monotonic counters that are never rewound, so an id
//! observed once refers to the same registration forever, even after
//! eviction or a full clear.

use crate::domain::{
    CrossTeamEdge, DependencyFilter, EdgeId, NewDependency, NewService, NodeId, ServiceFilter,
    ServiceNode,
};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};

/// Insertion-ordered, bounded storage for service nodes and team edges.
///
/// `HashMap` for O(1) id lookups, `VecDeque` of ids for insertion order and
/// front eviction. Every id in an order queue has a live entry in the
/// matching map.
pub(super) struct GraphStore {
    max_services: usize,
    max_dependencies: usize,

    services: HashMap<NodeId, ServiceNode>,
    service_order: VecDeque<NodeId>,

    edges: HashMap<EdgeId, CrossTeamEdge>,
    edge_order: VecDeque<EdgeId>,

    next_node_id: u64,
    next_edge_id: u64,

    services_evicted: u64,
    dependencies_evicted: u64,
}

impl GraphStore {
    pub(super) fn new(max_services: usize, max_dependencies: usize) -> Self {
        Self {
            max_services,
            max_dependencies,
            services: HashMap::new(),
            service_order: VecDeque::new(),
            edges: HashMap::new(),
            edge_order: VecDeque::new(),
            next_node_id: 0,
            next_edge_id: 0,
            services_evicted: 0,
            dependencies_evicted: 0,
        }
    }

    /// Register a service node, evicting the oldest entries past capacity.
    pub(super) fn insert_service(&mut self, new_service: NewService) -> ServiceNode {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let node = ServiceNode {
            id,
            name: new_service.name,
            dependencies: new_service.dependencies,
            failure_type: new_service.failure_type,
            propagation_mode: new_service.propagation_mode,
            criticality_score: new_service.criticality_score,
            created_at: Utc::now(),
        };

        self.services.insert(id, node.clone());
        self.service_order.push_back(id);

        while self.service_order.len() > self.max_services {
            if let Some(oldest) = self.service_order.pop_front() {
                self.services.remove(&oldest);
                self.services_evicted += 1;
                tracing::debug!(evicted = %oldest, "service store at capacity");
            }
        }

        node
    }

    /// Register a cross-team edge, evicting the oldest entries past capacity.
    pub(super) fn insert_edge(&mut self, new_dependency: NewDependency) -> CrossTeamEdge {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;

        let edge = CrossTeamEdge {
            id,
            source_team: new_dependency.source_team,
            target_team: new_dependency.target_team,
            source_service: new_dependency.source_service,
            target_service: new_dependency.target_service,
            direction: new_dependency.direction,
            risk_level: new_dependency.risk_level,
            coordination_need: new_dependency.coordination_need,
            sla_impact_pct: new_dependency.sla_impact_pct,
            created_at: Utc::now(),
        };

        self.edges.insert(id, edge.clone());
        self.edge_order.push_back(id);

        while self.edge_order.len() > self.max_dependencies {
            if let Some(oldest) = self.edge_order.pop_front() {
                self.edges.remove(&oldest);
                self.dependencies_evicted += 1;
                tracing::debug!(evicted = %oldest, "edge store at capacity");
            }
        }

        edge
    }

    pub(super) fn service(&self, id: NodeId) -> Option<&ServiceNode> {
        self.services.get(&id)
    }

    pub(super) fn edge(&self, id: EdgeId) -> Option<&CrossTeamEdge> {
        self.edges.get(&id)
    }

    /// All live services in insertion order.
    pub(super) fn services_in_order(&self) -> impl Iterator<Item = &ServiceNode> + Clone {
        self.service_order
            .iter()
            .filter_map(|id| self.services.get(id))
    }

    /// All live edges in insertion order.
    pub(super) fn edges_in_order(&self) -> impl Iterator<Item = &CrossTeamEdge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// The most recently registered service with the given name.
    pub(super) fn service_by_name(&self, name: &str) -> Option<&ServiceNode> {
        self.service_order
            .iter()
            .rev()
            .filter_map(|id| self.services.get(id))
            .find(|node| node.name == name)
    }

    /// Matching services: the `limit` most recently inserted, returned in
    /// original insertion order.
    pub(super) fn list_services(&self, filter: &ServiceFilter) -> Vec<ServiceNode> {
        let mut matches: Vec<ServiceNode> = self
            .services_in_order()
            .filter(|node| {
                if let Some(failure_type) = filter.failure_type {
                    if node.failure_type != failure_type {
                        return false;
                    }
                }

                if let Some(propagation_mode) = filter.propagation_mode {
                    if node.propagation_mode != propagation_mode {
                        return false;
                    }
                }

                true
            })
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            if matches.len() > limit {
                matches.drain(..matches.len() - limit);
            }
        }

        matches
    }

    /// Matching edges, same recency-window semantics as [`Self::list_services`].
    pub(super) fn list_edges(&self, filter: &DependencyFilter) -> Vec<CrossTeamEdge> {
        let mut matches: Vec<CrossTeamEdge> = self
            .edges_in_order()
            .filter(|edge| {
                if let Some(source_team) = &filter.source_team {
                    if &edge.source_team != source_team {
                        return false;
                    }
                }

                if let Some(target_team) = &filter.target_team {
                    if &edge.target_team != target_team {
                        return false;
                    }
                }

                true
            })
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            if matches.len() > limit {
                matches.drain(..matches.len() - limit);
            }
        }

        matches
    }

    pub(super) fn service_count(&self) -> usize {
        self.service_order.len()
    }

    pub(super) fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub(super) fn services_evicted(&self) -> u64 {
        self.services_evicted
    }

    pub(super) fn dependencies_evicted(&self) -> u64 {
        self.dependencies_evicted
    }

    /// Drop every node and edge, returning how many entries were removed.
    ///
    /// Id counters keep running: entries registered after a clear get fresh
    /// ids, never recycled ones.
    pub(super) fn clear(&mut self) -> usize {
        let removed = self.service_order.len() + self.edge_order.len();
        self.services.clear();
        self.service_order.clear();
        self.edges.clear();
        self.edge_order.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoordinationNeed, EdgeDirection, FailureType, PropagationMode, RiskLevel};

    fn sample_service(name: &str) -> NewService {
        NewService {
            name: name.to_string(),
            dependencies: vec![],
            failure_type: FailureType::Crash,
            propagation_mode: PropagationMode::Immediate,
            criticality_score: 5.0,
        }
    }

    fn sample_edge(source: &str, target: &str) -> NewDependency {
        NewDependency {
            source_team: source.to_string(),
            target_team: target.to_string(),
            source_service: format!("{source}-svc"),
            target_service: format!("{target}-svc"),
            direction: EdgeDirection::Downstream,
            risk_level: RiskLevel::Moderate,
            coordination_need: CoordinationNeed::Low,
            sla_impact_pct: 10.0,
        }
    }

    #[test]
    fn eviction_removes_only_the_oldest() {
        let mut store = GraphStore::new(3, 3);
        for name in ["a", "b", "c", "d"] {
            store.insert_service(sample_service(name));
        }

        let names: Vec<&str> = store
            .services_in_order()
            .map(|node| node.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert_eq!(store.services_evicted(), 1);
    }

    #[test]
    fn evicted_service_is_gone_but_id_not_reused() {
        let mut store = GraphStore::new(1, 1);
        let first = store.insert_service(sample_service("a"));
        let second = store.insert_service(sample_service("b"));

        assert!(store.service(first.id).is_none());
        assert!(store.service(second.id).is_some());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn clear_does_not_rewind_ids() {
        let mut store = GraphStore::new(10, 10);
        let before = store.insert_service(sample_service("a"));
        assert_eq!(store.clear(), 1);

        let after = store.insert_service(sample_service("b"));
        assert!(after.id > before.id);
    }

    #[test]
    fn list_limit_keeps_most_recent_in_insertion_order() {
        let mut store = GraphStore::new(10, 10);
        for name in ["a", "b", "c", "d"] {
            store.insert_service(sample_service(name));
        }

        let filter = ServiceFilter {
            limit: Some(2),
            ..Default::default()
        };
        let names: Vec<String> = store
            .list_services(&filter)
            .into_iter()
            .map(|node| node.name)
            .collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[test]
    fn edge_filters_match_teams() {
        let mut store = GraphStore::new(10, 10);
        store.insert_edge(sample_edge("platform", "payments"));
        store.insert_edge(sample_edge("platform", "search"));
        store.insert_edge(sample_edge("data", "payments"));

        let filter = DependencyFilter {
            source_team: Some("platform".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list_edges(&filter).len(), 2);

        let filter = DependencyFilter {
            source_team: Some("platform".to_string()),
            target_team: Some("payments".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list_edges(&filter).len(), 1);
    }

    #[test]
    fn service_by_name_prefers_latest_registration() {
        let mut store = GraphStore::new(10, 10);
        let first = store.insert_service(sample_service("api"));
        let second = store.insert_service(sample_service("api"));

        let found = store.service_by_name("api").unwrap();
        assert_eq!(found.id, second.id);
        assert_ne!(found.id, first.id);
    }
}
