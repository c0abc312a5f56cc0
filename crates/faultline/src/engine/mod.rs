//! The dependency risk graph engine.
//!
//! [`RiskGraphEngine`] owns bounded, insertion-ordered stores of service
//! nodes and cross-team edges and derives everything else per call:
//! cascade predictions, blast radii, structural findings, rankings, and
//! aggregate reports. There is no background work and no global state —
//! construct an engine explicitly from an [`EngineConfig`] and pass it
//! wherever it is needed.
//!
//! # Concurrency
//!
//! Every operation is synchronous, in-memory computation bounded by
//! O(V+E) for the configured store sizes; nothing blocks or suspends.
//! The engine itself carries no internal synchronization: callers sharing
//! one instance across threads must serialize access behind a single
//! coarse lock (`Mutex<RiskGraphEngine>`), because registrations mutate
//! the underlying collections.
//!
//! # Derived-result histories
//!
//! `predict_cascade` and `assess_change_risk` append their results to
//! bounded FIFO histories. Whole-graph sweeps (critical paths, rankings,
//! reports) simulate internally without recording, so reports stay
//! idempotent between mutations.

mod cascade;
mod change;
mod index;
mod report;
pub mod risk;
mod store;
mod structure;

pub use report::{CascadeReport, RiskReport};

use crate::config::EngineConfig;
use crate::domain::{
    BlastRadius, CascadePrediction, CircularDependency, CriticalPath, CrossTeamEdge,
    DependencyFilter, EdgeId, NewDependency, NewService, NodeId, RiskAssessment, ServiceFilter,
    ServiceNode, ServiceRisk, SpofEntry, TeamRisk,
};
use crate::error::Result;
use index::ReverseIndex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Counters describing current engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Live service nodes
    pub services: usize,

    /// Live cross-team edges
    pub dependencies: usize,

    /// Retained cascade predictions
    pub predictions: usize,

    /// Retained change assessments
    pub assessments: usize,

    /// Services evicted over the engine's lifetime
    pub services_evicted: u64,

    /// Edges evicted over the engine's lifetime
    pub dependencies_evicted: u64,
}

/// In-memory dependency risk graph engine.
pub struct RiskGraphEngine {
    config: EngineConfig,
    store: store::GraphStore,
    predictions: VecDeque<CascadePrediction>,
    assessments: VecDeque<RiskAssessment>,
}

impl std::fmt::Debug for RiskGraphEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskGraphEngine")
            .field("config", &self.config)
            .field("services", &self.store.service_count())
            .field("dependencies", &self.store.edge_count())
            .finish_non_exhaustive()
    }
}

impl RiskGraphEngine {
    /// Create an engine with the given bounds.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when any bound is zero. Bounds are not
    /// re-validated after construction.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let store = store::GraphStore::new(config.max_services, config.max_dependencies);
        Ok(Self {
            config,
            store,
            predictions: VecDeque::new(),
            assessments: VecDeque::new(),
        })
    }

    /// Create an engine with default bounds.
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        let store = store::GraphStore::new(config.max_services, config.max_dependencies);
        Self {
            config,
            store,
            predictions: VecDeque::new(),
            assessments: VecDeque::new(),
        }
    }

    /// The configuration this engine was constructed with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========== Registration ==========

    /// Register a service node. Evicts the oldest nodes past capacity.
    pub fn register_service(&mut self, new_service: NewService) -> ServiceNode {
        let node = self.store.insert_service(new_service);
        tracing::debug!(id = %node.id, name = %node.name, "registered service");
        node
    }

    /// Register a cross-team dependency edge. Evicts the oldest edges past
    /// capacity.
    pub fn register_dependency(&mut self, new_dependency: NewDependency) -> CrossTeamEdge {
        let edge = self.store.insert_edge(new_dependency);
        tracing::debug!(
            id = %edge.id,
            source = %edge.source_team,
            target = %edge.target_team,
            "registered dependency"
        );
        edge
    }

    // ========== Retrieval ==========

    /// Look up a service by id. `None` for unknown or evicted ids.
    pub fn get_service(&self, id: NodeId) -> Option<&ServiceNode> {
        self.store.service(id)
    }

    /// Look up a service by name. When a name was registered more than
    /// once, the most recent registration wins.
    pub fn get_service_by_name(&self, name: &str) -> Option<&ServiceNode> {
        self.store.service_by_name(name)
    }

    /// Matching services: up to `limit` most recently inserted, in original
    /// insertion order.
    pub fn list_services(&self, filter: &ServiceFilter) -> Vec<ServiceNode> {
        self.store.list_services(filter)
    }

    /// Look up an edge by id. `None` for unknown or evicted ids.
    pub fn get_dependency(&self, id: EdgeId) -> Option<&CrossTeamEdge> {
        self.store.edge(id)
    }

    /// Matching edges, same recency-window semantics as [`Self::list_services`].
    pub fn list_dependencies(&self, filter: &DependencyFilter) -> Vec<CrossTeamEdge> {
        self.store.list_edges(filter)
    }

    // ========== Cascade simulation ==========

    /// Simulate the failure of the given node and record the prediction.
    ///
    /// An unknown id yields the empty prediction (no affected nodes, depth
    /// zero, lowest risk); the reverse index is rebuilt from current store
    /// contents on every call.
    pub fn predict_cascade(&mut self, id: NodeId) -> CascadePrediction {
        let index = ReverseIndex::build(self.store.services_in_order());
        let prediction = cascade::predict(
            &index,
            id,
            self.store.service_count(),
            self.config.max_cascade_depth,
        );

        tracing::debug!(
            source = %id,
            affected = prediction.affected.len(),
            depth = prediction.cascade_depth,
            risk = %prediction.risk,
            "cascade predicted"
        );

        self.predictions.push_back(prediction.clone());
        while self.predictions.len() > self.config.max_history {
            self.predictions.pop_front();
        }

        prediction
    }

    /// Retained cascade predictions, oldest first.
    pub fn prediction_history(&self) -> impl Iterator<Item = &CascadePrediction> {
        self.predictions.iter()
    }

    // ========== Structural analysis ==========

    /// Nodes whose simulated failure impacts more than 30% of the graph,
    /// highest impact first.
    pub fn identify_critical_paths(&self) -> Vec<CriticalPath> {
        structure::critical_paths(&self.store, self.config.max_cascade_depth)
    }

    /// Dependencies relied upon by more than 3 distinct services, sorted by
    /// dependent count descending. Dangling names are dropped.
    pub fn detect_single_points_of_failure(&self) -> Vec<SpofEntry> {
        structure::single_points_of_failure(&self.store)
    }

    /// Circular team relationships, one entry per unordered pair.
    pub fn detect_circular_dependencies(&self) -> Vec<CircularDependency> {
        structure::circular_dependencies(&self.store)
    }

    // ========== Change risk ==========

    /// Assess a proposed change on an edge and record the assessment.
    ///
    /// The blast radius is exactly the edge's two endpoint teams; no
    /// transitive expansion. `None` for an unknown edge id.
    pub fn assess_change_risk(
        &mut self,
        edge_id: EdgeId,
        change_description: &str,
        assessed_by: &str,
    ) -> Option<RiskAssessment> {
        let assessment = change::assess(&self.store, edge_id, change_description, assessed_by)?;

        self.assessments.push_back(assessment.clone());
        while self.assessments.len() > self.config.max_history {
            self.assessments.pop_front();
        }

        Some(assessment)
    }

    /// Retained change assessments, oldest first.
    pub fn assessment_history(&self) -> impl Iterator<Item = &RiskAssessment> {
        self.assessments.iter()
    }

    /// Distinct teams directly downstream of the given team. Single-hop by
    /// design, unlike the cascade simulator.
    pub fn calculate_blast_radius(&self, team: &str) -> BlastRadius {
        change::blast_radius(&self.store, team)
    }

    // ========== Ranking & reporting ==========

    /// Teams ranked by summed edge severity, highest first.
    pub fn rank_teams_by_risk(&self) -> Vec<TeamRisk> {
        report::rank_teams(&self.store)
    }

    /// Services ranked by cascade classification then impact, highest first.
    pub fn rank_services_by_cascade_risk(&self) -> Vec<ServiceRisk> {
        report::rank_services(&self.store, self.config.max_cascade_depth)
    }

    /// Aggregate cascade exposure over the service graph.
    pub fn generate_cascade_report(&self) -> CascadeReport {
        report::cascade_report(&self.store, self.config.max_cascade_depth)
    }

    /// Aggregate standing risk over the team graph.
    pub fn generate_risk_report(&self) -> RiskReport {
        report::risk_report(&self.store)
    }

    // ========== Lifecycle ==========

    /// Drop all nodes, edges, and derived-result histories together.
    ///
    /// Returns the total number of evicted entries. Id counters keep
    /// running, so cleared ids are never reassigned.
    pub fn clear_data(&mut self) -> usize {
        let evicted =
            self.store.clear() + self.predictions.len() + self.assessments.len();
        self.predictions.clear();
        self.assessments.clear();
        tracing::debug!(evicted, "engine state cleared");
        evicted
    }

    /// Current engine counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            services: self.store.service_count(),
            dependencies: self.store.edge_count(),
            predictions: self.predictions.len(),
            assessments: self.assessments.len(),
            services_evicted: self.store.services_evicted(),
            dependencies_evicted: self.store.dependencies_evicted(),
        }
    }
}
