//! Integration tests for store semantics: bounded FIFO eviction, filters,
//! id assignment, and the clear operation.

use faultline::config::EngineConfig;
use faultline::domain::{
    CoordinationNeed, DependencyFilter, EdgeDirection, FailureType, NewDependency, NewService,
    PropagationMode, RiskLevel, ServiceFilter,
};
use faultline::engine::RiskGraphEngine;

fn new_service(name: &str, failure_type: FailureType) -> NewService {
    NewService {
        name: name.to_string(),
        dependencies: vec![],
        failure_type,
        propagation_mode: PropagationMode::Immediate,
        criticality_score: 5.0,
    }
}

fn new_edge(source: &str, target: &str) -> NewDependency {
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

fn bounded_engine(max_services: usize, max_dependencies: usize) -> RiskGraphEngine {
    let config = EngineConfig {
        max_services,
        max_dependencies,
        ..EngineConfig::default()
    };
    RiskGraphEngine::new(config).unwrap()
}

// ========== Eviction ==========

#[test]
fn registering_past_the_bound_evicts_exactly_the_oldest() {
    let mut engine = bounded_engine(3, 10);
    let first = engine.register_service(new_service("a", FailureType::Crash));
    engine.register_service(new_service("b", FailureType::Crash));
    engine.register_service(new_service("c", FailureType::Crash));
    engine.register_service(new_service("d", FailureType::Crash));

    let names: Vec<String> = engine
        .list_services(&ServiceFilter::default())
        .into_iter()
        .map(|node| node.name)
        .collect();
    assert_eq!(names, vec!["b", "c", "d"]);
    assert!(engine.get_service(first.id).is_none());
    assert_eq!(engine.stats().services_evicted, 1);
}

#[test]
fn edge_store_evicts_independently_of_node_store() {
    let mut engine = bounded_engine(10, 2);
    engine.register_dependency(new_edge("a", "b"));
    engine.register_dependency(new_edge("b", "c"));
    engine.register_dependency(new_edge("c", "d"));

    let stats = engine.stats();
    assert_eq!(stats.dependencies, 2);
    assert_eq!(stats.dependencies_evicted, 1);
    assert_eq!(stats.services, 0);
}

#[test]
fn ids_are_never_reused_after_eviction() {
    let mut engine = bounded_engine(1, 10);
    let mut seen = std::collections::HashSet::new();
    for i in 0..5 {
        let node = engine.register_service(new_service(&format!("s{i}"), FailureType::Crash));
        assert!(seen.insert(node.id));
    }
}

// ========== Listing & Filters ==========

#[test]
fn list_preserves_insertion_order_not_risk_order() {
    let mut engine = bounded_engine(10, 10);
    engine.register_service(new_service("zeta", FailureType::Crash));
    engine.register_service(new_service("alpha", FailureType::Crash));
    engine.register_service(new_service("mid", FailureType::Crash));

    let names: Vec<String> = engine
        .list_services(&ServiceFilter::default())
        .into_iter()
        .map(|node| node.name)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn limit_keeps_the_most_recent_matches_in_insertion_order() {
    let mut engine = bounded_engine(10, 10);
    for name in ["a", "b", "c", "d", "e"] {
        engine.register_service(new_service(name, FailureType::Crash));
    }

    let filter = ServiceFilter {
        limit: Some(3),
        ..Default::default()
    };
    let names: Vec<String> = engine
        .list_services(&filter)
        .into_iter()
        .map(|node| node.name)
        .collect();
    assert_eq!(names, vec!["c", "d", "e"]);
}

#[test]
fn failure_type_filter_applies_before_the_limit() {
    let mut engine = bounded_engine(10, 10);
    engine.register_service(new_service("c1", FailureType::Crash));
    engine.register_service(new_service("t1", FailureType::Timeout));
    engine.register_service(new_service("c2", FailureType::Crash));
    engine.register_service(new_service("t2", FailureType::Timeout));

    let filter = ServiceFilter {
        failure_type: Some(FailureType::Timeout),
        limit: Some(1),
        ..Default::default()
    };
    let names: Vec<String> = engine
        .list_services(&filter)
        .into_iter()
        .map(|node| node.name)
        .collect();
    assert_eq!(names, vec!["t2"]);
}

#[test]
fn dependency_filters_match_source_and_target_teams() {
    let mut engine = bounded_engine(10, 10);
    engine.register_dependency(new_edge("platform", "payments"));
    engine.register_dependency(new_edge("platform", "search"));
    engine.register_dependency(new_edge("data", "payments"));

    let filter = DependencyFilter {
        target_team: Some("payments".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.list_dependencies(&filter).len(), 2);
}

// ========== Lookup ==========

#[test]
fn get_service_returns_none_for_unknown_ids() {
    let engine = RiskGraphEngine::with_defaults();
    assert!(engine.get_service(faultline::domain::NodeId(42)).is_none());
}

#[test]
fn get_dependency_round_trips() {
    let mut engine = bounded_engine(10, 10);
    let edge = engine.register_dependency(new_edge("platform", "payments"));

    let found = engine.get_dependency(edge.id).unwrap();
    assert_eq!(found.source_team, "platform");
    assert_eq!(found.target_team, "payments");
}

// ========== Clear ==========

#[test]
fn clear_data_removes_everything_and_reports_the_count() {
    let mut engine = bounded_engine(10, 10);
    let a = engine.register_service(new_service("a", FailureType::Crash));
    engine.register_service(new_service("b", FailureType::Crash));
    let edge = engine.register_dependency(new_edge("platform", "payments"));
    engine.predict_cascade(a.id);
    engine.assess_change_risk(edge.id, "upgrade", "alice");

    // 2 services + 1 edge + 1 prediction + 1 assessment
    assert_eq!(engine.clear_data(), 5);

    let stats = engine.stats();
    assert_eq!(stats.services, 0);
    assert_eq!(stats.dependencies, 0);
    assert_eq!(stats.predictions, 0);
    assert_eq!(stats.assessments, 0);
}

#[test]
fn ids_continue_after_clear() {
    let mut engine = bounded_engine(10, 10);
    let before = engine.register_service(new_service("a", FailureType::Crash));
    engine.clear_data();
    let after = engine.register_service(new_service("b", FailureType::Crash));

    assert!(after.id > before.id);
}

// ========== Configuration ==========

#[test]
fn zero_bounds_are_rejected_at_construction() {
    let config = EngineConfig {
        max_services: 0,
        ..EngineConfig::default()
    };
    assert!(RiskGraphEngine::new(config).is_err());

    let config = EngineConfig {
        max_cascade_depth: 0,
        ..EngineConfig::default()
    };
    assert!(RiskGraphEngine::new(config).is_err());
}
