//! Integration tests for rankings and aggregate reports.

use faultline::domain::{
    CoordinationNeed, EdgeDirection, FailureType, NewDependency, NewService, PropagationMode,
    RiskLevel,
};
use faultline::engine::RiskGraphEngine;

fn new_service(name: &str, dependencies: &[&str]) -> NewService {
    NewService {
        name: name.to_string(),
        dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
        failure_type: FailureType::Crash,
        propagation_mode: PropagationMode::Immediate,
        criticality_score: 5.0,
    }
}

fn new_edge(
    source: &str,
    target: &str,
    risk_level: RiskLevel,
    coordination_need: CoordinationNeed,
) -> NewDependency {
    NewDependency {
        source_team: source.to_string(),
        target_team: target.to_string(),
        source_service: format!("{source}-svc"),
        target_service: format!("{target}-svc"),
        direction: EdgeDirection::Downstream,
        risk_level,
        coordination_need,
        sla_impact_pct: 10.0,
    }
}

// ========== Team Ranking ==========

#[test]
fn teams_are_ranked_by_summed_severity() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_dependency(new_edge(
        "platform",
        "payments",
        RiskLevel::High,
        CoordinationNeed::Low,
    ));
    engine.register_dependency(new_edge(
        "platform",
        "search",
        RiskLevel::Low,
        CoordinationNeed::Low,
    ));

    let ranking = engine.rank_teams_by_risk();

    // platform: 4 + 2 = 6, payments: 4, search: 2
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].team, "platform");
    assert_eq!(ranking[0].score, 6);
    assert_eq!(ranking[1].team, "payments");
    assert_eq!(ranking[1].score, 4);
    assert_eq!(ranking[2].team, "search");
    assert_eq!(ranking[2].score, 2);
}

#[test]
fn equal_scores_rank_by_team_name() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_dependency(new_edge(
        "zeta",
        "alpha",
        RiskLevel::Moderate,
        CoordinationNeed::Low,
    ));

    let ranking = engine.rank_teams_by_risk();
    assert_eq!(ranking[0].team, "alpha");
    assert_eq!(ranking[1].team, "zeta");
}

#[test]
fn empty_edge_set_ranks_no_teams() {
    let engine = RiskGraphEngine::with_defaults();
    assert!(engine.rank_teams_by_risk().is_empty());
}

// ========== Service Ranking ==========

#[test]
fn services_are_ranked_by_severity_then_impact() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_service(new_service("hub", &[]));
    for i in 0..6 {
        engine.register_service(new_service(&format!("dep{i}"), &["hub"]));
    }
    engine.register_service(new_service("leaf", &["dep0"]));

    let ranking = engine.rank_services_by_cascade_risk();

    // hub reaches 7 of 8 services (87.5%): critical; everything else
    // negligible or low.
    assert_eq!(ranking[0].name, "hub");
    assert_eq!(ranking[0].risk, RiskLevel::Critical);
    assert!(ranking[0].impact_pct > ranking[1].impact_pct);
}

// ========== Cascade Report ==========

#[test]
fn empty_cascade_report_is_zero_filled_without_recommendations() {
    let engine = RiskGraphEngine::with_defaults();
    let report = engine.generate_cascade_report();

    assert_eq!(report.total_services, 0);
    assert_eq!(report.average_cascade_depth, 0.0);
    assert_eq!(report.max_cascade_depth_observed, 0);
    assert_eq!(report.critical_path_count, 0);
    assert_eq!(report.single_point_of_failure_count, 0);
    assert!(report.recommendations.is_empty());
    assert_eq!(report.risk_distribution.values().sum::<usize>(), 0);
    assert_eq!(report.risk_distribution.len(), 5);
}

#[test]
fn cascade_report_is_idempotent_between_mutations() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_service(new_service("a", &[]));
    engine.register_service(new_service("b", &["a"]));
    engine.register_service(new_service("c", &["b"]));

    let first = engine.generate_cascade_report();
    let second = engine.generate_cascade_report();
    assert_eq!(first, second);
}

#[test]
fn cascade_report_counts_distributions_and_paths() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_service(new_service("a", &[]));
    engine.register_service(new_service("b", &["a"]));
    engine.register_service(new_service("c", &["b"]));

    let report = engine.generate_cascade_report();

    assert_eq!(report.total_services, 3);
    assert_eq!(report.max_cascade_depth_observed, 2);
    assert!((report.average_cascade_depth - 1.0).abs() < 1e-9);
    assert_eq!(report.critical_path_count, 2);
    assert_eq!(report.risk_distribution.values().sum::<usize>(), 3);
    // a cascades 66.7% (critical tier), b cascades 33.3% (high tier),
    // c cascades nothing.
    assert_eq!(report.risk_distribution[&RiskLevel::Critical], 1);
    assert_eq!(report.risk_distribution[&RiskLevel::High], 1);
    assert_eq!(report.risk_distribution[&RiskLevel::Negligible], 1);
}

#[test]
fn quiet_graph_reports_nothing_significant() {
    let mut engine = RiskGraphEngine::with_defaults();
    for i in 0..10 {
        engine.register_service(new_service(&format!("solo{i}"), &[]));
    }

    let report = engine.generate_cascade_report();
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].contains("No significant"));
}

#[test]
fn spof_and_critical_recommendations_fire_together() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_service(new_service("core-db", &[]));
    for name in ["x", "y", "z", "w"] {
        engine.register_service(new_service(name, &["core-db"]));
    }

    let report = engine.generate_cascade_report();
    assert_eq!(report.single_point_of_failure_count, 1);
    assert!(report.critical_path_count > 0);
    assert!(
        report
            .recommendations
            .iter()
            .any(|r| r.contains("redundancy"))
    );
    assert!(
        report
            .recommendations
            .iter()
            .any(|r| r.contains("fallback plans"))
    );
}

// ========== Risk Report ==========

#[test]
fn empty_risk_report_is_zero_filled_without_recommendations() {
    let engine = RiskGraphEngine::with_defaults();
    let report = engine.generate_risk_report();

    assert_eq!(report.total_dependencies, 0);
    assert_eq!(report.team_count, 0);
    assert_eq!(report.average_sla_impact_pct, 0.0);
    assert_eq!(report.circular_dependency_count, 0);
    assert!(report.recommendations.is_empty());
    assert_eq!(report.direction_distribution.len(), 5);
    assert_eq!(report.direction_distribution.values().sum::<usize>(), 0);
}

#[test]
fn risk_report_aggregates_edges_and_teams() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_dependency(new_edge(
        "platform",
        "payments",
        RiskLevel::Critical,
        CoordinationNeed::High,
    ));
    engine.register_dependency(new_edge(
        "payments",
        "platform",
        RiskLevel::Low,
        CoordinationNeed::Low,
    ));

    let report = engine.generate_risk_report();

    assert_eq!(report.total_dependencies, 2);
    assert_eq!(report.team_count, 2);
    assert_eq!(report.circular_dependency_count, 1);
    assert_eq!(report.high_coordination_count, 1);
    assert_eq!(report.risk_distribution[&RiskLevel::Critical], 1);
    assert_eq!(report.risk_distribution[&RiskLevel::Low], 1);
    assert!(
        report
            .recommendations
            .iter()
            .any(|r| r.contains("circular"))
    );
    assert!(
        report
            .recommendations
            .iter()
            .any(|r| r.contains("critical standing risk"))
    );
}

#[test]
fn risk_report_is_idempotent_between_mutations() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_dependency(new_edge(
        "platform",
        "payments",
        RiskLevel::High,
        CoordinationNeed::Medium,
    ));

    let first = engine.generate_risk_report();
    let second = engine.generate_risk_report();
    assert_eq!(first, second);
}

#[test]
fn reports_change_after_mutations() {
    let mut engine = RiskGraphEngine::with_defaults();
    engine.register_service(new_service("a", &[]));
    let before = engine.generate_cascade_report();

    engine.register_service(new_service("b", &["a"]));
    let after = engine.generate_cascade_report();

    assert_ne!(before, after);
}
