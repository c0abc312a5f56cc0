//! Terminal and JSON rendering for analysis results.

use crate::domain::{
    BlastRadius, CascadePrediction, CircularDependency, CriticalPath, CrossTeamEdge, NodeId,
    RiskAssessment, RiskLevel, ServiceNode, ServiceRisk, SpofEntry, TeamRisk,
};
use crate::engine::{CascadeReport, EngineStats, RiskReport};
use colored::{ColoredString, Colorize};

/// How command results are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text with colored risk levels
    Text,
    /// Pretty-printed JSON for dashboards and scripts
    Json,
}

/// Serialize a value as pretty JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Color a risk level the way dashboards expect.
pub fn risk_label(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Negligible => "negligible".dimmed(),
        RiskLevel::Low => "low".green(),
        RiskLevel::Moderate => "moderate".yellow(),
        RiskLevel::High => "high".truecolor(255, 140, 0),
        RiskLevel::Critical => "critical".red().bold(),
    }
}

/// Print a service listing.
pub fn print_services(services: &[ServiceNode]) {
    if services.is_empty() {
        println!("No services match");
        return;
    }

    for node in services {
        println!(
            "{:<8} {:<30} {:?}/{:?}  criticality {:.1}  deps: {}",
            node.id.to_string(),
            node.name,
            node.failure_type,
            node.propagation_mode,
            node.criticality_score,
            if node.dependencies.is_empty() {
                "-".to_string()
            } else {
                node.dependencies.join(", ")
            }
        );
    }
}

/// Print a team-edge listing.
pub fn print_edges(edges: &[CrossTeamEdge]) {
    if edges.is_empty() {
        println!("No dependencies match");
        return;
    }

    for edge in edges {
        println!(
            "{:<8} {} -> {}  ({} -> {})  {:?}  risk {}  sla {:.1}%",
            edge.id.to_string(),
            edge.source_team,
            edge.target_team,
            edge.source_service,
            edge.target_service,
            edge.direction,
            risk_label(edge.risk_level),
            edge.sla_impact_pct
        );
    }
}

/// Print a cascade prediction, resolving node ids through `name_of`.
pub fn print_prediction(prediction: &CascadePrediction, name_of: impl Fn(NodeId) -> String) {
    println!(
        "Cascade from {}: {} affected, depth {}, impact {:.2}%, risk {}",
        name_of(prediction.source),
        prediction.affected.len(),
        prediction.cascade_depth,
        prediction.estimated_impact_pct,
        risk_label(prediction.risk)
    );

    for (position, id) in prediction.affected.iter().enumerate() {
        println!("  {}. {}", position + 1, name_of(*id));
    }
}

/// Print a single-hop blast radius.
pub fn print_blast_radius(radius: &BlastRadius) {
    if radius.affected_teams.is_empty() {
        println!("{}: no directly affected teams", radius.team);
        return;
    }

    println!(
        "{}: {} directly affected team(s): {}",
        radius.team,
        radius.affected_count,
        radius.affected_teams.join(", ")
    );
}

/// Print critical paths, highest impact first.
pub fn print_critical_paths(paths: &[CriticalPath]) {
    if paths.is_empty() {
        println!("No critical failure paths");
        return;
    }

    for path in paths {
        println!(
            "{:<30} impact {:>6.2}%  depth {}  risk {}",
            path.name,
            path.impact_pct,
            path.depth,
            risk_label(path.risk)
        );
    }
}

/// Print single points of failure, most depended-upon first.
pub fn print_spofs(entries: &[SpofEntry]) {
    if entries.is_empty() {
        println!("No single points of failure");
        return;
    }

    for entry in entries {
        println!(
            "{:<30} {} dependents  criticality {:.1}",
            entry.node.name, entry.dependent_count, entry.node.criticality_score
        );
    }
}

/// Print circular team dependencies.
pub fn print_cycles(cycles: &[CircularDependency]) {
    if cycles.is_empty() {
        println!("No circular team dependencies");
        return;
    }

    for cycle in cycles {
        println!("{} <-> {}", cycle.team_a, cycle.team_b);
    }
}

/// Print the team risk ranking.
pub fn print_team_ranking(ranking: &[TeamRisk]) {
    if ranking.is_empty() {
        println!("No teams registered");
        return;
    }

    for (position, entry) in ranking.iter().enumerate() {
        println!("{:>3}. {:<30} score {}", position + 1, entry.team, entry.score);
    }
}

/// Print the service cascade-risk ranking.
pub fn print_service_ranking(ranking: &[ServiceRisk]) {
    if ranking.is_empty() {
        println!("No services registered");
        return;
    }

    for (position, entry) in ranking.iter().enumerate() {
        println!(
            "{:>3}. {:<30} {}  impact {:.2}%",
            position + 1,
            entry.name,
            risk_label(entry.risk),
            entry.impact_pct
        );
    }
}

/// Print a change risk assessment.
pub fn print_assessment(assessment: &RiskAssessment) {
    println!(
        "Edge {}: {} (assessed by {})",
        assessment.edge_id, assessment.change_description, assessment.assessed_by
    );
    println!(
        "  blast radius: {}",
        assessment.blast_radius_teams.join(", ")
    );
    println!("  risk: {}", risk_label(assessment.risk_level));
    println!("  mitigation: {}", assessment.mitigation);
}

/// Print the cascade report.
pub fn print_cascade_report(report: &CascadeReport) {
    println!("Cascade report");
    println!("  services:            {}", report.total_services);
    println!(
        "  avg cascade depth:   {:.2} (max {})",
        report.average_cascade_depth, report.max_cascade_depth_observed
    );
    println!("  critical paths:      {}", report.critical_path_count);
    println!(
        "  points of failure:   {}",
        report.single_point_of_failure_count
    );
    println!("  risk distribution:");
    for (level, count) in &report.risk_distribution {
        println!("    {:<12} {}", risk_label(*level), count);
    }
    print_recommendations(&report.recommendations);
}

/// Print the team risk report.
pub fn print_risk_report(report: &RiskReport) {
    println!("Risk report");
    println!("  dependencies:        {}", report.total_dependencies);
    println!("  teams:               {}", report.team_count);
    println!(
        "  avg SLA impact:      {:.2}%",
        report.average_sla_impact_pct
    );
    println!(
        "  circular pairs:      {}",
        report.circular_dependency_count
    );
    println!(
        "  high coordination:   {}",
        report.high_coordination_count
    );
    println!("  direction distribution:");
    for (direction, count) in &report.direction_distribution {
        println!("    {:<14} {}", format!("{direction:?}").to_lowercase(), count);
    }
    println!("  risk distribution:");
    for (level, count) in &report.risk_distribution {
        println!("    {:<12} {}", risk_label(*level), count);
    }
    print_recommendations(&report.recommendations);
}

/// Print engine counters.
pub fn print_stats(stats: &EngineStats) {
    println!("Engine stats");
    println!("  services:             {}", stats.services);
    println!("  dependencies:         {}", stats.dependencies);
    println!("  predictions kept:     {}", stats.predictions);
    println!("  assessments kept:     {}", stats.assessments);
    println!("  services evicted:     {}", stats.services_evicted);
    println!("  dependencies evicted: {}", stats.dependencies_evicted);
}

fn print_recommendations(recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }

    println!("  recommendations:");
    for recommendation in recommendations {
        println!("    - {recommendation}");
    }
}
