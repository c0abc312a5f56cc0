//! Command implementations.
//!
//! Each command loads the topology document into a fresh engine, runs one
//! analysis, and prints the result. The engine is ephemeral by design: the
//! topology file is the source of truth and there is nothing to persist.

use super::args::{
    AssessArgs, BlastRadiusArgs, CascadeArgs, DepsArgs, ReportArgs, ServicesArgs,
};
use super::types::ReportKindArg;
use crate::domain::{DependencyFilter, EdgeId, NodeId, ServiceFilter};
use crate::engine::RiskGraphEngine;
use crate::output::{self, OutputMode};
use crate::topology::TopologyFile;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Load a topology document and replay it into a fresh engine.
pub(super) fn load_engine(topology_path: &Path) -> Result<RiskGraphEngine> {
    let topology = TopologyFile::load(topology_path)
        .with_context(|| format!("failed to load topology from {}", topology_path.display()))?;

    let config = topology.limits.clone().unwrap_or_default();
    let mut engine = RiskGraphEngine::new(config)?;

    for spec in topology.services {
        engine.register_service(spec.into());
    }
    for spec in topology.dependencies {
        engine.register_dependency(spec.into());
    }

    let stats = engine.stats();
    tracing::info!(
        services = stats.services,
        dependencies = stats.dependencies,
        "topology loaded"
    );
    Ok(engine)
}

fn name_of(engine: &RiskGraphEngine) -> impl Fn(NodeId) -> String {
    move |id| {
        engine
            .get_service(id)
            .map_or_else(|| id.to_string(), |node| node.name.clone())
    }
}

pub(super) fn execute_cascade(
    engine: &mut RiskGraphEngine,
    args: &CascadeArgs,
    mode: OutputMode,
) -> Result<()> {
    let Some(id) = engine.get_service_by_name(&args.service).map(|node| node.id) else {
        bail!("unknown service: {}", args.service);
    };

    let prediction = engine.predict_cascade(id);
    match mode {
        OutputMode::Json => output::print_json(&prediction),
        OutputMode::Text => {
            output::print_prediction(&prediction, name_of(engine));
            Ok(())
        }
    }
}

pub(super) fn execute_blast_radius(
    engine: &RiskGraphEngine,
    args: &BlastRadiusArgs,
    mode: OutputMode,
) -> Result<()> {
    let radius = engine.calculate_blast_radius(&args.team);
    match mode {
        OutputMode::Json => output::print_json(&radius),
        OutputMode::Text => {
            output::print_blast_radius(&radius);
            Ok(())
        }
    }
}

pub(super) fn execute_critical_paths(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let paths = engine.identify_critical_paths();
    match mode {
        OutputMode::Json => output::print_json(&paths),
        OutputMode::Text => {
            output::print_critical_paths(&paths);
            Ok(())
        }
    }
}

pub(super) fn execute_spof(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let entries = engine.detect_single_points_of_failure();
    match mode {
        OutputMode::Json => output::print_json(&entries),
        OutputMode::Text => {
            output::print_spofs(&entries);
            Ok(())
        }
    }
}

pub(super) fn execute_cycles(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let cycles = engine.detect_circular_dependencies();
    match mode {
        OutputMode::Json => output::print_json(&cycles),
        OutputMode::Text => {
            output::print_cycles(&cycles);
            Ok(())
        }
    }
}

pub(super) fn execute_rank_teams(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let ranking = engine.rank_teams_by_risk();
    match mode {
        OutputMode::Json => output::print_json(&ranking),
        OutputMode::Text => {
            output::print_team_ranking(&ranking);
            Ok(())
        }
    }
}

pub(super) fn execute_rank_services(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let ranking = engine.rank_services_by_cascade_risk();
    match mode {
        OutputMode::Json => output::print_json(&ranking),
        OutputMode::Text => {
            output::print_service_ranking(&ranking);
            Ok(())
        }
    }
}

pub(super) fn execute_report(
    engine: &RiskGraphEngine,
    args: &ReportArgs,
    mode: OutputMode,
) -> Result<()> {
    match args.kind {
        ReportKindArg::Cascade => {
            let report = engine.generate_cascade_report();
            match mode {
                OutputMode::Json => output::print_json(&report),
                OutputMode::Text => {
                    output::print_cascade_report(&report);
                    Ok(())
                }
            }
        }
        ReportKindArg::Risk => {
            let report = engine.generate_risk_report();
            match mode {
                OutputMode::Json => output::print_json(&report),
                OutputMode::Text => {
                    output::print_risk_report(&report);
                    Ok(())
                }
            }
        }
    }
}

pub(super) fn execute_assess(
    engine: &mut RiskGraphEngine,
    args: &AssessArgs,
    mode: OutputMode,
) -> Result<()> {
    let Some(assessment) =
        engine.assess_change_risk(EdgeId(args.edge), &args.description, &args.assessed_by)
    else {
        bail!("unknown dependency edge: {}", args.edge);
    };

    match mode {
        OutputMode::Json => output::print_json(&assessment),
        OutputMode::Text => {
            output::print_assessment(&assessment);
            Ok(())
        }
    }
}

pub(super) fn execute_services(
    engine: &RiskGraphEngine,
    args: &ServicesArgs,
    mode: OutputMode,
) -> Result<()> {
    let filter = ServiceFilter {
        failure_type: args.failure_type.map(Into::into),
        propagation_mode: args.propagation_mode.map(Into::into),
        limit: Some(args.limit),
    };

    let services = engine.list_services(&filter);
    match mode {
        OutputMode::Json => output::print_json(&services),
        OutputMode::Text => {
            output::print_services(&services);
            Ok(())
        }
    }
}

pub(super) fn execute_deps(
    engine: &RiskGraphEngine,
    args: &DepsArgs,
    mode: OutputMode,
) -> Result<()> {
    let filter = DependencyFilter {
        source_team: args.source_team.clone(),
        target_team: args.target_team.clone(),
        limit: Some(args.limit),
    };

    let edges = engine.list_dependencies(&filter);
    match mode {
        OutputMode::Json => output::print_json(&edges),
        OutputMode::Text => {
            output::print_edges(&edges);
            Ok(())
        }
    }
}

pub(super) fn execute_stats(engine: &RiskGraphEngine, mode: OutputMode) -> Result<()> {
    let stats = engine.stats();
    match mode {
        OutputMode::Json => output::print_json(&stats),
        OutputMode::Text => {
            output::print_stats(&stats);
            Ok(())
        }
    }
}
