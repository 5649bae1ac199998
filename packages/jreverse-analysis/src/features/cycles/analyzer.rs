//! Circular-dependency analysis over the injection graph.
//!
//! ## Algorithm
//!
//! 1. Enumerate distinct simple cycles, self-loops included (see
//!    [`super::detector`]).
//! 2. Classify each cycle by injection homogeneity and lazy breaks,
//!    then derive the runtime risk and a matching severity.
//! 3. Attach ranked resolution strategies (see [`super::resolution`]).
//!
//! Soft-failing: an empty edge set yields a successful empty result.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::debug;

use crate::features::beans::{build_injection_points, InjectionKind, InjectionPoint};
use crate::shared::models::ProgramModel;

use super::detector::find_cycles;
use super::resolution::strategies_for;
use super::types::{CircularDependencyResult, CycleKind, CycleRisk, DependencyCycle};

/// Detects and classifies dependency cycles in injection edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularDependencyAnalyzer;

impl CircularDependencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze an injection edge set.
    pub fn analyze(&self, points: &[InjectionPoint]) -> CircularDependencyResult {
        let started = Instant::now();
        let class_count = distinct_class_count(points);

        let paths = find_cycles(points);
        let mut edge_index: BTreeMap<(&str, &str), Vec<&InjectionPoint>> = BTreeMap::new();
        for point in points {
            edge_index
                .entry((&point.source_class, &point.target_class))
                .or_default()
                .push(point);
        }
        let cycles: Vec<DependencyCycle> = paths
            .into_iter()
            .map(|path| classify_cycle(path, &edge_index))
            .collect();

        debug!(
            edges = points.len(),
            cycles = cycles.len(),
            "cycle analysis complete"
        );
        CircularDependencyResult {
            successful: true,
            error_message: None,
            cycles,
            analyzed_edge_count: points.len(),
            analyzed_class_count: class_count,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Convenience: extract the injection graph from a model first.
    pub fn analyze_model(&self, model: &ProgramModel) -> CircularDependencyResult {
        self.analyze(&build_injection_points(model))
    }
}

fn distinct_class_count(points: &[InjectionPoint]) -> usize {
    let mut classes: BTreeSet<&str> = BTreeSet::new();
    for point in points {
        classes.insert(&point.source_class);
        classes.insert(&point.target_class);
    }
    classes.len()
}

fn classify_cycle(
    path: Vec<String>,
    edge_index: &BTreeMap<(&str, &str), Vec<&InjectionPoint>>,
) -> DependencyCycle {
    let mut participating: Vec<InjectionPoint> = Vec::new();
    for pair in path.windows(2) {
        if let Some(points) = edge_index.get(&(pair[0].as_str(), pair[1].as_str())) {
            participating.extend(points.iter().map(|p| (*p).clone()));
        }
    }

    let kind = injection_kind_of(&participating);
    let has_lazy = participating.iter().any(|p| p.is_lazy);
    let risk = risk_of(kind, has_lazy);
    let resolution_strategies = strategies_for(kind, path.len().saturating_sub(1));

    DependencyCycle {
        severity: risk.severity(),
        cycle: path,
        kind,
        risk,
        has_lazy_resolution: has_lazy,
        injection_points: participating,
        resolution_strategies,
    }
}

fn injection_kind_of(points: &[InjectionPoint]) -> CycleKind {
    if points.is_empty() {
        return CycleKind::MixedInjection;
    }
    if points.iter().all(|p| p.kind == InjectionKind::Constructor) {
        CycleKind::ConstructorOnly
    } else if points.iter().all(|p| p.kind == InjectionKind::Field) {
        CycleKind::FieldOnly
    } else {
        CycleKind::MixedInjection
    }
}

/// Constructor cycles break container startup unless a lazy edge
/// defers one side; field/mixed cycles surface later.
fn risk_of(kind: CycleKind, has_lazy: bool) -> CycleRisk {
    match (kind, has_lazy) {
        (CycleKind::ConstructorOnly, false) => CycleRisk::BeanCreationException,
        (CycleKind::ConstructorOnly, true) => CycleRisk::PerformanceDegradation,
        (_, false) => CycleRisk::RuntimeDeadlock,
        (_, true) => CycleRisk::MaintenanceBurden,
    }
}
