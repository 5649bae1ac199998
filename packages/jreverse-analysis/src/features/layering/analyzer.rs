//! Layered-architecture analysis.
//!
//! ## Algorithm
//! 1. Classify every class into exactly one layer (classifier tables).
//! 2. Enumerate cross-layer uses edges (field types, method signatures,
//!    interfaces, superclass) and score each with the fraction of the
//!    source class's field+method references targeting that layer.
//! 3. Derive violations purely from rank comparison.
//! 4. Score layer cohesion/coupling, overall compliance and integrity;
//!    generate grouped recommendations.
//!
//! Contract: `analyze` rejects precondition-violating models with an
//! error (hard-fail, unlike the relationship analyzer). Faults *during*
//! analysis are caught and downgraded into a degraded result that
//! carries one critical placeholder violation and compliance 0.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use tracing::{debug, warn};

use super::classifier::{classify, layer_indicator};
use super::types::{
    LayerDependency, LayerSummary, LayerType, LayerViolation, LayeredArchitectureResult,
    Recommendation, ViolationKind, ViolationSeverity,
};
use crate::errors::{JReverseError, Result};
use crate::shared::java::{collection_element_type, is_collection_type, strip_generics};
use crate::shared::models::{ClassFact, ProgramModel};

/// Minimum classes with a layer indicator before analysis is worth
/// running on an archive.
pub const MIN_LAYERED_CLASSES: usize = 3;

/// Rank-based violation classification; `None` for a legal edge.
pub fn classify_violation(source: LayerType, target: LayerType) -> Option<ViolationKind> {
    if source == target {
        return Some(ViolationKind::CircularDependency);
    }
    if source.rank() > target.rank() {
        return Some(ViolationKind::UpwardDependency);
    }
    if target.rank() - source.rank() > 1 {
        return Some(ViolationKind::SkipLayerDependency);
    }
    None
}

fn violation_severity(kind: ViolationKind, strength: f64) -> ViolationSeverity {
    match kind {
        ViolationKind::UpwardDependency => {
            if strength >= 0.5 {
                ViolationSeverity::Critical
            } else {
                ViolationSeverity::High
            }
        }
        ViolationKind::SkipLayerDependency => ViolationSeverity::Medium,
        ViolationKind::CircularDependency => ViolationSeverity::High,
    }
}

/// Classifies layers, scores dependencies and flags violations.
#[derive(Debug, Default)]
pub struct LayeredArchitectureAnalyzer;

impl LayeredArchitectureAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Worth analyzing only when at least `MIN_LAYERED_CLASSES` classes
    /// carry a real layer indicator; the infrastructure default does
    /// not count.
    pub fn can_analyze(&self, model: &ProgramModel) -> bool {
        model
            .classes()
            .filter(|c| layer_indicator(c).is_some())
            .count()
            >= MIN_LAYERED_CLASSES
    }

    /// Analyze one model. Returns an error only for models violating
    /// the loader precondition; internal faults degrade instead.
    pub fn analyze(&self, model: &ProgramModel) -> Result<LayeredArchitectureResult> {
        let started = Instant::now();

        if model.classes().any(|c| c.fqn.trim().is_empty()) {
            return Err(JReverseError::malformed_model(
                "layered-architecture analysis requires non-empty class names",
            ));
        }

        match self.run(model, started) {
            Ok(result) => Ok(result),
            Err(error) => {
                warn!(%error, "layered-architecture analysis degraded");
                Ok(Self::degraded(&error, started.elapsed().as_millis() as u64))
            }
        }
    }

    fn run(&self, model: &ProgramModel, started: Instant) -> Result<LayeredArchitectureResult> {
        debug!(classes = model.len(), "starting layered-architecture analysis");

        let assignments: BTreeMap<String, LayerType> = model
            .classes()
            .map(|c| (c.fqn.clone(), classify(c)))
            .collect();

        let dependencies = self.derive_dependencies(model, &assignments)?;

        let mut violations: Vec<LayerViolation> = Vec::new();
        for dep in &dependencies {
            if let Some(kind) = classify_violation(dep.source_layer, dep.target_layer) {
                let severity = violation_severity(kind, dep.strength);
                violations.push(LayerViolation {
                    kind,
                    severity,
                    source_layer: dep.source_layer,
                    target_layer: dep.target_layer,
                    source_package: ProgramModel::package_of(&dep.source_class).to_string(),
                    description: format!(
                        "{} layer class {} depends on {} layer class {}",
                        dep.source_layer, dep.source_class, dep.target_layer, dep.target_class
                    ),
                    impact_score: ((severity.weight() + dep.strength) / 2.0).clamp(0.0, 1.0),
                });
            }
        }
        violations.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.description.cmp(&b.description))
        });

        let layers = self.summarize_layers(model, &assignments, &dependencies);

        let compliance_score = compliance(&violations, model.len());
        let architectural_integrity = integrity(compliance_score, &layers);
        let recommendations =
            recommend(&violations, architectural_integrity);

        debug!(
            layers = layers.len(),
            dependencies = dependencies.len(),
            violations = violations.len(),
            compliance = compliance_score,
            "layered-architecture analysis finished"
        );

        Ok(LayeredArchitectureResult {
            successful: true,
            error_message: None,
            layer_assignments: assignments,
            layers,
            dependencies,
            violations,
            compliance_score,
            architectural_integrity,
            recommendations,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Cross-layer uses edges with strength fractions.
    fn derive_dependencies(
        &self,
        model: &ProgramModel,
        assignments: &BTreeMap<String, LayerType>,
    ) -> Result<Vec<LayerDependency>> {
        let mut dependencies = Vec::new();

        for class in model.classes() {
            let source_layer = *assignments.get(&class.fqn).ok_or_else(|| {
                JReverseError::analysis(format!("no layer assigned to {}", class.fqn))
            })?;

            // Field+method references into the archive, duplicates kept:
            // they are the strength denominator.
            let refs = field_method_references(class, model);
            let total_refs = refs.len();
            let mut refs_per_layer: BTreeMap<LayerType, usize> = BTreeMap::new();
            for target in &refs {
                if let Some(layer) = assignments.get(target) {
                    *refs_per_layer.entry(*layer).or_default() += 1;
                }
            }

            // Uses edges additionally include interfaces + superclass.
            let mut targets: BTreeSet<String> = refs.iter().cloned().collect();
            for iface in &class.interfaces {
                if model.contains(iface) {
                    targets.insert(iface.clone());
                }
            }
            if let Some(sup) = class.superclass.as_deref() {
                if model.contains(sup) {
                    targets.insert(sup.to_string());
                }
            }
            targets.remove(&class.fqn);

            for target in targets {
                let target_layer = *assignments.get(&target).ok_or_else(|| {
                    JReverseError::analysis(format!("no layer assigned to {target}"))
                })?;
                if target_layer == source_layer {
                    continue;
                }
                let layer_refs = refs_per_layer.get(&target_layer).copied().unwrap_or(0);
                let strength = if total_refs == 0 {
                    0.0
                } else {
                    layer_refs as f64 / total_refs as f64
                };
                dependencies.push(LayerDependency {
                    source_class: class.fqn.clone(),
                    target_class: target,
                    source_layer,
                    target_layer,
                    strength,
                });
            }
        }

        Ok(dependencies)
    }

    fn summarize_layers(
        &self,
        model: &ProgramModel,
        assignments: &BTreeMap<String, LayerType>,
        dependencies: &[LayerDependency],
    ) -> Vec<LayerSummary> {
        let mut buckets: BTreeMap<LayerType, BTreeSet<String>> = BTreeMap::new();
        for (fqn, layer) in assignments {
            buckets.entry(*layer).or_default().insert(fqn.clone());
        }
        let present_layers = buckets.len();

        let mut summaries: Vec<LayerSummary> = Vec::new();
        for layer in LayerType::ALL {
            let Some(classes) = buckets.get(&layer) else {
                continue;
            };
            let cohesion = layer_cohesion(classes, model);
            let coupling = layer_coupling(layer, classes.len(), present_layers, dependencies);
            summaries.push(LayerSummary {
                layer,
                classes: classes.clone(),
                cohesion,
                coupling,
            });
        }
        summaries
    }

    /// Minimal result for an internal fault: zero layers, one critical
    /// placeholder violation describing the failure, compliance 0.
    fn degraded(error: &JReverseError, duration_ms: u64) -> LayeredArchitectureResult {
        let message = error.to_string();
        LayeredArchitectureResult {
            successful: false,
            error_message: Some(message.clone()),
            layer_assignments: BTreeMap::new(),
            layers: Vec::new(),
            dependencies: Vec::new(),
            violations: vec![LayerViolation {
                kind: ViolationKind::CircularDependency,
                severity: ViolationSeverity::Critical,
                source_layer: LayerType::Infrastructure,
                target_layer: LayerType::Infrastructure,
                source_package: String::new(),
                description: format!("analysis failed internally: {message}"),
                impact_score: 1.0,
            }],
            compliance_score: 0.0,
            architectural_integrity: 0.0,
            recommendations: Vec::new(),
            duration_ms,
        }
    }
}

/// In-archive classes referenced from fields and method signatures,
/// duplicates preserved.
fn field_method_references(class: &ClassFact, model: &ProgramModel) -> Vec<String> {
    let mut refs = Vec::new();
    let mut add = |raw: &str| {
        let base = strip_generics(raw).trim_end_matches("[]");
        if base != class.fqn && model.contains(base) {
            refs.push(base.to_string());
        } else if is_collection_type(raw) {
            if let Some(element) = collection_element_type(raw) {
                let element = strip_generics(&element).trim_end_matches("[]").to_string();
                if element != class.fqn && model.contains(&element) {
                    refs.push(element);
                }
            }
        }
    };

    for field in &class.fields {
        add(&field.field_type);
    }
    for method in &class.methods {
        for param in &method.parameters {
            add(&param.param_type);
        }
        if !method.is_constructor() {
            add(&method.return_type);
        }
    }
    refs
}

/// Mean of package homogeneity and interface sharing.
fn layer_cohesion(classes: &BTreeSet<String>, model: &ProgramModel) -> f64 {
    let count = classes.len();
    if count <= 1 {
        return 1.0;
    }

    let mut package_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for fqn in classes {
        *package_counts.entry(ProgramModel::package_of(fqn)).or_default() += 1;
    }
    let dominant = package_counts.values().max().copied().unwrap_or(0);
    let homogeneity = dominant as f64 / count as f64;

    // Interface sharing: classes implementing an interface that at
    // least one sibling in the layer also implements.
    let mut interface_users: BTreeMap<&str, usize> = BTreeMap::new();
    for fqn in classes {
        if let Some(class) = model.get(fqn) {
            for iface in &class.interfaces {
                *interface_users.entry(iface.as_str()).or_default() += 1;
            }
        }
    }
    let sharing_count = classes
        .iter()
        .filter(|fqn| {
            model.get(fqn).is_some_and(|class| {
                class
                    .interfaces
                    .iter()
                    .any(|iface| interface_users.get(iface.as_str()).copied().unwrap_or(0) >= 2)
            })
        })
        .count();
    let sharing = sharing_count as f64 / count as f64;

    ((homogeneity + sharing) / 2.0).clamp(0.0, 1.0)
}

/// (incoming + outgoing edge count) / (classes x (present layers - 1)),
/// clamped; 0 when the denominator vanishes.
fn layer_coupling(
    layer: LayerType,
    class_count: usize,
    present_layers: usize,
    dependencies: &[LayerDependency],
) -> f64 {
    if class_count == 0 || present_layers <= 1 {
        return 0.0;
    }
    let touching = dependencies
        .iter()
        .filter(|d| d.source_layer == layer || d.target_layer == layer)
        .count();
    let denominator = (class_count * (present_layers - 1)) as f64;
    (touching as f64 / denominator).clamp(0.0, 1.0)
}

fn compliance(violations: &[LayerViolation], total_classes: usize) -> f64 {
    if total_classes == 0 {
        return 1.0;
    }
    let weight_sum: f64 = violations.iter().map(|v| v.severity.weight()).sum();
    (1.0 - weight_sum / total_classes as f64).max(0.0)
}

fn integrity(compliance: f64, layers: &[LayerSummary]) -> f64 {
    if layers.is_empty() {
        return compliance;
    }
    let mean_cohesion: f64 =
        layers.iter().map(|l| l.cohesion).sum::<f64>() / layers.len() as f64;
    let mean_coupling: f64 =
        layers.iter().map(|l| l.coupling).sum::<f64>() / layers.len() as f64;
    ((compliance + mean_cohesion + (1.0 - mean_coupling)) / 3.0).clamp(0.0, 1.0)
}

fn recommend(violations: &[LayerViolation], integrity: f64) -> Vec<Recommendation> {
    let mut groups: BTreeMap<ViolationKind, Vec<&LayerViolation>> = BTreeMap::new();
    for violation in violations {
        groups.entry(violation.kind).or_default().push(violation);
    }

    let mut recommendations = Vec::new();
    for (kind, group) in &groups {
        let priority = group
            .iter()
            .map(|v| v.severity)
            .max()
            .unwrap_or(ViolationSeverity::Medium);
        let description = match kind {
            ViolationKind::UpwardDependency => format!(
                "Invert {} upward dependency(ies): lower layers must not reach back up. \
                 Introduce an interface owned by the lower layer and inject the implementation.",
                group.len()
            ),
            ViolationKind::SkipLayerDependency => format!(
                "Route {} layer-skipping dependency(ies) through the intermediate layer \
                 instead of bypassing it.",
                group.len()
            ),
            ViolationKind::CircularDependency => format!(
                "Break {} circular layer dependency(ies) by extracting the shared parts \
                 into a lower layer.",
                group.len()
            ),
        };
        recommendations.push(Recommendation {
            kind: Some(*kind),
            priority,
            affected_count: group.len(),
            description,
        });
    }

    if integrity < 0.5 {
        recommendations.push(Recommendation {
            kind: None,
            priority: ViolationSeverity::High,
            affected_count: violations.len(),
            description: format!(
                "Architectural integrity is {:.2}; plan a broader refactoring toward \
                 strict layering before adding features.",
                integrity
            ),
        });
    }

    recommendations
}
