//! Relationship analysis over the program model.
//!
//! ## Algorithm
//! 1. Validate and derive edges per class: inheritance from the recorded
//!    superclass (Object skipped), implementation from the interface
//!    list, composition/aggregation/association from field types,
//!    dependency from method signatures.
//! 2. Build per-class hierarchies (superclass walk, cycle-guarded).
//! 3. Run design-pattern heuristics.
//! 4. Compute coupling/cohesion metrics over the derived edge set.
//!
//! Soft-fail contract: an empty model is a successful empty result; a
//! malformed class is skipped and the rest of the archive is still
//! analyzed; only a run where every class fails reports
//! `successful = false`. After `shutdown()` every call short-circuits
//! to a failed result.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::hierarchy::build_hierarchies;
use super::metrics::compute_metrics;
use super::patterns::detect_patterns;
use super::types::{
    ClassRelationship, RelationKind, RelationshipAnalysisResult, RelationshipMetrics,
};
use crate::shared::java::{
    collection_element_type, is_analyzable_type, is_collection_type, is_java_lang_object,
    strip_generics,
};
use crate::shared::models::{ClassFact, FieldFact, ProgramModel};

/// Class counts at or above this size take the parallel derivation path.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

pub(crate) const SHUTDOWN_MESSAGE: &str = "Analyzer has been shut down";

/// Derives class relationships, hierarchies, patterns and metrics.
///
/// Stateless per call apart from the shutdown flag; one instance may be
/// shared across threads and models.
#[derive(Debug)]
pub struct RelationshipAnalyzer {
    kinds: BTreeSet<RelationKind>,
    shut_down: AtomicBool,
}

impl Default for RelationshipAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipAnalyzer {
    /// Analyzer covering every relationship kind.
    pub fn new() -> Self {
        Self::with_kinds(RelationKind::ALL)
    }

    /// Analyzer restricted to a subset of relationship kinds: same
    /// algorithm, filtered output. Useful for cheaper partial runs.
    pub fn with_kinds(kinds: impl IntoIterator<Item = RelationKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Kinds this instance reports.
    pub fn kinds(&self) -> &BTreeSet<RelationKind> {
        &self.kinds
    }

    /// Flip the instance into the shut-down state. Idempotent; visible
    /// to every thread immediately.
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Analyze one model. Never panics across this boundary; see the
    /// module contract for the failure modes.
    pub fn analyze(&self, model: &ProgramModel) -> RelationshipAnalysisResult {
        if self.is_shut_down() {
            return RelationshipAnalysisResult::failed(SHUTDOWN_MESSAGE);
        }

        let started = Instant::now();
        let total = model.len();
        debug!(classes = total, "starting relationship analysis");

        if model.is_empty() {
            return RelationshipAnalysisResult {
                successful: true,
                error_message: None,
                relationships: BTreeSet::new(),
                hierarchies: Default::default(),
                patterns: Vec::new(),
                metrics: RelationshipMetrics::default(),
                analyzed_class_count: 0,
                skipped_class_count: 0,
                duration_ms: started.elapsed().as_millis() as u64,
            };
        }

        let per_class = self.derive_all(model);

        let mut relationships: BTreeSet<ClassRelationship> = BTreeSet::new();
        let mut analyzed = 0usize;
        let mut skipped = 0usize;
        for outcome in per_class {
            match outcome {
                Some(edges) => {
                    analyzed += 1;
                    relationships.extend(edges);
                }
                None => skipped += 1,
            }
        }

        if analyzed == 0 {
            return RelationshipAnalysisResult::failed(format!(
                "relationship analysis failed for all {total} classes"
            ));
        }

        let hierarchies = build_hierarchies(model);
        let patterns = detect_patterns(model);
        let metrics = compute_metrics(model, &relationships, &hierarchies);

        debug!(
            relationships = relationships.len(),
            patterns = patterns.len(),
            skipped,
            "relationship analysis finished"
        );

        RelationshipAnalysisResult {
            successful: true,
            error_message: None,
            relationships,
            hierarchies,
            patterns,
            metrics,
            analyzed_class_count: analyzed,
            skipped_class_count: skipped,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Per-class edge derivation, parallel on large models. Output
    /// order is the model's class order either way; the caller folds
    /// into a set, so partitioning cannot change the result.
    fn derive_all(&self, model: &ProgramModel) -> Vec<Option<Vec<ClassRelationship>>> {
        let classes: Vec<&ClassFact> = model.classes().collect();

        #[cfg(feature = "parallel")]
        if classes.len() >= PARALLEL_THRESHOLD {
            return classes
                .par_iter()
                .map(|class| self.derive_class(class, model))
                .collect();
        }

        classes
            .iter()
            .map(|class| self.derive_class(class, model))
            .collect()
    }

    /// Edges for one class, `None` when the fact is too malformed to
    /// analyze. One bad class never aborts the run.
    fn derive_class(
        &self,
        class: &ClassFact,
        model: &ProgramModel,
    ) -> Option<Vec<ClassRelationship>> {
        if class.fqn.trim().is_empty() {
            warn!("skipping class fact with empty fully-qualified name");
            return None;
        }

        let mut edges = Vec::new();

        if let Some(sup) = class.superclass.as_deref() {
            if !is_java_lang_object(sup) && sup != class.fqn {
                self.push(&mut edges, class, sup, RelationKind::Inheritance);
            }
        }

        for iface in &class.interfaces {
            if iface != &class.fqn {
                self.push(&mut edges, class, iface, RelationKind::Implementation);
            }
        }

        for field in &class.fields {
            self.derive_field_edge(&mut edges, class, model, field);
        }

        for method in &class.methods {
            for param in &method.parameters {
                self.maybe_dependency(&mut edges, class, &param.param_type);
            }
            if !method.is_constructor() {
                self.maybe_dependency(&mut edges, class, &method.return_type);
            }
            for exception in &method.exceptions {
                self.maybe_dependency(&mut edges, class, exception);
            }
        }

        Some(edges)
    }

    /// Field-type classification, the documented ownership heuristic:
    /// collection-typed or settable fields aggregate; single-valued
    /// un-settable fields of archive classes compose; fields of
    /// application types outside the archive associate. No lifetime
    /// analysis behind it.
    fn derive_field_edge(
        &self,
        edges: &mut Vec<ClassRelationship>,
        class: &ClassFact,
        model: &ProgramModel,
        field: &FieldFact,
    ) {
        let declared = &field.field_type;

        if is_collection_type(declared) {
            if let Some(element) = collection_element_type(declared) {
                let element_base = strip_generics(&element).trim_end_matches("[]").to_string();
                if is_analyzable_type(&element_base) && element_base != class.fqn {
                    self.push(edges, class, &element_base, RelationKind::Aggregation);
                }
            }
            return;
        }

        if !is_analyzable_type(declared) {
            return;
        }
        let base = strip_generics(declared);
        if base == class.fqn {
            return;
        }

        if model.contains(base) {
            let kind = if class.has_setter_for(&field.name) {
                RelationKind::Aggregation
            } else {
                RelationKind::Composition
            };
            self.push(edges, class, base, kind);
        } else {
            self.push(edges, class, base, RelationKind::Association);
        }
    }

    fn maybe_dependency(
        &self,
        edges: &mut Vec<ClassRelationship>,
        class: &ClassFact,
        type_name: &str,
    ) {
        if !is_analyzable_type(type_name) {
            return;
        }
        let base = strip_generics(type_name).trim_end_matches("[]");
        if base == class.fqn {
            return;
        }
        self.push(edges, class, base, RelationKind::Dependency);
    }

    fn push(
        &self,
        edges: &mut Vec<ClassRelationship>,
        class: &ClassFact,
        target: &str,
        kind: RelationKind,
    ) {
        if self.kinds.contains(&kind) {
            edges.push(ClassRelationship::new(&class.fqn, target, kind));
        }
    }
}
