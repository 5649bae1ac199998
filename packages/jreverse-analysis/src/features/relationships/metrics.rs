//! Coupling/cohesion metrics over a derived relationship set.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};

use super::types::{
    ArchitecturalQuality, ClassHierarchy, ClassRelationship, RelationKind, RelationshipMetrics,
};
use crate::shared::java::package_of;
use crate::shared::models::ProgramModel;

/// Compute the aggregate metrics for one analysis run.
pub fn compute_metrics(
    model: &ProgramModel,
    relationships: &BTreeSet<ClassRelationship>,
    hierarchies: &BTreeMap<String, ClassHierarchy>,
) -> RelationshipMetrics {
    let mut relationship_counts: BTreeMap<RelationKind, usize> = BTreeMap::new();
    for rel in relationships {
        *relationship_counts.entry(rel.kind).or_default() += 1;
    }

    let coupling_index = coupling_index(model, relationships);
    let cohesion_index = cohesion_index(relationships);
    let average_inheritance_depth = if hierarchies.is_empty() {
        0.0
    } else {
        hierarchies.values().map(|h| h.depth as f64).sum::<f64>() / hierarchies.len() as f64
    };

    RelationshipMetrics {
        coupling_index,
        cohesion_index,
        average_inheritance_depth,
        quality: ArchitecturalQuality::from_indices(coupling_index, cohesion_index),
        relationship_counts,
    }
}

/// Mean fraction of the archive each class reaches through outgoing
/// edges. 0.0 for models with fewer than two classes.
fn coupling_index(model: &ProgramModel, relationships: &BTreeSet<ClassRelationship>) -> f64 {
    let total = model.len();
    if total < 2 {
        return 0.0;
    }
    let mut targets_per_class: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
    for rel in relationships {
        targets_per_class
            .entry(rel.source.as_str())
            .or_default()
            .insert(rel.target.as_str());
    }
    let reach_sum: f64 = model
        .classes()
        .map(|c| {
            let out = targets_per_class
                .get(c.fqn.as_str())
                .map(FxHashSet::len)
                .unwrap_or(0);
            out as f64 / (total - 1) as f64
        })
        .sum();
    (reach_sum / total as f64).clamp(0.0, 1.0)
}

/// Same-package fraction of outgoing edges, averaged over classes that
/// have any. No method bodies are available, so package locality stands
/// in for member-level cohesion. 1.0 when nothing couples to anything.
fn cohesion_index(relationships: &BTreeSet<ClassRelationship>) -> f64 {
    let mut per_class: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for rel in relationships {
        let entry = per_class.entry(rel.source.as_str()).or_default();
        entry.1 += 1;
        if package_of(&rel.source) == package_of(&rel.target) {
            entry.0 += 1;
        }
    }
    if per_class.is_empty() {
        return 1.0;
    }
    let sum: f64 = per_class
        .values()
        .map(|(local, total)| *local as f64 / *total as f64)
        .sum();
    (sum / per_class.len() as f64).clamp(0.0, 1.0)
}
