//! Per-class hierarchy construction.
//!
//! Walks recorded superclass chains inside the analyzed archive. The
//! raw edge set may be cyclic (malformed archives exist); every walk
//! carries a visited set and stops on revisit instead of trusting the
//! chain to terminate.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::warn;

use super::types::ClassHierarchy;
use crate::shared::java::is_java_lang_object;
use crate::shared::models::{ClassFact, ProgramModel};

/// Build the hierarchy view for every class in the model.
pub fn build_hierarchies(model: &ProgramModel) -> BTreeMap<String, ClassHierarchy> {
    // Reverse index: superclass -> direct subclasses
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for class in model.classes() {
        if let Some(sup) = class.superclass.as_deref() {
            if !is_java_lang_object(sup) {
                children.entry(sup).or_default().push(&class.fqn);
            }
        }
    }

    model
        .classes()
        .map(|class| {
            let mut hierarchy = build_one(class, model);
            if let Some(subs) = children.get(class.fqn.as_str()) {
                hierarchy.subclasses = subs.iter().map(|s| s.to_string()).collect();
            }
            (class.fqn.clone(), hierarchy)
        })
        .collect()
}

/// Hierarchy for a single class: superclass walk with a cycle guard.
pub fn build_one(class: &ClassFact, model: &ProgramModel) -> ClassHierarchy {
    let mut hierarchy = ClassHierarchy::root(&class.fqn);
    hierarchy
        .interfaces
        .extend(class.interfaces.iter().cloned());

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(&class.fqn);

    let mut current = class.superclass.as_deref();
    while let Some(sup) = current {
        if is_java_lang_object(sup) {
            break;
        }
        if !visited.insert(sup) {
            warn!(
                class = %class.fqn,
                ancestor = %sup,
                "inheritance cycle in recorded superclass chain, stopping walk"
            );
            break;
        }
        hierarchy.depth += 1;
        hierarchy.ancestors.push(sup.to_string());

        match model.get(sup) {
            Some(ancestor) => {
                hierarchy
                    .interfaces
                    .extend(ancestor.interfaces.iter().cloned());
                current = ancestor.superclass.as_deref();
            }
            // Chain leaves the archive: the recorded name is the
            // nearest known ancestor and the walk ends there.
            None => break,
        }
    }

    hierarchy
}
