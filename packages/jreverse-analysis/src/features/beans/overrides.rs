//! Override and conflict detection over extracted bean definitions.
//!
//! Definitions sharing a bean name (NAME) or a bean class (TYPE) form
//! override groups. Within a group the winner is the first definition
//! marked `@Primary`, or the last-declared definition when none is.
//! Situations with no clean winner surface as [`BeanConflict`]s.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::types::{
    BeanConflict, BeanDefinition, BeanOverride, BeanOverrideAnalysisResult, BeanScope,
    ConflictKind, OverrideKind, OverrideReason,
};

/// Resolve every name and type override group in `beans`.
///
/// An empty input yields an empty result, never an error. Input order
/// is declaration order; it decides the declaration-order fallback.
pub fn detect_overrides(beans: &[BeanDefinition]) -> BeanOverrideAnalysisResult {
    if beans.is_empty() {
        return BeanOverrideAnalysisResult::default();
    }

    let mut overrides = Vec::new();
    let mut conflicts = Vec::new();

    for (name, group) in group_by(beans, |b| b.bean_name.clone()) {
        if group.len() < 2 {
            continue;
        }
        overrides.push(resolve_group(OverrideKind::Name, &name, &group));
        conflicts.extend(multiple_primary_conflict(&group));
        conflicts.extend(scope_mismatch_conflict(&name, &group));
    }

    for (bean_class, group) in group_by(beans, |b| b.bean_class.clone()) {
        if group.len() < 2 {
            continue;
        }
        overrides.push(resolve_group(OverrideKind::Type, &bean_class, &group));
        conflicts.extend(multiple_primary_conflict(&group));
    }

    conflicts.extend(duplicate_qualifier_conflicts(beans));
    dedup_conflicts(&mut conflicts);

    debug!(
        overrides = overrides.len(),
        conflicts = conflicts.len(),
        "bean override detection complete"
    );
    BeanOverrideAnalysisResult {
        overrides,
        conflicts,
    }
}

fn group_by<'a>(
    beans: &'a [BeanDefinition],
    key: impl Fn(&BeanDefinition) -> String,
) -> BTreeMap<String, Vec<&'a BeanDefinition>> {
    let mut groups: BTreeMap<String, Vec<&BeanDefinition>> = BTreeMap::new();
    for bean in beans {
        groups.entry(key(bean)).or_default().push(bean);
    }
    groups
}

fn resolve_group(kind: OverrideKind, key: &str, group: &[&BeanDefinition]) -> BeanOverride {
    let first_primary = group.iter().position(|b| b.is_primary);
    // The first primary in declaration order wins even when several are
    // marked; the MultiplePrimary conflict reports the excess.
    let (winner_idx, reason) = match first_primary {
        Some(idx) => (idx, OverrideReason::PrimaryAnnotation),
        None => (group.len() - 1, OverrideReason::DeclarationOrder),
    };
    let losers = group
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != winner_idx)
        .map(|(_, b)| (*b).clone())
        .collect();
    BeanOverride {
        kind,
        key: key.to_string(),
        winner: group[winner_idx].clone(),
        losers,
        reason,
        is_potential_problem: reason == OverrideReason::DeclarationOrder,
    }
}

fn multiple_primary_conflict(group: &[&BeanDefinition]) -> Option<BeanConflict> {
    let primaries: Vec<&&BeanDefinition> = group.iter().filter(|b| b.is_primary).collect();
    if primaries.len() < 2 {
        return None;
    }
    let mut bean_names: Vec<String> = primaries.iter().map(|b| b.bean_name.clone()).collect();
    bean_names.sort();
    bean_names.dedup();
    let sites: Vec<String> = primaries.iter().map(|b| declaration_site(b)).collect();
    Some(BeanConflict {
        kind: ConflictKind::MultiplePrimary,
        severity: ConflictKind::MultiplePrimary.severity(),
        bean_names,
        description: format!(
            "{} definitions marked primary: {}",
            primaries.len(),
            sites.join(", ")
        ),
    })
}

fn scope_mismatch_conflict(name: &str, group: &[&BeanDefinition]) -> Option<BeanConflict> {
    let mut scopes: Vec<BeanScope> = group.iter().map(|b| b.scope).collect();
    scopes.sort();
    scopes.dedup();
    if scopes.len() < 2 {
        return None;
    }
    let listed: Vec<String> = scopes
        .iter()
        .map(|s| format!("{s:?}").to_ascii_lowercase())
        .collect();
    Some(BeanConflict {
        kind: ConflictKind::ScopeMismatch,
        severity: ConflictKind::ScopeMismatch.severity(),
        bean_names: vec![name.to_string()],
        description: format!(
            "bean '{}' is declared with {} different scopes: {}",
            name,
            scopes.len(),
            listed.join(", ")
        ),
    })
}

/// The same qualifier value claimed by two or more differently-named
/// beans makes qualifier-based injection ambiguous.
fn duplicate_qualifier_conflicts(beans: &[BeanDefinition]) -> Vec<BeanConflict> {
    let mut by_qualifier: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for bean in beans {
        for qualifier in &bean.qualifiers {
            by_qualifier
                .entry(qualifier)
                .or_default()
                .insert(&bean.bean_name);
        }
    }
    by_qualifier
        .into_iter()
        .filter(|(_, names)| names.len() >= 2)
        .map(|(qualifier, names)| {
            let listed: Vec<&str> = names.iter().copied().collect();
            BeanConflict {
                kind: ConflictKind::DuplicateQualifier,
                severity: ConflictKind::DuplicateQualifier.severity(),
                bean_names: listed.iter().map(|n| n.to_string()).collect(),
                description: format!(
                    "qualifier '{}' is claimed by {} beans: {}",
                    qualifier,
                    listed.len(),
                    listed.join(", ")
                ),
            }
        })
        .collect()
}

fn declaration_site(bean: &BeanDefinition) -> String {
    match &bean.factory_method {
        Some(method) => format!("{}#{}", bean.declaring_class, method),
        None => bean.declaring_class.clone(),
    }
}

/// A name group and a type group can spot the same conflict; keep the
/// first occurrence per (kind, bean set).
fn dedup_conflicts(conflicts: &mut Vec<BeanConflict>) {
    let mut seen = BTreeSet::new();
    conflicts.retain(|c| seen.insert((c.kind, c.bean_names.clone())));
}
