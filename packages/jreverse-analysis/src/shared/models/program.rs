//! Per-archive program model: the immutable snapshot analyzers read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::class::ClassFact;
use crate::errors::{JReverseError, Result};
use crate::shared::java::package_of;

/// Immutable snapshot of one JAR/WAR archive.
///
/// Classes are keyed by fully-qualified name in a `BTreeMap` so every
/// iteration order is deterministic. The model is produced once by the
/// loader and only read by analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramModel {
    classes: BTreeMap<String, ClassFact>,
    /// Archive manifest main-attributes (`Main-Class`, `Start-Class`, ...).
    manifest: BTreeMap<String, String>,
}

impl ProgramModel {
    pub fn builder() -> ProgramModelBuilder {
        ProgramModelBuilder::default()
    }

    /// Convenience constructor for pre-validated class sets. Duplicate
    /// FQNs keep the last fact, matching classpath shadowing.
    pub fn from_classes(classes: impl IntoIterator<Item = ClassFact>) -> Self {
        let classes = classes
            .into_iter()
            .map(|c| (c.fqn.clone(), c))
            .collect();
        Self {
            classes,
            manifest: BTreeMap::new(),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassFact> {
        self.classes.values()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn get(&self, fqn: &str) -> Option<&ClassFact> {
        self.classes.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.classes.contains_key(fqn)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn manifest_attr(&self, key: &str) -> Option<&str> {
        self.manifest.get(key).map(String::as_str)
    }

    /// Package-name derivation: substring before the last separator,
    /// empty for the default package.
    pub fn package_of(fqn: &str) -> &str {
        package_of(fqn)
    }
}

/// Builder validating loader invariants before the snapshot is sealed.
#[derive(Debug, Default)]
pub struct ProgramModelBuilder {
    classes: Vec<ClassFact>,
    manifest: BTreeMap<String, String>,
}

impl ProgramModelBuilder {
    pub fn add_class(mut self, class: ClassFact) -> Self {
        self.classes.push(class);
        self
    }

    pub fn add_classes(mut self, classes: impl IntoIterator<Item = ClassFact>) -> Self {
        self.classes.extend(classes);
        self
    }

    pub fn manifest_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.manifest.insert(key.into(), value.into());
        self
    }

    /// Seal the snapshot. Every class must carry a non-empty FQN;
    /// duplicate FQNs keep the last declaration.
    pub fn build(self) -> Result<ProgramModel> {
        let mut classes = BTreeMap::new();
        for class in self.classes {
            if class.fqn.trim().is_empty() {
                return Err(JReverseError::malformed_model(
                    "class fact with empty fully-qualified name",
                ));
            }
            classes.insert(class.fqn.clone(), class);
        }
        Ok(ProgramModel {
            classes,
            manifest: self.manifest,
        })
    }
}
