//! Value objects produced by relationship analysis.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of edge between two classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RelationKind {
    Inheritance,
    Implementation,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl RelationKind {
    pub const ALL: [RelationKind; 6] = [
        RelationKind::Inheritance,
        RelationKind::Implementation,
        RelationKind::Composition,
        RelationKind::Aggregation,
        RelationKind::Association,
        RelationKind::Dependency,
    ];

    /// Coupling strength fixed per kind. Inheritance, implementation and
    /// composition bind tightly; aggregation holds at arm's length;
    /// association and dependency are loose references.
    pub fn strength(&self) -> RelationStrength {
        match self {
            RelationKind::Inheritance
            | RelationKind::Implementation
            | RelationKind::Composition => RelationStrength::Strong,
            RelationKind::Aggregation => RelationStrength::Medium,
            RelationKind::Association | RelationKind::Dependency => RelationStrength::Weak,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, RelationKind::Inheritance | RelationKind::Implementation)
    }
}

/// Coarse coupling-tightness classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RelationStrength {
    Weak,
    Medium,
    Strong,
}

/// One directed edge between two classes.
///
/// Rebuilt from scratch on every analysis run; never persisted.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClassRelationship {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    pub strength: RelationStrength,
}

impl ClassRelationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            strength: kind.strength(),
        }
    }
}

/// Per-class inheritance view rooted at one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHierarchy {
    pub class_name: String,
    /// Inheritance distance to `java.lang.Object`, counting only
    /// non-Object ancestors: a direct `Object` subclass has depth 0.
    pub depth: usize,
    /// Interfaces implemented directly or through an ancestor.
    pub interfaces: BTreeSet<String>,
    /// Direct subclasses found in the analyzed archive.
    pub subclasses: BTreeSet<String>,
    /// Ancestor chain from the nearest superclass upward, `Object`
    /// excluded. Truncated where the chain leaves the archive.
    pub ancestors: Vec<String>,
}

impl ClassHierarchy {
    pub fn root(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            depth: 0,
            interfaces: BTreeSet::new(),
            subclasses: BTreeSet::new(),
            ancestors: Vec::new(),
        }
    }
}

/// Structural design patterns recognized by shape heuristics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DesignPattern {
    Singleton,
    Factory,
    Builder,
    Strategy,
    Observer,
    Repository,
}

/// One detected pattern instance on one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub pattern: DesignPattern,
    pub class_name: String,
    /// Heuristic confidence in [0, 1].
    pub confidence: f64,
    /// Structural signals that contributed to the confidence.
    pub evidence: Vec<String>,
}

impl DetectedPattern {
    pub fn new(pattern: DesignPattern, class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            pattern,
            class_name: class_name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence.push(evidence.into());
        self
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= 0.7
    }
}

/// Qualitative bucket derived from the coupling/cohesion indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchitecturalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ArchitecturalQuality {
    /// Bucket from normalized indices: low coupling and high cohesion
    /// score best.
    pub fn from_indices(coupling: f64, cohesion: f64) -> Self {
        if coupling <= 0.3 && cohesion >= 0.7 {
            ArchitecturalQuality::Excellent
        } else if coupling <= 0.5 && cohesion >= 0.5 {
            ArchitecturalQuality::Good
        } else if coupling <= 0.7 {
            ArchitecturalQuality::Fair
        } else {
            ArchitecturalQuality::Poor
        }
    }
}

/// Aggregate metrics over one relationship analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMetrics {
    /// Normalized [0, 1]: mean fraction of the archive each class
    /// reaches through outgoing edges.
    pub coupling_index: f64,
    /// Normalized [0, 1]: mean same-package fraction of each class's
    /// outgoing edges (structural proxy, no method bodies available).
    pub cohesion_index: f64,
    /// Unweighted mean of hierarchy depths.
    pub average_inheritance_depth: f64,
    pub quality: ArchitecturalQuality,
    pub relationship_counts: BTreeMap<RelationKind, usize>,
}

impl Default for RelationshipMetrics {
    fn default() -> Self {
        Self {
            coupling_index: 0.0,
            cohesion_index: 1.0,
            average_inheritance_depth: 0.0,
            quality: ArchitecturalQuality::Excellent,
            relationship_counts: BTreeMap::new(),
        }
    }
}

/// Result of one relationship analysis run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipAnalysisResult {
    pub successful: bool,
    pub error_message: Option<String>,
    pub relationships: BTreeSet<ClassRelationship>,
    pub hierarchies: BTreeMap<String, ClassHierarchy>,
    pub patterns: Vec<DetectedPattern>,
    pub metrics: RelationshipMetrics,
    pub analyzed_class_count: usize,
    pub skipped_class_count: usize,
    pub duration_ms: u64,
}

impl RelationshipAnalysisResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            error_message: Some(message.into()),
            relationships: BTreeSet::new(),
            hierarchies: BTreeMap::new(),
            patterns: Vec::new(),
            metrics: RelationshipMetrics::default(),
            analyzed_class_count: 0,
            skipped_class_count: 0,
            duration_ms: 0,
        }
    }

    pub fn relationships_of_kind(&self, kind: RelationKind) -> Vec<&ClassRelationship> {
        self.relationships.iter().filter(|r| r.kind == kind).collect()
    }

    pub fn hierarchy(&self, fqn: &str) -> Option<&ClassHierarchy> {
        self.hierarchies.get(fqn)
    }

    pub fn patterns_of(&self, pattern: DesignPattern) -> Vec<&DetectedPattern> {
        self.patterns.iter().filter(|p| p.pattern == pattern).collect()
    }
}
