//! Value objects for layered-architecture analysis.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Architectural tier with a fixed dependency-direction rank.
/// Rank 1 sits at the top of the stack; legal dependencies point
/// downward and skip at most one tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LayerType {
    Presentation,
    Business,
    Domain,
    Persistence,
    Infrastructure,
}

impl LayerType {
    pub const ALL: [LayerType; 5] = [
        LayerType::Presentation,
        LayerType::Business,
        LayerType::Domain,
        LayerType::Persistence,
        LayerType::Infrastructure,
    ];

    /// Hierarchy rank: 1 = highest (presentation), 5 = lowest
    /// (infrastructure).
    pub fn rank(&self) -> u8 {
        match self {
            LayerType::Presentation => 1,
            LayerType::Business => 2,
            LayerType::Domain => 3,
            LayerType::Persistence => 4,
            LayerType::Infrastructure => 5,
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerType::Presentation => "presentation",
            LayerType::Business => "business",
            LayerType::Domain => "domain",
            LayerType::Persistence => "persistence",
            LayerType::Infrastructure => "infrastructure",
        };
        f.write_str(name)
    }
}

/// Violation classification derived purely from rank comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ViolationKind {
    UpwardDependency,
    SkipLayerDependency,
    CircularDependency,
}

/// Declared least-severe first so the derived ordering ranks
/// `Critical` greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ViolationSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ViolationSeverity {
    /// Weight used by the compliance formula.
    pub fn weight(&self) -> f64 {
        match self {
            ViolationSeverity::Critical => 1.0,
            ViolationSeverity::High => 0.75,
            ViolationSeverity::Medium => 0.5,
            ViolationSeverity::Low => 0.25,
        }
    }
}

/// One cross-layer dependency edge between two classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDependency {
    pub source_class: String,
    pub target_class: String,
    pub source_layer: LayerType,
    pub target_layer: LayerType,
    /// Fraction of the source class's field+method references that
    /// target the dependency's layer, in [0, 1].
    pub strength: f64,
}

/// One detected layering violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerViolation {
    pub kind: ViolationKind,
    pub severity: ViolationSeverity,
    pub source_layer: LayerType,
    pub target_layer: LayerType,
    /// Package of the offending source class; empty on the degraded
    /// placeholder.
    pub source_package: String,
    pub description: String,
    pub impact_score: f64,
}

/// Per-layer classification summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub layer: LayerType,
    pub classes: BTreeSet<String>,
    /// Mean of package homogeneity and interface sharing, [0, 1].
    pub cohesion: f64,
    /// (incoming + outgoing edges) / (classes x (layers - 1)), [0, 1].
    pub coupling: f64,
}

impl LayerSummary {
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Remediation advice grouped per violation kind; `kind = None` is the
/// blanket refactoring recommendation for low-integrity archives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: Option<ViolationKind>,
    pub priority: ViolationSeverity,
    pub affected_count: usize,
    pub description: String,
}

/// Result of one layered-architecture analysis. The degraded form
/// (internal fault downgraded) carries zero layers, a single critical
/// placeholder violation and compliance 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredArchitectureResult {
    pub successful: bool,
    pub error_message: Option<String>,
    pub layer_assignments: BTreeMap<String, LayerType>,
    /// Non-empty layers, ordered by rank.
    pub layers: Vec<LayerSummary>,
    pub dependencies: Vec<LayerDependency>,
    pub violations: Vec<LayerViolation>,
    /// `max(0, 1 - sum(severity weights) / total classes)`.
    pub compliance_score: f64,
    /// Blend of compliance, mean cohesion and inverted mean coupling.
    pub architectural_integrity: f64,
    pub recommendations: Vec<Recommendation>,
    pub duration_ms: u64,
}

impl LayeredArchitectureResult {
    pub fn layer_of(&self, fqn: &str) -> Option<LayerType> {
        self.layer_assignments.get(fqn).copied()
    }

    pub fn violations_of_kind(&self, kind: ViolationKind) -> Vec<&LayerViolation> {
        self.violations.iter().filter(|v| v.kind == kind).collect()
    }

    pub fn layer_summary(&self, layer: LayerType) -> Option<&LayerSummary> {
        self.layers.iter().find(|l| l.layer == layer)
    }
}
