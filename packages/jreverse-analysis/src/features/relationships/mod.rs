//! Class-relationship analysis: edges, hierarchies, patterns, metrics.

mod analyzer;
mod hierarchy;
mod metrics;
mod patterns;
mod types;

pub use analyzer::RelationshipAnalyzer;
pub use hierarchy::{build_hierarchies, build_one};
pub use metrics::compute_metrics;
pub use patterns::{detect_patterns, MIN_CONFIDENCE};
pub use types::{
    ArchitecturalQuality, ClassHierarchy, ClassRelationship, DesignPattern, DetectedPattern,
    RelationKind, RelationStrength, RelationshipAnalysisResult, RelationshipMetrics,
};
