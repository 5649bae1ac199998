//! Layered-architecture analysis: classification, violations, scores.

mod analyzer;
mod classifier;
mod types;

pub use analyzer::{classify_violation, LayeredArchitectureAnalyzer, MIN_LAYERED_CLASSES};
pub use classifier::{classify, layer_indicator};
pub use types::{
    LayerDependency, LayerSummary, LayerType, LayerViolation, LayeredArchitectureResult,
    Recommendation, ViolationKind, ViolationSeverity,
};
