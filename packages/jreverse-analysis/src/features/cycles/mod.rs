//! Circular-dependency analysis over injection edges.

mod analyzer;
mod detector;
mod resolution;
mod types;

pub use analyzer::CircularDependencyAnalyzer;
pub use detector::find_cycles;
pub use resolution::strategies_for;
pub use types::{
    CircularDependencyResult, CycleKind, CycleRisk, CycleSeverity, DependencyCycle,
    ResolutionStrategy, StrategyComplexity, StrategyKind,
};
