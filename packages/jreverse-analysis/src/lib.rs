/*
 * JReverse Analysis - Spring Archive Analysis Engine
 *
 * Feature-First Architecture:
 * - shared/      : Program model (ClassFact, ProgramModel) + Java type helpers
 * - features/    : Vertical slices (relationships / layering / beans / cycles / entrypoints)
 * - errors       : JReverseError + Result alias
 *
 * Every analyzer is a pure, synchronous function over an immutable
 * ProgramModel snapshot: same input, same output, no I/O. Archive
 * loading and report rendering live in other crates.
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared program model and Java type helpers
pub mod shared;

/// Feature modules (one slice per analyzer family)
pub mod features;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use errors::{JReverseError, Result};
pub use features::beans::{BeanAnalysisResult, BeanAnalyzer};
pub use features::cycles::{CircularDependencyAnalyzer, CircularDependencyResult};
pub use features::entrypoints::{EntrypointAnalysisResult, EntrypointAnalyzer};
pub use features::layering::{LayeredArchitectureAnalyzer, LayeredArchitectureResult};
pub use features::relationships::{RelationshipAnalysisResult, RelationshipAnalyzer};
pub use shared::models::{ClassFact, ProgramModel, ProgramModelBuilder};
