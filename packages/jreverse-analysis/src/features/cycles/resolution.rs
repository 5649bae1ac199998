//! Ranked resolution strategies for a detected cycle.

use super::types::{CycleKind, ResolutionStrategy, StrategyComplexity, StrategyKind};

/// Build the ranked strategy list for one cycle. Order is fixed
/// (lazy, then interface extraction, then events) and the first entry
/// is marked primary.
pub fn strategies_for(kind: CycleKind, class_count: usize) -> Vec<ResolutionStrategy> {
    let mut strategies = vec![
        ResolutionStrategy {
            kind: StrategyKind::LazyInitialization,
            description: "Mark one injection point @Lazy so the container resolves it on first use instead of at construction time".to_string(),
            complexity: StrategyComplexity::Low,
            is_primary: false,
        },
        ResolutionStrategy {
            kind: StrategyKind::InterfaceSegregation,
            description: "Extract the shared operations into an interface and depend on the abstraction to break the concrete cycle".to_string(),
            complexity: StrategyComplexity::Medium,
            is_primary: false,
        },
    ];

    // Worth the rewrite only for structurally entangled cycles
    if class_count >= 3 || kind == CycleKind::MixedInjection {
        strategies.push(ResolutionStrategy {
            kind: StrategyKind::EventBasedDecoupling,
            description: "Publish an application event instead of calling back into the cycle, letting a listener react asynchronously".to_string(),
            complexity: StrategyComplexity::High,
            is_primary: false,
        });
    }

    if let Some(first) = strategies.first_mut() {
        first.is_primary = true;
    }
    strategies
}
