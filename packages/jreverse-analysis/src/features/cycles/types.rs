//! Dependency-cycle value objects.

use serde::{Deserialize, Serialize};

use crate::features::beans::InjectionPoint;

/// Injection homogeneity across a cycle's edges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CycleKind {
    /// Every edge is constructor injection; the container cannot build
    /// either bean first.
    ConstructorOnly,
    /// Every edge is field injection; proxies can break the deadlock.
    FieldOnly,
    MixedInjection,
}

/// Primary runtime risk a cycle carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CycleRisk {
    /// Constructor cycle with no lazy break: startup fails.
    BeanCreationException,
    /// Field/mixed cycle that can deadlock or half-initialize at runtime.
    RuntimeDeadlock,
    /// Lazy-broken constructor cycle: works, but every first touch pays.
    PerformanceDegradation,
    /// Lazy-broken field/mixed cycle: survives, stays hard to change.
    MaintenanceBurden,
}

/// Declared least-severe first so the derived ordering ranks `Critical`
/// greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CycleSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CycleRisk {
    pub fn severity(&self) -> CycleSeverity {
        match self {
            CycleRisk::BeanCreationException => CycleSeverity::Critical,
            CycleRisk::RuntimeDeadlock => CycleSeverity::High,
            CycleRisk::PerformanceDegradation => CycleSeverity::Medium,
            CycleRisk::MaintenanceBurden => CycleSeverity::Low,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StrategyKind {
    LazyInitialization,
    InterfaceSegregation,
    EventBasedDecoupling,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StrategyComplexity {
    Low,
    Medium,
    High,
}

/// One suggested way out of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStrategy {
    pub kind: StrategyKind,
    pub description: String,
    pub complexity: StrategyComplexity,
    /// The first strategy in a cycle's ranked list.
    pub is_primary: bool,
}

/// One detected dependency cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyCycle {
    /// Class path with the closure repeated: `[A, B, A]`. Rotated so
    /// the lexicographically smallest class leads. A self-cycle is
    /// `[A, A]`.
    pub cycle: Vec<String>,
    pub kind: CycleKind,
    pub risk: CycleRisk,
    pub severity: CycleSeverity,
    /// True when any participating edge is `@Lazy`.
    pub has_lazy_resolution: bool,
    /// Injection edges participating in this cycle, in path order.
    pub injection_points: Vec<InjectionPoint>,
    /// Ranked, the first entry is the primary suggestion.
    pub resolution_strategies: Vec<ResolutionStrategy>,
}

impl DependencyCycle {
    pub fn unique_class_count(&self) -> usize {
        self.cycle.len().saturating_sub(1)
    }

    pub fn is_self_cycle(&self) -> bool {
        self.unique_class_count() == 1
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.cycle.iter().any(|c| c == class_name)
    }

    pub fn primary_strategy(&self) -> Option<&ResolutionStrategy> {
        self.resolution_strategies.iter().find(|s| s.is_primary)
    }
}

/// Result of cycle detection over one injection-edge set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircularDependencyResult {
    pub successful: bool,
    pub error_message: Option<String>,
    /// Sorted lexicographically by path for stable output.
    pub cycles: Vec<DependencyCycle>,
    pub analyzed_edge_count: usize,
    pub analyzed_class_count: usize,
    pub duration_ms: u64,
}

impl CircularDependencyResult {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn cycles_of_kind(&self, kind: CycleKind) -> Vec<&DependencyCycle> {
        self.cycles.iter().filter(|c| c.kind == kind).collect()
    }

    pub fn critical_cycles(&self) -> Vec<&DependencyCycle> {
        self.cycles
            .iter()
            .filter(|c| c.severity == CycleSeverity::Critical)
            .collect()
    }

    pub fn cycles_containing(&self, class_name: &str) -> Vec<&DependencyCycle> {
        self.cycles.iter().filter(|c| c.contains(class_name)).collect()
    }
}
