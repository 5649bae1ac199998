//! Bean and configuration analysis: definitions, overrides, injection.

mod analyzer;
mod injection;
mod overrides;
mod types;

pub use analyzer::{component_stereotype, is_component, BeanAnalyzer, COMPONENT_STEREOTYPES};
pub use injection::build_injection_points;
pub use overrides::detect_overrides;
pub use types::{
    BeanAnalysisResult, BeanConflict, BeanDefinition, BeanOverride, BeanOverrideAnalysisResult,
    BeanScope, ConflictKind, ConflictSeverity, InjectionKind, InjectionPoint, OverrideKind,
    OverrideReason, CONDITIONAL_TAG,
};
