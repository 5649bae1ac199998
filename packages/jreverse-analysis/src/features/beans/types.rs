//! Bean-definition, override/conflict and injection value objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Synthetic dependency tag recorded for conditional beans. Conditions
/// are recorded, never evaluated.
pub const CONDITIONAL_TAG: &str = "CONDITIONAL";

/// Bean scope as declared via `@Scope`; singleton when absent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BeanScope {
    #[default]
    Singleton,
    Prototype,
    Request,
    Session,
    Application,
}

impl BeanScope {
    /// Parse a `@Scope` attribute value; unknown scope names fall back
    /// to singleton.
    pub fn parse(raw: &str) -> BeanScope {
        match raw.to_ascii_lowercase().as_str() {
            "prototype" => BeanScope::Prototype,
            "request" => BeanScope::Request,
            "session" => BeanScope::Session,
            "application" => BeanScope::Application,
            _ => BeanScope::Singleton,
        }
    }
}

/// One discovered bean: a `@Bean` factory method or a component class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanDefinition {
    pub bean_name: String,
    /// Type the container will instantiate (factory return type, or the
    /// component class itself).
    pub bean_class: String,
    pub declaring_class: String,
    /// `Some` for `@Bean` methods, `None` for component classes.
    pub factory_method: Option<String>,
    pub scope: BeanScope,
    pub is_primary: bool,
    pub is_lazy: bool,
    pub qualifiers: Vec<String>,
    pub profiles: Vec<String>,
    pub init_method: Option<String>,
    pub destroy_method: Option<String>,
    /// Synthetic tags such as [`CONDITIONAL_TAG`].
    pub dependency_tags: BTreeSet<String>,
}

impl BeanDefinition {
    pub fn is_conditional(&self) -> bool {
        self.dependency_tags.contains(CONDITIONAL_TAG)
    }
}

/// What keyed an override group together.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OverrideKind {
    Name,
    Type,
}

/// How the winning definition was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverrideReason {
    PrimaryAnnotation,
    DeclarationOrder,
}

/// A resolved multi-definition group: one winner, the rest lose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanOverride {
    pub kind: OverrideKind,
    /// Shared bean name (NAME groups) or bean class (TYPE groups).
    pub key: String,
    pub winner: BeanDefinition,
    pub losers: Vec<BeanDefinition>,
    pub reason: OverrideReason,
    /// True when resolution fell back to declaration order, the
    /// implicit case a `@Primary` would have made explicit.
    pub is_potential_problem: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ConflictKind {
    MultiplePrimary,
    DuplicateQualifier,
    ScopeMismatch,
}

/// Declared least-severe first so the derived ordering ranks `High`
/// greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl ConflictKind {
    /// Severity is fixed per conflict kind.
    pub fn severity(&self) -> ConflictSeverity {
        match self {
            ConflictKind::MultiplePrimary => ConflictSeverity::High,
            ConflictKind::ScopeMismatch => ConflictSeverity::Medium,
            ConflictKind::DuplicateQualifier => ConflictSeverity::Low,
        }
    }
}

/// An ambiguous or structurally invalid multi-definition situation
/// with no clean winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanConflict {
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub bean_names: Vec<String>,
    pub description: String,
}

/// How a dependency is injected at one site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum InjectionKind {
    Constructor,
    Field,
    Setter,
    Method,
}

/// One directed injection edge; the DI graph cycle detection runs on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InjectionPoint {
    pub source_class: String,
    pub target_class: String,
    pub kind: InjectionKind,
    /// Field name, setter/method name, or `<init>` for constructors.
    pub member: String,
    pub is_required: bool,
    pub is_lazy: bool,
    pub qualifier: Option<String>,
}

impl InjectionPoint {
    pub fn new(
        source_class: impl Into<String>,
        target_class: impl Into<String>,
        kind: InjectionKind,
        member: impl Into<String>,
    ) -> Self {
        Self {
            source_class: source_class.into(),
            target_class: target_class.into(),
            kind,
            member: member.into(),
            is_required: true,
            is_lazy: false,
            qualifier: None,
        }
    }

    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn with_lazy(mut self, is_lazy: bool) -> Self {
        self.is_lazy = is_lazy;
        self
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

/// Result of bean extraction over one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanAnalysisResult {
    pub successful: bool,
    pub error_message: Option<String>,
    /// Beans in declaration order (class order, then member order);
    /// override resolution depends on this order.
    pub beans: Vec<BeanDefinition>,
    pub injection_points: Vec<InjectionPoint>,
    pub skipped_class_count: usize,
    pub duration_ms: u64,
}

impl BeanAnalysisResult {
    pub fn bean_named(&self, name: &str) -> Option<&BeanDefinition> {
        self.beans.iter().find(|b| b.bean_name == name)
    }

    pub fn beans_of_class(&self, bean_class: &str) -> Vec<&BeanDefinition> {
        self.beans.iter().filter(|b| b.bean_class == bean_class).collect()
    }
}

/// Result of override/conflict detection over a bean-definition list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeanOverrideAnalysisResult {
    pub overrides: Vec<BeanOverride>,
    pub conflicts: Vec<BeanConflict>,
}

impl BeanOverrideAnalysisResult {
    pub fn overrides_of_kind(&self, kind: OverrideKind) -> Vec<&BeanOverride> {
        self.overrides.iter().filter(|o| o.kind == kind).collect()
    }

    pub fn conflicts_of_kind(&self, kind: ConflictKind) -> Vec<&BeanConflict> {
        self.conflicts.iter().filter(|c| c.kind == kind).collect()
    }
}
