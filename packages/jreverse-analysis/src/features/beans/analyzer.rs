//! Bean and configuration analysis.
//!
//! ## Algorithm
//!
//! 1. Walk every class fact and extract [`BeanDefinition`]s: one per
//!    `@Bean` factory method declared in a configuration class, one per
//!    component-stereotyped class.
//! 2. Build the dependency-injection graph from constructor, field,
//!    setter and method injection sites (see [`super::injection`]).
//!
//! Extraction is soft-failing: a malformed class fact is skipped with a
//! warning and the remaining classes still produce a result. Conditions
//! (`@ConditionalOn*`) are recorded as tags, never evaluated.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, warn};

use crate::shared::java::{lower_camel_case, strip_generics};
use crate::shared::models::{AnnotationFact, ClassFact, MethodFact, ProgramModel};

use super::injection::build_injection_points;
use super::overrides;
use super::types::{
    BeanAnalysisResult, BeanDefinition, BeanOverrideAnalysisResult, BeanScope, CONDITIONAL_TAG,
};

/// Component stereotype annotations, checked in this order.
pub const COMPONENT_STEREOTYPES: &[&str] = &[
    "Component",
    "Service",
    "Repository",
    "Controller",
    "RestController",
    "Configuration",
    "TestConfiguration",
    "SpringBootApplication",
];

/// Classes whose `@Bean` methods the container honors.
const CONFIGURATION_STEREOTYPES: &[&str] =
    &["Configuration", "TestConfiguration", "SpringBootApplication"];

/// First component stereotype present on `class`, if any.
pub fn component_stereotype(class: &ClassFact) -> Option<&AnnotationFact> {
    COMPONENT_STEREOTYPES
        .iter()
        .find_map(|name| class.annotation(name))
}

pub fn is_component(class: &ClassFact) -> bool {
    component_stereotype(class).is_some()
}

fn is_configuration_class(class: &ClassFact) -> bool {
    CONFIGURATION_STEREOTYPES
        .iter()
        .any(|name| class.has_annotation(name))
}

/// Extracts bean definitions and injection points from a program model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeanAnalyzer;

impl BeanAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Extract every bean definition plus the injection graph.
    ///
    /// Beans come out in declaration order (class order, then member
    /// order within a class); override resolution relies on it.
    pub fn analyze(&self, model: &ProgramModel) -> BeanAnalysisResult {
        let started = Instant::now();
        let mut beans = Vec::new();
        let mut skipped = 0usize;

        for class in model.classes() {
            if class.fqn.trim().is_empty() {
                warn!("skipping class fact with empty fully-qualified name");
                skipped += 1;
                continue;
            }
            extract_class_beans(class, &mut beans);
        }

        let injection_points = build_injection_points(model);
        debug!(
            beans = beans.len(),
            injection_points = injection_points.len(),
            "bean extraction complete"
        );

        BeanAnalysisResult {
            successful: true,
            error_message: None,
            beans,
            injection_points,
            skipped_class_count: skipped,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Resolve name and type override groups over an extracted bean
    /// list. See [`overrides::detect_overrides`].
    pub fn detect_overrides(&self, beans: &[BeanDefinition]) -> BeanOverrideAnalysisResult {
        overrides::detect_overrides(beans)
    }
}

fn extract_class_beans(class: &ClassFact, beans: &mut Vec<BeanDefinition>) {
    if let Some(stereotype) = component_stereotype(class) {
        beans.push(component_bean(class, stereotype));
    }
    if is_configuration_class(class) {
        for method in class.declared_methods() {
            if let Some(bean_ann) = method.annotation("Bean") {
                beans.push(factory_bean(class, method, bean_ann));
            }
        }
    }
}

/// A component-stereotyped class is itself a bean: named explicitly via
/// the stereotype value, or by lower-camel-casing its simple name.
fn component_bean(class: &ClassFact, stereotype: &AnnotationFact) -> BeanDefinition {
    let bean_name = stereotype
        .explicit_name()
        .map(str::to_string)
        .unwrap_or_else(|| lower_camel_case(class.simple_name()));
    BeanDefinition {
        bean_name,
        bean_class: class.fqn.clone(),
        declaring_class: class.fqn.clone(),
        factory_method: None,
        scope: scope_of(class.annotation("Scope")),
        is_primary: class.has_annotation("Primary"),
        is_lazy: class.has_annotation("Lazy"),
        qualifiers: qualifiers_of(&class.annotations),
        profiles: profiles_of(&class.annotations),
        init_method: lifecycle_method(class, "PostConstruct"),
        destroy_method: lifecycle_method(class, "PreDestroy"),
        dependency_tags: conditional_tags(&class.annotations),
    }
}

/// A `@Bean` factory method defines a bean of its return type, named by
/// the annotation's explicit name or the method name.
fn factory_bean(
    class: &ClassFact,
    method: &MethodFact,
    bean_ann: &AnnotationFact,
) -> BeanDefinition {
    let bean_name = explicit_bean_name(bean_ann).unwrap_or_else(|| method.name.clone());
    BeanDefinition {
        bean_name,
        bean_class: strip_generics(&method.return_type).to_string(),
        declaring_class: class.fqn.clone(),
        factory_method: Some(method.name.clone()),
        scope: scope_of(method.annotation("Scope")),
        is_primary: method.has_annotation("Primary"),
        is_lazy: method.has_annotation("Lazy"),
        qualifiers: qualifiers_of(&method.annotations),
        profiles: profiles_of(&method.annotations),
        init_method: non_empty_attr(bean_ann, "initMethod"),
        destroy_method: non_empty_attr(bean_ann, "destroyMethod"),
        dependency_tags: conditional_tags(&method.annotations),
    }
}

fn explicit_bean_name(bean_ann: &AnnotationFact) -> Option<String> {
    if let Some(name) = bean_ann.explicit_name() {
        return Some(name.to_string());
    }
    // Alias arrays name the bean by their first entry
    bean_ann
        .list_attr("value")
        .into_iter()
        .chain(bean_ann.list_attr("name"))
        .find(|name| !name.is_empty())
}

fn scope_of(scope_ann: Option<&AnnotationFact>) -> BeanScope {
    scope_ann
        .and_then(|a| a.string_attr("value").or_else(|| a.string_attr("scopeName")))
        .map(BeanScope::parse)
        .unwrap_or_default()
}

fn qualifiers_of(annotations: &[AnnotationFact]) -> Vec<String> {
    annotations
        .iter()
        .filter(|a| a.matches("Qualifier") || a.matches("Named"))
        .filter_map(AnnotationFact::explicit_name)
        .map(str::to_string)
        .collect()
}

fn profiles_of(annotations: &[AnnotationFact]) -> Vec<String> {
    annotations
        .iter()
        .filter(|a| a.matches("Profile"))
        .flat_map(|a| a.list_attr("value"))
        .collect()
}

fn conditional_tags(annotations: &[AnnotationFact]) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    if annotations
        .iter()
        .any(|a| a.simple_name().starts_with("Conditional"))
    {
        tags.insert(CONDITIONAL_TAG.to_string());
    }
    tags
}

fn lifecycle_method(class: &ClassFact, annotation: &str) -> Option<String> {
    class
        .declared_methods()
        .find(|m| m.has_annotation(annotation))
        .map(|m| m.name.clone())
}

fn non_empty_attr(ann: &AnnotationFact, key: &str) -> Option<String> {
    ann.string_attr(key)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
