//! Injection-site extraction: the directed edges cycle detection runs on.
//!
//! Four site kinds are recognized: constructor parameters (the
//! `@Autowired` constructor, or the single constructor of a component
//! class), annotated fields, `@Autowired` setters, and other
//! `@Autowired` config methods. Targets must resolve to classes inside
//! the model; JDK and primitive parameters never produce edges.

use crate::shared::java::{
    collection_element_type, is_analyzable_type, is_collection_type, strip_generics,
};
use crate::shared::models::{AnnotationFact, ClassFact, MethodFact, ParameterFact, ProgramModel};

use super::analyzer::is_component;
use super::types::{InjectionKind, InjectionPoint};

/// Annotations marking a field as container-injected.
const FIELD_INJECTION_ANNOTATIONS: &[&str] = &["Autowired", "Inject", "Resource"];

/// Collect every injection point in the model, in model order
/// (constructor, then fields, then methods per class).
pub fn build_injection_points(model: &ProgramModel) -> Vec<InjectionPoint> {
    let mut points = Vec::new();
    for class in model.classes() {
        if class.fqn.trim().is_empty() {
            continue;
        }
        collect_constructor_points(model, class, &mut points);
        collect_field_points(model, class, &mut points);
        collect_method_points(model, class, &mut points);
    }
    points
}

fn collect_constructor_points(
    model: &ProgramModel,
    class: &ClassFact,
    points: &mut Vec<InjectionPoint>,
) {
    let Some(ctor) = injection_constructor(class) else {
        return;
    };
    let ctor_lazy = ctor.has_annotation("Lazy");
    let ctor_required = ctor
        .annotation("Autowired")
        .and_then(|a| a.bool_attr("required"))
        .unwrap_or(true);
    for param in &ctor.parameters {
        let Some(target) = injection_target(model, &param.param_type) else {
            continue;
        };
        points.push(InjectionPoint {
            source_class: class.fqn.clone(),
            target_class: target,
            kind: InjectionKind::Constructor,
            member: ctor.name.clone(),
            is_required: ctor_required,
            is_lazy: ctor_lazy || param.annotation("Lazy").is_some(),
            qualifier: param_qualifier(param),
        });
    }
}

/// The container's constructor choice: an explicitly annotated
/// constructor anywhere, else the single constructor of a component
/// class. Ambiguous multi-constructor classes need the annotation.
fn injection_constructor(class: &ClassFact) -> Option<&MethodFact> {
    let annotated = class
        .constructors()
        .find(|c| c.has_annotation("Autowired") || c.has_annotation("Inject"));
    if annotated.is_some() {
        return annotated;
    }
    if !is_component(class) {
        return None;
    }
    let mut ctors = class.constructors();
    let single = ctors.next()?;
    if ctors.next().is_some() {
        return None;
    }
    (!single.parameters.is_empty()).then_some(single)
}

fn collect_field_points(model: &ProgramModel, class: &ClassFact, points: &mut Vec<InjectionPoint>) {
    for field in &class.fields {
        let Some(marker) = FIELD_INJECTION_ANNOTATIONS
            .iter()
            .find_map(|name| field.annotation(name))
        else {
            continue;
        };
        let Some(target) = injection_target(model, &field.field_type) else {
            continue;
        };
        let qualifier = field
            .annotation("Qualifier")
            .or_else(|| field.annotation("Named"))
            .and_then(|a| a.explicit_name())
            .map(str::to_string)
            .or_else(|| resource_name(marker));
        points.push(InjectionPoint {
            source_class: class.fqn.clone(),
            target_class: target,
            kind: InjectionKind::Field,
            member: field.name.clone(),
            is_required: marker.bool_attr("required").unwrap_or(true),
            is_lazy: field.has_annotation("Lazy"),
            qualifier,
        });
    }
}

fn collect_method_points(
    model: &ProgramModel,
    class: &ClassFact,
    points: &mut Vec<InjectionPoint>,
) {
    for method in class.declared_methods() {
        if !(method.has_annotation("Autowired") || method.has_annotation("Inject")) {
            continue;
        }
        let kind = if method.is_setter() {
            InjectionKind::Setter
        } else {
            InjectionKind::Method
        };
        let required = method
            .annotation("Autowired")
            .and_then(|a| a.bool_attr("required"))
            .unwrap_or(true);
        let method_lazy = method.has_annotation("Lazy");
        for param in &method.parameters {
            let Some(target) = injection_target(model, &param.param_type) else {
                continue;
            };
            points.push(InjectionPoint {
                source_class: class.fqn.clone(),
                target_class: target,
                kind,
                member: method.name.clone(),
                is_required: required,
                is_lazy: method_lazy || param.annotation("Lazy").is_some(),
                qualifier: param_qualifier(param),
            });
        }
    }
}

/// Resolve a declared type to an in-model target class. Collections
/// inject their element type (`List<Gateway>` targets `Gateway`).
fn injection_target(model: &ProgramModel, declared_type: &str) -> Option<String> {
    let candidate = if is_collection_type(declared_type) {
        collection_element_type(declared_type)?
    } else {
        declared_type.to_string()
    };
    let base = strip_generics(&candidate).trim_end_matches("[]");
    if !is_analyzable_type(base) {
        return None;
    }
    model.contains(base).then(|| base.to_string())
}

fn param_qualifier(param: &ParameterFact) -> Option<String> {
    param
        .annotation("Qualifier")
        .or_else(|| param.annotation("Named"))
        .and_then(|a| a.explicit_name())
        .map(str::to_string)
}

fn resource_name(marker: &AnnotationFact) -> Option<String> {
    if !marker.matches("Resource") {
        return None;
    }
    marker
        .string_attr("name")
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
