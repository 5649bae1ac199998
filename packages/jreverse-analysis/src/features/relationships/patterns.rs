//! Structural design-pattern detection.
//!
//! Each pattern has an independent shape heuristic over one class (plus
//! a model-wide implementation index for strategy detection). Signals
//! accumulate into a confidence score clamped to [0, 1]; matches below
//! `MIN_CONFIDENCE` are dropped.

use rustc_hash::FxHashMap;

use super::types::{DesignPattern, DetectedPattern};
use crate::shared::java::{is_analyzable_type, simple_name, strip_generics};
use crate::shared::models::{ClassFact, ProgramModel};

/// Matches below this confidence are not reported.
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Detect pattern instances across the whole model.
pub fn detect_patterns(model: &ProgramModel) -> Vec<DetectedPattern> {
    // interface fqn -> implementor count, for strategy detection
    let mut implementor_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for class in model.classes() {
        for iface in &class.interfaces {
            *implementor_counts.entry(iface.as_str()).or_default() += 1;
        }
    }

    let mut found = Vec::new();
    for class in model.classes() {
        let candidates = [
            detect_singleton(class),
            detect_factory(class),
            detect_builder(class),
            detect_strategy(class, &implementor_counts),
            detect_observer(class),
            detect_repository(class),
        ];
        for candidate in candidates.into_iter().flatten() {
            if candidate.confidence >= MIN_CONFIDENCE {
                found.push(candidate);
            }
        }
    }
    found
}

fn detect_singleton(class: &ClassFact) -> Option<DetectedPattern> {
    if class.is_interface() {
        return None;
    }
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    let ctor_count = class.constructors().count();
    if ctor_count > 0 && class.constructors().all(|c| c.is_private) {
        confidence += 0.35;
        evidence.push("All constructors are private".to_string());
    }

    if class
        .fields
        .iter()
        .any(|f| f.is_static && strip_generics(&f.field_type) == class.fqn)
    {
        confidence += 0.3;
        evidence.push("Static field of the owning type".to_string());
    }

    if class
        .declared_methods()
        .any(|m| m.is_static && strip_generics(&m.return_type) == class.fqn)
    {
        confidence += 0.25;
        evidence.push("Static accessor returning the owning type".to_string());
    }

    if class.simple_name().to_lowercase().contains("singleton") {
        confidence += 0.1;
        evidence.push("Class name mentions singleton".to_string());
    }

    finish(DesignPattern::Singleton, class, confidence, evidence)
}

fn detect_factory(class: &ClassFact) -> Option<DetectedPattern> {
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    if class.simple_name().ends_with("Factory") {
        confidence += 0.4;
        evidence.push("Class name ends with Factory".to_string());
    }

    let creation_methods = class
        .declared_methods()
        .filter(|m| {
            (m.name.starts_with("create")
                || m.name.starts_with("newInstance")
                || m.name.starts_with("of"))
                && is_analyzable_type(&m.return_type)
        })
        .count();
    if creation_methods > 0 {
        confidence += 0.3;
        evidence.push(format!(
            "{creation_methods} creation method(s) returning application types"
        ));
    }

    if class
        .declared_methods()
        .any(|m| m.is_static && is_analyzable_type(&m.return_type))
    {
        confidence += 0.2;
        evidence.push("Static method producing an application type".to_string());
    }

    finish(DesignPattern::Factory, class, confidence, evidence)
}

fn detect_builder(class: &ClassFact) -> Option<DetectedPattern> {
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    if class.simple_name().ends_with("Builder") {
        confidence += 0.4;
        evidence.push("Class name ends with Builder".to_string());
    }

    if class.declared_methods().any(|m| m.name == "build") {
        confidence += 0.3;
        evidence.push("Has a build() method".to_string());
    }

    let chainable = class
        .declared_methods()
        .filter(|m| strip_generics(&m.return_type) == class.fqn)
        .count();
    if chainable >= 2 {
        confidence += 0.3;
        evidence.push(format!("{chainable} chainable methods returning the builder"));
    }

    finish(DesignPattern::Builder, class, confidence, evidence)
}

fn detect_strategy(
    class: &ClassFact,
    implementor_counts: &FxHashMap<&str, usize>,
) -> Option<DetectedPattern> {
    if !class.is_interface() {
        return None;
    }
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    let name = class.simple_name();
    if name.ends_with("Strategy") || name.ends_with("Policy") || name.ends_with("Handler") {
        confidence += 0.4;
        evidence.push("Interface name signals an interchangeable behavior".to_string());
    }

    if class.declared_methods().count() == 1 {
        confidence += 0.3;
        evidence.push("Single-method interface".to_string());
    }

    let implementors = implementor_counts.get(class.fqn.as_str()).copied().unwrap_or(0);
    if implementors >= 2 {
        confidence += 0.3;
        evidence.push(format!("{implementors} implementations in the archive"));
    }

    finish(DesignPattern::Strategy, class, confidence, evidence)
}

fn detect_observer(class: &ClassFact) -> Option<DetectedPattern> {
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    let name = class.simple_name();
    if name.ends_with("Listener") || name.ends_with("Observer") {
        confidence += 0.4;
        evidence.push("Class name ends with Listener/Observer".to_string());
    }

    if class
        .declared_methods()
        .any(|m| m.name.starts_with("add") && m.name.ends_with("Listener"))
    {
        confidence += 0.3;
        evidence.push("Registers listeners (add*Listener)".to_string());
    }

    if class
        .declared_methods()
        .any(|m| m.name.starts_with("notify") || m.name.starts_with("fire"))
    {
        confidence += 0.3;
        evidence.push("Publishes events (notify*/fire*)".to_string());
    }

    if class
        .declared_methods()
        .filter(|m| m.name.starts_with("on") && m.name.len() > 2)
        .count()
        >= 2
    {
        confidence += 0.2;
        evidence.push("Multiple on* callback methods".to_string());
    }

    finish(DesignPattern::Observer, class, confidence, evidence)
}

fn detect_repository(class: &ClassFact) -> Option<DetectedPattern> {
    let mut confidence: f64 = 0.0;
    let mut evidence = Vec::new();

    if class.has_annotation("Repository") {
        confidence += 0.5;
        evidence.push("Annotated @Repository".to_string());
    }

    let name = class.simple_name();
    if name.ends_with("Repository") || name.ends_with("Dao") {
        confidence += 0.4;
        evidence.push("Class name ends with Repository/Dao".to_string());
    }

    let data_access_methods = class
        .declared_methods()
        .filter(|m| {
            m.name.starts_with("findBy")
                || m.name.starts_with("find")
                || m.name.starts_with("save")
                || m.name.starts_with("delete")
                || m.name.starts_with("count")
        })
        .count();
    if data_access_methods >= 2 {
        confidence += 0.3;
        evidence.push(format!("{data_access_methods} data-access style methods"));
    }

    finish(DesignPattern::Repository, class, confidence, evidence)
}

fn finish(
    pattern: DesignPattern,
    class: &ClassFact,
    confidence: f64,
    evidence: Vec<String>,
) -> Option<DetectedPattern> {
    if confidence <= 0.0 {
        return None;
    }
    let mut detected = DetectedPattern::new(pattern, &class.fqn, confidence);
    detected.evidence = evidence;
    Some(detected)
}
