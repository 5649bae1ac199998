//! Layer classification: annotation, naming and package heuristics.
//!
//! First match wins, in this order: stereotype annotation, class-name
//! suffix, last package segment, package substring. Classes matching
//! nothing default to the infrastructure layer without counting as a
//! layer indicator.

use once_cell::sync::Lazy;

use super::types::LayerType;
use crate::shared::models::ClassFact;

/// Stereotype annotation (simple name) to layer.
static ANNOTATION_LAYERS: Lazy<Vec<(&'static str, LayerType)>> = Lazy::new(|| {
    vec![
        ("RestController", LayerType::Presentation),
        ("Controller", LayerType::Presentation),
        ("ControllerAdvice", LayerType::Presentation),
        ("RestControllerAdvice", LayerType::Presentation),
        ("Service", LayerType::Business),
        ("Entity", LayerType::Domain),
        ("MappedSuperclass", LayerType::Domain),
        ("Embeddable", LayerType::Domain),
        ("Document", LayerType::Domain),
        ("Repository", LayerType::Persistence),
        ("Configuration", LayerType::Infrastructure),
        ("Component", LayerType::Infrastructure),
    ]
});

/// Class-name suffix to layer. Longer suffixes listed first so the
/// most specific match wins.
static NAME_SUFFIX_LAYERS: Lazy<Vec<(&'static str, LayerType)>> = Lazy::new(|| {
    vec![
        ("Controller", LayerType::Presentation),
        ("Resource", LayerType::Presentation),
        ("Endpoint", LayerType::Presentation),
        ("ServiceImpl", LayerType::Business),
        ("Service", LayerType::Business),
        ("Manager", LayerType::Business),
        ("UseCase", LayerType::Business),
        ("Facade", LayerType::Business),
        ("Repository", LayerType::Persistence),
        ("Dao", LayerType::Persistence),
        ("Entity", LayerType::Domain),
        ("Dto", LayerType::Domain),
        ("Configuration", LayerType::Infrastructure),
        ("Config", LayerType::Infrastructure),
        ("Interceptor", LayerType::Infrastructure),
        ("Filter", LayerType::Infrastructure),
        ("Utils", LayerType::Infrastructure),
        ("Util", LayerType::Infrastructure),
        ("Helper", LayerType::Infrastructure),
    ]
});

/// Package segment to layer, matched against the last segment exactly
/// and against the whole package path as a substring fallback.
static PACKAGE_SEGMENT_LAYERS: Lazy<Vec<(&'static str, LayerType)>> = Lazy::new(|| {
    vec![
        ("controller", LayerType::Presentation),
        ("controllers", LayerType::Presentation),
        ("web", LayerType::Presentation),
        ("rest", LayerType::Presentation),
        ("api", LayerType::Presentation),
        ("ui", LayerType::Presentation),
        ("view", LayerType::Presentation),
        ("service", LayerType::Business),
        ("services", LayerType::Business),
        ("business", LayerType::Business),
        ("logic", LayerType::Business),
        ("usecase", LayerType::Business),
        ("application", LayerType::Business),
        ("domain", LayerType::Domain),
        ("model", LayerType::Domain),
        ("entity", LayerType::Domain),
        ("entities", LayerType::Domain),
        ("dto", LayerType::Domain),
        ("repository", LayerType::Persistence),
        ("repositories", LayerType::Persistence),
        ("dao", LayerType::Persistence),
        ("persistence", LayerType::Persistence),
        ("data", LayerType::Persistence),
        ("jpa", LayerType::Persistence),
        ("config", LayerType::Infrastructure),
        ("configuration", LayerType::Infrastructure),
        ("infra", LayerType::Infrastructure),
        ("infrastructure", LayerType::Infrastructure),
        ("util", LayerType::Infrastructure),
        ("utils", LayerType::Infrastructure),
        ("common", LayerType::Infrastructure),
        ("security", LayerType::Infrastructure),
    ]
});

/// Layer indicated by the class's structure, `None` when only the
/// infrastructure default would apply. The distinction feeds
/// `can_analyze`, which requires real indicators.
pub fn layer_indicator(class: &ClassFact) -> Option<LayerType> {
    for (annotation, layer) in ANNOTATION_LAYERS.iter() {
        if class.has_annotation(annotation) {
            return Some(*layer);
        }
    }

    let simple = class.simple_name();
    for (suffix, layer) in NAME_SUFFIX_LAYERS.iter() {
        if simple.ends_with(suffix) && simple.len() > suffix.len() {
            return Some(*layer);
        }
    }

    let package = class.package_name();
    if !package.is_empty() {
        let last_segment = package.rsplit('.').next().unwrap_or("");
        for (segment, layer) in PACKAGE_SEGMENT_LAYERS.iter() {
            if last_segment == *segment {
                return Some(*layer);
            }
        }
        // Loose fallback, coarse on purpose: any segment starting with
        // a keyword counts, so "com.x.webapp" still reads as
        // presentation. Prefix matching keeps "guide" from hitting "ui".
        for (segment, layer) in PACKAGE_SEGMENT_LAYERS.iter() {
            if package.split('.').any(|part| part.starts_with(segment)) {
                return Some(*layer);
            }
        }
    }

    None
}

/// Exactly one layer per class; falls back to infrastructure.
pub fn classify(class: &ClassFact) -> LayerType {
    layer_indicator(class).unwrap_or(LayerType::Infrastructure)
}
