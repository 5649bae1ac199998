//! Annotation facts recorded by the classfile loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::java::simple_name;

/// One attribute value inside an annotation's attribute map.
///
/// Classfile annotation members are limited to a handful of shapes that
/// matter for architectural analysis: strings (`@Scope("prototype")`),
/// numbers (`@Scheduled(fixedRate = 5000)`), booleans
/// (`@Autowired(required = false)`) and string arrays
/// (`@Profile({"dev", "test"})`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    StrList(Vec<String>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnnotationValue::Int(n) => Some(*n),
            // @Scheduled attributes are often recorded as their string form
            AnnotationValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// View the value as a string list. A plain string yields a
    /// one-element list; non-string values yield an empty list.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            AnnotationValue::Str(s) => vec![s.clone()],
            AnnotationValue::StrList(items) => items.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::Str(s.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::Str(s)
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Bool(b)
    }
}

impl From<i64> for AnnotationValue {
    fn from(n: i64) -> Self {
        AnnotationValue::Int(n)
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(items: Vec<String>) -> Self {
        AnnotationValue::StrList(items)
    }
}

/// One annotation occurrence on a class, field, method or parameter.
///
/// The loader may record the type name fully qualified
/// (`org.springframework.stereotype.Service`) or simple (`Service`);
/// matching always compares simple names so both forms behave the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFact {
    /// Annotation type name as recorded by the loader.
    pub type_name: String,
    /// String-keyed attribute map (`value`, `name`, `initMethod`, ...).
    pub attributes: BTreeMap<String, AnnotationValue>,
}

impl AnnotationFact {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Simple (unqualified) annotation type name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    /// Does this annotation match `name`? Compares simple names, so
    /// `matches("Service")` hits both `Service` and
    /// `org.springframework.stereotype.Service`.
    pub fn matches(&self, name: &str) -> bool {
        self.simple_name() == simple_name(name)
    }

    pub fn string_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(AnnotationValue::as_str)
    }

    pub fn bool_attr(&self, key: &str) -> Option<bool> {
        self.attributes.get(key).and_then(AnnotationValue::as_bool)
    }

    pub fn int_attr(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(AnnotationValue::as_int)
    }

    pub fn list_attr(&self, key: &str) -> Vec<String> {
        self.attributes
            .get(key)
            .map(AnnotationValue::as_list)
            .unwrap_or_default()
    }

    /// First non-empty of the `value` / `name` attributes, the common
    /// "explicit name" convention across Spring annotations.
    pub fn explicit_name(&self) -> Option<&str> {
        self.string_attr("value")
            .or_else(|| self.string_attr("name"))
            .filter(|s| !s.is_empty())
    }
}
