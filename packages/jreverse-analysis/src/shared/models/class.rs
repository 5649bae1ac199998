//! Class facts: the per-class snapshot every analyzer consumes.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::annotation::AnnotationFact;
use crate::shared::java::{package_of, simple_name};

/// Kind of type declaration behind a classfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    pub fn is_interface(&self) -> bool {
        matches!(self, ClassKind::Interface)
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFact {
    pub name: String,
    /// Declared type, fully qualified where the loader could resolve it,
    /// generics preserved (`java.util.List<com.acme.Order>`).
    pub field_type: String,
    pub is_static: bool,
    pub is_final: bool,
    pub annotations: Vec<AnnotationFact>,
}

impl FieldFact {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationFact) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationFact> {
        self.annotations.iter().find(|a| a.matches(name))
    }
}

/// One formal parameter of a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterFact {
    pub name: String,
    pub param_type: String,
    pub annotations: Vec<AnnotationFact>,
}

impl ParameterFact {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationFact) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationFact> {
        self.annotations.iter().find(|a| a.matches(name))
    }
}

/// One declared method. Constructors carry the classfile name `<init>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodFact {
    pub name: String,
    /// `void` when the method returns nothing.
    pub return_type: String,
    pub parameters: Vec<ParameterFact>,
    /// Declared thrown exception types.
    pub exceptions: Vec<String>,
    pub is_static: bool,
    pub is_public: bool,
    pub is_private: bool,
    pub is_abstract: bool,
    pub annotations: Vec<AnnotationFact>,
}

impl MethodFact {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            exceptions: Vec::new(),
            is_static: false,
            is_public: true,
            is_private: false,
            is_abstract: false,
            annotations: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        Self::new("<init>", "void")
    }

    pub fn with_parameter(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        self.parameters.push(ParameterFact::new(name, param_type));
        self
    }

    pub fn with_param_fact(mut self, parameter: ParameterFact) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_exception(mut self, exception_type: impl Into<String>) -> Self {
        self.exceptions.push(exception_type.into());
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationFact) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_visibility(mut self, is_public: bool, is_private: bool) -> Self {
        self.is_public = is_public;
        self.is_private = is_private;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }

    /// JavaBeans-style setter: `setX(one parameter)`.
    pub fn is_setter(&self) -> bool {
        self.name.len() > 3
            && self.name.starts_with("set")
            && self.parameters.len() == 1
            && self.name[3..].starts_with(|c: char| c.is_uppercase())
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationFact> {
        self.annotations.iter().find(|a| a.matches(name))
    }
}

/// Immutable snapshot of one analyzed class.
///
/// Identity is the fully-qualified name: two facts with equal `fqn`
/// compare equal regardless of body, mirroring how a classloader keys
/// types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassFact {
    /// Fully-qualified name, `com.acme.order.OrderService`.
    pub fqn: String,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub is_final: bool,
    /// `None` for `java.lang.Object` itself and for interfaces.
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub annotations: Vec<AnnotationFact>,
    pub fields: Vec<FieldFact>,
    pub methods: Vec<MethodFact>,
}

impl ClassFact {
    pub fn new(fqn: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            is_abstract: false,
            is_final: false,
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class(fqn: impl Into<String>) -> Self {
        Self::new(fqn, ClassKind::Class)
    }

    pub fn interface(fqn: impl Into<String>) -> Self {
        Self::new(fqn, ClassKind::Interface)
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationFact) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_field(mut self, field: FieldFact) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodFact) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.fqn)
    }

    pub fn package_name(&self) -> &str {
        package_of(&self.fqn)
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationFact> {
        self.annotations.iter().find(|a| a.matches(name))
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodFact> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    /// Non-constructor declared methods.
    pub fn declared_methods(&self) -> impl Iterator<Item = &MethodFact> {
        self.methods.iter().filter(|m| !m.is_constructor())
    }

    pub fn method(&self, name: &str) -> Option<&MethodFact> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Does a JavaBeans setter for `field_name` exist on this class?
    pub fn has_setter_for(&self, field_name: &str) -> bool {
        let mut chars = field_name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let mut setter = String::from("set");
        setter.extend(first.to_uppercase());
        setter.push_str(chars.as_str());
        self.methods.iter().any(|m| m.is_setter() && m.name == setter)
    }
}

impl PartialEq for ClassFact {
    fn eq(&self, other: &Self) -> bool {
        self.fqn == other.fqn
    }
}

impl Eq for ClassFact {}

impl Hash for ClassFact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fqn.hash(state);
    }
}
