//! Shared program model (single source of truth for all analyzers)

mod annotation;
mod class;
mod program;

pub use annotation::{AnnotationFact, AnnotationValue};
pub use class::{ClassFact, ClassKind, FieldFact, MethodFact, ParameterFact};
pub use program::{ProgramModel, ProgramModelBuilder};
