//! Entrypoint reconstruction: where execution enters the application.
//!
//! ## Algorithm
//!
//! 1. REST endpoints from `@RestController`/`@Controller` classes: a
//!    class-level `@RequestMapping` contributes the base path, each
//!    mapping annotation on a handler method contributes the rest.
//! 2. Scheduled tasks from `@Scheduled` methods anywhere in the model.
//! 3. Async methods from `@Async`.
//! 4. The main class from the archive manifest, falling back to a scan
//!    for `@SpringBootApplication`.
//!
//! Soft-failing like the other fact extractors: malformed classes are
//! skipped with a warning, an empty model yields an empty result.

use std::time::Instant;

use tracing::{debug, warn};

use crate::shared::models::{AnnotationFact, ClassFact, MethodFact, ProgramModel};

use super::types::{
    AsyncMethod, EntrypointAnalysisResult, HttpMethod, RestEndpoint, ScheduledTask,
};

/// Shortcut mapping annotations and the verb each one binds.
const SHORTCUT_MAPPINGS: &[(&str, HttpMethod)] = &[
    ("GetMapping", HttpMethod::Get),
    ("PostMapping", HttpMethod::Post),
    ("PutMapping", HttpMethod::Put),
    ("DeleteMapping", HttpMethod::Delete),
    ("PatchMapping", HttpMethod::Patch),
];

/// Reconstructs externally-triggered entrypoints from a program model.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntrypointAnalyzer;

impl EntrypointAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, model: &ProgramModel) -> EntrypointAnalysisResult {
        let started = Instant::now();
        let mut endpoints = Vec::new();
        let mut scheduled_tasks = Vec::new();
        let mut async_methods = Vec::new();
        let mut skipped = 0usize;

        for class in model.classes() {
            if class.fqn.trim().is_empty() {
                warn!("skipping class fact with empty fully-qualified name");
                skipped += 1;
                continue;
            }
            if is_controller(class) {
                collect_endpoints(class, &mut endpoints);
            }
            for method in class.declared_methods() {
                if let Some(ann) = method.annotation("Scheduled") {
                    scheduled_tasks.push(scheduled_task(class, method, ann));
                }
                if let Some(ann) = method.annotation("Async") {
                    async_methods.push(AsyncMethod {
                        class_name: class.fqn.clone(),
                        method_name: method.name.clone(),
                        executor_qualifier: ann.explicit_name().map(str::to_string),
                    });
                }
            }
        }

        debug!(
            endpoints = endpoints.len(),
            scheduled = scheduled_tasks.len(),
            "entrypoint extraction complete"
        );
        EntrypointAnalysisResult {
            successful: true,
            error_message: None,
            main_class: main_class(model),
            endpoints,
            scheduled_tasks,
            async_methods,
            skipped_class_count: skipped,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

fn is_controller(class: &ClassFact) -> bool {
    class.has_annotation("RestController") || class.has_annotation("Controller")
}

fn collect_endpoints(class: &ClassFact, endpoints: &mut Vec<RestEndpoint>) {
    let base = class
        .annotation("RequestMapping")
        .map(mapping_paths)
        .and_then(|paths| paths.into_iter().next())
        .unwrap_or_default();

    for method in class.declared_methods() {
        for (name, verb) in SHORTCUT_MAPPINGS {
            if let Some(ann) = method.annotation(name) {
                emit_endpoints(class, method, ann, &base, &[*verb], endpoints);
            }
        }
        if let Some(ann) = method.annotation("RequestMapping") {
            let verbs = request_mapping_verbs(ann);
            emit_endpoints(class, method, ann, &base, &verbs, endpoints);
        }
    }
}

fn emit_endpoints(
    class: &ClassFact,
    method: &MethodFact,
    ann: &AnnotationFact,
    base: &str,
    verbs: &[HttpMethod],
    endpoints: &mut Vec<RestEndpoint>,
) {
    for sub in mapping_paths(ann) {
        let path = join_paths(base, &sub);
        for verb in verbs {
            endpoints.push(RestEndpoint {
                http_method: *verb,
                path_variables: path_variables(&path),
                path: path.clone(),
                handler_class: class.fqn.clone(),
                handler_method: method.name.clone(),
                produces: ann.list_attr("produces"),
                consumes: ann.list_attr("consumes"),
            });
        }
    }
}

/// Paths declared by a mapping annotation (`value` or `path`). An
/// annotation with neither maps the bare base path.
fn mapping_paths(ann: &AnnotationFact) -> Vec<String> {
    let mut paths = ann.list_attr("value");
    if paths.is_empty() {
        paths = ann.list_attr("path");
    }
    if paths.is_empty() {
        paths.push(String::new());
    }
    paths
}

fn request_mapping_verbs(ann: &AnnotationFact) -> Vec<HttpMethod> {
    let verbs: Vec<HttpMethod> = ann
        .list_attr("method")
        .iter()
        .filter_map(|token| parse_http_method(token))
        .collect();
    if verbs.is_empty() {
        vec![HttpMethod::Any]
    } else {
        verbs
    }
}

/// Accepts `GET` and enum-constant form `RequestMethod.GET`.
fn parse_http_method(token: &str) -> Option<HttpMethod> {
    let name = token.rsplit('.').next().unwrap_or(token);
    match name.to_ascii_uppercase().as_str() {
        "GET" => Some(HttpMethod::Get),
        "POST" => Some(HttpMethod::Post),
        "PUT" => Some(HttpMethod::Put),
        "DELETE" => Some(HttpMethod::Delete),
        "PATCH" => Some(HttpMethod::Patch),
        _ => None,
    }
}

/// Join base and method paths with exactly one slash between segments:
/// `("/api/", "/orders/")` becomes `/api/orders`, two empties stay `/`.
fn join_paths(base: &str, sub: &str) -> String {
    let mut joined = String::from("/");
    for segment in base.split('/').chain(sub.split('/')) {
        if segment.is_empty() {
            continue;
        }
        if !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(segment);
    }
    joined
}

/// `{id}` template names in order; `{id:\d+}` regex forms keep `id`.
fn path_variables(path: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let inner = &rest[open + 1..open + close];
        let name = inner.split(':').next().unwrap_or(inner);
        if !name.is_empty() {
            variables.push(name.to_string());
        }
        rest = &rest[open + close + 1..];
    }
    variables
}

fn scheduled_task(class: &ClassFact, method: &MethodFact, ann: &AnnotationFact) -> ScheduledTask {
    ScheduledTask {
        class_name: class.fqn.clone(),
        method_name: method.name.clone(),
        cron: ann
            .string_attr("cron")
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        fixed_rate_ms: ann
            .int_attr("fixedRate")
            .or_else(|| ann.int_attr("fixedRateString")),
        fixed_delay_ms: ann
            .int_attr("fixedDelay")
            .or_else(|| ann.int_attr("fixedDelayString")),
    }
}

fn main_class(model: &ProgramModel) -> Option<String> {
    if let Some(start_class) = model.manifest_attr("Start-Class") {
        return Some(start_class.to_string());
    }
    if let Some(main) = model.manifest_attr("Main-Class") {
        return Some(main.to_string());
    }
    model
        .classes()
        .find(|c| c.has_annotation("SpringBootApplication"))
        .map(|c| c.fqn.clone())
}
