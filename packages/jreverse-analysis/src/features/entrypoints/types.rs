//! Entrypoint value objects: REST endpoints, scheduled tasks, async methods.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    /// `@RequestMapping` without a `method` attribute handles them all.
    Any,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Any => "ANY",
        };
        f.write_str(name)
    }
}

/// One HTTP handler method, with its fully joined path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RestEndpoint {
    pub http_method: HttpMethod,
    /// Class base path joined with the method path, slash-normalized.
    pub path: String,
    pub handler_class: String,
    pub handler_method: String,
    /// `{variable}` names in path order, regex suffixes stripped.
    pub path_variables: Vec<String>,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
}

/// One `@Scheduled` method. Only the trigger attributes are recorded;
/// expressions are never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub class_name: String,
    pub method_name: String,
    pub cron: Option<String>,
    pub fixed_rate_ms: Option<i64>,
    pub fixed_delay_ms: Option<i64>,
}

/// One `@Async` method and the executor it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncMethod {
    pub class_name: String,
    pub method_name: String,
    pub executor_qualifier: Option<String>,
}

/// Result of entrypoint reconstruction over one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrypointAnalysisResult {
    pub successful: bool,
    pub error_message: Option<String>,
    /// Manifest `Start-Class`, then `Main-Class`, then the first
    /// `@SpringBootApplication` class.
    pub main_class: Option<String>,
    pub endpoints: Vec<RestEndpoint>,
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub async_methods: Vec<AsyncMethod>,
    pub skipped_class_count: usize,
    pub duration_ms: u64,
}

impl EntrypointAnalysisResult {
    pub fn endpoints_of(&self, handler_class: &str) -> Vec<&RestEndpoint> {
        self.endpoints
            .iter()
            .filter(|e| e.handler_class == handler_class)
            .collect()
    }

    pub fn endpoints_matching(&self, http_method: HttpMethod) -> Vec<&RestEndpoint> {
        self.endpoints
            .iter()
            .filter(|e| e.http_method == http_method)
            .collect()
    }
}
