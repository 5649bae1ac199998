//! Entrypoint analysis: REST endpoints, scheduled tasks, async methods.

mod analyzer;
mod types;

pub use analyzer::EntrypointAnalyzer;
pub use types::{
    AsyncMethod, EntrypointAnalysisResult, HttpMethod, RestEndpoint, ScheduledTask,
};
