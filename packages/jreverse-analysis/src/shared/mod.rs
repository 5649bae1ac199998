//! Shared building blocks: the program model and Java naming helpers.

pub mod java;
pub mod models;
