// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod schema;
pub mod task;

pub use schema::{
    CodeReviewResponse, ResponseSchema, ResponseShape, SentryIssuesResponse, parse_into_schema,
};
pub use task::{TaskRequest, TaskResult};
