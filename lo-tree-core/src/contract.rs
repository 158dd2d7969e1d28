//! # contract: interfaces to the collaborators at the tree's boundary
//!
//! The tree operations themselves are pure. Two effects sit at the edge:
//! fetching a remote course summary and persisting a derived record. Each is a
//! trait here so production clients, file-backed stores and test mocks plug in
//! the same way.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; enable the `test-export-mocks`
//!   feature (on by default) to use `MockSummaryFetcher` / `MockLoWriter`
//!   from other crates.
//!
//! ## Error Handling
//! - Implementors return a boxed [`CollaboratorError`]; the caller wraps it in
//!   [`crate::error::LoError`] together with the URL or key involved.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde_json::Value;

use crate::error::CollaboratorError;

/// Source of raw course-summary documents.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SummaryFetcher: Send + Sync {
    /// Fetches the document at `url` and returns its body as text.
    async fn fetch(&self, url: &str) -> Result<String, CollaboratorError>;
}

/// Key-value store for derived records. Last write for a key wins.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait LoWriter: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn write_obj(&self, key: &str, value: Value) -> Result<(), CollaboratorError>;
}
