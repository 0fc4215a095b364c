//! Query execution seam.
//!
//! The builder never talks to a server itself. It hands a finished
//! [`CursorRequest`] to a [`QueryExecutor`] and returns whatever comes back.
//! [`HttpExecutor`](crate::http::HttpExecutor) is the bundled implementation;
//! tests and embedders can supply their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ExecutorError;

/// Everything an executor needs to run one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bind_vars: BTreeMap<String, JsonValue>,
    /// 0 means the executor picks.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub batch_size: usize,
    /// Ask for the total number of results.
    #[serde(default)]
    pub count: bool,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl CursorRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            bind_vars: BTreeMap::new(),
            batch_size: 0,
            count: false,
        }
    }
}

/// Rows produced by one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<JsonValue>,
    /// Total number of results, present when it was requested.
    pub count: Option<u64>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for QueryResult {
    type Item = JsonValue;
    type IntoIter = std::vec::IntoIter<JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Runs finished queries. Implementations may block; they must not retry
/// on the caller's behalf.
pub trait QueryExecutor {
    fn execute(&self, request: &CursorRequest) -> Result<QueryResult, ExecutorError>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn execute(&self, request: &CursorRequest) -> Result<QueryResult, ExecutorError> {
        (**self).execute(request)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn execute(&self, request: &CursorRequest) -> Result<QueryResult, ExecutorError> {
        (**self).execute(request)
    }
}
