//! Blocking HTTP executor for the cursor API.
//!
//! One query is one POST to `/_db/{database}/_api/cursor`, followed by a PUT
//! to `/_api/cursor/{id}` for every further batch while the server reports
//! `hasMore`. Batches are concatenated before returning. If a follow-up
//! batch fails, the cursor is deleted so the server can release it early.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::ExecutorConfig;
use crate::engine::{CursorRequest, QueryExecutor, QueryResult};
use crate::error::{AqlError, AqlResult, ExecutorError};

/// Executes queries over HTTP using the settings in [`ExecutorConfig`].
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    config: ExecutorConfig,
}

/// One batch of a cursor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CursorPage {
    #[serde(default)]
    pub result: Vec<JsonValue>,
    #[serde(default)]
    pub has_more: bool,
    pub id: Option<String>,
    pub count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ErrorBody {
    error: bool,
    code: Option<u16>,
    error_num: Option<u32>,
    error_message: Option<String>,
}

impl HttpExecutor {
    pub fn new(config: ExecutorConfig) -> AqlResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("aql/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AqlError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub(crate) fn cursor_url(&self) -> String {
        format!(
            "{}/_db/{}/_api/cursor",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(user) => request.basic_auth(user, self.config.password.as_deref()),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<CursorPage, ExecutorError> {
        let response = self
            .authorize(request)
            .send()
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;
        decode_page(status, &body)
    }

    /// Best effort: the query already failed, so a failed delete is only logged.
    fn discard_cursor(&self, url: &str, id: &str) {
        let outcome = self
            .authorize(self.client.delete(format!("{}/{}", url, id)))
            .send()
            .and_then(|response| response.error_for_status());
        match outcome {
            Ok(_) => tracing::debug!("Deleted cursor {}", id),
            Err(e) => tracing::warn!("Failed to delete cursor {}: {}", id, e),
        }
    }
}

impl QueryExecutor for HttpExecutor {
    fn execute(&self, request: &CursorRequest) -> Result<QueryResult, ExecutorError> {
        let mut body = request.clone();
        if body.batch_size == 0 {
            body.batch_size = self.config.batch_size;
        }

        let url = self.cursor_url();
        tracing::debug!(
            "Opening cursor on '{}' ({} bytes of AQL, {} bind vars, batch {})",
            self.config.database,
            body.query.len(),
            body.bind_vars.len(),
            body.batch_size
        );

        let first = self.send(self.client.post(&url).json(&body))?;
        let count = first.count;
        let open_cursor = if first.has_more { first.id.clone() } else { None };

        let rows = match follow_batches(first, |id| {
            self.send(self.client.put(format!("{}/{}", url, id)))
        }) {
            Ok(rows) => rows,
            Err(e) => {
                if let Some(id) = open_cursor {
                    self.discard_cursor(&url, &id);
                }
                return Err(e);
            }
        };

        Ok(QueryResult {
            rows,
            count: if request.count { count } else { None },
        })
    }
}

/// Drain a cursor starting from its first page. `next_batch` fetches the
/// batch after the given cursor id.
pub(crate) fn follow_batches<F>(
    mut page: CursorPage,
    mut next_batch: F,
) -> Result<Vec<JsonValue>, ExecutorError>
where
    F: FnMut(&str) -> Result<CursorPage, ExecutorError>,
{
    let mut rows = std::mem::take(&mut page.result);
    while page.has_more {
        let id = page
            .id
            .take()
            .ok_or_else(|| ExecutorError::Decode("hasMore set without a cursor id".to_string()))?;
        tracing::debug!("Fetching next batch of cursor {} ({} rows so far)", id, rows.len());
        let next = next_batch(&id)?;
        if next.has_more && next.result.is_empty() && next.id.as_deref() == Some(id.as_str()) {
            return Err(ExecutorError::Decode(format!(
                "cursor {} reported more results but returned none",
                id
            )));
        }
        page = next;
        rows.append(&mut page.result);
    }
    Ok(rows)
}

/// Turn a cursor API response into a page or the error it reports.
pub(crate) fn decode_page(status: u16, body: &str) -> Result<CursorPage, ExecutorError> {
    let json: JsonValue = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) if status >= 400 => {
            tracing::warn!("Server returned {} with a non-JSON body", status);
            return Err(ExecutorError::Server {
                code: status,
                error_num: 0,
                message: if body.is_empty() { e.to_string() } else { body.to_string() },
            });
        }
        Err(e) => return Err(ExecutorError::Decode(e.to_string())),
    };

    let error: ErrorBody = serde_json::from_value(json.clone()).unwrap_or_default();
    if error.error || status >= 400 {
        let message = error
            .error_message
            .unwrap_or_else(|| format!("HTTP status {}", status));
        tracing::warn!("Query rejected: {}", message);
        return Err(ExecutorError::Server {
            code: error.code.unwrap_or(status),
            error_num: error.error_num.unwrap_or(0),
            message,
        });
    }

    serde_json::from_value(json).map_err(|e| ExecutorError::Decode(e.to_string()))
}
