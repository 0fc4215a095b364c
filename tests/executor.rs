use std::cell::RefCell;

use aql::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Records every request and answers with canned rows.
#[derive(Default)]
struct RecordingExecutor {
    requests: RefCell<Vec<CursorRequest>>,
    rows: Vec<serde_json::Value>,
}

impl QueryExecutor for RecordingExecutor {
    fn execute(&self, request: &CursorRequest) -> Result<QueryResult, ExecutorError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(QueryResult {
            rows: self.rows.clone(),
            count: request.count.then_some(self.rows.len() as u64),
        })
    }
}

struct FailingExecutor;

impl QueryExecutor for FailingExecutor {
    fn execute(&self, _request: &CursorRequest) -> Result<QueryResult, ExecutorError> {
        Err(ExecutorError::Server {
            code: 404,
            error_num: 1203,
            message: "collection or view not found: users".to_string(),
        })
    }
}

#[test]
fn test_execute_hands_over_finalized_request() -> anyhow::Result<()> {
    let executor = RecordingExecutor {
        rows: vec![json!({"name": "ann"}), json!({"name": "bob"})],
        ..Default::default()
    };

    let mut q = AqlBuilder::new();
    q.let_var("admins")?
        .for_in("u", "users")?
        .filter("u.role")
        .equals(Operand::param("role"))?
        .return_var("u");
    q.add_parameter("role", "admin")?.batch_size(2);

    let result = q.execute(&executor, true)?;
    assert_eq!(result.len(), 2);
    assert_eq!(result.count, Some(2));

    let requests = executor.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        CursorRequest {
            query: "LET admins = (FOR u IN users FILTER u.role == @role RETURN u)".to_string(),
            bind_vars: [("role".to_string(), json!("admin"))].into_iter().collect(),
            batch_size: 2,
            count: true,
        }
    );
    Ok(())
}

#[test]
fn test_count_not_requested() -> anyhow::Result<()> {
    let executor = RecordingExecutor::default();
    let mut q = AqlBuilder::new();
    q.for_in("d", "docs")?.return_var("d");

    let result = q.execute(&executor, false)?;
    assert!(result.is_empty());
    assert_eq!(result.count, None);
    assert_eq!(executor.requests.borrow()[0].batch_size, 0);
    Ok(())
}

#[test]
fn test_built_query_can_run_repeatedly() -> anyhow::Result<()> {
    let executor = RecordingExecutor {
        rows: vec![json!(1)],
        ..Default::default()
    };
    let mut q = AqlBuilder::new();
    q.for_in("n", "[1, 2, 3]")?.return_var("n");
    let query = q.build();

    let first = query.execute(&executor, false)?;
    let second = query.execute(&executor, false)?;
    assert_eq!(first, second);

    let requests = executor.requests.borrow();
    assert_eq!(requests[0], requests[1]);
    Ok(())
}

#[test]
fn test_executor_error_surfaces_unchanged() {
    let mut q = AqlBuilder::new();
    q.for_in("u", "users").unwrap().return_var("u");

    let err = q.execute(&FailingExecutor, false).unwrap_err();
    match err {
        AqlError::Executor(ExecutorError::Server {
            code,
            error_num,
            message,
        }) => {
            assert_eq!(code, 404);
            assert_eq!(error_num, 1203);
            assert_eq!(message, "collection or view not found: users");
        }
        other => panic!("expected executor error, got {:?}", other),
    }
}

#[test]
fn test_boxed_executor() -> anyhow::Result<()> {
    let executor: Box<dyn QueryExecutor> = Box::new(RecordingExecutor {
        rows: vec![json!("x")],
        ..Default::default()
    });
    let mut q = AqlBuilder::new();
    q.aql("RETURN 'x'");
    let rows: Vec<_> = q.execute(&executor, false)?.into_iter().collect();
    assert_eq!(rows, vec![json!("x")]);
    Ok(())
}
