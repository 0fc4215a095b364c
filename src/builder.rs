//! Fluent AQL query builder.
//!
//! Every clause call appends to the query text and returns the builder for
//! chaining. Calls that can fail return `AqlResult<&mut Self>` so a chain
//! continues with `?`.
//!
//! ```
//! use aql::AqlBuilder;
//!
//! let mut q = AqlBuilder::new();
//! q.let_var("names").unwrap()
//!     .for_in("u", "users").unwrap()
//!     .filter("u.active")
//!     .return_var("u.name");
//! assert_eq!(q.to_string(), "LET names = (FOR u IN users FILTER u.active RETURN u.name)");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

use crate::engine::{CursorRequest, QueryExecutor, QueryResult};
use crate::error::{AqlError, AqlResult};
use crate::scope::{ClauseKind, ScopeTracker, VariableRegistry};
use crate::value::{AqlValue, Operand};
use crate::vocabulary::{Comparison, Function, Keyword, SortDirection};

/// Accumulates clauses into an AQL query.
///
/// A builder is finalized exactly once, by [`build`](Self::build) or
/// [`execute`](Self::execute), both of which consume it. The `Display`
/// impl renders the finalized text without touching the builder, so
/// `to_string()` can be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct AqlBuilder {
    text: String,
    scope: ScopeTracker,
    variables: VariableRegistry,
    bind_vars: BTreeMap<String, JsonValue>,
    batch_size: usize,
}

impl AqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text verbatim. Bypasses scope tracking and the variable
    /// registry; balancing anything written here is up to the caller.
    pub fn aql(&mut self, raw: &str) -> &mut Self {
        self.text.push_str(raw);
        self
    }

    /// Results per round trip; 0 leaves the choice to the executor.
    pub fn batch_size(&mut self, n: usize) -> &mut Self {
        self.batch_size = n;
        self
    }

    /// Add a bind parameter, referenced in the text as `@key`.
    pub fn add_parameter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> AqlResult<&mut Self> {
        let key = key.into();
        if self.bind_vars.contains_key(&key) {
            return Err(AqlError::DuplicateParameter(key));
        }
        self.bind_vars.insert(key, value.into());
        Ok(self)
    }

    // ========== Clauses ==========

    /// `FOR variable IN source`. The loop variable is declared.
    pub fn for_in(&mut self, variable: &str, source: &str) -> AqlResult<&mut Self> {
        self.variables.declare(variable)?;
        self.clause(ClauseKind::For, variable);
        self.push_word(Keyword::In.as_str());
        self.push_word(source);
        Ok(self)
    }

    /// `LET variable =`. The value follows as the next call: a FOR (which
    /// becomes a parenthesized subquery), [`value`](Self::value),
    /// [`call`](Self::call) or raw text.
    pub fn let_var(&mut self, variable: &str) -> AqlResult<&mut Self> {
        self.variables.declare(variable)?;
        self.clause(ClauseKind::Let, variable);
        self.push_word("=");
        Ok(self)
    }

    pub fn filter(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::Filter, expression);
        self
    }

    pub fn collect(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::Collect, expression);
        self
    }

    /// `INTO expression`, usually following COLLECT.
    pub fn into_var(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::Into, expression);
        self
    }

    pub fn sort(&mut self, expression: &str, direction: SortDirection) -> &mut Self {
        self.clause(ClauseKind::Sort, expression);
        self.push_word(&direction.to_string());
        self
    }

    pub fn limit(&mut self, count: u64) -> &mut Self {
        self.clause(ClauseKind::Limit, &count.to_string());
        self
    }

    /// `LIMIT offset, count`
    pub fn limit_offset(&mut self, offset: u64, count: u64) -> &mut Self {
        self.clause(ClauseKind::Limit, &format!("{}, {}", offset, count));
        self
    }

    /// `RETURN expression`. Concludes the innermost FOR scope.
    pub fn return_var(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::Return, expression);
        self
    }

    // ========== Expression operators ==========

    pub fn and(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::And, expression);
        self
    }

    pub fn or(&mut self, expression: &str) -> &mut Self {
        self.clause(ClauseKind::Or, expression);
        self
    }

    /// `IN expression`, the membership test (`FILTER u.role IN @roles`).
    pub fn from(&mut self, expression: &str) -> &mut Self {
        self.push_word(Keyword::In.as_str());
        self.push_word(expression);
        self
    }

    /// `== operand`
    pub fn equals(&mut self, operand: impl Into<Operand>) -> AqlResult<&mut Self> {
        self.compare(Comparison::Eq, operand)
    }

    /// Operator followed by the operand. A string literal naming a declared
    /// variable is emitted as a reference; nothing is appended on error.
    pub fn compare(
        &mut self,
        op: Comparison,
        operand: impl Into<Operand>,
    ) -> AqlResult<&mut Self> {
        let rendered = self.render(&operand.into())?;
        self.push_word(&op.to_string());
        self.push_word(&rendered);
        self.scope.note_value();
        Ok(self)
    }

    /// Append a standalone operand, e.g. the value of a LET.
    pub fn value(&mut self, operand: impl Into<Operand>) -> AqlResult<&mut Self> {
        let rendered = self.render(&operand.into())?;
        self.push_word(&rendered);
        self.scope.note_value();
        Ok(self)
    }

    /// `NAME(arg, ...)`
    pub fn call<I>(&mut self, function: Function, args: I) -> AqlResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let args = args
            .into_iter()
            .map(|arg| self.render(&arg.into()))
            .collect::<AqlResult<Vec<_>>>()?;
        self.push_word(&format!("{}({})", function, args.join(", ")));
        self.scope.note_value();
        Ok(self)
    }

    // ========== Inspection ==========

    pub fn nesting_level(&self) -> usize {
        self.scope.nesting_level()
    }

    pub fn last_clause(&self) -> ClauseKind {
        self.scope.last_clause()
    }

    pub fn is_declared(&self, variable: &str) -> bool {
        self.variables.is_declared(variable)
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    pub fn bind_vars(&self) -> &BTreeMap<String, JsonValue> {
        &self.bind_vars
    }

    pub fn parameter(&self, key: &str) -> Option<&JsonValue> {
        self.bind_vars.get(key)
    }

    // ========== Finalization ==========

    /// Close outstanding scopes and hand over the query.
    pub fn build(self) -> AqlQuery {
        AqlQuery {
            query: self.scope.finalize(&self.text),
            bind_vars: self.bind_vars,
            batch_size: self.batch_size,
        }
    }

    /// Finalize and run through `executor`. Executor errors are returned
    /// unchanged inside [`AqlError::Executor`].
    pub fn execute<E: QueryExecutor + ?Sized>(
        self,
        executor: &E,
        count: bool,
    ) -> AqlResult<QueryResult> {
        self.build().execute(executor, count)
    }

    fn clause(&mut self, kind: ClauseKind, body: &str) {
        self.scope.enter(kind, &mut self.text);
        self.push_word(body);
    }

    fn push_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
        self.text.push_str(word);
    }

    fn render(&self, operand: &Operand) -> AqlResult<String> {
        match operand {
            Operand::Var(name) => Ok(name.clone()),
            Operand::Param(name) => Ok(format!("@{}", name)),
            Operand::Literal(AqlValue::String(s)) if self.is_declared(s) => {
                Ok(s.clone())
            }
            Operand::Literal(value) => value.to_aql(),
        }
    }
}

impl fmt::Display for AqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scope.finalize(&self.text))
    }
}

/// A finalized query: balanced text plus its bind parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AqlQuery {
    pub query: String,
    pub bind_vars: BTreeMap<String, JsonValue>,
    pub batch_size: usize,
}

impl AqlQuery {
    pub fn to_request(&self, count: bool) -> CursorRequest {
        CursorRequest {
            query: self.query.clone(),
            bind_vars: self.bind_vars.clone(),
            batch_size: self.batch_size,
            count,
        }
    }

    pub fn execute<E: QueryExecutor + ?Sized>(
        &self,
        executor: &E,
        count: bool,
    ) -> AqlResult<QueryResult> {
        Ok(executor.execute(&self.to_request(count))?)
    }
}

impl fmt::Display for AqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
