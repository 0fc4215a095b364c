//! Variable registry and scope tracking.
//!
//! The tracker is purely reactive: whether a FOR needs a parenthesis is
//! decided by the clause that came before it, and the `)` of a subquery is
//! written only once the clause after its RETURN (or finalization) arrives.
//!
//! ```text
//! LET v = (FOR y IN c RETURN y) FOR x IN d RETURN x
//!         ┬                   ┬
//!         │                   └── written when the next FOR arrives
//!         └── FOR after LET opens a subquery
//! ```

use std::collections::HashSet;

use crate::error::{AqlError, AqlResult};
use crate::vocabulary::Keyword;

/// Kind of the most recently emitted tracked clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClauseKind {
    #[default]
    None,
    For,
    Let,
    Filter,
    Return,
    Collect,
    Into,
    Sort,
    Limit,
    And,
    Or,
    /// A LET that already received its value from an operand or function call.
    Value,
}

impl ClauseKind {
    /// AND/OR continue the previous expression instead of starting a clause.
    pub fn is_continuation(&self) -> bool {
        matches!(self, ClauseKind::And | ClauseKind::Or)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            ClauseKind::None => None,
            ClauseKind::For => Some(Keyword::For),
            ClauseKind::Let => Some(Keyword::Let),
            ClauseKind::Filter => Some(Keyword::Filter),
            ClauseKind::Return => Some(Keyword::Return),
            ClauseKind::Collect => Some(Keyword::Collect),
            ClauseKind::Into => Some(Keyword::Into),
            ClauseKind::Sort => Some(Keyword::Sort),
            ClauseKind::Limit => Some(Keyword::Limit),
            ClauseKind::And => Some(Keyword::And),
            ClauseKind::Or => Some(Keyword::Or),
            ClauseKind::Value => None,
        }
    }
}

/// Names declared by LET and FOR within one query.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    names: HashSet<String>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Fails without inserting if the name is taken.
    pub fn declare(&mut self, name: &str) -> AqlResult<()> {
        if self.names.contains(name) {
            return Err(AqlError::DuplicateVariable(name.to_string()));
        }
        self.names.insert(name.to_string());
        Ok(())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    parenthesized: bool,
}

/// Nesting state machine for FOR scopes.
#[derive(Debug, Clone, Default)]
pub struct ScopeTracker {
    last: ClauseKind,
    scopes: Vec<Scope>,
    /// A parenthesized scope was concluded by RETURN; its `)` is not written yet.
    pending_close: bool,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_clause(&self) -> ClauseKind {
        self.last
    }

    /// Record that an operand was written. After a LET this is the LET's
    /// value, so a following FOR is a new loop rather than a subquery.
    pub fn note_value(&mut self) {
        if self.last == ClauseKind::Let {
            self.last = ClauseKind::Value;
        }
    }

    /// Number of open FOR scopes.
    pub fn nesting_level(&self) -> usize {
        self.scopes.len()
    }

    /// Write whatever must precede a clause of `kind`, then the keyword,
    /// and record the transition. The caller appends the clause body.
    pub fn enter(&mut self, kind: ClauseKind, out: &mut String) {
        if self.pending_close && !kind.is_continuation() {
            out.push(')');
            self.pending_close = false;
        }

        if !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }

        match kind {
            ClauseKind::For => {
                let parenthesized = self.last == ClauseKind::Let;
                if parenthesized {
                    out.push('(');
                }
                self.scopes.push(Scope { parenthesized });
            }
            ClauseKind::Return => {
                if let Some(scope) = self.scopes.pop() {
                    self.pending_close = scope.parenthesized;
                }
            }
            _ => {}
        }

        if let Some(keyword) = kind.keyword() {
            out.push_str(keyword.as_str());
        }
        self.last = kind;
    }

    /// Number of `)` needed to balance what has been written so far.
    pub fn unclosed(&self) -> usize {
        usize::from(self.pending_close) + self.scopes.iter().filter(|s| s.parenthesized).count()
    }

    /// Append the closing parentheses to a copy of `text`.
    pub fn finalize(&self, text: &str) -> String {
        let closing = self.unclosed();
        let mut out = String::with_capacity(text.len() + closing);
        out.push_str(text);
        for _ in 0..closing {
            out.push(')');
        }
        out
    }
}
