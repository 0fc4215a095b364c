//! # aql — fluent AQL query builder
//!
//! > **Chain clauses, get a balanced query.**
//!
//! Clause calls are accumulated into AQL text; FOR loops used as LET values
//! become parenthesized subqueries and every opened parenthesis is closed
//! when the query is finalized.
//!
//! ## Quick Example
//!
//! ```rust
//! use aql::prelude::*;
//!
//! let mut q = AqlBuilder::new();
//! q.for_in("u", "users")?
//!     .filter("u.age")
//!     .compare(Comparison::Gte, Operand::param("age"))?
//!     .sort("u.name", SortDirection::Asc)
//!     .limit(10)
//!     .return_var("u");
//! q.add_parameter("age", 21)?;
//!
//! let query = q.build();
//! assert_eq!(
//!     query.query,
//!     "FOR u IN users FILTER u.age >= @age SORT u.name ASC LIMIT 10 RETURN u"
//! );
//! # Ok::<(), aql::AqlError>(())
//! ```
//!
//! ## Parenthesization
//!
//! | Clause sequence                  | Output                                 |
//! |----------------------------------|----------------------------------------|
//! | `FOR` first                      | `FOR x IN c`                           |
//! | `LET` then `FOR`                 | `LET v = (FOR x IN c ...`              |
//! | `LET` with a value, then `FOR`   | `LET n = 5 FOR x IN c ...`             |
//! | `RETURN` of a subquery, then any | `... RETURN x) <next clause>`          |
//! | `RETURN` of a root loop, `FOR`   | `... RETURN a FOR b IN c2 ...`         |
//! | end of chain                     | one `)` per subquery still open        |
//!
//! Running a query needs a [`QueryExecutor`](engine::QueryExecutor); the
//! bundled [`HttpExecutor`](http::HttpExecutor) talks to the cursor API.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod scope;
pub mod value;
pub mod vocabulary;

pub use builder::{AqlBuilder, AqlQuery};
pub use error::{AqlError, AqlResult, ExecutorError};

pub mod prelude {
    pub use crate::builder::{AqlBuilder, AqlQuery};
    pub use crate::config::ExecutorConfig;
    pub use crate::engine::{CursorRequest, QueryExecutor, QueryResult};
    pub use crate::error::*;
    pub use crate::http::HttpExecutor;
    pub use crate::scope::ClauseKind;
    pub use crate::value::{AqlValue, Operand};
    pub use crate::vocabulary::{Comparison, Function, SortDirection};
}
