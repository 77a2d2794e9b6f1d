//! Storage connector for the Catálogo services.
//!
//! A [`Database`] holds exactly one long-lived SQL session and executes
//! parameterized statements against it. Callers depend on the [`Storage`]
//! trait so the session can be injected (and replaced in tests).

pub mod database;
pub mod error;
pub mod schema;
pub mod value;

use async_trait::async_trait;

pub use database::{Database, Dialect};
pub use error::StorageError;
pub use schema::table_names;
pub use value::{Mutation, Outcome, Row, Scalar};

/// A relational backing store that executes one statement per call.
///
/// Every call is auto-committed on its own; there is no transaction or
/// retry handling at this level.
#[async_trait]
pub trait Storage: Send + Sync {
    /// SQL dialect spoken by the backing engine
    fn dialect(&self) -> Dialect;

    /// Execute `statement` with positional `?` parameters.
    ///
    /// Reads return [`Outcome::Rows`]; writes return [`Outcome::Mutation`].
    async fn execute(&self, statement: &str, params: &[Scalar]) -> Result<Outcome, StorageError>;
}
