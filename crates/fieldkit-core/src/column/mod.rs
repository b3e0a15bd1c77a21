//! Module: column
//! Responsibility: where a field's value comes from and how its stored form
//! maps onto the exposed value.
//!
//! Invariants:
//! - `ColumnIdentifier` values built through `try_new` have non-empty table
//!   and column names.
//! - Identifiers compare by (schema, table, column); nothing else.

mod mapper;

#[cfg(test)]
mod tests;

use crate::error::{Error, ErrorOrigin};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use mapper::{FnMapper, IdentityMapper, TypeMapper};

///
/// ColumnIdentifier
///
/// Immutable token naming the column a field reads from. Only identity
/// matters; the core never resolves it against a database.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ColumnIdentifier {
    schema: Option<String>,
    table: String,
    column: String,
}

impl ColumnIdentifier {
    /// Build an identifier without validation; intended for generated code
    /// whose names are known to be well formed.
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
        }
    }

    /// Build an identifier, rejecting empty table or column names.
    pub fn try_new(table: impl Into<String>, column: impl Into<String>) -> Result<Self, Error> {
        let id = Self::new(table, column);
        id.validate()?;

        Ok(id)
    }

    /// Attach a schema name. An empty schema is treated as no schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        self.schema = (!schema.is_empty()).then_some(schema);
        self
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    fn validate(&self) -> Result<(), Error> {
        if self.table.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Column,
                format!("column identifier for '{}' has an empty table name", self.column),
            ));
        }
        if self.column.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Column,
                format!("column identifier on table '{}' has an empty column name", self.table),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        write!(f, "{}.{}", self.table, self.column)
    }
}
