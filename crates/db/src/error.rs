use bizdesk_core::types::{DbId, Money};

/// Failure reported by a [`Store`](crate::store::Store) implementation.
///
/// Callers never show these to API clients; they are logged and replaced
/// by a fixed per-operation message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Pool acquisition or statement failure from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write referenced a row that does not exist.
    #[error("Foreign key violation: {entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: DbId },

    /// A delete targeted a row that other rows still reference.
    #[error("Foreign key violation: {entity} with id {id} is still referenced by {referenced_by}")]
    StillReferenced {
        entity: &'static str,
        id: DbId,
        referenced_by: &'static str,
    },

    /// A money value does not fit its `NUMERIC(10,2)` column.
    #[error("Numeric field overflow: {column} = {value}")]
    NumericOverflow { column: &'static str, value: Money },

    /// The storage backend cannot serve requests right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
