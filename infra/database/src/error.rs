/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors (missing builder parameters).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Occurs when root sign-in fails.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    /// Migration failures or invariant violations.
    #[error("Migration error: {0}")]
    Migration(String),
}
