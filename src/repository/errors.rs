use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to acquire a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("stored value violates a domain constraint: {0}")]
    Constraint(#[from] TypeConstraintError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
