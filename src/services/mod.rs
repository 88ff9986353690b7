//! Application services sitting between HTTP handlers and repositories.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod categories;
pub mod products;

/// Errors surfaced to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error("internal error")]
    Internal,
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        log::error!("repository error: {error}");
        ServiceError::Internal
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
