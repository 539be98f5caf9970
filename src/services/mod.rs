//! Service layer sitting between the HTTP routes and the repositories.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::pagination::{QueryError, RoutingError};
use crate::repository::errors::RepositoryError;

pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
