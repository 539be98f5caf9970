//! Persistence layer backed by diesel/SQLite.

use crate::db::{DbConnection, DbPool};
use crate::domain::user::{NewUser, User, UserFilter};
use crate::pagination::OrderableQuery;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

/// Diesel-backed repository shared by the request handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        pooled_connection(&self.pool)
    }
}

/// Checks a connection out of `pool`, logging when none is available.
pub(crate) fn pooled_connection(pool: &DbPool) -> RepositoryResult<DbConnection> {
    pool.get().map_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
        e.into()
    })
}

pub trait UserReader {
    type Query: OrderableQuery<Item = User>;

    /// Builds the filtered, not yet executed users query.
    fn users_query(&self, filter: UserFilter) -> Self::Query;
}

pub trait UserWriter {
    fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize>;
}
