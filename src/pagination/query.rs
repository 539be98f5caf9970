//! Query capability consumed by the [`Paginator`](crate::pagination::Paginator).

use thiserror::Error;

use crate::pagination::intent::SortDirection;
use crate::repository::errors::RepositoryError;

/// One `ORDER BY` term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderClause {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderClause {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Offset/limit slice of a result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryWindow {
    pub offset: usize,
    pub limit: usize,
}

/// How the total count should be computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountStrategy {
    /// Count distinct root rows. Only needed when joins may duplicate rows.
    pub distinct: bool,
    /// Count by wrapping the whole query in a subquery. Needed when a
    /// `HAVING` clause filters aggregated rows.
    pub wrap_subquery: bool,
}

impl CountStrategy {
    pub fn for_query<Q>(query: &Q) -> Self
    where
        Q: OrderableQuery + ?Sized,
    {
        Self {
            distinct: query.has_joins(),
            wrap_subquery: query.has_post_filter(),
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// The ordering refers to a field the query target does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<diesel::result::Error> for QueryError {
    fn from(err: diesel::result::Error) -> Self {
        QueryError::Repository(err.into())
    }
}

impl From<diesel::r2d2::PoolError> for QueryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        QueryError::Repository(err.into())
    }
}

/// A filtered query whose ordering can be replaced before execution.
pub trait OrderableQuery {
    type Item;

    /// Ordering currently attached to the query.
    fn order_by(&self) -> Vec<OrderClause>;
    /// Replaces the ordering; an empty list removes it.
    fn set_order_by(&mut self, clauses: Vec<OrderClause>);
    /// Whether the query joins other tables.
    fn has_joins(&self) -> bool;
    /// Whether the query filters after aggregation (`HAVING`).
    fn has_post_filter(&self) -> bool;
    /// Loads one window of rows.
    ///
    /// Ordering by a field the target lacks must fail with
    /// [`QueryError::UnknownField`].
    fn fetch(&self, window: QueryWindow, strategy: CountStrategy)
    -> Result<Vec<Self::Item>, QueryError>;
    /// Counts all rows matching the filter.
    fn count(&self, strategy: CountStrategy) -> Result<usize, QueryError>;
}
