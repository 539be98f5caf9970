//! Users repository and its orderable listing query.

use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::DbPool;
use crate::domain::user::{NewUser, User, UserFilter};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::pagination::{
    CountStrategy, OrderClause, OrderableQuery, QueryError, QueryWindow, SortDirection,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter, pooled_connection};
use crate::schema::users;

/// Columns a users listing can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UserColumn {
    Id,
    FullName,
}

impl UserColumn {
    /// Accepts bare or `user.`-qualified names.
    fn parse(field: &str) -> Result<Self, QueryError> {
        match field.strip_prefix("user.").unwrap_or(field) {
            "id" => Ok(UserColumn::Id),
            "full_name" | "fullName" => Ok(UserColumn::FullName),
            _ => Err(QueryError::UnknownField(field.to_string())),
        }
    }
}

/// Users listing with a replaceable ordering, ordered by `id` by default.
pub struct UserQuery {
    pool: DbPool,
    filter: UserFilter,
    order: Vec<OrderClause>,
}

impl UserQuery {
    pub fn new(pool: DbPool, filter: UserFilter) -> Self {
        Self {
            pool,
            filter,
            order: vec![OrderClause::asc("id")],
        }
    }

    fn filtered(&self) -> users::BoxedQuery<'static, Sqlite> {
        let mut query = users::table.into_boxed();
        if let Some(term) = &self.filter.full_name {
            query = query.filter(users::full_name.like(format!("%{term}%")));
        }
        query
    }
}

impl OrderableQuery for UserQuery {
    type Item = User;

    fn order_by(&self) -> Vec<OrderClause> {
        self.order.clone()
    }

    fn set_order_by(&mut self, clauses: Vec<OrderClause>) {
        self.order = clauses;
    }

    fn has_joins(&self) -> bool {
        false
    }

    fn has_post_filter(&self) -> bool {
        false
    }

    fn fetch(
        &self,
        window: QueryWindow,
        _strategy: CountStrategy,
    ) -> Result<Vec<User>, QueryError> {
        let columns = self
            .order
            .iter()
            .map(|clause| Ok((UserColumn::parse(&clause.field)?, clause.direction)))
            .collect::<Result<Vec<_>, QueryError>>()?;

        let mut query = self.filtered();
        for (column, direction) in columns {
            query = match (column, direction) {
                (UserColumn::Id, SortDirection::Asc) => query.then_order_by(users::id.asc()),
                (UserColumn::Id, SortDirection::Desc) => query.then_order_by(users::id.desc()),
                (UserColumn::FullName, SortDirection::Asc) => {
                    query.then_order_by(users::full_name.asc())
                }
                (UserColumn::FullName, SortDirection::Desc) => {
                    query.then_order_by(users::full_name.desc())
                }
            };
        }

        let mut conn = pooled_connection(&self.pool)?;
        let rows = query
            .offset(i64::try_from(window.offset).unwrap_or(i64::MAX))
            .limit(i64::try_from(window.limit).unwrap_or(i64::MAX))
            .load::<DbUser>(&mut conn)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(|e| RepositoryError::from(e).into()))
            .collect()
    }

    fn count(&self, strategy: CountStrategy) -> Result<usize, QueryError> {
        let mut conn = pooled_connection(&self.pool)?;
        let total: i64 = if strategy.distinct {
            self.filtered()
                .select(count_distinct(users::id))
                .get_result(&mut conn)?
        } else {
            self.filtered().count().get_result(&mut conn)?
        };
        Ok(usize::try_from(total).unwrap_or_default())
    }
}

impl UserReader for DieselRepository {
    type Query = UserQuery;

    fn users_query(&self, filter: UserFilter) -> UserQuery {
        UserQuery::new(self.pool.clone(), filter)
    }
}

impl UserWriter for DieselRepository {
    fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewUser> = new_users.iter().map(Into::into).collect();
        let affected = diesel::insert_into(users::table)
            .values(&insertables)
            .execute(&mut conn)?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use diesel::r2d2::{ConnectionManager, Pool};
    use diesel::sqlite::SqliteConnection;

    use super::*;

    #[test]
    fn columns_accept_qualified_and_camel_case_names() {
        assert_eq!(UserColumn::parse("id").unwrap(), UserColumn::Id);
        assert_eq!(
            UserColumn::parse("user.full_name").unwrap(),
            UserColumn::FullName
        );
        assert_eq!(UserColumn::parse("fullName").unwrap(), UserColumn::FullName);
        assert!(matches!(
            UserColumn::parse("password"),
            Err(QueryError::UnknownField(field)) if field == "password"
        ));
    }

    #[test]
    fn exhausted_pool_surfaces_as_connection_error() {
        let pool: DbPool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(50))
            .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
            .unwrap();
        let _held = pool.get().unwrap();

        let query = UserQuery::new(pool.clone(), UserFilter::default());

        assert!(matches!(
            query.count(CountStrategy::default()),
            Err(QueryError::Repository(RepositoryError::ConnectionError(_)))
        ));
        assert!(matches!(
            query.fetch(QueryWindow { offset: 0, limit: 10 }, CountStrategy::default()),
            Err(QueryError::Repository(RepositoryError::ConnectionError(_)))
        ));
    }
}
