//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::user::{NewUser, User, UserFilter};
use crate::pagination::{CountStrategy, OrderClause, OrderableQuery, QueryError, QueryWindow};
use crate::repository::errors::RepositoryResult;
use crate::repository::{UserReader, UserWriter};

mock! {
    pub UserQuery {}

    impl OrderableQuery for UserQuery {
        type Item = User;

        fn order_by(&self) -> Vec<OrderClause>;
        fn set_order_by(&mut self, clauses: Vec<OrderClause>);
        fn has_joins(&self) -> bool;
        fn has_post_filter(&self) -> bool;
        fn fetch(&self, window: QueryWindow, strategy: CountStrategy)
            -> Result<Vec<User>, QueryError>;
        fn count(&self, strategy: CountStrategy) -> Result<usize, QueryError>;
    }
}

mock! {
    pub Repository {}

    impl UserReader for Repository {
        type Query = MockUserQuery;

        fn users_query(&self, filter: UserFilter) -> MockUserQuery;
    }

    impl UserWriter for Repository {
        fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize>;
    }
}
