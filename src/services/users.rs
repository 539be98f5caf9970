//! Services backing the users listing.

use std::collections::BTreeMap;

use crate::domain::types::FullName;
use crate::domain::user::{NewUser, UserFilter};
use crate::dto::users::UsersPageData;
use crate::pagination::{
    LinkOptions, Paginator, PaginatorProcessor, RequestContext, UrlGenerator,
};
use crate::repository::{UserReader, UserWriter};
use crate::services::ServiceResult;

/// Title and sort key of every sortable column of the users table.
pub const USER_COLUMNS: [(&str, &str); 2] = [("ID", "id"), ("Full name", "full_name")];

/// Loads one page of users for the current request.
///
/// The request's `search` parameter filters by full name, `page`, `pageSize`,
/// `sortBy` and `sortOrder` drive the paging and ordering.
pub fn load_users_page<R>(
    repo: &R,
    request: Option<&dyn RequestContext>,
    router: &dyn UrlGenerator,
    default_page_size: usize,
) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    let mut processor = PaginatorProcessor::new(request, router);

    let search_query = processor
        .search()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let page = processor.page().unwrap_or(1);

    let mut filter = UserFilter::default();
    if let Some(term) = &search_query {
        filter = filter.full_name(term.clone());
    }

    let users = Paginator::new(request)
        .with_page_size(default_page_size)
        .paginate(repo.users_query(filter), page, None)?;

    let columns = USER_COLUMNS
        .iter()
        .map(|(title, key)| {
            processor.sortable(title, *key, LinkOptions::default(), BTreeMap::new())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UsersPageData {
        users,
        columns,
        search_query,
    })
}

/// Validates the names and stores one user per name.
pub fn add_users<R>(repo: &R, names: &[String]) -> ServiceResult<usize>
where
    R: UserWriter + ?Sized,
{
    let new_users = names
        .iter()
        .map(|name| FullName::new(name.as_str()).map(NewUser::new))
        .collect::<Result<Vec<_>, _>>()?;

    let created = repo.create_users(&new_users).map_err(|err| {
        log::error!("Failed to add users: {err}");
        err
    })?;

    Ok(created)
}
