//! DTOs for the users listing.

use serde::Serialize;

use crate::domain::user::User;
use crate::pagination::{PageWindow, SortableLink};

/// Data produced by [`crate::services::users::load_users_page`].
#[derive(Debug)]
pub struct UsersPageData {
    /// Page of users matching the search.
    pub users: PageWindow<User>,
    /// Header links for every sortable column.
    pub columns: Vec<SortableLink>,
    /// Search query echoed back when present.
    pub search_query: Option<String>,
}

/// Navigation metadata of a page.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub last_page: usize,
    pub has_previous_page: bool,
    pub previous_page: usize,
    pub has_next_page: bool,
    pub next_page: usize,
    pub needs_pagination: bool,
    pub pages: Vec<Option<usize>>,
}

impl<T> From<&PageWindow<T>> for PaginationMeta {
    fn from(window: &PageWindow<T>) -> Self {
        Self {
            current_page: window.current_page(),
            page_size: window.page_size(),
            total_count: window.total_count(),
            last_page: window.last_page(),
            has_previous_page: window.has_previous_page(),
            previous_page: window.previous_page(),
            has_next_page: window.has_next_page(),
            next_page: window.next_page(),
            needs_pagination: window.needs_pagination(),
            pages: window.pages(),
        }
    }
}

/// JSON body returned by `GET /api/v1/users`.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub pagination: PaginationMeta,
    pub warnings: Vec<String>,
    pub columns: Vec<SortableLink>,
    pub search: Option<String>,
}

impl From<UsersPageData> for UsersResponse {
    fn from(data: UsersPageData) -> Self {
        let pagination = PaginationMeta::from(&data.users);
        let warnings = data.users.warnings().to_vec();
        Self {
            users: data.users.into_items(),
            pagination,
            warnings,
            columns: data.columns,
            search: data.search_query,
        }
    }
}
