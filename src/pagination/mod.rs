//! Request-driven pagination and sorting.
//!
//! [`PaginatorProcessor`] reads the sort/page/search intent of the current
//! request and builds sortable column links, [`Paginator`] applies that intent
//! to an [`OrderableQuery`] and returns a [`PageWindow`].

pub mod intent;
pub mod pages;
pub mod paginator;
pub mod processor;
pub mod query;
pub mod routing;

pub use intent::{RequestContext, RequestIntent, RequestSnapshot, SortDirection, SortKey};
pub use paginator::{PAGE_SIZE, PageWindow, Paginator};
pub use processor::{LinkOptions, LinkState, PaginatorProcessor, SortableLink};
pub use query::{CountStrategy, OrderClause, OrderableQuery, QueryError, QueryWindow};
pub use routing::{RouteMap, RoutingError, UrlGenerator, UrlReference};
