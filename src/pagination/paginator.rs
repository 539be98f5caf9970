//! Executes an [`OrderableQuery`] one page at a time.

use serde::Serialize;

use crate::pagination::intent::{RequestContext, RequestIntent};
use crate::pagination::pages::PageStrip;
use crate::pagination::query::{
    CountStrategy, OrderClause, OrderableQuery, QueryError, QueryWindow,
};

/// Page size used when neither the request nor the caller asks for one.
pub const PAGE_SIZE: usize = 10;

pub const INVALID_DIRECTION_WARNING: &str = "invalid sort direction";

/// One page of results together with navigation metadata.
#[derive(Debug, Serialize)]
pub struct PageWindow<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
    total_count: usize,
    warnings: Vec<String>,
}

impl<T> PageWindow<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn last_page(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn previous_page(&self) -> usize {
        self.current_page.saturating_sub(1).max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn next_page(&self) -> usize {
        self.last_page().min(self.current_page.saturating_add(1))
    }

    pub fn needs_pagination(&self) -> bool {
        self.total_count > self.page_size
    }

    /// Page numbers to render in a pager, `None` marking a gap.
    pub fn pages(&self) -> Vec<Option<usize>> {
        PageStrip::default().pages(self.last_page(), self.current_page)
    }
}

impl<T> IntoIterator for PageWindow<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Applies the request's sort intent to a query and loads one page of it.
pub struct Paginator<'r> {
    request: Option<&'r dyn RequestContext>,
    page_size: usize,
}

impl<'r> Paginator<'r> {
    pub fn new(request: Option<&'r dyn RequestContext>) -> Self {
        Self {
            request,
            page_size: PAGE_SIZE,
        }
    }

    /// Overrides the fallback page size. Zero keeps [`PAGE_SIZE`].
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    /// Loads page `page` of `query`.
    ///
    /// A `pageSize` request parameter beats `page_size`, which beats the
    /// paginator's own default. Sorting by a field the query does not know is
    /// retried once with the query's original ordering and reported as a
    /// warning. Any other failure is returned as is.
    pub fn paginate<Q>(
        &self,
        mut query: Q,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<PageWindow<Q::Item>, QueryError>
    where
        Q: OrderableQuery,
    {
        let intent = RequestIntent::from_request(self.request);

        let page_size = intent
            .page_size()
            .or(page_size.filter(|size| *size > 0))
            .unwrap_or(self.page_size);
        let current_page = page.max(1);
        // Past the addressable range the window simply lands beyond the data.
        let window = QueryWindow {
            offset: (current_page - 1).saturating_mul(page_size),
            limit: page_size,
        };

        let default_order = query.order_by();
        let mut warnings = Vec::new();

        if let Some(sort) = intent.sort_key() {
            match intent.direction() {
                Some(direction) => {
                    let clauses = intent
                        .sort_fields()
                        .into_iter()
                        .map(|field| OrderClause::new(field, direction))
                        .collect();
                    query.set_order_by(clauses);
                }
                None => {
                    log::warn!("Ignoring sort by '{sort}': invalid sort direction");
                    warnings.push(INVALID_DIRECTION_WARNING.to_string());
                }
            }
        }

        let items = match query.fetch(window, CountStrategy::for_query(&query)) {
            Ok(items) => items,
            Err(QueryError::UnknownField(field)) if intent.is_sorted() => {
                let sort = intent.sort_key().unwrap_or_default();
                log::warn!("Cannot sort by '{sort}' ({field} is unknown), using default ordering");
                query.set_order_by(default_order);
                warnings.push(format!("cannot sort by '{sort}'"));
                query.fetch(window, CountStrategy::for_query(&query))?
            }
            Err(err) => return Err(err),
        };

        let total_count = query.count(CountStrategy::for_query(&query))?;

        Ok(PageWindow {
            items,
            current_page,
            page_size,
            total_count,
            warnings,
        })
    }
}
