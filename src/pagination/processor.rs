//! Request intent accessors and sortable column links.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::pagination::intent::{
    PARAM_DIRECTION, PARAM_PAGE, PARAM_SORT, RequestContext, RequestIntent, SortDirection,
    SortKey,
};
use crate::pagination::routing::{RoutingError, UrlGenerator, UrlReference};

/// Visual state of a sortable column header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// The column is not the active sort.
    Sortable,
    Asc,
    Desc,
}

impl LinkState {
    pub const fn as_str(self) -> &'static str {
        match self {
            LinkState::Sortable => "sortable",
            LinkState::Asc => "asc",
            LinkState::Desc => "desc",
        }
    }
}

impl Display for LinkState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hints passed to [`PaginatorProcessor::sortable`].
#[derive(Clone, Debug, Default)]
pub struct LinkOptions {
    /// Route to link to instead of the current one.
    pub route: Option<String>,
    /// URL flavour; consumed while generating and never rendered.
    pub absolute: UrlReference,
    /// CSS classes; the link state is appended to them.
    pub class: Option<String>,
    /// Any other attribute forwarded untouched.
    pub attributes: BTreeMap<String, String>,
}

impl LinkOptions {
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn absolute(mut self, reference: UrlReference) -> Self {
        self.absolute = reference;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Everything a template needs to render one sortable column header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortableLink {
    pub key: String,
    pub title: String,
    pub state: LinkState,
    /// Direction requested by clicking the link; `None` clears sorting.
    pub direction: Option<SortDirection>,
    pub href: String,
    /// Link attributes, always holding `title`, `href` and `class`.
    pub options: BTreeMap<String, String>,
}

/// Reads sorting intent from the current request and builds sortable links.
pub struct PaginatorProcessor<'r> {
    request: Option<&'r dyn RequestContext>,
    router: &'r dyn UrlGenerator,
    intent: RequestIntent,
}

impl<'r> PaginatorProcessor<'r> {
    pub fn new(request: Option<&'r dyn RequestContext>, router: &'r dyn UrlGenerator) -> Self {
        Self {
            request,
            router,
            intent: RequestIntent::from_request(request),
        }
    }

    /// Rebuilds the parameter snapshot from the request.
    pub fn refresh(&mut self) {
        self.intent = RequestIntent::from_request(self.request);
    }

    pub fn intent(&self) -> &RequestIntent {
        &self.intent
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.intent.sort_key()
    }

    pub fn is_sorted(&self) -> bool {
        self.intent.is_sorted()
    }

    pub fn is_sorted_for(&self, key: &SortKey) -> bool {
        self.intent.is_sorted_for(key)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.intent.direction()
    }

    pub fn has_direction(&self) -> bool {
        self.intent.has_direction()
    }

    pub fn page(&self) -> Option<usize> {
        self.intent.page()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.intent.page_size()
    }

    pub fn search(&self) -> Option<&str> {
        self.intent.search()
    }

    /// Builds the header link for the column sorted by `key`.
    ///
    /// Clicking cycles the column through ascending, descending and unsorted.
    /// Other columns always start at ascending and the page is reset to 1.
    pub fn sortable(
        &mut self,
        title: &str,
        key: impl Into<SortKey>,
        options: LinkOptions,
        params: BTreeMap<String, String>,
    ) -> Result<SortableLink, RoutingError> {
        self.refresh();
        let key = key.into();

        let (direction, state) = match self.direction() {
            Some(SortDirection::Asc) if self.is_sorted_for(&key) => {
                (Some(SortDirection::Desc), LinkState::Asc)
            }
            Some(SortDirection::Desc) if self.is_sorted_for(&key) => (None, LinkState::Desc),
            _ => (Some(SortDirection::Asc), LinkState::Sortable),
        };

        let LinkOptions {
            route,
            absolute,
            class,
            attributes,
        } = options;

        let class = match class {
            Some(existing) => format!("{existing} {state}"),
            None => state.to_string(),
        };

        let key = key.joined();

        let mut parameters = self.intent.parameters().clone();
        parameters.extend(params);
        match direction {
            Some(direction) => {
                parameters.insert(PARAM_SORT.to_string(), key.clone());
                parameters.insert(PARAM_DIRECTION.to_string(), direction.to_string());
            }
            None => {
                parameters.remove(PARAM_SORT);
                parameters.remove(PARAM_DIRECTION);
            }
        }
        parameters.insert(PARAM_PAGE.to_string(), "1".to_string());

        let target = route
            .clone()
            .unwrap_or_else(|| self.intent.route_name().to_string());
        let href = self.router.generate(&target, &parameters, absolute)?;

        log::debug!("Sortable link for `{key}` ({state}): {href}");

        let mut rendered = attributes;
        if let Some(route) = route {
            rendered.insert("route".to_string(), route);
        }
        rendered.insert("class".to_string(), class);
        rendered.insert("title".to_string(), title.to_string());
        rendered.insert("href".to_string(), href.clone());

        Ok(SortableLink {
            key,
            title: title.to_string(),
            state,
            direction,
            href,
            options: rendered,
        })
    }
}
