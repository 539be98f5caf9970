//! Sorting, paging and search intent derived from the current request.
//!
//! The intent is computed from an explicitly supplied [`RequestContext`]. When
//! no request is active every accessor simply reports "no preference".

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Query parameter carrying the sort key.
pub const PARAM_SORT: &str = "sortBy";
/// Query parameter carrying the sort direction.
pub const PARAM_DIRECTION: &str = "sortOrder";
/// Query parameter carrying the requested page.
pub const PARAM_PAGE: &str = "page";
/// Query parameter carrying the requested page size.
pub const PARAM_PAGE_SIZE: &str = "pageSize";
/// Query parameter carrying the free-text search term.
pub const PARAM_SEARCH: &str = "search";

/// Parameters starting with this prefix belong to the framework and are
/// never treated as user intent.
pub const RESERVED_PREFIX: char = '_';
/// Separator used to join the fields of a composite sort key.
pub const KEY_SEPARATOR: &str = "+";

/// Ordering direction requested by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parses an already normalized direction. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` when `value` is exactly `asc` or `desc`.
pub fn has_valid_direction(value: &str) -> bool {
    SortDirection::parse(value).is_some()
}

/// Read-only view of the request being handled.
pub trait RequestContext {
    /// Name of the matched route, if the router assigned one.
    fn route_name(&self) -> Option<String>;
    /// Decoded query string parameters.
    fn query_parameters(&self) -> Vec<(String, String)>;
    /// Parameters captured from the route path.
    fn route_parameters(&self) -> Vec<(String, String)>;
}

/// Owned request context, handy outside of an HTTP handler and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub route_name: Option<String>,
    pub query: Vec<(String, String)>,
    pub route_params: Vec<(String, String)>,
}

impl RequestSnapshot {
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: Some(route_name.into()),
            ..Self::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn route_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_params.push((key.into(), value.into()));
        self
    }
}

impl RequestContext for RequestSnapshot {
    fn route_name(&self) -> Option<String> {
        self.route_name.clone()
    }

    fn query_parameters(&self) -> Vec<(String, String)> {
        self.query.clone()
    }

    fn route_parameters(&self) -> Vec<(String, String)> {
        self.route_params.clone()
    }
}

/// Sort key addressing one field or several fields joined with `+`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortKey {
    Single(String),
    Composite(Vec<String>),
}

impl SortKey {
    /// The key as it travels in the `sortBy` parameter.
    pub fn joined(&self) -> String {
        match self {
            SortKey::Single(key) => key.clone(),
            SortKey::Composite(keys) => keys.join(KEY_SEPARATOR),
        }
    }
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        SortKey::Single(key.to_string())
    }
}

impl From<String> for SortKey {
    fn from(key: String) -> Self {
        SortKey::Single(key)
    }
}

impl From<Vec<String>> for SortKey {
    fn from(keys: Vec<String>) -> Self {
        SortKey::Composite(keys)
    }
}

impl From<&[&str]> for SortKey {
    fn from(keys: &[&str]) -> Self {
        SortKey::Composite(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SortKey {
    fn from(keys: [&str; N]) -> Self {
        SortKey::Composite(keys.iter().map(|k| k.to_string()).collect())
    }
}

/// Snapshot of the sorting, paging and search parameters of one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestIntent {
    route_name: String,
    parameters: BTreeMap<String, String>,
}

impl RequestIntent {
    /// Builds the intent from `request`; an absent request yields an empty
    /// intent.
    ///
    /// Route parameters override query parameters with the same key and every
    /// key starting with [`RESERVED_PREFIX`] is dropped.
    pub fn from_request(request: Option<&dyn RequestContext>) -> Self {
        let Some(request) = request else {
            return Self::default();
        };

        let mut parameters: BTreeMap<String, String> =
            request.query_parameters().into_iter().collect();
        parameters.extend(request.route_parameters());
        parameters.retain(|key, _| !key.starts_with(RESERVED_PREFIX));

        Self {
            route_name: request.route_name().unwrap_or_default(),
            parameters,
        }
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.param(PARAM_SORT)
    }

    pub fn is_sorted(&self) -> bool {
        self.sort_key().is_some()
    }

    pub fn is_sorted_for(&self, key: &SortKey) -> bool {
        self.sort_key() == Some(key.joined().as_str())
    }

    /// Individual fields of the active sort key.
    pub fn sort_fields(&self) -> Vec<&str> {
        self.sort_key()
            .map(|key| key.split(KEY_SEPARATOR).collect())
            .unwrap_or_default()
    }

    /// Requested direction, lower-cased and validated.
    ///
    /// A sort key without a direction sorts ascending. Values other than
    /// `asc`/`desc` yield `None`.
    pub fn direction(&self) -> Option<SortDirection> {
        match self.param(PARAM_DIRECTION) {
            Some(raw) => SortDirection::parse(&raw.to_lowercase()),
            None if self.is_sorted() => Some(SortDirection::Asc),
            None => None,
        }
    }

    pub fn has_direction(&self) -> bool {
        self.direction().is_some()
    }

    pub fn page(&self) -> Option<usize> {
        self.positive(PARAM_PAGE)
    }

    pub fn page_size(&self) -> Option<usize> {
        self.positive(PARAM_PAGE_SIZE)
    }

    pub fn search(&self) -> Option<&str> {
        self.param(PARAM_SEARCH)
    }

    fn positive(&self, key: &str) -> Option<usize> {
        self.param(key)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(snapshot: RequestSnapshot) -> RequestIntent {
        RequestIntent::from_request(Some(&snapshot))
    }

    #[test]
    fn absent_request_yields_empty_intent() {
        let intent = RequestIntent::from_request(None);
        assert_eq!(intent.route_name(), "");
        assert!(intent.parameters().is_empty());
        assert_eq!(intent.sort_key(), None);
        assert_eq!(intent.direction(), None);
        assert_eq!(intent.page_size(), None);
        assert_eq!(intent.search(), None);
    }

    #[test]
    fn route_parameters_win_and_reserved_keys_are_dropped() {
        let intent = intent(
            RequestSnapshot::new("users")
                .query("hub", "1")
                .query("_token", "secret")
                .query("search", "ann")
                .route_param("hub", "7")
                .route_param("_locale", "ru"),
        );

        assert_eq!(intent.route_name(), "users");
        assert_eq!(
            intent.parameters().get("hub").map(String::as_str),
            Some("7")
        );
        assert!(intent.parameters().keys().all(|k| !k.starts_with('_')));
        assert_eq!(intent.search(), Some("ann"));
    }

    #[test]
    fn direction_is_normalized_and_validated() {
        let upper = intent(
            RequestSnapshot::new("r")
                .query("sortBy", "id")
                .query("sortOrder", "DESC"),
        );
        assert_eq!(upper.direction(), Some(SortDirection::Desc));

        let defaulted = intent(RequestSnapshot::new("r").query("sortBy", "id"));
        assert_eq!(defaulted.direction(), Some(SortDirection::Asc));

        let invalid = intent(RequestSnapshot::new("r").query("sortOrder", "sideways"));
        assert_eq!(invalid.direction(), None);
        assert!(!invalid.is_sorted());

        let empty = intent(
            RequestSnapshot::new("r")
                .query("sortBy", "id")
                .query("sortOrder", ""),
        );
        assert!(!empty.has_direction());
    }

    #[test]
    fn valid_direction_is_case_sensitive() {
        assert!(has_valid_direction("asc"));
        assert!(has_valid_direction("desc"));
        assert!(!has_valid_direction("ASC"));
        assert!(!has_valid_direction(""));
    }

    #[test]
    fn composite_keys_are_joined_with_plus() {
        let intent = intent(RequestSnapshot::new("r").query("sortBy", "a+b"));
        assert!(intent.is_sorted_for(&SortKey::from(["a", "b"])));
        assert!(!intent.is_sorted_for(&SortKey::from("a")));
        assert_eq!(intent.sort_fields(), vec!["a", "b"]);
        assert_eq!(SortKey::Composite(Vec::new()).joined(), "");
    }

    #[test]
    fn numeric_parameters_ignore_zero_and_garbage() {
        let intent = intent(
            RequestSnapshot::new("r")
                .query("pageSize", "0")
                .query("page", "abc"),
        );
        assert_eq!(intent.page_size(), None);
        assert_eq!(intent.page(), None);

        let sized = RequestIntent::from_request(Some(
            &RequestSnapshot::new("r")
                .query("pageSize", "25")
                .query("page", "3"),
        ));
        assert_eq!(sized.page_size(), Some(25));
        assert_eq!(sized.page(), Some(3));
    }
}
