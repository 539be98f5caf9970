//! URL generation for named routes.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// How much of the URL a generator should produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UrlReference {
    /// `/path?query`
    #[default]
    AbsolutePath,
    /// `scheme://host/path?query`
    AbsoluteUrl,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("route `{0}` does not exist")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{parameter}`")]
    MissingParameter { route: String, parameter: String },

    #[error("route `{0}` has a malformed path template")]
    MalformedTemplate(String),

    #[error("failed to encode query string: {0}")]
    Encoding(String),
}

/// Capability turning a route name and parameters into a URL.
pub trait UrlGenerator {
    fn generate(
        &self,
        route: &str,
        parameters: &BTreeMap<String, String>,
        reference: UrlReference,
    ) -> Result<String, RoutingError>;
}

/// Named path templates such as `/hubs/{hub}/users`.
///
/// Placeholders consume the parameter with the same name, the remaining
/// parameters end up in the query string.
#[derive(Clone, Debug, Default)]
pub struct RouteMap {
    base_url: String,
    routes: HashMap<String, String>,
}

impl RouteMap {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: HashMap::new(),
        }
    }

    pub fn route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(name.into(), template.into());
        self
    }

    fn expand(
        &self,
        route: &str,
        template: &str,
        parameters: &mut BTreeMap<String, String>,
    ) -> Result<String, RoutingError> {
        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| RoutingError::MalformedTemplate(route.to_string()))?;
            let name = &rest[start + 1..end];
            let value = parameters
                .remove(name)
                .ok_or_else(|| RoutingError::MissingParameter {
                    route: route.to_string(),
                    parameter: name.to_string(),
                })?;
            path.push_str(&urlencoding::encode(&value));
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}

impl UrlGenerator for RouteMap {
    fn generate(
        &self,
        route: &str,
        parameters: &BTreeMap<String, String>,
        reference: UrlReference,
    ) -> Result<String, RoutingError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| RoutingError::UnknownRoute(route.to_string()))?;

        let mut remaining = parameters.clone();
        let mut url = self.expand(route, template, &mut remaining)?;

        if !remaining.is_empty() {
            let query = serde_html_form::to_string(&remaining)
                .map_err(|e| RoutingError::Encoding(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }

        Ok(match reference {
            UrlReference::AbsolutePath => url,
            UrlReference::AbsoluteUrl => format!("{}{url}", self.base_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn router() -> RouteMap {
        RouteMap::new("https://app.example.com/")
            .route("users", "/api/v1/users")
            .route("hub_users", "/hubs/{hub}/users")
    }

    #[test]
    fn placeholders_consume_parameters() {
        let url = router()
            .generate(
                "hub_users",
                &params(&[("hub", "a b"), ("page", "1")]),
                UrlReference::AbsolutePath,
            )
            .unwrap();
        assert_eq!(url, "/hubs/a%20b/users?page=1");
    }

    #[test]
    fn absolute_url_prefixes_base() {
        let url = router()
            .generate("users", &BTreeMap::new(), UrlReference::AbsoluteUrl)
            .unwrap();
        assert_eq!(url, "https://app.example.com/api/v1/users");
    }

    #[test]
    fn plus_in_values_survives_encoding() {
        let url = router()
            .generate(
                "users",
                &params(&[("sortBy", "a+b")]),
                UrlReference::AbsolutePath,
            )
            .unwrap();
        assert_eq!(url, "/api/v1/users?sortBy=a%2Bb");
    }

    #[test]
    fn unknown_route_and_missing_parameter_fail() {
        assert_eq!(
            router().generate("nope", &BTreeMap::new(), UrlReference::AbsolutePath),
            Err(RoutingError::UnknownRoute("nope".to_string()))
        );
        assert!(matches!(
            router().generate("hub_users", &BTreeMap::new(), UrlReference::AbsolutePath),
            Err(RoutingError::MissingParameter { .. })
        ));
    }
}
