//! Actix-web routes and request adapters.

use actix_web::HttpRequest;

use crate::pagination::RequestContext;

pub mod users;

impl RequestContext for HttpRequest {
    fn route_name(&self) -> Option<String> {
        self.match_name().map(str::to_string)
    }

    fn query_parameters(&self) -> Vec<(String, String)> {
        serde_html_form::from_str(self.query_string()).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed query string `{}`: {err}", self.query_string());
            Vec::new()
        })
    }

    fn route_parameters(&self) -> Vec<(String, String)> {
        self.match_info()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}
