use serde::Serialize;

use crate::domain::types::{FullName, UserId};

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub full_name: FullName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: FullName,
}

impl NewUser {
    #[must_use]
    pub fn new(full_name: FullName) -> Self {
        Self { full_name }
    }
}

/// Filter applied to the users listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring matched against the full name.
    pub full_name: Option<String>,
}

impl UserFilter {
    pub fn full_name(mut self, term: impl Into<String>) -> Self {
        self.full_name = Some(term.into());
        self
    }
}
