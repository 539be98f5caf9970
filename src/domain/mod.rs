//! Domain entities listed through the paginator.

pub mod types;
pub mod user;
