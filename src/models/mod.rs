//! Database models and configuration.

pub mod config;
pub mod user;
