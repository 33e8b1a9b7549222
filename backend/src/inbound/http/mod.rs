//! HTTP inbound adapter serving the notes and news pages.

pub mod auth;
pub mod error;
pub mod news;
pub mod notes;
pub mod pages;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
