//! Routes for [axum::Router].

pub mod fallback;
pub mod pages;
pub mod ping;
pub mod verification;
