//! Axum middleware.

pub mod request_ulid;
