#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unreachable_pub)]

//! avs-server

pub mod app_state;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod settings;
pub mod setups;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;
