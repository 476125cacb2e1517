//! Testing utilities. Also enabled with the test_utils feature.
pub mod route_builder;
pub mod test_context;
