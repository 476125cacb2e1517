//! OpenAPI doc generation.

use crate::{
    error::AppError,
    routes::{pages, ping, verification},
};
use utoipa::OpenApi;

/// API documentation generator.
#[derive(OpenApi)]
#[openapi(
    paths(
        pages::index,
        pages::success,
        ping::get,
        verification::start_avs,
        verification::yoti_callback
    ),
    components(
        schemas(
            AppError
        )
    )
)]

/// Tied to OpenAPI documentation.
#[derive(Debug)]
pub struct ApiDoc;
