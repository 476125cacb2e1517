//! Main [axum::Router] interface for webserver.

use crate::{
    app_state::AppState,
    routes::{fallback::notfound_404, pages, ping, verification},
    setups::ServerSetup,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Setup main router for application.
pub fn setup_app_router<S: ServerSetup>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/start-avs", post(verification::start_avs::<S>))
        .route("/yoti-callback", get(verification::yoti_callback::<S>))
        .route("/success", get(pages::success))
        .route("/ping", get(ping::get))
        .fallback(notfound_404)
        .with_state(app_state)
}
