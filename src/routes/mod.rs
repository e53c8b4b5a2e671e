pub mod climate;
pub mod common;

pub use climate::climate_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: climate API plus operational probes, with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(climate_routes(state.clone()))
        .merge(common_routes(state))
        .layer(TraceLayer::new_for_http())
}
