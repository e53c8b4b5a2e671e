//! Climate routes. Static segments take priority over the `:start` parameter.

use crate::handlers::climate::{home, precipitation, stations, temperature_stats, tobs};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn climate_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/:start", get(temperature_stats))
        .route("/api/v1.0/:start/:end", get(temperature_stats))
        .with_state(state)
}
