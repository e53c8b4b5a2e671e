//! Climate handlers: landing page, precipitation, stations, tobs and temperature statistics.

use crate::error::AppError;
use crate::extractors::dates::DateRange;
use crate::response::TemperatureSummary;
use crate::service::ClimateService;
use crate::state::AppState;
use axum::{extract::State, response::Html, Json};
use std::collections::BTreeMap;

pub const HOME_PAGE: &str = concat!(
    "<strong>Available Endpoints:</strong><br/>",
    "<strong>Static Queries:</strong><br/>",
    "&emsp;/api/v1.0/precipitation<br/>",
    "&emsp;/api/v1.0/stations<br/>",
    "&emsp;/api/v1.0/tobs<br/>",
    "<strong>Dynamic Queries:</strong><br/>",
    "&emsp;/api/v1.0/&lt;start&gt;<br/>",
    "&emsp;/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>",
    "Date format: YYYY-MM-DD"
);

/// GET /: route listing.
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// GET /api/v1.0/precipitation: last year of precipitation keyed by date.
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, AppError> {
    let cutoff = ClimateService::most_recent_date(&state.store).await?.one_year_before()?;
    tracing::debug!(%cutoff, "precipitation window");
    let data = ClimateService::precipitation_since(&state.store, &cutoff).await?;
    Ok(Json(data))
}

/// GET /api/v1.0/stations: `[[station, name], ...]`.
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<(String, String)>>, AppError> {
    let rows = ClimateService::all_stations(&state.store).await?;
    Ok(Json(rows.into_iter().map(|s| (s.station, s.name)).collect()))
}

/// GET /api/v1.0/tobs: last year of observed temperatures at the most active station.
pub async fn tobs(State(state): State<AppState>) -> Result<Json<BTreeMap<String, f64>>, AppError> {
    let cutoff = ClimateService::most_recent_date(&state.store).await?.one_year_before()?;
    let station = ClimateService::most_active_station(&state.store).await?;
    tracing::debug!(%cutoff, %station, "tobs window");
    let data = ClimateService::temperatures_since(&state.store, &station, &cutoff).await?;
    Ok(Json(data))
}

/// GET /api/v1.0/:start and /api/v1.0/:start/:end: TMIN/TMAX/TAVG at the most active station.
pub async fn temperature_stats(
    State(state): State<AppState>,
    range: DateRange,
) -> Result<Json<TemperatureSummary>, AppError> {
    let station = ClimateService::most_active_station(&state.store).await?;
    let stats =
        ClimateService::temperature_stats_for(&state.store, &station, &range.start, range.end.as_ref()).await?;
    Ok(Json(stats.into()))
}
