//! Climate queries against the `measurement` and `station` tables.

use crate::dates::ObsDate;
use crate::error::AppError;
use crate::schema::Station;
use crate::store::ClimateStore;
use std::collections::BTreeMap;

/// Aggregates over observed temperatures. All three are `None` when no rows matched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

pub struct ClimateService;

impl ClimateService {
    /// Latest observation date across all stations.
    pub async fn most_recent_date(store: &ClimateStore) -> Result<ObsDate, AppError> {
        let latest: Option<String> = store
            .timed(sqlx::query_scalar("SELECT MAX(date) FROM measurement").fetch_one(store.pool()))
            .await?;
        let latest = latest.ok_or_else(|| AppError::NoData("measurement table is empty".into()))?;
        ObsDate::parse(&latest)
            .map_err(|_| AppError::Integrity(format!("latest measurement date is malformed: {}", latest)))
    }

    /// Station with the most measurement rows; ties go to the smallest station id.
    pub async fn most_active_station(store: &ClimateStore) -> Result<String, AppError> {
        let row: Option<(String, i64)> = store
            .timed(
                sqlx::query_as(
                    "SELECT station, COUNT(*) AS n FROM measurement GROUP BY station ORDER BY n DESC, station ASC LIMIT 1",
                )
                .fetch_optional(store.pool()),
            )
            .await?;
        row.map(|(station, _)| station)
            .ok_or_else(|| AppError::NoData("measurement table is empty".into()))
    }

    /// Per-station row counts, busiest first.
    pub async fn station_activity(store: &ClimateStore) -> Result<Vec<(String, i64)>, AppError> {
        store
            .timed(
                sqlx::query_as(
                    "SELECT station, COUNT(*) AS n FROM measurement GROUP BY station ORDER BY n DESC, station ASC",
                )
                .fetch_all(store.pool()),
            )
            .await
    }

    /// Precipitation for every date strictly after `cutoff`. Several rows can share a date (one per
    /// station); the last one in storage order wins.
    pub async fn precipitation_since(
        store: &ClimateStore,
        cutoff: &ObsDate,
    ) -> Result<BTreeMap<String, Option<f64>>, AppError> {
        let rows: Vec<(String, Option<f64>)> = store
            .timed(
                sqlx::query_as(
                    "SELECT date, CAST(prcp AS REAL) FROM measurement WHERE date > ?1 ORDER BY date, rowid",
                )
                .bind(cutoff.as_str())
                .fetch_all(store.pool()),
            )
            .await?;
        Ok(rows.into_iter().collect())
    }

    pub async fn all_stations(store: &ClimateStore) -> Result<Vec<Station>, AppError> {
        store
            .timed(sqlx::query_as("SELECT station, name FROM station").fetch_all(store.pool()))
            .await
    }

    /// Observed temperatures for one station strictly after `cutoff`.
    pub async fn temperatures_since(
        store: &ClimateStore,
        station: &str,
        cutoff: &ObsDate,
    ) -> Result<BTreeMap<String, f64>, AppError> {
        let rows: Vec<(String, f64)> = store
            .timed(
                sqlx::query_as(
                    "SELECT date, CAST(tobs AS REAL) FROM measurement WHERE station = ?1 AND date > ?2 ORDER BY date, rowid",
                )
                .bind(station)
                .bind(cutoff.as_str())
                .fetch_all(store.pool()),
            )
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// MIN/MAX/AVG of observed temperature for `station` with `start <= date` and, when given, `date <= end`.
    pub async fn temperature_stats_for(
        store: &ClimateStore,
        station: &str,
        start: &ObsDate,
        end: Option<&ObsDate>,
    ) -> Result<TemperatureStats, AppError> {
        let (min, max, avg): (Option<f64>, Option<f64>, Option<f64>) = match end {
            Some(end) => {
                store
                    .timed(
                        sqlx::query_as(
                            "SELECT CAST(MIN(tobs) AS REAL), CAST(MAX(tobs) AS REAL), CAST(AVG(tobs) AS REAL) \
                             FROM measurement WHERE station = ?1 AND date >= ?2 AND date <= ?3",
                        )
                        .bind(station)
                        .bind(start.as_str())
                        .bind(end.as_str())
                        .fetch_one(store.pool()),
                    )
                    .await?
            }
            None => {
                store
                    .timed(
                        sqlx::query_as(
                            "SELECT CAST(MIN(tobs) AS REAL), CAST(MAX(tobs) AS REAL), CAST(AVG(tobs) AS REAL) \
                             FROM measurement WHERE station = ?1 AND date >= ?2",
                        )
                        .bind(station)
                        .bind(start.as_str())
                        .fetch_one(store.pool()),
                    )
                    .await?
            }
        };
        Ok(TemperatureStats { min, max, avg })
    }
}
