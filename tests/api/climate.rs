use crate::helpers::{spawn_app, spawn_with, Row, KANEOHE, SEED, STATIONS, WAIHEE, WAIKIKI};
use axum::http::StatusCode;
use serde_json::json;
use surfsup_api::{ClimateService, ObsDate};

#[tokio::test]
async fn home_lists_every_route() {
    let app = spawn_app().await;
    let (status, html) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/&lt;start&gt;",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
    ] {
        assert!(html.contains(route), "missing {}", route);
    }
}

#[tokio::test]
async fn precipitation_covers_last_365_days() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    // 2016-08-23 is the cutoff itself and must be excluded. Duplicate dates keep the last stored row.
    assert_eq!(
        body,
        json!({
            "2016-08-24": 1.5,
            "2017-01-05": 0.1,
            "2017-01-15": 0.0,
            "2017-01-25": null,
            "2017-08-22": 0.4,
            "2017-08-23": 0.0,
        })
    );
}

#[tokio::test]
async fn precipitation_never_returns_dates_at_or_before_cutoff() {
    let app = spawn_app().await;
    let cutoff = ObsDate::parse("2017-01-15").unwrap();
    let data = ClimateService::precipitation_since(&app.store, &cutoff).await.unwrap();
    assert!(!data.is_empty());
    assert!(data.keys().all(|d| d.as_str() > cutoff.as_str()));
}

#[tokio::test]
async fn stations_returns_id_name_pairs() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    let pairs = body.as_array().unwrap();
    assert_eq!(pairs.len(), STATIONS.len());
    assert!(pairs.iter().all(|p| p.as_array().map(|a| a.len()) == Some(2)));
    assert!(pairs.contains(&json!([WAIHEE, "WAIHEE 837.5, HI US"])));
}

#[tokio::test]
async fn measured_stations_exist_in_station_table() {
    let app = spawn_app().await;
    let known: Vec<String> = ClimateService::all_stations(&app.store)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.station)
        .collect();
    let activity = ClimateService::station_activity(&app.store).await.unwrap();
    for (station, _) in activity {
        assert!(known.contains(&station), "{} has measurements but no station row", station);
    }
}

#[tokio::test]
async fn tobs_uses_most_active_station() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "2016-08-24": 75.0,
            "2017-01-05": 58.0,
            "2017-01-15": 60.0,
            "2017-01-25": 62.0,
            "2017-08-23": 77.0,
        })
    );
}

#[tokio::test]
async fn most_active_station_has_max_count() {
    let app = spawn_app().await;
    let busiest = ClimateService::most_active_station(&app.store).await.unwrap();
    assert_eq!(busiest, WAIHEE);
    let activity = ClimateService::station_activity(&app.store).await.unwrap();
    let busiest_count = activity.iter().find(|(s, _)| *s == busiest).unwrap().1;
    assert!(activity.iter().all(|(_, n)| *n <= busiest_count));
}

#[tokio::test]
async fn most_active_tie_goes_to_smallest_station_id() {
    let rows: &[Row] = &[
        (WAIKIKI, "2017-01-01", None, 70.0),
        (WAIKIKI, "2017-01-02", None, 71.0),
        (KANEOHE, "2017-01-01", None, 72.0),
        (KANEOHE, "2017-01-02", None, 73.0),
    ];
    let app = spawn_with(rows, STATIONS).await;
    let busiest = ClimateService::most_active_station(&app.store).await.unwrap();
    assert_eq!(busiest, KANEOHE);
}

#[tokio::test]
async fn bounded_range_returns_min_max_avg() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/2017-01-01/2017-01-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"TMIN": "58 F", "TMAX": "62 F", "TAVG": "60 F"}));
}

#[tokio::test]
async fn open_range_includes_start_date() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/2017-01-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["TMIN"], "60 F");
    assert_eq!(body["TMAX"], "77 F");
}

#[tokio::test]
async fn stats_are_ordered_min_avg_max() {
    let app = spawn_app().await;
    let station = ClimateService::most_active_station(&app.store).await.unwrap();
    let windows = [
        ("2016-01-01", Some("2017-12-31")),
        ("2016-08-24", Some("2017-01-15")),
        ("2017-01-05", None),
        ("2017-08-23", Some("2017-08-23")),
    ];
    for (start, end) in windows {
        let start = ObsDate::parse(start).unwrap();
        let end = end.map(|e| ObsDate::parse(e).unwrap());
        let stats = ClimateService::temperature_stats_for(&app.store, &station, &start, end.as_ref())
            .await
            .unwrap();
        let (min, max, avg) = (stats.min.unwrap(), stats.max.unwrap(), stats.avg.unwrap());
        assert!(min <= avg && avg <= max, "{:?} for {}..{:?}", stats, start, end);
    }
}

#[tokio::test]
async fn future_start_returns_null_aggregates() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/v1.0/9999-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"TMIN": null, "TMAX": null, "TAVG": null}));
}

#[tokio::test]
async fn malformed_dates_are_rejected_with_400() {
    let app = spawn_app().await;
    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017-1-1",
        "/api/v1.0/2017-02-30",
        "/api/v1.0/2017-01-01/not-a-date",
    ] {
        let (status, body) = app.get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "bad_request");
    }
}

#[tokio::test]
async fn empty_dataset_reports_no_data() {
    let app = spawn_with(&[], STATIONS).await;
    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/2017-01-01"] {
        let (status, body) = app.get_json(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"]["code"], "no_data");
    }
}

#[tokio::test]
async fn most_recent_date_is_max_date() {
    let app = spawn_app().await;
    let latest = ClimateService::most_recent_date(&app.store).await.unwrap();
    assert_eq!(latest.as_str(), "2017-08-23");
    assert!(SEED.iter().all(|(_, d, _, _)| *d <= latest.as_str()));
}

#[tokio::test]
async fn malformed_stored_date_is_an_integrity_error() {
    let rows: &[Row] = &[(WAIHEE, "2017-08-23", Some(0.1), 70.0), (WAIHEE, "2017/08/24", Some(0.2), 71.0)];
    let app = spawn_with(rows, STATIONS).await;
    let (status, body) = app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "data_integrity");
}
