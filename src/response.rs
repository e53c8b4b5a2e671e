//! Response bodies for the climate routes.

use crate::service::TemperatureStats;
use serde::Serialize;

/// `{"TMIN": "58 F", "TMAX": "62 F", "TAVG": "60 F"}`; absent aggregates are `null`.
#[derive(Serialize, Debug, PartialEq)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub tmin: Option<String>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<String>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<String>,
}

/// Shortest decimal form of the value with a Fahrenheit suffix: `58 F`, `60.5 F`.
pub fn fahrenheit(value: f64) -> String {
    format!("{} F", value)
}

impl From<TemperatureStats> for TemperatureSummary {
    fn from(stats: TemperatureStats) -> Self {
        TemperatureSummary {
            tmin: stats.min.map(fahrenheit),
            tmax: stats.max.map(fahrenheit),
            tavg: stats.avg.map(fahrenheit),
        }
    }
}

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}
