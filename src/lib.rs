//! SurfsUp: read-only REST API over the Hawaii climate observation database.

pub mod config;
pub mod dates;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use dates::ObsDate;
pub use error::{AppError, ConfigError, SchemaError};
pub use response::TemperatureSummary;
pub use routes::{app, climate_routes, common_routes};
pub use schema::{reflect, ReflectedSchema, Station};
pub use service::{ClimateService, TemperatureStats};
pub use state::AppState;
pub use store::ClimateStore;
