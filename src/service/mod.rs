//! ClimateService: one parameterized query per operation.

mod climate;
pub use climate::{ClimateService, TemperatureStats};
