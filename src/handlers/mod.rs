//! HTTP handlers for the climate API and operational probes.

pub mod climate;
pub mod common;
pub use climate::*;
pub use common::*;
