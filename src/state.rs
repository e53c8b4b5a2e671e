//! Shared application state for all routes.

use crate::store::ClimateStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ClimateStore,
}
