//! Shared application state for all routes.

use crate::config::PaginationConfig;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, pagination: PaginationConfig) -> Self {
        AppState { store, pagination }
    }
}
