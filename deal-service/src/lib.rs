pub mod config;
pub mod handlers;
pub mod report;
pub mod services;
pub mod startup;

use services::DealFinder;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub deal_finder: Arc<DealFinder>,
}

impl AppState {
    pub fn new(deal_finder: Arc<DealFinder>) -> Self {
        Self { deal_finder }
    }
}
