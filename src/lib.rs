use axum::extract::FromRef;
use std::sync::Arc;

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod financing;
pub mod inventory;
pub mod models;
pub mod routes;
pub mod seed;

pub use catalog::Catalog;
pub use financing::{compute_loan, LoanParameters, LoanResult};
pub use inventory::{filter_and_sort, FilterCriteria, SortKey};

use crate::cache::ListingCache;
use crate::config::Settings;

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<Catalog>,
    pub listing_cache: Arc<ListingCache>,
}

impl AppState {
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        let listing_cache = ListingCache::new(settings.cache_capacity);
        Self {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            listing_cache: Arc::new(listing_cache),
        }
    }
}
