pub mod config;
pub mod models;
pub mod controllers;
pub mod services;

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::services::{BookingService, Catalog};

// Shared state for the whole application
pub struct AppState {
    pub booking: BookingService,
    pub config: config::Config,
}

impl AppState {
    /// Loads the catalog named in `config`. A catalog that cannot be read or
    /// parsed is logged; the application carries on with whatever was loaded.
    pub async fn new(config: config::Config) -> Arc<Self> {
        let mut builder = Catalog::builder();
        if let Err(e) = builder
            .load_file(&config.catalog.path, config.catalog.has_header)
            .await
        {
            error!(error = %e, "Catalog load incomplete");
        }

        let catalog = builder.build();
        if catalog.is_empty() {
            warn!(path = %config.catalog.path.display(), "Catalog has no movies");
        } else {
            info!(
                movies = catalog.movies().len(),
                showings = catalog.showing_count(),
                "Catalog loaded"
            );
        }

        Arc::new(Self {
            booking: BookingService::new(catalog),
            config,
        })
    }
}
