//! Mi Biblioteca
//!
//! A personal library catalog server exposing a REST JSON API for
//! creating, updating, filtering and searching book records held in memory.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around a single catalog, seeded when configured
    pub fn new(config: AppConfig) -> Self {
        let repository = if config.catalog.seed_samples {
            repository::Repository::with_books(models::Book::samples())
        } else {
            repository::Repository::new()
        };

        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
