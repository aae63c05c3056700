use std::sync::Arc;

use shopfront_core::catalog::{Catalog, FilterMode, SeedError};
use shopfront_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog seed rejected: {0}")]
    Seed(#[from] SeedError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let catalog = match &config.catalog.seed_path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::from_embedded_seed()?,
    };

    info!(
        event_name = "system.bootstrap.catalog_loaded",
        products = catalog.len(),
        seed = %config
            .catalog
            .seed_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "catalog seed loaded and validated"
    );

    Ok(Application { config, catalog: Arc::new(catalog) })
}

impl Application {
    pub fn filter_mode(&self) -> FilterMode {
        if self.config.catalog.strict_filters {
            FilterMode::Strict
        } else {
            FilterMode::Permissive
        }
    }
}
