use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use thiserror::Error;
use tracing::info;

use tienda_core::config::{AppConfig, ConfigError, LoadOptions};
use tienda_store::{JsonFileRepository, ProductRepository, RepositoryError};

use crate::health;
use crate::products::{self, CatalogState};
use crate::response::ApiError;

pub struct Application {
    pub config: AppConfig,
    pub repository: Arc<dyn ProductRepository>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog storage initialization failed: {0}")]
    Storage(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let repository = JsonFileRepository::open(&config.storage.data_file)
        .await
        .map_err(BootstrapError::Storage)?;
    info!(
        event_name = "system.bootstrap.storage_ready",
        data_file = %config.storage.data_file.display(),
        "catalog storage initialized"
    );

    Ok(Application { config, repository: Arc::new(repository) })
}

impl Application {
    pub fn router(&self) -> Router {
        let state = CatalogState {
            repository: Arc::clone(&self.repository),
            pagination: self.config.pagination.clone(),
        };

        Router::new()
            .merge(products::router(state))
            .merge(health::router(Arc::clone(&self.repository)))
            .route("/", get(service_banner))
            .fallback(unknown_route)
    }
}

async fn service_banner() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "message": "tienda product catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "products": "/api/products",
            "categories": "/api/products/categories",
            "health": "/health",
        },
    }))
}

async fn unknown_route() -> ApiError {
    ApiError::not_found("route not found")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use tienda_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_seeds_a_missing_data_file_and_builds_the_router() {
        let dir = TempDir::new().expect("temp dir");
        let data_file = dir.path().join("products.json");

        let app = bootstrap(LoadOptions {
            config_path: Some(PathBuf::from("does-not-exist.toml")),
            overrides: ConfigOverrides {
                data_file: Some(data_file.clone()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap succeeds");

        assert!(data_file.exists());
        assert_eq!(app.repository.list_active().await.expect("list").len(), 5);
        let _router = app.router();
    }
}
