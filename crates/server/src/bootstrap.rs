use std::sync::Arc;

use axum::Router;
use custdir_core::config::AppConfig;
use custdir_db::{CustomerRepository, JsonFileCustomerRepository, RepositoryError};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{customers, directory::CustomerDirectory, health};

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("customer data file could not be loaded: {0}")]
    Storage(#[source] RepositoryError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        data_file = %config.storage.data_file.display(),
        "starting application bootstrap"
    );

    let repository = JsonFileCustomerRepository::new(&config.storage.data_file);
    let existing = repository.load_all().await.map_err(BootstrapError::Storage)?;
    info!(
        event_name = "system.bootstrap.storage_loaded",
        correlation_id = "bootstrap",
        customer_count = existing.len(),
        "customer data file loaded"
    );

    let directory = Arc::new(CustomerDirectory::new(Arc::new(repository), &config.directory));
    let router = app_router(directory);

    Ok(Application { config, router })
}

pub fn app_router(directory: Arc<CustomerDirectory>) -> Router {
    Router::new()
        .merge(customers::router(directory.clone()))
        .merge(health::router(directory))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use custdir_core::config::AppConfig;
    use custdir_db::{JsonFileCustomerRepository, SeedDataset};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::bootstrap::{bootstrap_with_config, BootstrapError};

    fn config_for(path: std::path::PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.data_file = path;
        config
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_without_customer_file() {
        let dir = TempDir::new().expect("tempdir");

        let result = bootstrap_with_config(config_for(dir.path().join("absent.json"))).await;

        assert!(matches!(result, Err(BootstrapError::Storage(_))));
        let message = result.err().expect("error").to_string();
        assert!(message.contains("customer data file"));
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_corrupt_customer_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(&path, "[{\"id\": \"one\"}]").expect("write customers file");

        let result = bootstrap_with_config(config_for(path)).await;

        assert!(matches!(result, Err(BootstrapError::Storage(_))));
    }

    #[tokio::test]
    async fn bootstrap_wires_directory_over_seeded_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        SeedDataset::load(&JsonFileCustomerRepository::new(&path)).await.expect("seed file");

        let app =
            bootstrap_with_config(config_for(path.clone())).await.expect("bootstrap should succeed");

        assert_eq!(app.config.storage.data_file, path);

        let request =
            Request::builder().uri("/customers?limit=100").body(Body::empty()).expect("request");
        let response = app.router.oneshot(request).await.expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
        assert_eq!(body.as_array().map(Vec::len), Some(SeedDataset::customers().len()));
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(&path, "[]").expect("write customers file");

        let app =
            bootstrap_with_config(config_for(path)).await.expect("bootstrap should succeed");
        let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
        let response = app.router.oneshot(request).await.expect("router should respond");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
