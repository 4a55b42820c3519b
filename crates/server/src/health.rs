use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::directory::CustomerDirectory;

#[derive(Clone)]
pub struct HealthState {
    directory: Arc<CustomerDirectory>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub storage: HealthCheck,
    pub checked_at: String,
}

pub fn router(directory: Arc<CustomerDirectory>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { directory })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = storage_check(&state.directory).await;
    let ready = storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "custdir-server runtime initialized".to_string(),
        },
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn storage_check(directory: &CustomerDirectory) -> HealthCheck {
    match directory.record_count().await {
        Ok(count) => {
            HealthCheck { status: "ready", detail: format!("customer file loaded ({count} records)") }
        }
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("customer file unreadable: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use custdir_core::config::AppConfig;
    use custdir_db::JsonFileCustomerRepository;
    use tempfile::TempDir;

    use crate::directory::CustomerDirectory;
    use crate::health::{health, HealthState};

    fn state_for(path: std::path::PathBuf) -> State<HealthState> {
        let repository = Arc::new(JsonFileCustomerRepository::new(path));
        let directory = CustomerDirectory::new(repository, &AppConfig::default().directory);
        State(HealthState { directory: Arc::new(directory) })
    }

    #[tokio::test]
    async fn health_returns_ready_when_customer_file_loads() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(&path, "[]").expect("write customers file");

        let (status, Json(payload)) = health(state_for(path)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.storage.status, "ready");
        assert!(payload.storage.detail.contains("0 records"));
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_when_customer_file_is_corrupt() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(&path, "{ broken").expect("write customers file");

        let (status, Json(payload)) = health(state_for(path)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.storage.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
