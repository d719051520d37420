use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use tienda_store::ProductRepository;

#[derive(Clone)]
pub struct HealthState {
    repository: Arc<dyn ProductRepository>,
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

pub fn router(repository: Arc<dyn ProductRepository>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { repository })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = storage_check(state.repository.as_ref()).await;
    let ready = storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "tienda-server runtime initialized".to_string(),
        },
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn storage_check(repository: &dyn ProductRepository) -> HealthCheck {
    match repository.list_active().await {
        Ok(products) => HealthCheck {
            status: "ready",
            detail: format!("catalog readable ({} active products)", products.len()),
        },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("catalog read failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Json;
    use tempfile::TempDir;

    use tienda_store::JsonFileRepository;

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_reports_ready_with_a_readable_catalog() {
        let dir = TempDir::new().expect("temp dir");
        let repository = JsonFileRepository::open(dir.path().join("products.json"))
            .await
            .expect("open repository");

        let (status, Json(payload)) =
            health(State(HealthState { repository: Arc::new(repository) })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.storage.status, "ready");
        assert!(payload.storage.detail.contains("5 active products"));
    }
}
