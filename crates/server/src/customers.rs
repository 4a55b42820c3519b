//! Customer directory HTTP routes.
//!
//! - `GET  /customers`: search by name or city with page/limit pagination
//! - `GET  /customers/{id}`: fetch a single customer
//! - `POST /customers`: create a customer whose city and company already exist
//! - `GET  /cities`: distinct cities with customer counts

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use custdir_core::{
    ApplicationError, CityCount, Customer, CustomerFilter, CustomerId, DomainError,
    InterfaceError, NewCustomer,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::directory::CustomerDirectory;

#[derive(Clone)]
pub struct CustomersState {
    directory: Arc<CustomerDirectory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCustomersQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn router(directory: Arc<CustomerDirectory>) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{id}", get(get_customer))
        .route("/cities", get(list_cities))
        .with_state(CustomersState { directory })
}

async fn list_customers(
    State(state): State<CustomersState>,
    query: Result<Query<ListCustomersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Customer>>> {
    let correlation_id = correlation_id();

    let Query(query) = query.map_err(|rejection| {
        malformed_request(&correlation_id, "query string", rejection.body_text())
    })?;

    let page = state
        .directory
        .page_request(query.page.as_deref(), query.limit.as_deref())
        .map_err(|error| reject(error, &correlation_id))?;
    let filter = CustomerFilter::new(
        query.first_name.as_deref(),
        query.last_name.as_deref(),
        query.city.as_deref(),
    );

    let customers =
        state.directory.list(&filter, page).await.map_err(|error| reject(error, &correlation_id))?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<CustomersState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Customer>> {
    let correlation_id = correlation_id();

    let Some(id) = CustomerId::parse(&raw_id) else {
        return Err(reject(DomainError::CustomerNotFound { id: None }.into(), &correlation_id));
    };

    let customer = state.directory.get(id).await.map_err(|error| reject(error, &correlation_id))?;
    Ok(Json(customer))
}

async fn list_cities(State(state): State<CustomersState>) -> ApiResult<Json<Vec<CityCount>>> {
    let correlation_id = correlation_id();

    let cities =
        state.directory.list_cities().await.map_err(|error| reject(error, &correlation_id))?;
    Ok(Json(cities))
}

async fn create_customer(
    State(state): State<CustomersState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let correlation_id = correlation_id();

    let payload = decode_new_customer(&headers, &body).map_err(|rejection| {
        malformed_request(&correlation_id, "create payload", rejection.body_text())
    })?;

    let created = state
        .directory
        .create(payload, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// A blank body or a non-JSON content type decodes to an empty payload.
fn decode_new_customer(headers: &HeaderMap, body: &[u8]) -> Result<NewCustomer, JsonRejection> {
    if body.iter().all(u8::is_ascii_whitespace) || !has_json_content_type(headers) {
        return Ok(NewCustomer::default());
    }

    Json::<NewCustomer>::from_bytes(body).map(|Json(payload)| payload)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn malformed_request(
    correlation_id: &str,
    part: &'static str,
    reason: String,
) -> (StatusCode, Json<ApiError>) {
    warn!(
        event_name = "directory.request.malformed",
        correlation_id = %correlation_id,
        part,
        reason = %reason,
        "request could not be decoded"
    );
    (StatusCode::BAD_REQUEST, Json(ApiError { error: reason }))
}

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn reject(error: ApplicationError, correlation_id: &str) -> (StatusCode, Json<ApiError>) {
    let interface = error.into_interface(correlation_id);

    let status = match &interface {
        InterfaceError::BadRequest { message, .. } => {
            warn!(
                event_name = "directory.request.rejected",
                correlation_id = %correlation_id,
                reason = %message,
                "request failed validation"
            );
            StatusCode::BAD_REQUEST
        }
        InterfaceError::NotFound { .. } => {
            info!(
                event_name = "directory.customer.not_found",
                correlation_id = %correlation_id,
                "customer lookup missed"
            );
            StatusCode::NOT_FOUND
        }
        InterfaceError::Internal { message, .. } => {
            error!(
                event_name = "directory.request.failed",
                correlation_id = %correlation_id,
                error = %message,
                "customer store operation failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ApiError { error: interface.user_message().to_string() }))
}
