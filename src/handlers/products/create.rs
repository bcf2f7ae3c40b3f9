use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use crate::database::models::Product;
use crate::error::{ApiError, ProductError};
use crate::services::verify_store_owner;
use crate::state::AppState;
use crate::validation::{validate_create_product, CreateProductRequest};

const OPERATION: &str = "PRODUCTS_POST";

/// POST /:store_id/products - Create a product and its images
pub async fn post(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    create_product(&state, &store_id, &headers, body)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error(OPERATION))
}

async fn create_product(
    state: &AppState,
    store_id: &str,
    headers: &HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Product, ProductError> {
    // Anonymous callers are turned away before the body is looked at
    let identity = state
        .identity
        .resolve_caller(headers)
        .await
        .ok_or(ProductError::Unauthenticated)?;

    let Json(body) = body.map_err(|e| {
        tracing::debug!("Rejected product body: {}", e.body_text());
        ProductError::MalformedBody
    })?;
    let valid = validate_create_product(CreateProductRequest::from_json(body), Some(store_id))?;

    verify_store_owner(state.store.as_ref(), valid.product.store_id, Some(&identity)).await?;

    let product = state
        .store
        .create_product_with_images(valid.product, valid.images)
        .await?;

    tracing::info!(
        product_id = %product.id,
        store_id = %product.store_id,
        images = product.images.len(),
        "product created"
    );
    Ok(product)
}
