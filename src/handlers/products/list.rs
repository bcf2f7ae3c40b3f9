use axum::{
    extract::{Path, RawQuery, State},
    Json,
};

use crate::database::models::Product;
use crate::error::{ApiError, ProductError};
use crate::filter::{compile, Expand, FilterSpec, Sort};
use crate::state::AppState;
use crate::validation::{parse_store_id, ValidationError};

const OPERATION: &str = "PRODUCTS_GET";

/// GET /:store_id/products - Non-archived products of a store, newest first
///
/// Optional query parameters: `categoryId`, `colorId`, `sizeId`, `isFeatured`.
pub async fn get(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Product>>, ApiError> {
    list_products(&state, &store_id, query.as_deref())
        .await
        .map(Json)
        .map_err(|e| e.into_api_error(OPERATION))
}

async fn list_products(state: &AppState, store_id: &str, query: Option<&str>) -> Result<Vec<Product>, ProductError> {
    let store_id = match parse_store_id(store_id) {
        Ok(id) => id,
        // No store has a malformed id, so nothing can be listed for it
        Err(ValidationError::Invalid(_)) => return Ok(Vec::new()),
        Err(missing) => return Err(missing.into()),
    };

    let spec = FilterSpec::from_query(query);
    let predicate = compile(store_id, &spec);
    let products = state
        .store
        .list_products(&predicate, Sort::default(), Expand::all())
        .await?;

    tracing::debug!(%store_id, count = products.len(), "listed products");
    Ok(products)
}
