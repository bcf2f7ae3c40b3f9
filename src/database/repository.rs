use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewImage, NewProduct, Product, Store};
use crate::filter::{Expand, Predicate, Sort};

/// Persistence operations the product handlers depend on.
///
/// Implementations must make `create_product_with_images` atomic: either the
/// product and every image are stored, or nothing is.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Store with the given id whose owner is `owner_id`
    async fn find_store(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Store>, DatabaseError>;

    /// Insert a product and its images as one unit. The returned product has
    /// `images` populated.
    async fn create_product_with_images(
        &self,
        product: NewProduct,
        images: Vec<NewImage>,
    ) -> Result<Product, DatabaseError>;

    async fn list_products(
        &self,
        predicate: &Predicate,
        sort: Sort,
        expand: Expand,
    ) -> Result<Vec<Product>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
