use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Color, Image, NewImage, NewProduct, Product, Size, Store};
use crate::database::repository::ProductStore;
use crate::filter::{Expand, FilterWhere, Predicate, Sort, SortDirection};

/// `ProductStore` held entirely in process memory.
///
/// Mirrors the Postgres schema's foreign keys: a product can only be created
/// for a known store, category, color and size. A create that fails those
/// checks leaves nothing behind.
#[derive(Default)]
pub struct MemoryProductStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    stores: HashMap<Uuid, Store>,
    categories: HashMap<Uuid, Category>,
    colors: HashMap<Uuid, Color>,
    sizes: HashMap<Uuid, Size>,
    products: Vec<StoredProduct>,
    images: Vec<Image>,
    next_seq: u64,
}

struct StoredProduct {
    seq: u64,
    product: Product,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_store(&self, store: Store) {
        self.state.write().await.stores.insert(store.id, store);
    }

    pub async fn insert_category(&self, category: Category) {
        self.state.write().await.categories.insert(category.id, category);
    }

    pub async fn insert_color(&self, color: Color) {
        self.state.write().await.colors.insert(color.id, color);
    }

    pub async fn insert_size(&self, size: Size) {
        self.state.write().await.sizes.insert(size.id, size);
    }

    /// Flip a stored product's archive flag. Archiving is managed outside the
    /// create/list surface; this exists to seed fixtures.
    pub async fn set_archived(&self, product_id: Uuid, archived: bool) -> Result<(), DatabaseError> {
        let mut state = self.state.write().await;
        let stored = state
            .products
            .iter_mut()
            .find(|s| s.product.id == product_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("product {}", product_id)))?;
        stored.product.is_archived = archived;
        Ok(())
    }

    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    pub async fn image_count(&self) -> usize {
        self.state.read().await.images.len()
    }
}

impl MemoryState {
    fn check_references(&self, product: &NewProduct) -> Result<(), DatabaseError> {
        let missing = if !self.stores.contains_key(&product.store_id) {
            Some(("store", product.store_id))
        } else if !self.categories.contains_key(&product.category_id) {
            Some(("category", product.category_id))
        } else if !self.colors.contains_key(&product.color_id) {
            Some(("color", product.color_id))
        } else if !self.sizes.contains_key(&product.size_id) {
            Some(("size", product.size_id))
        } else {
            None
        };

        match missing {
            Some((kind, id)) => Err(DatabaseError::QueryError(format!(
                "foreign key violation: {} {} does not exist",
                kind, id
            ))),
            None => Ok(()),
        }
    }

    fn expand(&self, mut product: Product, expand: Expand) -> Product {
        if expand.images {
            product.images = self.images.iter().filter(|i| i.product_id == product.id).cloned().collect();
        }
        if expand.category {
            product.category = self.categories.get(&product.category_id).cloned();
        }
        if expand.color {
            product.color = self.colors.get(&product.color_id).cloned();
        }
        if expand.size {
            product.size = self.sizes.get(&product.size_id).cloned();
        }
        product
    }
}

fn compare(a: &StoredProduct, b: &StoredProduct, sort: Sort) -> Ordering {
    let ascending = a
        .product
        .created_at
        .cmp(&b.product.created_at)
        .then_with(|| a.seq.cmp(&b.seq));
    match sort.created_at {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_store(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Store>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.stores.get(&id).filter(|s| s.owner_id == owner_id).cloned())
    }

    async fn create_product_with_images(
        &self,
        product: NewProduct,
        images: Vec<NewImage>,
    ) -> Result<Product, DatabaseError> {
        let mut state = self.state.write().await;
        state.check_references(&product)?;

        let (mut row, image_rows) = product.into_rows(images);
        let seq = state.next_seq;
        state.next_seq += 1;

        state.images.extend(image_rows.iter().cloned());
        state.products.push(StoredProduct { seq, product: row.clone() });

        row.images = image_rows;
        Ok(row)
    }

    async fn list_products(
        &self,
        predicate: &Predicate,
        sort: Sort,
        expand: Expand,
    ) -> Result<Vec<Product>, DatabaseError> {
        let state = self.state.read().await;

        let mut matched: Vec<&StoredProduct> = state
            .products
            .iter()
            .filter(|s| FilterWhere::matches(predicate, &s.product))
            .collect();
        matched.sort_by(|a, b| compare(a, b, sort));

        Ok(matched
            .into_iter()
            .map(|s| state.expand(s.product.clone(), expand))
            .collect())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
