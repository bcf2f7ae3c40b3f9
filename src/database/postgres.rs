use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Category, Color, Image, NewImage, NewProduct, Product, Size, Store};
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::ProductStore;
use crate::filter::{Expand, Predicate, Sort};

const PRODUCT_COLUMNS: &[&str] = &[
    "id",
    "store_id",
    "category_id",
    "color_id",
    "size_id",
    "name",
    "price",
    "is_featured",
    "is_archived",
    "created_at",
    "updated_at",
];

const CATEGORY_COLUMNS: &str = "id, store_id, name, created_at, updated_at";
const COLOR_COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";
const SIZE_COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

/// `ProductStore` backed by Postgres
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn expand(&self, mut products: Vec<Product>, expand: Expand) -> Result<Vec<Product>, DatabaseError> {
        if products.is_empty() {
            return Ok(products);
        }

        if expand.images {
            let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
            let images = sqlx::query_as::<_, Image>(
                "SELECT id, product_id, url, created_at, updated_at
                 FROM images
                 WHERE product_id = ANY($1)
                 ORDER BY product_id, position",
            )
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

            let mut by_product: HashMap<Uuid, Vec<Image>> = HashMap::new();
            for image in images {
                by_product.entry(image.product_id).or_default().push(image);
            }
            for product in products.iter_mut() {
                product.images = by_product.remove(&product.id).unwrap_or_default();
            }
        }

        if expand.category {
            let ids = distinct(products.iter().map(|p| p.category_id));
            let found = self.fetch_by_ids::<Category>("categories", CATEGORY_COLUMNS, ids, |c| c.id).await?;
            for product in products.iter_mut() {
                product.category = found.get(&product.category_id).cloned();
            }
        }

        if expand.color {
            let ids = distinct(products.iter().map(|p| p.color_id));
            let found = self.fetch_by_ids::<Color>("colors", COLOR_COLUMNS, ids, |c| c.id).await?;
            for product in products.iter_mut() {
                product.color = found.get(&product.color_id).cloned();
            }
        }

        if expand.size {
            let ids = distinct(products.iter().map(|p| p.size_id));
            let found = self.fetch_by_ids::<Size>("sizes", SIZE_COLUMNS, ids, |s| s.id).await?;
            for product in products.iter_mut() {
                product.size = found.get(&product.size_id).cloned();
            }
        }

        Ok(products)
    }

    async fn fetch_by_ids<T>(
        &self,
        table: &'static str,
        columns: &'static str,
        ids: Vec<Uuid>,
        key: fn(&T) -> Uuid,
    ) -> Result<HashMap<Uuid, T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = format!("SELECT {} FROM \"{}\" WHERE id = ANY($1)", columns, table);
        let rows = sqlx::query_as::<_, T>(&query).bind(ids).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|row| (key(&row), row)).collect())
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<HashSet<_>>().into_iter().collect()
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_store(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Store>, DatabaseError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, owner_id, name, created_at, updated_at
             FROM stores
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    async fn create_product_with_images(
        &self,
        product: NewProduct,
        images: Vec<NewImage>,
    ) -> Result<Product, DatabaseError> {
        let (mut row, image_rows) = product.into_rows(images);

        // Dropping the transaction without commit rolls both inserts back
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO products
                (id, store_id, category_id, color_id, size_id, name, price,
                 is_featured, is_archived, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(row.id)
        .bind(row.store_id)
        .bind(row.category_id)
        .bind(row.color_id)
        .bind(row.size_id)
        .bind(&row.name)
        .bind(row.price)
        .bind(row.is_featured)
        .bind(row.is_archived)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&mut *tx)
        .await?;

        if !image_rows.is_empty() {
            let ids: Vec<Uuid> = image_rows.iter().map(|i| i.id).collect();
            let urls: Vec<String> = image_rows.iter().map(|i| i.url.clone()).collect();

            sqlx::query(
                "INSERT INTO images (id, product_id, url, position, created_at, updated_at)
                 SELECT t.id, $3, t.url, t.position, $4, $4
                 FROM UNNEST($1::uuid[], $2::text[]) WITH ORDINALITY AS t(id, url, position)",
            )
            .bind(ids)
            .bind(urls)
            .bind(row.id)
            .bind(row.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(product_id = %row.id, images = image_rows.len(), "product inserted");
        row.images = image_rows;
        Ok(row)
    }

    async fn list_products(
        &self,
        predicate: &Predicate,
        sort: Sort,
        expand: Expand,
    ) -> Result<Vec<Product>, DatabaseError> {
        let products = QueryBuilder::<Product>::new("products")?
            .select(PRODUCT_COLUMNS)
            .predicate(predicate.clone())
            .order(sort)
            .select_all(&self.pool)
            .await?;

        self.expand(products, expand).await
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
