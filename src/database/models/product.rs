use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::attribute::{Category, Color, Size};
use super::image::{Image, NewImage};

/// Persisted product. Related entities are filled in by the store according
/// to the requested expansion and are omitted from JSON when not loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub category_id: Uuid,
    pub color_id: Uuid,
    pub size_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub is_featured: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[sqlx(skip)]
    #[serde(default)]
    pub images: Vec<Image>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

/// A validated product row ready to be inserted. Its images travel beside it
/// and are stored in the same unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub store_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub color_id: Uuid,
    pub size_id: Uuid,
    pub is_featured: bool,
    pub is_archived: bool,
}

impl NewProduct {
    /// Split into the product row and its image rows, stamping ids and timestamps.
    /// Timestamps are cut to microseconds, the precision Postgres keeps.
    pub fn into_rows(self, images: Vec<NewImage>) -> (Product, Vec<Image>) {
        let now = Utc::now().trunc_subsecs(6);
        let product_id = Uuid::new_v4();

        let images = images
            .into_iter()
            .map(|image| Image {
                id: Uuid::new_v4(),
                product_id,
                url: image.url,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let product = Product {
            id: product_id,
            store_id: self.store_id,
            category_id: self.category_id,
            color_id: self.color_id,
            size_id: self.size_id,
            name: self.name,
            price: self.price,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            created_at: now,
            updated_at: now,
            images: Vec::new(),
            category: None,
            color: None,
            size: None,
        };

        (product, images)
    }
}
