// Sibling resources referenced by products. Only their read shape lives here;
// they are expanded onto listed products but managed elsewhere.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(store_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), store_id, name: name.into(), created_at: now, updated_at: now }
    }
}

impl Color {
    pub fn new(store_id: Uuid, name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), store_id, name: name.into(), value: value.into(), created_at: now, updated_at: now }
    }
}

impl Size {
    pub fn new(store_id: Uuid, name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), store_id, name: name.into(), value: value.into(), created_at: now, updated_at: now }
    }
}
