pub mod product;

use thiserror::Error;

pub use product::{parse_store_id, validate_create_product, CreateProductRequest, ValidProduct};

/// Fields checked by the create pipeline, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Images,
    Price,
    CategoryId,
    ColorId,
    SizeId,
    StoreId,
}

impl Field {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Images => "images",
            Field::Price => "price",
            Field::CategoryId => "categoryId",
            Field::ColorId => "colorId",
            Field::SizeId => "sizeId",
            Field::StoreId => "storeId",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Images => "Images",
            Field::Price => "Price",
            Field::CategoryId => "Category id",
            Field::ColorId => "Color id",
            Field::SizeId => "Size id",
            Field::StoreId => "Store id",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Field::Images => "are",
            _ => "is",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field. The pipeline stops at the first one, so a
/// request is never reported with two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} {} required", .0.label(), .0.verb())]
    Missing(Field),

    #[error("{} {} invalid", .0.label(), .0.verb())]
    Invalid(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) | ValidationError::Invalid(field) => *field,
        }
    }
}
