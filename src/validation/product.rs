use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Field, ValidationError};
use crate::database::models::{NewImage, NewProduct};

/// Body of `POST /{storeId}/products` exactly as received. Fields are kept as
/// raw JSON so that a missing or wrongly typed value is reported by the
/// pipeline in its own slot rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub category_id: Option<Value>,
    pub color_id: Option<Value>,
    pub size_id: Option<Value>,
    pub images: Option<Value>,
    pub is_featured: Option<Value>,
    pub is_archived: Option<Value>,
}

impl CreateProductRequest {
    /// Any JSON document is accepted. Anything but an object carries no
    /// fields, so it fails on `name` like an empty object.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Output of a successful validation run
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub product: NewProduct,
    pub images: Vec<NewImage>,
}

/// Run the create checks in order: name, images, price, categoryId, colorId,
/// sizeId, storeId. The first failure is returned and nothing after it runs.
///
/// `null`, empty strings, an empty image list and a zero price count as
/// absent. A value of the wrong JSON type is invalid in its own slot.
pub fn validate_create_product(
    body: CreateProductRequest,
    store_id: Option<&str>,
) -> Result<ValidProduct, ValidationError> {
    let name = required_text(body.name, Field::Name)?;
    let images = required_images(body.images)?;
    let price = required_price(body.price)?;
    let category_id = required_id(body.category_id, Field::CategoryId)?;
    let color_id = required_id(body.color_id, Field::ColorId)?;
    let size_id = required_id(body.size_id, Field::SizeId)?;
    let store_id = parse_id(store_id, Field::StoreId)?;

    Ok(ValidProduct {
        product: NewProduct {
            store_id,
            name,
            price,
            category_id,
            color_id,
            size_id,
            is_featured: flag(body.is_featured),
            is_archived: flag(body.is_archived),
        },
        images,
    })
}

/// Present, non-null value
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn required_text(value: Option<Value>, field: Field) -> Result<String, ValidationError> {
    match present(value) {
        None => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::Invalid(field)),
    }
}

fn required_images(value: Option<Value>) -> Result<Vec<NewImage>, ValidationError> {
    let images = match present(value) {
        None => return Err(ValidationError::Missing(Field::Images)),
        Some(Value::Array(items)) if items.is_empty() => return Err(ValidationError::Missing(Field::Images)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::Invalid(Field::Images)),
    };

    images
        .into_iter()
        .map(|image| match image.get("url") {
            Some(Value::String(url)) if !url.trim().is_empty() => Ok(NewImage { url: url.clone() }),
            _ => Err(ValidationError::Invalid(Field::Images)),
        })
        .collect()
}

fn required_price(value: Option<Value>) -> Result<Decimal, ValidationError> {
    let raw = match present(value) {
        None => return Err(ValidationError::Missing(Field::Price)),
        Some(Value::String(s)) if s.is_empty() => return Err(ValidationError::Missing(Field::Price)),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(ValidationError::Invalid(Field::Price)),
    };

    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| ValidationError::Invalid(Field::Price))?;
    if price.is_zero() {
        return Err(ValidationError::Missing(Field::Price));
    }
    Ok(price)
}

fn required_id(value: Option<Value>, field: Field) -> Result<Uuid, ValidationError> {
    match present(value) {
        None => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) => parse_id(Some(&s), field),
        Some(_) => Err(ValidationError::Invalid(field)),
    }
}

fn parse_id(value: Option<&str>, field: Field) -> Result<Uuid, ValidationError> {
    let raw = value.filter(|s| !s.is_empty()).ok_or(ValidationError::Missing(field))?;
    Uuid::parse_str(raw).map_err(|_| ValidationError::Invalid(field))
}

// Flags are optional; anything other than JSON `true` leaves them off
fn flag(value: Option<Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Store id taken from the route, for paths that have no body to validate
pub fn parse_store_id(raw: &str) -> Result<Uuid, ValidationError> {
    parse_id(Some(raw), Field::StoreId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Oversized hoodie",
            "price": 59.5,
            "categoryId": Uuid::new_v4(),
            "colorId": Uuid::new_v4(),
            "sizeId": Uuid::new_v4(),
            "images": [{ "url": "https://cdn.example.com/1.png" }, { "url": "https://cdn.example.com/2.png" }]
        })
    }

    fn run(body: serde_json::Value, store_id: Option<&str>) -> Result<ValidProduct, ValidationError> {
        validate_create_product(CreateProductRequest::from_json(body), store_id)
    }

    fn store() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn accepts_complete_body() {
        let store_id = store();
        let valid = run(valid_body(), Some(&store_id)).unwrap();

        assert_eq!(valid.product.name, "Oversized hoodie");
        assert_eq!(valid.product.store_id.to_string(), store_id);
        assert_eq!(valid.images.len(), 2);
        assert!(!valid.product.is_featured);
        assert!(!valid.product.is_archived);
    }

    #[test]
    fn carries_flags_through() {
        let mut body = valid_body();
        body["isFeatured"] = json!(true);
        body["isArchived"] = json!(true);
        let valid = run(body, Some(&store())).unwrap();
        assert!(valid.product.is_featured);
        assert!(valid.product.is_archived);
    }

    #[test]
    fn each_missing_field_is_reported_alone() {
        let cases = [
            ("name", Field::Name),
            ("images", Field::Images),
            ("price", Field::Price),
            ("categoryId", Field::CategoryId),
            ("colorId", Field::ColorId),
            ("sizeId", Field::SizeId),
        ];
        for (key, field) in cases {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(key);
            assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Missing(field), "without {}", key);
        }
        assert_eq!(run(valid_body(), None).unwrap_err(), ValidationError::Missing(Field::StoreId));
    }

    #[test]
    fn earliest_failure_wins() {
        // everything missing: name comes first
        assert_eq!(run(json!({}), None).unwrap_err(), ValidationError::Missing(Field::Name));

        // name present, images empty, price and ids missing
        let body = json!({ "name": "x", "images": [] });
        assert_eq!(run(body, None).unwrap_err(), ValidationError::Missing(Field::Images));

        // only the store id and size are missing: size is checked first
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("sizeId");
        assert_eq!(run(body, None).unwrap_err(), ValidationError::Missing(Field::SizeId));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut body = valid_body();
        body["name"] = json!("");
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Missing(Field::Name));

        let mut body = valid_body();
        body["colorId"] = json!("");
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Missing(Field::ColorId));

        let mut body = valid_body();
        body["price"] = json!(0);
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Missing(Field::Price));

        assert_eq!(run(valid_body(), Some("")).unwrap_err(), ValidationError::Missing(Field::StoreId));
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = valid_body();
        body["price"] = serde_json::Value::Null;
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Missing(Field::Price));
    }

    #[test]
    fn malformed_ids_are_invalid_in_their_slot() {
        let mut body = valid_body();
        body["categoryId"] = json!("shirts");
        body.as_object_mut().unwrap().remove("colorId");
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Invalid(Field::CategoryId));

        assert_eq!(run(valid_body(), Some("store-1")).unwrap_err(), ValidationError::Invalid(Field::StoreId));
    }

    #[test]
    fn blank_image_url_rejects_images() {
        let mut body = valid_body();
        body["images"] = json!([{ "url": "https://cdn.example.com/1.png" }, { "url": " " }]);
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Invalid(Field::Images));

        let mut body = valid_body();
        body["images"] = json!([{}]);
        assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Invalid(Field::Images));
    }

    #[test]
    fn route_store_id_is_checked() {
        assert_eq!(parse_store_id("").unwrap_err(), ValidationError::Missing(Field::StoreId));
        assert_eq!(parse_store_id("shop-1").unwrap_err(), ValidationError::Invalid(Field::StoreId));
        let id = store();
        assert_eq!(parse_store_id(&id).unwrap().to_string(), id);
    }

    #[test]
    fn price_accepts_string_form() {
        let mut body = valid_body();
        body["price"] = json!("19.99");
        let valid = run(body, Some(&store())).unwrap();
        assert_eq!(valid.product.price.to_string(), "19.99");
    }

    #[test]
    fn wrongly_typed_values_are_invalid_in_their_slot() {
        let cases = [
            ("name", json!(123), Field::Name),
            ("images", json!("https://cdn.example.com/1.png"), Field::Images),
            ("price", json!("abc"), Field::Price),
            ("price", json!(true), Field::Price),
            ("categoryId", json!(42), Field::CategoryId),
            ("sizeId", json!({ "id": "m" }), Field::SizeId),
        ];
        for (key, value, field) in cases {
            let mut body = valid_body();
            body[key] = value;
            assert_eq!(run(body, Some(&store())).unwrap_err(), ValidationError::Invalid(field), "{}", key);
        }
    }

    #[test]
    fn bad_type_later_in_order_does_not_mask_missing_name() {
        assert_eq!(run(json!({ "price": "abc" }), None).unwrap_err(), ValidationError::Missing(Field::Name));
    }

    #[test]
    fn non_object_body_has_no_fields() {
        for body in [json!([]), json!("name"), json!(7)] {
            assert_eq!(run(body, None).unwrap_err(), ValidationError::Missing(Field::Name));
        }
    }

    #[test]
    fn flags_only_accept_true() {
        let mut body = valid_body();
        body["isFeatured"] = json!("true");
        body["isArchived"] = json!(1);
        let valid = run(body, Some(&store())).unwrap();
        assert!(!valid.product.is_featured);
        assert!(!valid.product.is_archived);
    }
}
