use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a list of products, one line each in text mode
pub fn output_products(output_format: &OutputFormat, products: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(products)?);
        }
        OutputFormat::Text => {
            let items = products.as_array().map(Vec::as_slice).unwrap_or_default();
            if items.is_empty() {
                println!("No products found");
                return Ok(());
            }
            for product in items {
                println!("{}", product_line(product));
            }
        }
    }
    Ok(())
}

/// Output a single product
pub fn output_product(output_format: &OutputFormat, product: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(product)?),
        OutputFormat::Text => println!("✓ Created {}", product_line(product)),
    }
    Ok(())
}

fn product_line(product: &Value) -> String {
    let text = |key: &str| product.get(key).and_then(Value::as_str).unwrap_or("-").to_string();
    let price = match product.get("price") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    };
    let images = product.get("images").and_then(Value::as_array).map_or(0, Vec::len);
    let featured = product.get("isFeatured").and_then(Value::as_bool).unwrap_or(false);

    format!(
        "{}  {:<24} {:>10}  images={}{}",
        text("id"),
        text("name"),
        price,
        images,
        if featured { "  [featured]" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_line_shows_key_fields() {
        let product = json!({
            "id": "p1",
            "name": "Tee",
            "price": "19.99",
            "isFeatured": true,
            "images": [{ "url": "a" }, { "url": "b" }]
        });
        let line = product_line(&product);
        assert!(line.starts_with("p1"));
        assert!(line.contains("19.99"));
        assert!(line.contains("images=2"));
        assert!(line.ends_with("[featured]"));
    }
}
