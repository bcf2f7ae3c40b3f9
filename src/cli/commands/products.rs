use std::io::Read;

use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;

use crate::cli::client::{ApiClient, ServerArgs};
use crate::cli::utils::{output_product, output_products};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List a store's products (newest first)")]
    List {
        #[arg(help = "Store id")]
        store: String,
        #[arg(long, help = "Only products in this category")]
        category_id: Option<String>,
        #[arg(long, help = "Only products with this color")]
        color_id: Option<String>,
        #[arg(long, help = "Only products with this size")]
        size_id: Option<String>,
        #[arg(long, help = "Only featured products")]
        featured: bool,
    },

    #[command(about = "Create a product from a JSON body read on stdin")]
    Create {
        #[arg(help = "Store id")]
        store: String,
    },
}

pub async fn handle(server: ServerArgs, cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = ApiClient::new(&server)?;

    match cmd {
        ProductCommands::List {
            store,
            category_id,
            color_id,
            size_id,
            featured,
        } => {
            let mut query = Vec::new();
            if let Some(id) = category_id {
                query.push(("categoryId", id));
            }
            if let Some(id) = color_id {
                query.push(("colorId", id));
            }
            if let Some(id) = size_id {
                query.push(("sizeId", id));
            }
            if featured {
                query.push(("isFeatured", "true".to_string()));
            }

            let url = client.endpoint(&format!("{}/products", store), &query)?;
            let products = client.get(url).await?;
            output_products(&output_format, &products)
        }
        ProductCommands::Create { store } => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read product JSON from stdin")?;
            let body: Value = serde_json::from_str(&raw).context("stdin is not valid JSON")?;

            let url = client.endpoint(&format!("{}/products", store), &[])?;
            let product = client.post(url, &body).await?;
            output_product(&output_format, &product)
        }
    }
}
