// handlers/mod.rs - HTTP handlers
//
// Public: `/`, `/health`, GET `/:store_id/products`
// Store owner: POST `/:store_id/products`

pub mod health;
pub mod products;

pub use health::{health, root};
