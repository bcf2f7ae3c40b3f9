// handlers/products/mod.rs - Store-scoped product endpoints
//
// POST requires a caller who owns the store; GET is public.

pub mod create; // POST /:store_id/products
pub mod list;   // GET /:store_id/products

pub use create::post;
pub use list::get;
