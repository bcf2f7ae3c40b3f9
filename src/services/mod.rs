pub mod ownership;

pub use ownership::verify_store_owner;
