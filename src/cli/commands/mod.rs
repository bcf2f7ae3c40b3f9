pub mod migrate;
pub mod products;
pub mod token;
