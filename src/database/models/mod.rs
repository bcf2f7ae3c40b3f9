pub mod attribute;
pub mod image;
pub mod product;
pub mod store;

pub use attribute::{Category, Color, Size};
pub use image::{Image, NewImage};
pub use product::{NewProduct, Product};
pub use store::Store;
