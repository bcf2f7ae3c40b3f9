pub mod auth;

pub use auth::{Identity, IdentityProvider, JwtIdentityProvider};
