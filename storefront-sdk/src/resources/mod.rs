//! SDK resource modules
//!
//! This module contains resource-specific clients for interacting with
//! different API endpoints.

pub mod auth;
pub mod products;
pub mod users;

pub use auth::AuthClient;
pub use products::ProductsClient;
pub use users::UsersClient;
