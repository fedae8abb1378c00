pub mod backend;

use async_trait::async_trait;
use thiserror::Error;

use crate::food::models::{Coordinates, Recipe, Restaurant, ShoppingItem, WebItem};

// Re-export common types
pub use backend::BackendClient;

/// Failure of a single backend call. Network failures, HTTP errors and
/// malformed bodies all end up here; callers decide whether to log or show them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Failed to send request: {0}")]
    Transport(String),
    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Local matches for the given pantry contents.
    async fn recommend(&self, ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError>;

    /// Secondary web search used when local matches are scarce.
    async fn search_web(&self, ingredients: &[String]) -> Result<Vec<WebItem>, ServiceError>;

    /// Ingredients a local recipe needs that are not in `ingredients`.
    async fn shopping_list(
        &self,
        recipe_id: i64,
        ingredients: &[String],
    ) -> Result<Vec<ShoppingItem>, ServiceError>;
}

#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn search_restaurants(
        &self,
        cuisine: &str,
        location: Coordinates,
    ) -> Result<Vec<Restaurant>, ServiceError>;
}
