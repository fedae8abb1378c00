pub mod commands;
pub mod config;
pub mod food;
pub mod session;

// Re-export commonly used items
pub use config::ClientConfig;
pub use food::api::{BackendClient, RecipeService, RestaurantService, ServiceError};
pub use food::{Pantry, Recipe, Restaurant};
pub use session::{Action, SessionController, SessionState, Tab};
