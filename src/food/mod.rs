pub mod api;
pub mod models;
pub mod pantry;
pub mod recommend;

pub use models::{
    Coordinates, Provenance, Recipe, RecipeId, RecognizeResponse, Restaurant, ScanSource,
    ShoppingItem, WebItem,
};
pub use pantry::Pantry;
