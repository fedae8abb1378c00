use crate::food::pantry::Pantry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Local recipes carry the backend's numeric id, web results a synthetic `web-N` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Local(i64),
    Web(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Local(id) => write!(f, "{}", id),
            RecipeId::Web(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Local,
    Web,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub match_ratio: f64,
    #[serde(default)]
    pub required_ingredients: Vec<String>,
    #[serde(default)]
    pub steps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    pub fn provenance(&self) -> Provenance {
        match self.id {
            RecipeId::Local(_) => Provenance::Local,
            RecipeId::Web(_) => Provenance::Web,
        }
    }

    /// Match ratio as a whole percentage, rounded half away from zero.
    pub fn match_percent(&self) -> u32 {
        (self.match_ratio.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn missing_from(&self, pantry: &Pantry) -> Vec<&str> {
        self.required_ingredients
            .iter()
            .filter(|ing| !pantry.contains(&ing.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    pub fn placeholder_image_url(&self) -> String {
        format!(
            "https://placehold.co/600x400/orange/white?text={}",
            urlencoding::encode(&self.name)
        )
    }
}

/// One hit from the web-search fallback, before it is shaped into a `Recipe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebItem {
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    /// Unrated places come back as `null` or without the field.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub ingredient: String,
    #[serde(default)]
    pub qty: Option<String>,
}

#[derive(Debug, Serialize, Validate)]
pub struct IngredientsRequest {
    #[validate(length(min = 1))]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListRequest<'a> {
    pub recipe_id: i64,
    pub ingredients: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub items: Vec<WebItem>,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantResponse {
    #[serde(default)]
    pub results: Vec<Restaurant>,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListResponse {
    #[serde(default)]
    pub missing: Vec<ShoppingItem>,
}

/// Input for ingredient recognition: a jpg/png photo on disk, or a text
/// hint the backend's mock recognizer keys off.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanSource {
    Hint(String),
    Image(PathBuf),
}

#[derive(Debug, Serialize)]
pub struct RecognizeHintRequest<'a> {
    pub mock_image_hint: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ingredient name to freshness label, e.g. `"fresh"`.
    #[serde(default)]
    pub freshness: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
