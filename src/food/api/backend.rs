use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use validator::Validate;

use super::{RecipeService, RestaurantService, ServiceError};
use crate::config::ClientConfig;
use crate::food::models::{
    Coordinates, ErrorEnvelope, HealthResponse, IngredientsRequest, Recipe, RecognizeHintRequest,
    RecognizeResponse, RecommendResponse, Restaurant, RestaurantResponse, ScanSource, ShoppingItem,
    ShoppingListRequest, ShoppingListResponse, WebItem, WebSearchResponse,
};

/// HTTP client for the SmartEats backend (`.../api`).
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    root_url: String,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Self {
        let root_url = config
            .root_url()
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}/", config.api_url));

        Self {
            client: Client::new(),
            base_url: config.api_url.clone(),
            root_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<String, ServiceError> {
        let url = format!("{}health", self.root_url);
        let response = self.client.get(&url).send().await?;
        let body: HealthResponse = decode(response).await?;
        Ok(body.status)
    }

    /// `POST ingredients/recognize`: uploads the photo as the multipart
    /// `image` field, or sends the hint as JSON.
    pub async fn recognize(&self, source: &ScanSource) -> Result<RecognizeResponse, ServiceError> {
        let url = self.endpoint("ingredients/recognize");

        let request = match source {
            ScanSource::Hint(hint) => {
                debug!("POST {} with hint '{}'", url, hint);
                self.client
                    .post(&url)
                    .json(&RecognizeHintRequest { mock_image_hint: hint })
            }
            ScanSource::Image(path) => {
                let form = image_form(path).await?;
                debug!("POST {} with image {}", url, path.display());
                self.client.post(&url).multipart(form)
            }
        };

        let response = request.send().await?;
        decode(response).await
    }

    async fn post_ingredients<T: DeserializeOwned>(
        &self,
        path: &str,
        ingredients: &[String],
    ) -> Result<T, ServiceError> {
        let request = IngredientsRequest {
            ingredients: ingredients.to_vec(),
        };
        request
            .validate()
            .map_err(|_| ServiceError::InvalidRequest("at least one ingredient is required".to_string()))?;

        let url = self.endpoint(path);
        debug!("POST {} with {} ingredients", url, ingredients.len());

        let response = self.client.post(&url).json(&request).send().await?;
        decode(response).await
    }
}

/// Content type for the photo formats the backend accepts.
fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

async fn image_form(path: &Path) -> Result<Form, ServiceError> {
    let mime = image_mime(path).ok_or_else(|| {
        ServiceError::InvalidRequest(format!("{}: only jpg/png images are supported", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ServiceError::InvalidRequest(format!("cannot read {}: {}", path.display(), e)))?;

    let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
    Ok(Form::new().part("image", part))
}

/// Turns a response into `T`, mapping non-2xx statuses onto the backend's
/// `{"error": {"code", "message"}}` envelope when it is present.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => format!("{} ({})", envelope.error.message, envelope.error.code),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        warn!("Backend returned {}: {}", status, message);
        return Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

#[async_trait]
impl RecipeService for BackendClient {
    async fn recommend(&self, ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError> {
        let body: RecommendResponse = self.post_ingredients("recipes/recommend", ingredients).await?;
        Ok(body.recipes)
    }

    async fn search_web(&self, ingredients: &[String]) -> Result<Vec<WebItem>, ServiceError> {
        let body: WebSearchResponse = self.post_ingredients("recipes/search-web", ingredients).await?;
        Ok(body.items)
    }

    async fn shopping_list(
        &self,
        recipe_id: i64,
        ingredients: &[String],
    ) -> Result<Vec<ShoppingItem>, ServiceError> {
        let url = self.endpoint("shopping-list");
        let response = self
            .client
            .post(&url)
            .json(&ShoppingListRequest {
                recipe_id,
                ingredients,
            })
            .send()
            .await?;

        let body: ShoppingListResponse = decode(response).await?;
        Ok(body.missing)
    }
}

#[async_trait]
impl RestaurantService for BackendClient {
    async fn search_restaurants(
        &self,
        cuisine: &str,
        location: Coordinates,
    ) -> Result<Vec<Restaurant>, ServiceError> {
        let url = self.endpoint("restaurants/search");
        debug!("GET {} cuisine={}", url, cuisine);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("cuisine", cuisine.to_string()),
                ("lat", location.lat.to_string()),
                ("lng", location.lng.to_string()),
            ])
            .send()
            .await?;

        let body: RestaurantResponse = decode(response).await?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("fridge.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("/tmp/shelf.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.gif")), None);
        assert_eq!(image_mime(Path::new("photo")), None);
    }

    #[tokio::test]
    async fn test_unsupported_image_is_rejected_before_sending() {
        let err = image_form(Path::new("fridge.gif")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));

        let err = image_form(Path::new("/nonexistent/smart-eats/fridge.png")).await.unwrap_err();
        match err {
            ServiceError::InvalidRequest(message) => assert!(message.contains("cannot read")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
