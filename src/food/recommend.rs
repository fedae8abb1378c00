use log::{info, warn};

use crate::food::api::{RecipeService, ServiceError};
use crate::food::models::{Recipe, RecipeId, WebItem};

/// Below this many local matches the web search is consulted as well.
pub const MIN_LOCAL_MATCHES: usize = 2;
pub const WEB_CUISINE: &str = "Web Discovery";
pub const WEB_DEFAULT_MATCH_RATIO: f64 = 0.6;
pub const WEB_STEPS_PLACEHOLDER: &str = "Click link to view source";

/// Shapes a web hit like a local recipe. Web hits carry no structured
/// ingredients, and an absent, zero or NaN score becomes the default ratio.
pub fn web_item_to_recipe(index: usize, item: WebItem) -> Recipe {
    let match_ratio = item
        .score
        .filter(|s| *s != 0.0 && !s.is_nan())
        .unwrap_or(WEB_DEFAULT_MATCH_RATIO);

    let steps = item
        .instructions
        .and_then(|lines| lines.into_iter().next())
        .unwrap_or_else(|| WEB_STEPS_PLACEHOLDER.to_string());

    Recipe {
        id: RecipeId::Web(format!("web-{}", index)),
        name: item.name,
        cuisine: WEB_CUISINE.to_string(),
        match_ratio,
        required_ingredients: Vec::new(),
        steps,
        image: item.url,
    }
}

/// Local matches first; if there are fewer than `MIN_LOCAL_MATCHES`, the
/// transformed web hits are appended in their original order. A failing
/// web search is logged and the local matches stand alone. A failing
/// local search is returned to the caller.
pub async fn find_recipes<S>(service: &S, ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError>
where
    S: RecipeService + ?Sized,
{
    let mut results = service.recommend(ingredients).await?;

    if results.len() < MIN_LOCAL_MATCHES {
        info!(
            "Only {} local matches, searching the web as a backup",
            results.len()
        );
        match service.search_web(ingredients).await {
            Ok(items) => results.extend(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| web_item_to_recipe(idx, item)),
            ),
            Err(e) => warn!("Web search failed: {}", e),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::models::ShoppingItem;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedRecipes {
        local: Result<Vec<Recipe>, ServiceError>,
        web: Result<Vec<WebItem>, ServiceError>,
        web_calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRecipes {
        fn new(local: Result<Vec<Recipe>, ServiceError>, web: Result<Vec<WebItem>, ServiceError>) -> Self {
            Self {
                local,
                web,
                web_calls: Mutex::new(Vec::new()),
            }
        }

        fn web_calls(&self) -> Vec<Vec<String>> {
            self.web_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecipeService for ScriptedRecipes {
        async fn recommend(&self, _ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError> {
            self.local.clone()
        }

        async fn search_web(&self, ingredients: &[String]) -> Result<Vec<WebItem>, ServiceError> {
            self.web_calls.lock().unwrap().push(ingredients.to_vec());
            self.web.clone()
        }

        async fn shopping_list(&self, _id: i64, _ingredients: &[String]) -> Result<Vec<ShoppingItem>, ServiceError> {
            Ok(Vec::new())
        }
    }

    fn local(id: i64, ratio: f64) -> Recipe {
        Recipe {
            id: RecipeId::Local(id),
            name: format!("Recipe {}", id),
            cuisine: "Chinese".to_string(),
            match_ratio: ratio,
            required_ingredients: vec!["egg".to_string()],
            steps: "Cook.".to_string(),
            image: None,
        }
    }

    fn web(name: &str) -> WebItem {
        WebItem {
            name: name.to_string(),
            score: None,
            instructions: None,
            url: Some(format!("https://example.com/{}", name)),
        }
    }

    fn pantry() -> Vec<String> {
        vec!["egg".to_string(), "tomato".to_string()]
    }

    #[test]
    fn test_web_item_defaults() {
        let recipe = web_item_to_recipe(0, WebItem {
            name: "X".to_string(),
            score: None,
            instructions: None,
            url: Some("u".to_string()),
        });
        assert_eq!(recipe.id, RecipeId::Web("web-0".to_string()));
        assert_eq!(recipe.cuisine, "Web Discovery");
        assert_eq!(recipe.match_ratio, 0.6);
        assert!(recipe.required_ingredients.is_empty());
        assert_eq!(recipe.steps, WEB_STEPS_PLACEHOLDER);
        assert_eq!(recipe.image.as_deref(), Some("u"));
    }

    #[test]
    fn test_web_item_keeps_score_and_first_instruction() {
        let recipe = web_item_to_recipe(3, WebItem {
            name: "Shakshuka".to_string(),
            score: Some(0.25),
            instructions: Some(vec!["Simmer tomatoes.".to_string(), "Crack eggs.".to_string()]),
            url: None,
        });
        assert_eq!(recipe.id, RecipeId::Web("web-3".to_string()));
        assert_eq!(recipe.match_ratio, 0.25);
        assert_eq!(recipe.steps, "Simmer tomatoes.");
        assert_eq!(recipe.image, None);
    }

    #[test]
    fn test_zero_score_and_empty_instructions_fall_back() {
        let recipe = web_item_to_recipe(1, WebItem {
            name: "Y".to_string(),
            score: Some(0.0),
            instructions: Some(Vec::new()),
            url: None,
        });
        assert_eq!(recipe.match_ratio, WEB_DEFAULT_MATCH_RATIO);
        assert_eq!(recipe.steps, WEB_STEPS_PLACEHOLDER);
    }

    #[test]
    fn test_only_zero_and_nan_scores_fall_back() {
        let scored = |score: f64| {
            web_item_to_recipe(0, WebItem {
                name: "Z".to_string(),
                score: Some(score),
                instructions: None,
                url: None,
            })
            .match_ratio
        };
        assert_eq!(scored(f64::NAN), WEB_DEFAULT_MATCH_RATIO);
        assert_eq!(scored(-0.0), WEB_DEFAULT_MATCH_RATIO);
        assert_eq!(scored(-0.2), -0.2);
        assert_eq!(scored(1.5), 1.5);
    }

    #[tokio::test]
    async fn test_enough_local_matches_skip_web() {
        let service = ScriptedRecipes::new(Ok(vec![local(1, 1.0), local(2, 0.75)]), Ok(vec![web("a")]));
        let results = find_recipes(&service, &pantry()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(service.web_calls().is_empty());
    }

    #[tokio::test]
    async fn test_scarce_local_matches_append_web_in_order() {
        let service = ScriptedRecipes::new(Ok(vec![local(1, 1.0)]), Ok(vec![web("a"), web("b")]));
        let results = find_recipes(&service, &pantry()).await.unwrap();

        assert_eq!(service.web_calls(), vec![pantry()]);
        let ids: Vec<String> = results.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "web-0", "web-1"]);
        assert_eq!(results[1].name, "a");
        assert_eq!(results[2].name, "b");
    }

    #[tokio::test]
    async fn test_web_results_are_not_sorted_ahead_of_local() {
        let mut strong = web("strong");
        strong.score = Some(0.99);
        let service = ScriptedRecipes::new(Ok(vec![local(7, 0.6)]), Ok(vec![strong]));
        let results = find_recipes(&service, &pantry()).await.unwrap();
        assert_eq!(results[0].id, RecipeId::Local(7));
        assert_eq!(results[1].match_ratio, 0.99);
    }

    #[tokio::test]
    async fn test_web_failure_keeps_local_only() {
        let service = ScriptedRecipes::new(
            Ok(vec![local(1, 1.0)]),
            Err(ServiceError::Transport("connection refused".to_string())),
        );
        let results = find_recipes(&service, &pantry()).await.unwrap();
        assert_eq!(results, vec![local(1, 1.0)]);
    }

    #[tokio::test]
    async fn test_no_local_and_web_failure_is_empty() {
        let service = ScriptedRecipes::new(
            Ok(Vec::new()),
            Err(ServiceError::Status { status: 500, message: "boom".to_string() }),
        );
        let results = find_recipes(&service, &pantry()).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(service.web_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_local_failure_is_returned_without_web_call() {
        let service = ScriptedRecipes::new(
            Err(ServiceError::Transport("down".to_string())),
            Ok(vec![web("a")]),
        );
        let err = find_recipes(&service, &pantry()).await.unwrap_err();
        assert_eq!(err, ServiceError::Transport("down".to_string()));
        assert!(service.web_calls().is_empty());
    }
}
