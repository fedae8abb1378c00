use colored::Colorize;

use std::path::PathBuf;

use crate::food::models::{Provenance, Recipe, RecognizeResponse, ScanSource, ShoppingItem};
use crate::food::pantry::{Pantry, COMMON_INGREDIENTS};
use crate::session::SessionState;

/// Resolves a 1-based position or a name typed by the user to a pantry entry.
pub fn resolve_pantry_item(pantry: &Pantry, arg: &str) -> Option<String> {
    if let Ok(pos) = arg.trim().parse::<usize>() {
        return pos.checked_sub(1).and_then(|i| pantry.get(i)).map(String::from);
    }
    let name = arg.trim().to_lowercase();
    pantry.contains(&name).then_some(name)
}

/// Resolves a 1-based number or a name against the quick-add list.
pub fn resolve_quick_add(arg: &str) -> Option<&'static str> {
    let arg = arg.trim();
    if let Ok(pos) = arg.parse::<usize>() {
        return pos.checked_sub(1).and_then(|i| COMMON_INGREDIENTS.get(i)).copied();
    }
    COMMON_INGREDIENTS
        .iter()
        .find(|item| item.eq_ignore_ascii_case(arg))
        .copied()
}

/// A jpg/png path is uploaded as a photo; anything else is sent as a hint.
pub fn scan_source(arg: &str) -> ScanSource {
    let arg = arg.trim();
    let lower = arg.to_lowercase();
    if [".jpg", ".jpeg", ".png"].iter().any(|ext| lower.ends_with(ext)) {
        ScanSource::Image(PathBuf::from(arg))
    } else {
        ScanSource::Hint(arg.to_string())
    }
}

/// Resolves a 1-based recipe number against a list of `len` results.
pub fn parse_position(arg: &str, len: usize) -> Result<usize, String> {
    if len == 0 {
        return Err("No recipes yet. Add ingredients to your pantry first.".to_string());
    }
    let pos: usize = arg
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number.", arg.trim()))?;
    if pos == 0 || pos > len {
        return Err(format!("No entry #{}. Pick a number between 1 and {}.", pos, len));
    }
    Ok(pos - 1)
}

pub fn render_pantry_tab(state: &SessionState) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n🍳 My Pantry ({})\n", state.pantry.len()));
    if state.pantry.is_empty() {
        out.push_str(&format!("  {}\n", "Your pantry is empty.".dimmed()));
    } else {
        let chips: Vec<String> = state
            .pantry
            .iter()
            .enumerate()
            .map(|(i, item)| format!("[{}] {} ×", i + 1, item.red()))
            .collect();
        out.push_str(&format!("  {}\n", chips.join("  ")));
    }

    out.push_str("\nWhat you can make:");
    if state.recipes_loading {
        out.push_str(&format!(" {}", "searching...".yellow()));
    }
    out.push('\n');

    if state.recipes.is_empty() && !state.recipes_loading {
        out.push_str("  🥣 Add ingredients to your pantry to see recipes!\n");
    }
    for (i, recipe) in state.recipes.iter().enumerate() {
        out.push_str(&render_recipe_card(i + 1, recipe, &state.pantry));
    }

    out
}

pub fn render_recipe_card(position: usize, recipe: &Recipe, pantry: &Pantry) -> String {
    let missing = match recipe.provenance() {
        Provenance::Web => "see source".to_string(),
        Provenance::Local => {
            let missing = recipe.missing_from(pantry);
            if missing.is_empty() {
                "None".green().to_string()
            } else {
                missing.join(", ").red().to_string()
            }
        }
    };

    format!(
        "  {}. {} ({}) | Match: {}% | Missing: {}\n",
        position,
        recipe.name.bold(),
        recipe.cuisine,
        recipe.match_percent(),
        missing
    )
}

pub fn render_recipe_detail(recipe: &Recipe, pantry: &Pantry) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", recipe.name.bold()));
    let badge = format!("Match: {}%", recipe.match_percent());
    let badge = if recipe.match_percent() == 100 {
        badge.green()
    } else {
        badge.yellow()
    };
    out.push_str(&format!("{} | {}\n", recipe.cuisine.blue(), badge));

    out.push_str("\n🛒 Ingredients\n");
    if recipe.required_ingredients.is_empty() {
        out.push_str("  (not listed)\n");
    }
    for ing in &recipe.required_ingredients {
        let mark = if pantry.contains(&ing.to_lowercase()) { "✓" } else { " " };
        out.push_str(&format!("  {} {}\n", mark, ing));
    }

    out.push_str("\n🔥 Instructions\n");
    if recipe.steps.trim().is_empty() {
        out.push_str("  No detailed steps provided.\n");
    } else {
        for line in recipe.steps.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    match (recipe.provenance(), &recipe.image) {
        (Provenance::Web, Some(url)) => out.push_str(&format!("\n🔗 Source: {}\n", url)),
        _ => out.push_str(&format!("\n🖼️ Image: {}\n", recipe.placeholder_image_url())),
    }

    out
}

pub fn render_quick_add() -> String {
    let items: Vec<String> = COMMON_INGREDIENTS
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. + {}", i + 1, item))
        .collect();
    format!("\nQuick Add:\n  {}\n", items.join("  "))
}

pub fn render_recognized(recognized: &RecognizeResponse) -> String {
    if recognized.ingredients.is_empty() {
        return "\n📷 No ingredients recognized.\n".to_string();
    }

    let items: Vec<String> = recognized
        .ingredients
        .iter()
        .map(|item| match recognized.freshness.get(item) {
            Some(freshness) => format!("{} ({})", item, freshness.green()),
            None => item.to_string(),
        })
        .collect();
    format!("\n📷 Recognized: {}\n", items.join(", "))
}

pub fn render_shopping_list(recipe: &Recipe, missing: &[ShoppingItem]) -> String {
    if missing.is_empty() {
        return format!("\n✅ You have everything for {}.\n", recipe.name.bold());
    }

    let mut out = format!("\n🧾 Shopping list for {}:\n", recipe.name.bold());
    for item in missing {
        match &item.qty {
            Some(qty) => out.push_str(&format!("  • {} ({})\n", item.ingredient, qty)),
            None => out.push_str(&format!("  • {}\n", item.ingredient)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::models::RecipeId;
    use crate::food::recommend::web_item_to_recipe;
    use crate::food::WebItem;
    use crate::session::{reduce, Action};

    fn plain() {
        colored::control::set_override(false);
    }

    fn stir_fry() -> Recipe {
        Recipe {
            id: RecipeId::Local(1),
            name: "Tomato Egg Stir-Fry".to_string(),
            cuisine: "Chinese".to_string(),
            match_ratio: 0.75,
            required_ingredients: vec!["tomato".into(), "egg".into(), "salt".into(), "oil".into()],
            steps: "Beat eggs; stir-fry tomatoes; combine; season.".to_string(),
            image: None,
        }
    }

    fn pantry(items: &[&str]) -> Pantry {
        let mut pantry = Pantry::new();
        for item in items {
            pantry.add(item);
        }
        pantry
    }

    #[test]
    fn test_resolve_pantry_item() {
        let pantry = pantry(&["egg", "tomato"]);
        assert_eq!(resolve_pantry_item(&pantry, "2"), Some("tomato".to_string()));
        assert_eq!(resolve_pantry_item(&pantry, " Egg "), Some("egg".to_string()));
        assert_eq!(resolve_pantry_item(&pantry, "0"), None);
        assert_eq!(resolve_pantry_item(&pantry, "3"), None);
        assert_eq!(resolve_pantry_item(&pantry, "milk"), None);
    }

    #[test]
    fn test_resolve_quick_add() {
        assert_eq!(resolve_quick_add("1"), Some("Egg"));
        assert_eq!(resolve_quick_add("oil"), Some("Oil"));
        assert_eq!(resolve_quick_add("14"), None);
        assert_eq!(resolve_quick_add("saffron"), None);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1", 3), Ok(0));
        assert!(parse_position("0", 3).is_err());
        assert!(parse_position("4", 3).is_err());
        assert!(parse_position("x", 3).is_err());
    }

    #[test]
    fn test_parse_position_without_recipes() {
        let err = parse_position("1", 0).unwrap_err();
        assert!(err.starts_with("No recipes yet."));
        assert!(!err.contains("between"));
    }

    #[test]
    fn test_scan_source() {
        assert_eq!(
            scan_source(" ~/fridge.JPG "),
            ScanSource::Image(PathBuf::from("~/fridge.JPG"))
        );
        assert_eq!(scan_source("photos/shelf.png"), ScanSource::Image(PathBuf::from("photos/shelf.png")));
        assert_eq!(scan_source("caprese salad"), ScanSource::Hint("caprese salad".to_string()));
        assert_eq!(scan_source(""), ScanSource::Hint(String::new()));
    }

    #[test]
    fn test_render_recognized() {
        plain();
        let recognized = RecognizeResponse {
            ingredients: vec!["egg".into(), "cucumber".into()],
            freshness: [("egg".to_string(), "fresh".to_string())].into_iter().collect(),
        };
        assert_eq!(render_recognized(&recognized), "\n📷 Recognized: egg (fresh), cucumber\n");

        let nothing = RecognizeResponse { ingredients: Vec::new(), freshness: Default::default() };
        assert!(render_recognized(&nothing).contains("No ingredients recognized."));
    }

    #[test]
    fn test_empty_pantry_tab() {
        plain();
        let out = render_pantry_tab(&SessionState::new());
        assert!(out.contains("My Pantry (0)"));
        assert!(out.contains("Your pantry is empty."));
        assert!(out.contains("Add ingredients to your pantry to see recipes!"));
    }

    #[test]
    fn test_pantry_tab_lists_cards() {
        plain();
        let mut state = SessionState::new();
        reduce(&mut state, Action::AddIngredient("tomato".into()));
        reduce(&mut state, Action::AddIngredient("egg".into()));
        let generation = state.recipe_generation();
        reduce(&mut state, Action::RecipesLoaded { generation, outcome: Ok(vec![stir_fry()]) });

        let out = render_pantry_tab(&state);
        assert!(out.contains("My Pantry (2)"));
        assert!(out.contains("[1] tomato"));
        assert!(out.contains("1. Tomato Egg Stir-Fry (Chinese) | Match: 75% | Missing: salt, oil"));
        assert!(!out.contains("searching"));
    }

    #[test]
    fn test_loading_marker() {
        plain();
        let mut state = SessionState::new();
        reduce(&mut state, Action::AddIngredient("tomato".into()));
        let out = render_pantry_tab(&state);
        assert!(out.contains("searching..."));
        assert!(!out.contains("Add ingredients"));
    }

    #[test]
    fn test_web_card_and_detail() {
        plain();
        let recipe = web_item_to_recipe(0, WebItem {
            name: "Egg Fried Rice".into(),
            score: None,
            instructions: None,
            url: Some("https://example.com/rice".into()),
        });
        let card = render_recipe_card(2, &recipe, &Pantry::new());
        assert!(card.contains("2. Egg Fried Rice (Web Discovery) | Match: 60% | Missing: see source"));

        let detail = render_recipe_detail(&recipe, &Pantry::new());
        assert!(detail.contains("(not listed)"));
        assert!(detail.contains("Click link to view source"));
        assert!(detail.contains("Source: https://example.com/rice"));
    }

    #[test]
    fn test_local_detail() {
        plain();
        let mut recipe = stir_fry();
        recipe.steps = String::new();
        let detail = render_recipe_detail(&recipe, &pantry(&["egg"]));
        assert!(detail.contains("Chinese | Match: 75%"));
        assert!(detail.contains("✓ egg"));
        assert!(detail.contains("No detailed steps provided."));
        assert!(detail.contains("text=Tomato%20Egg%20Stir-Fry"));
    }

    #[test]
    fn test_shopping_list() {
        plain();
        let recipe = stir_fry();
        let out = render_shopping_list(&recipe, &[
            ShoppingItem { ingredient: "salt".into(), qty: Some("to taste".into()) },
            ShoppingItem { ingredient: "oil".into(), qty: None },
        ]);
        assert!(out.contains("• salt (to taste)"));
        assert!(out.contains("• oil\n"));
        assert!(render_shopping_list(&recipe, &[]).contains("You have everything"));
    }
}
