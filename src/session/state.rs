use log::{debug, warn};

use crate::food::api::ServiceError;
use crate::food::models::{Recipe, Restaurant};
use crate::food::pantry::Pantry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pantry,
    DineOut,
}

impl Tab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pantry" | "recipes" => Some(Tab::Pantry),
            "dine" | "dineout" | "dine-out" | "restaurants" => Some(Tab::DineOut),
            _ => None,
        }
    }
}

/// Everything the client shows. Mutated only through [`reduce`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub pantry: Pantry,
    pub input: String,
    pub tab: Tab,
    pub recipes: Vec<Recipe>,
    pub selected: Option<Recipe>,
    pub recipes_loading: bool,
    pub restaurants: Vec<Restaurant>,
    pub restaurants_loading: bool,
    /// Message of the last failed recipe search; cleared by the next successful one.
    pub recipe_error: Option<String>,
    /// Same for restaurant searches. The two are never cleared by each other.
    pub restaurant_error: Option<String>,
    recipe_generation: u64,
    restaurant_generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipe_generation(&self) -> u64 {
        self.recipe_generation
    }

    pub fn restaurant_generation(&self) -> u64 {
        self.restaurant_generation
    }

    /// Bumps the recipe generation and decides what a pantry change implies:
    /// a fresh search when items remain, a hard reset when it is empty.
    fn pantry_changed(&mut self) -> Option<Command> {
        self.recipe_generation += 1;

        if self.pantry.is_empty() {
            self.recipes.clear();
            self.recipes_loading = false;
            return None;
        }

        self.recipes_loading = true;
        Some(Command::SearchRecipes {
            generation: self.recipe_generation,
            ingredients: self.pantry.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetInput(String),
    /// Adds whatever is in the input field.
    SubmitInput,
    AddIngredient(String),
    RemoveIngredient(String),
    SwitchTab(Tab),
    SelectRecipe(usize),
    CloseRecipe,
    SearchRestaurants(String),
    RecipesLoaded {
        generation: u64,
        outcome: Result<Vec<Recipe>, ServiceError>,
    },
    RestaurantsLoaded {
        generation: u64,
        outcome: Result<Vec<Restaurant>, ServiceError>,
    },
}

/// Side effect requested by a transition; executed outside the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SearchRecipes {
        generation: u64,
        ingredients: Vec<String>,
    },
    SearchRestaurants {
        generation: u64,
        cuisine: String,
    },
}

/// Applies `action` to `state` and returns the command it triggers, if any.
pub fn reduce(state: &mut SessionState, action: Action) -> Option<Command> {
    match action {
        Action::SetInput(text) => {
            state.input = text;
            None
        }
        Action::SubmitInput => {
            let raw = std::mem::take(&mut state.input);
            add_ingredient(state, &raw)
        }
        Action::AddIngredient(raw) => {
            state.input.clear();
            add_ingredient(state, &raw)
        }
        Action::RemoveIngredient(name) => {
            if state.pantry.remove(&name) {
                state.pantry_changed()
            } else {
                None
            }
        }
        Action::SwitchTab(tab) => {
            state.tab = tab;
            None
        }
        Action::SelectRecipe(index) => {
            state.selected = state.recipes.get(index).cloned();
            None
        }
        Action::CloseRecipe => {
            state.selected = None;
            None
        }
        Action::SearchRestaurants(cuisine) => {
            let cuisine = cuisine.trim().to_string();
            if cuisine.is_empty() {
                return None;
            }
            state.restaurant_generation += 1;
            state.restaurants_loading = true;
            Some(Command::SearchRestaurants {
                generation: state.restaurant_generation,
                cuisine,
            })
        }
        Action::RecipesLoaded { generation, outcome } => {
            if generation != state.recipe_generation {
                debug!(
                    "Discarding stale recipe results (generation {} < {})",
                    generation, state.recipe_generation
                );
                return None;
            }
            state.recipes_loading = false;
            match outcome {
                Ok(recipes) => {
                    state.recipes = recipes;
                    state.recipe_error = None;
                }
                Err(e) => {
                    warn!("Recipe search failed: {}", e);
                    state.recipe_error = Some(e.to_string());
                }
            }
            None
        }
        Action::RestaurantsLoaded { generation, outcome } => {
            if generation != state.restaurant_generation {
                debug!(
                    "Discarding stale restaurant results (generation {} < {})",
                    generation, state.restaurant_generation
                );
                return None;
            }
            state.restaurants_loading = false;
            match outcome {
                Ok(restaurants) => {
                    state.restaurants = restaurants;
                    state.restaurant_error = None;
                }
                Err(e) => {
                    warn!("Restaurant search failed: {}", e);
                    state.restaurant_error = Some(e.to_string());
                }
            }
            None
        }
    }
}

fn add_ingredient(state: &mut SessionState, raw: &str) -> Option<Command> {
    if state.pantry.add(raw) {
        state.pantry_changed()
    } else {
        None
    }
}
