use std::sync::Arc;

use crate::food::api::{RecipeService, RestaurantService};
use crate::food::models::Coordinates;
use crate::food::recommend::find_recipes;
use crate::session::state::{reduce, Action, Command, SessionState};

/// Runs a command against the backend and packages the outcome as the
/// action that completes it. Never touches session state.
pub async fn execute<S>(service: &S, location: Coordinates, command: Command) -> Action
where
    S: RecipeService + RestaurantService + ?Sized,
{
    match command {
        Command::SearchRecipes {
            generation,
            ingredients,
        } => Action::RecipesLoaded {
            generation,
            outcome: find_recipes(service, &ingredients).await,
        },
        Command::SearchRestaurants {
            generation,
            cuisine,
        } => Action::RestaurantsLoaded {
            generation,
            outcome: service.search_restaurants(&cuisine, location).await,
        },
    }
}

/// Owns the session state and the services it talks to.
pub struct SessionController<S> {
    state: SessionState,
    service: Arc<S>,
    location: Coordinates,
}

impl<S> SessionController<S>
where
    S: RecipeService + RestaurantService,
{
    pub fn new(service: Arc<S>, location: Coordinates) -> Self {
        Self {
            state: SessionState::new(),
            service,
            location,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Applies an action and hands back the command it triggered, without running it.
    pub fn begin(&mut self, action: Action) -> Option<Command> {
        reduce(&mut self.state, action)
    }

    /// Feeds a completed command back into the state.
    pub fn apply(&mut self, completion: Action) {
        if let Some(command) = reduce(&mut self.state, completion) {
            log::debug!("Completion unexpectedly produced {:?}", command);
        }
    }

    pub async fn run(&self, command: Command) -> Action {
        execute(self.service.as_ref(), self.location, command).await
    }

    /// Applies an action and, if it triggers a request, awaits it and applies the result.
    pub async fn dispatch(&mut self, action: Action) {
        if let Some(command) = self.begin(action) {
            let completion = self.run(command).await;
            self.apply(completion);
        }
    }
}
