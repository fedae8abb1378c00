use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::food::api::{BackendClient, RecipeService};
use crate::food::models::{Coordinates, RecipeId};
use crate::session::{Action, Command, SessionController, SessionState, Tab};

mod dine;
mod pantry;
mod system;

pub use system::help_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive front-end over a [`SessionController`]: parses a line,
/// turns it into session actions and renders the active tab.
pub struct CommandHandler {
    session: SessionController<BackendClient>,
    show_spinner: bool,
}

impl CommandHandler {
    pub fn new(client: BackendClient, location: Coordinates) -> Self {
        Self {
            session: SessionController::new(Arc::new(client), location),
            show_spinner: true,
        }
    }

    pub fn with_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = show_spinner;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<Flow, String> {
        if input.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        if system::is_quit(input) {
            println!("👋 Goodbye!");
            return Ok(Flow::Quit);
        }

        let output = self.run_command(input).await?;
        println!("{}", output);
        Ok(Flow::Continue)
    }

    /// Executes one line and returns what should be shown for it.
    pub async fn run_command(&mut self, input: &str) -> Result<String, String> {
        let input = input.trim();
        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd.to_lowercase().as_str() {
            "help" => Ok(system::help_text()),
            "pantry" | "recipes" | "show" => {
                self.dispatch(Action::SwitchTab(Tab::Pantry)).await;
                Ok(self.view())
            }
            "add" => self.add(arg).await,
            "quick" => self.quick(arg).await,
            "scan" => self.scan(arg).await,
            "remove" | "rm" => self.remove(arg).await,
            "open" => self.open(arg).await,
            "close" => {
                self.dispatch(Action::CloseRecipe).await;
                Ok(self.view())
            }
            "missing" => self.missing(arg).await,
            "source" => self.source(arg),
            "tab" => {
                let tab = Tab::parse(arg).ok_or_else(|| "Usage: tab <pantry|dine>".to_string())?;
                self.dispatch(Action::SwitchTab(tab)).await;
                Ok(self.view())
            }
            "dine" => self.dine(arg).await,
            "status" => self.status().await,
            _ => Err(format!(
                "Unknown command '{}'. Type 'help' for available commands.",
                cmd
            )),
        }
    }

    fn view(&self) -> String {
        let state = self.session.state();
        match state.tab {
            Tab::Pantry => pantry::render_pantry_tab(state),
            Tab::DineOut => dine::render_dine_tab(state),
        }
    }

    async fn dispatch(&mut self, action: Action) {
        let Some(command) = self.session.begin(action) else {
            return;
        };

        let spinner = match &command {
            Command::SearchRecipes { .. } => self.spinner("Finding recipes..."),
            Command::SearchRestaurants { cuisine, .. } => {
                self.spinner(&format!("Searching {} restaurants...", cuisine))
            }
        };

        let completion = self.session.run(command).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        self.session.apply(completion);
    }

    fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_spinner {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.red} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    async fn add(&mut self, arg: &str) -> Result<String, String> {
        if arg.is_empty() {
            return Err("Usage: add <ingredient>[, <ingredient> ...]".to_string());
        }

        self.dispatch(Action::SwitchTab(Tab::Pantry)).await;
        for part in arg.split(',') {
            self.dispatch(Action::SetInput(part.to_string())).await;
            self.dispatch(Action::SubmitInput).await;
        }
        Ok(self.view())
    }

    async fn quick(&mut self, arg: &str) -> Result<String, String> {
        if arg.is_empty() {
            return Ok(pantry::render_quick_add());
        }

        let item = pantry::resolve_quick_add(arg)
            .ok_or_else(|| format!("'{}' is not on the quick-add list. Type 'quick' to see it.", arg))?;
        self.dispatch(Action::SwitchTab(Tab::Pantry)).await;
        self.dispatch(Action::AddIngredient(item.to_string())).await;
        Ok(self.view())
    }

    /// Recognizes ingredients from a photo or hint and adds each to the pantry.
    async fn scan(&mut self, arg: &str) -> Result<String, String> {
        let source = pantry::scan_source(arg);

        let spinner = self.spinner("Recognizing ingredients...");
        let result = self.session.service().recognize(&source).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let recognized = result.map_err(|e| format!("Failed to recognize ingredients: {}", e))?;

        self.dispatch(Action::SwitchTab(Tab::Pantry)).await;
        for item in &recognized.ingredients {
            self.dispatch(Action::AddIngredient(item.clone())).await;
        }

        Ok(format!("{}{}", pantry::render_recognized(&recognized), self.view()))
    }

    async fn remove(&mut self, arg: &str) -> Result<String, String> {
        if arg.is_empty() {
            return Err("Usage: remove <n|ingredient>".to_string());
        }

        let name = pantry::resolve_pantry_item(&self.session.state().pantry, arg)
            .ok_or_else(|| format!("'{}' is not in your pantry.", arg))?;
        self.dispatch(Action::SwitchTab(Tab::Pantry)).await;
        self.dispatch(Action::RemoveIngredient(name)).await;
        Ok(self.view())
    }

    async fn open(&mut self, arg: &str) -> Result<String, String> {
        let index = pantry::parse_position(arg, self.session.state().recipes.len())?;
        self.dispatch(Action::SelectRecipe(index)).await;

        let state = self.session.state();
        state
            .selected
            .as_ref()
            .map(|recipe| pantry::render_recipe_detail(recipe, &state.pantry))
            .ok_or_else(|| "No recipe selected.".to_string())
    }

    async fn missing(&mut self, arg: &str) -> Result<String, String> {
        let state = self.session.state();
        let index = pantry::parse_position(arg, state.recipes.len())?;
        let recipe = state.recipes[index].clone();

        let RecipeId::Local(id) = &recipe.id else {
            return Err("Shopping lists are only available for local recipes.".to_string());
        };

        let missing = self
            .session
            .service()
            .shopping_list(*id, state.pantry.as_slice())
            .await
            .map_err(|e| format!("Failed to build shopping list: {}", e))?;

        Ok(pantry::render_shopping_list(&recipe, &missing))
    }

    fn source(&self, arg: &str) -> Result<String, String> {
        let state = self.session.state();
        let index = pantry::parse_position(arg, state.recipes.len())?;
        let recipe = &state.recipes[index];

        let url = match (&recipe.id, &recipe.image) {
            (RecipeId::Web(_), Some(url)) => url,
            _ => return Err("Only web recipes have a source link.".to_string()),
        };

        webbrowser::open(url).map_err(|e| format!("Failed to open browser: {}", e))?;
        Ok(format!("🔗 Opening {}", url.cyan()))
    }

    async fn dine(&mut self, arg: &str) -> Result<String, String> {
        self.dispatch(Action::SwitchTab(Tab::DineOut)).await;
        if arg.is_empty() {
            return Ok(self.view());
        }

        let cuisine = dine::resolve_cuisine(arg)
            .ok_or_else(|| format!("No cuisine #{}. Type 'dine' to see the list.", arg))?;
        self.dispatch(Action::SearchRestaurants(cuisine)).await;
        Ok(self.view())
    }

    async fn status(&self) -> Result<String, String> {
        let service = self.session.service();
        let status = service
            .health()
            .await
            .map_err(|e| format!("Backend at {} is unreachable: {}", service.base_url(), e))?;
        Ok(format!("✅ Backend at {} reports {}", service.base_url(), status.green()))
    }
}
