use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{info, warn};

use super::markdown::render_markdown;
use crate::client::ChefClient;
use crate::error::ChefError;
use crate::ingredients::IngredientStore;
use crate::storage::{Storage, RECIPE_KEY, RECIPE_TITLE_KEY};
use crate::title::extract_title;

/// Sent instead of an empty ingredient list
pub const NO_INGREDIENTS_PLACEHOLDER: &str = "no specific ingredients";

pub const CONNECT_ERROR_MESSAGE: &str =
    "Could not connect to the recipe server. Make sure the server is running on port 3001.";
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate recipe. Please try again.";

/// Ingredient list, generation trigger and recipe display.
///
/// Generation runs as a `begin_generate` / `finish_generate` pair so the
/// in-flight state is observable; [`RecipeView::get_recipe`] does both.
pub struct RecipeView<D: Storage, T: Storage> {
    ingredients: IngredientStore<D>,
    session: T,
    recipe: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl<D: Storage, T: Storage> RecipeView<D, T> {
    /// Restore the ingredient list and last recipe from durable storage.
    pub fn new(durable: D, session: T) -> Self {
        let recipe = durable.get(RECIPE_KEY).filter(|r| !r.is_empty());
        RecipeView {
            ingredients: IngredientStore::load(durable),
            session,
            recipe,
            loading: false,
            error: None,
        }
    }

    pub fn ingredients(&self) -> &[String] {
        self.ingredients.items()
    }

    pub fn recipe(&self) -> Option<&str> {
        self.recipe.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn add_ingredient(&mut self, text: &str) -> Result<bool, ChefError> {
        self.ingredients.add(text)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<Option<String>, ChefError> {
        self.ingredients.remove(index)
    }

    /// Start over: no ingredients, no recipe, no error.
    pub fn clear_all(&mut self) -> Result<(), ChefError> {
        self.ingredients.clear()?;
        self.recipe = None;
        self.error = None;
        Ok(())
    }

    /// Mark a generation as in flight and return the ingredients to send.
    ///
    /// Returns `None` while another generation is outstanding.
    pub fn begin_generate(&mut self) -> Option<Vec<String>> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;

        if self.ingredients.is_empty() {
            Some(vec![NO_INGREDIENTS_PLACEHOLDER.to_string()])
        } else {
            Some(self.ingredients.items().to_vec())
        }
    }

    /// Apply the outcome of a generation started with `begin_generate`.
    ///
    /// Request failures become the displayed error; only storage failures
    /// are returned.
    pub fn finish_generate(&mut self, result: Result<String, ChefError>) -> Result<(), ChefError> {
        self.loading = false;

        match result {
            Ok(recipe) => {
                if !recipe.is_empty() {
                    self.ingredients.storage().set(RECIPE_KEY, &recipe)?;
                }
                let title = extract_title(&recipe);
                info!("Derived recipe title: {}", title);
                self.session.set(RECIPE_TITLE_KEY, &title)?;
                self.recipe = Some(recipe);
            }
            Err(err) => {
                warn!("Recipe generation failed: {}", err);
                self.error = Some(display_message(err));
            }
        }
        Ok(())
    }

    /// Generate a recipe for the current ingredients through the proxy.
    pub async fn get_recipe(&mut self, client: &ChefClient) -> Result<(), ChefError> {
        let Some(ingredients) = self.begin_generate() else {
            return Ok(());
        };
        let result = client.generate_recipe(&ingredients).await;
        self.finish_generate(result)
    }

    /// Render the view as an HTML fragment.
    pub fn render(&self) -> String {
        let mut html = String::from("<main class=\"main-content\">");

        if !self.ingredients.is_empty() {
            html.push_str("<div class=\"ingredients-section\"><h2 class=\"section-title\">Your Ingredients:</h2><ul class=\"ingredient-list\">");
            for ingredient in self.ingredients.items() {
                html.push_str(&format!(
                    "<li class=\"ingredient-item\"><span class=\"ingredient-text\">{}</span><button type=\"button\" class=\"remove-btn\" aria-label=\"Remove {}\">✕</button></li>",
                    encode_text(ingredient),
                    encode_double_quoted_attribute(ingredient)
                ));
            }
            html.push_str("</ul></div>");

            let (disabled, label) = if self.loading {
                (" disabled", "Generating...")
            } else {
                ("", "Get Recipe")
            };
            html.push_str(&format!(
                "<div class=\"recipe-cta\"><button type=\"button\" class=\"get-recipe-btn\"{}>{}</button></div>",
                disabled, label
            ));
        }

        if let Some(error) = &self.error {
            html.push_str(&format!(
                "<div class=\"error-message\"><p>⚠️ {}</p></div>",
                encode_text(error)
            ));
        }

        if let Some(recipe) = &self.recipe {
            html.push_str("<div class=\"recipe-section\"><h2 class=\"section-title\">Your Recipe:</h2><div class=\"recipe-content\">");
            html.push_str(&render_markdown(recipe));
            html.push_str("</div></div>");
        }

        html.push_str("</main>");
        html
    }
}

fn display_message(err: ChefError) -> String {
    match err {
        ChefError::Network(_) => CONNECT_ERROR_MESSAGE.to_string(),
        ChefError::Rejected { message, .. } if !message.is_empty() => message,
        ChefError::Rejected { .. } => GENERATE_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
