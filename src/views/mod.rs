//! Headless view models for the browser client.

mod cook;
mod discover;
mod markdown;
mod recipe;

pub use cook::{tutorial_query, CookView, NO_RECIPE_MESSAGE};
pub use discover::{DiscoverFeed, DISCOVER_PAGE_SIZE, DISCOVER_QUERY};
pub use markdown::render_markdown;
pub use recipe::{RecipeView, CONNECT_ERROR_MESSAGE, NO_INGREDIENTS_PLACEHOLDER};
