pub mod client;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod providers;
pub mod server;
pub mod storage;
pub mod title;
pub mod views;

pub use client::ChefClient;
pub use config::{ClientConfig, ServerConfig};
pub use error::ChefError;
pub use ingredients::IngredientStore;
pub use model::{DiscoverResponse, ErrorEnvelope, GenerateResponse, Video, VideoSearchResponse};
pub use server::{build_router, serve, AppState};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use title::{extract_title, TitleRule, FALLBACK_TITLE};
pub use views::{CookView, DiscoverFeed, RecipeView};
