use log::warn;

use crate::error::ChefError;
use crate::storage::{Storage, INGREDIENTS_KEY, RECIPE_KEY};

/// Ordered ingredient list persisted to durable storage.
///
/// Every mutation overwrites the stored list with the full current list.
pub struct IngredientStore<S: Storage> {
    storage: S,
    items: Vec<String>,
}

impl<S: Storage> IngredientStore<S> {
    /// Load the list previously persisted in `storage`, if any.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(INGREDIENTS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable ingredient list: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        IngredientStore { storage, items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append the trimmed text. Blank input is ignored and returns `false`.
    pub fn add(&mut self, text: &str) -> Result<bool, ChefError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        self.items.push(trimmed.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Delete the entry at `index`, shifting later entries down.
    /// Out-of-range indices leave the list untouched.
    pub fn remove(&mut self, index: usize) -> Result<Option<String>, ChefError> {
        if index >= self.items.len() {
            return Ok(None);
        }

        let removed = self.items.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Empty the list and discard both the stored list and the stored recipe.
    pub fn clear(&mut self) -> Result<(), ChefError> {
        self.items.clear();
        self.storage.remove(INGREDIENTS_KEY)?;
        self.storage.remove(RECIPE_KEY)
    }

    fn persist(&self) -> Result<(), ChefError> {
        let serialized = serde_json::to_string(&self.items)?;
        self.storage.set(INGREDIENTS_KEY, &serialized)
    }
}
