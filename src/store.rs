//! Flat JSON file holding every saved recipe.
//!
//! The whole array is read and rewritten on each mutation. Mutations are
//! serialized through a mutex, so one process never interleaves two
//! read-modify-write cycles.

use crate::error::MealMatchError;
use crate::model::Recipe;
use log::{debug, error};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct RecipeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with an empty array if it does not exist yet.
    pub async fn ensure_initialized(&self) -> Result<(), MealMatchError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Creating empty recipe store at {}", self.path.display());
                self.try_write(&[]).await
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn try_read(&self) -> Result<Vec<Recipe>, MealMatchError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&data)?)
    }

    pub async fn try_write(&self, recipes: &[Recipe]) -> Result<(), MealMatchError> {
        let data = serde_json::to_string_pretty(recipes)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    /// All recipes. A missing or unreadable file reads as an empty store.
    pub async fn read_all(&self) -> Vec<Recipe> {
        match self.try_read().await {
            Ok(recipes) => recipes,
            Err(e) => {
                error!("Error reading recipes: {}", e);
                Vec::new()
            }
        }
    }

    /// Writes are not retried; a failure is logged and the change is lost.
    async fn write_all(&self, recipes: &[Recipe]) {
        if let Err(e) = self.try_write(recipes).await {
            error!("Error writing recipes: {}", e);
        }
    }

    /// Appends the recipes whose source URL is not stored yet and returns
    /// exactly the ones that were added.
    ///
    /// Only existing records are compared against, so several new records
    /// sharing a URL are all kept. A missing URL is a key like any other:
    /// once one URL-less record is stored, later ones are skipped.
    pub async fn append_unique(&self, new_recipes: Vec<Recipe>) -> Vec<Recipe> {
        let _guard = self.write_lock.lock().await;

        let mut recipes = self.read_all().await;
        let existing_urls: HashSet<Option<String>> =
            recipes.iter().map(|recipe| recipe.url.clone()).collect();

        let added: Vec<Recipe> = new_recipes
            .into_iter()
            .filter(|recipe| !existing_urls.contains(&recipe.url))
            .collect();

        debug!("Adding {} new recipes to the store", added.len());
        recipes.extend(added.iter().cloned());
        self.write_all(&recipes).await;

        added
    }

    /// Removes the recipe with `id`. Returns whether something was removed;
    /// the file is left untouched when nothing matched.
    pub async fn remove(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        let mut recipes = self.read_all().await;
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id != id);

        if recipes.len() == before {
            return false;
        }
        self.write_all(&recipes).await;
        true
    }
}
