use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled Recipe";
pub const DEFAULT_COOK_TIME: &str = "30 min";
pub const DEFAULT_SERVINGS: &str = "4";

/// A normalized recipe record, as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    /// Source URL, used as the deduplication key in the store
    pub url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default = "default_cook_time")]
    pub cook_time: String,
    #[serde(default = "default_servings")]
    pub servings: String,
    pub scraped_at: DateTime<Utc>,
}

fn default_cook_time() -> String {
    DEFAULT_COOK_TIME.to_string()
}

fn default_servings() -> String {
    DEFAULT_SERVINGS.to_string()
}

/// Identity of a freshly created record.
///
/// Kept separate from the recipe fields so generators can be driven with
/// fixed values in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStamp {
    pub id: String,
    pub scraped_at: DateTime<Utc>,
}

impl RecipeStamp {
    pub fn fresh() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scraped_at: Utc::now(),
        }
    }
}

/// Fields extracted from markup before the record gets its identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: String,
    pub servings: String,
}

impl RecipeDraft {
    /// Turns the draft into a record. Returns `None` when the title is blank.
    pub fn into_recipe(self, stamp: RecipeStamp) -> Option<Recipe> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Recipe {
            id: stamp.id,
            title: title.to_string(),
            image: self.image,
            url: self.url,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cook_time: non_empty_or(self.cook_time, DEFAULT_COOK_TIME),
            servings: non_empty_or(self.servings, DEFAULT_SERVINGS),
            scraped_at: stamp.scraped_at,
        })
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}
