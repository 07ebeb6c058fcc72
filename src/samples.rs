//! Placeholder recipes used whenever real scraping comes back empty.
//!
//! The server uses them as its last-resort fallback and the offline client
//! uses them when the API is unreachable; both go through [`generate_samples`]
//! so the records look the same either way.

use crate::model::{Recipe, RecipeStamp, DEFAULT_COOK_TIME, DEFAULT_SERVINGS};
use serde::Deserialize;

/// Ingredients suggested by one keyword of a search term.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordIngredients {
    pub keyword: String,
    pub ingredients: Vec<String>,
}

/// Presentation fields that differ between the generated records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleVariant {
    pub image: String,
    pub cook_time: String,
    pub servings: String,
}

/// Keyword table and fixed texts for placeholder recipes.
///
/// Keywords are checked in order, which also fixes the order of the combined
/// ingredient list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SampleCatalog {
    pub keywords: Vec<KeywordIngredients>,
    pub default_ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub variants: Vec<SampleVariant>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn keyword(keyword: &str, ingredients: &[&str]) -> KeywordIngredients {
    KeywordIngredients {
        keyword: keyword.to_string(),
        ingredients: strings(ingredients),
    }
}

fn variant(image: &str, cook_time: &str, servings: &str) -> SampleVariant {
    SampleVariant {
        image: image.to_string(),
        cook_time: cook_time.to_string(),
        servings: servings.to_string(),
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self {
            keywords: vec![
                keyword("ayam", &["chicken", "garlic", "onion", "ginger", "oil", "salt", "pepper"]),
                keyword("nasi", &["rice", "water", "salt", "oil"]),
                keyword("ikan", &["fish", "lemon", "garlic", "salt", "pepper"]),
                keyword("daging", &["beef", "onion", "garlic", "soy sauce", "pepper"]),
                keyword("sayur", &["vegetables", "garlic", "oil", "salt"]),
                keyword("sup", &["broth", "vegetables", "garlic", "salt", "pepper"]),
                keyword("goreng", &["oil", "garlic", "salt", "pepper"]),
                keyword("masak", &["oil", "onion", "garlic", "spices"]),
                keyword("pasta", &["pasta", "tomato sauce", "garlic", "olive oil", "basil"]),
                keyword("salad", &["lettuce", "tomato", "cucumber", "olive oil", "lemon"]),
                keyword("curry", &["curry powder", "coconut milk", "onion", "garlic", "ginger"]),
            ],
            default_ingredients: strings(&[
                "main ingredient",
                "garlic",
                "onion",
                "oil",
                "salt",
                "pepper",
                "water",
            ]),
            instructions: strings(&[
                "Prepare all ingredients and wash thoroughly",
                "Heat oil in a pan or wok over medium heat",
                "Add aromatics (garlic, onion, ginger) and sauté until fragrant",
                "Add main ingredients and cook until done",
                "Season with salt, pepper, and other spices to taste",
                "Serve hot with rice or bread",
            ]),
            variants: vec![
                variant(
                    "https://via.placeholder.com/400x300/FF6B35/FFFFFF?text=Recipe+1",
                    "30 min",
                    "4",
                ),
                variant(
                    "https://via.placeholder.com/400x300/F7931E/FFFFFF?text=Recipe+2",
                    "45 min",
                    "6",
                ),
                variant(
                    "https://via.placeholder.com/400x300/4CAF50/FFFFFF?text=Recipe+3",
                    "20 min",
                    "2",
                ),
            ],
        }
    }
}

impl SampleCatalog {
    /// Ingredients for every keyword found in `term`, first-seen order, no
    /// duplicates. Falls back to the default set when nothing matches.
    pub fn ingredients_for(&self, term: &str) -> Vec<String> {
        let term = term.to_lowercase();
        let mut ingredients: Vec<String> = Vec::new();

        for entry in &self.keywords {
            if !term.contains(&entry.keyword.to_lowercase()) {
                continue;
            }
            for ingredient in &entry.ingredients {
                if !ingredients.contains(ingredient) {
                    ingredients.push(ingredient.clone());
                }
            }
        }

        if ingredients.is_empty() {
            for ingredient in &self.default_ingredients {
                if !ingredients.contains(ingredient) {
                    ingredients.push(ingredient.clone());
                }
            }
        }

        ingredients
    }
}

/// Three placeholder recipes for `term`, stamped with fresh ids and the current time.
pub fn generate_samples(term: &str, search_url: &str, catalog: &SampleCatalog) -> Vec<Recipe> {
    generate_samples_with(term, search_url, catalog, RecipeStamp::fresh)
}

/// Same as [`generate_samples`] with the identity of each record supplied by `stamp`.
pub fn generate_samples_with<F>(
    term: &str,
    search_url: &str,
    catalog: &SampleCatalog,
    mut stamp: F,
) -> Vec<Recipe>
where
    F: FnMut() -> RecipeStamp,
{
    let ingredients = catalog.ingredients_for(term);
    let default_variant = SampleVariant {
        image: String::new(),
        cook_time: DEFAULT_COOK_TIME.to_string(),
        servings: DEFAULT_SERVINGS.to_string(),
    };

    (0..SAMPLE_COUNT)
        .map(|index| {
            let variant = catalog.variants.get(index).unwrap_or(&default_variant);
            let RecipeStamp { id, scraped_at } = stamp();
            Recipe {
                id,
                title: format!("{} Recipe {}", term, index + 1),
                image: Some(variant.image.clone()).filter(|image| !image.is_empty()),
                url: Some(search_url.to_string()),
                ingredients: ingredients.clone(),
                instructions: catalog.instructions.clone(),
                cook_time: variant.cook_time.clone(),
                servings: variant.servings.clone(),
                scraped_at,
            }
        })
        .collect()
}

pub const SAMPLE_COUNT: usize = 3;
