//! Ranks recipes by how much of their ingredient list the pantry covers.
//!
//! Matching is a loose, case-insensitive substring test in both directions,
//! so "onion" matches "red onion" and "red onion powder" matches "onion".
//! This also means "pepper" matches "bell pepper"; that is accepted.

use crate::model::Recipe;
use crate::pantry::Pantry;
use serde::Serialize;

/// Coverage of one recipe by the pantry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub matched_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
    pub match_percentage: f64,
}

/// A recipe as shown to the user. `score` is `None` when the pantry is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch<'a> {
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    #[serde(flatten)]
    pub score: Option<MatchScore>,
}

fn ingredient_matches(ingredient: &str, pantry: &[String]) -> bool {
    let ingredient = ingredient.to_lowercase();
    pantry.iter().any(|item| {
        let item = item.to_lowercase();
        ingredient.contains(&item) || item.contains(&ingredient)
    })
}

/// Scores a single recipe against the pantry entries.
pub fn score_recipe(recipe: &Recipe, pantry: &[String]) -> MatchScore {
    let (matched, missing): (Vec<String>, Vec<String>) = recipe
        .ingredients
        .iter()
        .cloned()
        .partition(|ingredient| ingredient_matches(ingredient, pantry));

    let match_percentage = if recipe.ingredients.is_empty() {
        0.0
    } else {
        matched.len() as f64 / recipe.ingredients.len() as f64 * 100.0
    };

    MatchScore {
        matched_ingredients: matched,
        missing_ingredients: missing,
        match_percentage,
    }
}

/// Recipes the pantry can (partly) cover, best coverage first.
///
/// With an empty pantry every recipe comes back unscored in its original
/// order. Otherwise recipes without a single match are dropped and the rest
/// are sorted by descending percentage; ties keep their original order.
pub fn match_recipes<'a>(pantry: &Pantry, recipes: &'a [Recipe]) -> Vec<RecipeMatch<'a>> {
    if pantry.is_empty() {
        return recipes
            .iter()
            .map(|recipe| RecipeMatch { recipe, score: None })
            .collect();
    }

    let mut scored: Vec<(RecipeMatch<'a>, f64)> = recipes
        .iter()
        .map(|recipe| (recipe, score_recipe(recipe, pantry.items())))
        .filter(|(_, score)| score.match_percentage > 0.0)
        .map(|(recipe, score)| {
            let percentage = score.match_percentage;
            (
                RecipeMatch {
                    recipe,
                    score: Some(score),
                },
                percentage,
            )
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored.into_iter().map(|(matched, _)| matched).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecipeDraft, RecipeStamp};

    fn recipe(title: &str, ingredients: &[&str]) -> Recipe {
        RecipeDraft {
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
        .into_recipe(RecipeStamp::fresh())
        .unwrap()
    }

    fn titles(matches: &[RecipeMatch]) -> Vec<String> {
        matches.iter().map(|m| m.recipe.title.clone()).collect()
    }

    #[test]
    fn test_empty_pantry_returns_everything_in_order() {
        let recipes = vec![
            recipe("b", &["rice"]),
            recipe("a", &[]),
            recipe("c", &["fish"]),
        ];
        let matches = match_recipes(&Pantry::new(), &recipes);

        assert_eq!(titles(&matches), vec!["b", "a", "c"]);
        assert!(matches.iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn test_partial_overlap() {
        let recipes = vec![recipe("soup", &["chicken", "garlic", "onion"])];
        let pantry: Pantry = ["garlic"].into_iter().collect();
        let matches = match_recipes(&pantry, &recipes);

        assert_eq!(matches.len(), 1);
        let score = matches[0].score.as_ref().unwrap();
        assert!((score.match_percentage - 33.333).abs() < 0.01);
        assert_eq!(score.matched_ingredients, vec!["garlic"]);
        assert_eq!(score.missing_ingredients, vec!["chicken", "onion"]);
    }

    #[test]
    fn test_substring_matches_both_ways() {
        let pantry = vec!["onion".to_string()];
        let score = score_recipe(&recipe("x", &["red onion powder"]), &pantry);
        assert_eq!(score.matched_ingredients, vec!["red onion powder"]);

        let pantry = vec!["fresh garlic cloves".to_string()];
        let score = score_recipe(&recipe("x", &["Garlic"]), &pantry);
        assert_eq!(score.match_percentage, 100.0);
    }

    #[test]
    fn test_loose_matching_false_positives_are_kept() {
        let pantry = vec!["pepper".to_string()];
        let score = score_recipe(&recipe("x", &["black pepper", "bell pepper"]), &pantry);
        assert_eq!(score.match_percentage, 100.0);
    }

    #[test]
    fn test_recipe_without_ingredients_scores_zero() {
        let score = score_recipe(&recipe("x", &[]), &["salt".to_string()]);
        assert_eq!(score.match_percentage, 0.0);
        assert!(score.missing_ingredients.is_empty());
    }

    #[test]
    fn test_ranking_is_stable_and_drops_zero_matches() {
        let recipes = vec![
            recipe("half-1", &["rice", "fish"]),
            recipe("none", &["beef"]),
            recipe("full", &["rice"]),
            recipe("half-2", &["rice", "tofu"]),
            recipe("empty", &[]),
        ];
        let pantry: Pantry = ["rice"].into_iter().collect();
        let matches = match_recipes(&pantry, &recipes);

        assert_eq!(titles(&matches), vec!["full", "half-1", "half-2"]);
        let percentages: Vec<f64> = matches
            .iter()
            .map(|m| m.score.as_ref().unwrap().match_percentage)
            .collect();
        assert_eq!(percentages, vec![100.0, 50.0, 50.0]);
    }
}
