use crate::config::ScraperConfig;
use crate::error::MealMatchError;
use crate::extractors::{extract_recipes, recipe_links, ParsingContext, Strategy};
use crate::fetchers::PageFetcher;
use crate::model::Recipe;
use crate::samples::{generate_samples, SampleCatalog};
use log::{debug, info, warn};
use reqwest::Url;

/// Search-results URL for `term`, e.g. `https://cookpad.com/search/ayam%20goreng`.
pub fn search_url(origin: &str, search_path: &str, term: &str) -> Result<String, MealMatchError> {
    let mut url =
        Url::parse(origin).map_err(|e| MealMatchError::InvalidUrl(format!("{origin}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| MealMatchError::InvalidUrl(format!("{origin} cannot be a base URL")))?
        .pop_if_empty()
        .extend(search_path.split('/').filter(|segment| !segment.is_empty()))
        .push(term);

    Ok(url.to_string())
}

/// Scrape recipes for a search term
///
/// This pipeline:
/// 1. Fetches the search-results page
/// 2. Extracts recipe cards (search-cards strategy only)
/// 3. When no card was found, follows up to `max_detail_pages` recipe links
///    one after the other and extracts each detail page, skipping pages that fail
/// 4. Falls back to placeholder recipes when everything above came back empty
///
/// # Returns
/// * `Ok(Vec<Recipe>)` - Scraped recipes, or placeholders
/// * `Err(...)` - Only when the search URL is invalid, or nothing was found
///   and `fallback_to_samples` is off
pub async fn process(
    term: &str,
    config: &ScraperConfig,
    fetcher: &dyn PageFetcher,
    catalog: &SampleCatalog,
) -> Result<Vec<Recipe>, MealMatchError> {
    let url = search_url(&config.origin, &config.search_path, term)?;
    info!("Scraping {} for: {}", config.origin, term);

    let recipes = match fetcher.fetch(&url).await {
        Ok(html) => scrape_results(&html, &url, config, fetcher).await,
        Err(e) => {
            warn!("Scraping error: {}", e);
            Vec::new()
        }
    };

    info!("Found {} recipes", recipes.len());

    if !recipes.is_empty() {
        return Ok(recipes);
    }

    if config.fallback_to_samples {
        warn!("No recipes found, generating sample data...");
        Ok(generate_samples(term, &url, catalog))
    } else {
        Err(MealMatchError::NoRecipesFound(term.to_string()))
    }
}

async fn scrape_results(
    html: &str,
    url: &str,
    config: &ScraperConfig,
    fetcher: &dyn PageFetcher,
) -> Vec<Recipe> {
    let (cards, links) = parse_search_page(html, url, config);
    if !cards.is_empty() {
        return cards;
    }

    debug!("Following {} recipe links", links.len());

    let mut recipes = Vec::new();
    for link in links {
        match fetcher.fetch(&link).await {
            Ok(page) => recipes.extend(parse_detail_page(&page, &link, config)),
            Err(e) => warn!("Skipping {}: {}", link, e),
        }
    }
    recipes
}

// Parsed documents are not Send, so parsing stays in these synchronous helpers
// and never spans an await.

fn parse_search_page(html: &str, url: &str, config: &ScraperConfig) -> (Vec<Recipe>, Vec<String>) {
    let context = ParsingContext::new(html, url, config.origin.as_str())
        .with_min_instruction_len(config.min_instruction_len);

    let cards = match config.strategy {
        Strategy::SearchCards => extract_recipes(&context, Strategy::SearchCards),
        Strategy::DetailPages => Vec::new(),
    };
    if !cards.is_empty() {
        return (cards, Vec::new());
    }

    (Vec::new(), recipe_links(&context, config.max_detail_pages))
}

fn parse_detail_page(html: &str, url: &str, config: &ScraperConfig) -> Vec<Recipe> {
    let context = ParsingContext::new(html, url, config.origin.as_str())
        .with_min_instruction_len(config.min_instruction_len);
    extract_recipes(&context, Strategy::DetailPages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_term() {
        let url = search_url("https://cookpad.com", "search", "ayam masak merah").unwrap();
        assert_eq!(url, "https://cookpad.com/search/ayam%20masak%20merah");
    }

    #[test]
    fn test_search_url_with_nested_path() {
        let url = search_url("https://cookpad.com/", "id/cari", "soto").unwrap();
        assert_eq!(url, "https://cookpad.com/id/cari/soto");
    }

    #[test]
    fn test_search_url_rejects_bad_origin() {
        assert!(search_url("not a url", "search", "soto").is_err());
    }

    #[test]
    fn test_detail_strategy_skips_cards() {
        let html = r#"
            <div class="recipe-card">
                <h3>Card Title</h3>
                <a href="/recipes/1">open</a>
            </div>
        "#;
        let config = ScraperConfig {
            strategy: Strategy::DetailPages,
            ..Default::default()
        };

        let (cards, links) = parse_search_page(html, "https://cookpad.com/search/x", &config);
        assert!(cards.is_empty());
        assert_eq!(links, vec!["https://cookpad.com/recipes/1"]);
    }
}
