use super::{
    extract_cook_time, extract_ingredients, extract_servings, first_list, first_text,
    image_source, parse_selector, Extractor, ParsingContext,
};
use crate::model::{RecipeDraft, DEFAULT_TITLE};
use crate::normalize::resolve_url;
use log::debug;
use scraper::ElementRef;

pub struct DetailPageExtractor;

const TITLE_SELECTORS: &[&str] = &[
    "h1.recipe-title",
    "[class*='recipe-title']",
    "[class*='recipe_title']",
    "h1",
    "[itemprop='name']",
    "h2",
    "[class*='title']",
];

const IMAGE_CONTAINER_SELECTORS: &[&str] = &[
    "[class*='recipe-image'] img",
    "[class*='recipe_image'] img",
    "[class*='recipe-photo'] img",
    "[id*='recipe_image'] img",
    "img[itemprop='image']",
];

const IMAGE_HINTS: &[&str] = &["recipe", "photo", "dish"];

const INSTRUCTION_SELECTORS: &[&str] = &[
    "[itemprop='recipeInstructions']",
    "[class*='step'] p",
    "[class*='instruction'] li",
    "[class*='direction'] li",
    "[class*='step']",
    "[class*='instruction']",
    "[id*='step'] li",
];

impl DetailPageExtractor {
    fn find_image(&self, root: ElementRef, origin: &str) -> Option<String> {
        // Open Graph first: it is the image the site itself advertises
        let og_image = parse_selector("meta[property='og:image']")
            .and_then(|selector| root.select(&selector).next())
            .and_then(|meta| meta.value().attr("content"))
            .and_then(|content| resolve_url(content, origin));
        if og_image.is_some() {
            return og_image;
        }

        for selector in IMAGE_CONTAINER_SELECTORS.iter().filter_map(|s| parse_selector(s)) {
            if let Some(src) = root
                .select(&selector)
                .find_map(|img| image_source(img, origin))
            {
                return Some(src);
            }
        }

        let images = parse_selector("img")?;

        let hinted = root.select(&images).find(|img| {
            ["class", "id", "alt", "src"].iter().any(|attr| {
                img.value().attr(attr).is_some_and(|value| {
                    let value = value.to_lowercase();
                    IMAGE_HINTS.iter().any(|hint| value.contains(hint))
                })
            })
        });
        if let Some(src) = hinted.and_then(|img| image_source(img, origin)) {
            return Some(src);
        }

        root.select(&images).find_map(|img| image_source(img, origin))
    }

    fn extract_instructions(&self, root: ElementRef, min_len: usize) -> Vec<String> {
        first_list(root, INSTRUCTION_SELECTORS, |text| {
            (text.chars().count() > min_len).then_some(text)
        })
    }
}

impl Extractor for DetailPageExtractor {
    fn parse(&self, context: &ParsingContext) -> Vec<RecipeDraft> {
        debug!("Attempting to extract recipe details from {}", context.url);

        let root = context.document.root_element();

        let ingredients = extract_ingredients(root);
        let instructions = self.extract_instructions(root, context.min_instruction_len);

        if ingredients.is_empty() && instructions.is_empty() {
            debug!("No ingredients or instructions on {}", context.url);
            return Vec::new();
        }

        let title = first_text(root, TITLE_SELECTORS).unwrap_or_else(|| DEFAULT_TITLE.to_string());

        debug!("Recipe name: {}", title);
        debug!("Ingredients count: {}", ingredients.len());
        debug!("Instructions count: {}", instructions.len());

        vec![RecipeDraft {
            title,
            image: self.find_image(root, &context.origin),
            url: Some(context.url.clone()),
            ingredients,
            instructions,
            cook_time: extract_cook_time(root),
            servings: extract_servings(root),
        }]
    }
}
