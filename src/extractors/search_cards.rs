use super::{
    extract_cook_time, extract_ingredients, extract_servings, first_text, image_source,
    parse_selector, Extractor, ParsingContext,
};
use crate::model::RecipeDraft;
use crate::normalize::resolve_url;
use log::debug;
use scraper::ElementRef;

pub struct SearchCardExtractor;

/// Card containers, most specific first. The first selector that yields an
/// accepted card wins.
const CARD_SELECTORS: &[&str] = &[
    ".recipe-preview",
    ".recipe-card",
    "li[id^='recipe_']",
    "[class*='recipe']",
];

const CARD_TITLE_SELECTORS: &[&str] = &["h2", "h3", ".recipe-title", "[class*='title']"];

impl SearchCardExtractor {
    fn parse_card(&self, card: ElementRef, origin: &str) -> Option<RecipeDraft> {
        let title = first_text(card, CARD_TITLE_SELECTORS)?;

        let image = parse_selector("img")
            .and_then(|selector| card.select(&selector).next())
            .and_then(|img| image_source(img, origin));

        let href = if card.value().name() == "a" {
            card.value().attr("href")
        } else {
            parse_selector("a[href]")
                .and_then(|selector| card.select(&selector).next())
                .and_then(|anchor| anchor.value().attr("href"))
        };

        Some(RecipeDraft {
            title,
            image,
            url: href.and_then(|href| resolve_url(href, origin)),
            ingredients: extract_ingredients(card),
            instructions: Vec::new(),
            cook_time: extract_cook_time(card),
            servings: extract_servings(card),
        })
    }
}

impl Extractor for SearchCardExtractor {
    fn parse(&self, context: &ParsingContext) -> Vec<RecipeDraft> {
        debug!("Attempting to extract recipe cards from {}", context.url);

        for (selector_str, selector) in CARD_SELECTORS
            .iter()
            .filter_map(|s| parse_selector(s).map(|selector| (s, selector)))
        {
            let mut drafts: Vec<RecipeDraft> = Vec::new();

            for card in context.document.select(&selector) {
                let Some(draft) = self.parse_card(card, &context.origin) else {
                    continue;
                };
                let duplicate = drafts
                    .iter()
                    .any(|seen| seen.title == draft.title && seen.url == draft.url);
                if !duplicate {
                    drafts.push(draft);
                }
            }

            if !drafts.is_empty() {
                debug!("Found {} recipe cards using: {}", drafts.len(), selector_str);
                return drafts;
            }
        }

        Vec::new()
    }
}
