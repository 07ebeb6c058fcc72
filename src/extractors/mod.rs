use crate::model::{Recipe, RecipeDraft, RecipeStamp, DEFAULT_COOK_TIME, DEFAULT_SERVINGS};
use crate::normalize::{
    clean_ingredient, collapse_whitespace, first_number, is_section_label, resolve_url,
};
use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

mod detail_page;
mod search_cards;

pub use detail_page::DetailPageExtractor;
pub use search_cards::SearchCardExtractor;

pub const DEFAULT_MIN_INSTRUCTION_LEN: usize = 10;

/// Longest text accepted as a cook time; anything longer is a whole block.
const MAX_TIME_LEN: usize = 50;

const INGREDIENT_SELECTORS: &[&str] = &[
    "[itemprop='recipeIngredient']",
    "[class*='ingredient'] li",
    "li[class*='ingredient']",
    "[id*='ingredient'] li",
    "[class*='ingredient']",
];

const COOK_TIME_SELECTORS: &[&str] = &[
    "[class*='cook-time']",
    "[class*='cooking-time']",
    "[class*='time']",
    "[class*='duration']",
];

const SERVINGS_SELECTORS: &[&str] = &[
    "[class*='serving']",
    "[class*='portion']",
    "[class*='yield']",
    "[id*='serving']",
];

const LINK_SELECTORS: &[&str] = &["a[href*='/recipe']", "a[href*='recipes']", "a[href*='/resep']"];

/// A parsed page plus what is needed to make its links absolute.
pub struct ParsingContext {
    pub url: String,
    pub origin: String,
    pub document: Html,
    pub min_instruction_len: usize,
}

impl ParsingContext {
    pub fn new(html: &str, url: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: origin.into(),
            document: Html::parse_document(html),
            min_instruction_len: DEFAULT_MIN_INSTRUCTION_LEN,
        }
    }

    pub fn with_min_instruction_len(mut self, len: usize) -> Self {
        self.min_instruction_len = len;
        self
    }
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Vec<RecipeDraft>;
}

/// Which selector heuristics to run against a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recipe cards on a search-results page; follows links only when no card is found
    #[default]
    SearchCards,
    /// A single recipe page; the scrape pipeline always follows links
    DetailPages,
}

impl Strategy {
    pub fn extractor(&self) -> Box<dyn Extractor> {
        match self {
            Strategy::SearchCards => Box::new(SearchCardExtractor),
            Strategy::DetailPages => Box::new(DetailPageExtractor),
        }
    }
}

/// Runs the extractor for `strategy` and gives every accepted draft an identity.
pub fn extract_recipes(context: &ParsingContext, strategy: Strategy) -> Vec<Recipe> {
    strategy
        .extractor()
        .parse(context)
        .into_iter()
        .filter_map(|draft| draft.into_recipe(RecipeStamp::fresh()))
        .collect()
}

/// Links worth following from a search page: card links first, then anchors
/// that look like recipe URLs. Deduplicated and capped at `limit`.
pub fn recipe_links(context: &ParsingContext, limit: usize) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    let mut push = |link: String| {
        if link != context.url && !link.contains("/search") && !links.contains(&link) {
            links.push(link);
        }
    };

    for draft in SearchCardExtractor.parse(context) {
        if let Some(url) = draft.url {
            push(url);
        }
    }

    for selector in LINK_SELECTORS.iter().filter_map(|s| parse_selector(s)) {
        for anchor in context.document.select(&selector) {
            if let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_url(href, &context.origin))
            {
                push(link);
            }
        }
    }

    links.truncate(limit);
    debug!("Found {} recipe links on {}", links.len(), context.url);
    links
}

pub(crate) fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Text content of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// First non-empty text among `selectors`, tried in order.
pub(crate) fn first_text(root: ElementRef, selectors: &[&str]) -> Option<String> {
    for selector in selectors.iter().filter_map(|s| parse_selector(s)) {
        for element in root.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Texts of the innermost elements matching the first selector that yields
/// anything after `keep` filtering.
pub(crate) fn first_list<F>(root: ElementRef, selectors: &[&str], keep: F) -> Vec<String>
where
    F: Fn(String) -> Option<String>,
{
    for (selector_str, selector) in selectors
        .iter()
        .filter_map(|s| parse_selector(s).map(|selector| (s, selector)))
    {
        let items: Vec<String> = root
            .select(&selector)
            // Nested matches would repeat their children's text
            .filter(|element| !has_matching_descendant(*element, &selector))
            .filter_map(|element| keep(element_text(element)))
            .collect();

        if !items.is_empty() {
            debug!("Found {} items using selector: {}", items.len(), selector_str);
            return items;
        }
    }
    Vec::new()
}

fn has_matching_descendant(element: ElementRef, selector: &Selector) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|descendant| selector.matches(&descendant))
}

pub(crate) fn extract_ingredients(root: ElementRef) -> Vec<String> {
    first_list(root, INGREDIENT_SELECTORS, |text| {
        if is_section_label(&text) {
            None
        } else {
            clean_ingredient(&text)
        }
    })
}

pub(crate) fn extract_cook_time(root: ElementRef) -> String {
    for selector in COOK_TIME_SELECTORS.iter().filter_map(|s| parse_selector(s)) {
        for element in root.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() && text.chars().count() <= MAX_TIME_LEN {
                return text;
            }
        }
    }
    DEFAULT_COOK_TIME.to_string()
}

pub(crate) fn extract_servings(root: ElementRef) -> String {
    for selector in SERVINGS_SELECTORS.iter().filter_map(|s| parse_selector(s)) {
        for element in root.select(&selector) {
            let near = std::iter::once(element).chain(element.parent().and_then(ElementRef::wrap));
            for candidate in near {
                if let Some(number) = first_number(&element_text(candidate)) {
                    return number;
                }
            }
        }
    }
    DEFAULT_SERVINGS.to_string()
}

/// `src`, falling back to the lazy-load `data-src`.
pub(crate) fn image_source(image: ElementRef, origin: &str) -> Option<String> {
    ["src", "data-src"]
        .iter()
        .filter_map(|attr| image.value().attr(attr))
        .find_map(|value| resolve_url(value, origin))
}
