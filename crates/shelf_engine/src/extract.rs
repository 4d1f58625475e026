use scraper::{ElementRef, Html, Selector};
use shelf_core::{ProductRecord, UNKNOWN_NAME};
use url::Url;

use crate::normalize::{normalize_price, rating_from_classes, resolve_url};
use crate::selectors::{CompiledSelectors, FieldSelector, FieldSelectorConfig};

pub const DEFAULT_CATEGORY: &str = "Books";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error(transparent)]
    Decode(#[from] crate::DecodeError),
}

/// Turns catalog-page product nodes into normalized records.
///
/// Missing sub-elements never abort a node: each field falls back to its
/// default and extraction carries on.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    selectors: CompiledSelectors,
    category: String,
}

impl ProductExtractor {
    pub fn new(config: &FieldSelectorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            selectors: CompiledSelectors::compile(config)?,
            category: DEFAULT_CATEGORY.to_string(),
        })
    }

    /// Category label stamped on every extracted record.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn extract_html(&self, html: &str, base_url: &Url) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);
        self.extract_document(&document, base_url)
    }

    /// Records in document order; a page without product nodes yields none.
    pub fn extract_document(&self, document: &Html, base_url: &Url) -> Vec<ProductRecord> {
        document
            .select(&self.selectors.container)
            .map(|node| self.extract_node(node, base_url))
            .collect()
    }

    fn extract_node(&self, node: ElementRef<'_>, base_url: &Url) -> ProductRecord {
        let selectors = &self.selectors;

        let link = first_match(node, &selectors.name);
        let name = link
            .and_then(|a| a.value().attr("title"))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| link.map(text_of).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let url = link
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_url(base_url, href))
            .unwrap_or_else(|| base_url.clone());

        let price = first_match(node, &selectors.price)
            .map(text_of)
            .and_then(|text| normalize_price(&text));

        let availability = select_one(node, &selectors.availability)
            .map(text_of)
            .filter(|text| !text.is_empty());

        let description = selectors
            .description
            .as_ref()
            .and_then(|sel| select_one(node, sel))
            .map(text_of)
            .unwrap_or_default();

        let media_path = first_match(node, &selectors.image)
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| resolve_url(base_url, src))
            .unwrap_or_else(|| url.clone());

        // Token order matters, so read the raw attribute rather than the
        // element's class set.
        let rating = select_one(node, &selectors.rating)
            .and_then(|p| p.value().attr("class"))
            .and_then(|classes| rating_from_classes(classes.split_whitespace()));

        ProductRecord {
            name,
            price: None,
            description,
            category: self.category.clone(),
            media_path: media_path.into(),
            rating,
            availability,
            url: url.into(),
        }
        .with_price(price)
    }
}

fn first_match<'a>(node: ElementRef<'a>, field: &FieldSelector) -> Option<ElementRef<'a>> {
    select_one(node, &field.primary).or_else(|| {
        field
            .fallback
            .as_ref()
            .and_then(|fallback| select_one(node, fallback))
    })
}

fn select_one<'a>(node: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    node.select(selector).next()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
