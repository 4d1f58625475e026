//! CSS selectors used to pull fields out of one product node.
//!
//! Configurable selectors are tried first; each has a built-in fallback
//! that is used when the configured one matches nothing.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Node type holding one catalog entry.
pub const PRODUCT_CONTAINER: &str = "article.product_pod";

pub const DEFAULT_NAME_SELECTOR: &str = "article.product_pod h3 a";
pub const DEFAULT_PRICE_SELECTOR: &str = "article.product_pod p.price_color";
pub const DEFAULT_IMAGE_SELECTOR: &str = "article.product_pod div.image_container img";

pub const NAME_FALLBACK: &str = "h3 a";
pub const PRICE_FALLBACK: &str = "p.price_color";
pub const IMAGE_FALLBACK: &str = "div.image_container img";

pub const AVAILABILITY_SELECTOR: &str = "p.instock.availability";
pub const RATING_SELECTOR: &str = "p.star-rating";
/// Class on the rating node that is not itself a rating label.
pub const RATING_MARKER_CLASS: &str = "star-rating";

/// Selector overrides, as they appear under `web_scraping` in the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectorConfig {
    #[serde(rename = "product_name_selector")]
    pub name: Option<String>,
    #[serde(rename = "product_price_selector")]
    pub price: Option<String>,
    #[serde(rename = "product_description_selector")]
    pub description: Option<String>,
    #[serde(rename = "product_image_selector")]
    pub image: Option<String>,
}

impl FieldSelectorConfig {
    pub fn name_selector(&self) -> &str {
        non_empty(&self.name).unwrap_or(DEFAULT_NAME_SELECTOR)
    }

    pub fn price_selector(&self) -> &str {
        non_empty(&self.price).unwrap_or(DEFAULT_PRICE_SELECTOR)
    }

    pub fn image_selector(&self) -> &str {
        non_empty(&self.image).unwrap_or(DEFAULT_IMAGE_SELECTOR)
    }

    /// Description has no default; `None` means the field is not extracted.
    pub fn description_selector(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A configured selector with the fallback to use when it finds nothing.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    pub primary: Selector,
    pub fallback: Option<Selector>,
}

/// Every selector the extractor needs, compiled once.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub container: Selector,
    pub name: FieldSelector,
    pub price: FieldSelector,
    pub image: FieldSelector,
    pub description: Option<Selector>,
    pub availability: Selector,
    pub rating: Selector,
}

impl CompiledSelectors {
    pub fn compile(config: &FieldSelectorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            container: parse(PRODUCT_CONTAINER)?,
            name: FieldSelector {
                primary: parse(config.name_selector())?,
                fallback: Some(parse(NAME_FALLBACK)?),
            },
            price: FieldSelector {
                primary: parse(config.price_selector())?,
                fallback: Some(parse(PRICE_FALLBACK)?),
            },
            image: FieldSelector {
                primary: parse(config.image_selector())?,
                fallback: Some(parse(IMAGE_FALLBACK)?),
            },
            description: config.description_selector().map(parse).transpose()?,
            availability: parse(AVAILABILITY_SELECTOR)?,
            rating: parse(RATING_SELECTOR)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}
