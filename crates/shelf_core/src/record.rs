use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown item";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Star rating carried by a product's rating node as a CSS class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRating(pub String);

impl fmt::Display for UnknownRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rating token {:?}", self.0)
    }
}

impl std::error::Error for UnknownRating {}

impl FromStr for Rating {
    type Err = UnknownRating;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "One" => Ok(Rating::One),
            "Two" => Ok(Rating::Two),
            "Three" => Ok(Rating::Three),
            "Four" => Ok(Rating::Four),
            "Five" => Ok(Rating::Five),
            other => Err(UnknownRating(other.to_string())),
        }
    }
}

/// One normalized catalog entry.
///
/// Field order here is the canonical attribute order used by the JSON
/// export and by the `Display` description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: Option<f64>,
    pub description: String,
    pub category: String,
    pub media_path: String,
    pub rating: Option<Rating>,
    pub availability: Option<String>,
    pub url: String,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            price: None,
            description: String::new(),
            category: UNCATEGORIZED.to_string(),
            media_path: String::new(),
            rating: None,
            availability: None,
            url: String::new(),
        }
    }
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the price, discarding negative or non-finite values.
    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price.filter(|p| p.is_finite() && *p >= 0.0);
        self
    }

    /// Price used for ordering and sums: absent counts as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Natural ordering of records: ascending by price.
    pub fn cmp_by_price(&self, other: &Self) -> Ordering {
        self.price_or_zero().total_cmp(&other.price_or_zero())
    }

    pub fn availability_contains(&self, needle: &str) -> bool {
        self.availability
            .as_deref()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product name={:?}, price={}, description={:?}, category={:?}, media_path={:?}, rating={}, availability={}, url={:?}",
            self.name,
            self.price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "none".to_string()),
            self.description,
            self.category,
            self.media_path,
            self.rating.map(Rating::as_str).unwrap_or("none"),
            self.availability
                .as_deref()
                .map(|a| format!("{a:?}"))
                .unwrap_or_else(|| "none".to_string()),
            self.url,
        )
    }
}
