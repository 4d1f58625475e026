//! Pure value normalizers applied while extracting a product node.

use shelf_core::Rating;
use url::Url;

use crate::selectors::RATING_MARKER_CLASS;

/// Keeps only digits and `.`, then reads the longest decimal prefix of
/// what is left.
///
/// Returns `None` only when nothing survives the strip ("Free", ""). A
/// remainder without digits (".") reads as zero and trailing junk after
/// the first number is ignored ("1.2.3" is 1.2).
pub fn normalize_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = decimal_prefix(&cleaned).parse::<f64>().unwrap_or(0.0);
    Some(value).filter(|value| value.is_finite())
}

/// Everything up to the second `.`, if any.
fn decimal_prefix(cleaned: &str) -> &str {
    let end = cleaned
        .match_indices('.')
        .nth(1)
        .map(|(index, _)| index)
        .unwrap_or(cleaned.len());
    &cleaned[..end]
}

/// First class token that is not the rating marker, if it is a known label.
pub fn rating_from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Rating> {
    classes
        .into_iter()
        .find(|class| *class != RATING_MARKER_CLASS)
        .and_then(|token| token.parse().ok())
}

/// Resolves `reference` against `base`. Blank, fragment-only and
/// `javascript:` references yield `None`.
pub fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    base.join(trimmed).ok()
}
