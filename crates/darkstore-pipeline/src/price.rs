//! Price-label normalization.
//!
//! The storefront renders prices as free-form labels (`"199 ₸"`,
//! `"1 250,00"`). Downstream consumers expect a digits-only canonical form,
//! so normalization keeps the decimal digits in their original order and
//! drops everything else, currency symbols and separators alike.

use crate::error::CrawlError;

/// Normalized current/old price pair for one item.
///
/// `old` is empty when the item is not discounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePair {
    pub current: String,
    pub old: String,
}

/// Keeps only the decimal digits of a price label, in order.
#[must_use]
pub fn normalize_price(label: &str) -> String {
    label.chars().filter(char::is_ascii_digit).collect()
}

/// Interprets the price spans of one item's price region.
///
/// One span is the current price. Two spans mean the first is the
/// struck-through pre-discount price and the second the current one; extra
/// spans beyond two are ignored.
///
/// # Errors
///
/// Returns [`CrawlError::Extraction`] when `labels` is empty — an item
/// without a price is not a valid record.
pub fn split_price_labels(labels: &[String]) -> Result<PricePair, CrawlError> {
    match labels {
        [] => Err(CrawlError::Extraction {
            field: "price".to_string(),
            reason: "price region contains no price spans".to_string(),
        }),
        [current] => Ok(PricePair {
            current: normalize_price(current),
            old: String::new(),
        }),
        [old, current, ..] => Ok(PricePair {
            current: normalize_price(current),
            old: normalize_price(old),
        }),
    }
}
