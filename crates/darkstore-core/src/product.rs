//! The normalized catalog record emitted by the crawl pipeline.

use serde::Serialize;

/// One extracted catalog entry.
///
/// `price` and `old_price` hold digit-only strings: the storefront renders
/// prices as labels like `"199 ₸"` and the pipeline strips everything but
/// the decimal digits. `old_price` is empty when the item is not discounted.
/// `image_url` is empty when image extraction degraded for the item.
///
/// Serialized field names match the downstream CSV column schema
/// (`category,name,url,price,oldPrice,imageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub category: String,
    pub name: String,
    pub url: String,
    pub price: String,
    pub old_price: String,
    pub image_url: String,
}
