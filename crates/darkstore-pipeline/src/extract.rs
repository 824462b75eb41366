//! Conversion of one catalog-entry anchor into a normalized [`Product`].

use darkstore_core::Product;

use crate::error::CrawlError;
use crate::price::split_price_labels;
use crate::selectors;
use crate::source::ElementSource;

/// Extracts a [`Product`] from one catalog-entry anchor.
///
/// The name, link, and price region are required; an item missing any of
/// them is not a usable record. The image is not: when the image region or
/// its `src` cannot be read, the record is still emitted with an empty
/// `image_url` and a warning.
///
/// # Errors
///
/// [`CrawlError::NotFound`] for a missing required sub-element, or
/// [`CrawlError::Extraction`] for an empty name, a missing/empty `href`, or
/// a price region without usable digits. All failures are per-item.
pub async fn extract_product<'a, S: ElementSource>(
    source: &'a S,
    category: &str,
    anchor: &S::Element<'a>,
) -> Result<Product, CrawlError> {
    let name_element = source
        .find_descendant(anchor, selectors::PRODUCT_NAME)
        .await?;
    let name = source.text(&name_element).await?;
    if name.is_empty() {
        return Err(CrawlError::Extraction {
            field: "name".to_string(),
            reason: "name element is empty".to_string(),
        });
    }

    let url = source
        .attribute(anchor, "href")
        .await?
        .filter(|href| !href.is_empty())
        .ok_or_else(|| CrawlError::Extraction {
            field: "url".to_string(),
            reason: format!("catalog anchor for \"{name}\" has no href"),
        })?;

    let actions = source
        .find_descendant(anchor, selectors::PRODUCT_ACTIONS)
        .await?;
    let price_container = source.find_descendant(&actions, selectors::SPAN).await?;
    let price_spans = source
        .find_descendants(&price_container, selectors::SPAN)
        .await?;
    let mut labels = Vec::with_capacity(price_spans.len());
    for span in &price_spans {
        labels.push(source.text(span).await?);
    }
    let prices = split_price_labels(&labels)?;
    if prices.current.is_empty() {
        return Err(CrawlError::Extraction {
            field: "price".to_string(),
            reason: "price label contains no digits".to_string(),
        });
    }

    let image_url = match image_src(source, anchor).await {
        Ok(src) => src,
        Err(e) => {
            tracing::warn!(product = %name, error = %e, "image extraction degraded");
            String::new()
        }
    };

    Ok(Product {
        category: category.to_string(),
        name,
        url,
        price: prices.current,
        old_price: prices.old,
        image_url,
    })
}

async fn image_src<'a, S: ElementSource>(
    source: &'a S,
    anchor: &S::Element<'a>,
) -> Result<String, CrawlError> {
    let region = source
        .find_descendant(anchor, selectors::PRODUCT_IMAGE)
        .await?;
    let image = source.find_descendant(&region, selectors::IMAGE).await?;
    source
        .attribute(&image, "src")
        .await?
        .ok_or_else(|| CrawlError::Extraction {
            field: "imageUrl".to_string(),
            reason: "image element has no src".to_string(),
        })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
