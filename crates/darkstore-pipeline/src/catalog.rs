//! Category enumeration and per-category page loading.

use tokio_util::sync::CancellationToken;

use darkstore_core::Product;

use crate::error::CrawlError;
use crate::extract::extract_product;
use crate::selectors;
use crate::source::ElementSource;
use crate::wait::{wait_for_visible, WaitPolicy};

/// Collects category link URLs from the home page's catalog sections.
///
/// Only the first `section_limit` sections contribute; within each, every
/// contained anchor's `href` is taken in document order. Duplicates are
/// kept — traversal order is the contract, not uniqueness.
///
/// # Errors
///
/// [`CrawlError::NotFound`] style lookup errors if the catalog is not
/// rendered, or [`CrawlError::Extraction`] for an anchor without an `href`.
pub async fn category_links<S: ElementSource>(
    source: &S,
    section_limit: usize,
) -> Result<Vec<String>, CrawlError> {
    let sections = source.find_all(selectors::CATALOG_SECTION).await?;

    let mut links = Vec::new();
    for section in sections.iter().take(section_limit) {
        for anchor in source.find_descendants(section, selectors::ANCHOR).await? {
            let href = source.attribute(&anchor, "href").await?.ok_or_else(|| {
                CrawlError::Extraction {
                    field: "category link".to_string(),
                    reason: "catalog anchor has no href".to_string(),
                }
            })?;
            links.push(href);
        }
    }
    Ok(links)
}

/// One loaded category page: its title and product-list groupings.
///
/// Holds a shared borrow of the source for the lifetime of the visit, so the
/// grouping and anchor handles it exposes cannot outlive the page they came
/// from — the next navigation requires the borrow to end first.
pub struct CategoryPage<'a, S: ElementSource> {
    source: &'a S,
    title: String,
    groupings: Vec<S::Element<'a>>,
}

impl<S: ElementSource> std::fmt::Debug for CategoryPage<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryPage")
            .field("title", &self.title)
            .field("groupings", &self.groupings.len())
            .finish_non_exhaustive()
    }
}

/// Navigates to a category page and reads its title and groupings.
///
/// # Errors
///
/// [`CrawlError::Navigation`] if the page fails to load,
/// [`CrawlError::Timeout`] if the listing never renders, or
/// [`CrawlError::Extraction`] for an empty category title. All of these are
/// per-category: the orchestrator skips the category and moves on.
pub async fn visit_category<'a, S: ElementSource>(
    source: &'a mut S,
    url: &str,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<CategoryPage<'a, S>, CrawlError> {
    source.navigate(url).await?;
    // Downgrade to a shared borrow: element handles created from here on
    // keep the source immutably borrowed, so nothing can navigate away
    // while this page's handles are alive.
    let source: &'a S = source;

    wait_for_visible(
        source,
        selectors::CATEGORY_TITLE,
        policy.page_timeout,
        policy.poll_interval,
        cancel,
    )
    .await?;

    let title_element = source.find(selectors::CATEGORY_TITLE).await?;
    let title = source.text(&title_element).await?;
    if title.is_empty() {
        return Err(CrawlError::Extraction {
            field: "category title".to_string(),
            reason: format!("title element on {url} is empty"),
        });
    }

    let groupings = source.find_all(selectors::PRODUCT_LIST).await?;
    tracing::debug!(category = %title, groupings = groupings.len(), "category page loaded");

    Ok(CategoryPage {
        source,
        title,
        groupings,
    })
}

impl<'a, S: ElementSource> CategoryPage<'a, S> {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn groupings(&self) -> &[S::Element<'a>] {
        &self.groupings
    }

    /// The catalog-entry anchors inside one grouping, in document order.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures from the element source.
    pub async fn item_anchors(
        &self,
        grouping: &S::Element<'a>,
    ) -> Result<Vec<S::Element<'a>>, CrawlError> {
        self.source
            .find_descendants(grouping, selectors::ANCHOR)
            .await
    }

    /// Extracts one catalog entry into a [`Product`] under this category's
    /// title.
    ///
    /// # Errors
    ///
    /// See [`extract_product`]; failures are per-item.
    pub async fn extract(&self, anchor: &S::Element<'a>) -> Result<Product, CrawlError> {
        extract_product(self.source, &self.title, anchor).await
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
