//! The crawl orchestrator: address resolution, then the category sweep.
//!
//! Failure policy: no resolved address means nothing downstream is usable,
//! so address errors are returned as-is. Once crawling, failures are
//! isolated — a category that will not load is skipped, an item that will
//! not extract is skipped — and whatever was already extracted survives in
//! the report.

use tokio_util::sync::CancellationToken;

use darkstore_core::Product;

use crate::address::resolve_address;
use crate::catalog::{category_links, visit_category};
use crate::error::CrawlError;
use crate::selectors;
use crate::source::{ElementSource, SelectionProvider};
use crate::wait::{wait_for_visible, WaitPolicy};

/// Per-category outcome for the run summary.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub title: String,
    pub url: String,
    pub products: usize,
}

/// Everything one crawl produced.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Extracted records, in traversal order.
    pub products: Vec<Product>,
    /// Categories that loaded, in traversal order.
    pub categories: Vec<CategorySummary>,
    pub skipped_categories: usize,
    pub skipped_items: usize,
}

/// Runs the full pipeline over one browser session.
///
/// The session must already be on the storefront entry page.
///
/// # Errors
///
/// Address-resolution failures, a catalog that never renders, and
/// cancellation are fatal and returned. Per-category and per-item failures
/// are logged, counted in the report, and skipped.
pub async fn run<S, P>(
    source: &mut S,
    selections: &mut P,
    policy: &WaitPolicy,
    section_limit: usize,
    cancel: &CancellationToken,
) -> Result<CrawlReport, CrawlError>
where
    S: ElementSource,
    P: SelectionProvider,
{
    resolve_address(&*source, selections, policy, cancel).await?;

    // Confirming the address reloads the page; wait for the catalog to be
    // back before enumerating sections.
    wait_for_visible(
        &*source,
        selectors::CATALOG_SECTION,
        policy.page_timeout,
        policy.poll_interval,
        cancel,
    )
    .await?;

    let links = category_links(&*source, section_limit).await?;
    tracing::info!(categories = links.len(), "starting category traversal");

    let mut report = CrawlReport::default();

    for link in links {
        if cancel.is_cancelled() {
            return Err(CrawlError::Cancelled);
        }

        let page = match visit_category(&mut *source, &link, policy, cancel).await {
            Ok(page) => page,
            Err(CrawlError::Cancelled) => return Err(CrawlError::Cancelled),
            Err(e) => {
                tracing::warn!(url = %link, error = %e, "skipping category");
                report.skipped_categories += 1;
                continue;
            }
        };

        let mut extracted = 0usize;
        for grouping in page.groupings() {
            let anchors = match page.item_anchors(grouping).await {
                Ok(anchors) => anchors,
                Err(e) => {
                    tracing::warn!(category = %page.title(), error = %e, "skipping grouping");
                    report.skipped_items += 1;
                    continue;
                }
            };
            for anchor in &anchors {
                match page.extract(anchor).await {
                    Ok(product) => {
                        report.products.push(product);
                        extracted += 1;
                    }
                    Err(e) => {
                        tracing::warn!(category = %page.title(), error = %e, "skipping item");
                        report.skipped_items += 1;
                    }
                }
            }
        }

        tracing::info!(category = %page.title(), products = extracted, "category extracted");
        report.categories.push(CategorySummary {
            title: page.title().to_string(),
            url: link,
            products: extracted,
        });
    }

    tracing::info!(
        total = report.products.len(),
        skipped_categories = report.skipped_categories,
        skipped_items = report.skipped_items,
        "crawl complete"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
