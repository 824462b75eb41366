//! The navigation/extraction pipeline: address resolution, category
//! traversal, and product extraction against a live storefront page.
//!
//! The pipeline never talks to a browser directly. It consumes two
//! capabilities: an [`ElementSource`] (element lookup, reads, clicks,
//! navigation) and a [`SelectionProvider`] (city/street queries and
//! candidate choices). Both are traits so the whole pipeline runs against
//! deterministic in-memory implementations in tests.

pub mod address;
pub mod catalog;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod price;
pub mod selectors;
pub mod source;
pub mod wait;

pub use crawl::{CategorySummary, CrawlReport};
pub use error::CrawlError;
pub use source::{ElementSource, SelectionProvider};
pub use wait::WaitPolicy;

#[cfg(test)]
pub(crate) mod testing;
