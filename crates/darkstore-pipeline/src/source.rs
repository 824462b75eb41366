//! Capability traits the pipeline is written against.

use crate::error::CrawlError;

/// Element lookup and interaction against the single live page.
///
/// The `Element<'a>` handle borrows the source, and [`navigate`] takes
/// `&mut self`, so the borrow checker rejects any use of a handle obtained
/// before a navigation: a rendered element is only valid until the page it
/// came from is replaced. Within one page, handles may be held and reused
/// freely.
///
/// A lookup that finds nothing is an error (`CrawlError::NotFound`), not an
/// empty result; `find_all`/`find_descendants` return an empty `Vec` instead.
///
/// [`navigate`]: ElementSource::navigate
pub trait ElementSource {
    /// Handle to one rendered element, valid until the next navigation.
    type Element<'a>: Clone
    where
        Self: 'a;

    async fn find(&self, selector: &str) -> Result<Self::Element<'_>, CrawlError>;

    /// All matches in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, CrawlError>;

    async fn find_descendant<'a>(
        &'a self,
        parent: &Self::Element<'a>,
        selector: &str,
    ) -> Result<Self::Element<'a>, CrawlError>;

    /// All matches under `parent` (excluding `parent`), in document order.
    async fn find_descendants<'a>(
        &'a self,
        parent: &Self::Element<'a>,
        selector: &str,
    ) -> Result<Vec<Self::Element<'a>>, CrawlError>;

    async fn text(&self, element: &Self::Element<'_>) -> Result<String, CrawlError>;

    /// Reads an attribute; `Ok(None)` when the attribute is absent.
    async fn attribute(
        &self,
        element: &Self::Element<'_>,
        name: &str,
    ) -> Result<Option<String>, CrawlError>;

    async fn is_visible(&self, element: &Self::Element<'_>) -> Result<bool, CrawlError>;

    async fn click(&self, element: &Self::Element<'_>) -> Result<(), CrawlError>;

    async fn clear(&self, element: &Self::Element<'_>) -> Result<(), CrawlError>;

    async fn type_text(&self, element: &Self::Element<'_>, text: &str)
        -> Result<(), CrawlError>;

    /// Loads `url`, invalidating every outstanding element handle.
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError>;
}

/// Supplies the user-side inputs of address resolution: the city and street
/// queries, and a choice from each candidate list.
///
/// `choose_*` return the 1-based ordinal exactly as displayed next to the
/// candidates; the resolver validates it against the candidate count, so an
/// out-of-range ordinal surfaces as [`CrawlError::InvalidSelection`] rather
/// than a silent default.
pub trait SelectionProvider {
    fn input_city_query(&mut self) -> Result<String, CrawlError>;

    fn input_street_query(&mut self) -> Result<String, CrawlError>;

    fn choose_city(&mut self, candidates: &[String]) -> Result<usize, CrawlError>;

    fn choose_address(&mut self, candidates: &[String]) -> Result<usize, CrawlError>;
}

/// Validates a displayed 1-based ordinal against a candidate count and
/// converts it to a 0-based index.
pub(crate) fn validate_ordinal(chosen: usize, count: usize) -> Result<usize, CrawlError> {
    if chosen == 0 || chosen > count {
        return Err(CrawlError::InvalidSelection { chosen, count });
    }
    Ok(chosen - 1)
}
