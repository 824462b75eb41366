use thiserror::Error;

/// Error taxonomy for the crawl pipeline.
///
/// Fatality is decided by the caller, not here: the orchestrator treats
/// address-resolution errors as run-fatal, category errors as skip-the-
/// category, and item errors as skip-the-item.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("required element not found: {selector}")]
    NotFound { selector: String },

    #[error("timed out after {waited_secs}s waiting for {what}")]
    Timeout { what: String, waited_secs: u64 },

    /// An ordinal outside `1..=count` was chosen from a candidate list.
    #[error("selection {chosen} is out of range (1..={count})")]
    InvalidSelection { chosen: usize, count: usize },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A backend interaction (click, type, read) failed on a located element.
    #[error("{action} failed: {reason}")]
    Interaction { action: String, reason: String },

    /// A stage that requires at least one candidate enumerated zero.
    #[error("no {what} candidates to choose from")]
    NoCandidates { what: String },

    /// A per-item extraction failure; the orchestrator skips the item.
    #[error("extraction failed for {field}: {reason}")]
    Extraction { field: String, reason: String },

    /// The selection provider could not produce an input (e.g. stdin closed).
    #[error("selection input failed: {reason}")]
    Selection { reason: String },

    #[error("crawl cancelled")]
    Cancelled,
}
