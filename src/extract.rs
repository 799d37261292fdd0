//! The per-outlet extraction interface.
//!
//! Every outlet implements [`Extractor`]: given the shared HTTP client and
//! a record limit, discover article URLs and parse each into a
//! [`ParsedArticle`](crate::models::ParsedArticle). Outlet-specific
//! configuration (sitemap URLs, listing bases, section filters) lives in
//! the implementing struct, so the registry can hold every outlet behind
//! one trait object.
//!
//! Extractors raise [`ExtractError`] only for failures that invalidate the
//! whole job (unreachable index page, unreadable sitemap). A single bad
//! article is logged and skipped; zero discovered URLs is an empty result,
//! not an error.

use crate::models::ParsedArticle;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Failure of one extraction job.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request failed or returned a non-success status.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A sitemap document could not be read as XML.
    #[error("failed to parse sitemap at {url}: {reason}")]
    Sitemap { url: String, reason: String },
}

/// One outlet's extraction capability.
///
/// `limit` caps the number of articles fetched; `0` means the extractor
/// returns immediately with no records and performs no per-article
/// requests. Implementations apply the normalization rules from
/// [`crate::utils`] before returning.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError>;
}
