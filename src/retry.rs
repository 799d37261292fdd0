//! Job-level retry with increasing backoff.
//!
//! One outlet fetch is cheap relative to the whole run and has no side
//! effects to undo, so the retry unit is the entire extraction job: on any
//! error the job is re-run from scratch after waiting
//! `sleep_base * attempt_number`. After `retries` consecutive failures the
//! job is abandoned and reported as [`JobOutcome::Failed`]. Errors never
//! cross this boundary as `Err`; the aggregator only ever folds outcomes.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// How often and how patiently one job is retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt count. A value of 0 is treated as 1.
    pub retries: usize,
    /// Wait between attempts grows linearly: `sleep_base * attempt_number`.
    pub sleep_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            sleep_base: Duration::from_secs(2),
        }
    }
}

/// What one retry-wrapped job reported back.
///
/// "Zero articles found" ([`Empty`](JobOutcome::Empty)) and "gave up"
/// ([`Failed`](JobOutcome::Failed)) both contribute nothing to the
/// consolidated table, but the distinction is kept for diagnostics.
#[derive(Debug)]
pub enum JobOutcome {
    Records(Vec<ParsedArticle>),
    Empty,
    Failed(ExtractError),
}

impl JobOutcome {
    fn from_result(articles: Vec<ParsedArticle>) -> Self {
        if articles.is_empty() {
            JobOutcome::Empty
        } else {
            JobOutcome::Records(articles)
        }
    }
}

/// Run one extraction job, retrying on any error.
///
/// Attempts the extractor up to `policy.retries` times, sleeping
/// `policy.sleep_base * attempt_number` after each failure. The extractor
/// call itself is not cancelled or timed out here; only its own per-request
/// timeouts bound an attempt.
pub async fn run_with_retry(
    medio: &str,
    extractor: &dyn Extractor,
    client: &Client,
    limit: usize,
    policy: &RetryPolicy,
) -> JobOutcome {
    let retries = policy.retries.max(1);
    let mut attempt = 0usize;

    loop {
        attempt += 1;
        info!(medio, attempt, max = retries, "Attempting extraction");
        match extractor.extract(client, limit).await {
            Ok(articles) => {
                info!(medio, count = articles.len(), "Extraction succeeded");
                return JobOutcome::from_result(articles);
            }
            Err(e) => {
                if attempt >= retries {
                    error!(medio, attempt, error = %e, "Extraction failed definitively");
                    return JobOutcome::Failed(e);
                }
                let delay = policy.sleep_base * attempt as u32;
                warn!(
                    medio,
                    attempt,
                    max = retries,
                    ?delay,
                    error = %e,
                    "Extraction attempt failed; backing off"
                );
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `fail_times` invocations, then returns `articles`.
    struct FlakyExtractor {
        fail_times: usize,
        articles: Vec<ParsedArticle>,
        calls: AtomicUsize,
    }

    impl FlakyExtractor {
        fn new(fail_times: usize, articles: Vec<ParsedArticle>) -> Self {
            Self {
                fail_times,
                articles,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Extractor for FlakyExtractor {
        async fn extract(
            &self,
            _client: &Client,
            _limit: usize,
        ) -> Result<Vec<ParsedArticle>, ExtractError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_times {
                Err(ExtractError::Sitemap {
                    url: "https://example.com/sitemap.xml".to_string(),
                    reason: "boom".to_string(),
                })
            } else {
                Ok(self.articles.clone())
            }
        }
    }

    fn fast_policy(retries: usize) -> RetryPolicy {
        RetryPolicy {
            retries,
            sleep_base: Duration::ZERO,
        }
    }

    fn one_article() -> Vec<ParsedArticle> {
        vec![ParsedArticle {
            url: "https://example.com/politica/1".to_string(),
            section: "politica".to_string(),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn test_succeeds_after_k_failures_with_k_plus_one_calls() {
        let extractor = FlakyExtractor::new(2, one_article());
        let client = Client::new();

        let outcome =
            run_with_retry("Test", &extractor, &client, 10, &fast_policy(3)).await;

        assert!(matches!(outcome, JobOutcome::Records(ref r) if r.len() == 1));
        assert_eq!(extractor.calls(), 3);
    }

    #[tokio::test]
    async fn test_always_failing_gives_up_after_retries_attempts() {
        let extractor = FlakyExtractor::new(usize::MAX, Vec::new());
        let client = Client::new();

        let outcome =
            run_with_retry("Test", &extractor, &client, 10, &fast_policy(3)).await;

        assert!(matches!(outcome, JobOutcome::Failed(_)));
        assert_eq!(extractor.calls(), 3);
    }

    #[tokio::test]
    async fn test_zero_articles_is_empty_not_failed() {
        let extractor = FlakyExtractor::new(0, Vec::new());
        let client = Client::new();

        let outcome =
            run_with_retry("Test", &extractor, &client, 10, &fast_policy(3)).await;

        assert!(matches!(outcome, JobOutcome::Empty));
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_clamps_to_one_attempt() {
        let extractor = FlakyExtractor::new(usize::MAX, Vec::new());
        let client = Client::new();

        let outcome =
            run_with_retry("Test", &extractor, &client, 10, &fast_policy(0)).await;

        assert!(matches!(outcome, JobOutcome::Failed(_)));
        assert_eq!(extractor.calls(), 1);
    }
}
