//! Fan-out across all registered outlets and consolidation of the results.
//!
//! One retry-wrapped job per registry entry runs on a bounded pool: at
//! most `workers` jobs in flight, the rest queued. The stream is buffered
//! in submission order, so the consolidated table is always ordered by
//! registry entry; completion timing never changes the output. Within
//! one outlet, records keep the extractor's emission order.
//!
//! Jobs never raise past the retry runner; this layer folds
//! [`JobOutcome`]s, tagging each successful outlet's records with its
//! identity and orientation and logging a warning for everything else.

use crate::models::ArticleRecord;
use crate::registry::SourceConfig;
use crate::retry::{JobOutcome, RetryPolicy, run_with_retry};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{info, warn};

/// Run-level tunables.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Max records per outlet.
    pub limit: usize,
    /// Max concurrent outlet jobs. A value of 0 is treated as 1.
    pub workers: usize,
}

/// Crawl every registered outlet and merge the results into one table.
///
/// Waits for every job; a failed or empty outlet contributes zero records
/// and a warning. Returns an empty vector (after a terminal warning) when
/// every outlet came back empty or failed.
pub async fn get_all_news(
    sources: &[SourceConfig],
    client: &Client,
    opts: &RunOptions,
    policy: &RetryPolicy,
) -> Vec<ArticleRecord> {
    info!(
        outlets = sources.len(),
        limit = opts.limit,
        workers = opts.workers,
        "Starting aggregation run"
    );

    let outcomes: Vec<JobOutcome> = stream::iter(sources)
        .map(|source| {
            let client = client.clone();
            async move {
                run_with_retry(source.medio, source.extractor.as_ref(), &client, opts.limit, policy)
                    .await
            }
        })
        .buffered(opts.workers.max(1))
        .collect()
        .await;

    let mut consolidated: Vec<ArticleRecord> = Vec::new();
    for (source, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            JobOutcome::Records(articles) => {
                info!(
                    medio = source.medio,
                    count = articles.len(),
                    "Collected outlet records"
                );
                consolidated.extend(
                    articles
                        .into_iter()
                        .map(|a| a.tagged(source.medio, source.espectro)),
                );
            }
            JobOutcome::Empty => {
                warn!(medio = source.medio, "Outlet returned no records");
            }
            JobOutcome::Failed(e) => {
                warn!(medio = source.medio, error = %e, "Outlet dropped after exhausting retries");
            }
        }
    }

    if consolidated.is_empty() {
        warn!("No outlet produced any records; consolidated dataset is empty");
    } else {
        info!(total = consolidated.len(), "Consolidated dataset assembled");
    }
    consolidated
}
