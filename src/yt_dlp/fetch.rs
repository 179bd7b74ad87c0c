use super::{client::MetadataClient, model::MetadataRecord};
use indicatif::ProgressBar;
use std::sync::Arc;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{error, info, info_span, Instrument};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// What to do about identifiers that could not be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and leave the identifier out of the results
    #[default]
    Drop,
    /// Same as `Drop`, but the run as a whole is reported as failed
    Strict,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum number of lookups in flight, `0` lifts the limit
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            failure_policy: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Successful lookups in completion order
    pub records: Vec<MetadataRecord>,
    /// Number of identifiers that produced no record
    pub failed: usize,
}

impl FetchSummary {
    pub fn is_failure(&self, policy: FailurePolicy) -> bool {
        policy == FailurePolicy::Strict && self.failed > 0
    }
}

/// Looks up every identifier concurrently and waits for all of them.
///
/// Never fails as a whole: a lookup that errors (or panics) is logged and
/// contributes nothing to `records`. Records come back in completion order,
/// not input order. The progress bar advances once per finished lookup.
pub async fn fetch_all<C>(
    client: Arc<C>,
    identifiers: Vec<String>,
    options: &FetchOptions,
    progress: &ProgressBar,
) -> FetchSummary
where
    C: MetadataClient + 'static,
{
    let batch = info_span!("fetch_batch", total = identifiers.len());
    let limiter = match options.concurrency {
        0 => None,
        width => Some(Arc::new(Semaphore::new(width))),
    };

    let mut join_set = JoinSet::new();
    for identifier in identifiers {
        let client = client.clone();
        let limiter = limiter.clone();

        join_set.spawn(
            async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };

                info!(url = %identifier, "Fetching details");
                match client.fetch(&identifier).await {
                    Ok(video) => {
                        info!(url = %identifier, "Successfully fetched details");
                        Some(MetadataRecord::from_info(video))
                    }
                    Err(error) => {
                        let reason = format!("{:#}", error);
                        error!(url = %identifier, error = %reason, "Error fetching details");
                        None
                    }
                }
            }
            .instrument(batch.clone()),
        );
    }

    let mut summary = FetchSummary::default();
    while let Some(joined) = join_set.join_next().await {
        progress.inc(1);
        match joined {
            Ok(Some(record)) => summary.records.push(record),
            Ok(None) => summary.failed += 1,
            Err(error) => {
                error!(parent: &batch, error = %error, "Fetch worker aborted");
                summary.failed += 1;
            }
        }
    }

    info!(
        parent: &batch,
        fetched = summary.records.len(),
        failed = summary.failed,
        "Metadata extraction completed"
    );
    summary
}
