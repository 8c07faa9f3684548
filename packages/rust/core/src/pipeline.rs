//! Ingestion pipeline: source descriptors → fetch → normalize → post records.

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use extposts_fetch::Fetcher;
use extposts_shared::{ExtPostsError, PostRecord, PostRef, Result, SourceConfig, SourceKind};

use crate::dates::parse_published_date;
use crate::emit::build_record;
use crate::normalize;

/// Outcome of one source in a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// The source was processed and produced `records` posts.
    Ingested { records: usize },
    /// The feed could not be fetched or parsed; no posts were produced.
    Failed { reason: String },
    /// The descriptor itself is malformed.
    Invalid { reason: String },
}

/// One source's entry in an [`IngestReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceOutcome {
    /// Configured source name.
    pub name: String,
    /// `feed`, `url-list` or `invalid`.
    pub kind: &'static str,
    /// How the source ended; serialized inline beside `name`.
    #[serde(flatten)]
    pub status: SourceStatus,
}

/// Result of [`ingest`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Every post produced, in source then entry order.
    pub records: Vec<PostRecord>,
    /// One outcome per source, in config order.
    pub sources: Vec<SourceOutcome>,
}

impl IngestReport {
    /// Number of sources that failed or were invalid.
    pub fn problem_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| !matches!(s.status, SourceStatus::Ingested { .. }))
            .count()
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called before a source is processed.
    fn source_started(&self, name: &str);
    /// Called before each feed entry or listed URL is handled.
    fn entry_fetching(&self, url: &str);
    /// Called when a source is skipped as failed or invalid.
    fn source_failed(&self, name: &str, reason: &str);
    /// Called when every source has been processed.
    fn done(&self, report: &IngestReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn source_started(&self, _name: &str) {}
    fn entry_fetching(&self, _url: &str) {}
    fn source_failed(&self, _name: &str, _reason: &str) {}
    fn done(&self, _report: &IngestReport) {}
}

/// Ingest every source in order.
///
/// Feed failures and malformed descriptors are recorded in the report and
/// the run moves on. On URL-list sources an unusable `published_date` or a
/// failed page request aborts the whole run.
#[instrument(skip_all, fields(sources = sources.len()))]
pub async fn ingest(
    sources: &[SourceConfig],
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    for source in sources {
        progress.source_started(&source.name);

        let kind = source.kind();
        let status = match kind {
            SourceKind::Feed { url } => {
                ingest_feed(&source.name, url, fetcher, progress, &mut report.records).await
            }
            SourceKind::UrlList { posts } => {
                ingest_urls(&source.name, posts, fetcher, progress, &mut report.records).await?
            }
            SourceKind::Invalid { reason } => {
                error!(source = %source.name, reason, "invalid source descriptor, skipping");
                progress.source_failed(&source.name, reason);
                SourceStatus::Invalid {
                    reason: reason.to_string(),
                }
            }
        };

        report.sources.push(SourceOutcome {
            name: source.name.clone(),
            kind: kind.label(),
            status,
        });
    }

    progress.done(&report);

    info!(
        records = report.records.len(),
        problems = report.problem_count(),
        "ingest complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Feed path
// ---------------------------------------------------------------------------

async fn ingest_feed(
    source_name: &str,
    feed_url: &str,
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
    out: &mut Vec<PostRecord>,
) -> SourceStatus {
    let entries = match fetcher.fetch_feed(feed_url).await {
        Ok(entries) => entries,
        Err(failure) => {
            let reason = failure.to_string();
            warn!(source = %source_name, url = %feed_url, %reason, "feed skipped");
            progress.source_failed(source_name, &reason);
            return SourceStatus::Failed { reason };
        }
    };

    let mut records = 0;
    for entry in &entries {
        let Some(url) = entry.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            warn!(
                source = %source_name,
                title = entry.title.as_deref().unwrap_or_default(),
                "feed entry has no link, skipping"
            );
            continue;
        };

        progress.entry_fetching(url);
        out.push(build_record(source_name, url, normalize::from_feed_entry(entry)));
        records += 1;
    }

    info!(source = %source_name, records, "feed ingested");
    SourceStatus::Ingested { records }
}

// ---------------------------------------------------------------------------
// URL-list path
// ---------------------------------------------------------------------------

async fn ingest_urls(
    source_name: &str,
    posts: &[PostRef],
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
    out: &mut Vec<PostRecord>,
) -> Result<SourceStatus> {
    for post in posts {
        progress.entry_fetching(&post.url);

        let date = post.published_date.as_ref().ok_or_else(|| {
            ExtPostsError::config(format!("missing published_date for {}", post.url))
        })?;
        let published = parse_published_date(date)?;
        let page = fetcher.fetch_page(&post.url).await?;

        out.push(build_record(
            source_name,
            &post.url,
            normalize::from_page(page, published),
        ));
    }

    info!(source = %source_name, records = posts.len(), "url list ingested");
    Ok(SourceStatus::Ingested {
        records: posts.len(),
    })
}
