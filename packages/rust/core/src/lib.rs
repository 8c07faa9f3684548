//! Core ingestion logic for extposts.
//!
//! [`pipeline::ingest`] walks the configured sources in order, fetching feeds
//! or article pages through `extposts-fetch`, and returns the post records
//! together with a per-source report.

pub mod dates;
pub mod emit;
pub mod normalize;
pub mod pipeline;

pub use pipeline::{
    IngestReport, ProgressReporter, SilentProgress, SourceOutcome, SourceStatus, ingest,
};
