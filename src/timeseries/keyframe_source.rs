//! Paginated matching of target timestamps against a range-queryable record store

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::interpolation::Interpolation;
use crate::resampler::{resample, Resampled};
use crate::samples::KeyedSample;

/// The first query starts this much (seconds) before the first target, so the first page
/// normally begins with a keyframe preceding it. The end of every query is extended likewise.
pub const DEFAULT_QUERY_MARGIN: f64 = 1.0;

/// Record store holding one stream, sorted by timestamp. A query returns the records with
/// `begin <= timestamp <= end`, possibly only a page of them (the earliest ones); the caller
/// asks again for what is still missing.
pub trait KeyframeSource {
    fn query(&mut self, begin: f64, end: f64) -> Result<Vec<KeyedSample>>;
}

/// Resamples `targets` from a paginated source with [DEFAULT_QUERY_MARGIN].
pub fn resample_from_source<S, P>(targets: &[f64], source: &mut S, policy: &P) -> Result<Resampled>
where
    S: KeyframeSource + ?Sized,
    P: Interpolation + ?Sized,
{
    resample_from_source_with_margin(targets, source, policy, DEFAULT_QUERY_MARGIN)
}

/// Resamples `targets` from a paginated source.
///
/// # Arguments
///
/// * `targets` - ascending timestamps to resolve
/// * `source` - record store queried page by page
/// * `policy` - interpolation between the bracketing keyframes
/// * `margin` - how far before the first target the first query starts
///
/// # Returns
///
/// The values of the resolved targets and the targets the store could not reach. A
/// non-empty remainder means the store holds no record past the last one fetched.
///
/// The first query covers the unresolved targets widened by `margin`. Every following query
/// starts at the last record of the previous page, which is kept in front of the new page so
/// that a bracket may span two pages. Pages therefore always move forward, even when a whole
/// page lies before the next target. The loop ends when every target is resolved or when a
/// page brings no record newer than the previous one. A store holding more records with one
/// timestamp than fit in a page cannot be paged past that timestamp.
pub fn resample_from_source_with_margin<S, P>(
    targets: &[f64],
    source: &mut S,
    policy: &P,
    margin: f64,
) -> Result<Resampled>
where
    S: KeyframeSource + ?Sized,
    P: Interpolation + ?Sized,
{
    let mut values = Vec::with_capacity(targets.len());
    let mut pending = targets.to_vec();
    let mut carried: Option<KeyedSample> = None;

    while let (Some(&first), Some(&last)) = (pending.first(), pending.last()) {
        let begin = carried.as_ref().map_or(first - margin, |c| c.timestamp);
        let end = last + margin;
        let records = source
            .query(begin, end)
            .with_context(|| format!("querying keyframes in [{begin}, {end}]"))?;

        let keyframes: Vec<KeyedSample> = match carried.take() {
            Some(previous) => {
                let since = previous.timestamp;
                if !records.iter().any(|r| r.timestamp > since) {
                    warn!("Records end at {}, {} targets unresolved", since, pending.len());
                    break;
                }
                std::iter::once(previous)
                    .chain(records.into_iter().filter(|r| r.timestamp >= since))
                    .collect()
            }
            None if records.is_empty() => {
                warn!("No records found, {} targets unresolved", pending.len());
                break;
            }
            None => records,
        };

        let page = resample(&pending, &keyframes, policy)?;
        debug!("Page of {} keyframes resolved {} targets", keyframes.len(), page.values.len());
        values.extend(page.values);
        pending = page.remainder;
        carried = keyframes.last().cloned();
    }

    Ok(Resampled {
        values,
        remainder: pending,
    })
}

/// In-memory record store, sorted by timestamp, returning at most `page_size` records per query.
#[derive(Debug, Clone)]
pub struct MemorySource {
    records: Vec<KeyedSample>,
    page_size: usize,
    queries: usize,
}

impl MemorySource {
    pub fn new(mut records: Vec<KeyedSample>) -> Self {
        records.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        MemorySource {
            records,
            page_size: usize::MAX,
            queries: 0,
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        MemorySource { page_size: page_size.max(1), ..self }
    }

    /// Number of queries served so far.
    pub fn queries(&self) -> usize {
        self.queries
    }
}

impl KeyframeSource for MemorySource {
    fn query(&mut self, begin: f64, end: f64) -> Result<Vec<KeyedSample>> {
        self.queries += 1;
        Ok(self
            .records
            .iter()
            .filter(|r| r.timestamp >= begin && r.timestamp <= end)
            .take(self.page_size)
            .cloned()
            .collect())
    }
}
