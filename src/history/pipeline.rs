use crate::analysis::match_stats::{AggregateReport, MatchRecord};
use crate::api::client::RiotApi;
use crate::error::AppError;
use indicatif::ProgressBar;

use super::fetcher::MatchHistoryFetcher;
use super::resolver::AccountResolver;
use super::riot_id::RiotId;

pub const DEFAULT_MATCH_COUNT: usize = 5;

#[derive(Debug)]
pub enum HistoryOutcome {
    /// The account exists but has no recent matches.
    NoHistory { riot_id: RiotId },
    Report(MatchReport),
}

#[derive(Debug)]
pub struct MatchReport {
    pub riot_id: RiotId,
    pub requested: usize,
    /// Most recent first.
    pub records: Vec<MatchRecord>,
    /// `None` when every detail fetch failed.
    pub summary: Option<AggregateReport>,
    pub skipped: Vec<SkippedMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMatch {
    pub match_id: String,
    pub reason: String,
}

/// Validate the input, resolve the account, fetch up to `limit` matches one after the
/// other and aggregate whatever could be loaded.
///
/// A failing match is skipped rather than failing the whole report.
pub fn generate_report<A: RiotApi>(
    api: &A,
    input: &str,
    limit: usize,
    progress: &ProgressBar,
) -> Result<HistoryOutcome, AppError> {
    let riot_id = RiotId::parse(input)?;

    let puuid = AccountResolver::new(api).resolve(&riot_id)?;

    let fetcher = MatchHistoryFetcher::new(api);
    let match_ids = fetcher.list_recent_matches(&puuid, Some(limit))?;
    if match_ids.is_empty() {
        return Ok(HistoryOutcome::NoHistory { riot_id });
    }

    progress.set_length(match_ids.len() as u64);
    let mut records = Vec::with_capacity(match_ids.len());
    let mut skipped = Vec::new();

    for match_id in &match_ids {
        match fetcher.fetch_match_detail(match_id, &puuid) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("skipping match {}: {}", match_id, e);
                skipped.push(SkippedMatch {
                    match_id: match_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
        progress.inc(1);
    }

    let summary = AggregateReport::aggregate(&records);

    Ok(HistoryOutcome::Report(MatchReport {
        riot_id,
        requested: match_ids.len(),
        records,
        summary,
        skipped,
    }))
}
