//! Aggregation engine - pure filter/rank/group/bucket functions
//!
//! Every function here is deterministic, takes immutable snapshots, and
//! mutates nothing. Panels compose these into their view pipelines.

use crate::dataset::TalkRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time bucketing granularity for the series view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    /// Calendar month 1-12, aggregated across all years in range
    Month,
    /// One bucket per distinct calendar year
    Year,
}

impl Granularity {
    /// Display name, matching the source dropdown options
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

/// Keep records whose publish year falls in `[lo, hi]` inclusive,
/// preserving relative order.
pub fn filter_by_year<'a>(rows: &'a [TalkRecord], lo: i32, hi: i32) -> Vec<&'a TalkRecord> {
    rows.iter()
        .filter(|r| {
            let year = r.year();
            year >= lo && year <= hi
        })
        .collect()
}

/// The `min(n, len)` rows with the largest `key`, in ascending key order.
/// The sort is stable, so ties keep insertion order. Works on any row
/// type; the panels rank both records and author rollups with it.
pub fn top_n<T: Clone>(rows: &[T], n: usize, key: impl Fn(&T) -> u64) -> Vec<T> {
    let mut sorted: Vec<T> = rows.to_vec();
    sorted.sort_by_key(|r| key(r));
    let start = sorted.len().saturating_sub(n);
    sorted.split_off(start)
}

/// A record paired with its derived view/like ratio
#[derive(Debug, Clone, Copy)]
pub struct RatioRow<'a> {
    pub record: &'a TalkRecord,
    pub view_like_ratio: f64,
}

/// Derive `view_like_ratio = views / likes` per row. A row with zero
/// likes gets `+infinity` rather than being dropped, and sorts last under
/// the total order used by [`top_n_by_ratio`].
pub fn with_ratio<'a>(rows: &[&'a TalkRecord]) -> Vec<RatioRow<'a>> {
    rows.iter()
        .map(|&record| {
            let view_like_ratio = if record.likes == 0 {
                f64::INFINITY
            } else {
                record.views as f64 / record.likes as f64
            };
            RatioRow {
                record,
                view_like_ratio,
            }
        })
        .collect()
}

/// The `min(n, len)` ratio rows with the largest ratio, ascending
pub fn top_n_by_ratio(rows: Vec<RatioRow<'_>>, n: usize) -> Vec<RatioRow<'_>> {
    let mut sorted = rows;
    sorted.sort_by(|a, b| a.view_like_ratio.total_cmp(&b.view_like_ratio));
    let start = sorted.len().saturating_sub(n);
    sorted.split_off(start)
}

/// Group rows by an ordered key, preserving row order within each group
pub fn group_by<'a, K: Ord>(
    rows: &[&'a TalkRecord],
    key: impl Fn(&TalkRecord) -> K,
) -> BTreeMap<K, Vec<&'a TalkRecord>> {
    let mut groups: BTreeMap<K, Vec<&TalkRecord>> = BTreeMap::new();
    for &row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// Total views across rows
pub fn sum_views(rows: &[&TalkRecord]) -> u64 {
    rows.iter().map(|r| r.views).sum()
}

/// Mean views across rows; 0.0 for an empty slice
pub fn mean_views(rows: &[&TalkRecord]) -> f64 {
    if rows.is_empty() {
        0.0
    } else {
        sum_views(rows) as f64 / rows.len() as f64
    }
}

/// Per-author rollup used by the speakers view
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorGroup {
    pub author: String,
    pub talks: u64,
    pub total_views: u64,
    pub mean_views: f64,
    pub total_likes: u64,
}

/// Aggregate rows per author, ordered by author name
pub fn group_by_author(rows: &[&TalkRecord]) -> Vec<AuthorGroup> {
    group_by(rows, |r| r.author.clone())
        .into_iter()
        .map(|(author, group)| AuthorGroup {
            author,
            talks: group.len() as u64,
            total_views: sum_views(&group),
            mean_views: mean_views(&group),
            total_likes: group.iter().map(|r| r.likes).sum(),
        })
        .collect()
}

/// One time bucket of the series view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    /// Month number (1-12) or calendar year, per granularity
    pub key: i32,
    /// Uploads in the bucket
    pub count: u64,
    /// Mean views for month buckets, total views for year buckets.
    /// The asymmetry is deliberate: month buckets describe trend density
    /// across years, year buckets cumulative totals.
    pub view_stat: f64,
}

/// Bucket rows by month-of-year or by year, ascending by bucket key
pub fn bucket_time_series(rows: &[&TalkRecord], granularity: Granularity) -> Vec<TimeBucket> {
    let groups = match granularity {
        Granularity::Month => group_by(rows, |r| r.date.month() as i32),
        Granularity::Year => group_by(rows, |r| r.year()),
    };
    groups
        .into_iter()
        .map(|(key, group)| TimeBucket {
            key,
            count: group.len() as u64,
            view_stat: match granularity {
                Granularity::Month => mean_views(&group),
                Granularity::Year => sum_views(&group) as f64,
            },
        })
        .collect()
}
