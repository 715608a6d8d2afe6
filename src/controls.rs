//! Per-panel control state
//!
//! Typed control structs owned by the orchestrator. The category
//! dropdowns are closed enums, so a typo'd branch cannot silently return
//! nothing. Validation never errors: invalid input degrades to a clamp
//! or a documented default.

use crate::aggregate::Granularity;
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// Default count for the Top Talks panel
pub const TOP_TALKS_DEFAULT_COUNT: u32 = 8;
/// Default count for the Top Speakers panel
pub const TOP_SPEAKERS_DEFAULT_COUNT: u32 = 10;
/// Default count for the Talks by Speaker panel
pub const TALKS_BY_SPEAKER_DEFAULT_COUNT: u32 = 5;

/// Resolve a raw count input: missing falls back to the panel default,
/// zero clamps to 1.
pub fn resolve_count(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).max(1)
}

/// Inclusive year window bounded by the dataset's year span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    /// The dataset's full span
    pub fn full(dataset: &Dataset) -> Self {
        let (lo, hi) = dataset.year_range();
        Self { lo, hi }
    }

    /// Clamp a requested window into the dataset bounds, normalizing an
    /// inverted pair first.
    pub fn clamped(lo: i32, hi: i32, dataset: &Dataset) -> Self {
        let (min, max) = dataset.year_range();
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self {
            lo: lo.clamp(min, max),
            hi: hi.clamp(min, max),
        }
    }
}

/// Ranking metric for the Top Talks panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TalksMetric {
    Views,
    ViewLikeRatio,
}

impl TalksMetric {
    /// Display name, matching the source tab labels
    pub fn name(&self) -> &'static str {
        match self {
            TalksMetric::Views => "views",
            TalksMetric::ViewLikeRatio => "view-like ratio",
        }
    }

    /// The other metric, for cycling controls
    pub fn toggled(&self) -> Self {
        match self {
            TalksMetric::Views => TalksMetric::ViewLikeRatio,
            TalksMetric::ViewLikeRatio => TalksMetric::Views,
        }
    }
}

/// Ranking metric for the Top Speakers panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakersMetric {
    VideoCount,
    TotalViews,
}

impl SpeakersMetric {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SpeakersMetric::VideoCount => "video count",
            SpeakersMetric::TotalViews => "total views",
        }
    }

    /// The other metric, for cycling controls
    pub fn toggled(&self) -> Self {
        match self {
            SpeakersMetric::VideoCount => SpeakersMetric::TotalViews,
            SpeakersMetric::TotalViews => SpeakersMetric::VideoCount,
        }
    }
}

impl Granularity {
    /// The other granularity, for cycling controls
    pub fn toggled(&self) -> Self {
        match self {
            Granularity::Month => Granularity::Year,
            Granularity::Year => Granularity::Month,
        }
    }
}

/// Controls read by the Top Talks panel
#[derive(Debug, Clone, PartialEq)]
pub struct TopTalksControls {
    pub count: u32,
    pub years: YearRange,
    pub metric: TalksMetric,
}

impl TopTalksControls {
    pub fn defaults(dataset: &Dataset) -> Self {
        Self {
            count: TOP_TALKS_DEFAULT_COUNT,
            years: YearRange::full(dataset),
            metric: TalksMetric::Views,
        }
    }
}

/// Controls read by the Top Speakers panel
#[derive(Debug, Clone, PartialEq)]
pub struct TopSpeakersControls {
    pub count: u32,
    pub metric: SpeakersMetric,
}

impl TopSpeakersControls {
    pub fn defaults(_dataset: &Dataset) -> Self {
        Self {
            count: TOP_SPEAKERS_DEFAULT_COUNT,
            metric: SpeakersMetric::TotalViews,
        }
    }
}

/// Controls read by the Talks by Speaker panel
#[derive(Debug, Clone, PartialEq)]
pub struct TalksBySpeakerControls {
    pub count: u32,
    /// Author name to filter on; a name absent from the dataset yields an
    /// empty table, not an error.
    pub author: String,
}

impl TalksBySpeakerControls {
    pub fn defaults(dataset: &Dataset) -> Self {
        Self {
            count: TALKS_BY_SPEAKER_DEFAULT_COUNT,
            author: dataset.default_author().unwrap_or_default(),
        }
    }
}

/// Controls read by the Time Series panel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesControls {
    pub years: YearRange,
    pub granularity: Granularity,
}

impl TimeSeriesControls {
    pub fn defaults(dataset: &Dataset) -> Self {
        Self {
            years: YearRange::full(dataset),
            granularity: Granularity::Month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TalkRecord;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let record = |year: i32| TalkRecord {
            title: format!("talk {year}"),
            author: "Jane".to_string(),
            date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            views: 100,
            likes: 10,
            link: "https://t/x".to_string(),
        };
        Dataset::from_records(vec![record(2006), record(2015), record(2021)])
    }

    #[test]
    fn test_resolve_count_default_and_floor() {
        assert_eq!(resolve_count(None, 8), 8);
        assert_eq!(resolve_count(Some(0), 8), 1);
        assert_eq!(resolve_count(Some(3), 8), 3);
    }

    #[test]
    fn test_year_range_clamps_to_bounds() {
        let dataset = dataset();
        let range = YearRange::clamped(1990, 2030, &dataset);
        assert_eq!(range, YearRange { lo: 2006, hi: 2021 });
    }

    #[test]
    fn test_year_range_normalizes_inverted_pair() {
        let dataset = dataset();
        let range = YearRange::clamped(2020, 2010, &dataset);
        assert_eq!(range, YearRange { lo: 2010, hi: 2020 });
    }

    #[test]
    fn test_defaults_per_panel() {
        let dataset = dataset();
        assert_eq!(TopTalksControls::defaults(&dataset).count, 8);
        assert_eq!(TopSpeakersControls::defaults(&dataset).count, 10);
        let speaker = TalksBySpeakerControls::defaults(&dataset);
        assert_eq!(speaker.count, 5);
        assert_eq!(speaker.author, "Jane");
        assert_eq!(
            TimeSeriesControls::defaults(&dataset).granularity,
            Granularity::Month
        );
    }

    #[test]
    fn test_metric_cycling_round_trips() {
        assert_eq!(TalksMetric::Views.toggled().toggled(), TalksMetric::Views);
        assert_eq!(
            SpeakersMetric::VideoCount.toggled(),
            SpeakersMetric::TotalViews
        );
        assert_eq!(Granularity::Month.toggled(), Granularity::Year);
    }
}
