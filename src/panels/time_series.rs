//! Time Series panel - uploads and views per bucket
//!
//! Reads the year range and granularity, and publishes two aligned line
//! series sharing the x domain: uploads per bucket, and the bucket view
//! statistic. Month buckets carry mean views, year buckets total views;
//! that asymmetry comes with the bucketing and is kept as-is.

use crate::aggregate::{bucket_time_series, filter_by_year, Granularity};
use crate::controls::TimeSeriesControls;
use crate::dataset::Dataset;
use crate::panels::PanelOutput;
use crate::view::{ChartSpec, LineChart, LineSeries, ViewResult};

/// Compute the panel from a dataset snapshot and its controls
pub fn compute(dataset: &Dataset, controls: &TimeSeriesControls) -> PanelOutput {
    let filtered = filter_by_year(dataset.records(), controls.years.lo, controls.years.hi);
    let available = filtered.len();
    let buckets = bucket_time_series(&filtered, controls.granularity);

    let (counts_title, views_title) = match controls.granularity {
        Granularity::Month => (
            "Total videos uploaded per month",
            "Average views per upload month",
        ),
        Granularity::Year => (
            "Total videos uploaded per year",
            "Total views per upload year",
        ),
    };

    let counts = LineSeries {
        title: counts_title.to_string(),
        name: "counts".to_string(),
        points: buckets
            .iter()
            .map(|b| (b.key as f64, b.count as f64))
            .collect(),
    };
    let views = LineSeries {
        title: views_title.to_string(),
        name: "views".to_string(),
        points: buckets.iter().map(|b| (b.key as f64, b.view_stat)).collect(),
    };

    PanelOutput {
        result: ViewResult::Chart(ChartSpec::Lines(LineChart {
            x_title: controls.granularity.name().to_string(),
            series: vec![counts, views],
        })),
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::YearRange;
    use crate::dataset::TalkRecord;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let record = |year: i32, month: u32, views: u64| TalkRecord {
            title: format!("{year}-{month}"),
            author: "x".to_string(),
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            views,
            likes: 1,
            link: "https://t/x".to_string(),
        };
        Dataset::from_records(vec![
            record(2010, 3, 100),
            record(2012, 3, 300),
            record(2012, 9, 60),
        ])
    }

    fn controls(granularity: Granularity) -> TimeSeriesControls {
        TimeSeriesControls {
            years: YearRange { lo: 2000, hi: 2022 },
            granularity,
        }
    }

    #[test]
    fn test_month_series_aligned_and_mean() {
        let output = compute(&dataset(), &controls(Granularity::Month));
        let ViewResult::Chart(ChartSpec::Lines(chart)) = output.result else {
            panic!("expected lines");
        };
        assert_eq!(chart.x_title, "month");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "counts");
        assert_eq!(chart.series[0].points, vec![(3.0, 2.0), (9.0, 1.0)]);
        assert_eq!(chart.series[1].title, "Average views per upload month");
        assert_eq!(chart.series[1].points, vec![(3.0, 200.0), (9.0, 60.0)]);
    }

    #[test]
    fn test_year_series_uses_sums() {
        let output = compute(&dataset(), &controls(Granularity::Year));
        let ViewResult::Chart(ChartSpec::Lines(chart)) = output.result else {
            panic!("expected lines");
        };
        assert_eq!(chart.series[1].title, "Total views per upload year");
        assert_eq!(
            chart.series[1].points,
            vec![(2010.0, 100.0), (2012.0, 360.0)]
        );
    }

    #[test]
    fn test_year_window_restricts_buckets() {
        let mut narrowed = controls(Granularity::Year);
        narrowed.years = YearRange { lo: 2012, hi: 2012 };
        let output = compute(&dataset(), &narrowed);
        assert_eq!(output.available, 2);
        let ViewResult::Chart(ChartSpec::Lines(chart)) = output.result else {
            panic!("expected lines");
        };
        assert_eq!(chart.series[0].points, vec![(2012.0, 2.0)]);
    }

    #[test]
    fn test_empty_window_renders_empty() {
        let mut narrowed = controls(Granularity::Month);
        narrowed.years = YearRange { lo: 2001, hi: 2002 };
        let output = compute(&dataset(), &narrowed);
        assert_eq!(output.available, 0);
        assert!(output.result.is_empty());
    }
}
