//! Top Talks panel - ranked talks as stacked bars
//!
//! Reads count, year range, and the talks metric. Views mode stacks a
//! views and a likes series per title; ratio mode ranks by the derived
//! view/like ratio instead.

use crate::aggregate::{filter_by_year, top_n, top_n_by_ratio, with_ratio};
use crate::controls::{TalksMetric, TopTalksControls};
use crate::dataset::Dataset;
use crate::panels::PanelOutput;
use crate::view::{BarChart, ChartSpec, ValueSeries, ViewResult};

/// Compute the panel from a dataset snapshot and its controls
pub fn compute(dataset: &Dataset, controls: &TopTalksControls) -> PanelOutput {
    let filtered = filter_by_year(dataset.records(), controls.years.lo, controls.years.hi);
    let available = filtered.len();
    let count = controls.count as usize;

    let chart = match controls.metric {
        TalksMetric::Views => {
            let top = top_n(&filtered, count, |r| r.views);
            BarChart {
                x_title: "views".to_string(),
                categories: top.iter().map(|r| r.title.clone()).collect(),
                series: vec![
                    ValueSeries {
                        name: "views".to_string(),
                        values: top.iter().map(|r| r.views as f64).collect(),
                    },
                    ValueSeries {
                        name: "likes".to_string(),
                        values: top.iter().map(|r| r.likes as f64).collect(),
                    },
                ],
            }
        }
        TalksMetric::ViewLikeRatio => {
            let top = top_n_by_ratio(with_ratio(&filtered), count);
            BarChart {
                x_title: "view_like_ratio".to_string(),
                categories: top.iter().map(|r| r.record.title.clone()).collect(),
                series: vec![ValueSeries {
                    name: "view_like_ratio".to_string(),
                    values: top.iter().map(|r| r.view_like_ratio).collect(),
                }],
            }
        }
    };

    PanelOutput {
        result: ViewResult::Chart(ChartSpec::Bars(chart)),
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
        let record = |title: &str, year: i32, views: u64, likes: u64| TalkRecord {
            title: title.to_string(),
            author: "x".to_string(),
            date: NaiveDate::from_ymd_opt(year, 1, 15).unwrap(),
            views,
            likes,
            link: format!("https://t/{title}"),
        };
        Dataset::from_records(vec![
            record("A", 2005, 100, 10),
            record("B", 2010, 50, 25),
            record("C", 2020, 200, 40),
        ])
    }

    fn controls(count: u32, metric: TalksMetric) -> TopTalksControls {
        TopTalksControls {
            count,
            years: YearRange { lo: 2000, hi: 2022 },
            metric,
        }
    }

    #[test]
    fn test_views_mode_stacks_views_and_likes() {
        let output = compute(&dataset(), &controls(2, TalksMetric::Views));
        assert_eq!(output.available, 3);
        let ViewResult::Chart(ChartSpec::Bars(bars)) = output.result else {
            panic!("expected bars");
        };
        assert_eq!(bars.categories, vec!["A", "C"]);
        assert_eq!(bars.series.len(), 2);
        assert_eq!(bars.series[0].name, "views");
        assert_eq!(bars.series[0].values, vec![100.0, 200.0]);
        assert_eq!(bars.series[1].name, "likes");
        assert_eq!(bars.series[1].values, vec![10.0, 40.0]);
    }

    #[test]
    fn test_year_window_narrows_available() {
        let mut narrowed = controls(5, TalksMetric::Views);
        narrowed.years = YearRange { lo: 2010, hi: 2020 };
        let output = compute(&dataset(), &narrowed);
        assert_eq!(output.available, 2);
        let ViewResult::Chart(ChartSpec::Bars(bars)) = output.result else {
            panic!("expected bars");
        };
        assert_eq!(bars.categories, vec!["B", "C"]);
    }

    #[test]
    fn test_ratio_mode_single_series() {
        let output = compute(&dataset(), &controls(3, TalksMetric::ViewLikeRatio));
        let ViewResult::Chart(ChartSpec::Bars(bars)) = output.result else {
            panic!("expected bars");
        };
        // Ratios: A=10, B=2, C=5, ascending
        assert_eq!(bars.categories, vec!["B", "C", "A"]);
        assert_eq!(bars.series.len(), 1);
        assert_eq!(bars.series[0].values, vec![2.0, 5.0, 10.0]);
    }

    #[test]
    fn test_empty_dataset_renders_empty() {
        let empty = Dataset::from_records(Vec::new());
        let output = compute(&empty, &controls(5, TalksMetric::Views));
        assert_eq!(output.available, 0);
        assert!(output.result.is_empty());
    }
}
