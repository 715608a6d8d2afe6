//! Top Speakers panel - per-author rollups as a scatter description
//!
//! Reads count and the speakers metric. Authors are grouped first, then
//! ranked by the chosen metric; each point carries total views on x,
//! video count as the size channel, and total likes as the color channel.

use crate::aggregate::{group_by_author, top_n, AuthorGroup};
use crate::controls::{SpeakersMetric, TopSpeakersControls};
use crate::dataset::Dataset;
use crate::panels::PanelOutput;
use crate::view::{ChartSpec, ScatterChart, ScatterPoint, ViewResult};

/// Compute the panel from a dataset snapshot and its controls
pub fn compute(dataset: &Dataset, controls: &TopSpeakersControls) -> PanelOutput {
    let rows: Vec<&_> = dataset.records().iter().collect();
    let groups = group_by_author(&rows);
    let available = groups.len();

    let metric = |group: &AuthorGroup| match controls.metric {
        SpeakersMetric::VideoCount => group.talks,
        SpeakersMetric::TotalViews => group.total_views,
    };
    let top = top_n(&groups, controls.count as usize, metric);

    let points = top
        .into_iter()
        .map(|group| ScatterPoint {
            label: group.author,
            x: group.total_views as f64,
            size: group.talks as f64,
            color: group.total_likes as f64,
        })
        .collect();

    PanelOutput {
        result: ViewResult::Chart(ChartSpec::Scatter(ScatterChart {
            x_title: "views".to_string(),
            points,
        })),
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TalkRecord;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let record = |title: &str, author: &str, views: u64, likes: u64| TalkRecord {
            title: title.to_string(),
            author: author.to_string(),
            date: NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
            views,
            likes,
            link: format!("https://t/{title}"),
        };
        Dataset::from_records(vec![
            record("A1", "Amara", 100, 10),
            record("A2", "Amara", 300, 30),
            record("B1", "Bob", 500, 50),
            record("C1", "Caro", 50, 5),
            record("C2", "Caro", 60, 6),
            record("C3", "Caro", 70, 7),
        ])
    }

    #[test]
    fn test_rank_by_total_views() {
        let controls = TopSpeakersControls {
            count: 2,
            metric: SpeakersMetric::TotalViews,
        };
        let output = compute(&dataset(), &controls);
        assert_eq!(output.available, 3);
        let ViewResult::Chart(ChartSpec::Scatter(scatter)) = output.result else {
            panic!("expected scatter");
        };
        // Totals: Amara 400, Bob 500, Caro 180; top two ascending
        let labels: Vec<&str> = scatter.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Amara", "Bob"]);
        assert_eq!(scatter.points[1].x, 500.0);
    }

    #[test]
    fn test_rank_by_video_count_carries_channels() {
        let controls = TopSpeakersControls {
            count: 1,
            metric: SpeakersMetric::VideoCount,
        };
        let output = compute(&dataset(), &controls);
        let ViewResult::Chart(ChartSpec::Scatter(scatter)) = output.result else {
            panic!("expected scatter");
        };
        assert_eq!(scatter.points.len(), 1);
        let point = &scatter.points[0];
        assert_eq!(point.label, "Caro");
        assert_eq!(point.size, 3.0);
        assert_eq!(point.x, 180.0);
        assert_eq!(point.color, 18.0);
    }

    #[test]
    fn test_count_beyond_authors_returns_all() {
        let controls = TopSpeakersControls {
            count: 50,
            metric: SpeakersMetric::TotalViews,
        };
        let output = compute(&dataset(), &controls);
        let ViewResult::Chart(ChartSpec::Scatter(scatter)) = output.result else {
            panic!("expected scatter");
        };
        assert_eq!(scatter.points.len(), 3);
        assert_eq!(output.available, 3);
    }
}
