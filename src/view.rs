//! Renderable view descriptions
//!
//! The engine's output boundary: chart and table descriptions consumed by
//! a rendering collaborator. Serializable, ephemeral, recomputed on every
//! relevant control change. No styling lives here.

use serde::Serialize;

/// What a panel publishes after a recompute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewResult {
    Chart(ChartSpec),
    Table(TableSpec),
}

impl ViewResult {
    /// Whether the result carries no rows/points at all
    pub fn is_empty(&self) -> bool {
        match self {
            ViewResult::Chart(ChartSpec::Bars(bars)) => bars.categories.is_empty(),
            ViewResult::Chart(ChartSpec::Scatter(scatter)) => scatter.points.is_empty(),
            ViewResult::Chart(ChartSpec::Lines(lines)) => {
                lines.series.iter().all(|s| s.points.is_empty())
            }
            ViewResult::Table(table) => table.rows.is_empty(),
        }
    }
}

/// Chart description variants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartSpec {
    /// Category labels plus one or more stacked value series
    Bars(BarChart),
    /// Labelled points with size and color channels
    Scatter(ScatterChart),
    /// Titled line series sharing one x domain
    Lines(LineChart),
}

/// Stacked bar chart, one bar group per category label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub x_title: String,
    pub categories: Vec<String>,
    pub series: Vec<ValueSeries>,
}

/// One named series of values aligned with the category labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Scatter with per-point size and color channels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub x_title: String,
    pub points: Vec<ScatterPoint>,
}

/// One scatter point; `size` and `color` are data channels, not styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub size: f64,
    pub color: f64,
}

/// Vertically stacked line charts over a shared x domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub x_title: String,
    pub series: Vec<LineSeries>,
}

/// One titled line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub title: String,
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Table with one linked title cell per row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One table row; `title` renders as a link to `link`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub title: String,
    pub link: String,
    pub cells: Vec<String>,
}

/// Abbreviate a count for table display: values >= 1e6 render as "xM",
/// >= 1e3 as "xK", smaller values raw. One decimal digit, trailing ".0"
/// trimmed.
pub fn abbreviate_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{}M", trim_decimal(value as f64 / 1e6))
    } else if value >= 1_000 {
        format!("{}K", trim_decimal(value as f64 / 1e3))
    } else {
        value.to_string()
    }
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{value:.1}");
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_millions() {
        assert_eq!(abbreviate_count(1_500_000), "1.5M");
        assert_eq!(abbreviate_count(2_000_000), "2M");
        assert_eq!(abbreviate_count(1_000_000), "1M");
    }

    #[test]
    fn test_abbreviate_thousands() {
        assert_eq!(abbreviate_count(1_500), "1.5K");
        assert_eq!(abbreviate_count(1_000), "1K");
        assert_eq!(abbreviate_count(999_999), "1000K");
    }

    #[test]
    fn test_abbreviate_raw() {
        assert_eq!(abbreviate_count(999), "999");
        assert_eq!(abbreviate_count(0), "0");
    }

    #[test]
    fn test_empty_results() {
        let empty_table = ViewResult::Table(TableSpec {
            columns: vec!["title".to_string()],
            rows: Vec::new(),
        });
        assert!(empty_table.is_empty());

        let bars = ViewResult::Chart(ChartSpec::Bars(BarChart {
            x_title: "views".to_string(),
            categories: vec!["a".to_string()],
            series: vec![ValueSeries {
                name: "views".to_string(),
                values: vec![1.0],
            }],
        }));
        assert!(!bars.is_empty());
    }

    #[test]
    fn test_view_result_serializes() {
        let result = ViewResult::Chart(ChartSpec::Scatter(ScatterChart {
            x_title: "views".to_string(),
            points: vec![ScatterPoint {
                label: "Jane".to_string(),
                x: 10.0,
                size: 2.0,
                color: 5.0,
            }],
        }));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"Jane\""));
    }
}
