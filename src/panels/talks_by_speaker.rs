//! Talks by Speaker panel - one author's talks as a linked table
//!
//! Reads count and the author selector. Unlike the other ranked panels
//! this one keeps the top rows directly in descending view order, and
//! renders a table rather than a chart: a linked title cell, then author,
//! date, and abbreviated view/like counts.

use crate::controls::TalksBySpeakerControls;
use crate::dataset::Dataset;
use crate::panels::PanelOutput;
use crate::view::{abbreviate_count, TableRow, TableSpec, ViewResult};
use std::cmp::Reverse;

/// Compute the panel from a dataset snapshot and its controls
pub fn compute(dataset: &Dataset, controls: &TalksBySpeakerControls) -> PanelOutput {
    let mut rows: Vec<&_> = dataset
        .records()
        .iter()
        .filter(|r| r.author == controls.author)
        .collect();
    let available = rows.len();

    rows.sort_by_key(|r| Reverse(r.views));
    rows.truncate(controls.count as usize);

    let table_rows = rows
        .into_iter()
        .map(|r| TableRow {
            title: r.title.clone(),
            link: r.link.clone(),
            cells: vec![
                r.author.clone(),
                r.date.format("%b, %Y").to_string(),
                abbreviate_count(r.views),
                abbreviate_count(r.likes),
            ],
        })
        .collect();

    PanelOutput {
        result: ViewResult::Table(TableSpec {
            columns: ["title", "author", "date", "views", "likes"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows: table_rows,
        }),
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::dataset::TalkRecord;

    fn dataset() -> Dataset {
        let record = |title: &str, author: &str, views: u64| TalkRecord {
            title: title.to_string(),
            author: author.to_string(),
            date: NaiveDate::from_ymd_opt(2016, 2, 1).unwrap(),
            views,
            likes: 1_500,
            link: format!("https://t/{title}"),
        };
        Dataset::from_records(vec![
            record("small", "Jane", 900),
            record("big", "Jane", 2_000_000),
            record("mid", "Jane", 30_000),
            record("other", "Li", 5),
        ])
    }

    #[test]
    fn test_descending_order_and_truncation() {
        let controls = TalksBySpeakerControls {
            count: 2,
            author: "Jane".to_string(),
        };
        let output = compute(&dataset(), &controls);
        assert_eq!(output.available, 3);
        let ViewResult::Table(table) = output.result else {
            panic!("expected table");
        };
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["big", "mid"]);
    }

    #[test]
    fn test_row_cells_formatted() {
        let controls = TalksBySpeakerControls {
            count: 5,
            author: "Jane".to_string(),
        };
        let output = compute(&dataset(), &controls);
        let ViewResult::Table(table) = output.result else {
            panic!("expected table");
        };
        assert_eq!(table.columns, vec!["title", "author", "date", "views", "likes"]);
        let big = &table.rows[0];
        assert_eq!(big.link, "https://t/big");
        assert_eq!(big.cells, vec!["Jane", "Feb, 2016", "2M", "1.5K"]);
        let small = &table.rows[2];
        assert_eq!(small.cells[2], "900");
    }

    #[test]
    fn test_unknown_author_yields_empty_table() {
        let controls = TalksBySpeakerControls {
            count: 5,
            author: "Nobody".to_string(),
        };
        let output = compute(&dataset(), &controls);
        assert_eq!(output.available, 0);
        assert!(output.result.is_empty());
    }
}
