//! Dataset store - immutable table of talk records
//!
//! Loads a delimited text source once at startup, drops incomplete rows,
//! and exposes a read-only view of the cleaned table. Nothing mutates the
//! dataset after load, so shared access needs no locking.

use crate::error::{Result, TalkboardError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Records dated before this are discarded at load
const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(d) => d,
    None => panic!("invalid cutoff date"),
};

/// One talk, one row. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkRecord {
    pub title: String,
    pub author: String,
    pub date: NaiveDate,
    pub views: u64,
    pub likes: u64,
    pub link: String,
}

impl TalkRecord {
    /// Calendar year of the publish date
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month (1-12) of the publish date
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// Immutable, ordered collection of talk records with a derived year span
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TalkRecord>,
    year_min: i32,
    year_max: i32,
}

impl Dataset {
    /// Build a dataset from already-parsed records, applying the same
    /// cleaning rules as the CSV path (date cutoff, year span derivation).
    pub fn from_records(records: Vec<TalkRecord>) -> Self {
        let records: Vec<TalkRecord> =
            records.into_iter().filter(|r| r.date >= MIN_DATE).collect();
        let year_min = records.iter().map(|r| r.year()).min().unwrap_or(2000);
        let year_max = records.iter().map(|r| r.year()).max().unwrap_or(2000);
        Self {
            records,
            year_min,
            year_max,
        }
    }

    /// Load from a delimited text file on disk
    pub fn load_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_csv_str(&raw)?;
        info!(
            records = dataset.len(),
            year_min = dataset.year_min,
            year_max = dataset.year_max,
            "dataset loaded from {}",
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// Parse delimited text with a `title,author,date,views,likes,link`
    /// header. Rows with missing or unparsable fields are dropped; an
    /// unusable header is fatal.
    pub fn from_csv_str(raw: &str) -> Result<Self> {
        let mut lines = raw.lines();
        let header = lines
            .next()
            .ok_or_else(|| TalkboardError::DataLoad("empty data source".to_string()))?;
        let columns = ColumnMap::from_header(header)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match columns.parse_row(line) {
                Some(record) if record.date >= MIN_DATE => records.push(record),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, kept = records.len(), "dropped incomplete rows");
        }
        Ok(Self::from_records(records))
    }

    /// All records in load order
    pub fn records(&self) -> &[TalkRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cleaned table ended up empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min/max calendar year present. An empty dataset degenerates to
    /// `(2000, 2000)`, the load cutoff year.
    pub fn year_range(&self) -> (i32, i32) {
        (self.year_min, self.year_max)
    }

    /// Sorted distinct author names
    pub fn authors(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .map(|r| r.author.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// The author with the most talks; ties resolve to the
    /// lexicographically last name. `None` for an empty dataset.
    pub fn default_author(&self) -> Option<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.author.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)))
            .map(|(name, _)| name.to_string())
    }
}

/// Header-derived column positions for the six required fields
struct ColumnMap {
    title: usize,
    author: usize,
    date: usize,
    views: usize,
    likes: usize,
    link: usize,
}

impl ColumnMap {
    fn from_header(header: &str) -> Result<Self> {
        let names = split_csv_line(header);
        let find = |wanted: &str| {
            names
                .iter()
                .position(|n| n.trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| {
                    TalkboardError::DataLoad(format!("missing column `{wanted}` in header"))
                })
        };
        Ok(Self {
            title: find("title")?,
            author: find("author")?,
            date: find("date")?,
            views: find("views")?,
            likes: find("likes")?,
            link: find("link")?,
        })
    }

    /// Parse one data row. Returns `None` for rows that fail cleaning
    /// (short rows, blank fields, unparsable numbers or dates).
    fn parse_row(&self, line: &str) -> Option<TalkRecord> {
        let fields = split_csv_line(line);
        let width = [
            self.title,
            self.author,
            self.date,
            self.views,
            self.likes,
            self.link,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if fields.len() <= width {
            debug!("short row: {line}");
            return None;
        }

        let title = fields[self.title].trim();
        // Stray quotes and spaces around author names are cleaned here so
        // the selector options and the stored values always agree.
        let author = fields[self.author].trim().trim_matches(['\'', ' ']);
        let link = fields[self.link].trim();
        if title.is_empty() || author.is_empty() || link.is_empty() {
            return None;
        }

        let date = parse_date(fields[self.date].trim())?;
        let views: u64 = fields[self.views].trim().parse().ok()?;
        let likes: u64 = fields[self.likes].trim().parse().ok()?;

        Some(TalkRecord {
            title: title.to_string(),
            author: author.to_string(),
            date,
            views,
            likes,
            link: link.to_string(),
        })
    }
}

/// Split one CSV line into fields, honoring double-quoted fields with
/// embedded commas and doubled-quote escapes. Talk titles routinely
/// contain commas, so a plain split is not enough.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse the date column. Accepts ISO dates and the "December 2021"
/// month-year form the source data uses.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date);
    }
    // Month-year forms have no day; pin them to the first.
    let pinned = format!("1 {raw}");
    for format in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&pinned, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,author,date,views,likes,link
\"Climate action, now\",Jane Doe,December 2021,404000,12000,https://ted.com/1
Ocean worlds,Li Wei,2019-06-01,1200000,36000,https://ted.com/2
Ocean floors,Li Wei,2018-03-01,90000,2500,https://ted.com/3
Broken row,No Numbers,2018-03-01,abc,2500,https://ted.com/4
,Missing Title,2018-03-01,100,10,https://ted.com/5
Ancient talk,Old Speaker,1999-05-01,5000,100,https://ted.com/6
";

    #[test]
    fn test_load_drops_bad_rows() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        // Broken numbers, blank title, and pre-2000 rows are all gone
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.year_range(), (2018, 2021));
    }

    #[test]
    fn test_quoted_title_keeps_comma() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.records()[0].title, "Climate action, now");
        assert_eq!(dataset.records()[0].views, 404_000);
    }

    #[test]
    fn test_month_year_date_parsing() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let first = &dataset.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
        assert_eq!(first.year(), 2021);
        assert_eq!(first.month(), 12);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = Dataset::from_csv_str("title,author,date,views,likes\n").unwrap_err();
        assert!(err.to_string().contains("link"));
    }

    #[test]
    fn test_empty_source_is_fatal() {
        assert!(Dataset::from_csv_str("").is_err());
    }

    #[test]
    fn test_authors_sorted_and_deduped() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.authors(), vec!["Jane Doe", "Li Wei"]);
    }

    #[test]
    fn test_author_quote_trimming() {
        let raw = "\
title,author,date,views,likes,link
A,' Jane Doe',2020-01-01,10,1,https://t/1
";
        let dataset = Dataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.records()[0].author, "Jane Doe");
    }

    #[test]
    fn test_default_author_most_talks() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.default_author().as_deref(), Some("Li Wei"));
    }

    #[test]
    fn test_default_author_tie_breaks_to_last_name() {
        let raw = "\
title,author,date,views,likes,link
A,Aaron,2020-01-01,10,1,https://t/1
B,Zara,2020-01-01,10,1,https://t/2
";
        let dataset = Dataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.default_author().as_deref(), Some("Zara"));
    }

    #[test]
    fn test_empty_dataset_year_range() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_range(), (2000, 2000));
        assert_eq!(dataset.default_author(), None);
    }

    #[test]
    fn test_split_csv_line_escaped_quote() {
        let fields = split_csv_line("\"She said \"\"go\"\"\",x,y");
        assert_eq!(fields[0], "She said \"go\"");
        assert_eq!(fields.len(), 3);
    }
}
