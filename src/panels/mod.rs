//! Panel view models
//!
//! Four independent view definitions. Each declares the controls it
//! reads, runs its aggregation pipeline over a dataset snapshot, and maps
//! the result to a chart or table description.
//!
//! Panels never read each other's state; the only output-to-input path in
//! the system is the per-panel count correction carried in [`PanelOutput`].

pub mod talks_by_speaker;
pub mod time_series;
pub mod top_speakers;
pub mod top_talks;

use crate::view::ViewResult;
use serde::Serialize;

/// Panel identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelId {
    TopTalks,
    TopSpeakers,
    TalksBySpeaker,
    TimeSeries,
}

impl PanelId {
    /// All panel IDs in display order
    pub fn all() -> Vec<PanelId> {
        vec![
            PanelId::TopTalks,
            PanelId::TopSpeakers,
            PanelId::TimeSeries,
            PanelId::TalksBySpeaker,
        ]
    }

    /// Panel name
    pub fn name(&self) -> &'static str {
        match self {
            PanelId::TopTalks => "Top Talks",
            PanelId::TopSpeakers => "Top Speakers",
            PanelId::TalksBySpeaker => "Talks by Speaker",
            PanelId::TimeSeries => "Time Series",
        }
    }
}

/// What one panel computation yields: the renderable description plus the
/// row count actually available after filtering, which drives the
/// feedback clamp on the panel's count control.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOutput {
    pub result: ViewResult,
    pub available: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_panels_listed_once() {
        let all = PanelId::all();
        assert_eq!(all.len(), 4);
        let mut deduped = all.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 4);
    }

    #[test]
    fn test_panel_names() {
        assert_eq!(PanelId::TopTalks.name(), "Top Talks");
        assert_eq!(PanelId::TimeSeries.name(), "Time Series");
    }
}
