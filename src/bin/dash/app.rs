//! Application state - focus handling and key-to-event mapping
//!
//! Keys mutate controls only by way of `ControlEvent`s handed to the
//! orchestrator; the app just caches the published results for drawing.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use talkboard_core::{ControlEvent, Orchestrator, PanelId, PanelUpdate};

/// Dashboard application state
pub struct App {
    orchestrator: Orchestrator,
    /// Sorted author options for the speaker selector
    authors: Vec<String>,
    /// Latest published result per panel
    results: HashMap<PanelId, PanelUpdate>,
    /// Panel receiving keyboard input
    focused: PanelId,
}

impl App {
    /// Build the app and render every panel once
    pub fn new(orchestrator: Orchestrator) -> Self {
        let authors = orchestrator.dataset().authors();
        let results = orchestrator
            .render_all()
            .into_iter()
            .map(|update| (update.panel, update))
            .collect();
        Self {
            orchestrator,
            authors,
            results,
            focused: PanelId::TopTalks,
        }
    }

    /// Panel currently receiving input
    pub fn focused(&self) -> PanelId {
        self.focused
    }

    /// Latest result for a panel
    pub fn result(&self, panel: PanelId) -> Option<&PanelUpdate> {
        self.results.get(&panel)
    }

    /// The orchestrator, for control snapshots in the header/footer
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Handle one key press. Returns true to quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.bump_count(1),
            KeyCode::Char('-') => self.bump_count(-1),
            KeyCode::Char('[') => self.bump_years(-1, 0),
            KeyCode::Char(']') => self.bump_years(1, 0),
            KeyCode::Char('{') => self.bump_years(0, -1),
            KeyCode::Char('}') => self.bump_years(0, 1),
            KeyCode::Char('m') => self.cycle_metric(),
            KeyCode::Char('a') => self.cycle_author(1),
            KeyCode::Char('A') => self.cycle_author(-1),
            _ => {}
        }
        false
    }

    /// One-line summary of the focused panel's controls for the footer
    pub fn status_line(&self) -> String {
        match self.focused {
            PanelId::TopTalks => {
                let c = self.orchestrator.talks_controls();
                format!(
                    "Top {} talks by {} | {}-{} | +/- count  [ ] lo  {{ }} hi  m metric",
                    c.count,
                    c.metric.name(),
                    c.years.lo,
                    c.years.hi
                )
            }
            PanelId::TopSpeakers => {
                let c = self.orchestrator.speakers_controls();
                format!(
                    "Top {} speakers by {} | +/- count  m metric",
                    c.count,
                    c.metric.name()
                )
            }
            PanelId::TalksBySpeaker => {
                let c = self.orchestrator.speaker_detail_controls();
                format!("Top {} talks by {} | +/- count  a/A author", c.count, c.author)
            }
            PanelId::TimeSeries => {
                let c = self.orchestrator.series_controls();
                format!(
                    "Talks per {} | {}-{} | [ ] lo  {{ }} hi  m granularity",
                    c.granularity.name(),
                    c.years.lo,
                    c.years.hi
                )
            }
        }
    }

    fn apply(&mut self, event: ControlEvent) {
        let update = self.orchestrator.handle(event);
        self.results.insert(update.panel, update);
    }

    fn focus_next(&mut self) {
        let order = PanelId::all();
        let index = order.iter().position(|&p| p == self.focused).unwrap_or(0);
        self.focused = order[(index + 1) % order.len()];
    }

    fn focus_prev(&mut self) {
        let order = PanelId::all();
        let index = order.iter().position(|&p| p == self.focused).unwrap_or(0);
        self.focused = order[(index + order.len() - 1) % order.len()];
    }

    fn bump_count(&mut self, delta: i64) {
        let event = match self.focused {
            PanelId::TopTalks => {
                let count = self.orchestrator.talks_controls().count;
                ControlEvent::TalksCount(Some(shift(count, delta)))
            }
            PanelId::TopSpeakers => {
                let count = self.orchestrator.speakers_controls().count;
                ControlEvent::SpeakersCount(Some(shift(count, delta)))
            }
            PanelId::TalksBySpeaker => {
                let count = self.orchestrator.speaker_detail_controls().count;
                ControlEvent::SpeakerDetailCount(Some(shift(count, delta)))
            }
            PanelId::TimeSeries => return,
        };
        self.apply(event);
    }

    fn bump_years(&mut self, lo_delta: i32, hi_delta: i32) {
        let event = match self.focused {
            PanelId::TopTalks => {
                let years = self.orchestrator.talks_controls().years;
                ControlEvent::TalksYears {
                    lo: years.lo + lo_delta,
                    hi: years.hi + hi_delta,
                }
            }
            PanelId::TimeSeries => {
                let years = self.orchestrator.series_controls().years;
                ControlEvent::SeriesYears {
                    lo: years.lo + lo_delta,
                    hi: years.hi + hi_delta,
                }
            }
            _ => return,
        };
        self.apply(event);
    }

    fn cycle_metric(&mut self) {
        let event = match self.focused {
            PanelId::TopTalks => {
                ControlEvent::TalksMetric(self.orchestrator.talks_controls().metric.toggled())
            }
            PanelId::TopSpeakers => {
                ControlEvent::SpeakersMetric(self.orchestrator.speakers_controls().metric.toggled())
            }
            PanelId::TimeSeries => ControlEvent::SeriesGranularity(
                self.orchestrator.series_controls().granularity.toggled(),
            ),
            PanelId::TalksBySpeaker => return,
        };
        self.apply(event);
    }

    fn cycle_author(&mut self, step: i64) {
        if self.focused != PanelId::TalksBySpeaker || self.authors.is_empty() {
            return;
        }
        let current = self.orchestrator.speaker_detail_controls().author;
        let len = self.authors.len() as i64;
        let index = self
            .authors
            .iter()
            .position(|a| *a == current)
            .map(|i| i as i64)
            .unwrap_or(-step);
        let next = (index + step).rem_euclid(len) as usize;
        self.apply(ControlEvent::SpeakerDetailAuthor(self.authors[next].clone()));
    }
}

/// Shift a count by a signed step, never below 1
fn shift(count: u32, delta: i64) -> u32 {
    (count as i64 + delta).max(1) as u32
}
