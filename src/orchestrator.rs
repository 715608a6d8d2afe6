//! Reactive orchestrator - routes control changes to panel recomputes
//!
//! Owns the shared dataset handle and one control slot per panel. A
//! control-change event routes to exactly the panel owning that control;
//! the panel recomputes and the result is published together with any
//! corrected count. Panels never trigger each other - the count
//! correction is the single feedback edge, and re-delivering a corrected
//! value is a no-op.
//!
//! Each slot sits behind its own mutex: concurrent event delivery
//! serializes per panel while distinct panels stay independent. The
//! dataset itself is immutable and needs no locking.

use crate::aggregate::Granularity;
use crate::controls::{
    resolve_count, SpeakersMetric, TalksBySpeakerControls, TalksMetric, TimeSeriesControls,
    TopSpeakersControls, TopTalksControls, YearRange, TALKS_BY_SPEAKER_DEFAULT_COUNT,
    TOP_SPEAKERS_DEFAULT_COUNT, TOP_TALKS_DEFAULT_COUNT,
};
use crate::dataset::Dataset;
use crate::panels::{talks_by_speaker, time_series, top_speakers, top_talks, PanelId, PanelOutput};
use crate::view::ViewResult;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Recompute lifecycle of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Recomputing,
}

/// A control-change event. Every control belongs to exactly one panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    TalksCount(Option<u32>),
    TalksYears { lo: i32, hi: i32 },
    TalksMetric(TalksMetric),
    SpeakersCount(Option<u32>),
    SpeakersMetric(SpeakersMetric),
    SpeakerDetailCount(Option<u32>),
    SpeakerDetailAuthor(String),
    SeriesYears { lo: i32, hi: i32 },
    SeriesGranularity(Granularity),
}

impl ControlEvent {
    /// The panel that owns the changed control
    pub fn panel(&self) -> PanelId {
        match self {
            ControlEvent::TalksCount(_)
            | ControlEvent::TalksYears { .. }
            | ControlEvent::TalksMetric(_) => PanelId::TopTalks,
            ControlEvent::SpeakersCount(_) | ControlEvent::SpeakersMetric(_) => {
                PanelId::TopSpeakers
            }
            ControlEvent::SpeakerDetailCount(_) | ControlEvent::SpeakerDetailAuthor(_) => {
                PanelId::TalksBySpeaker
            }
            ControlEvent::SeriesYears { .. } | ControlEvent::SeriesGranularity(_) => {
                PanelId::TimeSeries
            }
        }
    }
}

/// What the orchestrator publishes after handling one event
#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    pub panel: PanelId,
    pub result: ViewResult,
    /// `Some` for panels with a count control, carrying the post-clamp
    /// value the originating control should display
    pub corrected_count: Option<u32>,
}

/// One panel's mutable state behind its mutex
#[derive(Debug)]
struct Slot<C> {
    state: PanelState,
    controls: C,
}

impl<C> Slot<C> {
    fn new(controls: C) -> Self {
        Self {
            state: PanelState::Idle,
            controls,
        }
    }
}

fn lock<C>(slot: &Mutex<Slot<C>>) -> MutexGuard<'_, Slot<C>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Dispatches control events to panel view models over a shared dataset
pub struct Orchestrator {
    dataset: Arc<Dataset>,
    talks: Mutex<Slot<TopTalksControls>>,
    speakers: Mutex<Slot<TopSpeakersControls>>,
    speaker_detail: Mutex<Slot<TalksBySpeakerControls>>,
    series: Mutex<Slot<TimeSeriesControls>>,
}

impl Orchestrator {
    /// Create with default controls for every panel
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            talks: Mutex::new(Slot::new(TopTalksControls::defaults(&dataset))),
            speakers: Mutex::new(Slot::new(TopSpeakersControls::defaults(&dataset))),
            speaker_detail: Mutex::new(Slot::new(TalksBySpeakerControls::defaults(&dataset))),
            series: Mutex::new(Slot::new(TimeSeriesControls::defaults(&dataset))),
            dataset,
        }
    }

    /// The shared dataset handle
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Handle one control change: apply it to the owning panel's
    /// controls, recompute that panel, clamp the count, and publish.
    pub fn handle(&self, event: ControlEvent) -> PanelUpdate {
        let panel = event.panel();
        debug!(panel = panel.name(), ?event, "control change");
        match event {
            ControlEvent::TalksCount(raw) => {
                let mut slot = lock(&self.talks);
                slot.controls.count = resolve_count(raw, TOP_TALKS_DEFAULT_COUNT);
                Self::recompute_talks(&self.dataset, &mut slot)
            }
            ControlEvent::TalksYears { lo, hi } => {
                let mut slot = lock(&self.talks);
                slot.controls.years = YearRange::clamped(lo, hi, &self.dataset);
                Self::recompute_talks(&self.dataset, &mut slot)
            }
            ControlEvent::TalksMetric(metric) => {
                let mut slot = lock(&self.talks);
                slot.controls.metric = metric;
                Self::recompute_talks(&self.dataset, &mut slot)
            }
            ControlEvent::SpeakersCount(raw) => {
                let mut slot = lock(&self.speakers);
                slot.controls.count = resolve_count(raw, TOP_SPEAKERS_DEFAULT_COUNT);
                Self::recompute_speakers(&self.dataset, &mut slot)
            }
            ControlEvent::SpeakersMetric(metric) => {
                let mut slot = lock(&self.speakers);
                slot.controls.metric = metric;
                Self::recompute_speakers(&self.dataset, &mut slot)
            }
            ControlEvent::SpeakerDetailCount(raw) => {
                let mut slot = lock(&self.speaker_detail);
                slot.controls.count = resolve_count(raw, TALKS_BY_SPEAKER_DEFAULT_COUNT);
                Self::recompute_speaker_detail(&self.dataset, &mut slot)
            }
            ControlEvent::SpeakerDetailAuthor(author) => {
                let mut slot = lock(&self.speaker_detail);
                slot.controls.author = author;
                Self::recompute_speaker_detail(&self.dataset, &mut slot)
            }
            ControlEvent::SeriesYears { lo, hi } => {
                let mut slot = lock(&self.series);
                slot.controls.years = YearRange::clamped(lo, hi, &self.dataset);
                Self::recompute_series(&self.dataset, &mut slot)
            }
            ControlEvent::SeriesGranularity(granularity) => {
                let mut slot = lock(&self.series);
                slot.controls.granularity = granularity;
                Self::recompute_series(&self.dataset, &mut slot)
            }
        }
    }

    /// Recompute every panel from its current controls, in display order.
    /// Used for the initial render; the same clamp rules apply.
    pub fn render_all(&self) -> Vec<PanelUpdate> {
        vec![
            Self::recompute_talks(&self.dataset, &mut lock(&self.talks)),
            Self::recompute_speakers(&self.dataset, &mut lock(&self.speakers)),
            Self::recompute_series(&self.dataset, &mut lock(&self.series)),
            Self::recompute_speaker_detail(&self.dataset, &mut lock(&self.speaker_detail)),
        ]
    }

    /// Current lifecycle state of one panel. Outside a `handle` call this
    /// is always `Idle`; recomputes never overlap on a panel.
    pub fn panel_state(&self, panel: PanelId) -> PanelState {
        match panel {
            PanelId::TopTalks => lock(&self.talks).state,
            PanelId::TopSpeakers => lock(&self.speakers).state,
            PanelId::TalksBySpeaker => lock(&self.speaker_detail).state,
            PanelId::TimeSeries => lock(&self.series).state,
        }
    }

    /// Snapshot of the Top Talks controls
    pub fn talks_controls(&self) -> TopTalksControls {
        lock(&self.talks).controls.clone()
    }

    /// Snapshot of the Top Speakers controls
    pub fn speakers_controls(&self) -> TopSpeakersControls {
        lock(&self.speakers).controls.clone()
    }

    /// Snapshot of the Talks by Speaker controls
    pub fn speaker_detail_controls(&self) -> TalksBySpeakerControls {
        lock(&self.speaker_detail).controls.clone()
    }

    /// Snapshot of the Time Series controls
    pub fn series_controls(&self) -> TimeSeriesControls {
        lock(&self.series).controls.clone()
    }

    fn recompute_talks(
        dataset: &Dataset,
        slot: &mut Slot<TopTalksControls>,
    ) -> PanelUpdate {
        slot.state = PanelState::Recomputing;
        let output = top_talks::compute(dataset, &slot.controls);
        let corrected = Self::clamp_count(&mut slot.controls.count, &output, PanelId::TopTalks);
        slot.state = PanelState::Idle;
        PanelUpdate {
            panel: PanelId::TopTalks,
            result: output.result,
            corrected_count: Some(corrected),
        }
    }

    fn recompute_speakers(
        dataset: &Dataset,
        slot: &mut Slot<TopSpeakersControls>,
    ) -> PanelUpdate {
        slot.state = PanelState::Recomputing;
        let output = top_speakers::compute(dataset, &slot.controls);
        let corrected = Self::clamp_count(&mut slot.controls.count, &output, PanelId::TopSpeakers);
        slot.state = PanelState::Idle;
        PanelUpdate {
            panel: PanelId::TopSpeakers,
            result: output.result,
            corrected_count: Some(corrected),
        }
    }

    fn recompute_speaker_detail(
        dataset: &Dataset,
        slot: &mut Slot<TalksBySpeakerControls>,
    ) -> PanelUpdate {
        slot.state = PanelState::Recomputing;
        let output = talks_by_speaker::compute(dataset, &slot.controls);
        let corrected =
            Self::clamp_count(&mut slot.controls.count, &output, PanelId::TalksBySpeaker);
        slot.state = PanelState::Idle;
        PanelUpdate {
            panel: PanelId::TalksBySpeaker,
            result: output.result,
            corrected_count: Some(corrected),
        }
    }

    fn recompute_series(
        dataset: &Dataset,
        slot: &mut Slot<TimeSeriesControls>,
    ) -> PanelUpdate {
        slot.state = PanelState::Recomputing;
        let output = time_series::compute(dataset, &slot.controls);
        slot.state = PanelState::Idle;
        PanelUpdate {
            panel: PanelId::TimeSeries,
            result: output.result,
            corrected_count: None,
        }
    }

    /// Feedback clamp: correct the stored count down to the rows actually
    /// available. Writing the corrected value back and re-handling it is
    /// a fixed point - the recompute yields the same result and no
    /// further correction.
    fn clamp_count(count: &mut u32, output: &PanelOutput, panel: PanelId) -> u32 {
        let corrected = (*count).min(output.available as u32);
        if corrected != *count {
            debug!(
                panel = panel.name(),
                requested = *count,
                corrected,
                "count clamped to available rows"
            );
            *count = corrected;
        }
        corrected
    }
}
