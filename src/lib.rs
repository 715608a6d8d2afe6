//! Talkboard - Reactive Talk Analytics Engine
//!
//! A filter/aggregation/view engine over a fixed table of recorded talks.
//! User controls (a top-N count, a year range, per-panel category
//! selectors) drive four independent panels - ranked talks, per-speaker
//! rollups, a per-author table, and a time series - each recomputed as a
//! renderable chart or table description when one of its controls changes.
//!
//! # Architecture
//!
//! One-way data flow per event:
//! - **Dataset**: the immutable, cleaned table loaded once at startup
//! - **Aggregate**: pure filter/rank/group/bucket functions
//! - **Panels**: four view models mapping engine output to chart/table specs
//! - **Orchestrator**: routes a control change to the one panel that owns
//!   the control and feeds the corrected count back to that control only
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use talkboard_core::{ControlEvent, Dataset, Orchestrator};
//!
//! let csv = "title,author,date,views,likes,link\n\
//!            Deep seas,Li Wei,2019-06-01,1200000,36000,https://ted.com/1\n";
//! let dataset = Arc::new(Dataset::from_csv_str(csv)?);
//! let orchestrator = Orchestrator::new(dataset);
//!
//! let update = orchestrator.handle(ControlEvent::TalksCount(Some(5)));
//! assert_eq!(update.corrected_count, Some(1));
//! # Ok::<(), talkboard_core::TalkboardError>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod controls;
pub mod dataset;
pub mod error;
pub mod orchestrator;
pub mod panels;
pub mod view;

// Re-export commonly used types
pub use aggregate::Granularity;
pub use config::Settings;
pub use controls::{
    SpeakersMetric, TalksBySpeakerControls, TalksMetric, TimeSeriesControls, TopSpeakersControls,
    TopTalksControls, YearRange,
};
pub use dataset::{Dataset, TalkRecord};
pub use error::{Result, TalkboardError};
pub use orchestrator::{ControlEvent, Orchestrator, PanelState, PanelUpdate};
pub use panels::{PanelId, PanelOutput};
pub use view::{ChartSpec, TableSpec, ViewResult};
