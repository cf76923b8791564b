pub mod format;
pub mod model;
pub mod result;

pub use format::{RawChart, RawGameConfig, RawMetadata, RawNote};
pub use model::{Chart, ChartEvent, EventKind, Metadata, Milliseconds};
pub use result::{accuracy, GameSummary, Judgment, JudgmentWindows, ScoreState};
