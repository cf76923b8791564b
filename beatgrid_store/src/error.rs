use std::path::PathBuf;

use thiserror::Error;

/// Why a chart was rejected. Validation is all-or-nothing: the first failing
/// check wins and no partial chart is ever returned.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("malformed chart: {0}")]
    Malformed(String),

    #[error("missing required metadata field: {0}")]
    MissingMetadata(&'static str),

    #[error("invalid lane count: {0} (expected 3 to 5)")]
    InvalidLaneCount(u32),

    #[error("note {index}: invalid event time")]
    InvalidEventTime { index: usize },

    #[error("note {index}: lane {lane} out of range (chart has {lane_count} lanes)")]
    InvalidLane {
        index: usize,
        lane: i64,
        lane_count: usize,
    },

    #[error("note {index}: unknown event kind '{kind}'")]
    InvalidEventKind { index: usize, kind: String },

    #[error("failed to read chart {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
