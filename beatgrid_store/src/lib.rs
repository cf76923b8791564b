use std::{fs, path::Path};

use beatgrid_chart::{Chart, ChartEvent, EventKind, Metadata, RawChart, RawMetadata, RawNote};

mod error;
mod library;

pub use error::ChartError;
pub use library::{ChartLibrary, ChartSummary};

pub const MIN_LANES: usize = 3;
pub const MAX_LANES: usize = 5;
pub const DEFAULT_LANES: usize = 4;

/// Reads, parses and validates a chart file.
pub fn load_chart_file(path: impl AsRef<Path>) -> Result<Chart, ChartError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawChart = serde_json::from_slice(&bytes).map_err(|e| {
        ChartError::Malformed(format!("invalid json in {}: {e}", path.display()))
    })?;
    validate(&raw)
}

/// Parses and validates a chart from a JSON string.
pub fn parse_chart_str(json: &str) -> Result<Chart, ChartError> {
    let raw: RawChart =
        serde_json::from_str(json).map_err(|e| ChartError::Malformed(format!("invalid json: {e}")))?;
    validate(&raw)
}

/// Turns a raw chart document into a validated `Chart`. Never mutates the
/// input; on success the returned events are stably sorted by ascending
/// time, so equal times keep their source order.
pub fn validate(raw: &RawChart) -> Result<Chart, ChartError> {
    let metadata = raw
        .metadata
        .as_ref()
        .ok_or_else(|| ChartError::Malformed("missing metadata".to_string()))?;
    let game_config = raw
        .game_config
        .as_ref()
        .ok_or_else(|| ChartError::Malformed("missing gameConfig".to_string()))?;
    let notes = raw
        .notes
        .as_ref()
        .ok_or_else(|| ChartError::Malformed("missing notes".to_string()))?;

    let metadata = validate_metadata(metadata)?;

    let lane_count = match game_config.lanes {
        None => DEFAULT_LANES,
        Some(n) if (MIN_LANES..=MAX_LANES).contains(&(n as usize)) => n as usize,
        Some(n) => return Err(ChartError::InvalidLaneCount(n)),
    };

    let mut events = Vec::with_capacity(notes.len());
    for (index, note) in notes.iter().enumerate() {
        events.push(validate_note(index, note, lane_count)?);
    }
    events.sort_by_key(|e| e.time_ms);

    Ok(Chart {
        metadata,
        lane_count,
        note_speed: game_config.note_speed,
        events,
    })
}

fn validate_metadata(raw: &RawMetadata) -> Result<Metadata, ChartError> {
    let title = raw
        .title
        .clone()
        .ok_or(ChartError::MissingMetadata("title"))?;
    let artist = raw
        .artist
        .clone()
        .ok_or(ChartError::MissingMetadata("artist"))?;
    let difficulty = raw
        .difficulty
        .clone()
        .ok_or(ChartError::MissingMetadata("difficulty"))?;
    let level = raw.level.ok_or(ChartError::MissingMetadata("level"))?;
    let bpm = raw.bpm.ok_or(ChartError::MissingMetadata("bpm"))?;
    let duration = raw
        .duration
        .ok_or(ChartError::MissingMetadata("duration"))?;

    Ok(Metadata {
        title,
        artist,
        difficulty,
        level,
        bpm,
        duration_ms: duration.round() as u64,
    })
}

fn validate_note(index: usize, note: &RawNote, lane_count: usize) -> Result<ChartEvent, ChartError> {
    let time = note.time.ok_or(ChartError::InvalidEventTime { index })?;
    if !time.is_finite() || time < 0.0 {
        return Err(ChartError::InvalidEventTime { index });
    }

    // An absent lane falls out of range like any other bad value.
    let lane = note.lane.unwrap_or(-1);
    if lane < 0 || lane as usize >= lane_count {
        return Err(ChartError::InvalidLane {
            index,
            lane,
            lane_count,
        });
    }

    let kind = note.kind.clone().unwrap_or_default();
    let kind = EventKind::parse(&kind).ok_or(ChartError::InvalidEventKind { index, kind })?;

    Ok(ChartEvent {
        time_ms: time.round() as u64,
        lane: lane as usize,
        kind,
    })
}

#[cfg(test)]
mod tests;
