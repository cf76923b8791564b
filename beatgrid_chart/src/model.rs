use serde::{Deserialize, Serialize};

pub type Milliseconds = u64;

/// The input opportunity kinds a chart may contain. Matching treats them
/// alike; displays may render them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Tap,
    Hold,
    Slide,
}

impl EventKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tap" => Some(EventKind::Tap),
            "hold" => Some(EventKind::Hold),
            "slide" => Some(EventKind::Slide),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Tap => "tap",
            EventKind::Hold => "hold",
            EventKind::Slide => "slide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartEvent {
    pub time_ms: Milliseconds,
    pub lane: usize,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub difficulty: String,
    pub level: u32,
    pub bpm: f64,
    pub duration_ms: Milliseconds,
}

/// A validated chart. Immutable by convention once built: events are sorted
/// by ascending `time_ms` (stable, so equal times keep their source order)
/// and every lane is within `[0, lane_count)`. An event's position in
/// `events` is its stable identity for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub metadata: Metadata,
    pub lane_count: usize,
    pub note_speed: Option<f64>,
    pub events: Vec<ChartEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_parse_roundtrip() {
        for kind in [EventKind::Tap, EventKind::Hold, EventKind::Slide] {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("flick"), None);
    }

    #[test]
    fn event_kind_serializes_lowercase() {
        let json = serde_json::to_value(EventKind::Slide).unwrap();
        assert_eq!(json, "slide");
    }
}
