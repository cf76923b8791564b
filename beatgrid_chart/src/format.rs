use serde::{Deserialize, Serialize};

/// On-disk chart document:
///
/// ```json
/// {
///   "metadata": { "title": "...", "artist": "...", "difficulty": "...",
///                 "level": 7, "bpm": 150.0, "duration": 94000 },
///   "gameConfig": { "lanes": 4, "noteSpeed": 1.0 },
///   "notes": [ { "time": 1000, "lane": 0, "type": "tap" } ]
/// }
/// ```
///
/// Every field is optional at this level so that presence and range checks
/// happen in `beatgrid_store::validate`, which reports typed errors instead
/// of serde failures. Times are milliseconds from game start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChart {
    pub metadata: Option<RawMetadata>,
    pub game_config: Option<RawGameConfig>,
    pub notes: Option<Vec<RawNote>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub difficulty: Option<String>,
    pub level: Option<u32>,
    pub bpm: Option<f64>,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameConfig {
    pub lanes: Option<u32>,
    pub note_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNote {
    pub time: Option<f64>,
    pub lane: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
