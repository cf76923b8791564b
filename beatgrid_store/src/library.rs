use std::{
    fs,
    path::{Path, PathBuf},
};

use beatgrid_chart::{Chart, Metadata};
use log::warn;
use serde::Serialize;

use crate::{load_chart_file, ChartError};

/// One row of a chart listing, keyed by the file stem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub difficulty: String,
    pub level: u32,
    pub bpm: f64,
    pub duration_ms: u64,
}

impl ChartSummary {
    fn new(id: String, metadata: &Metadata) -> Self {
        Self {
            id,
            title: metadata.title.clone(),
            artist: metadata.artist.clone(),
            difficulty: metadata.difficulty.clone(),
            level: metadata.level,
            bpm: metadata.bpm,
            duration_ms: metadata.duration_ms,
        }
    }
}

/// A directory of `.json` charts addressed by file stem.
pub struct ChartLibrary {
    dir: PathBuf,
}

impl ChartLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Summaries of every loadable chart, sorted by id. Entries that fail to
    /// read or validate are skipped with a warning so one broken file never
    /// hides the rest.
    pub fn list(&self) -> Vec<ChartSummary> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to read chart directory {}: {e}", self.dir.display());
                return Vec::new();
            }
        };

        let mut charts = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if id.contains("schema") {
                continue;
            }
            match load_chart_file(&path) {
                Ok(chart) => charts.push(ChartSummary::new(id.to_string(), &chart.metadata)),
                Err(e) => warn!("skipping chart {}: {e}", path.display()),
            }
        }
        charts.sort_by(|a, b| a.id.cmp(&b.id));
        charts
    }

    pub fn load(&self, id: &str) -> Result<Chart, ChartError> {
        load_chart_file(self.dir.join(format!("{id}.json")))
    }
}
