use serde::{Deserialize, Serialize};

/// Quality tier of a resolved event. `Bad` only comes from a press landing
/// in the widest window; `Miss` only from expiry with no press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Judgment {
    Perfect,
    Great,
    Good,
    Bad,
    Miss,
}

impl Judgment {
    pub fn breaks_combo(self) -> bool {
        matches!(self, Judgment::Bad | Judgment::Miss)
    }

    pub fn points(self) -> u64 {
        match self {
            Judgment::Perfect => 1000,
            Judgment::Great => 500,
            Judgment::Good => 200,
            Judgment::Bad | Judgment::Miss => 0,
        }
    }
}

/// Tolerance thresholds in milliseconds of absolute deviation, non-decreasing
/// from `perfect_ms` out to `miss_cutoff_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentWindows {
    pub perfect_ms: u64,
    pub great_ms: u64,
    pub good_ms: u64,
    pub miss_cutoff_ms: u64,
}

impl Default for JudgmentWindows {
    fn default() -> Self {
        Self {
            perfect_ms: 50,
            great_ms: 100,
            good_ms: 150,
            miss_cutoff_ms: 200,
        }
    }
}

impl JudgmentWindows {
    /// Returns `None` unless the thresholds are non-decreasing.
    pub fn new(perfect_ms: u64, great_ms: u64, good_ms: u64, miss_cutoff_ms: u64) -> Option<Self> {
        if perfect_ms <= great_ms && great_ms <= good_ms && good_ms <= miss_cutoff_ms {
            Some(Self {
                perfect_ms,
                great_ms,
                good_ms,
                miss_cutoff_ms,
            })
        } else {
            None
        }
    }

    /// Classifies an absolute deviation. Boundaries belong to the tighter
    /// tier; beyond `miss_cutoff_ms` there is no judgment at all.
    pub fn classify(&self, deviation_ms: u64) -> Option<Judgment> {
        if deviation_ms <= self.perfect_ms {
            Some(Judgment::Perfect)
        } else if deviation_ms <= self.great_ms {
            Some(Judgment::Great)
        } else if deviation_ms <= self.good_ms {
            Some(Judgment::Good)
        } else if deviation_ms <= self.miss_cutoff_ms {
            Some(Judgment::Bad)
        } else {
            None
        }
    }
}

/// Running counters for one session. Combo counts consecutive resolutions
/// that kept the chain alive; `max_combo` is its high-water mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_score: u64,
}

impl ScoreState {
    pub fn apply(&mut self, judgment: Judgment) {
        match judgment {
            Judgment::Perfect => self.perfect += 1,
            Judgment::Great => self.great += 1,
            Judgment::Good => self.good += 1,
            Judgment::Bad => self.bad += 1,
            Judgment::Miss => self.miss += 1,
        }
        if judgment.breaks_combo() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        }
        self.total_score += judgment.points();
    }
}

/// Weighted hit ratio in percent, rounded to two decimal places. Zero when
/// the chart had no events.
pub fn accuracy(score: &ScoreState, total_events: usize) -> f64 {
    if total_events == 0 {
        return 0.0;
    }
    let weighted =
        f64::from(score.perfect) + 0.8 * f64::from(score.great) + 0.5 * f64::from(score.good);
    let pct = weighted / total_events as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Final record of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_score: u64,
    pub accuracy: f64,
    pub total_events: usize,
}

impl GameSummary {
    pub fn from_score(score: &ScoreState, total_events: usize) -> Self {
        Self {
            perfect: score.perfect,
            great: score.great,
            good: score.good,
            bad: score.bad,
            miss: score.miss,
            combo: score.combo,
            max_combo: score.max_combo,
            total_score: score.total_score,
            accuracy: accuracy(score, total_events),
            total_events,
        }
    }
}
