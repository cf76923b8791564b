use beatgrid_chart::{Chart, GameSummary, Judgment, JudgmentWindows, ScoreState};
use log::{debug, warn};

use crate::events::{ActivatedEvent, JudgedEvent, SessionObserver};
use crate::project::{self, Frame, DEFAULT_CELLS_PER_LANE};
use crate::sink::OutputSink;

pub const DEFAULT_LEAD_TIME_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventStatus {
    Pending,
    Active,
    Resolved(Judgment),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub windows: JudgmentWindows,
    /// How long before its target time an event is displayed and matchable.
    pub lead_time_ms: u64,
    pub cells_per_lane: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            windows: JudgmentWindows::default(),
            lead_time_ms: DEFAULT_LEAD_TIME_MS,
            cells_per_lane: DEFAULT_CELLS_PER_LANE,
        }
    }
}

/// One play-through of a chart. All timing comes in through explicit
/// `now_ms` arguments, so the state machine itself has no clock and no
/// threads; the engine drives it in real time and tests drive it with
/// scripted times.
///
/// Event bookkeeping is an arena of status flags parallel to
/// `chart.events`: the chart stays untouched, an event's index is its
/// identity, and iteration order is deterministic. Each event activates
/// exactly once and resolves exactly once.
pub struct GameSession {
    chart: Chart,
    config: SessionConfig,
    status: Vec<EventStatus>,
    /// Index of the first never-activated event. Only moves forward, so
    /// activation never rescans earlier events.
    next_pending: usize,
    score: ScoreState,
    ended: bool,
    observer: Box<dyn SessionObserver>,
}

impl GameSession {
    pub fn new(chart: Chart, config: SessionConfig, observer: Box<dyn SessionObserver>) -> Self {
        let status = vec![EventStatus::Pending; chart.events.len()];
        Self {
            chart,
            config,
            status,
            next_pending: 0,
            score: ScoreState::default(),
            ended: false,
            observer,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn score(&self) -> ScoreState {
        self.score.clone()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_score(&self.score, self.chart.events.len())
    }

    /// Runs one judgment cycle at `now_ms`: activate newly due events, apply
    /// the queued presses, push a fresh frame, expire overdue events, then
    /// check for the end of the chart. Returns `false` once the session has
    /// ended.
    pub fn tick<I>(&mut self, now_ms: u64, presses: I, sink: &mut dyn OutputSink) -> bool
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        if self.ended {
            return false;
        }

        self.activate(now_ms);
        for (lane, press_time_ms) in presses {
            self.press(lane, press_time_ms);
        }

        let frame = self.render_frame(now_ms);
        if let Err(e) = sink.push(&frame) {
            warn!("output sink push failed: {e:#}");
        }

        self.expire(now_ms);

        if now_ms > self.chart.metadata.duration_ms {
            self.ended = true;
            let summary = self.summary();
            self.observer.on_game_ended(&summary);
            return false;
        }
        true
    }

    /// Matches a press on `lane` against the closest active event. With no
    /// candidate, or with a deviation beyond the miss cutoff, the press is
    /// dropped: a stray press never causes a miss by itself.
    pub fn press(&mut self, lane: usize, press_time_ms: u64) {
        if self.ended {
            return;
        }
        if lane >= self.chart.lane_count {
            debug!("press on unknown lane {lane} ignored");
            return;
        }

        let mut best: Option<(usize, u64)> = None;
        for index in 0..self.next_pending {
            if self.status[index] != EventStatus::Active {
                continue;
            }
            let event = &self.chart.events[index];
            if event.lane != lane {
                continue;
            }
            let diff = event.time_ms.abs_diff(press_time_ms);
            // Strict < keeps the first candidate on ties, which is the
            // earliest event since the scan runs in time order.
            if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                best = Some((index, diff));
            }
        }

        let Some((index, diff)) = best else {
            return;
        };
        match self.config.windows.classify(diff) {
            Some(judgment) => self.resolve(index, judgment, diff),
            None => debug!("press on lane {lane} outside every window ({diff}ms), dropped"),
        }
    }

    /// The current frame for the projector geometry of this session.
    pub fn render_frame(&self, now_ms: u64) -> Frame {
        let active = self
            .chart
            .events
            .iter()
            .enumerate()
            .filter(|(index, _)| self.status[*index] == EventStatus::Active)
            .map(|(_, event)| event);
        project::project(
            active,
            now_ms,
            self.config.lead_time_ms,
            self.chart.lane_count,
            self.config.cells_per_lane,
        )
    }

    fn activate(&mut self, now_ms: u64) {
        while self.next_pending < self.chart.events.len() {
            let event = self.chart.events[self.next_pending];
            if event.time_ms.saturating_sub(now_ms) > self.config.lead_time_ms {
                break;
            }
            self.status[self.next_pending] = EventStatus::Active;
            self.next_pending += 1;
            self.observer.on_event_activated(&ActivatedEvent {
                time: event.time_ms,
                lane: event.lane,
                kind: event.kind,
                current_time: now_ms,
            });
        }
    }

    fn expire(&mut self, now_ms: u64) {
        for index in 0..self.next_pending {
            if self.status[index] != EventStatus::Active {
                continue;
            }
            let overdue = now_ms.saturating_sub(self.chart.events[index].time_ms);
            if overdue > self.config.windows.miss_cutoff_ms {
                self.resolve(index, Judgment::Miss, overdue);
            }
        }
    }

    fn resolve(&mut self, index: usize, judgment: Judgment, time_diff: u64) {
        debug_assert!(matches!(self.status[index], EventStatus::Active));
        self.status[index] = EventStatus::Resolved(judgment);
        self.score.apply(judgment);
        self.observer.on_event_judged(&JudgedEvent {
            lane: self.chart.events[index].lane,
            judge: judgment,
            time_diff,
            score: self.score.clone(),
        });
    }
}
