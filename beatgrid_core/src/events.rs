use beatgrid_chart::{EventKind, GameSummary, Judgment, ScoreState};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Emitted once when an event enters its lead window and becomes eligible
/// for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivatedEvent {
    pub time: u64,
    pub lane: usize,
    pub kind: EventKind,
    pub current_time: u64,
}

/// Emitted once when an event resolves, whether by press or by expiry.
/// `time_diff` is the absolute deviation for presses, and the elapsed time
/// past the target for expiries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgedEvent {
    pub lane: usize,
    pub judge: Judgment,
    pub time_diff: u64,
    pub score: ScoreState,
}

/// The outbound message stream of a session, ready for a transport layer to
/// serialize as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum EngineEvent {
    EventActivated(ActivatedEvent),
    EventJudged(JudgedEvent),
    GameEnded(GameSummary),
}

/// Capability handed to a session at construction. Callbacks run on the
/// thread that mutates the session, so they must return quickly; per-tick
/// ordering is activations first, then judgments, with `on_game_ended` last
/// and at most once per session.
pub trait SessionObserver: Send {
    fn on_event_activated(&mut self, _ev: &ActivatedEvent) {}
    fn on_event_judged(&mut self, _ev: &JudgedEvent) {}
    fn on_game_ended(&mut self, _summary: &GameSummary) {}
}

/// Drops every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Forwards every event into a channel, decoupling transport delivery from
/// the tick loop. A full or disconnected receiver is the receiver's
/// problem, never the session's.
pub struct ChannelObserver {
    sender: Sender<EngineEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<EngineEvent>) -> Self {
        Self { sender }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_event_activated(&mut self, ev: &ActivatedEvent) {
        let _ = self.sender.send(EngineEvent::EventActivated(ev.clone()));
    }

    fn on_event_judged(&mut self, ev: &JudgedEvent) {
        let _ = self.sender.send(EngineEvent::EventJudged(ev.clone()));
    }

    fn on_game_ended(&mut self, summary: &GameSummary) {
        let _ = self.sender.send(EngineEvent::GameEnded(summary.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_events_serialize_with_kebab_case_tags() {
        let ev = EngineEvent::EventActivated(ActivatedEvent {
            time: 1000,
            lane: 2,
            kind: EventKind::Tap,
            current_time: 40,
        });
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "event-activated");
        assert_eq!(json["data"]["currentTime"], 40);
        assert_eq!(json["data"]["kind"], "tap");
    }
}
