use std::time::Instant;

/// Monotonic elapsed time since the game started. Every timing decision in
/// a session reads this clock; elapsed time is never derived from tick
/// counts, because ticks can be delayed under load.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    started: Instant,
}

impl GameClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
