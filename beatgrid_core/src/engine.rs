use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use beatgrid_chart::{Chart, GameSummary, ScoreState};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::clock::GameClock;
use crate::events::SessionObserver;
use crate::session::{GameSession, SessionConfig};
use crate::sink::OutputSink;

/// Target tick period. The loop sleeps this long between cycles, but every
/// decision inside a cycle uses the clock, so late ticks only delay
/// judgments, never corrupt them.
pub const TICK_PERIOD: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy)]
struct PressCommand {
    lane: usize,
    at_ms: u64,
}

/// Cheap handle for threads that produce presses (device readers, network
/// receivers, demo rigs). Presses are enqueued and drained by the tick
/// thread, so producers never contend for the session itself.
#[derive(Clone)]
pub struct InputHandle {
    clock: GameClock,
    cancelled: Arc<AtomicBool>,
    presses: Sender<PressCommand>,
}

impl InputHandle {
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Enqueues a press. `at_ms` defaults to the current clock reading.
    /// Returns `false` once the game is over and presses go nowhere.
    pub fn press(&self, lane: usize, at_ms: Option<u64>) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return false;
        }
        let at_ms = at_ms.unwrap_or_else(|| self.clock.elapsed_ms());
        self.presses.send(PressCommand { lane, at_ms }).is_ok()
    }
}

struct ActiveGame {
    cancelled: Arc<AtomicBool>,
    input: InputHandle,
    session: Arc<Mutex<GameSession>>,
    handle: Option<JoinHandle<()>>,
}

/// Drives at most one session at a time from a dedicated tick thread.
///
/// The session sits behind a single mutex taken only by the tick thread;
/// presses reach it through the command queue, so there is exactly one
/// writer. `stop` flips an atomic flag the thread checks before every
/// cycle, making cancellation safe at any point and idempotent.
pub struct Engine {
    game: Option<ActiveGame>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self { game: None }
    }

    /// True while a session is live: started, not stopped, not yet past the
    /// end of its chart.
    pub fn is_running(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| !g.cancelled.load(Ordering::SeqCst) && !g.session.lock().is_ended())
    }

    /// Starts a new game. A no-op while another session is still running;
    /// a finished or stopped one is reaped first.
    pub fn start(
        &mut self,
        chart: Chart,
        sink: Box<dyn OutputSink>,
        config: SessionConfig,
        observer: Box<dyn SessionObserver>,
    ) {
        if self.is_running() {
            warn!("start ignored: a session is already running");
            return;
        }
        self.stop();

        info!(
            "game started: {} ({} events, {} lanes)",
            chart.metadata.title,
            chart.events.len(),
            chart.lane_count
        );

        let clock = GameClock::start();
        let cancelled = Arc::new(AtomicBool::new(false));
        let (press_tx, press_rx) = unbounded();
        let session = Arc::new(Mutex::new(GameSession::new(chart, config, observer)));

        let handle = thread::spawn({
            let session = Arc::clone(&session);
            let cancelled = Arc::clone(&cancelled);
            move || tick_loop(session, sink, clock, cancelled, press_rx)
        });

        self.game = Some(ActiveGame {
            cancelled: Arc::clone(&cancelled),
            input: InputHandle {
                clock,
                cancelled,
                presses: press_tx,
            },
            session,
            handle: Some(handle),
        });
    }

    /// Stops the running session, if any. Safe to call at any time, from
    /// any engine state; no end-of-game event is emitted for an explicit
    /// stop.
    pub fn stop(&mut self) {
        let Some(mut game) = self.game.take() else {
            return;
        };
        game.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = game.handle.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked");
            }
        }
        info!("game stopped");
    }

    /// Enqueues a press for the running session; a no-op when none is.
    /// `at_ms` defaults to the clock reading at call time.
    pub fn press(&self, lane: usize, at_ms: Option<u64>) {
        match &self.game {
            Some(game) => {
                game.input.press(lane, at_ms);
            }
            None => debug!("press ignored: no session running"),
        }
    }

    /// Handle for feeding presses from other threads.
    pub fn input_handle(&self) -> Option<InputHandle> {
        self.game.as_ref().map(|g| g.input.clone())
    }

    pub fn score(&self) -> Option<ScoreState> {
        self.game.as_ref().map(|g| g.session.lock().score())
    }

    /// Blocks until the session ends on its own, then returns its summary.
    /// Returns the summary-so-far immediately if the session was already
    /// stopped, or `None` if none was started.
    pub fn wait(&mut self) -> Option<GameSummary> {
        let mut game = self.game.take()?;
        if let Some(handle) = game.handle.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked");
            }
        }
        let summary = game.session.lock().summary();
        Some(summary)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick_loop(
    session: Arc<Mutex<GameSession>>,
    mut sink: Box<dyn OutputSink>,
    clock: GameClock,
    cancelled: Arc<AtomicBool>,
    presses: Receiver<PressCommand>,
) {
    loop {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        let now_ms = clock.elapsed_ms();
        let live = session.lock().tick(
            now_ms,
            presses.try_iter().map(|p| (p.lane, p.at_ms)),
            sink.as_mut(),
        );
        if !live {
            break;
        }

        thread::sleep(TICK_PERIOD);
    }

    if let Err(e) = sink.clear() {
        warn!("output sink clear failed: {e:#}");
    }
}
