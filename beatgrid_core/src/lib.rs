pub mod clock;
pub mod engine;
pub mod events;
pub mod project;
pub mod session;
pub mod sink;

pub use clock::GameClock;
pub use engine::{Engine, InputHandle, TICK_PERIOD};
pub use events::{
    ActivatedEvent, ChannelObserver, EngineEvent, JudgedEvent, NullObserver, SessionObserver,
};
pub use project::{project, Frame, DEFAULT_CELLS_PER_LANE};
pub use session::{GameSession, SessionConfig, DEFAULT_LEAD_TIME_MS};
pub use sink::{NullSink, OutputSink, TerminalSink};
