use std::io::{self, Write};

use crate::project::Frame;

/// The narrow push interface a display must implement. The engine calls
/// `push` once per tick and `clear` when a game stops or ends; both must
/// return well within a tick period, and any error is logged and swallowed
/// by the caller rather than propagated into the judgment loop.
pub trait OutputSink: Send {
    fn push(&mut self, frame: &Frame) -> anyhow::Result<()>;
    fn clear(&mut self) -> anyhow::Result<()>;
}

/// Discards every frame. Useful headless and in tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn push(&mut self, _frame: &Frame) -> anyhow::Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Renders the grid as one carriage-return refreshed line of filled and
/// empty dots, one group per lane.
pub struct TerminalSink<W: Write + Send = io::Stdout> {
    out: W,
}

impl TerminalSink {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> OutputSink for TerminalSink<W> {
    fn push(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let mut line = String::from("\r");
        for (lane, cells) in frame.iter().enumerate() {
            if lane > 0 {
                line.push_str(" | ");
            }
            for &lit in cells {
                line.push(if lit { '●' } else { '○' });
            }
        }
        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.out.write_all(b"\r")?;
        self.out.write_all(" ".repeat(100).as_bytes())?;
        self.out.write_all(b"\r")?;
        self.out.flush()?;
        Ok(())
    }
}
