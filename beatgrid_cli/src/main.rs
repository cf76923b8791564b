use std::path::{Path, PathBuf};

use anyhow::Context;
use beatgrid_chart::GameSummary;
use beatgrid_core::{
    Engine, JudgedEvent, NullSink, OutputSink, SessionConfig, SessionObserver, TerminalSink,
    DEFAULT_CELLS_PER_LANE,
};
use beatgrid_store::ChartLibrary;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

mod autoplay;

#[derive(Debug, Parser)]
#[command(name = "beatgrid")]
#[command(about = "Rhythm game judgment engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the charts in a directory.
    List { dir: PathBuf },
    /// Validate a chart file and print a short description.
    Validate { input: PathBuf },
    /// Play a chart in real time and print the final summary.
    Play {
        input: PathBuf,
        /// Where each tick's lane grid goes.
        #[arg(long, value_enum, default_value_t = SinkKind::Terminal)]
        sink: SinkKind,
        /// Intensity cells per lane.
        #[arg(long, default_value_t = DEFAULT_CELLS_PER_LANE)]
        cells: usize,
        /// Press every lane at its event's exact target time.
        #[arg(long)]
        autoplay: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    Terminal,
    Null,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List { dir } => cmd_list(&dir),
        Command::Validate { input } => cmd_validate(&input),
        Command::Play {
            input,
            sink,
            cells,
            autoplay,
        } => cmd_play(&input, sink, cells, autoplay),
    }
}

fn cmd_list(dir: &Path) -> anyhow::Result<()> {
    let library = ChartLibrary::new(dir);
    let charts = library.list();
    if charts.is_empty() {
        println!("no charts found in {}", dir.display());
        return Ok(());
    }
    for chart in &charts {
        println!(
            "{:<20} {} - {} [{} / lv.{}] {:.0} bpm, {} ms",
            chart.id,
            chart.title,
            chart.artist,
            chart.difficulty,
            chart.level,
            chart.bpm,
            chart.duration_ms,
        );
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> anyhow::Result<()> {
    let chart = beatgrid_store::load_chart_file(input)
        .with_context(|| format!("validation failed: {}", input.display()))?;

    println!(
        "{} - {} [{} / lv.{}]",
        chart.metadata.title, chart.metadata.artist, chart.metadata.difficulty, chart.metadata.level,
    );
    println!(
        "{} lanes, {} events, {:.0} bpm, {} ms",
        chart.lane_count,
        chart.events.len(),
        chart.metadata.bpm,
        chart.metadata.duration_ms,
    );
    Ok(())
}

fn cmd_play(input: &Path, sink: SinkKind, cells: usize, autoplay: bool) -> anyhow::Result<()> {
    let chart = beatgrid_store::load_chart_file(input)
        .with_context(|| format!("failed to load chart: {}", input.display()))?;
    let events = chart.events.clone();

    let sink: Box<dyn OutputSink> = match sink {
        SinkKind::Terminal => Box::new(TerminalSink::stdout()),
        SinkKind::Null => Box::new(NullSink),
    };
    let config = SessionConfig {
        cells_per_lane: cells,
        ..SessionConfig::default()
    };

    let mut engine = Engine::new();
    engine.start(chart, sink, config, Box::new(LogObserver));
    if autoplay {
        if let Some(handle) = engine.input_handle() {
            let _presser = autoplay::spawn(handle, events);
        }
    }

    let summary = engine.wait().context("no game was started")?;
    println!();
    print_summary(&summary)?;
    Ok(())
}

fn print_summary(summary: &GameSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

/// Logs each judgment as it lands.
struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_event_judged(&mut self, ev: &JudgedEvent) {
        info!(
            "{:?} - lane {} ({}ms), combo {}",
            ev.judge, ev.lane, ev.time_diff, ev.score.combo
        );
    }
}
