use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};

use clap::Subcommand;
use timeflow_core::storage::DisplayMode;
use timeflow_core::timer::navigator;
use timeflow_core::{Config, PresetStore, SegmentSequence, TimerEngine, TICK_INTERVAL};

use super::common;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground until it finishes
    ///
    /// While running, control lines are read from stdin:
    /// pause, resume, toggle, next, prev, seek <seconds>, reset, quit.
    Run {
        /// Named preset to load
        #[arg(long)]
        preset: Option<String>,
        /// Inline segment list, e.g. "Warm Up:5,Deep Work:25,Break:5"
        #[arg(long)]
        segments: Option<String>,
        /// Seek to this position (seconds) before starting
        #[arg(long)]
        start_at: Option<f64>,
        /// Print every engine event as a JSON line instead of the live display
        #[arg(long)]
        json: bool,
    },
    /// Print the total duration of a preset or inline segment list
    Total {
        /// Named preset to load
        #[arg(long)]
        preset: Option<String>,
        /// Inline segment list, e.g. "Warm Up:5,Deep Work:25,Break:5"
        #[arg(long)]
        segments: Option<String>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            preset,
            segments,
            start_at,
            json,
        } => {
            let sequence = resolve_sequence(preset.as_deref(), segments.as_deref())?;
            run_timer(&sequence, start_at, json)
        }
        TimerAction::Total { preset, segments } => {
            let sequence = resolve_sequence(preset.as_deref(), segments.as_deref())?;
            let total = sequence.total_seconds();
            println!("{} ({total} s)", common::format_mmss(total));
            Ok(())
        }
    }
}

/// Resolve the segment list: inline spec, then named preset, then the
/// configured default preset.
fn resolve_sequence(
    preset: Option<&str>,
    spec: Option<&str>,
) -> Result<SegmentSequence, Box<dyn std::error::Error>> {
    if let Some(spec) = spec {
        return Ok(SegmentSequence::from_segments(common::parse_segments(spec)?));
    }
    let name = match preset {
        Some(name) => name.to_string(),
        None => Config::load_or_default().default_preset.ok_or(
            "no segments given: pass --segments or --preset, or set a default preset",
        )?,
    };
    let store = PresetStore::open()?;
    let preset = store
        .get(&name)?
        .ok_or_else(|| format!("preset '{name}' not found"))?;
    Ok(SegmentSequence::from_segments(preset.segments))
}

/// Interactive commands accepted on stdin while the timer runs.
enum Control {
    Pause,
    Resume,
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Reset,
    Quit,
}

fn parse_control(line: &str) -> Result<Control, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let control = match command {
        "pause" | "p" => Control::Pause,
        "resume" | "r" => Control::Resume,
        "toggle" | "t" => Control::Toggle,
        "next" | "n" => Control::Next,
        "prev" | "b" => Control::Prev,
        "reset" => Control::Reset,
        "quit" | "q" => Control::Quit,
        "seek" => {
            let target = words
                .next()
                .and_then(|w| w.parse::<f64>().ok())
                .ok_or_else(|| "usage: seek <seconds>".to_string())?;
            Control::Seek(target)
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(control)
}

/// Forward parsed stdin lines over a channel. The engine stays owned and
/// mutated by the run loop alone.
fn spawn_controls() -> Receiver<Control> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_control(&line) {
                Ok(control) => {
                    if tx.send(control).is_err() {
                        break;
                    }
                }
                Err(message) => eprintln!("{message}"),
            }
        }
    });
    rx
}

fn run_timer(
    sequence: &SegmentSequence,
    start_at: Option<f64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let durations = sequence.durations_secs();

    let mut engine = TimerEngine::new();
    let events = engine.subscribe();
    engine.set_total_seconds(sequence.total_seconds());
    if let Some(target) = start_at {
        engine.seek(target);
    }
    engine.start();

    let controls = spawn_controls();
    let mut finished = false;
    while !finished {
        std::thread::sleep(TICK_INTERVAL);

        while let Ok(control) = controls.try_recv() {
            match control {
                Control::Pause => {
                    engine.pause();
                }
                Control::Resume => {
                    engine.start();
                }
                Control::Toggle => {
                    engine.toggle();
                }
                Control::Next => {
                    engine.seek(navigator::skip_next(engine.elapsed_seconds(), &durations));
                }
                Control::Prev => {
                    engine.seek(navigator::skip_prev(engine.elapsed_seconds(), &durations));
                }
                Control::Seek(target) => {
                    engine.seek(target);
                }
                Control::Reset => {
                    engine.reset();
                }
                Control::Quit => {
                    if !json {
                        println!();
                    }
                    return Ok(());
                }
            }
        }

        if let Some(event) = engine.tick() {
            finished = event.is_finished();
        }

        if json {
            for event in events.try_iter() {
                println!("{}", serde_json::to_string(&event)?);
            }
        } else {
            render_line(&engine, sequence, &durations, config.display.mode)?;
        }
    }

    if !json {
        println!();
        println!("finished");
    }
    if config.notifications.enabled {
        // Terminal bell stands in for the alert sound.
        print!("\x07");
        std::io::stdout().flush()?;
    }
    Ok(())
}

fn render_line(
    engine: &TimerEngine,
    sequence: &SegmentSequence,
    durations: &[f64],
    mode: DisplayMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = engine.state();
    let mut elapsed = state.elapsed_s.max(0.0);
    if state.total_s > 0.0 {
        elapsed = elapsed.min(state.total_s);
    }

    let shown = match mode {
        DisplayMode::Countdown => (state.total_s - elapsed).max(0.0),
        DisplayMode::Elapsed => elapsed,
    };
    let marker = if state.running { ">" } else { "\u{2016}" };

    let mut line = format!(
        "[{marker}] {} / {}",
        common::format_mmss(shown),
        common::format_mmss(state.total_s)
    );
    if let Some(i) = navigator::current_index(elapsed, durations) {
        if let Some(current) = sequence.get(i) {
            line.push_str(&format!("  {}", current.name));
        }
        if let Some(next) = sequence.get(i + 1) {
            line.push_str(&format!("  (next: {})", next.name));
        }
    }

    let mut stdout = std::io::stdout();
    write!(stdout, "\r\x1b[2K{line}")?;
    stdout.flush()?;
    Ok(())
}
