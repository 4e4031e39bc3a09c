// nestwatch - watches the camera feed so you don't have to stare at it
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// Frames arrive as files of encoded payload text; the watch command stands
// in for the timer-driven capture loop of the hosting app.

use nestwatch_lib::{
    frames::HISTORY_CAPACITY,
    intelligence::{Sensitivity, SensitivityResolver, SENSITIVITY_KEY},
    prefs::JsonFileStore,
    FrameHistory, FrameSnapshot, Result, SceneAnalyzer, WatchError,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// How often the watch loop re-reads the frame directory
const DEFAULT_WATCH_INTERVAL_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    if let Err(err) = run().await {
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "analyze" => handle_analyze(&args[2..]),
        "prompt" => handle_prompt(&args[2..]),
        "watch" => handle_watch(&args[2..]).await,
        "sensitivity" => handle_sensitivity(&args[2..]),
        "version" | "-v" | "--version" => {
            println!("nestwatch v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

fn handle_analyze(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(WatchError::Generic(
            "analyze needs at least one frame file".to_string(),
        ));
    }

    let history = history_from_files(args)?;
    let analyzer = SceneAnalyzer::new(settings_store()?);

    let report = analyzer.analyze(&history);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn handle_prompt(args: &[String]) -> Result<()> {
    let analyzer = SceneAnalyzer::new(settings_store()?);

    let prompt = if args.is_empty() {
        analyzer.snapshot_prompt()
    } else {
        let history = history_from_files(args)?;
        analyzer.analyze(&history).prompt
    };

    println!("{}", prompt);

    Ok(())
}

async fn handle_watch(args: &[String]) -> Result<()> {
    let dir = args
        .first()
        .map(PathBuf::from)
        .ok_or_else(|| WatchError::Generic("watch needs a frame directory".to_string()))?;

    let interval_secs = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| WatchError::Generic(format!("'{}' is not a number of seconds", raw)))?,
        None => DEFAULT_WATCH_INTERVAL_SECS,
    };

    let analyzer = SceneAnalyzer::new(settings_store()?);

    println!(
        "Watching {} every {}s (ctrl-c to stop)",
        dir.display(),
        interval_secs
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        ticker.tick().await;

        // One bad tick (directory briefly missing, partial file) should not
        // end the watch - report it and try again next interval
        match load_recent_frames(&dir) {
            Ok(history) => {
                let report = analyzer.analyze(&history);
                println!(
                    "[{}] movement={} confidence={:.2} frames={} avg_diff={:.0}",
                    chrono::Local::now().format("%H:%M:%S"),
                    report.analysis.level,
                    report.analysis.confidence,
                    history.len(),
                    report.analysis.average_difference.unwrap_or(0.0),
                );
            }
            Err(err) => eprintln!("watch tick failed: {}", err.user_message()),
        }
    }
}

fn handle_sensitivity(args: &[String]) -> Result<()> {
    match args.first() {
        None => {
            let resolver = SensitivityResolver::new(settings_store()?);
            let resolved = resolver.resolve();

            println!("sensitivity: {}", resolved.sensitivity);
            println!("multiplier:  {}", resolved.multiplier);
            println!("threshold:   {}", resolver.movement_threshold());
            if resolved.degraded {
                println!("(stored value was unrecognized; using the medium default)");
            }

            Ok(())
        }
        Some(raw) => {
            let level = Sensitivity::parse(raw)
                .ok_or_else(|| WatchError::InvalidSensitivity(raw.clone()))?;

            let mut store = JsonFileStore::open(JsonFileStore::default_path()?)?;
            store.set(SENSITIVITY_KEY, level.to_string())?;

            println!("sensitivity set to {}", level);

            Ok(())
        }
    }
}

// The settings store used by every command. Read paths tolerate a broken
// file; only explicit writes (sensitivity <value>) insist on opening it.
fn settings_store() -> Result<Arc<JsonFileStore>> {
    let path = JsonFileStore::default_path()?;
    Ok(Arc::new(JsonFileStore::load_or_default(path)))
}

fn history_from_files(paths: &[String]) -> Result<FrameHistory> {
    let mut history = FrameHistory::new();

    for path in paths {
        let payload = fs::read_to_string(path)?;
        history.push(FrameSnapshot::new(payload.trim_end()));
    }

    Ok(history)
}

// Load the most recently modified files in the directory, oldest first, so
// the history reads like the capture order.
fn load_recent_frames(dir: &Path) -> Result<FrameHistory> {
    let mut entries: Vec<(std::time::SystemTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            entries.push((metadata.modified()?, entry.path()));
        }
    }

    entries.sort_by_key(|(modified, _)| *modified);

    let start = entries.len().saturating_sub(HISTORY_CAPACITY);
    let mut history = FrameHistory::new();

    for (_, path) in &entries[start..] {
        let payload = fs::read_to_string(path)?;
        history.push(FrameSnapshot::new(payload.trim_end()));
    }

    Ok(history)
}

fn print_usage() {
    println!("nestwatch - movement detection over a rolling frame history");
    println!();
    println!("USAGE:");
    println!("  nestwatch analyze <frame-file>...        Classify movement and print the full report");
    println!("  nestwatch prompt [frame-file]...         Print the instruction text for the AI service");
    println!("  nestwatch watch <dir> [interval-secs]    Re-analyze the newest frames on an interval");
    println!("  nestwatch sensitivity [level]            Show or set sensitivity (low|medium|high|maximum)");
    println!("  nestwatch version                        Print version");
    println!("  nestwatch help                           Show this help");
    println!();
    println!("Frame files hold the encoded payload text produced by the capture side.");
}
