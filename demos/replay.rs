//! Feeds a hand-written event script to a fresh reactor and prints the
//! resulting window list as JSON.
//!
//! A script holds one RON value per line. The first line may be a header
//! giving the starting viewport, `(viewport: (width: 1280.0, height: 800.0))`;
//! every other line is an `Event`. Blank lines and `//` comments are skipped.
//!
//! ```text
//! cargo run --example replay -- session.ron --config glass.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use glass_wm::actor::reactor::{Event, Reactor};
use glass_wm::common::config::Config;
use glass_wm::common::log;
use glass_wm::layout_engine::Viewport;
use serde::Deserialize;
use tracing::info;

#[derive(Parser)]
#[command(about = "Replay an event script against the window manager core")]
struct Cli {
    script: PathBuf,
    /// Config file to use instead of the stock defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Header {
    viewport: Viewport,
}

#[derive(Debug)]
struct Script {
    viewport: Viewport,
    events: Vec<Event>,
}

impl Script {
    fn parse(buf: &str) -> anyhow::Result<Script> {
        let mut lines = buf
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"))
            .peekable();

        let mut viewport = Viewport::default();
        if let Some((_, first)) = lines.peek()
            && let Ok(header) = ron::from_str::<Header>(first)
        {
            viewport = header.viewport;
            lines.next();
        }

        let events = lines
            .map(|(line, text)| {
                ron::from_str::<Event>(text).with_context(|| format!("line {line}: bad event"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Script { viewport, events })
    }
}

fn load(path: &Path) -> anyhow::Result<Script> {
    let buf = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Script::parse(&buf).with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    log::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            Config::read(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    let script = load(&cli.script)?;
    info!(events = script.events.len(), "Replaying script");

    let mut reactor = Reactor::new(config, script.viewport);
    reactor.handle_events(script.events);

    let windows = serde_json::to_string_pretty(&reactor.query_windows())
        .context("failed to encode window list")?;
    println!("{windows}");
    Ok(())
}
