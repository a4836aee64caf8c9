//! Replays the hero carousel on a virtual clock and prints its event log.
//!
//! Useful for checking a content file and timing overrides without a browser:
//!
//! ```text
//! folio-sim --content content/home.json --span 45s --select 2@3s
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use folio_config::{CarouselMode, ConfigLoader, FolioConfig, validation};
use folio_core::{CarouselController, CarouselEvent};
use folio_model::HomeContent;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "folio-sim", about = "Hero carousel timeline simulator")]
struct Cli {
    /// Home content with the hero cards
    #[arg(long)]
    content: PathBuf,

    /// Configuration file; defaults to the environment/file lookup
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = CarouselMode::Default)]
    mode: CarouselMode,

    /// How much virtual time to simulate
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    span: Duration,

    /// Manual selections as INDEX@OFFSET, e.g. `2@3s`
    #[arg(long = "select", value_parser = parse_selection)]
    selections: Vec<Selection>,
}

#[derive(Debug, Clone, Copy)]
struct Selection {
    index: usize,
    offset: Duration,
}

fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (index, offset) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected INDEX@OFFSET, got '{raw}'"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|err| format!("invalid card index '{index}': {err}"))?;
    let offset = humantime::parse_duration(offset.trim())
        .map_err(|err| format!("invalid offset '{offset}': {err}"))?;
    Ok(Selection { index, offset })
}

fn load_config(path: Option<&PathBuf>) -> Result<FolioConfig> {
    match path {
        Some(path) => {
            let config = FolioConfig::load_from_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            for warning in validation::validate(&config)? {
                warn!(%warning, "configuration adjusted");
            }
            Ok(config)
        }
        None => Ok(ConfigLoader::from_env().load()?.config),
    }
}

fn describe(event: &CarouselEvent) -> String {
    match *event {
        CarouselEvent::TransitionStarted { from, to, .. } => {
            format!("transition {from} -> {to}")
        }
        CarouselEvent::BackgroundSwapped { index, .. } => {
            format!("background swapped to {index}")
        }
        CarouselEvent::ContentSwapped { index, .. } => {
            format!("content swapped to {index}")
        }
        CarouselEvent::ExitCompleted { .. } => "exit timeline complete".into(),
        CarouselEvent::TransitionFinished { index, .. } => {
            format!("transition finished on {index}")
        }
        CarouselEvent::BackgroundSettled { .. } => "background settled".into(),
        CarouselEvent::AutoplayTick { .. } => "autoplay tick".into(),
        CarouselEvent::AutoplaySkipped { .. } => "autoplay tick skipped".into(),
        CarouselEvent::AutoplayResumed { .. } => "autoplay resumed".into(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.content)
        .with_context(|| format!("reading {}", cli.content.display()))?;
    let content = HomeContent::from_json(&raw)
        .with_context(|| format!("parsing {}", cli.content.display()))?;
    let config = load_config(cli.config.as_ref())?;

    let len = content.len();
    if let Some(bad) = cli.selections.iter().find(|s| s.index >= len) {
        bail!("selection {} is out of range for {len} cards", bad.index);
    }

    let mut selections = cli.selections.clone();
    selections.sort_by_key(|s| s.offset);
    let mut selections = selections.into_iter().peekable();

    let t0 = Instant::now();
    let end = t0 + cli.span;
    let mut controller =
        CarouselController::new(content.cards, config.carousel, cli.mode, t0);

    info!(
        cards = len,
        mode = %cli.mode,
        autoplay = ?controller.timings().autoplay_delay,
        "simulating"
    );

    loop {
        let next_selection = selections.peek().map(|s| t0 + s.offset);
        let next = match (controller.next_deadline(), next_selection) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => match a.or(b) {
                Some(at) => at,
                None => break,
            },
        };
        if next > end {
            break;
        }

        let mut events = Vec::new();
        while let Some(selection) = selections.next_if(|s| t0 + s.offset <= next) {
            let accepted = controller.select(selection.index, t0 + selection.offset);
            if !accepted {
                println!(
                    "{:>9.3}s  select {} ignored",
                    selection.offset.as_secs_f64(),
                    selection.index
                );
            }
            events.extend(controller.take_events());
        }
        events.extend(controller.advance(next));

        for event in &events {
            let offset = event.at().saturating_duration_since(t0);
            println!("{:>9.3}s  {}", offset.as_secs_f64(), describe(event));
        }
    }

    controller.teardown();
    Ok(())
}
