//! exhibit-sound - proximity-triggered creature sounds
//!
//! Headless driver: loads the catalog, then replays a scripted session.

use anyhow::Result;
use exhibit_sound::config::GalleryConfig;
use exhibit_sound::headless::{self, HeadlessConfig};
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting exhibit-sound v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut config = match &cli.config {
        Some(path) => GalleryConfig::load_from_path(path),
        None => GalleryConfig::load(),
    };
    if let Some(origin) = cli.origin.clone() {
        config.origin = Some(origin);
    }
    if cli.script.is_none() && !cli.dump_state {
        tracing::warn!("Nothing to do without --script or --dump-state");
    }

    // The gallery is single-threaded; run it on the current thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(headless::run(HeadlessConfig {
        config,
        script: cli.script,
        no_audio: cli.no_audio,
        event_log: cli.event_log,
        dump_state: cli.dump_state,
    }))
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    origin: Option<String>,
    script: Option<PathBuf>,
    event_log: Option<PathBuf>,
    no_audio: bool,
    dump_state: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = Some(PathBuf::from(required(&mut args, &arg)?)),
                "--origin" => opts.origin = Some(required(&mut args, &arg)?),
                "--script" => opts.script = Some(PathBuf::from(required(&mut args, &arg)?)),
                "--event-log" => opts.event_log = Some(PathBuf::from(required(&mut args, &arg)?)),
                "--no-audio" => opts.no_audio = true,
                "--dump-state" => opts.dump_state = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => tracing::warn!("Ignoring unknown argument: {other}"),
            }
        }

        Ok(opts)
    }
}

fn required<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

fn print_usage() {
    println!(
        "usage: exhibit-sound [--config <toml>] [--origin <url>] [--script <json>] \
         [--event-log <jsonl>] [--no-audio] [--dump-state]"
    );
}
