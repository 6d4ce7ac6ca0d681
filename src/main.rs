//! ino-soundcheck - plays the ino sound bundle through the audio service
//!
//! Loads every bundled sound, optionally starts a BGM track and fires sound
//! effects, then shuts the service down.

mod bundle;
mod config;
mod soundcheck;

use anyhow::Result;
use config::SoundcheckConfig;
use ino_audio::{Bgm, HeadlessEngine, SoundEffect};
use soundcheck::SoundcheckRun;
use std::time::Duration;
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

    info!("Starting ino-soundcheck v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut cfg = match &cli.config {
        Some(path) => SoundcheckConfig::load_from_path(path),
        None => SoundcheckConfig::load(),
    };
    if let Some(dir) = cli.assets_dir.clone() {
        cfg.assets_dir = dir;
    }
    if let Some(seconds) = cli.seconds {
        cfg.play_seconds = seconds;
    }
    cfg.muted |= cli.no_audio;
    cfg.headless |= cli.headless;

    let registry = bundle::load_registry(&cfg.assets_dir)?;
    let run = SoundcheckRun {
        muted: cfg.muted,
        bgm: cli.bgm,
        bgm_volume: cfg.bgm_volume,
        effects: cli.effects.clone(),
        play_for: Duration::from_secs(cfg.play_seconds),
    };

    #[cfg(feature = "rodio_backend")]
    {
        if !cfg.headless {
            match ino_audio::RodioEngine::new() {
                Ok(engine) => {
                    soundcheck::run(engine, &registry, &run)?;
                    info!("ino-soundcheck shutting down");
                    return Ok(());
                }
                Err(err) => {
                    tracing::warn!("Failed to initialize audio: {}. Using headless engine.", err);
                }
            }
        }
    }

    soundcheck::run(HeadlessEngine::new(), &registry, &run)?;
    info!("ino-soundcheck shutting down");
    Ok(())
}

#[derive(Clone, Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    no_audio: bool,
    headless: bool,
    bgm: Option<Bgm>,
    effects: Vec<SoundEffect>,
    seconds: Option<u64>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--no-audio" => opts.no_audio = true,
                "--headless" => opts.headless = true,
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                    opts.config = Some(PathBuf::from(path));
                }
                "--assets" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--assets requires a directory path"))?;
                    opts.assets_dir = Some(PathBuf::from(path));
                }
                "--bgm" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--bgm requires a track (ino1|ino2)"))?;
                    match Bgm::parse(&raw) {
                        Some(bgm) => opts.bgm = Some(bgm),
                        None => anyhow::bail!("--bgm: unknown track {raw}"),
                    }
                }
                "--se" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--se requires a sound effect name"))?;
                    match SoundEffect::parse(&raw) {
                        Some(se) => opts.effects.push(se),
                        None => anyhow::bail!("--se: unknown sound effect {raw}"),
                    }
                }
                "--seconds" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--seconds requires an integer"))?;
                    match raw.parse::<u64>() {
                        Ok(value) => opts.seconds = Some(value),
                        Err(err) => anyhow::bail!("--seconds: invalid integer {raw}: {err}"),
                    }
                }
                other => {
                    tracing::warn!(arg = other, "Ignoring unknown argument");
                }
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_playback_flags() {
        let opts = parse(&[
            "--assets", "bundle", "--bgm", "ino2", "--se", "jump", "--se", "heal", "--no-audio",
        ])
        .expect("valid args");
        assert_eq!(opts.assets_dir, Some(PathBuf::from("bundle")));
        assert_eq!(opts.bgm, Some(Bgm::Ino2));
        assert_eq!(opts.effects, vec![SoundEffect::Jump, SoundEffect::Heal]);
        assert!(opts.no_audio);
        assert!(!opts.headless);
    }

    #[test]
    fn unknown_track_is_an_error() {
        assert!(parse(&["--bgm", "ino3"]).is_err());
        assert!(parse(&["--se"]).is_err());
    }

    #[test]
    fn bad_seconds_are_an_error() {
        assert!(parse(&["--seconds", "soon", "--headless"]).is_err());
        assert!(parse(&["--seconds", "-1"]).is_err());
        assert!(parse(&["--seconds"]).is_err());

        let opts = parse(&["--seconds", "3", "--headless"]).expect("valid args");
        assert_eq!(opts.seconds, Some(3));
        assert!(opts.headless);
    }
}
