//! Scripted playback run against a loaded audio service.

use anyhow::{Context, Result};
use ino_audio::{AssetRegistry, AudioEngine, AudioService, Bgm, SoundEffect};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub struct SoundcheckRun {
    pub muted: bool,
    pub bgm: Option<Bgm>,
    pub bgm_volume: f32,
    pub effects: Vec<SoundEffect>,
    pub play_for: Duration,
}

/// Load `registry` into a fresh service on `engine`, play the requested
/// sounds, then release every player.
pub fn run<E: AudioEngine>(
    engine: E,
    registry: &AssetRegistry,
    cfg: &SoundcheckRun,
) -> Result<()> {
    let mut audio = AudioService::new(engine);
    audio.load(registry).context("Failed to decode sound bundle")?;
    info!(players = audio.player_count(), "Sound bundle loaded");

    if cfg.muted {
        audio.mute();
        info!("Audio muted");
    }

    if let Some(bgm) = cfg.bgm {
        audio
            .play_bgm(bgm)
            .with_context(|| format!("Failed to start {}", bgm.file_name()))?;
        audio.set_bgm_volume(cfg.bgm_volume);
    }

    let gap = if cfg.effects.is_empty() {
        Duration::ZERO
    } else {
        cfg.play_for / (cfg.effects.len() as u32 + 1)
    };
    let mut remaining = cfg.play_for;
    for se in &cfg.effects {
        audio.play_se(*se);
        thread::sleep(gap);
        remaining = remaining.saturating_sub(gap);
    }
    thread::sleep(remaining);

    match audio.playing_bgm() {
        Some(bgm) => info!(track = bgm.file_name(), "Pausing BGM"),
        None if cfg.bgm.is_some() && !audio.is_muted() => warn!("BGM stopped on its own"),
        None => {}
    }
    audio.pause_bgm();

    audio.finalize().context("Failed to release audio players")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ino_audio::{HeadlessEngine, SoundName};

    fn registry() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        for name in SoundName::ALL {
            let bytes: &[u8] = if name.format().loops() {
                b"OggS"
            } else {
                b"RIFF\0\0\0\0WAVE"
            };
            registry.register(name, bytes);
        }
        registry
    }

    #[test]
    fn headless_run_completes() {
        let cfg = SoundcheckRun {
            muted: false,
            bgm: Some(Bgm::Ino2),
            bgm_volume: 0.5,
            effects: vec![SoundEffect::Jump, SoundEffect::Heal],
            play_for: Duration::ZERO,
        };
        run(HeadlessEngine::new(), &registry(), &cfg).expect("run succeeds");
    }

    #[test]
    fn bad_bundle_fails_with_context() {
        let mut bad = registry();
        bad.register(SoundName::Se(SoundEffect::Damage), b"nope".as_slice());
        let cfg = SoundcheckRun {
            muted: true,
            bgm: None,
            bgm_volume: 1.0,
            effects: Vec::new(),
            play_for: Duration::ZERO,
        };
        let err = run(HeadlessEngine::new(), &bad, &cfg).expect_err("damage.wav is malformed");
        assert!(format!("{err:#}").contains("damage.wav"));
    }
}
