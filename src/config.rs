use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/audio.toml";
const DEFAULT_ASSETS_DIR: &str = "assets/sounds";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundcheckConfig {
    /// Mute the service right after loading.
    pub muted: bool,
    /// Volume applied to the playing BGM track (0.0 to 1.0).
    pub bgm_volume: f32,
    /// Directory holding the bundled sound files.
    pub assets_dir: PathBuf,
    /// How long to let audio play before shutting down.
    pub play_seconds: u64,
    /// Use the headless engine even when real output is compiled in.
    pub headless: bool,
}

impl Default for SoundcheckConfig {
    fn default() -> Self {
        Self {
            muted: false,
            bgm_volume: 1.0,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            play_seconds: 3,
            headless: false,
        }
    }
}

impl SoundcheckConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SoundcheckConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SoundcheckConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SoundcheckConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = SoundcheckConfig::load_from_path(&dir.path().join("nope.toml"));
        assert!(!cfg.muted);
        assert_eq!(cfg.bgm_volume, 1.0);
        assert_eq!(cfg.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audio.toml");
        fs::write(&path, "muted = true\nbgm_volume = 0.4\n").expect("write config");

        let cfg = SoundcheckConfig::load_from_path(&path);
        assert!(cfg.muted);
        assert!((cfg.bgm_volume - 0.4).abs() < f32::EPSILON);
        assert_eq!(cfg.play_seconds, 3);
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audio.toml");
        fs::write(&path, "muted = \"sometimes\"").expect("write config");

        let cfg = SoundcheckConfig::load_from_path(&path);
        assert!(!cfg.muted);
    }
}
