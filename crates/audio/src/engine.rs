//! Seam between the service and the mixing engine that renders audio.

use crate::{AssetFormat, AudioError, SoundAsset, SoundName};
use std::time::Duration;

/// A stateful handle controlling playback of one decoded stream.
pub trait Player {
    /// Start or continue playback from the current cursor.
    fn play(&mut self);

    /// Stop advancing the cursor, keeping its position.
    fn pause(&mut self);

    /// Whether the player is currently producing audio.
    fn is_playing(&self) -> bool;

    /// Set the linear volume (1.0 = unattenuated).
    fn set_volume(&mut self, volume: f32);

    /// Current linear volume.
    fn volume(&self) -> f32;

    /// Move the cursor back to the first sample.
    fn rewind(&mut self) -> Result<(), AudioError>;

    /// Current cursor position.
    fn position(&self) -> Duration;

    /// Release the engine resources backing this player.
    fn close(&mut self) -> Result<(), AudioError>;
}

/// Factory for players, one per decoded asset.
pub trait AudioEngine {
    /// Player type produced by this engine.
    type Player: Player;

    /// Decode `asset` and wrap it in a paused player.
    ///
    /// Looping formats must be wrapped so playback re-enters at the first
    /// sample after the stream ends.
    fn create_player(&self, asset: &SoundAsset) -> Result<Self::Player, AudioError>;
}

/// Engine that produces no sound but tracks player state.
///
/// Used when no output device is available and in tests. Decoding is limited
/// to checking the container header so malformed bundles still fail at load.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    clip_length: Option<Duration>,
    loop_length: Option<Duration>,
}

impl HeadlessEngine {
    /// Create a headless engine whose streams have no known length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give one-shot clips a fixed length so [`HeadlessPlayer::advance`]
    /// stops them like a drained sink.
    pub fn with_clip_length(mut self, length: Duration) -> Self {
        self.clip_length = Some(length);
        self
    }

    /// Give looping tracks a fixed length so [`HeadlessPlayer::advance`]
    /// wraps their cursor back to the start.
    pub fn with_loop_length(mut self, length: Duration) -> Self {
        self.loop_length = Some(length);
        self
    }
}

impl AudioEngine for HeadlessEngine {
    type Player = HeadlessPlayer;

    fn create_player(&self, asset: &SoundAsset) -> Result<Self::Player, AudioError> {
        check_header(asset)?;
        let looping = asset.format().loops();
        Ok(HeadlessPlayer {
            name: asset.name(),
            looping,
            length: if looping {
                self.loop_length.filter(|l| !l.is_zero())
            } else {
                self.clip_length
            },
            playing: false,
            volume: 1.0,
            position: Duration::ZERO,
            closed: false,
            fail_close: false,
            fail_rewind: false,
        })
    }
}

fn check_header(asset: &SoundAsset) -> Result<(), AudioError> {
    let bytes = asset.bytes();
    let ok = match asset.format() {
        AssetFormat::Wav => {
            bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
        }
        AssetFormat::Vorbis => bytes.starts_with(b"OggS"),
    };
    if ok {
        Ok(())
    } else {
        Err(AudioError::Decode {
            name: asset.name(),
            reason: format!("not a valid {:?} stream", asset.format()),
        })
    }
}

/// Player produced by [`HeadlessEngine`].
#[derive(Debug, Clone)]
pub struct HeadlessPlayer {
    name: SoundName,
    looping: bool,
    length: Option<Duration>,
    playing: bool,
    volume: f32,
    position: Duration,
    closed: bool,
    fail_close: bool,
    fail_rewind: bool,
}

impl HeadlessPlayer {
    /// Sound this player was created for.
    pub fn name(&self) -> SoundName {
        self.name
    }

    /// Whether [`Player::close`] has succeeded.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Simulate `elapsed` of wall-clock playback.
    ///
    /// Looping players wrap their cursor at their length and never stop;
    /// one-shot players stop at their length.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position += elapsed;
        let Some(length) = self.length else {
            return;
        };
        if self.looping {
            let wrapped = self.position.as_nanos() % length.as_nanos();
            self.position = Duration::from_nanos(wrapped as u64);
        } else if self.position >= length {
            self.position = length;
            self.playing = false;
        }
    }

    /// Make the next [`Player::close`] fail.
    pub fn fail_next_close(&mut self) {
        self.fail_close = true;
    }

    /// Make the next [`Player::rewind`] fail.
    pub fn fail_next_rewind(&mut self) {
        self.fail_rewind = true;
    }
}

impl Player for HeadlessPlayer {
    fn play(&mut self) {
        if !self.looping && self.length.is_some_and(|l| self.position >= l) {
            return;
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        if std::mem::take(&mut self.fail_rewind) {
            return Err(AudioError::Seek {
                name: self.name,
                reason: "injected rewind failure".to_string(),
            });
        }
        self.position = Duration::ZERO;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn close(&mut self) -> Result<(), AudioError> {
        if std::mem::take(&mut self.fail_close) {
            return Err(AudioError::Close {
                name: self.name,
                reason: "injected close failure".to_string(),
            });
        }
        self.playing = false;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{AssetRegistry, Bgm, SoundEffect};

    /// Smallest byte strings that pass the headless header check.
    pub(crate) fn valid_bytes(name: SoundName) -> Vec<u8> {
        match name.format() {
            AssetFormat::Wav => b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec(),
            AssetFormat::Vorbis => b"OggS\x00\x02\x00\x00".to_vec(),
        }
    }

    pub(crate) fn full_registry() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        for name in SoundName::ALL {
            registry.register(name, valid_bytes(name));
        }
        registry
    }

    fn player_for(engine: &HeadlessEngine, name: SoundName) -> HeadlessPlayer {
        let registry = full_registry();
        engine
            .create_player(registry.get(name).expect("registered"))
            .expect("valid header")
    }

    #[test]
    fn test_players_start_paused_at_full_volume() {
        let player = player_for(&HeadlessEngine::new(), Bgm::Ino1.into());
        assert!(!player.is_playing());
        assert_eq!(player.volume(), 1.0);
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn test_bad_header_is_a_decode_error() {
        let mut registry = AssetRegistry::new();
        registry.register(SoundEffect::Jump.into(), b"OggS not a wav".to_vec());
        let asset = registry.get(SoundEffect::Jump.into()).unwrap();
        let err = HeadlessEngine::new()
            .create_player(asset)
            .expect_err("wav header check rejects ogg bytes");
        assert!(matches!(err, AudioError::Decode { .. }));
    }

    #[test]
    fn test_one_shot_stops_at_length() {
        let engine = HeadlessEngine::new().with_clip_length(Duration::from_millis(200));
        let mut player = player_for(&engine, SoundEffect::Jump.into());
        player.play();
        player.advance(Duration::from_millis(150));
        assert!(player.is_playing());
        player.advance(Duration::from_millis(100));
        assert!(!player.is_playing());
        assert_eq!(player.position(), Duration::from_millis(200));

        // A drained clip only plays again after a rewind.
        player.play();
        assert!(!player.is_playing());
        player.rewind().unwrap();
        player.play();
        assert!(player.is_playing());
    }

    #[test]
    fn test_looping_track_wraps_to_start() {
        let engine = HeadlessEngine::new()
            .with_clip_length(Duration::from_millis(200))
            .with_loop_length(Duration::from_secs(10));
        let mut player = player_for(&engine, Bgm::Ino1.into());
        player.play();
        player.advance(Duration::from_secs(9));
        assert_eq!(player.position(), Duration::from_secs(9));
        player.advance(Duration::from_secs(1));
        assert_eq!(player.position(), Duration::ZERO);
        assert!(player.is_playing());

        // Long stretches of playback stay inside one loop.
        player.advance(Duration::from_secs(3_600 + 4));
        assert_eq!(player.position(), Duration::from_secs(4));
        assert!(player.is_playing());
    }

    #[test]
    fn test_paused_player_does_not_advance() {
        let mut player = player_for(&HeadlessEngine::new(), Bgm::Ino2.into());
        player.advance(Duration::from_secs(3));
        assert_eq!(player.position(), Duration::ZERO);
        player.play();
        player.advance(Duration::from_secs(3));
        assert_eq!(player.position(), Duration::from_secs(3));
    }

    #[test]
    fn test_injected_failures_fire_once() {
        let mut player = player_for(&HeadlessEngine::new(), SoundEffect::Heal.into());
        player.fail_next_rewind();
        assert!(matches!(player.rewind(), Err(AudioError::Seek { .. })));
        assert!(player.rewind().is_ok());

        player.fail_next_close();
        assert!(matches!(player.close(), Err(AudioError::Close { .. })));
        assert!(!player.is_closed());
        assert!(player.close().is_ok());
        assert!(player.is_closed());
    }
}
