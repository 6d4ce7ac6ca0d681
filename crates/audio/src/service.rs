//! Audio service: player cache plus BGM/SE playback control.

use crate::{
    AssetRegistry, AudioEngine, AudioError, Bgm, Player, PlayerSnapshot, ServiceSnapshot,
    SoundEffect, SoundName,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Main audio interface for the game.
///
/// Holds one player per sound, built once by [`AudioService::load`], and a
/// one-way mute flag. All control calls are synchronous and expected to come
/// from the game's update loop.
pub struct AudioService<E: AudioEngine> {
    /// Engine that decodes assets into players
    engine: E,
    /// Loaded players, keyed by sound
    players: HashMap<SoundName, E::Player>,
    /// Once set, every control call is a no-op
    muted: bool,
}

impl<E: AudioEngine> AudioService<E> {
    /// Create a service with an empty player cache.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            players: HashMap::new(),
            muted: false,
        }
    }

    /// Decode every registered asset and cache a paused player for it.
    ///
    /// Stops at the first decode failure; players built before it stay cached.
    pub fn load(&mut self, registry: &AssetRegistry) -> Result<(), AudioError> {
        for asset in registry.iter() {
            let player = self.engine.create_player(asset)?;
            if let Some(mut previous) = self.players.insert(asset.name(), player) {
                if let Err(err) = previous.close() {
                    warn!(sound = %asset.name(), %err, "Failed to close replaced player");
                }
            }
            debug!(sound = %asset.name(), format = ?asset.format(), "Loaded sound");
        }
        Ok(())
    }

    /// Release every cached player.
    ///
    /// The first close failure is returned immediately and the players not yet
    /// visited stay cached and open.
    pub fn finalize(&mut self) -> Result<(), AudioError> {
        let mut names: Vec<SoundName> = self.players.keys().copied().collect();
        names.sort();
        for name in names {
            if let Some(player) = self.players.get_mut(&name) {
                player.close()?;
            }
            self.players.remove(&name);
        }
        debug!("Audio service finalized");
        Ok(())
    }

    /// Silence the service for the rest of the process. There is no unmute.
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Whether [`Self::mute`] has been called.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Set the volume of the BGM track that is currently playing.
    ///
    /// Tracks are scanned in [`Bgm::ALL`] order and only the first playing
    /// one is touched. Does nothing when no track plays.
    pub fn set_bgm_volume(&mut self, volume: f32) {
        if self.muted {
            return;
        }
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        for bgm in Bgm::ALL {
            if let Some(player) = self.players.get_mut(&SoundName::Bgm(bgm)) {
                if player.is_playing() {
                    player.set_volume(volume);
                    return;
                }
            }
        }
    }

    /// Pause every BGM track.
    pub fn pause_bgm(&mut self) {
        if self.muted {
            return;
        }
        self.pause_all_bgm();
    }

    /// Continue `bgm` from where it was paused, at full volume.
    pub fn resume_bgm(&mut self, bgm: Bgm) {
        if self.muted {
            return;
        }
        self.pause_all_bgm();
        let Some(player) = self.bgm_player(bgm) else {
            return;
        };
        player.set_volume(1.0);
        player.play();
    }

    /// Play `bgm` from its first sample at full volume, pausing the others.
    pub fn play_bgm(&mut self, bgm: Bgm) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }
        self.pause_all_bgm();
        let Some(player) = self.bgm_player(bgm) else {
            return Ok(());
        };
        player.set_volume(1.0);
        player.rewind()?;
        player.play();
        Ok(())
    }

    /// Restart `se` from its first sample.
    pub fn play_se(&mut self, se: SoundEffect) {
        if self.muted {
            return;
        }
        let name = SoundName::Se(se);
        let Some(player) = self.players.get_mut(&name) else {
            warn!(sound = %name, "Sound not loaded");
            return;
        };
        if let Err(err) = player.rewind() {
            warn!(sound = %name, %err, "Failed to rewind sound effect");
        }
        player.play();
    }

    /// The BGM track that is currently playing, if any.
    pub fn playing_bgm(&self) -> Option<Bgm> {
        Bgm::ALL.into_iter().find(|bgm| {
            self.players
                .get(&SoundName::Bgm(*bgm))
                .is_some_and(|p| p.is_playing())
        })
    }

    /// Cached player for `name`.
    pub fn player(&self, name: impl Into<SoundName>) -> Option<&E::Player> {
        self.players.get(&name.into())
    }

    /// Mutable access to the cached player for `name`.
    pub fn player_mut(&mut self, name: impl Into<SoundName>) -> Option<&mut E::Player> {
        self.players.get_mut(&name.into())
    }

    /// Number of cached players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Capture the state of every cached player.
    pub fn snapshot(&self) -> ServiceSnapshot {
        let players = SoundName::ALL
            .into_iter()
            .filter_map(|name| {
                self.players.get(&name).map(|p| PlayerSnapshot {
                    name,
                    playing: p.is_playing(),
                    volume: p.volume(),
                    position_ms: p.position().as_millis() as u64,
                })
            })
            .collect();
        ServiceSnapshot {
            muted: self.muted,
            players,
        }
    }

    fn pause_all_bgm(&mut self) {
        for bgm in Bgm::ALL {
            if let Some(player) = self.players.get_mut(&SoundName::Bgm(bgm)) {
                player.pause();
            }
        }
    }

    fn bgm_player(&mut self, bgm: Bgm) -> Option<&mut E::Player> {
        let name = SoundName::Bgm(bgm);
        let player = self.players.get_mut(&name);
        if player.is_none() {
            warn!(sound = %name, "Sound not loaded");
        }
        player
    }
}
