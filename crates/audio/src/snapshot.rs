//! Serializable view of the service state, for tests and playback traces.

use crate::SoundName;
use serde::Serialize;

/// State of one cached player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Sound the player belongs to
    pub name: SoundName,
    /// Whether it is producing audio
    pub playing: bool,
    /// Linear volume
    pub volume: f32,
    /// Cursor position in milliseconds
    pub position_ms: u64,
}

/// State of the whole service, players in [`SoundName::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSnapshot {
    /// Whether the service has been muted
    pub muted: bool,
    /// Every cached player
    pub players: Vec<PlayerSnapshot>,
}

impl ServiceSnapshot {
    /// Snapshot of `name`, if it was cached.
    pub fn player(&self, name: impl Into<SoundName>) -> Option<&PlayerSnapshot> {
        let name = name.into();
        self.players.iter().find(|p| p.name == name)
    }

    /// Names of every player that is producing audio.
    pub fn playing(&self) -> Vec<SoundName> {
        self.players
            .iter()
            .filter(|p| p.playing)
            .map(|p| p.name)
            .collect()
    }
}
