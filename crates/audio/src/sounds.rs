//! Sound effect and music track definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Background music tracks.
///
/// Only one track is ever audible at a time; see [`crate::AudioService::play_bgm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bgm {
    /// Main stage theme
    Ino1,
    /// Second theme
    Ino2,
}

impl Bgm {
    /// Every track, in the order volume changes scan them.
    pub const ALL: [Bgm; 2] = [Bgm::Ino1, Bgm::Ino2];

    /// Bundle file name for this track.
    pub fn file_name(&self) -> &'static str {
        match self {
            Bgm::Ino1 => "ino1.ogg",
            Bgm::Ino2 => "ino2.ogg",
        }
    }

    /// Parse a short CLI-friendly label (`ino1`, `ino2`, `0`, `1`).
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "ino1" | "0" | "bgm0" => Some(Bgm::Ino1),
            "ino2" | "1" | "bgm1" => Some(Bgm::Ino2),
            _ => None,
        }
    }
}

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player taking damage
    Damage,
    /// Health restored
    Heal,
    /// Item picked up
    ItemGet,
    /// Rare item picked up
    ItemGet2,
    /// Player jumping
    Jump,
}

impl SoundEffect {
    /// Every sound effect.
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Damage,
        SoundEffect::Heal,
        SoundEffect::ItemGet,
        SoundEffect::ItemGet2,
        SoundEffect::Jump,
    ];

    /// Bundle file name for this clip.
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Damage => "damage.wav",
            SoundEffect::Heal => "heal.wav",
            SoundEffect::ItemGet => "itemget.wav",
            SoundEffect::ItemGet2 => "itemget2.wav",
            SoundEffect::Jump => "jump.wav",
        }
    }

    /// Parse a short CLI-friendly label (`jump`, `itemget2`, ...).
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|se| se.file_name().trim_end_matches(".wav") == label)
    }
}

/// Logical name of any registered sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoundName {
    /// A background music track
    Bgm(Bgm),
    /// A sound effect clip
    Se(SoundEffect),
}

impl SoundName {
    /// The complete, fixed set of sounds the game ships with.
    pub const ALL: [SoundName; 7] = [
        SoundName::Se(SoundEffect::Damage),
        SoundName::Se(SoundEffect::Heal),
        SoundName::Bgm(Bgm::Ino1),
        SoundName::Bgm(Bgm::Ino2),
        SoundName::Se(SoundEffect::ItemGet),
        SoundName::Se(SoundEffect::ItemGet2),
        SoundName::Se(SoundEffect::Jump),
    ];

    /// Bundle file name for this sound.
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundName::Bgm(bgm) => bgm.file_name(),
            SoundName::Se(se) => se.file_name(),
        }
    }

    /// Look a sound up by its bundle file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.file_name() == file_name)
    }

    /// Encoding this sound is bundled in.
    pub fn format(&self) -> AssetFormat {
        match self {
            SoundName::Bgm(_) => AssetFormat::Vorbis,
            SoundName::Se(_) => AssetFormat::Wav,
        }
    }
}

impl From<Bgm> for SoundName {
    fn from(bgm: Bgm) -> Self {
        SoundName::Bgm(bgm)
    }
}

impl From<SoundEffect> for SoundName {
    fn from(se: SoundEffect) -> Self {
        SoundName::Se(se)
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Encoding of a bundled asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetFormat {
    /// RIFF/WAVE one-shot sample
    Wav,
    /// Ogg Vorbis music, looped forever once decoded
    Vorbis,
}

impl AssetFormat {
    /// Classify a bundle file by its suffix.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".ogg") {
            Some(AssetFormat::Vorbis)
        } else if file_name.ends_with(".wav") {
            Some(AssetFormat::Wav)
        } else {
            None
        }
    }

    /// Whether playback wraps back to the first sample at end of stream.
    pub fn loops(&self) -> bool {
        matches!(self, AssetFormat::Vorbis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names_are_unique() {
        let names: HashSet<_> = SoundName::ALL.iter().map(|n| n.file_name()).collect();
        assert_eq!(names.len(), SoundName::ALL.len());
    }

    #[test]
    fn test_file_name_lookup() {
        assert_eq!(
            SoundName::from_file_name("jump.wav"),
            Some(SoundName::Se(SoundEffect::Jump))
        );
        assert_eq!(
            SoundName::from_file_name("ino2.ogg"),
            Some(SoundName::Bgm(Bgm::Ino2))
        );
        assert_eq!(SoundName::from_file_name("boss.ogg"), None);
    }

    #[test]
    fn test_format_matches_suffix() {
        for name in SoundName::ALL {
            assert_eq!(AssetFormat::from_file_name(name.file_name()), Some(name.format()));
        }
        assert_eq!(AssetFormat::from_file_name("jump.mp3"), None);
        assert!(AssetFormat::Vorbis.loops());
        assert!(!AssetFormat::Wav.loops());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Bgm::parse("0"), Some(Bgm::Ino1));
        assert_eq!(Bgm::parse("INO2"), Some(Bgm::Ino2));
        assert_eq!(Bgm::parse("ino3"), None);
        assert_eq!(SoundEffect::parse("itemget2"), Some(SoundEffect::ItemGet2));
        assert_eq!(SoundEffect::parse("jump"), Some(SoundEffect::Jump));
        assert_eq!(SoundEffect::parse("jump.wav"), None);
    }
}
