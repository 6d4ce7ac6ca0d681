use crate::SoundName;
use thiserror::Error;

/// Errors raised while loading, driving or releasing players.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Asset bytes could not be decoded into a playable stream.
    #[error("failed to decode {name}: {reason}")]
    Decode {
        /// Sound whose bytes were rejected.
        name: SoundName,
        /// Decoder message.
        reason: String,
    },
    /// Rewinding a player to its first sample failed.
    #[error("failed to rewind {name}: {reason}")]
    Seek {
        /// Sound being rewound.
        name: SoundName,
        /// Engine message.
        reason: String,
    },
    /// Releasing a player's engine resources failed.
    #[error("failed to close {name}: {reason}")]
    Close {
        /// Sound being released.
        name: SoundName,
        /// Engine message.
        reason: String,
    },
    /// A bundle file carries a suffix with no decoder. This is a packaging
    /// mistake, not bad runtime input.
    #[error("unsupported audio file {0}: expected a .wav or .ogg suffix")]
    UnsupportedFormat(String),
    /// A bundle file does not name any known sound.
    #[error("unknown sound asset {0}")]
    UnknownAsset(String),
    /// The registry lacks bytes for one or more sounds.
    #[error("sound bundle is missing {}", .0.iter().map(|n| n.file_name()).collect::<Vec<_>>().join(", "))]
    MissingAsset(Vec<SoundName>),
    /// The audio output device could not be opened.
    #[error("failed to open audio output: {0}")]
    Output(String),
}
