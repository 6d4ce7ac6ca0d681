//! Audio system for ino.
//!
//! Plays the game's two background music tracks and five sound effects.
//! Decoding and mixing are left to an [`AudioEngine`]; rodio is used when the
//! `rodio_backend` feature is enabled, and [`HeadlessEngine`] otherwise.
//!
//! # Architecture
//!
//! - [`AssetRegistry`] - Encoded bytes for every [`SoundName`]
//! - [`AudioService`] - Player cache, BGM/SE control and the mute flag
//! - [`AudioEngine`] / [`Player`] - Seam to the mixing engine
//!
//! # Example
//!
//! ```ignore
//! let mut audio = AudioService::new(HeadlessEngine::new());
//! audio.load(&registry)?;
//! audio.play_bgm(Bgm::Ino1)?;
//! audio.play_se(SoundEffect::Jump);
//! ```

mod engine;
mod error;
mod registry;
#[cfg(feature = "rodio_backend")]
mod rodio_engine;
mod service;
mod snapshot;
mod sounds;

pub use engine::{AudioEngine, HeadlessEngine, HeadlessPlayer, Player};
pub use error::AudioError;
pub use registry::{AssetRegistry, SoundAsset};
#[cfg(feature = "rodio_backend")]
pub use rodio_engine::{decode, DecodedSource, RodioEngine, RodioPlayer};
pub use service::AudioService;
pub use snapshot::{PlayerSnapshot, ServiceSnapshot};
pub use sounds::{AssetFormat, Bgm, SoundEffect, SoundName};
