//! Name to encoded-bytes lookup for the bundled sounds.

use crate::{AssetFormat, AudioError, SoundName};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Encoded bytes for one sound, tagged with their format.
#[derive(Debug, Clone)]
pub struct SoundAsset {
    name: SoundName,
    format: AssetFormat,
    bytes: Arc<[u8]>,
}

impl SoundAsset {
    /// Logical name of the asset.
    pub fn name(&self) -> SoundName {
        self.name
    }

    /// Encoding of [`Self::bytes`].
    pub fn format(&self) -> AssetFormat {
        self.format
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes, for decoders that need to own their input.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

/// Fixed mapping from sound name to encoded asset.
///
/// Populated once from whatever bundles the game's audio, then handed to
/// [`crate::AudioService::load`].
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: BTreeMap<SoundName, SoundAsset>,
}

impl AssetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a sound in its canonical format.
    pub fn register(&mut self, name: SoundName, bytes: impl Into<Arc<[u8]>>) {
        let bytes = bytes.into();
        debug!(sound = %name, len = bytes.len(), "Registered sound asset");
        self.assets.insert(
            name,
            SoundAsset {
                name,
                format: name.format(),
                bytes,
            },
        );
    }

    /// Register a bundle file by name.
    ///
    /// The suffix must name a known decoder and the full file name must name
    /// a shipped sound.
    pub fn register_file(
        &mut self,
        file_name: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<SoundName, AudioError> {
        if AssetFormat::from_file_name(file_name).is_none() {
            return Err(AudioError::UnsupportedFormat(file_name.to_string()));
        }
        let name = SoundName::from_file_name(file_name)
            .ok_or_else(|| AudioError::UnknownAsset(file_name.to_string()))?;
        self.register(name, bytes);
        Ok(name)
    }

    /// Look up a registered asset.
    pub fn get(&self, name: SoundName) -> Option<&SoundAsset> {
        self.assets.get(&name)
    }

    /// Iterate over registered assets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &SoundAsset> {
        self.assets.values()
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Sounds from [`SoundName::ALL`] that have no bytes yet.
    pub fn missing(&self) -> Vec<SoundName> {
        SoundName::ALL
            .into_iter()
            .filter(|name| !self.assets.contains_key(name))
            .collect()
    }

    /// Whether every shipped sound is registered.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Fail with [`AudioError::MissingAsset`] unless the registry is complete.
    pub fn ensure_complete(&self) -> Result<(), AudioError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AudioError::MissingAsset(missing))
        }
    }
}
