//! Directory-backed stand-in for the game's embedded sound bundle.

use anyhow::{Context, Result};
use ino_audio::AssetRegistry;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Register every file in `dir` as a sound asset.
///
/// Any file that is not one of the shipped sounds aborts the load, as does a
/// bundle missing one of them.
pub fn load_registry(dir: &Path) -> Result<AssetRegistry> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read sound bundle {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut registry = AssetRegistry::new();
    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let file_name = file_name
            .to_str()
            .with_context(|| format!("Non UTF-8 file name in {}", dir.display()))?;
        let bytes = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        let name = registry.register_file(file_name, bytes)?;
        debug!(sound = %name, "Bundled sound found");
    }

    registry.ensure_complete()?;
    Ok(registry)
}
