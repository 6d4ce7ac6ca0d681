//! Synthetic sound assets for tests.

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use ino_audio::{AssetFormat, AssetRegistry, SoundName};
use std::io::Cursor;

/// Sample rate the game mixes at.
pub const SAMPLE_RATE: u32 = 48_000;

/// Encode `millis` of a mono 16-bit square wave as a WAV file.
pub fn square_wave_wav(millis: u32, frequency: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let samples = SAMPLE_RATE as u64 * millis as u64 / 1000;
    let half_period = (SAMPLE_RATE / frequency.max(1) / 2).max(1) as u64;

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for i in 0..samples {
            let high = (i / half_period) % 2 == 0;
            writer.write_sample(if high { 8_000i16 } else { -8_000i16 })?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// A first Ogg page header with no Vorbis packet behind it.
///
/// Enough for the headless engine's container header check; a real decoder rejects it.
pub fn ogg_page_stub() -> Vec<u8> {
    let mut page = Vec::with_capacity(28);
    page.extend_from_slice(b"OggS");
    page.push(0); // stream structure version
    page.push(0x02); // beginning of stream
    page.extend_from_slice(&0u64.to_le_bytes()); // granule position
    page.extend_from_slice(&1u32.to_le_bytes()); // serial number
    page.extend_from_slice(&0u32.to_le_bytes()); // page sequence
    page.extend_from_slice(&0u32.to_le_bytes()); // checksum
    page.push(0); // segment count
    page
}

/// Bytes that pass the headless header check for `name`'s format.
pub fn asset_bytes(name: SoundName) -> Result<Vec<u8>> {
    match name.format() {
        AssetFormat::Wav => square_wave_wav(50, 440),
        AssetFormat::Vorbis => Ok(ogg_page_stub()),
    }
}

/// Registry holding every shipped sound.
pub fn full_registry() -> Result<AssetRegistry> {
    let mut registry = AssetRegistry::new();
    for name in SoundName::ALL {
        registry.register(name, asset_bytes(name)?);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ino_audio::{AudioEngine, HeadlessEngine};

    #[test]
    fn wav_fixture_has_riff_header_and_samples() {
        let bytes = square_wave_wav(10, 440).expect("encode");
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let reader = hound::WavReader::new(Cursor::new(bytes)).expect("decode");
        assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
        assert_eq!(reader.len(), SAMPLE_RATE / 100);
    }

    #[test]
    fn full_registry_passes_headless_header_check() {
        let registry = full_registry().expect("fixtures");
        assert!(registry.is_complete());
        let engine = HeadlessEngine::new();
        for asset in registry.iter() {
            engine.create_player(asset).expect("header check accepts fixture");
        }
    }
}
