//! Playback through rodio's default output device.

use crate::{AudioEngine, AudioError, Player, SoundAsset, SoundName};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Decoded, ready-to-queue stream.
pub type DecodedSource = Box<dyn Source<Item = i16> + Send>;

/// Engine backed by a rodio output stream.
pub struct RodioEngine {
    /// Output stream (must be kept alive)
    _stream: OutputStream,
    /// Stream handle for creating sinks
    stream_handle: OutputStreamHandle,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
        debug!("Audio backend: rodio");
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl AudioEngine for RodioEngine {
    type Player = RodioPlayer;

    fn create_player(&self, asset: &SoundAsset) -> Result<Self::Player, AudioError> {
        let source = decode(asset)?;
        let sink = paused_sink(&self.stream_handle)?;
        sink.append(source);
        Ok(RodioPlayer {
            asset: asset.clone(),
            stream_handle: self.stream_handle.clone(),
            sink,
        })
    }
}

/// Decode `asset` from its first sample, looping it forever if its format loops.
pub fn decode(asset: &SoundAsset) -> Result<DecodedSource, AudioError> {
    let cursor = Cursor::new(asset.shared_bytes());
    let decoder = match asset.format() {
        crate::AssetFormat::Wav => Decoder::new_wav(cursor),
        crate::AssetFormat::Vorbis => Decoder::new_vorbis(cursor),
    }
    .map_err(|e| AudioError::Decode {
        name: asset.name(),
        reason: e.to_string(),
    })?;
    Ok(with_looping(asset.format().loops(), decoder))
}

fn with_looping<S>(loops: bool, source: S) -> DecodedSource
where
    S: Source<Item = i16> + Send + 'static,
{
    if loops {
        Box::new(source.repeat_infinite())
    } else {
        Box::new(source)
    }
}

fn paused_sink(handle: &OutputStreamHandle) -> Result<Sink, AudioError> {
    let sink = Sink::try_new(handle).map_err(|e| AudioError::Output(e.to_string()))?;
    // Sinks play as soon as a source is appended.
    sink.pause();
    Ok(sink)
}

/// One sink holding one decoded asset.
pub struct RodioPlayer {
    asset: SoundAsset,
    stream_handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioPlayer {
    fn name(&self) -> SoundName {
        self.asset.name()
    }
}

impl Player for RodioPlayer {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        // Swap in a fresh sink: `Sink::clear` waits on the mixer thread and
        // drained one-shot sinks have nothing left to seek in.
        let name = self.name();
        let seek_error = |err: AudioError| AudioError::Seek {
            name,
            reason: err.to_string(),
        };
        let source = decode(&self.asset).map_err(seek_error)?;
        let sink = paused_sink(&self.stream_handle).map_err(seek_error)?;
        sink.set_volume(self.sink.volume());
        sink.append(source);
        if !self.sink.is_paused() {
            sink.play();
        }
        let old = std::mem::replace(&mut self.sink, sink);
        old.stop();
        Ok(())
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.sink.stop();
        Ok(())
    }
}
