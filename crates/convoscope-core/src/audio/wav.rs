//! In-memory WAV encoding and media type detection

use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;

/// Captured audio held in memory
#[derive(Debug, Clone, Default)]
pub struct RecordedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl RecordedAudio {
    /// Duration of the capture in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * self.channels as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode as a complete 16-bit PCM WAV file
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .context("Failed to create WAV writer")?;
            for &sample in &self.samples {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer.write_sample(value).context("Failed to write WAV sample")?;
            }
            writer.finalize().context("Failed to finalize WAV data")?;
        }

        Ok(cursor.into_inner())
    }
}

/// Media type for an audio file path, from its extension
///
/// Returns `None` for extensions the analysis service does not accept.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "wav" | "wave" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        "aiff" | "aif" => "audio/aiff",
        _ => return None,
    };
    Some(mime)
}
