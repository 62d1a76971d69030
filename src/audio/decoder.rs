// Decoder - audio file decoding via symphonia
//
// Decodes common consumer formats (wav, mp3, flac, aac, m4a, ogg) into a
// mono AudioSignal. Unsupported containers are rejected with a
// distinguishable DecodeError so batch drivers can skip-and-continue and
// the service boundary can report a structured error.

use crate::audio::{downmix_to_mono, AudioSignal};
use crate::error::DecodeError;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file into a mono signal
///
/// # Arguments
/// * `path` - Path to the audio file
/// * `max_duration_secs` - Optional cap on the decoded duration; decoding
///   stops once this many seconds of audio have been produced
///
/// # Returns
/// * `Ok(AudioSignal)` - Decoded mono signal at the file's native rate
/// * `Err(DecodeError)` - File missing, unsupported, corrupt, or empty
pub fn decode_file(path: &Path, max_duration_secs: Option<f32>) -> Result<AudioSignal, DecodeError> {
    let file = File::open(path).map_err(|_| DecodeError::FileNotFound {
        path: path.to_path_buf(),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the probe with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::UnsupportedFormat {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| DecodeError::NoAudioTrack {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params.sample_rate.unwrap_or(44100);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let max_samples =
        max_duration_secs.map(|secs| (secs.max(0.0) * sample_rate as f32) as usize);

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = 1usize;

    loop {
        if let Some(limit) = max_samples {
            if samples.len() >= limit {
                samples.truncate(limit);
                break;
            }
        }

        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // EOF
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(DecodeError::CorruptStream {
                    details: e.to_string(),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A single malformed packet is tolerated; the stream continues
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping malformed packet in {}: {}", path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(DecodeError::CorruptStream {
                    details: e.to_string(),
                });
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count().max(1);
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = &mut sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(&downmix_to_mono(buf.samples(), channels));
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::EmptySignal {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "Decoded {}: {} samples at {} Hz ({} channel(s))",
        path.display(),
        samples.len(),
        sample_rate,
        channels
    );

    Ok(AudioSignal::new(samples, sample_rate))
}
