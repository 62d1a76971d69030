// Audio module - decoded signal representation and file decoding
//
// Module organization:
// - mod.rs: AudioSignal (decoded PCM + sample rate)
// - decoder: symphonia-based file decoding to AudioSignal

pub mod decoder;

pub use decoder::decode_file;

/// A decoded audio signal
///
/// Mono f32 samples normalized to [-1.0, 1.0] plus the native sample rate.
/// Immutable once decoded; owned by the call that decoded it and dropped
/// after feature and vitals extraction complete.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    /// Mono PCM samples
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal from mono samples
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal contains no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Signal duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Downmix interleaved multi-channel samples to mono by channel averaging
///
/// # Arguments
/// * `interleaved` - Interleaved samples [c0, c1, ..., c0, c1, ...]
/// * `channels` - Number of channels per frame
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
