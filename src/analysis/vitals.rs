// VitalsExtractor - interpretable acoustic descriptors
//
// Computes a small set of human-readable descriptors (RMS energy,
// zero-crossing rate, spectral centroid) independent of the classifier's
// feature space. Vitals feed the severity heuristic and clinical display;
// they are never classifier input.

use crate::audio::AudioSignal;
use crate::config::FeatureConfig;
use serde::{Deserialize, Serialize};

use super::features::fft::{frames, FftProcessor};

/// ZCR above this is annotated as a high-frequency distress signal.
/// Advisory only; it does not influence classification.
pub const DISTRESS_ZCR_THRESHOLD: f32 = 0.1;

/// Frame-averaged acoustic vitals of one recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// RMS energy (>= 0)
    pub energy: f32,
    /// Zero-crossing rate, fraction of sign changes in [0, 1]
    pub zero_crossing_rate: f32,
    /// Energy-weighted mean frequency in Hz (>= 0)
    pub spectral_centroid: f32,
}

impl VitalsSnapshot {
    /// Whether the recording reads as a high-frequency/distress signal
    ///
    /// Display-only annotation (ZCR above the empirical threshold).
    pub fn distress_advisory(&self) -> bool {
        self.zero_crossing_rate > DISTRESS_ZCR_THRESHOLD
    }
}

/// VitalsExtractor computes frame-averaged vitals from a decoded signal
///
/// Pure function of the signal; does not depend on any model state.
pub struct VitalsExtractor {
    frame_size: usize,
    hop_size: usize,
}

impl VitalsExtractor {
    /// Create a new vitals extractor using the configured frame geometry
    pub fn new(config: &FeatureConfig) -> Self {
        Self {
            frame_size: config.frame_size,
            hop_size: config.hop_size,
        }
    }

    /// Extract vitals from a decoded signal
    ///
    /// # Arguments
    /// * `signal` - Decoded mono signal
    pub fn extract(&self, signal: &AudioSignal) -> VitalsSnapshot {
        let sliced = frames(&signal.samples, self.frame_size, self.hop_size);
        if sliced.is_empty() {
            return VitalsSnapshot {
                energy: 0.0,
                zero_crossing_rate: 0.0,
                spectral_centroid: 0.0,
            };
        }

        let fft = FftProcessor::new(self.frame_size);
        let freq_bin_width = signal.sample_rate as f32 / self.frame_size as f32;

        let mut energy_sum = 0.0f32;
        let mut zcr_sum = 0.0f32;
        let mut centroid_sum = 0.0f32;

        for frame in &sliced {
            energy_sum += Self::rms(frame);
            zcr_sum += Self::zero_crossing_rate(frame);

            let spectrum = fft.magnitude_spectrum(frame);
            centroid_sum += Self::centroid(&spectrum, freq_bin_width);
        }

        let n = sliced.len() as f32;
        VitalsSnapshot {
            energy: energy_sum / n,
            zero_crossing_rate: zcr_sum / n,
            spectral_centroid: centroid_sum / n,
        }
    }

    /// Root-mean-square amplitude of one frame
    fn rms(frame: &[f32]) -> f32 {
        if frame.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
        (sum_sq / frame.len() as f32).sqrt()
    }

    /// Fraction of adjacent-sample sign changes in one frame
    fn zero_crossing_rate(frame: &[f32]) -> f32 {
        if frame.len() < 2 {
            return 0.0;
        }

        let mut crossings = 0;
        for i in 1..frame.len() {
            if (frame[i] >= 0.0 && frame[i - 1] < 0.0) || (frame[i] < 0.0 && frame[i - 1] >= 0.0) {
                crossings += 1;
            }
        }

        crossings as f32 / (frame.len() - 1) as f32
    }

    /// Energy-weighted mean frequency of one frame's magnitude spectrum
    fn centroid(spectrum: &[f32], freq_bin_width: f32) -> f32 {
        let weighted_sum: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| i as f32 * freq_bin_width * mag)
            .sum();
        let magnitude_sum: f32 = spectrum.iter().sum();

        if magnitude_sum > 1e-10 {
            weighted_sum / magnitude_sum
        } else {
            0.0
        }
    }
}
