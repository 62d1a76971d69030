// FeatureExtractor - classifier feature extraction for cry recordings
//
// This module turns a decoded audio signal into the fixed-length feature
// vector consumed by the cry-cause classifier. Features are means over
// analysis frames of:
//
// 1. MFCC: Mel-frequency cepstral coefficients (spectral envelope)
// 2. Chroma: 12-bin pitch-class energy distribution (Full contract only)
// 3. Spectral contrast: peak/valley difference per octave band (Full only)
//
// Module organization:
// - types: Data structures (FeatureVector, FeatureContract)
// - fft: FFT computation with windowing and framing
// - mel: mel filterbank and DCT-II cepstral coefficients
// - chroma: pitch-class energy profile
// - contrast: octave-band spectral contrast
// - mod.rs: Coordinator (FeatureExtractor)
//
// The extractor is deterministic: for a fixed signal and sample rate,
// repeated extraction reproduces the same vector to floating-point
// tolerance. The batch dataset builder and the inference path share one
// extractor configuration so their vectors always agree in width.

pub mod chroma;
pub mod contrast;
pub mod fft;
pub mod mel;
mod types;

pub use chroma::N_CHROMA;
pub use types::{FeatureContract, FeatureVector};

use crate::audio::AudioSignal;
use crate::config::FeatureConfig;
use chroma::ChromaFeatures;
use contrast::ContrastFeatures;
use fft::{frames, FftProcessor};
use mel::{dct_ii, MelFilterbank};

/// FeatureExtractor coordinates the classifier feature pipeline
///
/// Built for one sample rate; the service constructs it per decoded
/// signal so files at different native rates extract correctly.
pub struct FeatureExtractor {
    contract: FeatureContract,
    frame_size: usize,
    hop_size: usize,
    n_mfcc: usize,
    fft: FftProcessor,
    mel: MelFilterbank,
    chroma: ChromaFeatures,
    contrast: ContrastFeatures,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `config` - Feature geometry and contract
    pub fn new(sample_rate: u32, config: &FeatureConfig) -> Self {
        let nyquist = sample_rate as f32 / 2.0;

        Self {
            contract: config.contract,
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            n_mfcc: config.n_mfcc,
            fft: FftProcessor::new(config.frame_size),
            mel: MelFilterbank::new(
                config.n_mels.max(config.n_mfcc),
                config.frame_size,
                sample_rate,
                0.0,
                nyquist,
            ),
            chroma: ChromaFeatures::new(sample_rate, config.frame_size),
            contrast: ContrastFeatures::new(
                sample_rate,
                config.frame_size,
                config.contrast_fmin,
                config.contrast_bands,
            ),
        }
    }

    /// Width of the vectors this extractor produces
    pub fn vector_width(&self) -> usize {
        match self.contract {
            FeatureContract::MfccOnly => self.n_mfcc,
            FeatureContract::Full => self.n_mfcc + N_CHROMA + self.contrast.n_values(),
        }
    }

    /// Extract the feature vector from a decoded signal
    ///
    /// Computes per-frame features over the whole signal and averages them
    /// over time, concatenating blocks in contract order (MFCC, chroma,
    /// contrast).
    ///
    /// # Arguments
    /// * `signal` - Decoded mono signal
    pub fn extract(&self, signal: &AudioSignal) -> FeatureVector {
        let sliced = frames(&signal.samples, self.frame_size, self.hop_size);
        let n_frames = sliced.len().max(1);

        let mut mfcc_sum = vec![0.0f32; self.n_mfcc];
        let mut chroma_sum = [0.0f32; N_CHROMA];
        let mut contrast_sum = vec![0.0f32; self.contrast.n_values()];

        for frame in &sliced {
            let power = self.fft.power_spectrum(frame);

            let log_mel = self.mel.log_mel_energies(&power);
            for (acc, c) in mfcc_sum.iter_mut().zip(dct_ii(&log_mel, self.n_mfcc)) {
                *acc += c;
            }

            if self.contract == FeatureContract::Full {
                for (acc, c) in chroma_sum.iter_mut().zip(self.chroma.compute(&power)) {
                    *acc += c;
                }
                let magnitude: Vec<f32> = power.iter().map(|p| p.sqrt()).collect();
                for (acc, c) in contrast_sum.iter_mut().zip(self.contrast.compute(&magnitude)) {
                    *acc += c;
                }
            }
        }

        let mut values = Vec::with_capacity(self.vector_width());
        values.extend(mfcc_sum.iter().map(|s| s / n_frames as f32));
        if self.contract == FeatureContract::Full {
            values.extend(chroma_sum.iter().map(|s| s / n_frames as f32));
            values.extend(contrast_sum.iter().map(|s| s / n_frames as f32));
        }

        FeatureVector {
            values,
            contract: self.contract,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate pure sine wave for testing
    fn generate_sine_wave(sample_rate: u32, frequency: f32, duration_samples: usize) -> Vec<f32> {
        (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    /// Generate white noise for testing
    fn generate_white_noise(duration_samples: usize) -> Vec<f32> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        (0..duration_samples)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect()
    }

    fn default_extractor(contract: FeatureContract, sample_rate: u32) -> FeatureExtractor {
        let config = FeatureConfig {
            contract,
            ..FeatureConfig::default()
        };
        FeatureExtractor::new(sample_rate, &config)
    }

    #[test]
    fn test_mfcc_only_width() {
        let extractor = default_extractor(FeatureContract::MfccOnly, 22050);
        let signal = AudioSignal::new(generate_sine_wave(22050, 440.0, 22050), 22050);
        let vector = extractor.extract(&signal);
        assert_eq!(vector.width(), 40);
        assert_eq!(vector.contract, FeatureContract::MfccOnly);
    }

    #[test]
    fn test_full_contract_width() {
        let extractor = default_extractor(FeatureContract::Full, 22050);
        let signal = AudioSignal::new(generate_sine_wave(22050, 440.0, 22050), 22050);
        let vector = extractor.extract(&signal);
        assert_eq!(vector.width(), 40 + 12 + 7);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = default_extractor(FeatureContract::Full, 22050);
        let signal = AudioSignal::new(generate_white_noise(22050), 22050);

        let first = extractor.extract(&signal);
        let second = extractor.extract(&signal);

        for (a, b) in first.values.iter().zip(second.values.iter()) {
            assert!(
                (a - b).abs() < 1e-6,
                "repeated extraction diverged: {} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_distinct_signals_produce_distinct_vectors() {
        let extractor = default_extractor(FeatureContract::MfccOnly, 22050);
        let tone = AudioSignal::new(generate_sine_wave(22050, 440.0, 22050), 22050);
        let noise = AudioSignal::new(generate_white_noise(22050), 22050);

        let tone_vec = extractor.extract(&tone);
        let noise_vec = extractor.extract(&noise);

        let distance: f32 = tone_vec
            .values
            .iter()
            .zip(noise_vec.values.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(distance > 1.0, "tone and noise vectors too close: {}", distance);
    }

    #[test]
    fn test_short_signal_still_extracts() {
        let extractor = default_extractor(FeatureContract::MfccOnly, 22050);
        // Shorter than one analysis frame
        let signal = AudioSignal::new(generate_sine_wave(22050, 440.0, 512), 22050);
        let vector = extractor.extract(&signal);
        assert_eq!(vector.width(), 40);
        assert!(vector.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_silence_extracts_finite_values() {
        let extractor = default_extractor(FeatureContract::Full, 22050);
        let signal = AudioSignal::new(vec![0.0; 22050], 22050);
        let vector = extractor.extract(&signal);
        assert!(vector.values.iter().all(|v| v.is_finite()));
    }
}
