// FFT module - Fast Fourier Transform computation
//
// This module handles FFT computation with proper windowing to reduce
// spectral leakage, plus frame slicing over a full signal. The magnitude
// and power spectra are consumed by the feature extraction functions.

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Arc, Mutex};

/// FFT processor that computes magnitude spectra from audio frames
pub struct FftProcessor {
    fft_planner: Arc<Mutex<FftPlanner<f32>>>,
    fft_size: usize,
    /// Hann window (pre-computed)
    window: Vec<f32>,
}

impl FftProcessor {
    /// Create a new FFT processor
    ///
    /// # Arguments
    /// * `fft_size` - FFT window size (typically 2048 for feature extraction)
    pub fn new(fft_size: usize) -> Self {
        // Pre-compute Hann window to reduce spectral leakage
        let window = (0..fft_size)
            .map(|i| {
                0.5 * (1.0
                    - ((2.0 * std::f32::consts::PI * i as f32) / (fft_size as f32 - 1.0)).cos())
            })
            .collect();

        Self {
            fft_planner: Arc::new(Mutex::new(FftPlanner::new())),
            fft_size,
            window,
        }
    }

    /// FFT window size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Compute magnitude spectrum for one frame
    ///
    /// Applies Hann windowing, performs the FFT, and returns the magnitude
    /// spectrum for positive frequencies only (exploiting the symmetry of a
    /// real-valued FFT). Frames shorter than the FFT size are zero-padded.
    ///
    /// # Arguments
    /// * `frame` - Audio frame (length <= fft_size)
    ///
    /// # Returns
    /// Magnitude spectrum (size = fft_size / 2 + 1)
    pub fn magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = Vec::with_capacity(self.fft_size);

        for (i, &sample) in frame.iter().enumerate() {
            if i < self.fft_size {
                let windowed = sample * self.window[i];
                buffer.push(Complex::new(windowed, 0.0));
            }
        }

        while buffer.len() < self.fft_size {
            buffer.push(Complex::new(0.0, 0.0));
        }

        let fft = {
            let mut planner = match self.fft_planner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            planner.plan_fft_forward(self.fft_size)
        };
        fft.process(&mut buffer);

        buffer[..self.fft_size / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect()
    }

    /// Compute power spectrum for one frame (squared magnitudes)
    pub fn power_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        self.magnitude_spectrum(frame)
            .into_iter()
            .map(|m| m * m)
            .collect()
    }
}

/// Slice a signal into analysis frames
///
/// Frames start every `hop` samples and are `frame_size` samples long.
/// A signal shorter than one frame yields a single truncated frame so that
/// short clips still produce features (the FFT zero-pads it).
///
/// # Arguments
/// * `samples` - Full signal
/// * `frame_size` - Frame length in samples
/// * `hop` - Hop between frame starts in samples
pub fn frames(samples: &[f32], frame_size: usize, hop: usize) -> Vec<&[f32]> {
    if samples.is_empty() || frame_size == 0 || hop == 0 {
        return Vec::new();
    }

    if samples.len() < frame_size {
        return vec![samples];
    }

    let n_frames = (samples.len() - frame_size) / hop + 1;
    (0..n_frames)
        .map(|i| &samples[i * hop..i * hop + frame_size])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_size() {
        let fft = FftProcessor::new(1024);
        let frame = vec![0.5; 1024];
        let spectrum = fft.magnitude_spectrum(&frame);
        assert_eq!(spectrum.len(), 513);
    }

    #[test]
    fn test_sine_peak_bin() {
        let fft_size = 2048;
        let sample_rate = 22050.0;
        let fft = FftProcessor::new(fft_size);

        // 440 Hz sine should peak near bin 440 / (22050 / 2048) ~= 41
        let frame: Vec<f32> = (0..fft_size)
            .map(|i| {
                let t = i as f32 / sample_rate;
                (2.0 * std::f32::consts::PI * 440.0 * t).sin()
            })
            .collect();

        let spectrum = fft.magnitude_spectrum(&frame);
        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap();

        let expected = (440.0 * fft_size as f32 / sample_rate).round() as usize;
        assert!(
            peak_bin.abs_diff(expected) <= 1,
            "peak bin {} not near expected {}",
            peak_bin,
            expected
        );
    }

    #[test]
    fn test_frames_count() {
        let samples = vec![0.0f32; 4096];
        let sliced = frames(&samples, 2048, 512);
        assert_eq!(sliced.len(), (4096 - 2048) / 512 + 1);
        assert_eq!(sliced[0].len(), 2048);
    }

    #[test]
    fn test_frames_short_signal() {
        let samples = vec![0.1f32; 100];
        let sliced = frames(&samples, 2048, 512);
        assert_eq!(sliced.len(), 1);
        assert_eq!(sliced[0].len(), 100);
    }
}
