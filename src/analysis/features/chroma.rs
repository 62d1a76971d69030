// Chroma module - pitch-class energy distribution
//
// Folds the power spectrum into 12 pitch classes (octave-independent).
// Each frame is normalized by its maximum so the profile describes the
// distribution of energy over pitch classes rather than loudness.

/// Number of pitch classes
pub const N_CHROMA: usize = 12;

/// Chroma feature computation
pub struct ChromaFeatures {
    sample_rate: u32,
    fft_size: usize,
}

impl ChromaFeatures {
    /// Create a new chroma processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT window size the spectra were computed with
    pub fn new(sample_rate: u32, fft_size: usize) -> Self {
        Self {
            sample_rate,
            fft_size,
        }
    }

    /// Compute the 12-bin chroma profile for one frame
    ///
    /// Each positive-frequency bin is assigned to the pitch class of its
    /// nearest semitone (A440 reference) and its power accumulated there.
    /// The profile is max-normalized per frame; a silent frame yields all
    /// zeros.
    ///
    /// # Arguments
    /// * `power_spectrum` - Power spectrum of one frame
    ///
    /// # Returns
    /// 12 chroma values in [0, 1]
    pub fn compute(&self, power_spectrum: &[f32]) -> [f32; N_CHROMA] {
        let freq_bin_width = self.sample_rate as f32 / self.fft_size as f32;
        let mut chroma = [0.0f32; N_CHROMA];

        // Skip the DC bin; it has no pitch class
        for (i, &power) in power_spectrum.iter().enumerate().skip(1) {
            let freq = i as f32 * freq_bin_width;
            if freq < 20.0 {
                continue;
            }
            let midi = 69.0 + 12.0 * (freq / 440.0).log2();
            let pitch_class = (midi.round() as i64).rem_euclid(12) as usize;
            chroma[pitch_class] += power;
        }

        let max = chroma.iter().cloned().fold(0.0f32, f32::max);
        if max > 1e-10 {
            for value in chroma.iter_mut() {
                *value /= max;
            }
        }

        chroma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::fft::FftProcessor;

    #[test]
    fn test_pure_tone_concentrates_in_one_class() {
        let sample_rate = 22050;
        let fft_size = 2048;
        let fft = FftProcessor::new(fft_size);
        let chroma = ChromaFeatures::new(sample_rate, fft_size);

        // A440 sits in pitch class 9 (A)
        let frame: Vec<f32> = (0..fft_size)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * 440.0 * t).sin()
            })
            .collect();

        let profile = chroma.compute(&fft.power_spectrum(&frame));
        let peak_class = profile
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(peak_class, 9, "440 Hz should peak in pitch class A");
        assert!((profile[9] - 1.0).abs() < 1e-6, "peak class is max-normalized");
    }

    #[test]
    fn test_silence_yields_zeros() {
        let chroma = ChromaFeatures::new(22050, 2048);
        let profile = chroma.compute(&vec![0.0f32; 1025]);
        assert!(profile.iter().all(|&v| v == 0.0));
    }
}
