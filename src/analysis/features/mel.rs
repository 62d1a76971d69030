// Mel module - mel filterbank and cepstral coefficients
//
// Converts per-frame power spectra into log-mel energies and applies an
// orthonormal DCT-II to obtain Mel-frequency cepstral coefficients, the
// spectral-envelope descriptors the cry classifier was trained on.
//
// References:
// - Stevens, Volkmann, & Newman (1937), the mel scale
// - Slaney, M. (1998). Auditory Toolbox. Technical Report #1998-010.

/// Floor applied before taking logs of mel energies
const LOG_FLOOR: f32 = 1e-10;

/// Triangular mel filterbank with Slaney area normalization
pub struct MelFilterbank {
    /// Filter matrix, n_mels x n_freqs in row-major order
    filters: Vec<f32>,
    n_mels: usize,
    n_freqs: usize,
}

impl MelFilterbank {
    /// Build a filterbank for the given spectrum geometry
    ///
    /// # Arguments
    /// * `n_mels` - Number of mel channels
    /// * `fft_size` - FFT size the power spectra were computed with
    /// * `sample_rate` - Sample rate in Hz
    /// * `fmin` - Lowest filter edge frequency in Hz
    /// * `fmax` - Highest filter edge frequency in Hz (typically Nyquist)
    pub fn new(n_mels: usize, fft_size: usize, sample_rate: u32, fmin: f32, fmax: f32) -> Self {
        let n_freqs = fft_size / 2 + 1;
        let mut filters = vec![0.0f32; n_mels * n_freqs];

        let mel_min = hz_to_mel(fmin);
        let mel_max = hz_to_mel(fmax);

        // n_mels + 2 points evenly spaced on the mel scale
        let hz_points: Vec<f32> = (0..=n_mels + 1)
            .map(|i| mel_min + (mel_max - mel_min) * i as f32 / (n_mels + 1) as f32)
            .map(mel_to_hz)
            .collect();

        let bin_points: Vec<usize> = hz_points
            .iter()
            .map(|&f| ((fft_size as f32 + 1.0) * f / sample_rate as f32).floor() as usize)
            .collect();

        for m in 0..n_mels {
            let f_m_minus = bin_points[m];
            let f_m = bin_points[m + 1];
            let f_m_plus = bin_points[m + 2];

            // Slaney normalization: each triangle has unit area
            let bandwidth = hz_points[m + 2] - hz_points[m];
            let norm = if bandwidth > 0.0 { 2.0 / bandwidth } else { 0.0 };

            for k in f_m_minus..f_m {
                if k < n_freqs && f_m > f_m_minus {
                    let slope = (k - f_m_minus) as f32 / (f_m - f_m_minus) as f32;
                    filters[m * n_freqs + k] = slope * norm;
                }
            }
            for k in f_m..f_m_plus {
                if k < n_freqs && f_m_plus > f_m {
                    let slope = (f_m_plus - k) as f32 / (f_m_plus - f_m) as f32;
                    filters[m * n_freqs + k] = slope * norm;
                }
            }
        }

        Self {
            filters,
            n_mels,
            n_freqs,
        }
    }

    /// Number of mel channels
    pub fn n_mels(&self) -> usize {
        self.n_mels
    }

    /// Apply the filterbank to a power spectrum and take log energies (dB)
    ///
    /// # Arguments
    /// * `power_spectrum` - Power spectrum of one frame (n_freqs values)
    ///
    /// # Returns
    /// Log-mel energies, n_mels values
    pub fn log_mel_energies(&self, power_spectrum: &[f32]) -> Vec<f32> {
        let n = power_spectrum.len().min(self.n_freqs);
        (0..self.n_mels)
            .map(|m| {
                let energy: f32 = (0..n)
                    .map(|k| self.filters[m * self.n_freqs + k] * power_spectrum[k])
                    .sum();
                10.0 * energy.max(LOG_FLOOR).log10()
            })
            .collect()
    }
}

/// Convert frequency in Hz to mel scale
///
/// mel = 2595 * log10(1 + f/700)
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel scale to frequency in Hz
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Orthonormal DCT-II over the mel axis
///
/// c[k] = s_k * sum_n x[n] * cos(pi * k * (2n + 1) / (2N)) with
/// s_0 = sqrt(1/N) and s_k = sqrt(2/N) otherwise. Returns the first
/// `n_coeffs` coefficients.
pub fn dct_ii(input: &[f32], n_coeffs: usize) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; n_coeffs];
    }

    let scale0 = (1.0 / n as f32).sqrt();
    let scale = (2.0 / n as f32).sqrt();

    (0..n_coeffs)
        .map(|k| {
            let sum: f32 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    x * (std::f32::consts::PI * k as f32 * (2.0 * i as f32 + 1.0)
                        / (2.0 * n as f32))
                        .cos()
                })
                .sum();
            if k == 0 {
                scale0 * sum
            } else {
                scale * sum
            }
        })
        .collect()
}
