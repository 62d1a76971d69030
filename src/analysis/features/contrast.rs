// Contrast module - spectral contrast over octave sub-bands
//
// Spectral contrast measures the difference between spectral peaks and
// valleys in each frequency sub-band, capturing tonal versus noisy
// texture. Sub-bands are octave-spaced above a base frequency, with one
// extra band below it, giving n_bands + 1 values per frame.

/// Fraction of bins treated as peak/valley within each band
const QUANTILE: f32 = 0.02;

/// Floor applied before taking logs of band energies
const LOG_FLOOR: f32 = 1e-10;

/// Spectral contrast computation
pub struct ContrastFeatures {
    sample_rate: u32,
    fft_size: usize,
    /// Base frequency of the first octave band (Hz)
    fmin: f32,
    /// Number of octave bands above fmin
    n_bands: usize,
}

impl ContrastFeatures {
    /// Create a new contrast processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT window size the spectra were computed with
    /// * `fmin` - Base frequency for the first octave band (typically 200 Hz)
    /// * `n_bands` - Number of octave bands (typically 6, yielding 7 values)
    pub fn new(sample_rate: u32, fft_size: usize, fmin: f32, n_bands: usize) -> Self {
        Self {
            sample_rate,
            fft_size,
            fmin,
            n_bands,
        }
    }

    /// Number of contrast values produced per frame
    pub fn n_values(&self) -> usize {
        self.n_bands + 1
    }

    /// Compute spectral contrast for one frame
    ///
    /// For each sub-band the peak is the mean of the loudest bins and the
    /// valley the mean of the quietest bins (top/bottom 2%, at least one
    /// bin); contrast is the difference of their logs.
    ///
    /// # Arguments
    /// * `magnitude_spectrum` - Magnitude spectrum of one frame
    ///
    /// # Returns
    /// n_bands + 1 contrast values
    pub fn compute(&self, magnitude_spectrum: &[f32]) -> Vec<f32> {
        let freq_bin_width = self.sample_rate as f32 / self.fft_size as f32;
        let nyquist = self.sample_rate as f32 / 2.0;

        // Band edges: [0, fmin, 2*fmin, 4*fmin, ..., nyquist]
        let mut edges = Vec::with_capacity(self.n_bands + 2);
        edges.push(0.0);
        for i in 0..self.n_bands {
            edges.push(self.fmin * 2.0f32.powi(i as i32));
        }
        edges.push(nyquist);

        let mut contrast = Vec::with_capacity(self.n_bands + 1);
        for band in 0..self.n_bands + 1 {
            let lo = edges[band];
            let hi = edges[band + 1];

            let mut band_mags: Vec<f32> = magnitude_spectrum
                .iter()
                .enumerate()
                .filter(|(i, _)| {
                    let freq = *i as f32 * freq_bin_width;
                    freq >= lo && freq < hi
                })
                .map(|(_, &m)| m)
                .collect();

            if band_mags.is_empty() {
                contrast.push(0.0);
                continue;
            }

            band_mags.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let q = ((band_mags.len() as f32 * QUANTILE).round() as usize).max(1);

            let valley: f32 = band_mags[..q].iter().sum::<f32>() / q as f32;
            let peak: f32 = band_mags[band_mags.len() - q..].iter().sum::<f32>() / q as f32;

            contrast.push((peak.max(LOG_FLOOR)).ln() - (valley.max(LOG_FLOOR)).ln());
        }

        contrast
    }
}
