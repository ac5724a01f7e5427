//! Triangular filter weights applied to one spectral bin for one band.

use crate::mel::center_frequency;
use crate::normalizer::magnitude_factor;

/// Reference frequencies (Hz) bracketing a filter band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEdges {
    pub prev: f64,
    pub center: f64,
    pub next: f64,
}

impl BandEdges {
    /// Edges of band `band`.
    ///
    /// Both outer edges sit on the center of band `band + 1`, which leaves the
    /// two ramps below without any bin to cover for every band in `1..=48`.
    ///
    /// # Example
    /// ```
    /// use mfcc_dsp::filter::BandEdges;
    /// let edges = BandEdges::for_band(3);
    /// assert_eq!(edges.prev, edges.next);
    /// ```
    #[must_use]
    pub fn for_band(band: usize) -> Self {
        Self {
            prev: center_frequency(band + 1),
            center: center_frequency(band),
            next: center_frequency(band + 1),
        }
    }

    /// Ramp weight at `freq` Hz, scaled by `magnitude`.
    ///
    /// Rising from `prev` to `center`, falling from `center` to `next`, zero
    /// elsewhere. Coinciding edges divide by zero.
    #[inline]
    #[must_use]
    pub fn weight(&self, freq: f64, magnitude: f64) -> f64 {
        if freq < self.prev {
            0.0
        } else if freq < self.center {
            ((freq - self.prev) / (self.center - self.prev)) * magnitude
        } else if freq < self.next {
            ((freq - self.next) / (self.center - self.next)) * magnitude
        } else {
            0.0
        }
    }
}

/// Frequency (Hz) represented by spectral bin `bin`.
#[inline]
#[must_use]
pub fn bin_frequency(sampling_rate: u32, bin_size: usize, bin: usize) -> f64 {
    (bin as f64 * f64::from(sampling_rate)) / bin_size as f64
}

/// Weight of band `band` on bin `bin` of a `bin_size`-long spectrum.
///
/// # Example
/// ```
/// use mfcc_dsp::filter::filter_response;
/// let w = filter_response(16_000, 32, 4, 10);
/// assert!(w.is_finite());
/// ```
#[inline]
#[must_use]
pub fn filter_response(sampling_rate: u32, bin_size: usize, bin: usize, band: usize) -> f64 {
    let freq = bin_frequency(sampling_rate, bin_size, bin);
    BandEdges::for_band(band).weight(freq, magnitude_factor(band))
}
