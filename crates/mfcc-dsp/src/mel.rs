//! Mel-scale center frequencies of the 48-band filter bank.
//!
//! Linear spacing of 200/3 Hz up to band 14, then a geometric progression
//! (ratio 1.0711703) starting at 1073.4 Hz.

/// Last band of the linear region.
pub const LINEAR_BANDS: usize = 14;

const LINEAR_NUMERATOR_HZ: f64 = 200.0;
const LINEAR_DENOMINATOR: f64 = 3.0;
const LOG_BASE_HZ: f64 = 1073.4;
const LOG_RATIO: f64 = 1.0711703;

/// Center frequency (Hz) of filter band `band`.
///
/// Band 0 is the mel origin and maps to 0 Hz. Neighbouring bands
/// (`num_filters + 1`) are valid inputs.
///
/// # Example
/// ```
/// use mfcc_dsp::mel::center_frequency;
/// assert_eq!(center_frequency(0), 0.0);
/// assert_eq!(center_frequency(3), 200.0);
/// ```
#[inline]
#[must_use]
pub fn center_frequency(band: usize) -> f64 {
    match band {
        0 => 0.0,
        1..=LINEAR_BANDS => (LINEAR_NUMERATOR_HZ * band as f64) / LINEAR_DENOMINATOR,
        _ => {
            let exponent = (band - LINEAR_BANDS) as f64;
            LOG_RATIO.powf(exponent) * LOG_BASE_HZ
        }
    }
}
