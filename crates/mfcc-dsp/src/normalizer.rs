use mfcc_core::config::USABLE_BANDS;

use crate::mel::{LINEAR_BANDS, center_frequency};

/// First band of the logarithmic region.
pub const FIRST_LOG_BAND: usize = LINEAR_BANDS + 1;

const LINEAR_MAGNITUDE: f64 = 0.015;

/// Band-dependent magnitude factor.
///
/// Constant across the linear region, inverse half-bandwidth in the log
/// region, zero outside `1..=48`.
///
/// # Example
/// ```
/// use mfcc_dsp::normalizer::magnitude_factor;
/// assert_eq!(magnitude_factor(1), 0.015);
/// assert_eq!(magnitude_factor(49), 0.0);
/// ```
#[inline]
#[must_use]
pub fn magnitude_factor(band: usize) -> f64 {
    match band {
        1..=LINEAR_BANDS => LINEAR_MAGNITUDE,
        FIRST_LOG_BAND..=USABLE_BANDS => {
            2.0 / (center_frequency(band + 1) - center_frequency(band - 1))
        }
        _ => 0.0,
    }
}
