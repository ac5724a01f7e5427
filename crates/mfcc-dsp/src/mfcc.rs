//! Mel-Frequency Cepstral Coefficients (MFCC) from a magnitude spectrum.
//!
//! Per band: absolute filter-weighted energy over bins `0..bin_size - 1`,
//! natural log (zero energy stays 0), then a DCT-II over the bands.
//! Accumulation runs in index order so results are bit-reproducible.

use std::f64::consts::PI;

use mfcc_core::config::Params;
use rayon::prelude::*;

use crate::filter::filter_response;

/// Normalization of coefficient `m` for a bank of `num_filters` bands.
///
/// # Example
/// ```
/// use mfcc_dsp::mfcc::normalization_factor;
/// assert_eq!(normalization_factor(48, 0), (1.0f64 / 48.0).sqrt());
/// assert_eq!(normalization_factor(48, 5), (2.0f64 / 48.0).sqrt());
/// ```
#[inline]
#[must_use]
pub fn normalization_factor(num_filters: usize, m: usize) -> f64 {
    if m == 0 {
        (1.0 / num_filters as f64).sqrt()
    } else {
        (2.0 / num_filters as f64).sqrt()
    }
}

/// Compute the `m`-th MFCC of `spectral_data`.
///
/// Returns `0.0` when `m >= num_filters`; use [`checked_coefficient`] to tell
/// that apart from a computed zero. Bins past the end of `spectral_data` are
/// not visited.
///
/// # Example
/// ```
/// use mfcc_dsp::mfcc::compute_coefficient;
/// let spectrum = vec![1.0; 32];
/// assert_eq!(compute_coefficient(&spectrum, 16_000, 48, 32, 48), 0.0);
/// ```
#[must_use]
pub fn compute_coefficient(
    spectral_data: &[f64],
    sampling_rate: u32,
    num_filters: usize,
    bin_size: usize,
    m: usize,
) -> f64 {
    if m >= num_filters {
        return 0.0;
    }
    let params = Params::new(sampling_rate, num_filters, bin_size);
    let log_energies = log_energies(spectral_data, params, filter_weight(params));
    cepstrum(&log_energies, num_filters, m)
}

/// [`compute_coefficient`] with parameters bundled in [`Params`].
#[must_use]
pub fn coefficient(spectrum: &[f64], params: Params, m: usize) -> f64 {
    compute_coefficient(
        spectrum,
        params.sampling_rate,
        params.num_filters,
        params.bin_size,
        m,
    )
}

/// Compute coefficient `m`, rejecting inputs that would hit the sentinel or
/// read past the frame.
///
/// # Errors
/// Returns an error if `m >= num_filters` or if the frame holds fewer than
/// `bin_size - 1` magnitudes.
pub fn checked_coefficient(spectrum: &[f64], params: Params, m: usize) -> anyhow::Result<f64> {
    if m >= params.num_filters {
        anyhow::bail!(
            "coefficient index {m} out of range: the bank has {} filters",
            params.num_filters
        );
    }
    let visited = params.bin_size.saturating_sub(1);
    if spectrum.len() < visited {
        anyhow::bail!(
            "frame has {} magnitudes but bin_size {} needs at least {visited}",
            spectrum.len(),
            params.bin_size
        );
    }
    Ok(coefficient(spectrum, params, m))
}

/// Filter-bank energies of bands `1..=num_filters`, before log compression.
#[must_use]
pub fn filter_bank_energies(spectrum: &[f64], params: Params) -> Vec<f64> {
    energies(spectrum, params, filter_weight(params))
}

/// First `count` coefficients (at most `num_filters`), computed in order.
///
/// Bit-identical to calling [`compute_coefficient`] for each `m`.
#[must_use]
pub fn coefficients(spectrum: &[f64], params: Params, count: usize) -> Vec<f64> {
    let count = count.min(params.num_filters);
    log::debug!(
        "Computing {count} coefficients over {} bands (sequential)",
        params.num_filters
    );
    let log_energies = log_energies(spectrum, params, filter_weight(params));
    cepstra(&log_energies, params.num_filters, count)
}

/// Same as [`coefficients`], one rayon task per band and per coefficient.
#[must_use]
pub fn par_coefficients(spectrum: &[f64], params: Params, count: usize) -> Vec<f64> {
    let count = count.min(params.num_filters);
    log::debug!(
        "Computing {count} coefficients over {} bands (parallel)",
        params.num_filters
    );
    let log_energies = par_log_energies(spectrum, params, filter_weight(params));
    par_cepstra(&log_energies, params.num_filters, count)
}

/// Weight of `(bin, band)` in the mel filter bank described by `params`.
fn filter_weight(params: Params) -> impl Fn(usize, usize) -> f64 + Sync {
    move |bin, band| filter_response(params.sampling_rate, params.bin_size, bin, band)
}

fn energies(spectrum: &[f64], params: Params, weight: impl Fn(usize, usize) -> f64) -> Vec<f64> {
    (1..=params.num_filters)
        .map(|band| band_energy(spectrum, params.bin_size, |bin| weight(bin, band)))
        .collect()
}

fn log_energies(
    spectrum: &[f64],
    params: Params,
    weight: impl Fn(usize, usize) -> f64,
) -> Vec<f64> {
    energies(spectrum, params, weight)
        .into_iter()
        .map(log_compress)
        .collect()
}

fn par_log_energies(
    spectrum: &[f64],
    params: Params,
    weight: impl Fn(usize, usize) -> f64 + Sync,
) -> Vec<f64> {
    (1..=params.num_filters)
        .into_par_iter()
        .map(|band| {
            let energy = band_energy(spectrum, params.bin_size, |bin| weight(bin, band));
            log_compress(energy)
        })
        .collect()
}

/// Sum of `|magnitude * weight(bin)|` over bins `0..bin_size - 1`.
#[inline]
fn band_energy(spectrum: &[f64], bin_size: usize, weight: impl Fn(usize) -> f64) -> f64 {
    spectrum
        .iter()
        .take(bin_size.saturating_sub(1))
        .enumerate()
        .fold(0.0, |acc, (bin, &magnitude)| {
            acc + (magnitude * weight(bin)).abs()
        })
}

#[inline]
fn log_compress(energy: f64) -> f64 {
    if energy > 0.0 { energy.ln() } else { energy }
}

#[inline]
fn cosine_basis(num_filters: usize, m: usize, band: usize) -> f64 {
    (((m as f64 * PI) / num_filters as f64) * (band as f64 - 0.5)).cos()
}

/// DCT-II of the log energies of bands `1..=num_filters`.
///
/// The only place coefficients are summed; every entry point goes through here.
fn cepstrum(log_energies: &[f64], num_filters: usize, m: usize) -> f64 {
    let outer_sum = log_energies
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, &e)| acc + e * cosine_basis(num_filters, m, i + 1));
    normalization_factor(num_filters, m) * outer_sum
}

fn cepstra(log_energies: &[f64], num_filters: usize, count: usize) -> Vec<f64> {
    (0..count.min(num_filters))
        .map(|m| cepstrum(log_energies, num_filters, m))
        .collect()
}

fn par_cepstra(log_energies: &[f64], num_filters: usize, count: usize) -> Vec<f64> {
    (0..count.min(num_filters))
        .into_par_iter()
        .map(|m| cepstrum(log_energies, num_filters, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILTER_COUNTS: [usize; 4] = [1, 16, 48, 256];

    fn fixture() -> (Vec<f64>, Params) {
        (vec![1.0; 32], Params::new(16_000, 48, 32))
    }

    #[test]
    fn normalization_for_energy_and_higher_coefficients() {
        for n in FILTER_COUNTS {
            assert_eq!(normalization_factor(n, 0), (1.0 / n as f64).sqrt());
            for m in [1, 7, n.saturating_sub(1).max(1)] {
                assert_eq!(normalization_factor(n, m), (2.0 / n as f64).sqrt());
            }
        }
    }

    #[test]
    fn out_of_range_index_returns_sentinel() {
        let spectrum: Vec<f64> = (0..64u32).map(|i| f64::from(i) * 0.25).collect();
        let zero = 0.0f64.to_bits();
        for n in FILTER_COUNTS {
            assert_eq!(compute_coefficient(&spectrum, 44_100, n, 64, n).to_bits(), zero);
            assert_eq!(compute_coefficient(&spectrum, 44_100, n, 64, n + 5).to_bits(), zero);
        }
        assert_eq!(compute_coefficient(&spectrum, 44_100, 0, 64, 0), 0.0);
    }

    #[test]
    fn silent_frame_gives_zero_everywhere() {
        let spectrum = vec![0.0; 512];
        let params = Params::new(44_100, 48, 512);
        for m in 0..48 {
            assert_eq!(coefficient(&spectrum, params, m), 0.0, "m = {m}");
        }
        assert!(filter_bank_energies(&spectrum, params).iter().all(|&e| e == 0.0));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let spectrum: Vec<f64> = (0..256u32)
            .map(|i| (f64::from(i) * 0.1).sin().abs())
            .collect();
        let params = Params::new(22_050, 48, 256);
        for m in [0, 1, 12, 47] {
            let a = coefficient(&spectrum, params, m);
            let b = coefficient(&spectrum, params, m);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn end_to_end_regression_fixture() {
        let (spectrum, params) = fixture();
        let energies = filter_bank_energies(&spectrum, params);
        assert_eq!(energies.len(), 48);

        let summed: f64 = energies.iter().map(|&e| log_compress(e)).sum();
        let expected = (1.0f64 / 48.0).sqrt() * summed;
        let got = compute_coefficient(&spectrum, 16_000, 48, 32, 0);
        assert_eq!(got, expected);

        // Reference run: every band's outer edges coincide, so no bin carries weight.
        assert_eq!(got, 0.0);
    }

    #[test]
    fn band_energy_skips_last_bin() {
        let spectrum = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(band_energy(&spectrum, 4, |_| 1.0), 6.0);
        assert_eq!(band_energy(&spectrum, 4, |_| -1.0), 6.0);
        assert_eq!(band_energy(&spectrum, 1, |_| 1.0), 0.0);
        assert_eq!(band_energy(&spectrum, 0, |_| 1.0), 0.0);
    }

    #[test]
    fn band_energy_stops_at_frame_end() {
        let spectrum = [1.0, 2.0];
        assert_eq!(band_energy(&spectrum, 8, |_| 0.5), 1.5);
    }

    #[test]
    fn log_compression_clamps_zero() {
        assert_eq!(log_compress(0.0), 0.0);
        assert_eq!(log_compress(1.0), 0.0);
        assert!((log_compress(std::f64::consts::E) - 1.0).abs() < 1e-15);
        assert!(log_compress(0.5) < 0.0);
    }

    #[test]
    fn cepstrum_of_flat_log_spectrum() {
        let n = 48;
        let log_energies = vec![2.0; n];
        let c0 = cepstrum(&log_energies, n, 0);
        assert!((c0 - 2.0 * (n as f64).sqrt()).abs() < 1e-9);
        for m in 1..n {
            assert!(cepstrum(&log_energies, n, m).abs() < 1e-9, "m = {m}");
        }
    }

    #[test]
    fn cepstrum_of_single_band_impulse() {
        let n = 16;
        let mut log_energies = vec![0.0; n];
        log_energies[0] = 1.0;
        for m in 1..n {
            let expected = (2.0 / n as f64).sqrt() * (m as f64 * PI / (2.0 * n as f64)).cos();
            assert!((cepstrum(&log_energies, n, m) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn batch_matches_single_calls() {
        let spectrum: Vec<f64> = (0..1024u32).map(|i| 1.0 / (1.0 + f64::from(i))).collect();
        let params = Params::new(44_100, 48, 1024);
        let seq = coefficients(&spectrum, params, 48);
        let par = par_coefficients(&spectrum, params, 48);
        assert_eq!(seq.len(), 48);
        for (m, (s, p)) in seq.iter().zip(&par).enumerate() {
            let single = coefficient(&spectrum, params, m);
            assert_eq!(s.to_bits(), single.to_bits(), "m = {m}");
            assert_eq!(p.to_bits(), single.to_bits(), "m = {m}");
        }
    }

    /// Ramp weights that light up every band, unlike the collapsed mel edges.
    fn dense_weight(bin: usize, band: usize) -> f64 {
        0.001 + ((bin * 7 + band * 3) % 11) as f64 * 0.013
    }

    #[test]
    fn sequential_and_parallel_paths_agree_on_live_energies() {
        let spectrum: Vec<f64> = (0..512u32)
            .map(|i| 0.5 + (f64::from(i) * 0.37).sin().abs() * 40.0)
            .collect();
        let params = Params::new(44_100, 48, 512);

        let seq_log = log_energies(&spectrum, params, dense_weight);
        let par_log = par_log_energies(&spectrum, params, dense_weight);
        assert_eq!(seq_log.len(), 48);
        assert!(seq_log.iter().all(|&e| e != 0.0), "every band must carry energy");
        for (band, (s, p)) in seq_log.iter().zip(&par_log).enumerate() {
            assert_eq!(s.to_bits(), p.to_bits(), "band {}", band + 1);
        }

        let seq = cepstra(&seq_log, 48, 48);
        let par = par_cepstra(&par_log, 48, 48);
        assert!(seq.iter().any(|&c| c != 0.0));
        for (m, (s, p)) in seq.iter().zip(&par).enumerate() {
            assert_eq!(s.to_bits(), p.to_bits(), "m = {m}");
            assert_eq!(s.to_bits(), cepstrum(&seq_log, 48, m).to_bits(), "m = {m}");
        }
    }

    #[test]
    fn cepstrum_sums_bands_in_index_order() {
        let log_energies: Vec<f64> = (1..=48u32).map(|l| (f64::from(l) * 1.7).ln()).collect();
        for m in [0, 1, 5, 31, 47] {
            let mut outer_sum = 0.0;
            for (i, &e) in log_energies.iter().enumerate() {
                outer_sum += e * cosine_basis(48, m, i + 1);
            }
            let expected = normalization_factor(48, m) * outer_sum;
            assert_eq!(cepstrum(&log_energies, 48, m).to_bits(), expected.to_bits(), "m = {m}");
        }
    }

    #[test]
    fn batch_count_is_clamped_to_bank() {
        let (spectrum, params) = fixture();
        assert_eq!(coefficients(&spectrum, params, 100).len(), 48);
        assert_eq!(par_coefficients(&spectrum, params, 13).len(), 13);
        assert!(coefficients(&spectrum, params, 0).is_empty());
    }

    #[test]
    fn checked_rejects_misuse() {
        let (spectrum, params) = fixture();
        assert!(checked_coefficient(&spectrum, params, 48).is_err());
        assert!(checked_coefficient(&spectrum[..10], params, 0).is_err());
        let value = checked_coefficient(&spectrum, params, 3).unwrap();
        assert_eq!(value, coefficient(&spectrum, params, 3));
        // Le dernier bin n'est jamais lu : une trame de bin_size - 1 suffit.
        assert!(checked_coefficient(&spectrum[..31], params, 0).is_ok());
    }
}
