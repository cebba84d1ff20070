//! Two-band spectral energy split via direct bin summation.
//!
//! Computes squared DFT magnitudes for a low band and a high band directly
//! instead of running a full transform. The blocks this detector sees are a
//! few hundred samples, and the estimator only runs on blocks that already
//! passed the time-domain gates, so the O(bins × samples) double loop stays
//! well inside the per-block time budget.

use std::f64::consts::TAU;

/// Fraction of spectral energy above the band split point, in [0, 1].
///
/// Treats the block as `n/2 + 1` usable bins (real-input symmetry) with the
/// split at `max(2, n_bins/4)`. Returns 0.0 for blocks too short to have a
/// meaningful split (four or fewer bins) and for blocks with no spectral
/// energy at all; such blocks can never pass the spectral gate.
pub fn hf_ratio(block: &[f32]) -> f32 {
    let n_bins = block.len() / 2 + 1;
    if n_bins <= 4 {
        return 0.0;
    }
    let split = (n_bins / 4).max(2);

    let low = band_energy(block, 0, split);
    let high = band_energy(block, split, n_bins);

    let total = low + high;
    if total <= 0.0 {
        return 0.0;
    }
    (high / total) as f32
}

/// Sum of squared DFT magnitudes for bins `[first, last)`.
fn band_energy(block: &[f32], first: usize, last: usize) -> f64 {
    let step = TAU / block.len() as f64;
    let mut energy = 0.0;
    for k in first..last {
        let w = step * k as f64;
        let mut re = 0.0;
        let mut im = 0.0;
        for (i, &s) in block.iter().enumerate() {
            let angle = w * i as f64;
            re += s as f64 * angle.cos();
            im -= s as f64 * angle.sin();
        }
        energy += re * re + im * im;
    }
    energy
}
