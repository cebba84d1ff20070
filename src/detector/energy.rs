//! Scaled RMS energy estimation.
//!
//! Root-mean-square amplitude scaled by 100 so block energies land in the
//! same units the detection thresholds are tuned against.

/// Compute the scaled RMS energy of an audio block.
///
/// Accumulates in f64 so long blocks stay numerically stable, then returns
/// `sqrt(mean(s^2)) * 100` as f32. The block must be non-empty.
pub fn scaled_rms(block: &[f32]) -> f32 {
    let sum_sq: f64 = block.iter().map(|&s| s as f64 * s as f64).sum();
    ((sum_sq / block.len() as f64).sqrt() * 100.0) as f32
}
