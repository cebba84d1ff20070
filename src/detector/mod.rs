//! Per-block clap detection kernel.
//!
//! One call classifies one block: the adaptive noise floor is updated from
//! quiet blocks, then the gates run cheapest-first: energy over the noise
//! floor, transient onset against the previous block, and finally the
//! two-band spectral check. The expensive spectral estimator only runs on
//! the rare blocks the time-domain gates already accepted.
//!
//! The kernel keeps no state of its own. The caller owns a
//! [`DetectorState`] and threads it through consecutive calls on a stream
//! (the state returned by call *i* is the input to call *i+1*), which keeps
//! the kernel reentrant and lets independent streams run in parallel.

pub mod energy;
pub mod spectral;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Below this energy the previous block is treated as silent and the onset
/// gate switches to its cold-start form.
const ONSET_SILENCE_FLOOR: f32 = 0.01;

/// Tunable detection thresholds.
///
/// Defaults are the values the listener ships with, tuned for 16 kHz mono
/// capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Minimum scaled-RMS energy for a block to qualify at all.
    pub threshold: f32,
    /// Block energy must exceed the noise floor by this factor.
    pub clap_ratio: f32,
    /// Required energy jump over the previous block.
    pub onset_ratio: f32,
    /// Minimum fraction of spectral energy in the high band.
    pub hf_ratio_min: f32,
    /// Noise-floor smoothing factor in [0, 1]. Higher adapts faster.
    pub noise_alpha: f32,
    /// Capture sample rate. Not consulted by the current gates; reserved
    /// for frequency-aware thresholds.
    pub sample_rate: u32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            threshold: 15.0,
            clap_ratio: 4.0,
            onset_ratio: 6.0,
            hf_ratio_min: 0.30,
            noise_alpha: 0.02,
            sample_rate: 16_000,
        }
    }
}

/// Caller-owned detection state for one audio stream.
///
/// [`analyze_block`] returns the state to feed into the next call; calls on
/// one stream must stay strictly ordered for the adaptive values to make
/// sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorState {
    /// Adaptive estimate of background energy, updated from quiet blocks.
    pub noise_floor: f32,
    /// Scaled-RMS energy of the previous block (0.0 before the first call).
    pub prev_energy: f32,
}

impl Default for DetectorState {
    fn default() -> Self {
        Self {
            noise_floor: 2.0,
            prev_energy: 0.0,
        }
    }
}

/// Which gate resolved the block's classification.
///
/// The rejection variants also document how far the block got: a
/// [`GateDecision::RejectedEnergy`] block never reached the onset or
/// spectral gates, and only [`GateDecision::RejectedSpectral`] and
/// [`GateDecision::Clap`] mean the spectral estimator ran at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Energy did not clear the noise floor multiple or the absolute
    /// threshold.
    RejectedEnergy,
    /// No sharp enough rise over the previous block.
    RejectedOnset,
    /// Spectral energy sat too low in the spectrum for an impulsive sound.
    RejectedSpectral,
    /// All gates passed.
    Clap,
}

impl GateDecision {
    pub fn is_clap(self) -> bool {
        matches!(self, Self::Clap)
    }
}

/// Everything a single kernel call produces.
///
/// `energy` and `state` are populated on every call, including rejections,
/// so the caller can always thread the state forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockAnalysis {
    pub decision: GateDecision,
    /// Scaled-RMS energy of the analyzed block.
    pub energy: f32,
    /// State for the next call on this stream.
    pub state: DetectorState,
}

impl BlockAnalysis {
    pub fn is_clap(&self) -> bool {
        self.decision.is_clap()
    }
}

/// Classify one block of mono audio.
///
/// Pure and deterministic: identical inputs produce identical outputs, and
/// the block is never mutated. Sample magnitudes are taken as-is, with no
/// clamping, so NaN or overflowing input propagates into the result.
///
/// # Panics
///
/// Panics if `block` is empty. An empty block is a bug in the slicing
/// layer, not a runtime condition, so the kernel fails fast instead of
/// letting the mean computation produce NaN.
pub fn analyze_block(
    block: &[f32],
    params: &DetectorParams,
    state: DetectorState,
) -> BlockAnalysis {
    assert!(!block.is_empty(), "audio block must contain at least one sample");

    let energy = energy::scaled_rms(block);

    // Only quiet blocks feed the adaptive noise floor, so a clap cannot
    // raise its own detection baseline.
    let noise_floor = if energy < params.threshold * 0.5 {
        (1.0 - params.noise_alpha) * state.noise_floor + params.noise_alpha * energy
    } else {
        state.noise_floor
    };

    let next = DetectorState {
        noise_floor,
        prev_energy: energy,
    };

    if !(energy > state.noise_floor * params.clap_ratio && energy > params.threshold) {
        return BlockAnalysis {
            decision: GateDecision::RejectedEnergy,
            energy,
            state: next,
        };
    }

    let onset = if state.prev_energy > ONSET_SILENCE_FLOOR {
        energy / state.prev_energy.max(ONSET_SILENCE_FLOOR) > params.onset_ratio
    } else {
        // Cold start: no usable previous block, so demand a clearly loud one.
        energy > params.threshold * 2.0
    };
    if !onset {
        return BlockAnalysis {
            decision: GateDecision::RejectedOnset,
            energy,
            state: next,
        };
    }

    let hf_ratio = spectral::hf_ratio(block);
    let decision = if hf_ratio >= params.hf_ratio_min {
        debug!(energy, hf_ratio, "block passed all clap gates");
        GateDecision::Clap
    } else {
        GateDecision::RejectedSpectral
    };

    BlockAnalysis {
        decision,
        energy,
        state: next,
    }
}
