//! clap-core — transient (hand clap) detection for mono audio blocks.
//!
//! The kernel classifies one fixed-length block at a time: cheap
//! time-domain gates (energy over an adaptive noise floor, transient onset)
//! run first, and a coarse two-band spectral check runs only on blocks the
//! cheap gates already accepted. All persistent detection state lives in a
//! caller-owned value threaded through each call, so the kernel itself is a
//! pure function and independent audio streams can be analyzed in parallel.
//!
//! The capture layer that slices a continuous signal into blocks, and the
//! host that acts on detections, are the caller's concern.

pub mod config;
pub mod detector;
pub mod double_clap;

pub use config::{read_clap_config, ClapConfig};
pub use detector::{analyze_block, BlockAnalysis, DetectorParams, DetectorState, GateDecision};
pub use double_clap::{DoubleClapConfig, DoubleClapTracker};
