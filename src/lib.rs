//! # Ring Attractor
//!
//! Spiking ring attractor with fixed-point wells. A population of LIF
//! neurons on a circle holds a self-sustaining bump of activity; the crate
//! builds the wiring, drives the bump, and decodes where it sits.
//!
//! ## Core Components
//!
//! - **Topology**: directed excitatory (1-4 steps) / inhibitory (5-11 steps)
//!   synapses with explicit `(id ± i) mod n` wraparound
//! - **Fixed points**: neurons with amplified weights that pin the bump
//! - **Simulation**: deterministic tick loop, optionally parallel per tick
//! - **Decoding**: circular mean of spiking angles over a trailing window
//!
//! ## Design Principles
//!
//! - **Arena, not pointers**: neurons indexed `0..n`, synapses keyed by id
//! - **Neuron-local steps**: no neuron reads another's potential mid-tick
//! - **Deterministic**: same seed, same trace, sequential or parallel
//! - **Fail fast**: bad configuration is rejected before any tick runs
//!
//! ## Example
//!
//! ```ignore
//! use ring_attractor::{RingAttractor, RingConfig};
//!
//! let config = RingConfig::load("ring.json")?;
//! let mut ring = RingAttractor::new(config)?;
//! let outcome = ring.simulate()?;
//! assert!(outcome.decoded.error < 360.0);
//! ```

// Ring SNN core
pub mod snn;
pub use snn::{
    Connectivity, ConnectivityBuilder, ConnectivityPolicy, Decoded, Decoder, FixedPointSet,
    LifNeuron, LifProfile, Parallelism, PotentialTrace, RingAttractor, RingNetwork,
    SimulationLoop, SimulationOutcome, SimulationReport, SpikingNeuron, StimulusConfig,
    StimulusScheduler, SynapseKind, TopologySnapshot, Weights,
};

// Configuration
pub mod config;
pub use config::RingConfig;

// Error types
mod error;
pub use error::{Flank, Result, RingError};
