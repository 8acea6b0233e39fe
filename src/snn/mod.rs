//! # Ring SNN - Spiking Ring Attractor Core
//!
//! A ring of LIF neurons wired so a localized bump of activity sustains
//! itself, can be driven from outside, and can be decoded back to an angle.
//!
//! ## Components
//!
//! - **Geometry**: ring offsets with explicit wraparound, circular mean
//! - **Fixed points**: attractor wells with amplified local connectivity
//! - **Midpoint**: stimulation center and decoding reference
//! - **Connectivity**: policy-driven excitatory/inhibitory wiring
//! - **Stimulus**: per-tick external drive around the midpoint
//! - **Simulation**: tick loop producing the potential trace
//! - **Decoder**: trailing-window circular decode and error
//!
//! ## Example
//!
//! ```ignore
//! use ring_attractor::{RingAttractor, RingConfig};
//!
//! let config = RingConfig { n: 64, fixed_point_count: 2, total_ticks: 100, ..Default::default() };
//! let mut ring = RingAttractor::new(config)?;
//! let outcome = ring.simulate()?;
//! println!("error: {:.3}°", outcome.decoded.error);
//! ```

// Ring geometry and circular statistics
pub mod geometry;
pub use geometry::{circular_distance, circular_mean, neuron_angle, CircularMean};

// Neuron contract (facade API)
mod traits;
pub use traits::{PendingEvent, SpikingNeuron, SynapseKind};

// Named profiles (serializable)
mod profiles;
pub use profiles::{LifParams, LifProfile};

// Reference neuron model
mod lif;
pub use lif::LifNeuron;

// Fixed points and midpoint
pub mod fixed_points;
pub use fixed_points::FixedPointSet;

mod midpoint;
pub use midpoint::resolve_midpoint;

// Neuron arena and wiring
mod network;
pub use network::{RingNetwork, RingNeuron, Synapses};

mod connectivity;
pub use connectivity::{
    ClusteredFixedPoints, Connectivity, ConnectivityBuilder, ConnectivityPolicy,
    SingletonFixedPoints, Tier, Weights,
};

// Drive, execution, decoding
mod stimulus;
pub use stimulus::{StimulusConfig, StimulusScheduler, STIMULUS_HALF_WIDTH};

mod trace;
pub use trace::PotentialTrace;

mod simulation;
pub use simulation::{LoopState, Parallelism, SimulationLoop, PARALLEL_THRESHOLD};

mod decoder;
pub use decoder::{Decoded, Decoder, DEFAULT_WINDOW};

// Export types
mod snapshot;
pub use snapshot::{SimulationReport, SynapseRecord, TopologySnapshot};

// End-to-end pipeline
mod attractor;
pub use attractor::{RingAttractor, SimulationOutcome};
