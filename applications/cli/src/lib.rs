//! Resonance CLI
//!
//! A terminal shell over a [`resonance_library::Session`]. Audio is not
//! produced: [`sim::SimulatedOutput`] stands in for the host audio element
//! and advances a virtual clock when told to.

pub mod config;
pub mod error;
pub mod shell;
pub mod sim;
