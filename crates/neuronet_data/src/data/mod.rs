//! Core data structures for the Neuronet engine.

pub mod handle;
pub mod network;
pub mod params;
