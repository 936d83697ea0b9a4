//! Neuronet: a connectionist engine with a training driver and CLI.
//!
//! The engine lives in `neuronet_core`; this crate gathers it with the
//! persistence layer and the application entry points used by the binary.

pub mod app;
pub mod model;
