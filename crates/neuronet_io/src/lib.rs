//! Persistence for Neuronet: JSON and hex encodings of parameter snapshots.

pub mod error;
pub mod params;
pub mod serialization;

pub use error::{IoError, Result};
pub use params::{load_parameters, save_parameters};
pub use serialization::{from_hex, from_json, read_json_file, to_hex, to_json, write_json_file};
