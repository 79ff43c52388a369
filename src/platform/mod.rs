//! Platform abstraction layer
//!
//! Handles browser/native differences that stay outside the simulation:
//! - Input decoding (raw key names → semantic events)

pub mod input;

pub use input::decode_key;
