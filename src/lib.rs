// lib.rs - Library interface for the bencode codec

pub mod bencode;
pub mod config;
pub mod engine;
pub mod file_io;
pub mod infohash;
pub mod inspect;

// Re-export commonly used types for easier testing
pub use bencode::*;
pub use config::Config;
pub use infohash::info_hash;
pub use inspect::{bvalue_to_json, pretty};
