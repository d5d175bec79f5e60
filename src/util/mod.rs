// Utility Module
// Configuration and display formatting

pub mod config;
pub mod format;

pub use config::GeneratorConfig;
pub use format::{to_base10, to_base2, to_base64, to_byte_hex};
