//! CLI command implementations.

pub mod common;
pub mod curves;
pub mod presets;
pub mod process;
pub mod table;
