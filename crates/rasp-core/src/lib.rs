//! Rasp Core - DSP primitives for table-driven distortion
//!
//! This crate provides the building blocks shared by the rasp effect crates,
//! designed for real-time audio processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for block-processing audio effects
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter discovery for hosts
//! - [`ParamDescriptor`] - Range, default and unit metadata with clamping
//!
//! ## Filters
//!
//! - [`DcBlocker`] - Moving-average DC removal with a fixed time window
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - Signal measurement: [`peak`], [`rms`]
//! - Interpolation: [`lerp`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the DC blocker
//! history). Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rasp-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Object-safe traits**: Dynamic dispatch when needed

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod dc_blocker;
pub mod effect;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use dc_blocker::DcBlocker;
pub use effect::Effect;
pub use math::{db_to_linear, lerp, linear_to_db, peak, rms};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
