//! Configuration module for Dehaze-Burn.
//!
//! This module provides configuration structures and enums for the haze priors and
//! the paired hazy/clear datasets. It is organized into two main submodules:
//! - `core`: Contains the main configuration structures
//! - `enums`: Contains all enumeration types used in configurations

pub mod core;
pub mod enums;

// Re-export all configuration structures from core
pub use core::{AtmosphericLightConfig, DatasetConfig};

// Re-export all enums from enums
pub use enums::{AtmosphericOutput, CandidateRounding, ClearNaming, Split};
