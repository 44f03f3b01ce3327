//! Configuration loading and management for the prescription engine.
//!
//! This module loads the prescription regime from YAML files: the regime
//! metadata, the statutory minimums by offense category and the fixed
//! automatic suspensions.
//!
//! # Example
//!
//! ```no_run
//! use prescrizione_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/prescrizione").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CovidSuspensionConfig, OrlandoSuspensionConfig, RegimeConfig, RegimeMetadata,
    StatutoryMinimums, SuspensionConfig,
};
