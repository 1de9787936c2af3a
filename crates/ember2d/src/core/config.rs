//! Engine configuration
//!
//! Plain data deserialized from TOML, with defaults matching the engine's
//! tuned values. Every field is optional in the file; absent fields take
//! their default.

use serde::{Deserialize, Serialize};

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World gravity in units per second squared
    pub gravity: [f32; 2],
    /// Seconds simulated per fixed physics step
    pub fixed_timestep: f32,
    /// Most fixed steps one frame may run while catching up; excess time
    /// is dropped
    pub max_substeps: u32,
    /// Velocity/position solver iterations per step
    pub solver_iterations: u32,
    /// Multiplier on wall-clock frame time; 0 pauses the simulation
    pub time_scale: f32,
    /// Vertices the gizmo queue accepts per frame before dropping
    pub gizmo_vertex_budget: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.8],
            fixed_timestep: 1.0 / 50.0,
            max_substeps: 5,
            solver_iterations: 4,
            time_scale: 1.0,
            gizmo_vertex_budget: 16 * 1024,
        }
    }
}

/// Errors loading or validating a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value is outside its legal range
    #[error("invalid engine config: {reason}")]
    Invalid {
        /// What is wrong with the value
        reason: String,
    },
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("fixed_timestep must be positive, got {}", self.fixed_timestep),
            });
        }
        if !(0.0..=1.0).contains(&self.time_scale) {
            return Err(ConfigError::Invalid {
                reason: format!("time_scale must be in [0, 1], got {}", self.time_scale),
            });
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::Invalid {
                reason: "solver_iterations must be at least 1".into(),
            });
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid {
                reason: "max_substeps must be at least 1".into(),
            });
        }
        Ok(())
    }
}
