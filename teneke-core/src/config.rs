//! Engine Configuration
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pipeline::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default = "default_size")]
    pub default_size: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    #[serde(default = "default_true")]
    pub show_ring: bool,
    #[serde(default)]
    pub failure_mode: FailureMode,
    #[serde(default = "default_max_primitives")]
    pub max_primitives: usize,
}

fn default_size() -> u32 { 48 }
fn default_max_size() -> u32 { 4096 }
fn default_true() -> bool { true }
fn default_max_primitives() -> usize { 200 }

/// What the compile path does when document validation reports errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    Block,
    Warn,
    Log,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_size: default_size(),
            max_size: default_max_size(),
            show_ring: default_true(),
            failure_mode: FailureMode::default(),
            max_primitives: default_max_primitives(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check a requested pixel size against this config.
    pub fn check_size(&self, size: u32) -> Result<u32, PipelineError> {
        if size == 0 || size > self.max_size {
            return Err(PipelineError::InvalidSize {
                size,
                max: self.max_size,
            });
        }
        Ok(size)
    }
}
