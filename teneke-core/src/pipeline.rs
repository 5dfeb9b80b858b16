//! Public API and Compilation Pipeline
//!
//! The free functions are the pure generation surface. `AvatarPipeline` is the
//! checked entry point: `compile` ALWAYS validates the rendered document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::badge::{resolve_config, AvatarBadge};
use crate::compositor::{compose_with_id, instance_id};
use crate::config::EngineConfig;
use crate::hashing::{compute_content_hash, seed_hash, sha256_hex};
use crate::selection::{select_random, select_seeded};
use crate::traits::{AvatarConfig, ContainerVariant, ExpressionVariant, PaletteVariant, TraitError};
use crate::validation::{DocumentContext, ValidationResult, Validator};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid size {size}: must be between 1 and {max}")]
    InvalidSize { size: u32, max: u32 },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid trait: {0}")]
    Trait(#[from] TraitError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Deterministic: the same seed always yields the same config.
pub fn generate_from_seed(seed: &str) -> AvatarConfig {
    select_seeded(seed_hash(seed), seed)
}

/// Non-deterministic selection from the thread-local RNG.
pub fn generate_random() -> AvatarConfig {
    generate_random_with(&mut rand::thread_rng())
}

pub fn generate_random_with<R: Rng>(rng: &mut R) -> AvatarConfig {
    select_random(rng)
}

/// Pure rendering of an explicit config. No selection logic.
pub fn render_svg(config: &AvatarConfig, size_px: u32) -> Result<String, PipelineError> {
    if size_px == 0 {
        return Err(PipelineError::InvalidSize {
            size: size_px,
            max: u32::MAX,
        });
    }
    Ok(compose_with_id(config, size_px, &instance_id(config)))
}

/// Build a config from trait names, failing on any unknown name.
pub fn config_from_names(
    container: &str,
    expression: &str,
    palette: &str,
    accent_palette: Option<&str>,
) -> Result<AvatarConfig, TraitError> {
    let mut config = AvatarConfig::new(container.parse()?, expression.parse()?, palette.parse()?);
    if let Some(accent) = accent_palette {
        config = config.with_accent(accent.parse()?);
    }
    Ok(config)
}

pub fn list_container_options() -> Vec<ContainerVariant> {
    ContainerVariant::ALL.to_vec()
}

pub fn list_expression_options() -> Vec<ExpressionVariant> {
    ExpressionVariant::ALL.to_vec()
}

pub fn list_palette_options() -> Vec<PaletteVariant> {
    PaletteVariant::ALL.to_vec()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    #[serde(default)]
    pub config: Option<AvatarConfig>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub show_ring: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledAvatar {
    pub instance_id: String,
    pub config: AvatarConfig,
    pub size: u32,
    pub engine_version: String,
    pub config_hash: String,
    pub svg_hash: String,
    pub svg: String,
    pub data_uri: String,
    pub badge: AvatarBadge,
    pub validation: ValidationResult,
}

/// The compilation pipeline - single checked entry point
pub struct AvatarPipeline {
    config: EngineConfig,
    validator: Validator,
}

impl AvatarPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            validator: Validator::new(),
        }
    }

    /// Validate a rendered document.
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_document(&self, svg: &str, instance_id: &str, size: u32) -> ValidationResult {
        let ctx = DocumentContext {
            instance_id: instance_id.to_string(),
            size,
            max_primitives: self.config.max_primitives,
        };
        self.validator.validate(svg, &ctx, self.config.failure_mode)
    }

    /// Render and package an avatar.
    ///
    /// CRITICAL: This ALWAYS calls validate_document internally.
    pub fn compile(&self, request: &CompileRequest) -> Result<CompiledAvatar, PipelineError> {
        let size = self
            .config
            .check_size(request.size.unwrap_or(self.config.default_size))?;
        let config = resolve_config(request.username.as_deref(), request.config.clone());

        let id = instance_id(&config);
        let svg = compose_with_id(&config, size, &id);

        // MANDATORY: no document leaves the pipeline unvalidated.
        let validation = self.validate_document(&svg, &id, size);
        if !validation.valid {
            let messages: Vec<_> = validation
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(PipelineError::ValidationFailed(messages.join("; ")));
        }

        let show_ring = request.show_ring.unwrap_or(self.config.show_ring);
        let badge = AvatarBadge::for_config(&config, size, show_ring);

        let asset = CompiledAvatar {
            instance_id: id,
            config_hash: compute_content_hash(&config)?,
            svg_hash: sha256_hex(svg.as_bytes()),
            data_uri: format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes())),
            config,
            size,
            engine_version: ENGINE_VERSION.to_string(),
            svg,
            badge,
            validation,
        };

        info!(
            instance_id = %asset.instance_id,
            size,
            config_hash = %asset.config_hash,
            "compiled avatar"
        );
        debug!(violations = asset.validation.violations.len(), "validation summary");
        Ok(asset)
    }
}

impl Default for AvatarPipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
