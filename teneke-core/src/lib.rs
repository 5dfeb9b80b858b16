//! Teneke Core - Procedural Avatar Engine
//!
//! # Guarantees
//! 1. Same seed, same avatar, forever
//! 2. Every trait combination renders completely
//! 3. Documents are self-contained SVG
//! 4. Artwork is independent of pixel size
//! 5. Nothing is shared between calls

pub mod traits;
pub mod hashing;
pub mod selection;
pub mod palette;
pub mod anchor;
pub mod svg;
pub mod container;
pub mod face;
pub mod compositor;
pub mod config;
pub mod validation;
pub mod badge;
pub mod pipeline;

pub use traits::{AvatarConfig, ContainerVariant, ExpressionVariant, PaletteVariant, TraitError, TOTAL_COMBINATIONS};
pub use hashing::{seed_hash, compute_content_hash, canonical_json};
pub use palette::{resolve, ColorStops};
pub use anchor::{anchor_for, FaceAnchor};
pub use compositor::compose;
pub use config::{EngineConfig, FailureMode};
pub use validation::{ValidationResult, ValidationViolation, ViolationSeverity};
pub use badge::{resolve_config, AvatarBadge, DEFAULT_AVATAR};
pub use pipeline::{
    generate_from_seed, generate_random, generate_random_with, render_svg, config_from_names,
    list_container_options, list_expression_options, list_palette_options,
    AvatarPipeline, CompileRequest, CompiledAvatar, PipelineError,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
