//! Avatar Badge
//!
//! The round frame a host UI draws around an avatar, plus the fallback
//! chain for picking which avatar to show.

use serde::{Deserialize, Serialize};

use crate::palette::resolve;
use crate::pipeline::generate_from_seed;
use crate::traits::{AvatarConfig, ContainerVariant, ExpressionVariant, PaletteVariant};

/// Shown when neither an explicit config nor a username is available.
pub const DEFAULT_AVATAR: AvatarConfig = AvatarConfig {
    container: ContainerVariant::Classic,
    expression: ExpressionVariant::Neutral,
    palette: PaletteVariant::Ruby,
    accent_palette: None,
    seed: None,
};

/// Rings are hidden below this size; they would swallow the artwork.
pub const MIN_RING_SIZE: u32 = 32;

/// Explicit config wins, then the username seed, then `DEFAULT_AVATAR`.
/// An empty username counts as no username.
pub fn resolve_config(username: Option<&str>, config: Option<AvatarConfig>) -> AvatarConfig {
    match (config, username) {
        (Some(config), _) => config,
        (None, Some(username)) if !username.is_empty() => generate_from_seed(username),
        (None, _) => DEFAULT_AVATAR,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarBadge {
    pub ring_color: String,
    pub ring_width: u32,
    pub ring_visible: bool,
}

impl AvatarBadge {
    pub fn for_config(config: &AvatarConfig, size: u32, show_ring: bool) -> Self {
        let ring_width = ((f64::from(size) * 0.06).round() as u32).max(2);
        Self {
            ring_color: resolve(config.palette).base.to_string(),
            ring_width,
            ring_visible: show_ring && size >= MIN_RING_SIZE,
        }
    }
}
