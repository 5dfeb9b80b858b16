//! Trait Taxonomy - Closed Enumerations
//!
//! The declaration order of every variant is part of the reproducibility
//! contract: seeded selection indexes into `ALL`, so reordering or inserting
//! variants changes every previously generated avatar. Append only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraitError {
    #[error("Unknown {category} variant: {name}")]
    UnknownVariant { category: &'static str, name: String },

    #[error("{category} index {index} out of range (0..{len})")]
    IndexOutOfRange {
        category: &'static str,
        index: usize,
        len: usize,
    },
}

macro_rules! trait_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $category:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in selection order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const CATEGORY: &'static str = $category;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Position of this variant in `ALL`.
            pub fn index(self) -> usize {
                self as usize
            }

            pub fn from_index(index: usize) -> Result<Self, TraitError> {
                Self::ALL.get(index).copied().ok_or(TraitError::IndexOutOfRange {
                    category: Self::CATEGORY,
                    index,
                    len: Self::ALL.len(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TraitError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| TraitError::UnknownVariant {
                        category: Self::CATEGORY,
                        name: s.to_string(),
                    })
            }
        }
    };
}

trait_enum! {
    /// Body-shape archetypes.
    ContainerVariant, "container" {
        Classic => "classic",
        Crushed => "crushed",
        TallEnergy => "tall-energy",
        Vintage => "vintage",
        Handled => "handled",
        Aerosol => "aerosol",
        Barrel => "barrel",
        FlatTin => "flat-tin",
        Bucket => "bucket",
        Labeled => "labeled",
        Rounded => "rounded",
        Bottle => "bottle",
    }
}

trait_enum! {
    /// Facial moods.
    ExpressionVariant, "expression" {
        Grin => "grin",
        Neutral => "neutral",
        CrossEyed => "cross-eyed",
        Angry => "angry",
        VisorCool => "visor-cool",
        Worried => "worried",
        Sleepy => "sleepy",
        Excited => "excited",
    }
}

trait_enum! {
    /// Named material tones.
    PaletteVariant, "palette" {
        Aluminum => "aluminum",
        Chrome => "chrome",
        Gold => "gold",
        Copper => "copper",
        Bronze => "bronze",
        Rust => "rust",
        Cobalt => "cobalt",
        Emerald => "emerald",
        Ruby => "ruby",
        Amethyst => "amethyst",
        Obsidian => "obsidian",
        Tangerine => "tangerine",
    }
}

/// Number of distinct trait combinations, counting the accent palette slot.
pub const TOTAL_COMBINATIONS: usize = ContainerVariant::ALL.len()
    * ExpressionVariant::ALL.len()
    * PaletteVariant::ALL.len()
    * PaletteVariant::ALL.len();

/// A complete trait selection. Equal configs render identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarConfig {
    pub container: ContainerVariant,
    pub expression: ExpressionVariant,
    pub palette: PaletteVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_palette: Option<PaletteVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl AvatarConfig {
    pub fn new(
        container: ContainerVariant,
        expression: ExpressionVariant,
        palette: PaletteVariant,
    ) -> Self {
        Self {
            container,
            expression,
            palette,
            accent_palette: None,
            seed: None,
        }
    }

    pub fn with_accent(mut self, accent: PaletteVariant) -> Self {
        self.accent_palette = Some(accent);
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinalities() {
        assert_eq!(ContainerVariant::ALL.len(), 12);
        assert_eq!(ExpressionVariant::ALL.len(), 8);
        assert_eq!(PaletteVariant::ALL.len(), 12);
        assert_eq!(TOTAL_COMBINATIONS, 13_824);
    }

    #[test]
    fn test_serde_names_match_labels() {
        for c in ContainerVariant::ALL {
            let json = serde_json::to_string(c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
        for e in ExpressionVariant::ALL {
            let json = serde_json::to_string(e).unwrap();
            assert_eq!(json, format!("\"{}\"", e.as_str()));
        }
        for p in PaletteVariant::ALL {
            let json = serde_json::to_string(p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn test_from_str_round_trip_and_unknown() {
        assert_eq!(
            "tall-energy".parse::<ContainerVariant>().unwrap(),
            ContainerVariant::TallEnergy
        );
        let err = "teapot".parse::<ContainerVariant>().unwrap_err();
        assert_eq!(
            err,
            TraitError::UnknownVariant {
                category: "container",
                name: "teapot".to_string()
            }
        );
        assert!(err.to_string().contains("Unknown container variant"));

        let err = ExpressionVariant::from_index(8).unwrap_err();
        assert_eq!(
            err,
            TraitError::IndexOutOfRange {
                category: ExpressionVariant::CATEGORY,
                index: 8,
                len: 8
            }
        );
    }

    #[test]
    fn test_index_lookup() {
        assert_eq!(ExpressionVariant::Sleepy.index(), 6);
        assert_eq!(
            PaletteVariant::from_index(11).unwrap(),
            PaletteVariant::Tangerine
        );
        assert!(matches!(
            PaletteVariant::from_index(12),
            Err(TraitError::IndexOutOfRange { len: 12, .. })
        ));
    }

    #[test]
    fn test_config_json_shape() {
        let config = AvatarConfig::new(
            ContainerVariant::FlatTin,
            ExpressionVariant::VisorCool,
            PaletteVariant::Gold,
        )
        .with_accent(PaletteVariant::Obsidian);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["container"], "flat-tin");
        assert_eq!(json["expression"], "visor-cool");
        assert_eq!(json["accentPalette"], "obsidian");
        assert!(json.get("seed").is_none());
    }

    #[test]
    fn test_unknown_variant_rejected_by_serde() {
        let bad = r#"{"container":"teapot","expression":"grin","palette":"gold"}"#;
        assert!(serde_json::from_str::<AvatarConfig>(bad).is_err());
    }
}
