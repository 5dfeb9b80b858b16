//! Palette Resolution
//!
//! Maps each material tone to the concrete colors used to build gradients.

use serde::Serialize;

use crate::traits::PaletteVariant;

/// Concrete render colors for one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorStops {
    pub base: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
    pub highlight: &'static str,
    pub reflection: &'static str,
    pub accent: &'static str,
}

/// Outline color shared by every primitive.
pub const INK: &str = "#1a1a1a";

pub fn resolve(palette: PaletteVariant) -> ColorStops {
    match palette {
        PaletteVariant::Aluminum => ColorStops {
            base: "#B8BEC6",
            light: "#DDE1E6",
            dark: "#7E8791",
            highlight: "#F7F9FB",
            reflection: "#FFFFFF",
            accent: "#4A90D9",
        },
        PaletteVariant::Chrome => ColorStops {
            base: "#A7AEB8",
            light: "#E9EDF2",
            dark: "#5C636D",
            highlight: "#FFFFFF",
            reflection: "#F2F6FF",
            accent: "#2C3E50",
        },
        PaletteVariant::Gold => ColorStops {
            base: "#D4A72C",
            light: "#F1D272",
            dark: "#9C7412",
            highlight: "#FFF2C2",
            reflection: "#FFFBEA",
            accent: "#8E2D1F",
        },
        PaletteVariant::Copper => ColorStops {
            base: "#C46A3A",
            light: "#E39A6D",
            dark: "#8A4320",
            highlight: "#F8CDB0",
            reflection: "#FFF0E6",
            accent: "#1F6F66",
        },
        PaletteVariant::Bronze => ColorStops {
            base: "#A97142",
            light: "#CF9A6B",
            dark: "#6E4424",
            highlight: "#EBC9A4",
            reflection: "#FFF3E5",
            accent: "#3D5A80",
        },
        PaletteVariant::Rust => ColorStops {
            base: "#9E4B2C",
            light: "#C47652",
            dark: "#5F2A16",
            highlight: "#E3A987",
            reflection: "#F9E1D4",
            accent: "#D9A441",
        },
        PaletteVariant::Cobalt => ColorStops {
            base: "#2E5EAA",
            light: "#5D8BD6",
            dark: "#1A3A70",
            highlight: "#A9C5F2",
            reflection: "#E8F0FF",
            accent: "#F2C14E",
        },
        PaletteVariant::Emerald => ColorStops {
            base: "#27AE60",
            light: "#6FD394",
            dark: "#1E7A45",
            highlight: "#B8F0CD",
            reflection: "#EAFBF1",
            accent: "#F39C12",
        },
        PaletteVariant::Ruby => ColorStops {
            base: "#C0392B",
            light: "#E5685A",
            dark: "#86241A",
            highlight: "#F5A89F",
            reflection: "#FFE9E6",
            accent: "#F1C40F",
        },
        PaletteVariant::Amethyst => ColorStops {
            base: "#8E44AD",
            light: "#B57BCE",
            dark: "#5E2B75",
            highlight: "#DDBDEB",
            reflection: "#F7EDFB",
            accent: "#1ABC9C",
        },
        PaletteVariant::Obsidian => ColorStops {
            base: "#34495E",
            light: "#5D6D7E",
            dark: "#1C2833",
            highlight: "#95A5A6",
            reflection: "#D5DBDB",
            accent: "#E74C3C",
        },
        PaletteVariant::Tangerine => ColorStops {
            base: "#E67E22",
            light: "#F5A35C",
            dark: "#A85A14",
            highlight: "#FAD3A8",
            reflection: "#FFF4E8",
            accent: "#6C3483",
        },
    }
}

/// Resolve the main palette, letting an accent palette override the accent.
pub fn resolve_with_accent(palette: PaletteVariant, accent: Option<PaletteVariant>) -> ColorStops {
    let mut stops = resolve(palette);
    if let Some(accent) = accent {
        stops.accent = resolve(accent).base;
    }
    stops
}
