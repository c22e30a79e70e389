//! KML style definitions mapped to feature classifications.
//!
//! KML colors use the `aabbggrr` format (alpha-blue-green-red). The palette
//! is written in standard `#RRGGBB` hex for readability and converted once
//! when the palette is first built.
//!
//! Style resolution falls back in tiers:
//! exact `(category, subcategory)` → `(category, "*")` → `("other", "*")`.

mod palette;

use tracing::debug;

use atoc_shared::{AtocError, Result};

pub use palette::{
    ICON_BUS, ICON_CAMPING, ICON_CIRCLE, ICON_DEFAULT, ICON_DINING, ICON_HOSPITAL, ICON_HOTEL,
    ICON_MUSEUM, ICON_PARKING, ICON_PEAK, ICON_POLICE, ICON_RAIL_STATION, ICON_SCHOOLS, ICON_SHOP,
    ICON_SQUARE, ICON_STAR, ICON_TREE, ICON_TRIANGLE, ICON_VIEWPOINT, ICON_WORSHIP,
};

use palette::PALETTE;

/// Wildcard subcategory key in the palette.
pub const WILDCARD: &str = "*";

/// Fully opaque alpha channel.
const OPAQUE: &str = "ff";

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Visual style applied to a KML feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Line / polygon outline color (KML `aabbggrr`).
    pub line_color: String,
    pub line_width: f32,

    /// Polygon fill (only used for Polygon geometries); `None` = no fill.
    pub poly_color: Option<String>,
    pub poly_fill: bool,
    pub poly_outline: bool,

    /// Point icon; `None` = default pushpin.
    pub icon_href: Option<String>,
    pub icon_scale: f32,

    /// Label rendering.
    pub label_color: String,
    pub label_scale: f32,
}

impl Style {
    /// Base style: an opaque outline with default label settings.
    pub(crate) fn line(rgb: &str, width: f32) -> Self {
        Self {
            line_color: kml_color(rgb, OPAQUE),
            line_width: width,
            poly_color: None,
            poly_fill: true,
            poly_outline: true,
            icon_href: None,
            icon_scale: 1.0,
            label_color: "ffffffff".into(),
            label_scale: 0.8,
        }
    }

    pub(crate) fn with_fill(mut self, rgb: &str, alpha: &str) -> Self {
        self.poly_color = Some(kml_color(rgb, alpha));
        self
    }

    pub(crate) fn with_icon(mut self, href: &str) -> Self {
        self.icon_href = Some(href.into());
        self
    }

    pub(crate) fn with_icon_scale(mut self, scale: f32) -> Self {
        self.icon_scale = scale;
        self
    }
}

/// Convert `#RRGGBB` (or `RRGGBB`) plus an alpha byte to KML `aabbggrr`.
pub fn kml_color(rgb: &str, alpha: &str) -> String {
    let hex = rgb.trim_start_matches('#');
    let (r, g, b) = (&hex[0..2], &hex[2..4], &hex[4..6]);
    format!("{alpha}{b}{g}{r}")
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn palette_entry(category: &str, subcategory: &str) -> Option<&'static Style> {
    PALETTE
        .iter()
        .find(|((cat, sub), _)| *cat == category && *sub == subcategory)
        .map(|(_, style)| style)
}

/// Look up the visual style for a classification.
///
/// Resolution order:
/// 1. Exact match `(category, subcategory)`
/// 2. Wildcard `(category, "*")`
/// 3. Default `("other", "*")`
///
/// Total for every input: the default entry is a palette invariant, checked
/// eagerly by [`validate_palette`].
pub fn resolve(category: &str, subcategory: &str) -> &'static Style {
    palette_entry(category, subcategory)
        .or_else(|| palette_entry(category, WILDCARD))
        .or_else(|| palette_entry("other", WILDCARD))
        .expect("palette default entry")
}

/// Stable style ID for a classification, used as the `<Style id="...">`
/// value and as the deduplication key for emitted style blocks.
pub fn style_id(category: &str, subcategory: &str) -> String {
    format!("style-{category}-{subcategory}")
}

/// Validate the static palette at startup.
///
/// The universal `("other", "*")` default must exist; without it, style
/// resolution is no longer total.
pub fn validate_palette() -> Result<()> {
    if palette_entry("other", WILDCARD).is_none() {
        return Err(AtocError::config(
            "style palette is missing its (\"other\", \"*\") default entry",
        ));
    }
    debug!(entries = PALETTE.len(), "style palette validated");
    Ok(())
}
