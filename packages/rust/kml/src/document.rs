//! The abstract output document tree.
//!
//! The assembler produces this structure; the writer serializes it to KML
//! text. Geometry payloads pass through as verbatim markup.

use atoc_shared::GeometryKind;
use atoc_styles::Style;

/// A fully assembled output document, ready for serialization.
#[derive(Debug, Clone)]
pub struct KmlDocument {
    /// Document display name (already sanitized).
    pub name: String,
    /// Document description text.
    pub description: String,
    /// Shared style blocks, sorted by id.
    pub styles: Vec<StyleBlock>,
    /// Placemark groups, in emission order.
    pub groups: Vec<PlacemarkGroup>,
}

/// One shared `<Style>` block.
///
/// The geometry kind decides which style sub-elements the writer emits
/// (icon styling for points, fill styling for polygons).
#[derive(Debug, Clone)]
pub struct StyleBlock {
    /// Document-unique style id, referenced by placemark `styleUrl`s.
    pub id: String,
    pub style: &'static Style,
    pub kind: GeometryKind,
}

/// A run of placemarks emitted together.
///
/// A labeled group becomes a `<Folder>`; an unlabeled group's placemarks are
/// emitted directly under the document.
#[derive(Debug, Clone)]
pub struct PlacemarkGroup {
    pub label: Option<String>,
    pub placemarks: Vec<Placemark>,
}

/// One output placemark.
#[derive(Debug, Clone)]
pub struct Placemark {
    /// Display name (already sanitized, never empty).
    pub name: String,
    /// Optional HTML description block.
    pub description: Option<String>,
    /// Style id this placemark references (without the leading `#`).
    pub style_id: String,
    /// The original geometry element, copied verbatim.
    pub geometry: String,
}
