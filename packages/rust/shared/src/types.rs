//! Core domain types for ATOC conversions.

use std::collections::BTreeMap;

/// Default name for generated KML documents.
pub const DEFAULT_DOCUMENT_NAME: &str = "ATOC Export";

/// Fixed description attached to every generated document.
pub const DOCUMENT_DESCRIPTION: &str = "Processed by ATOC";

// ---------------------------------------------------------------------------
// GeometryKind
// ---------------------------------------------------------------------------

/// The KML geometry element kinds ATOC recognizes.
///
/// The geometry payload itself is carried verbatim as markup text; only the
/// kind is inspected (to pick which style sub-elements to emit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiGeometry,
}

impl GeometryKind {
    /// Map a KML element local name to a geometry kind.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(Self::Point),
            "LineString" => Some(Self::LineString),
            "Polygon" => Some(Self::Polygon),
            "MultiGeometry" => Some(Self::MultiGeometry),
            _ => None,
        }
    }

    /// The KML element name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiGeometry => "MultiGeometry",
        }
    }
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// A single extracted placemark with its OSM metadata.
///
/// Features are read-only inputs to a conversion run. The geometry markup is
/// opaque to everything downstream of the parser: it is copied into the
/// output document verbatim, never rewritten.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Display name from the source placemark (may be empty).
    pub name: String,
    /// Which geometry element the placemark carries.
    pub kind: GeometryKind,
    /// The original geometry element as verbatim KML markup.
    pub geometry: String,
    /// OSM tags extracted from `ExtendedData` (key → value, keys unique).
    pub tags: BTreeMap<String, String>,
    /// OSM identifier from the `@id`/`id` tag, when present.
    pub osm_id: Option<String>,
}

impl Feature {
    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The visual category assigned to a feature.
///
/// Both halves always point into the static rule table, so classifications
/// are cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Top-level category, e.g. "road", "building", "water".
    pub category: &'static str,
    /// Subcategory within it, e.g. "motorway", "residential", "river".
    pub subcategory: &'static str,
}

/// Classification for features that match no rule.
pub const DEFAULT_CLASSIFICATION: Classification = Classification {
    category: "other",
    subcategory: "unknown",
};
