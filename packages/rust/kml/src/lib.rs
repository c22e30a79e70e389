//! KML input extraction and output serialization.
//!
//! The reader turns Overpass-style KML/KMZ exports into flat [`Feature`]
//! records; the writer renders an assembled [`KmlDocument`] tree back to
//! KML text. Geometry payloads flow through both directions verbatim.
//!
//! [`Feature`]: atoc_shared::Feature

pub mod document;
pub mod reader;
pub mod writer;

pub use document::{KmlDocument, Placemark, PlacemarkGroup, StyleBlock};
pub use reader::{parse_kml, read_kml_file};
pub use writer::{KML_NS, write_kml};
