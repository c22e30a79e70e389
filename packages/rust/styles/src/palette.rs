//! The static style palette, keyed by `(category, subcategory)`.
//!
//! Wildcard entries are keyed by `(category, "*")`; the universal default is
//! `("other", "*")`. Built once on first use, read-only thereafter.

use std::sync::LazyLock;

use crate::Style;

// ---------------------------------------------------------------------------
// Google Earth built-in palette icons
// ---------------------------------------------------------------------------

pub const ICON_CIRCLE: &str = "http://maps.google.com/mapfiles/kml/shapes/placemark_circle.png";
pub const ICON_SQUARE: &str = "http://maps.google.com/mapfiles/kml/shapes/placemark_square.png";
pub const ICON_STAR: &str = "http://maps.google.com/mapfiles/kml/shapes/star.png";
pub const ICON_TRIANGLE: &str = "http://maps.google.com/mapfiles/kml/shapes/triangle.png";
pub const ICON_DINING: &str = "http://maps.google.com/mapfiles/kml/shapes/dining.png";
pub const ICON_SCHOOLS: &str = "http://maps.google.com/mapfiles/kml/paddle/grn-blank.png";
pub const ICON_HOSPITAL: &str = "http://maps.google.com/mapfiles/kml/paddle/red-circle.png";
pub const ICON_PARKING: &str = "http://maps.google.com/mapfiles/kml/paddle/blu-blank.png";
pub const ICON_POLICE: &str = "http://maps.google.com/mapfiles/kml/paddle/blu-circle.png";
pub const ICON_WORSHIP: &str = "http://maps.google.com/mapfiles/kml/paddle/purple-blank.png";
pub const ICON_HOTEL: &str = "http://maps.google.com/mapfiles/kml/paddle/ylw-blank.png";
pub const ICON_MUSEUM: &str = "http://maps.google.com/mapfiles/kml/paddle/pink-blank.png";
pub const ICON_VIEWPOINT: &str = "http://maps.google.com/mapfiles/kml/shapes/camera.png";
pub const ICON_CAMPING: &str = "http://maps.google.com/mapfiles/kml/paddle/grn-circle.png";
pub const ICON_SHOP: &str = "http://maps.google.com/mapfiles/kml/paddle/wht-blank.png";
pub const ICON_TREE: &str = "http://maps.google.com/mapfiles/kml/shapes/parks.png";
pub const ICON_PEAK: &str = "http://maps.google.com/mapfiles/kml/shapes/mountains.png";
pub const ICON_RAIL_STATION: &str = "http://maps.google.com/mapfiles/kml/shapes/rail.png";
pub const ICON_BUS: &str = "http://maps.google.com/mapfiles/kml/shapes/bus.png";
pub const ICON_DEFAULT: &str = "http://maps.google.com/mapfiles/kml/paddle/wht-circle.png";

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

type PaletteKey = (&'static str, &'static str);

pub(crate) static PALETTE: LazyLock<Vec<(PaletteKey, Style)>> = LazyLock::new(build_palette);

#[rustfmt::skip]
fn build_palette() -> Vec<(PaletteKey, Style)> {
    vec![
        // ---- Roads ----
        (("road", "motorway"),     Style::line("#E74C3C", 5.0)),
        (("road", "trunk"),        Style::line("#E67E22", 4.5)),
        (("road", "primary"),      Style::line("#F39C12", 4.0)),
        (("road", "secondary"),    Style::line("#F1C40F", 3.5)),
        (("road", "tertiary"),     Style::line("#FFFFFF", 3.0)),
        (("road", "residential"),  Style::line("#BDC3C7", 2.5)),
        (("road", "service"),      Style::line("#95A5A6", 2.0)),
        (("road", "unclassified"), Style::line("#BDC3C7", 2.0)),
        (("road", "footway"),      Style::line("#E88DB4", 1.5)),
        (("road", "cycleway"),     Style::line("#2980B9", 2.0)),
        (("road", "track"),        Style::line("#8B6914", 1.5)),
        (("road", "*"),            Style::line("#CCCCCC", 2.0)),

        // ---- Railways ----
        (("railway", "rail"),    Style::line("#2C3E50", 3.0).with_icon(ICON_RAIL_STATION)),
        (("railway", "subway"),  Style::line("#8E44AD", 3.0).with_icon(ICON_RAIL_STATION)),
        (("railway", "tram"),    Style::line("#C0392B", 2.0).with_icon(ICON_RAIL_STATION)),
        (("railway", "station"), Style::line("#2C3E50", 2.0).with_icon(ICON_RAIL_STATION).with_icon_scale(1.2)),
        (("railway", "*"),       Style::line("#2C3E50", 2.0).with_icon(ICON_RAIL_STATION)),

        // ---- Water ----
        (("water", "river"),  Style::line("#2980B9", 3.5).with_fill("#3498DB", "80")),
        (("water", "stream"), Style::line("#5DADE2", 2.0)),
        (("water", "lake"),   Style::line("#2471A3", 2.0).with_fill("#3498DB", "80")),
        (("water", "*"),      Style::line("#2980B9", 2.0).with_fill("#3498DB", "80")),

        // ---- Buildings ----
        (("building", "worship"),    Style::line("#8E44AD", 1.5).with_fill("#D2B4DE", "90").with_icon(ICON_WORSHIP)),
        (("building", "education"),  Style::line("#27AE60", 1.5).with_fill("#A9DFBF", "90").with_icon(ICON_SCHOOLS)),
        (("building", "hospital"),   Style::line("#E74C3C", 1.5).with_fill("#F5B7B1", "90").with_icon(ICON_HOSPITAL)),
        (("building", "commercial"), Style::line("#2980B9", 1.5).with_fill("#AED6F1", "90")),
        (("building", "industrial"), Style::line("#7F8C8D", 1.5).with_fill("#D5D8DC", "90")),
        (("building", "*"),          Style::line("#B0703C", 1.0).with_fill("#E8C9A0", "90")),

        // ---- Green spaces ----
        (("green", "park"),           Style::line("#27AE60", 2.0).with_fill("#2ECC71", "70").with_icon(ICON_TREE)),
        (("green", "forest"),         Style::line("#1E8449", 2.0).with_fill("#196F3D", "70")),
        (("green", "nature_reserve"), Style::line("#1ABC9C", 2.5).with_fill("#A3E4D7", "60")),
        (("green", "grass"),          Style::line("#82E0AA", 1.5).with_fill("#ABEBC6", "70")),
        (("green", "protected"),      Style::line("#1ABC9C", 3.0).with_fill("#A3E4D7", "50")),
        (("green", "*"),              Style::line("#27AE60", 1.5).with_fill("#2ECC71", "60")),

        // ---- Sport ----
        (("sport", "*"), Style::line("#F39C12", 2.0).with_fill("#F9E79F", "70")),

        // ---- Land use ----
        (("landuse", "residential"), Style::line("#D5D8DC", 1.0).with_fill("#EAECEE", "50")),
        (("landuse", "commercial"),  Style::line("#AED6F1", 1.0).with_fill("#D6EAF8", "50")),
        (("landuse", "industrial"),  Style::line("#ABB2B9", 1.0).with_fill("#D5D8DC", "50")),
        (("landuse", "farmland"),    Style::line("#F5CBA7", 1.0).with_fill("#FDEBD0", "50")),
        (("landuse", "cemetery"),    Style::line("#7D8B8A", 1.5).with_fill("#ABB2B9", "60")),
        (("landuse", "military"),    Style::line("#E74C3C", 2.5).with_fill("#F5B7B1", "40")),
        (("landuse", "*"),           Style::line("#D5D8DC", 1.0).with_fill("#EAECEE", "40")),

        // ---- Amenities ----
        (("amenity", "food"),      Style::line("#E67E22", 1.5).with_icon(ICON_DINING).with_icon_scale(1.1)),
        (("amenity", "education"), Style::line("#27AE60", 1.5).with_icon(ICON_SCHOOLS).with_icon_scale(1.1)),
        (("amenity", "health"),    Style::line("#E74C3C", 1.5).with_icon(ICON_HOSPITAL).with_icon_scale(1.1)),
        (("amenity", "transport"), Style::line("#3498DB", 1.5).with_icon(ICON_PARKING)),
        (("amenity", "emergency"), Style::line("#2980B9", 1.5).with_icon(ICON_POLICE).with_icon_scale(1.1)),
        (("amenity", "worship"),   Style::line("#8E44AD", 1.5).with_icon(ICON_WORSHIP).with_icon_scale(1.1)),
        (("amenity", "finance"),   Style::line("#2C3E50", 1.5).with_icon(ICON_SQUARE)),
        (("amenity", "*"),         Style::line("#E67E22", 1.5).with_icon(ICON_CIRCLE).with_icon_scale(0.9)),

        // ---- Tourism ----
        (("tourism", "accommodation"), Style::line("#F1C40F", 1.5).with_icon(ICON_HOTEL).with_icon_scale(1.1)),
        (("tourism", "culture"),       Style::line("#E91E8C", 1.5).with_icon(ICON_MUSEUM).with_icon_scale(1.1)),
        (("tourism", "viewpoint"),     Style::line("#3498DB", 1.5).with_icon(ICON_VIEWPOINT).with_icon_scale(1.1)),
        (("tourism", "camping"),       Style::line("#27AE60", 1.5).with_icon(ICON_CAMPING).with_icon_scale(1.1)),
        (("tourism", "*"),             Style::line("#F1C40F", 1.5).with_icon(ICON_STAR)),

        // ---- Shops ----
        (("shop", "*"), Style::line("#AF7AC5", 1.5).with_icon(ICON_SHOP)),

        // ---- Utilities ----
        (("utility", "power_line"),     Style::line("#7F8C8D", 1.5)),
        (("utility", "power_tower"),    Style::line("#7F8C8D", 1.0).with_icon(ICON_TRIANGLE).with_icon_scale(0.8)),
        (("utility", "power_facility"), Style::line("#F39C12", 2.0).with_fill("#F9E79F", "60")),
        (("utility", "*"),              Style::line("#7F8C8D", 1.5)),

        // ---- Barriers ----
        (("barrier", "linear"), Style::line("#616A6B", 1.5)),
        (("barrier", "access"), Style::line("#E74C3C", 1.0).with_icon(ICON_SQUARE).with_icon_scale(0.7)),
        (("barrier", "*"),      Style::line("#616A6B", 1.0)),

        // ---- Aeroway ----
        (("aeroway", "runway"),   Style::line("#2C3E50", 5.0).with_fill("#566573", "80")),
        (("aeroway", "terminal"), Style::line("#2C3E50", 2.0).with_fill("#ABB2B9", "80")),
        (("aeroway", "*"),        Style::line("#566573", 2.0)),

        // ---- Natural ----
        (("natural", "peak"),  Style::line("#784212", 1.0).with_icon(ICON_PEAK).with_icon_scale(1.2)),
        (("natural", "cliff"), Style::line("#784212", 2.5)),
        (("natural", "beach"), Style::line("#F9E79F", 1.5).with_fill("#FCF3CF", "70")),
        (("natural", "tree"),  Style::line("#196F3D", 1.0).with_icon(ICON_TREE).with_icon_scale(0.8)),
        (("natural", "*"),     Style::line("#7D6608", 1.5)),

        // ---- Boundaries ----
        (("boundary", "administrative"), Style::line("#8E44AD", 3.0)),
        (("boundary", "*"),              Style::line("#8E44AD", 2.0)),

        // ---- Public transport ----
        (("transport", "stop"), Style::line("#2980B9", 1.5).with_icon(ICON_BUS)),
        (("transport", "*"),    Style::line("#2980B9", 1.5).with_icon(ICON_BUS).with_icon_scale(0.9)),

        // ---- Fallback ----
        (("other", "*"), Style::line("#BDC3C7", 1.5).with_icon(ICON_DEFAULT).with_icon_scale(0.8)),
    ]
}
