//! Styled document assembly.
//!
//! Classifies every feature, resolves and deduplicates the styles the
//! document needs, groups placemarks by category, and builds the abstract
//! output tree. Output is deterministic: style blocks and category groups
//! are emitted in sorted order while placemarks keep their input order
//! within each group.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use atoc_classify::classify;
use atoc_kml::{KmlDocument, Placemark, PlacemarkGroup, StyleBlock};
use atoc_shared::{Classification, DEFAULT_DOCUMENT_NAME, DOCUMENT_DESCRIPTION, Feature};
use atoc_styles::{resolve, style_id};

use crate::sanitize::scrub;

/// Tag keys with these prefixes are internal bookkeeping, not display
/// metadata, and are excluded from description tables.
const SKIP_TAG_PREFIXES: &[&str] = &["@", "id", "source"];

/// Human-readable folder labels per category.
const FOLDER_LABELS: &[(&str, &str)] = &[
    ("road", "Roads"),
    ("railway", "Railways"),
    ("water", "Water"),
    ("building", "Buildings"),
    ("green", "Green Spaces"),
    ("sport", "Sports"),
    ("landuse", "Land Use"),
    ("amenity", "Amenities"),
    ("tourism", "Tourism"),
    ("shop", "Shops"),
    ("utility", "Utilities"),
    ("barrier", "Barriers"),
    ("aeroway", "Aeroways"),
    ("natural", "Natural Features"),
    ("boundary", "Boundaries"),
    ("transport", "Public Transport"),
    ("other", "Other"),
];

/// Options for document assembly. All options compose independently.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Group placemarks into per-category folders.
    pub use_folders: bool,
    /// Document display name (sanitized before emission).
    pub document_name: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            use_folders: true,
            document_name: DEFAULT_DOCUMENT_NAME.into(),
        }
    }
}

/// Assemble a styled output document from extracted features.
///
/// Runs the full classification → style resolution → grouping pipeline.
/// Pure over its inputs: the same feature sequence and options always
/// produce an identical tree.
#[instrument(skip_all, fields(features = features.len()))]
pub fn assemble(features: &[Feature], options: &AssembleOptions) -> KmlDocument {
    // Classify everything up front, preserving input order.
    let mut classified: Vec<(&Feature, Classification, String)> =
        Vec::with_capacity(features.len());
    // One style block per style id; the first feature seen with an id fixes
    // the geometry-kind variant that gets emitted. BTreeMap keeps emission
    // sorted by id regardless of input order.
    let mut needed_styles: BTreeMap<String, StyleBlock> = BTreeMap::new();

    for feature in features {
        let classification = classify(&feature.tags);
        let sid = style_id(classification.category, classification.subcategory);

        needed_styles.entry(sid.clone()).or_insert_with(|| StyleBlock {
            id: sid.clone(),
            style: resolve(classification.category, classification.subcategory),
            kind: feature.kind,
        });

        classified.push((feature, classification, sid));
    }

    // Group by category, sorted; input order is preserved within each group.
    let mut by_category: BTreeMap<&'static str, Vec<&(&Feature, Classification, String)>> =
        BTreeMap::new();
    for entry in &classified {
        by_category.entry(entry.1.category).or_default().push(entry);
    }

    let groups = if options.use_folders {
        by_category
            .into_iter()
            .map(|(category, entries)| PlacemarkGroup {
                label: Some(folder_label(category)),
                placemarks: entries
                    .into_iter()
                    .map(|(feature, classification, sid)| {
                        build_placemark(feature, *classification, sid)
                    })
                    .collect(),
            })
            .collect()
    } else {
        let placemarks = by_category
            .into_values()
            .flatten()
            .map(|(feature, classification, sid)| build_placemark(feature, *classification, sid))
            .collect();
        vec![PlacemarkGroup {
            label: None,
            placemarks,
        }]
    };

    let name = match scrub(&options.document_name) {
        name if name.is_empty() => DEFAULT_DOCUMENT_NAME.to_string(),
        name => name,
    };

    debug!(
        styles = needed_styles.len(),
        groups = groups.len(),
        "document assembled"
    );

    KmlDocument {
        name,
        description: DOCUMENT_DESCRIPTION.into(),
        styles: needed_styles.into_values().collect(),
        groups,
    }
}

// ---------------------------------------------------------------------------
// Placemark construction
// ---------------------------------------------------------------------------

/// Build one output placemark from a classified feature.
fn build_placemark(feature: &Feature, classification: Classification, sid: &str) -> Placemark {
    let name = match scrub(&feature.name) {
        name if name.is_empty() => title_case(&classification.subcategory.replace('_', " ")),
        name => name,
    };

    Placemark {
        name,
        description: tag_table(&feature.tags),
        style_id: sid.to_string(),
        geometry: feature.geometry.clone(),
    }
}

/// Render display-worthy tags as an HTML table, sorted by key.
///
/// Returns `None` when no tags survive the reserved-prefix filter; an
/// empty description block is omitted, not emitted.
fn tag_table(tags: &BTreeMap<String, String>) -> Option<String> {
    let mut rows = String::new();
    for (key, value) in tags {
        if SKIP_TAG_PREFIXES.iter().any(|p| key.starts_with(p)) {
            continue;
        }
        rows.push_str(&format!("<tr><td><b>{key}</b></td><td>{value}</td></tr>"));
    }

    if rows.is_empty() {
        None
    } else {
        Some(format!("<table>{rows}</table>"))
    }
}

/// Folder label for a category, falling back to a title-cased rendering of
/// the raw category string.
fn folder_label(category: &str) -> String {
    FOLDER_LABELS
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| title_case(category))
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use atoc_shared::GeometryKind;

    fn make_feature(name: &str, kind: GeometryKind, tags: &[(&str, &str)]) -> Feature {
        Feature {
            name: name.into(),
            kind,
            geometry: match kind {
                GeometryKind::Point => "<Point><coordinates>1,2,0</coordinates></Point>".into(),
                _ => "<LineString><coordinates>0,0 1,1</coordinates></LineString>".into(),
            },
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            osm_id: None,
        }
    }

    #[test]
    fn duplicate_classifications_share_one_style_block() {
        let features = vec![
            make_feature("Joe's Pizza", GeometryKind::Point, &[("amenity", "restaurant")]),
            make_feature("Luigi's", GeometryKind::Point, &[("amenity", "restaurant")]),
        ];

        let doc = assemble(&features, &AssembleOptions::default());
        assert_eq!(doc.styles.len(), 1);
        assert_eq!(doc.styles[0].id, "style-amenity-food");

        // Both placemarks still reference the shared block.
        let placemarks = &doc.groups[0].placemarks;
        assert_eq!(placemarks.len(), 2);
        assert!(placemarks.iter().all(|p| p.style_id == "style-amenity-food"));
    }

    #[test]
    fn first_seen_geometry_kind_wins_for_style_block() {
        let features = vec![
            make_feature("A", GeometryKind::LineString, &[("highway", "primary")]),
            make_feature("B", GeometryKind::Point, &[("highway", "primary")]),
        ];

        let doc = assemble(&features, &AssembleOptions::default());
        assert_eq!(doc.styles.len(), 1);
        assert_eq!(doc.styles[0].kind, GeometryKind::LineString);
    }

    #[test]
    fn style_blocks_sorted_regardless_of_input_order() {
        let a = make_feature("Road", GeometryKind::LineString, &[("highway", "motorway")]);
        let b = make_feature("Cafe", GeometryKind::Point, &[("amenity", "cafe")]);

        let forward = assemble(
            &[a.clone(), b.clone()],
            &AssembleOptions::default(),
        );
        let reversed = assemble(&[b, a], &AssembleOptions::default());

        let forward_ids: Vec<&str> = forward.styles.iter().map(|s| s.id.as_str()).collect();
        let reversed_ids: Vec<&str> = reversed.styles.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(forward_ids, reversed_ids);
        assert_eq!(forward_ids, vec!["style-amenity-food", "style-road-motorway"]);
    }

    #[test]
    fn features_grouped_by_category_with_labels() {
        let features = vec![
            make_feature("Main Street", GeometryKind::LineString, &[("highway", "primary")]),
            make_feature("Joe's Pizza", GeometryKind::Point, &[("amenity", "restaurant")]),
            make_feature("Side Street", GeometryKind::LineString, &[("highway", "residential")]),
        ];

        let doc = assemble(&features, &AssembleOptions::default());

        // Categories in sorted order: amenity before road.
        let labels: Vec<&str> = doc
            .groups
            .iter()
            .filter_map(|g| g.label.as_deref())
            .collect();
        assert_eq!(labels, vec!["Amenities", "Roads"]);

        // Input order preserved within the road group.
        let roads = &doc.groups[1].placemarks;
        assert_eq!(roads[0].name, "Main Street");
        assert_eq!(roads[1].name, "Side Street");
    }

    #[test]
    fn unknown_category_label_is_title_cased() {
        assert_eq!(folder_label("road"), "Roads");
        assert_eq!(folder_label("something_else"), "Something_else");
        assert_eq!(folder_label("other"), "Other");
    }

    #[test]
    fn no_folders_emits_single_flat_group() {
        let features = vec![
            make_feature("Main Street", GeometryKind::LineString, &[("highway", "primary")]),
            make_feature("Joe's Pizza", GeometryKind::Point, &[("amenity", "restaurant")]),
        ];

        let options = AssembleOptions {
            use_folders: false,
            ..Default::default()
        };
        let doc = assemble(&features, &options);

        assert_eq!(doc.groups.len(), 1);
        assert!(doc.groups[0].label.is_none());
        assert_eq!(doc.groups[0].placemarks.len(), 2);
        // Style linkage survives flat mode.
        assert!(doc.groups[0]
            .placemarks
            .iter()
            .all(|p| !p.style_id.is_empty()));
    }

    #[test]
    fn assembly_is_deterministic() {
        let features = vec![
            make_feature("Park", GeometryKind::Polygon, &[("leisure", "park")]),
            make_feature("Lake", GeometryKind::Polygon, &[("natural", "water")]),
            make_feature("Street", GeometryKind::LineString, &[("highway", "service")]),
        ];

        let first = assemble(&features, &AssembleOptions::default());
        let second = assemble(&features, &AssembleOptions::default());

        assert_eq!(first.name, second.name);
        assert_eq!(
            first.styles.iter().map(|s| &s.id).collect::<Vec<_>>(),
            second.styles.iter().map(|s| &s.id).collect::<Vec<_>>()
        );
        for (a, b) in first.groups.iter().zip(&second.groups) {
            assert_eq!(a.label, b.label);
            let a_names: Vec<&str> = a.placemarks.iter().map(|p| p.name.as_str()).collect();
            let b_names: Vec<&str> = b.placemarks.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(a_names, b_names);
        }
    }

    #[test]
    fn empty_name_falls_back_to_subcategory() {
        let features = vec![make_feature("", GeometryKind::Point, &[("natural", "peak")])];
        let doc = assemble(&features, &AssembleOptions::default());
        assert_eq!(doc.groups[0].placemarks[0].name, "Peak");
    }

    #[test]
    fn sanitized_away_name_falls_back_to_subcategory() {
        let features = vec![make_feature(
            "Exported from Overpass Turbo",
            GeometryKind::Polygon,
            &[("leisure", "nature_reserve")],
        )];
        let doc = assemble(&features, &AssembleOptions::default());
        assert_eq!(doc.groups[0].placemarks[0].name, "Nature Reserve");
    }

    #[test]
    fn description_rows_sorted_and_filtered() {
        let features = vec![make_feature(
            "Joe's Pizza",
            GeometryKind::Point,
            &[
                ("cuisine", "pizza"),
                ("amenity", "restaurant"),
                ("@id", "node/42"),
                ("id", "legacy"),
                ("source", "survey"),
            ],
        )];

        let doc = assemble(&features, &AssembleOptions::default());
        let description = doc.groups[0].placemarks[0].description.as_deref().unwrap();

        assert_eq!(
            description,
            "<table><tr><td><b>amenity</b></td><td>restaurant</td></tr>\
             <tr><td><b>cuisine</b></td><td>pizza</td></tr></table>"
        );
    }

    #[test]
    fn all_tags_filtered_omits_description() {
        let features = vec![make_feature(
            "Anonymous",
            GeometryKind::Point,
            &[("@id", "node/42"), ("source", "survey")],
        )];

        let doc = assemble(&features, &AssembleOptions::default());
        assert!(doc.groups[0].placemarks[0].description.is_none());
    }

    #[test]
    fn geometry_copied_verbatim() {
        let features = vec![make_feature(
            "Main Street",
            GeometryKind::LineString,
            &[("highway", "primary")],
        )];
        let doc = assemble(&features, &AssembleOptions::default());
        assert_eq!(
            doc.groups[0].placemarks[0].geometry,
            "<LineString><coordinates>0,0 1,1</coordinates></LineString>"
        );
    }

    #[test]
    fn document_title_sanitized_with_fallback() {
        let features = vec![];

        let custom = assemble(
            &features,
            &AssembleOptions {
                document_name: "My Neighborhood".into(),
                ..Default::default()
            },
        );
        assert_eq!(custom.name, "My Neighborhood");

        let scrubbed = assemble(
            &features,
            &AssembleOptions {
                document_name: "overpass turbo".into(),
                ..Default::default()
            },
        );
        assert_eq!(scrubbed.name, DEFAULT_DOCUMENT_NAME);
    }

    #[test]
    fn unmatched_features_land_in_other() {
        let features = vec![make_feature("Mystery", GeometryKind::Point, &[("foo", "bar")])];
        let doc = assemble(&features, &AssembleOptions::default());

        assert_eq!(doc.groups[0].label.as_deref(), Some("Other"));
        assert_eq!(doc.styles[0].id, "style-other-unknown");
    }

    #[test]
    fn motorway_line_gets_road_folder_and_widest_style() {
        let features = vec![make_feature(
            "A100",
            GeometryKind::LineString,
            &[("highway", "motorway")],
        )];
        let doc = assemble(&features, &AssembleOptions::default());

        assert_eq!(doc.groups[0].label.as_deref(), Some("Roads"));
        assert_eq!(doc.styles[0].id, "style-road-motorway");
        assert_eq!(doc.styles[0].style.line_width, 5.0);
        assert_eq!(doc.styles[0].kind, GeometryKind::LineString);
    }

    #[test]
    fn water_polygon_resolves_to_filled_lake_style() {
        let mut feature = make_feature("Old Town Lake", GeometryKind::Polygon, &[("natural", "water")]);
        feature.geometry = "<Polygon><outerBoundaryIs/></Polygon>".into();

        let doc = assemble(&[feature], &AssembleOptions::default());

        assert_eq!(doc.groups[0].label.as_deref(), Some("Water"));
        assert_eq!(doc.styles[0].id, "style-water-lake");
        assert!(doc.styles[0].style.poly_color.is_some());
    }

    #[test]
    fn title_case_capitalizes_words() {
        assert_eq!(title_case("nature reserve"), "Nature Reserve");
        assert_eq!(title_case("peak"), "Peak");
        assert_eq!(title_case(""), "");
    }
}
