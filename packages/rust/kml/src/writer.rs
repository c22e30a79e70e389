//! KML output serialization.
//!
//! Renders an assembled [`KmlDocument`] tree to namespaced KML text with an
//! XML declaration and indentation. Geometry payloads are written through
//! unescaped, since they are already markup.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use atoc_shared::{AtocError, GeometryKind, Result};

use crate::document::{KmlDocument, Placemark, StyleBlock};

/// The KML 2.2 namespace.
pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a document tree to a KML string.
pub fn write_kml(doc: &KmlDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ser)?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NS));
    writer.write_event(Event::Start(kml)).map_err(ser)?;
    writer
        .write_event(Event::Start(BytesStart::new("Document")))
        .map_err(ser)?;

    text_element(&mut writer, "name", &doc.name)?;
    text_element(&mut writer, "description", &doc.description)?;

    for block in &doc.styles {
        write_style(&mut writer, block)?;
    }

    for group in &doc.groups {
        match &group.label {
            Some(label) => {
                writer
                    .write_event(Event::Start(BytesStart::new("Folder")))
                    .map_err(ser)?;
                text_element(&mut writer, "name", label)?;
                for placemark in &group.placemarks {
                    write_placemark(&mut writer, placemark)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new("Folder")))
                    .map_err(ser)?;
            }
            None => {
                for placemark in &group.placemarks {
                    write_placemark(&mut writer, placemark)?;
                }
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("Document")))
        .map_err(ser)?;
    writer
        .write_event(Event::End(BytesEnd::new("kml")))
        .map_err(ser)?;

    let bytes = writer.into_inner();
    debug!(bytes = bytes.len(), "serialized KML document");

    String::from_utf8(bytes).map_err(|e| AtocError::serialize(format!("output not UTF-8: {e}")))
}

// ---------------------------------------------------------------------------
// Element writers
// ---------------------------------------------------------------------------

/// Build a `<Style id="...">` block.
///
/// IconStyle is only meaningful for points and PolyStyle only for polygons;
/// LabelStyle and LineStyle are always present.
fn write_style(writer: &mut XmlWriter, block: &StyleBlock) -> Result<()> {
    let style = block.style;

    let mut start = BytesStart::new("Style");
    start.push_attribute(("id", block.id.as_str()));
    writer.write_event(Event::Start(start)).map_err(ser)?;

    if block.kind == GeometryKind::Point {
        if let Some(href) = &style.icon_href {
            writer
                .write_event(Event::Start(BytesStart::new("IconStyle")))
                .map_err(ser)?;
            text_element(writer, "scale", &style.icon_scale.to_string())?;
            text_element(writer, "color", &style.line_color)?;
            writer
                .write_event(Event::Start(BytesStart::new("Icon")))
                .map_err(ser)?;
            text_element(writer, "href", href)?;
            writer
                .write_event(Event::End(BytesEnd::new("Icon")))
                .map_err(ser)?;
            writer
                .write_event(Event::End(BytesEnd::new("IconStyle")))
                .map_err(ser)?;
        }
    }

    writer
        .write_event(Event::Start(BytesStart::new("LabelStyle")))
        .map_err(ser)?;
    text_element(writer, "color", &style.label_color)?;
    text_element(writer, "scale", &style.label_scale.to_string())?;
    writer
        .write_event(Event::End(BytesEnd::new("LabelStyle")))
        .map_err(ser)?;

    writer
        .write_event(Event::Start(BytesStart::new("LineStyle")))
        .map_err(ser)?;
    text_element(writer, "color", &style.line_color)?;
    text_element(writer, "width", &style.line_width.to_string())?;
    writer
        .write_event(Event::End(BytesEnd::new("LineStyle")))
        .map_err(ser)?;

    if block.kind == GeometryKind::Polygon {
        if let Some(poly_color) = &style.poly_color {
            writer
                .write_event(Event::Start(BytesStart::new("PolyStyle")))
                .map_err(ser)?;
            text_element(writer, "color", poly_color)?;
            text_element(writer, "fill", if style.poly_fill { "1" } else { "0" })?;
            text_element(writer, "outline", if style.poly_outline { "1" } else { "0" })?;
            writer
                .write_event(Event::End(BytesEnd::new("PolyStyle")))
                .map_err(ser)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("Style")))
        .map_err(ser)?;
    Ok(())
}

/// Build a styled `<Placemark>` element.
fn write_placemark(writer: &mut XmlWriter, placemark: &Placemark) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("Placemark")))
        .map_err(ser)?;

    text_element(writer, "name", &placemark.name)?;
    if let Some(description) = &placemark.description {
        text_element(writer, "description", description)?;
    }
    text_element(writer, "styleUrl", &format!("#{}", placemark.style_id))?;

    // The geometry is already markup; write it through unescaped.
    writer
        .write_event(Event::Text(BytesText::from_escaped(
            placemark.geometry.as_str(),
        )))
        .map_err(ser)?;

    writer
        .write_event(Event::End(BytesEnd::new("Placemark")))
        .map_err(ser)?;
    Ok(())
}

/// Append a child element containing escaped text.
fn text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(ser)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(ser)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(ser)?;
    Ok(())
}

fn ser<E: std::fmt::Display>(err: E) -> AtocError {
    AtocError::serialize(err.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PlacemarkGroup;
    use atoc_styles::{resolve, style_id};

    fn point_placemark(name: &str, sid: &str) -> Placemark {
        Placemark {
            name: name.into(),
            description: None,
            style_id: sid.into(),
            geometry: "<Point><coordinates>13.4,52.5,0</coordinates></Point>".into(),
        }
    }

    fn make_doc(groups: Vec<PlacemarkGroup>, styles: Vec<StyleBlock>) -> KmlDocument {
        KmlDocument {
            name: "ATOC Export".into(),
            description: "Processed by ATOC".into(),
            styles,
            groups,
        }
    }

    #[test]
    fn writes_namespaced_root_and_declaration() {
        let doc = make_doc(vec![], vec![]);
        let kml = write_kml(&doc).unwrap();

        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(kml.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
        assert!(kml.contains("<name>ATOC Export</name>"));
        assert!(kml.contains("<description>Processed by ATOC</description>"));
    }

    #[test]
    fn writes_folder_groups() {
        let sid = style_id("amenity", "food");
        let doc = make_doc(
            vec![PlacemarkGroup {
                label: Some("Amenities".into()),
                placemarks: vec![point_placemark("Joe's Pizza", &sid)],
            }],
            vec![StyleBlock {
                id: sid.clone(),
                style: resolve("amenity", "food"),
                kind: atoc_shared::GeometryKind::Point,
            }],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(kml.contains("<Folder>"));
        assert!(kml.contains("<name>Amenities</name>"));
        assert!(kml.contains("<styleUrl>#style-amenity-food</styleUrl>"));
        assert!(kml.contains("<coordinates>13.4,52.5,0</coordinates>"));
    }

    #[test]
    fn flat_group_has_no_folder() {
        let doc = make_doc(
            vec![PlacemarkGroup {
                label: None,
                placemarks: vec![point_placemark("Somewhere", "style-other-unknown")],
            }],
            vec![],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(!kml.contains("<Folder>"));
        assert!(kml.contains("<Placemark>"));
    }

    #[test]
    fn point_style_gets_icon_style() {
        let doc = make_doc(
            vec![],
            vec![StyleBlock {
                id: style_id("amenity", "food"),
                style: resolve("amenity", "food"),
                kind: atoc_shared::GeometryKind::Point,
            }],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(kml.contains("<Style id=\"style-amenity-food\">"));
        assert!(kml.contains("<IconStyle>"));
        assert!(kml.contains("dining.png"));
        assert!(!kml.contains("<PolyStyle>"));
    }

    #[test]
    fn polygon_style_gets_poly_style_not_icon() {
        let doc = make_doc(
            vec![],
            vec![StyleBlock {
                id: style_id("water", "lake"),
                style: resolve("water", "lake"),
                kind: atoc_shared::GeometryKind::Polygon,
            }],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(kml.contains("<PolyStyle>"));
        assert!(kml.contains("<fill>1</fill>"));
        assert!(!kml.contains("<IconStyle>"));
    }

    #[test]
    fn line_style_always_present() {
        let doc = make_doc(
            vec![],
            vec![StyleBlock {
                id: style_id("road", "motorway"),
                style: resolve("road", "motorway"),
                kind: atoc_shared::GeometryKind::LineString,
            }],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(kml.contains("<LineStyle>"));
        assert!(kml.contains("<width>5</width>"));
        assert!(kml.contains("<LabelStyle>"));
    }

    #[test]
    fn placemark_name_is_escaped() {
        let doc = make_doc(
            vec![PlacemarkGroup {
                label: None,
                placemarks: vec![point_placemark("Fish & Chips", "style-amenity-food")],
            }],
            vec![],
        );

        let kml = write_kml(&doc).unwrap();
        assert!(kml.contains("Fish &amp; Chips"));
    }

    #[test]
    fn output_is_reparseable() {
        let sid = style_id("amenity", "food");
        let doc = make_doc(
            vec![PlacemarkGroup {
                label: Some("Amenities".into()),
                placemarks: vec![point_placemark("Joe's Pizza", &sid)],
            }],
            vec![],
        );

        let kml = write_kml(&doc).unwrap();
        let features = crate::reader::parse_kml(&kml).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "Joe's Pizza");
    }
}
