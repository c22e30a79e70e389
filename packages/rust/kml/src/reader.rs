//! KML/KMZ input extraction.
//!
//! Pulls flat [`Feature`] records out of a KML document: placemark name,
//! first recognized geometry element (captured verbatim), and OSM tags from
//! `ExtendedData/Data` elements. Element matching goes through local names,
//! so prefixed and default-namespace documents both work.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use atoc_shared::{AtocError, Feature, GeometryKind, Result};

/// Parse a KML string and return the extracted features.
///
/// Placemarks without a recognized geometry element are skipped.
pub fn parse_kml(xml: &str) -> Result<Vec<Feature>> {
    let mut reader = Reader::from_str(xml);
    let mut features = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"Placemark" => {
                if let Some(feature) = parse_placemark(&mut reader, xml)? {
                    features.push(feature);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(&reader, e)),
        }
    }

    debug!(count = features.len(), "extracted placemarks");
    Ok(features)
}

/// Read a `.kml` or `.kmz` file from disk and parse it.
pub fn read_kml_file(path: &Path) -> Result<Vec<Feature>> {
    let is_kmz = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("kmz"));

    let content = if is_kmz {
        read_kmz(path)?
    } else {
        std::fs::read_to_string(path).map_err(|e| AtocError::io(path, e))?
    };

    parse_kml(&content)
}

/// Extract the KML content from a KMZ (ZIP) archive.
///
/// Per the KMZ convention, the first `.kml` entry found is the document.
fn read_kmz(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|e| AtocError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AtocError::parse(format!("{}: not a KMZ archive: {e}", path.display())))?;

    let entry_names: Vec<String> = archive.file_names().map(String::from).collect();
    let kml_entry = entry_names
        .iter()
        .find(|name| name.to_lowercase().ends_with(".kml"))
        .ok_or_else(|| {
            AtocError::parse(format!("no .kml file found inside {}", path.display()))
        })?;

    let mut entry = archive
        .by_name(kml_entry)
        .map_err(|e| AtocError::parse(format!("{}: {e}", path.display())))?;

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| AtocError::io(path, e))?;

    debug!(entry = %kml_entry, bytes = content.len(), "read KMZ entry");
    Ok(content)
}

// ---------------------------------------------------------------------------
// Placemark extraction
// ---------------------------------------------------------------------------

/// Parse one `<Placemark>` subtree. The opening tag has already been
/// consumed. Returns `None` when the placemark carries no geometry.
fn parse_placemark(reader: &mut Reader<&[u8]>, xml: &str) -> Result<Option<Feature>> {
    let mut name = String::new();
    let mut tags: BTreeMap<String, String> = BTreeMap::new();
    let mut geometry: Option<(GeometryKind, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"name" {
                    name = read_element_text(reader, &e)?;
                } else if e.local_name().as_ref() == b"ExtendedData" {
                    parse_extended_data(reader, &mut tags)?;
                } else if let Some(kind) = geometry_kind(&e) {
                    if geometry.is_none() {
                        geometry = Some((kind, capture_raw(reader, &e, xml)?));
                    } else {
                        skip_element(reader, &e)?;
                    }
                } else {
                    skip_element(reader, &e)?;
                }
            }
            Ok(Event::Empty(e)) => {
                if geometry.is_none() {
                    if let Some(kind) = geometry_kind(&e) {
                        let raw = format!("<{}/>", String::from_utf8_lossy(e.as_ref()));
                        geometry = Some((kind, raw));
                    }
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Placemark" => break,
            Ok(Event::Eof) => {
                return Err(AtocError::parse("unexpected end of document inside <Placemark>"));
            }
            Ok(_) => {}
            Err(e) => return Err(malformed(reader, e)),
        }
    }

    let Some((kind, raw)) = geometry else {
        return Ok(None);
    };

    let osm_id = tags.get("@id").or_else(|| tags.get("id")).cloned();

    Ok(Some(Feature {
        name,
        kind,
        geometry: raw,
        tags,
        osm_id,
    }))
}

/// Parse an `<ExtendedData>` subtree into the tag map.
fn parse_extended_data(
    reader: &mut Reader<&[u8]>,
    tags: &mut BTreeMap<String, String>,
) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"Data" => {
                let key = e
                    .try_get_attribute("name")
                    .map_err(|err| AtocError::parse(format!("bad Data attribute: {err}")))?
                    .map(|attr| {
                        attr.unescape_value()
                            .map(|value| value.into_owned())
                            .map_err(|err| {
                                AtocError::parse(format!("bad Data attribute value: {err}"))
                            })
                    })
                    .transpose()?;

                let value = parse_data_value(reader)?;

                if let (Some(key), Some(value)) = (key, value) {
                    if !key.is_empty() && !value.is_empty() {
                        tags.insert(key, value);
                    }
                }
            }
            Ok(Event::Start(e)) => skip_element(reader, &e)?,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"ExtendedData" => break,
            Ok(Event::Eof) => {
                return Err(AtocError::parse(
                    "unexpected end of document inside <ExtendedData>",
                ));
            }
            Ok(_) => {}
            Err(e) => return Err(malformed(reader, e)),
        }
    }
    Ok(())
}

/// Read the `<value>` child of a `<Data>` element, consuming through `</Data>`.
fn parse_data_value(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut value = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"value" => {
                value = Some(read_element_text(reader, &e)?);
            }
            Ok(Event::Start(e)) => skip_element(reader, &e)?,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Data" => break,
            Ok(Event::Eof) => {
                return Err(AtocError::parse("unexpected end of document inside <Data>"));
            }
            Ok(_) => {}
            Err(e) => return Err(malformed(reader, e)),
        }
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a start tag to a geometry kind, if it is one.
fn geometry_kind(start: &BytesStart) -> Option<GeometryKind> {
    std::str::from_utf8(start.local_name().as_ref())
        .ok()
        .and_then(GeometryKind::from_local_name)
}

/// Read the trimmed, unescaped text content of the current element.
fn read_element_text(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<String> {
    reader
        .read_text(start.name())
        .map(|text| text.trim().to_string())
        .map_err(|e| AtocError::parse(format!("bad text content: {e}")))
}

/// Capture an element subtree as verbatim markup, including its tags.
fn capture_raw(reader: &mut Reader<&[u8]>, start: &BytesStart, xml: &str) -> Result<String> {
    let open = String::from_utf8_lossy(start.as_ref()).into_owned();
    let qname = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let span = reader
        .read_to_end(start.name())
        .map_err(|e| AtocError::parse(format!("unclosed <{qname}> element: {e}")))?;
    let inner = &xml[span.start as usize..span.end as usize];

    Ok(format!("<{open}>{inner}</{qname}>"))
}

/// Skip an element subtree entirely.
fn skip_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<()> {
    let qname = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    reader
        .read_to_end(start.name())
        .map(|_| ())
        .map_err(|e| AtocError::parse(format!("unclosed <{qname}> element: {e}")))
}

fn malformed(reader: &Reader<&[u8]>, err: quick_xml::Error) -> AtocError {
    AtocError::parse(format!(
        "malformed KML at byte {}: {err}",
        reader.buffer_position()
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    const INLINE_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Test Point</name>
      <ExtendedData>
        <Data name="amenity"><value>bench</value></Data>
      </ExtendedData>
      <Point><coordinates>1.0,2.0,0</coordinates></Point>
    </Placemark>
  </Document>
</kml>"#;

    #[test]
    fn parse_inline_kml() {
        let features = parse_kml(INLINE_KML).unwrap();
        assert_eq!(features.len(), 1);

        let f = &features[0];
        assert_eq!(f.name, "Test Point");
        assert_eq!(f.kind, GeometryKind::Point);
        assert_eq!(f.tag("amenity"), Some("bench"));
        assert_eq!(f.geometry, "<Point><coordinates>1.0,2.0,0</coordinates></Point>");
    }

    #[test]
    fn placemark_without_geometry_skipped() {
        let kml = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>No geometry</name>
    </Placemark>
  </Document>
</kml>"#;
        let features = parse_kml(kml).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn first_geometry_wins() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark>
    <name>Two geometries</name>
    <LineString><coordinates>0,0 1,1</coordinates></LineString>
    <Point><coordinates>5,5</coordinates></Point>
  </Placemark>
</Document></kml>"#;
        let features = parse_kml(kml).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, GeometryKind::LineString);
    }

    #[test]
    fn multi_geometry_captured_whole() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark>
    <name>Compound</name>
    <MultiGeometry><Point><coordinates>1,1</coordinates></Point><Point><coordinates>2,2</coordinates></Point></MultiGeometry>
  </Placemark>
</Document></kml>"#;
        let features = parse_kml(kml).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, GeometryKind::MultiGeometry);
        assert!(features[0].geometry.starts_with("<MultiGeometry>"));
        assert!(features[0].geometry.ends_with("</MultiGeometry>"));
        assert_eq!(features[0].geometry.matches("<Point>").count(), 2);
    }

    #[test]
    fn osm_id_extracted_from_at_id_tag() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark>
    <name>Way</name>
    <ExtendedData>
      <Data name="@id"><value>way/12345</value></Data>
      <Data name="highway"><value>primary</value></Data>
    </ExtendedData>
    <LineString><coordinates>0,0 1,1</coordinates></LineString>
  </Placemark>
</Document></kml>"#;
        let features = parse_kml(kml).unwrap();
        assert_eq!(features[0].osm_id.as_deref(), Some("way/12345"));
    }

    #[test]
    fn tag_values_unescaped() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark>
    <name>Caf&#233; Corner</name>
    <ExtendedData>
      <Data name="name"><value>Fish &amp; Chips</value></Data>
    </ExtendedData>
    <Point><coordinates>0,0</coordinates></Point>
  </Placemark>
</Document></kml>"#;
        let features = parse_kml(kml).unwrap();
        assert_eq!(features[0].name, "Café Corner");
        assert_eq!(features[0].tag("name"), Some("Fish & Chips"));
    }

    #[test]
    fn malformed_kml_is_an_error() {
        let result = parse_kml("<kml><Document><Placemark><name>broken");
        assert!(result.is_err());
    }

    #[test]
    fn parse_sample_fixture() {
        let features = read_kml_file(&fixture_path("kml/overpass-sample.kml")).unwrap();
        assert_eq!(features.len(), 10);

        let by_name = |name: &str| {
            features
                .iter()
                .find(|f| f.name == name)
                .unwrap_or_else(|| panic!("missing feature {name}"))
        };

        assert_eq!(by_name("Main Street").kind, GeometryKind::LineString);
        assert_eq!(by_name("City Library").kind, GeometryKind::Polygon);
        assert_eq!(by_name("Joe's Pizza").kind, GeometryKind::Point);
        assert_eq!(by_name("Riverside Park").kind, GeometryKind::Polygon);

        let pizza = by_name("Joe's Pizza");
        assert_eq!(pizza.tag("amenity"), Some("restaurant"));
        assert_eq!(pizza.tag("cuisine"), Some("pizza"));

        assert_eq!(by_name("Main Street").osm_id.as_deref(), Some("way/12345"));
    }

    #[test]
    fn read_kmz_archive() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let kmz_path = dir.path().join("export.kmz");

        let file = std::fs::File::create(&kmz_path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        archive.start_file("doc.kml", options).unwrap();
        archive.write_all(INLINE_KML.as_bytes()).unwrap();
        archive.finish().unwrap();

        let features = read_kml_file(&kmz_path).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "Test Point");
    }

    #[test]
    fn kmz_without_kml_entry_is_an_error() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let kmz_path = dir.path().join("empty.kmz");

        let file = std::fs::File::create(&kmz_path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        archive.start_file("readme.txt", options).unwrap();
        archive.write_all(b"nothing here").unwrap();
        archive.finish().unwrap();

        let err = read_kml_file(&kmz_path).unwrap_err();
        assert!(err.to_string().contains("no .kml file"));
    }
}
