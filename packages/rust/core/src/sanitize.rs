//! Provenance text scrubbing.
//!
//! Output documents are branded as ATOC; references to the tools that
//! produced the source export (Overpass Turbo, Overpass API, osmtogeojson,
//! and friends) are stripped from free text. This is a denylist filter:
//! text without a match passes through untouched, matches are removed
//! in place, and the result is trimmed.

use std::sync::LazyLock;

use regex::Regex;

static PROVENANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)exported?\s+from\s+overpass[\s_-]*(?:turbo|api)?|generated?\s+by\s+overpass[\s_-]*(?:turbo|api)?|overpass[\s_-]*turbo|overpass[\s_-]*api|overpass|osmtogeojson|openstreetmap\s*export|osm\s*export|tokml",
    )
    .expect("valid regex")
});

/// Remove export-tool references from a string and trim the remainder.
pub fn scrub(text: &str) -> String {
    PROVENANCE_RE.replace_all(text, "").trim().to_string()
}
