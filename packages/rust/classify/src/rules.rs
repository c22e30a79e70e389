//! The ordered classification rule table.
//!
//! Rules are checked top-to-bottom; the first match wins. The sequence is the
//! precedence policy: a feature tagged with both `highway` and `building`
//! lands in the road category because highway rules come first. Within one
//! tag key, specific value sets must precede that key's catch-all or the
//! catch-all shadows them.

/// How a rule matches a tag value.
#[derive(Debug, Clone, Copy)]
pub enum ValueMatch {
    /// Any value for the key matches.
    Any,
    /// The tag value must be one of these.
    OneOf(&'static [&'static str]),
}

impl ValueMatch {
    /// Whether this matcher accepts the given tag value.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(values) => values.contains(&value),
        }
    }
}

/// One entry in the rule table: a tag key, a value matcher, and the
/// classification assigned on match.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    pub values: ValueMatch,
    pub category: &'static str,
    pub subcategory: &'static str,
}

const fn rule(
    key: &'static str,
    values: ValueMatch,
    category: &'static str,
    subcategory: &'static str,
) -> Rule {
    Rule {
        key,
        values,
        category,
        subcategory,
    }
}

use ValueMatch::{Any, OneOf};

/// The full rule table, in precedence order.
pub static RULES: &[Rule] = &[
    // --- Roads (ordered by hierarchy) ---
    rule("highway", OneOf(&["motorway", "motorway_link"]), "road", "motorway"),
    rule("highway", OneOf(&["trunk", "trunk_link"]), "road", "trunk"),
    rule("highway", OneOf(&["primary", "primary_link"]), "road", "primary"),
    rule("highway", OneOf(&["secondary", "secondary_link"]), "road", "secondary"),
    rule("highway", OneOf(&["tertiary", "tertiary_link"]), "road", "tertiary"),
    rule("highway", OneOf(&["residential", "living_street"]), "road", "residential"),
    rule("highway", OneOf(&["service"]), "road", "service"),
    rule("highway", OneOf(&["unclassified"]), "road", "unclassified"),
    rule("highway", OneOf(&["footway", "pedestrian", "path", "steps"]), "road", "footway"),
    rule("highway", OneOf(&["cycleway"]), "road", "cycleway"),
    rule("highway", OneOf(&["track"]), "road", "track"),
    rule("highway", Any, "road", "other"),
    // --- Railways ---
    rule("railway", OneOf(&["rail", "light_rail", "narrow_gauge"]), "railway", "rail"),
    rule("railway", OneOf(&["subway"]), "railway", "subway"),
    rule("railway", OneOf(&["tram"]), "railway", "tram"),
    rule("railway", OneOf(&["station", "halt"]), "railway", "station"),
    rule("railway", Any, "railway", "other"),
    // --- Water ---
    rule("waterway", OneOf(&["river", "canal"]), "water", "river"),
    rule("waterway", OneOf(&["stream", "drain", "ditch"]), "water", "stream"),
    rule("waterway", Any, "water", "waterway"),
    rule("natural", OneOf(&["water"]), "water", "lake"),
    rule("water", Any, "water", "lake"),
    // --- Buildings ---
    rule(
        "building",
        OneOf(&["church", "cathedral", "chapel", "mosque", "temple", "synagogue"]),
        "building",
        "worship",
    ),
    rule(
        "building",
        OneOf(&["school", "university", "college", "kindergarten"]),
        "building",
        "education",
    ),
    rule("building", OneOf(&["hospital"]), "building", "hospital"),
    rule("building", OneOf(&["commercial", "retail", "office"]), "building", "commercial"),
    rule("building", OneOf(&["industrial", "warehouse"]), "building", "industrial"),
    rule("building", Any, "building", "general"),
    // --- Parks and green spaces ---
    rule("leisure", OneOf(&["park", "garden"]), "green", "park"),
    rule("leisure", OneOf(&["nature_reserve"]), "green", "nature_reserve"),
    rule("leisure", OneOf(&["playground"]), "green", "playground"),
    rule("leisure", OneOf(&["pitch", "sports_centre", "stadium"]), "sport", "facility"),
    rule("boundary", OneOf(&["national_park", "protected_area"]), "green", "protected"),
    rule("landuse", OneOf(&["forest"]), "green", "forest"),
    rule("landuse", OneOf(&["grass", "meadow", "village_green"]), "green", "grass"),
    rule("landuse", OneOf(&["orchard", "vineyard", "allotments"]), "green", "agriculture"),
    rule("natural", OneOf(&["wood"]), "green", "forest"),
    rule("natural", OneOf(&["scrub", "heath", "grassland"]), "green", "scrub"),
    // --- Land use ---
    rule("landuse", OneOf(&["residential"]), "landuse", "residential"),
    rule("landuse", OneOf(&["commercial", "retail"]), "landuse", "commercial"),
    rule("landuse", OneOf(&["industrial"]), "landuse", "industrial"),
    rule("landuse", OneOf(&["farmland", "farmyard"]), "landuse", "farmland"),
    rule("landuse", OneOf(&["cemetery"]), "landuse", "cemetery"),
    rule("landuse", OneOf(&["military"]), "landuse", "military"),
    rule("landuse", Any, "landuse", "other"),
    // --- Amenities ---
    rule(
        "amenity",
        OneOf(&["restaurant", "cafe", "fast_food", "bar", "pub", "food_court"]),
        "amenity",
        "food",
    ),
    rule(
        "amenity",
        OneOf(&["school", "university", "college", "kindergarten", "library"]),
        "amenity",
        "education",
    ),
    rule(
        "amenity",
        OneOf(&["hospital", "clinic", "doctors", "dentist", "pharmacy"]),
        "amenity",
        "health",
    ),
    rule("amenity", OneOf(&["parking", "fuel", "charging_station"]), "amenity", "transport"),
    rule("amenity", OneOf(&["police", "fire_station"]), "amenity", "emergency"),
    rule("amenity", OneOf(&["place_of_worship"]), "amenity", "worship"),
    rule("amenity", OneOf(&["bank", "atm"]), "amenity", "finance"),
    rule("amenity", Any, "amenity", "other"),
    // --- Tourism ---
    rule(
        "tourism",
        OneOf(&["hotel", "motel", "hostel", "guest_house"]),
        "tourism",
        "accommodation",
    ),
    rule("tourism", OneOf(&["museum", "gallery", "artwork"]), "tourism", "culture"),
    rule("tourism", OneOf(&["viewpoint"]), "tourism", "viewpoint"),
    rule("tourism", OneOf(&["camp_site", "caravan_site"]), "tourism", "camping"),
    rule("tourism", Any, "tourism", "other"),
    // --- Shops ---
    rule("shop", OneOf(&["supermarket", "convenience"]), "shop", "grocery"),
    rule("shop", Any, "shop", "other"),
    // --- Power / Utilities ---
    rule("power", OneOf(&["line", "minor_line"]), "utility", "power_line"),
    rule("power", OneOf(&["tower", "pole"]), "utility", "power_tower"),
    rule("power", OneOf(&["plant", "generator", "substation"]), "utility", "power_facility"),
    rule("power", Any, "utility", "power"),
    rule("man_made", OneOf(&["pipeline"]), "utility", "pipeline"),
    rule("man_made", OneOf(&["water_tower", "tower", "mast"]), "utility", "tower"),
    // --- Barriers ---
    rule("barrier", OneOf(&["fence", "wall"]), "barrier", "linear"),
    rule("barrier", OneOf(&["gate", "bollard", "lift_gate"]), "barrier", "access"),
    rule("barrier", Any, "barrier", "other"),
    // --- Aeroway ---
    rule("aeroway", OneOf(&["runway", "taxiway"]), "aeroway", "runway"),
    rule("aeroway", OneOf(&["terminal", "gate"]), "aeroway", "terminal"),
    rule("aeroway", Any, "aeroway", "other"),
    // --- Natural features (catch-all after water/green) ---
    rule("natural", OneOf(&["peak", "volcano"]), "natural", "peak"),
    rule("natural", OneOf(&["cliff"]), "natural", "cliff"),
    rule("natural", OneOf(&["beach"]), "natural", "beach"),
    rule("natural", OneOf(&["tree"]), "natural", "tree"),
    rule("natural", Any, "natural", "other"),
    // --- Administrative boundaries ---
    rule("boundary", OneOf(&["administrative"]), "boundary", "administrative"),
    rule("boundary", Any, "boundary", "other"),
    // --- Public transport ---
    rule(
        "public_transport",
        OneOf(&["station", "stop_position", "platform"]),
        "transport",
        "stop",
    ),
    rule("public_transport", Any, "transport", "other"),
];
