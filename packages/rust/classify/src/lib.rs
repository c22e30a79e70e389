//! Tag-based feature classification.
//!
//! Maps a placemark's OSM tag set to a ([`Classification`]) category and
//! subcategory by scanning the static rule table in [`rules`]. Classification
//! is a pure function of the tags: no state, no I/O, and the result depends
//! only on rule order, never on tag iteration order.

pub mod rules;

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use atoc_shared::{AtocError, Classification, DEFAULT_CLASSIFICATION, Result};

pub use rules::{RULES, Rule, ValueMatch};

/// Classify a tag set against the ordered rule table.
///
/// Returns the first matching rule's classification, or the
/// "other"/"unknown" default when nothing matches (including an empty map).
pub fn classify(tags: &BTreeMap<String, String>) -> Classification {
    for rule in RULES {
        let Some(value) = tags.get(rule.key) else {
            continue;
        };
        if rule.values.matches(value) {
            return Classification {
                category: rule.category,
                subcategory: rule.subcategory,
            };
        }
    }
    DEFAULT_CLASSIFICATION
}

/// Validate the static rule table at startup.
///
/// A rule that follows an `Any` catch-all for the same key can never match.
/// That is a configuration fault, rejected eagerly rather than silently
/// misclassifying at runtime.
pub fn validate_rules() -> Result<()> {
    check_rules(RULES)?;
    debug!(rules = RULES.len(), "rule table validated");
    Ok(())
}

fn check_rules(rules: &[Rule]) -> Result<()> {
    let mut saturated: HashSet<&str> = HashSet::new();
    for rule in rules {
        if saturated.contains(rule.key) {
            return Err(AtocError::config(format!(
                "unreachable rule: ({}, {}/{}) follows the '{}' catch-all",
                rule.key, rule.category, rule.subcategory, rule.key
            )));
        }
        if matches!(rule.values, ValueMatch::Any) {
            saturated.insert(rule.key);
        }
    }
    Ok(())
}
