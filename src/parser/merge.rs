//! Field reconciliation rules for the dual-stream merge
//!
//! Pure functions over property lists, keyed by section. The coordinator
//! in `supplement` decides *when* two items merge; this module decides
//! *how* their fields combine. Three fixed rule classes exist per section:
//!
//! - append fields: always added as new properties, even when the name
//!   already exists (relationship links, sub-records, auxiliary lists);
//! - authoritative fields: the primary's value wins, the supplement's is
//!   ignored (classification/state/reason codes);
//! - one wholesale-replace field: the supplement's subtree fully
//!   supersedes the primary's.
//!
//! Everything else: the supplement's value overwrites and the property is
//! re-flagged unknown so the materializer re-validates it.

use super::property::Property;
use super::section::Section;

/// Fields appended rather than overwritten when the name already exists.
const ENTITY_APPEND: &[&str] = &[
    "entity_link",
    "child",
    "entity_position",
    "entity_position_assignment",
    "occasion",
    "weapon",
    "histfig_id",
];
const ARTIFACT_APPEND: &[&str] = &["writing"];
const WRITTEN_CONTENT_APPEND: &[&str] = &["style"];
const EVENT_APPEND: &[&str] = &["bodies"];

/// Fields whose primary value is authoritative: the supplement's copy is
/// dropped whenever the primary already defines the field.
const EVENT_PRIMARY_WINS: &[&str] = &["type", "state", "slayer_race", "circumstance", "reason"];

/// The one field per relevant section whose supplement subtree fully
/// supersedes the primary's.
const SITE_REPLACE: &[&str] = &["structures"];

fn append_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Entities => ENTITY_APPEND,
        Section::Artifacts => ARTIFACT_APPEND,
        Section::WrittenContent => WRITTEN_CONTENT_APPEND,
        Section::Events => EVENT_APPEND,
        _ => &[],
    }
}

fn primary_wins_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Events => EVENT_PRIMARY_WINS,
        _ => &[],
    }
}

fn replace_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Sites => SITE_REPLACE,
        _ => &[],
    }
}

/// Fold the supplement item's properties into the primary item's.
///
/// Idempotent with respect to append-class fields: a structurally
/// identical property already present is not appended again.
pub fn reconcile(section: Section, primary: &mut Vec<Property>, supplement: Vec<Property>) {
    let append = append_fields(section);
    let primary_wins = primary_wins_fields(section);
    let replace = replace_fields(section);

    for property in supplement {
        let name = property.name.clone();
        let name = name.as_str();

        if append.contains(&name) {
            if !primary.iter().any(|p| p.same_shape(&property)) {
                primary.push(property);
            }
            continue;
        }

        let Some(position) = primary.iter().position(|p| p.name == name) else {
            primary.push(property);
            continue;
        };
        if primary_wins.contains(&name) {
            continue;
        }
        let matching = &mut primary[position];
        if replace.contains(&name) {
            matching.sub_properties = property.sub_properties;
            continue;
        }
        matching.value = property.value;
        matching.known = false;
        if !property.sub_properties.is_empty() {
            if matching.sub_properties.is_empty() {
                matching.sub_properties = property.sub_properties;
            } else {
                for sub in property.sub_properties {
                    if !matching.sub_properties.iter().any(|p| p.same_shape(&sub)) {
                        matching.sub_properties.push(sub);
                    }
                }
            }
        }
    }
}
