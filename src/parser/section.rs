//! Section classification for export files
//!
//! The variant order is the canonical order sections appear in an export,
//! and the derived `Ord` is what the merge coordinator compares to decide
//! whether the supplementary stream is ahead of or behind the primary.
//! `Unknown` and `Junk` sit at the end; the coordinator never compares
//! them because neither reader yields items for them.

use serde::Serialize;

/// One top-level segment of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Section {
    Name,
    AlternativeName,
    Landmasses,
    MountainPeaks,
    Regions,
    UndergroundRegions,
    Sites,
    WorldConstructions,
    Artifacts,
    HistoricalFigures,
    EntityPopulations,
    Entities,
    Events,
    EventCollections,
    Eras,
    WrittenContent,
    PoeticForms,
    MusicalForms,
    DanceForms,
    /// Unrecognized element name: reported, content skipped.
    Unknown,
    /// Document-wrapper noise (declaration, root element), not a data section.
    Junk,
}

impl Section {
    /// Map a top-level element name to its section.
    pub fn classify(name: &str) -> Section {
        match name {
            "name" => Section::Name,
            "altname" => Section::AlternativeName,
            "landmasses" => Section::Landmasses,
            "mountain_peaks" => Section::MountainPeaks,
            "regions" => Section::Regions,
            "underground_regions" => Section::UndergroundRegions,
            "sites" => Section::Sites,
            "world_constructions" => Section::WorldConstructions,
            "artifacts" => Section::Artifacts,
            "historical_figures" => Section::HistoricalFigures,
            "entity_populations" => Section::EntityPopulations,
            "entities" => Section::Entities,
            "historical_events" => Section::Events,
            "historical_event_collections" => Section::EventCollections,
            "historical_eras" => Section::Eras,
            "written_contents" => Section::WrittenContent,
            "poetic_forms" => Section::PoeticForms,
            "musical_forms" => Section::MusicalForms,
            "dance_forms" => Section::DanceForms,
            "xml" | "" | "df_world" => Section::Junk,
            _ => Section::Unknown,
        }
    }

    /// Decorative geographic layers: recognized, declared in exports, and
    /// intentionally never materialized.
    pub fn is_excluded(self) -> bool {
        matches!(self, Section::Landmasses | Section::MountainPeaks)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
