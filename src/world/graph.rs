//! The World: ingestion target and derived indices
//!
//! Per-section ordered collections plus one chronological event list.
//! Record ids are unique within a section; explicit id→index maps are
//! maintained on insert rather than trusting arrival position, so sparse
//! or reordered ids degrade to slower lookups instead of wrong ones.
//!
//! The World is exclusively owned by the ingestion engine until
//! ingestion completes; afterwards only the resolver's passes have
//! mutated it and it is handed to the caller as a plain value.

use super::artifact::{Artifact, ArtForm, Region, UndergroundRegion, WorldConstruction, WrittenContent};
use super::collection::EventCollection;
use super::diagnostics::Diagnostics;
use super::entity::{Entity, EntityPopulation};
use super::era::Era;
use super::event::{ordered_insert, WorldEvent};
use super::figure::HistoricalFigure;
use super::site::Site;
use crate::parser::property::Property;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Name- and relation-keyed lookup structures, built by the resolver's
/// cross-index passes and consumed by later passes and downstream
/// consumers.
#[derive(Debug, Default, Serialize)]
pub struct WorldIndex {
    /// (lowercased name, id), sorted for binary search.
    pub figures_by_name: Vec<(String, i32)>,
    pub entities_by_name: Vec<(String, i32)>,
    pub figure_entities: BTreeMap<i32, Vec<i32>>,
    pub entity_figures: BTreeMap<i32, Vec<i32>>,
    pub figure_sites: BTreeMap<i32, Vec<i32>>,
    pub site_figures: BTreeMap<i32, Vec<i32>>,
    pub entity_entities: BTreeMap<i32, Vec<i32>>,
}

#[derive(Debug, Default, Serialize)]
pub struct World {
    pub name: String,
    pub alternative_name: String,

    pub regions: Vec<Region>,
    pub underground_regions: Vec<UndergroundRegion>,
    pub sites: Vec<Site>,
    pub world_constructions: Vec<WorldConstruction>,
    pub artifacts: Vec<Artifact>,
    pub figures: Vec<HistoricalFigure>,
    pub entity_populations: Vec<EntityPopulation>,
    pub entities: Vec<Entity>,
    pub events: Vec<WorldEvent>,
    pub collections: Vec<EventCollection>,
    pub eras: Vec<Era>,
    pub written_contents: Vec<WrittenContent>,
    pub poetic_forms: Vec<ArtForm>,
    pub musical_forms: Vec<ArtForm>,
    pub dance_forms: Vec<ArtForm>,

    pub index: WorldIndex,
    pub diagnostics: Diagnostics,

    #[serde(skip)]
    site_ids: HashMap<i32, usize>,
    #[serde(skip)]
    figure_ids: HashMap<i32, usize>,
    #[serde(skip)]
    entity_ids: HashMap<i32, usize>,
    #[serde(skip)]
    event_ids: HashMap<i32, usize>,
    #[serde(skip)]
    collection_ids: HashMap<i32, usize>,
    #[serde(skip)]
    artifact_ids: HashMap<i32, usize>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Insertion — called by materializer factories during ingestion
    // -----------------------------------------------------------------

    pub fn add_site(&mut self, site: Site) {
        Self::index_id(&mut self.site_ids, site.id, self.sites.len(), &mut self.diagnostics, "site");
        self.sites.push(site);
    }

    pub fn add_figure(&mut self, figure: HistoricalFigure) {
        Self::index_id(
            &mut self.figure_ids,
            figure.id,
            self.figures.len(),
            &mut self.diagnostics,
            "figure",
        );
        self.figures.push(figure);
    }

    pub fn add_entity(&mut self, entity: Entity) {
        Self::index_id(
            &mut self.entity_ids,
            entity.id,
            self.entities.len(),
            &mut self.diagnostics,
            "entity",
        );
        self.entities.push(entity);
    }

    pub fn add_artifact(&mut self, artifact: Artifact) {
        Self::index_id(
            &mut self.artifact_ids,
            artifact.id,
            self.artifacts.len(),
            &mut self.diagnostics,
            "artifact",
        );
        self.artifacts.push(artifact);
    }

    /// Append an event and wire chronological references into every
    /// figure and site it names. Events arrive in file order, which is
    /// chronological, so the per-record lists stay sorted.
    pub fn add_event(&mut self, event: WorldEvent) {
        let entry = event.event_ref();
        for figure_id in event.kind.figures() {
            if let Some(figure) = self.figure_mut(figure_id) {
                ordered_insert(&mut figure.events, entry);
            }
        }
        if let Some(site_id) = event.kind.site() {
            if let Some(site) = self.site_mut(site_id) {
                ordered_insert(&mut site.events, entry);
            }
        }
        Self::index_id(
            &mut self.event_ids,
            event.id,
            self.events.len(),
            &mut self.diagnostics,
            "event",
        );
        self.events.push(event);
    }

    pub fn add_collection(&mut self, collection: EventCollection) {
        Self::index_id(
            &mut self.collection_ids,
            collection.id,
            self.collections.len(),
            &mut self.diagnostics,
            "collection",
        );
        self.collections.push(collection);
    }

    fn index_id(
        map: &mut HashMap<i32, usize>,
        id: i32,
        position: usize,
        diagnostics: &mut Diagnostics,
        what: &str,
    ) {
        if map.insert(id, position).is_some() {
            diagnostics.report_detail(format!("duplicate {what} id"), id.to_string());
        }
    }

    // -----------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------

    pub fn site(&self, id: i32) -> Option<&Site> {
        self.site_ids.get(&id).and_then(|&i| self.sites.get(i))
    }

    pub fn site_mut(&mut self, id: i32) -> Option<&mut Site> {
        match self.site_ids.get(&id) {
            Some(&i) => self.sites.get_mut(i),
            None => None,
        }
    }

    pub fn figure(&self, id: i32) -> Option<&HistoricalFigure> {
        self.figure_ids.get(&id).and_then(|&i| self.figures.get(i))
    }

    pub fn figure_mut(&mut self, id: i32) -> Option<&mut HistoricalFigure> {
        match self.figure_ids.get(&id) {
            Some(&i) => self.figures.get_mut(i),
            None => None,
        }
    }

    pub fn entity(&self, id: i32) -> Option<&Entity> {
        self.entity_ids.get(&id).and_then(|&i| self.entities.get(i))
    }

    pub fn entity_mut(&mut self, id: i32) -> Option<&mut Entity> {
        match self.entity_ids.get(&id) {
            Some(&i) => self.entities.get_mut(i),
            None => None,
        }
    }

    pub fn event(&self, id: i32) -> Option<&WorldEvent> {
        self.event_ids.get(&id).and_then(|&i| self.events.get(i))
    }

    pub fn event_mut(&mut self, id: i32) -> Option<&mut WorldEvent> {
        match self.event_ids.get(&id) {
            Some(&i) => self.events.get_mut(i),
            None => None,
        }
    }

    pub fn collection(&self, id: i32) -> Option<&EventCollection> {
        self.collection_ids
            .get(&id)
            .and_then(|&i| self.collections.get(i))
    }

    pub fn collection_mut(&mut self, id: i32) -> Option<&mut EventCollection> {
        match self.collection_ids.get(&id) {
            Some(&i) => self.collections.get_mut(i),
            None => None,
        }
    }

    pub fn artifact(&self, id: i32) -> Option<&Artifact> {
        self.artifact_ids
            .get(&id)
            .and_then(|&i| self.artifacts.get(i))
    }

    /// Binary search the resolver-built name index.
    pub fn figure_by_name(&self, name: &str) -> Option<&HistoricalFigure> {
        let needle = name.to_lowercase();
        let index = &self.index.figures_by_name;
        let position = index
            .binary_search_by(|(candidate, _)| candidate.as_str().cmp(needle.as_str()))
            .ok()?;
        self.figure(index[position].1)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        let needle = name.to_lowercase();
        let index = &self.index.entities_by_name;
        let position = index
            .binary_search_by(|(candidate, _)| candidate.as_str().cmp(needle.as_str()))
            .ok()?;
        self.entity(index[position].1)
    }

    /// Year of the last recorded event, if any were recorded.
    pub fn last_event_year(&self) -> Option<i32> {
        self.events.last().map(|e| e.year)
    }

    /// Event ids of a collection and, transitively, of its resolved
    /// sub-collections. Cycle-safe.
    pub fn collection_event_ids_recursive(&self, id: i32) -> Vec<i32> {
        let mut out = Vec::new();
        let mut visited = Vec::new();
        self.gather_collection_events(id, &mut out, &mut visited);
        out
    }

    fn gather_collection_events(&self, id: i32, out: &mut Vec<i32>, visited: &mut Vec<i32>) {
        if visited.contains(&id) {
            return;
        }
        visited.push(id);
        if let Some(collection) = self.collection(id) {
            out.extend(&collection.event_ids);
            for &sub in &collection.sub_collections {
                self.gather_collection_events(sub, out, visited);
            }
        }
    }

    // -----------------------------------------------------------------
    // Diagnostics plumbing
    // -----------------------------------------------------------------

    /// Report every property a materializer left unrecognized.
    pub fn report_unknown_properties(&mut self, path: &str, properties: &[Property]) {
        for property in properties {
            if !property.known {
                self.diagnostics.report_detail(
                    format!("unrecognized property: {path}/{}", property.name),
                    property.value_str().to_string(),
                );
            }
            if !property.sub_properties.is_empty() {
                let nested = format!("{path}/{}", property.name);
                // Children of an unrecognized property are implied by the
                // parent report; only recurse under recognized parents.
                if property.known {
                    self.report_unknown_properties(&nested, &property.sub_properties);
                }
            }
        }
    }
}
