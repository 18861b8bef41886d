//! Historical figures and their relationship links

use super::event::{EntityLinkRole, EventRef, SiteLinkRole};
use serde::Serialize;

/// Figure-to-entity relationship.
#[derive(Debug, Clone, Serialize)]
pub struct EntityLink {
    pub role: EntityLinkRole,
    pub entity: i32,
    pub strength: Option<i32>,
}

/// Figure-to-site relationship.
#[derive(Debug, Clone, Serialize)]
pub struct SiteLink {
    pub role: SiteLinkRole,
    pub site: i32,
    pub entity: Option<i32>,
}

/// Figure-to-figure relationship; the role vocabulary is open
/// (mother, father, spouse, deity, master, ...).
#[derive(Debug, Clone, Serialize)]
pub struct FigureLink {
    pub role: String,
    pub target: i32,
    pub strength: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalFigure {
    pub id: i32,
    pub name: String,
    pub race: Option<String>,
    pub caste: Option<String>,
    /// -1 when unknown.
    pub birth_year: i32,
    /// -1 while alive.
    pub death_year: i32,
    pub appeared_year: i32,
    pub associated_kind: Option<String>,
    pub deity: bool,
    pub force: bool,
    pub goals: Vec<String>,
    pub spheres: Vec<String>,
    pub entity_links: Vec<EntityLink>,
    pub site_links: Vec<SiteLink>,
    pub figure_links: Vec<FigureLink>,
    /// Derived by the resolver once the events section finishes.
    pub age: Option<i32>,
    /// Chronological references to events this figure took part in.
    pub events: Vec<EventRef>,
    /// Beast-attack collections attributed to this figure.
    pub beast_attacks: Vec<i32>,
}

impl HistoricalFigure {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
            race: None,
            caste: None,
            birth_year: -1,
            death_year: -1,
            appeared_year: -1,
            associated_kind: None,
            deity: false,
            force: false,
            goals: Vec::new(),
            spheres: Vec::new(),
            entity_links: Vec::new(),
            site_links: Vec::new(),
            figure_links: Vec::new(),
            age: None,
            events: Vec::new(),
            beast_attacks: Vec::new(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death_year >= 0
    }
}
