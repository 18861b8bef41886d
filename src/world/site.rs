//! Sites, their structures, and ownership history

use super::event::EventRef;
use serde::Serialize;

/// A building or constructed feature inside a site.
#[derive(Debug, Clone, Serialize)]
pub struct Structure {
    pub id: i32,
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// Who held a site during a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiteOwner {
    Figure(i32),
    Entity(i32),
}

/// One span of a site's ownership history. `start_year` -1 means the
/// claim predates recorded history.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerPeriod {
    pub owner: SiteOwner,
    pub start_year: i32,
    pub end_year: i32,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: i32,
    pub name: String,
    pub kind: Option<String>,
    pub coords: Option<(i32, i32)>,
    pub civ: Option<i32>,
    pub current_owner: Option<i32>,
    pub structures: Vec<Structure>,
    pub owner_history: Vec<OwnerPeriod>,
    /// Chronological references to events at this site.
    pub events: Vec<EventRef>,
}

impl Site {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
            kind: None,
            coords: None,
            civ: None,
            current_owner: None,
            structures: Vec::new(),
            owner_history: Vec::new(),
            events: Vec::new(),
        }
    }
}
