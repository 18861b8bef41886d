//! Entities (civilizations, groups) and entity populations

use serde::Serialize;

/// Kind of an entity-to-entity relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityRelationKind {
    Parent,
    Child,
    Other,
}

impl EntityRelationKind {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "parent" => Self::Parent,
            "child" => Self::Child,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityRelation {
    pub kind: EntityRelationKind,
    pub target: i32,
    pub strength: Option<i32>,
}

/// A named office within an entity.
#[derive(Debug, Clone, Serialize)]
pub struct EntityPosition {
    pub id: i32,
    pub name: Option<String>,
}

/// A figure holding one of an entity's positions.
#[derive(Debug, Clone, Serialize)]
pub struct PositionAssignment {
    pub id: i32,
    pub figure: Option<i32>,
    pub position: Option<i32>,
}

/// A recurring celebration an entity observes.
#[derive(Debug, Clone, Serialize)]
pub struct Occasion {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub id: i32,
    pub name: String,
    pub race: Option<String>,
    pub kind: Option<String>,
    pub relations: Vec<EntityRelation>,
    /// Child group ids, as declared by the supplement.
    pub children: Vec<i32>,
    /// Member figure ids.
    pub members: Vec<i32>,
    pub positions: Vec<EntityPosition>,
    pub position_assignments: Vec<PositionAssignment>,
    pub occasions: Vec<Occasion>,
    pub weapons: Vec<String>,
}

impl Entity {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
            race: None,
            kind: None,
            relations: Vec::new(),
            children: Vec::new(),
            members: Vec::new(),
            positions: Vec::new(),
            position_assignments: Vec::new(),
            occasions: Vec::new(),
            weapons: Vec::new(),
        }
    }

    /// The entity this one descends from, when the export declares one.
    pub fn parent(&self) -> Option<i32> {
        self.relations
            .iter()
            .find(|r| r.kind == EntityRelationKind::Parent)
            .map(|r| r.target)
    }
}

/// Racial population counts attached to a civilization.
#[derive(Debug, Clone, Serialize)]
pub struct EntityPopulation {
    pub id: i32,
    pub civ: Option<i32>,
    /// (race, count) pairs as declared, order preserved.
    pub races: Vec<(String, i32)>,
}

impl EntityPopulation {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            civ: None,
            races: Vec::new(),
        }
    }
}
