//! Event collections: causally or temporally grouped events

use serde::Serialize;

/// Variant payload of an event collection.
#[derive(Debug, Clone, Serialize)]
pub enum CollectionKind {
    Abduction {
        snatcher: Option<i32>,
        target: Option<i32>,
    },
    Battle {
        name: Option<String>,
        war: Option<i32>,
        attacker: Option<i32>,
        defender: Option<i32>,
        /// Conquest collection this battle decided; linked by the resolver.
        conquering: Option<i32>,
    },
    BeastAttack {
        ordinal: Option<i32>,
        /// The attacking figure; usually absent in the export and
        /// inferred by the resolver.
        beast: Option<i32>,
        defender: Option<i32>,
    },
    Duel {
        attacker: Option<i32>,
        defender: Option<i32>,
    },
    Insurrection {
        target: Option<i32>,
    },
    Journey {
        ordinal: Option<i32>,
    },
    Occasion {
        entity: Option<i32>,
        occasion: Option<i32>,
    },
    Purge {
        adjective: Option<String>,
    },
    Raid {
        attacker: Option<i32>,
        defender: Option<i32>,
        ordinal: Option<i32>,
    },
    SiteConquered {
        ordinal: Option<i32>,
        attacker: Option<i32>,
        defender: Option<i32>,
        /// Battle collection that decided the conquest; linked by the resolver.
        battle: Option<i32>,
    },
    Theft {
        entity: Option<i32>,
        ordinal: Option<i32>,
    },
    War {
        name: Option<String>,
        aggressor: Option<i32>,
        defender: Option<i32>,
    },
}

/// One grouping record from the collections section.
///
/// `collection_ids` holds forward references: a collection may name
/// sub-collections that do not exist in the graph yet. The resolver
/// turns them into `sub_collections` edges once the section finishes.
#[derive(Debug, Clone, Serialize)]
pub struct EventCollection {
    pub id: i32,
    /// -1 when unknown.
    pub start_year: i32,
    /// -1 while open-ended.
    pub end_year: i32,
    pub site: Option<i32>,
    pub region: Option<i32>,
    pub parent: Option<i32>,
    /// Member event ids, in declaration order.
    pub event_ids: Vec<i32>,
    /// Sub-collection ids as declared (possibly forward references).
    pub collection_ids: Vec<i32>,
    /// Resolved sub-collection edges.
    pub sub_collections: Vec<i32>,
    pub kind: CollectionKind,
}

impl EventCollection {
    pub fn new(id: i32, kind: CollectionKind) -> Self {
        Self {
            id,
            start_year: -1,
            end_year: -1,
            site: None,
            region: None,
            parent: None,
            event_ids: Vec::new(),
            collection_ids: Vec::new(),
            sub_collections: Vec::new(),
            kind,
        }
    }

    pub fn is_beast_attack(&self) -> bool {
        matches!(self.kind, CollectionKind::BeastAttack { .. })
    }

    pub fn is_battle(&self) -> bool {
        matches!(self.kind, CollectionKind::Battle { .. })
    }
}
