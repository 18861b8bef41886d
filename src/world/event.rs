//! Historical events
//!
//! One `WorldEvent` is one dated record from the events section. The
//! variant payload is selected by the export's `type` discriminator
//! through the materializer registry; the closed set here covers the
//! variants the resolver and downstream consumers act on.

use serde::Serialize;

/// Lightweight reference to an event, ordered chronologically.
///
/// Figures and sites keep these in sorted lists; the resolver's
/// back-fill pass inserts into them with an ordered, deduplicating
/// insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRef {
    pub year: i32,
    pub id: i32,
}

impl Ord for EventRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.id).cmp(&(other.year, other.id))
    }
}

impl PartialOrd for EventRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Insert into a sorted list; no-op when an equal entry already exists.
pub fn ordered_insert(list: &mut Vec<EventRef>, entry: EventRef) {
    if let Err(position) = list.binary_search(&entry) {
        list.insert(position, entry);
    }
}

/// Role of a figure-to-entity link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityLinkRole {
    Member,
    FormerMember,
    Enemy,
    Criminal,
    Prisoner,
    Slave,
    Squad,
    Deity,
    Position,
    Other,
}

impl EntityLinkRole {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "member" => Self::Member,
            "former member" => Self::FormerMember,
            "enemy" => Self::Enemy,
            "criminal" => Self::Criminal,
            "prisoner" => Self::Prisoner,
            "slave" => Self::Slave,
            "squad" => Self::Squad,
            "deity" => Self::Deity,
            "position" => Self::Position,
            _ => Self::Other,
        }
    }
}

/// Role of a figure-to-site link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiteLinkRole {
    Lair,
    Home,
    Hangout,
    Occupation,
    Seat,
    Other,
}

impl SiteLinkRole {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "lair" => Self::Lair,
            "home structure" | "home site building" | "home site underground" => Self::Home,
            "hangout" => Self::Hangout,
            "occupation" => Self::Occupation,
            "seat of power" => Self::Seat,
            _ => Self::Other,
        }
    }
}

/// Variant payload of a historical event.
#[derive(Debug, Clone, Serialize)]
pub enum EventKind {
    AddHfEntityLink {
        figure: Option<i32>,
        entity: Option<i32>,
        link: EntityLinkRole,
        position: Option<String>,
    },
    AddHfHfLink {
        figure: Option<i32>,
        target: Option<i32>,
        link: Option<String>,
    },
    AddHfSiteLink {
        figure: Option<i32>,
        entity: Option<i32>,
        site: Option<i32>,
        link: SiteLinkRole,
    },
    AttackedSite {
        attacker_civ: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        site: Option<i32>,
    },
    ChangeHfState {
        figure: Option<i32>,
        state: Option<String>,
        site: Option<i32>,
        region: Option<i32>,
    },
    CreatedSite {
        civ: Option<i32>,
        site_civ: Option<i32>,
        builder: Option<i32>,
        site: Option<i32>,
    },
    CreatureDevoured {
        victim: Option<i32>,
        eater: Option<i32>,
        entity: Option<i32>,
        site: Option<i32>,
    },
    DestroyedSite {
        attacker_civ: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        site: Option<i32>,
    },
    HfAbducted {
        target: Option<i32>,
        snatcher: Option<i32>,
        site: Option<i32>,
    },
    HfAttackedSite {
        attacker: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        site: Option<i32>,
    },
    HfDestroyedSite {
        attacker: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        site: Option<i32>,
    },
    HfDied {
        figure: Option<i32>,
        slayer: Option<i32>,
        slayer_race: Option<String>,
        cause: Option<String>,
        site: Option<i32>,
        region: Option<i32>,
    },
    HfSimpleBattle {
        subtype: Option<String>,
        figure1: Option<i32>,
        figure2: Option<i32>,
        site: Option<i32>,
        region: Option<i32>,
    },
    ItemStolen {
        item: Option<String>,
        thief: Option<i32>,
        entity: Option<i32>,
        site: Option<i32>,
    },
    NewSiteLeader {
        attacker_civ: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        new_leader: Option<i32>,
        site: Option<i32>,
    },
    PlunderedSite {
        attacker_civ: Option<i32>,
        defender_civ: Option<i32>,
        site_civ: Option<i32>,
        site: Option<i32>,
    },
}

impl EventKind {
    /// Figures this event references, in declaration order.
    pub fn figures(&self) -> Vec<i32> {
        let mut out = Vec::new();
        let mut push = |id: &Option<i32>| {
            if let Some(id) = id {
                out.push(*id);
            }
        };
        match self {
            Self::AddHfEntityLink { figure, .. } => push(figure),
            Self::AddHfHfLink { figure, target, .. } => {
                push(figure);
                push(target);
            }
            Self::AddHfSiteLink { figure, .. } => push(figure),
            Self::AttackedSite { .. }
            | Self::DestroyedSite { .. }
            | Self::PlunderedSite { .. } => {}
            Self::ChangeHfState { figure, .. } => push(figure),
            Self::CreatedSite { builder, .. } => push(builder),
            Self::CreatureDevoured { victim, eater, .. } => {
                push(victim);
                push(eater);
            }
            Self::HfAbducted { target, snatcher, .. } => {
                push(target);
                push(snatcher);
            }
            Self::HfAttackedSite { attacker, .. } | Self::HfDestroyedSite { attacker, .. } => {
                push(attacker)
            }
            Self::HfDied { figure, slayer, .. } => {
                push(figure);
                push(slayer);
            }
            Self::HfSimpleBattle {
                figure1, figure2, ..
            } => {
                push(figure1);
                push(figure2);
            }
            Self::ItemStolen { thief, .. } => push(thief),
            Self::NewSiteLeader { new_leader, .. } => push(new_leader),
        }
        out
    }

    /// The site this event happened at, if it names one.
    pub fn site(&self) -> Option<i32> {
        match self {
            Self::AddHfEntityLink { .. } | Self::AddHfHfLink { .. } => None,
            Self::AddHfSiteLink { site, .. }
            | Self::AttackedSite { site, .. }
            | Self::ChangeHfState { site, .. }
            | Self::CreatedSite { site, .. }
            | Self::CreatureDevoured { site, .. }
            | Self::DestroyedSite { site, .. }
            | Self::HfAbducted { site, .. }
            | Self::HfAttackedSite { site, .. }
            | Self::HfDestroyedSite { site, .. }
            | Self::HfDied { site, .. }
            | Self::HfSimpleBattle { site, .. }
            | Self::ItemStolen { site, .. }
            | Self::NewSiteLeader { site, .. }
            | Self::PlunderedSite { site, .. } => *site,
        }
    }
}

/// One dated record from the events section.
#[derive(Debug, Clone, Serialize)]
pub struct WorldEvent {
    pub id: i32,
    pub year: i32,
    /// Tick within the year; kept for chronological granularity.
    pub seconds: i32,
    pub kind: EventKind,
}

impl WorldEvent {
    pub fn event_ref(&self) -> EventRef {
        EventRef {
            year: self.year,
            id: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refs_order_by_year_then_id() {
        let a = EventRef { year: 10, id: 5 };
        let b = EventRef { year: 10, id: 6 };
        let c = EventRef { year: 11, id: 0 };
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn ordered_insert_keeps_order_and_dedupes() {
        let mut list = vec![EventRef { year: 1, id: 0 }, EventRef { year: 3, id: 2 }];
        ordered_insert(&mut list, EventRef { year: 2, id: 1 });
        ordered_insert(&mut list, EventRef { year: 2, id: 1 });
        assert_eq!(list.len(), 3);
        assert_eq!(list[1], EventRef { year: 2, id: 1 });
    }

    #[test]
    fn death_event_references_both_parties() {
        let kind = EventKind::HfDied {
            figure: Some(4),
            slayer: Some(9),
            slayer_race: None,
            cause: Some("struck down".into()),
            site: Some(2),
            region: None,
        };
        assert_eq!(kind.figures(), vec![4, 9]);
        assert_eq!(kind.site(), Some(2));
    }

    #[test]
    fn link_roles_parse_case_insensitively() {
        assert_eq!(EntityLinkRole::parse("ENEMY"), EntityLinkRole::Enemy);
        assert_eq!(EntityLinkRole::parse("squire"), EntityLinkRole::Other);
        assert_eq!(SiteLinkRole::parse("Lair"), SiteLinkRole::Lair);
    }
}
