//! Factories for the polymorphic events section
//!
//! One row per `type` discriminator. Every factory parses the shared
//! envelope (id, year, tick) first, then its own field mapping, and
//! appends through `World::add_event` so chronological references are
//! wired into the figures and sites the event names.

use super::{owned_value, Factory};
use crate::parser::property::Property;
use crate::world::{EntityLinkRole, EventKind, SiteLinkRole, World, WorldEvent};

pub(super) const EVENT_FACTORIES: &[(&str, Factory)] = &[
    ("add hf entity link", add_hf_entity_link),
    ("add hf hf link", add_hf_hf_link),
    ("add hf site link", add_hf_site_link),
    ("attacked site", attacked_site),
    ("change hf state", change_hf_state),
    ("created site", created_site),
    ("creature devoured", creature_devoured),
    ("destroyed site", destroyed_site),
    ("hf abducted", hf_abducted),
    ("hf attacked site", hf_attacked_site),
    ("hf destroyed site", hf_destroyed_site),
    ("hf died", hf_died),
    ("hf simple battle event", hf_simple_battle),
    ("item stolen", item_stolen),
    ("new site leader", new_site_leader),
    ("plundered site", plundered_site),
];

struct Envelope {
    id: i32,
    year: i32,
    seconds: i32,
}

fn envelope(properties: &mut Vec<Property>) -> Envelope {
    let mut envelope = Envelope {
        id: -1,
        year: -1,
        seconds: -1,
    };
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => envelope.id = property.value_i32().unwrap_or(-1),
            "year" => envelope.year = property.value_i32().unwrap_or(-1),
            "seconds72" => envelope.seconds = property.value_i32().unwrap_or(-1),
            _ => continue,
        }
        property.known = true;
    }
    envelope
}

fn finish(world: &mut World, envelope: Envelope, kind: EventKind) {
    world.add_event(WorldEvent {
        id: envelope.id,
        year: envelope.year,
        seconds: envelope.seconds,
        kind,
    });
}

fn add_hf_entity_link(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut figure = None;
    let mut entity = None;
    let mut link = EntityLinkRole::Other;
    let mut position = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "hfid" | "histfig" => figure = property.value_i32(),
            "civ" | "civ_id" => entity = property.value_i32(),
            "link_type" => link = EntityLinkRole::parse(property.value_str()),
            "position" => position = owned_value(property),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::AddHfEntityLink {
            figure,
            entity,
            link,
            position,
        },
    );
}

fn add_hf_hf_link(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut figure = None;
    let mut target = None;
    let mut link = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "hfid" => figure = property.value_i32(),
            "hfid_target" => target = property.value_i32(),
            "link_type" => link = owned_value(property),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::AddHfHfLink {
            figure,
            target,
            link,
        },
    );
}

fn add_hf_site_link(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut figure = None;
    let mut entity = None;
    let mut site = None;
    let mut link = SiteLinkRole::Other;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "histfig" | "hfid" => figure = property.value_i32(),
            "civ" | "civ_id" => entity = property.value_i32(),
            "site_id" | "site" => site = property.value_i32(),
            "link_type" => link = SiteLinkRole::parse(property.value_str()),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::AddHfSiteLink {
            figure,
            entity,
            site,
            link,
        },
    );
}

/// Shared mapping for the civ-vs-civ site events, which differ only in
/// their discriminator.
fn civ_site_event(
    properties: &mut Vec<Property>,
) -> (Option<i32>, Option<i32>, Option<i32>, Option<i32>) {
    let mut attacker_civ = None;
    let mut defender_civ = None;
    let mut site_civ = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "attacker_civ_id" => attacker_civ = property.value_i32(),
            "defender_civ_id" => defender_civ = property.value_i32(),
            "site_civ_id" => site_civ = property.value_i32(),
            "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    (attacker_civ, defender_civ, site_civ, site)
}

fn attacked_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let (attacker_civ, defender_civ, site_civ, site) = civ_site_event(properties);
    finish(
        world,
        envelope,
        EventKind::AttackedSite {
            attacker_civ,
            defender_civ,
            site_civ,
            site,
        },
    );
}

fn destroyed_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let (attacker_civ, defender_civ, site_civ, site) = civ_site_event(properties);
    finish(
        world,
        envelope,
        EventKind::DestroyedSite {
            attacker_civ,
            defender_civ,
            site_civ,
            site,
        },
    );
}

fn plundered_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let (attacker_civ, defender_civ, site_civ, site) = civ_site_event(properties);
    finish(
        world,
        envelope,
        EventKind::PlunderedSite {
            attacker_civ,
            defender_civ,
            site_civ,
            site,
        },
    );
}

fn change_hf_state(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut figure = None;
    let mut state = None;
    let mut site = None;
    let mut region = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "hfid" => figure = property.value_i32(),
            "state" => state = owned_value(property),
            "site_id" => site = property.value_i32(),
            "subregion_id" => region = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::ChangeHfState {
            figure,
            state,
            site,
            region,
        },
    );
}

fn created_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut civ = None;
    let mut site_civ = None;
    let mut builder = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "civ_id" => civ = property.value_i32(),
            "site_civ_id" => site_civ = property.value_i32(),
            "builder_hfid" => builder = property.value_i32(),
            "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::CreatedSite {
            civ,
            site_civ,
            builder,
            site,
        },
    );
}

fn creature_devoured(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut victim = None;
    let mut eater = None;
    let mut entity = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "victim" | "victim_hfid" => victim = property.value_i32(),
            "eater" | "eater_hfid" => eater = property.value_i32(),
            "entity" | "entity_id" => entity = property.value_i32(),
            "site" | "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::CreatureDevoured {
            victim,
            eater,
            entity,
            site,
        },
    );
}

fn hf_abducted(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut target = None;
    let mut snatcher = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "target_hfid" => target = property.value_i32(),
            "snatcher_hfid" => snatcher = property.value_i32(),
            "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::HfAbducted {
            target,
            snatcher,
            site,
        },
    );
}

/// Shared mapping for the lone-figure site attacks.
fn figure_site_event(
    properties: &mut Vec<Property>,
) -> (Option<i32>, Option<i32>, Option<i32>, Option<i32>) {
    let mut attacker = None;
    let mut defender_civ = None;
    let mut site_civ = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "attacker_hfid" => attacker = property.value_i32(),
            "defender_civ_id" => defender_civ = property.value_i32(),
            "site_civ_id" => site_civ = property.value_i32(),
            "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    (attacker, defender_civ, site_civ, site)
}

fn hf_attacked_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let (attacker, defender_civ, site_civ, site) = figure_site_event(properties);
    finish(
        world,
        envelope,
        EventKind::HfAttackedSite {
            attacker,
            defender_civ,
            site_civ,
            site,
        },
    );
}

fn hf_destroyed_site(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let (attacker, defender_civ, site_civ, site) = figure_site_event(properties);
    finish(
        world,
        envelope,
        EventKind::HfDestroyedSite {
            attacker,
            defender_civ,
            site_civ,
            site,
        },
    );
}

fn hf_died(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut figure = None;
    let mut slayer = None;
    let mut slayer_race = None;
    let mut cause = None;
    let mut site = None;
    let mut region = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "hfid" => figure = property.value_i32(),
            "slayer_hfid" => slayer = property.value_i32(),
            "slayer_race" => slayer_race = owned_value(property),
            "cause" | "death_cause" => cause = owned_value(property),
            "site_id" => site = property.value_i32(),
            "subregion_id" => region = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::HfDied {
            figure,
            slayer,
            slayer_race,
            cause,
            site,
            region,
        },
    );
}

fn hf_simple_battle(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut subtype = None;
    let mut figure1 = None;
    let mut figure2 = None;
    let mut site = None;
    let mut region = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "subtype" => subtype = owned_value(property),
            "group_1_hfid" => figure1 = property.value_i32(),
            "group_2_hfid" => figure2 = property.value_i32(),
            "site_id" => site = property.value_i32(),
            "subregion_id" => region = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::HfSimpleBattle {
            subtype,
            figure1,
            figure2,
            site,
            region,
        },
    );
}

fn item_stolen(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut item = None;
    let mut thief = None;
    let mut entity = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "item" => item = owned_value(property),
            "histfig" | "hfid" => thief = property.value_i32(),
            "entity" | "entity_id" => entity = property.value_i32(),
            "site" | "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::ItemStolen {
            item,
            thief,
            entity,
            site,
        },
    );
}

fn new_site_leader(world: &mut World, properties: &mut Vec<Property>) {
    let envelope = envelope(properties);
    let mut attacker_civ = None;
    let mut defender_civ = None;
    let mut site_civ = None;
    let mut new_leader = None;
    let mut site = None;
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "attacker_civ_id" => attacker_civ = property.value_i32(),
            "defender_civ_id" => defender_civ = property.value_i32(),
            "site_civ_id" => site_civ = property.value_i32(),
            "new_leader_hfid" => new_leader = property.value_i32(),
            "site_id" => site = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    finish(
        world,
        envelope,
        EventKind::NewSiteLeader {
            attacker_civ,
            defender_civ,
            site_civ,
            new_leader,
            site,
        },
    );
}
