//! Factories for the polymorphic event-collections section
//!
//! Collections share an envelope (id, year range, site, membership) and
//! differ in their variant payload. Sub-collection ids are recorded as
//! bare forward references; the resolver turns them into edges once the
//! whole section exists.

use super::{owned_value, Factory};
use crate::parser::property::Property;
use crate::world::{CollectionKind, EventCollection, World};

pub(super) const COLLECTION_FACTORIES: &[(&str, Factory)] = &[
    ("abduction", abduction),
    ("battle", battle),
    ("beast attack", beast_attack),
    ("duel", duel),
    ("insurrection", insurrection),
    ("journey", journey),
    ("occasion", occasion),
    ("purge", purge),
    ("raid", raid),
    ("site conquered", site_conquered),
    ("theft", theft),
    ("war", war),
];

fn envelope(properties: &mut Vec<Property>, kind: CollectionKind) -> EventCollection {
    let mut collection = EventCollection::new(-1, kind);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => collection.id = property.value_i32().unwrap_or(-1),
            "start_year" => collection.start_year = property.value_i32().unwrap_or(-1),
            "end_year" => collection.end_year = property.value_i32().unwrap_or(-1),
            "site_id" => collection.site = property.value_i32(),
            "subregion_id" => collection.region = property.value_i32(),
            "parent_eventcol" => collection.parent = property.value_i32(),
            "event" => {
                if let Some(id) = property.value_i32() {
                    collection.event_ids.push(id);
                }
            }
            "eventcol" => {
                if let Some(id) = property.value_i32() {
                    collection.collection_ids.push(id);
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    collection
}

fn take_i32(properties: &mut [Property], names: &[&str]) -> Option<i32> {
    for property in properties.iter_mut() {
        if names.contains(&property.name.as_str()) {
            property.known = true;
            return property.value_i32();
        }
    }
    None
}

fn take_string(properties: &mut [Property], name: &str) -> Option<String> {
    for property in properties.iter_mut() {
        if property.name == name {
            property.known = true;
            return owned_value(property);
        }
    }
    None
}

fn abduction(world: &mut World, properties: &mut Vec<Property>) {
    let snatcher = take_i32(properties, &["snatcher_hfid"]);
    let target = take_i32(properties, &["target_hfid"]);
    let collection = envelope(properties, CollectionKind::Abduction { snatcher, target });
    world.add_collection(collection);
}

fn battle(world: &mut World, properties: &mut Vec<Property>) {
    let name = take_string(properties, "name");
    let war = take_i32(properties, &["war_eventcol"]);
    let attacker = take_i32(properties, &["attacking_enemy_id"]);
    let defender = take_i32(properties, &["defending_enemy_id"]);
    let collection = envelope(
        properties,
        CollectionKind::Battle {
            name,
            war,
            attacker,
            defender,
            conquering: None,
        },
    );
    world.add_collection(collection);
}

fn beast_attack(world: &mut World, properties: &mut Vec<Property>) {
    let ordinal = take_i32(properties, &["ordinal"]);
    let beast = take_i32(properties, &["beast_hfid"]);
    let defender = take_i32(properties, &["defending_enemy_id"]);
    let collection = envelope(
        properties,
        CollectionKind::BeastAttack {
            ordinal,
            beast,
            defender,
        },
    );
    world.add_collection(collection);
}

fn duel(world: &mut World, properties: &mut Vec<Property>) {
    let attacker = take_i32(properties, &["attacking_hfid"]);
    let defender = take_i32(properties, &["defending_hfid"]);
    let collection = envelope(properties, CollectionKind::Duel { attacker, defender });
    world.add_collection(collection);
}

fn insurrection(world: &mut World, properties: &mut Vec<Property>) {
    let target = take_i32(properties, &["target_enid", "target_civ_id"]);
    let collection = envelope(properties, CollectionKind::Insurrection { target });
    world.add_collection(collection);
}

fn journey(world: &mut World, properties: &mut Vec<Property>) {
    let ordinal = take_i32(properties, &["ordinal"]);
    let collection = envelope(properties, CollectionKind::Journey { ordinal });
    world.add_collection(collection);
}

fn occasion(world: &mut World, properties: &mut Vec<Property>) {
    let entity = take_i32(properties, &["civ_id", "entity_id"]);
    let occasion = take_i32(properties, &["occasion_id"]);
    let collection = envelope(properties, CollectionKind::Occasion { entity, occasion });
    world.add_collection(collection);
}

fn purge(world: &mut World, properties: &mut Vec<Property>) {
    let adjective = take_string(properties, "adjective");
    let collection = envelope(properties, CollectionKind::Purge { adjective });
    world.add_collection(collection);
}

fn raid(world: &mut World, properties: &mut Vec<Property>) {
    let ordinal = take_i32(properties, &["ordinal"]);
    let attacker = take_i32(properties, &["attacking_enemy_id"]);
    let defender = take_i32(properties, &["defending_enemy_id"]);
    let collection = envelope(
        properties,
        CollectionKind::Raid {
            attacker,
            defender,
            ordinal,
        },
    );
    world.add_collection(collection);
}

fn site_conquered(world: &mut World, properties: &mut Vec<Property>) {
    let ordinal = take_i32(properties, &["ordinal"]);
    let attacker = take_i32(properties, &["attacking_enemy_id"]);
    let defender = take_i32(properties, &["defending_enemy_id"]);
    let collection = envelope(
        properties,
        CollectionKind::SiteConquered {
            ordinal,
            attacker,
            defender,
            battle: None,
        },
    );
    world.add_collection(collection);
}

fn theft(world: &mut World, properties: &mut Vec<Property>) {
    let entity = take_i32(properties, &["entity_id"]);
    let ordinal = take_i32(properties, &["ordinal"]);
    let collection = envelope(properties, CollectionKind::Theft { entity, ordinal });
    world.add_collection(collection);
}

fn war(world: &mut World, properties: &mut Vec<Property>) {
    let name = take_string(properties, "name");
    let aggressor = take_i32(properties, &["aggressor_ent_id"]);
    let defender = take_i32(properties, &["defender_ent_id"]);
    let collection = envelope(
        properties,
        CollectionKind::War {
            name,
            aggressor,
            defender,
        },
    );
    world.add_collection(collection);
}
