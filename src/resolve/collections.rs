//! Collection resolution: nesting, beast attribution, back-fill
//!
//! Runs once the collections section closes, in a fixed order:
//! sub-collection references become edges first (beast attribution
//! looks through nested duels), then beast attacks are attributed and
//! back-filled, then conquests link to their deciding battles, then
//! raids propagate their site onto contained thefts.

use crate::world::{
    ordered_insert, CollectionKind, EventKind, OwnerPeriod, SiteOwner, World,
};
use std::collections::BTreeMap;

pub(super) fn resolve(world: &mut World) {
    resolve_nesting(world);
    resolve_beast_attacks(world);
    link_conquests(world);
    backfill_raids(world);
}

/// Sub-collection ids were stored as bare forward references during
/// materialization; turn the ones that exist into edges.
fn resolve_nesting(world: &mut World) {
    let declared: Vec<(i32, Vec<i32>)> = world
        .collections
        .iter()
        .map(|c| (c.id, c.collection_ids.clone()))
        .collect();
    for (id, references) in declared {
        let resolved: Vec<i32> = references
            .into_iter()
            .filter(|sub| world.collection(*sub).is_some())
            .collect();
        if let Some(collection) = world.collection_mut(id) {
            collection.sub_collections = resolved;
        }
    }
}

// ---------------------------------------------------------------------
// Beast attacks
// ---------------------------------------------------------------------

fn resolve_beast_attacks(world: &mut World) {
    let attacks: Vec<i32> = world
        .collections
        .iter()
        .filter(|c| c.is_beast_attack())
        .map(|c| c.id)
        .collect();

    for collection_id in attacks {
        identify_beast(world, collection_id);
        backfill_member_events(world, collection_id);
        if let Some(beast_id) = beast_of(world, collection_id) {
            if let Some(figure) = world.figure_mut(beast_id) {
                figure.beast_attacks.push(collection_id);
            }
        }
        infer_ownership(world, collection_id);
    }
}

/// Fixed priority, stopping at the first success: explicit
/// attacker/destroyer event; first combat participant; enemy-role
/// entity link; unique repeat slayer. Ambiguity leaves the beast
/// unresolved — no heuristic guess.
fn identify_beast(world: &mut World, collection_id: i32) {
    if beast_of(world, collection_id).is_some() {
        return;
    }
    let member_events = world.collection_event_ids_recursive(collection_id);
    let beast = explicit_attacker(world, &member_events)
        .or_else(|| first_combat_participant(world, &member_events))
        .or_else(|| enemy_link_figure(world, &member_events))
        .or_else(|| unique_repeat_slayer(world, &member_events));
    set_beast(world, collection_id, beast);
}

fn explicit_attacker(world: &World, event_ids: &[i32]) -> Option<i32> {
    let mut destroyer = None;
    for &id in event_ids {
        match world.event(id).map(|e| &e.kind) {
            Some(EventKind::HfAttackedSite {
                attacker: Some(attacker),
                ..
            }) => return Some(*attacker),
            Some(EventKind::HfDestroyedSite {
                attacker: Some(attacker),
                ..
            }) if destroyer.is_none() => destroyer = Some(*attacker),
            _ => {}
        }
    }
    destroyer
}

/// The beast engages the first fight in an attack.
fn first_combat_participant(world: &World, event_ids: &[i32]) -> Option<i32> {
    event_ids.iter().find_map(|&id| match world.event(id).map(|e| &e.kind) {
        Some(EventKind::HfSimpleBattle {
            figure1: Some(figure),
            ..
        }) => Some(*figure),
        _ => None,
    })
}

fn enemy_link_figure(world: &World, event_ids: &[i32]) -> Option<i32> {
    event_ids.iter().find_map(|&id| match world.event(id).map(|e| &e.kind) {
        Some(EventKind::AddHfEntityLink {
            figure: Some(figure),
            link,
            ..
        }) if *link == crate::world::EntityLinkRole::Enemy => Some(*figure),
        _ => None,
    })
}

/// Among the deaths in the collection, the unique slayer responsible
/// for more than one of them — and only when exactly one such slayer
/// exists.
fn unique_repeat_slayer(world: &World, event_ids: &[i32]) -> Option<i32> {
    let mut kills: BTreeMap<i32, u32> = BTreeMap::new();
    for &id in event_ids {
        if let Some(EventKind::HfDied {
            slayer: Some(slayer),
            ..
        }) = world.event(id).map(|e| &e.kind)
        {
            *kills.entry(*slayer).or_default() += 1;
        }
    }
    let mut repeat_slayers = kills.into_iter().filter(|&(_, count)| count > 1);
    match (repeat_slayers.next(), repeat_slayers.next()) {
        (Some((slayer, _)), None) => Some(slayer),
        _ => None,
    }
}

/// Theft, devouring, and abduction events directly in the attack
/// inherit the missing site/actor from the collection (and propagate a
/// found one back up), then are inserted into the relevant site's and
/// actor's chronological event lists.
fn backfill_member_events(world: &mut World, collection_id: i32) {
    let direct: Vec<i32> = world
        .collection(collection_id)
        .map(|c| c.event_ids.clone())
        .unwrap_or_default();

    for event_id in direct {
        let Some((entry, kind)) = world
            .event(event_id)
            .map(|e| (e.event_ref(), e.kind.clone()))
        else {
            continue;
        };
        match kind {
            EventKind::ItemStolen { thief, site, .. } => {
                if site.is_none() {
                    let collection_site = site_of(world, collection_id);
                    if let Some(event) = world.event_mut(event_id) {
                        if let EventKind::ItemStolen { site: slot, .. } = &mut event.kind {
                            *slot = collection_site;
                        }
                    }
                } else {
                    set_site(world, collection_id, site);
                }
                exchange_actor(world, collection_id, event_id, thief, set_thief);
                insert_at_site(world, collection_id, entry);
                insert_at_beast(world, collection_id, entry);
            }
            EventKind::CreatureDevoured { eater, .. } => {
                exchange_actor(world, collection_id, event_id, eater, set_eater);
                insert_at_beast(world, collection_id, entry);
            }
            EventKind::HfAbducted { snatcher, .. } => {
                exchange_actor(world, collection_id, event_id, snatcher, set_snatcher);
                insert_at_beast(world, collection_id, entry);
            }
            _ => {}
        }
    }
}

/// Actor missing on the event → inherit the beast; actor present and
/// beast missing → promote the actor to beast.
fn exchange_actor(
    world: &mut World,
    collection_id: i32,
    event_id: i32,
    actor: Option<i32>,
    set_actor: fn(&mut EventKind, Option<i32>),
) {
    let beast = beast_of(world, collection_id);
    if actor.is_none() {
        if let Some(event) = world.event_mut(event_id) {
            set_actor(&mut event.kind, beast);
        }
    } else if beast.is_none() {
        set_beast(world, collection_id, actor);
    }
}

fn set_thief(kind: &mut EventKind, actor: Option<i32>) {
    if let EventKind::ItemStolen { thief, .. } = kind {
        *thief = actor;
    }
}

fn set_eater(kind: &mut EventKind, actor: Option<i32>) {
    if let EventKind::CreatureDevoured { eater, .. } = kind {
        *eater = actor;
    }
}

fn set_snatcher(kind: &mut EventKind, actor: Option<i32>) {
    if let EventKind::HfAbducted { snatcher, .. } = kind {
        *snatcher = actor;
    }
}

fn insert_at_site(world: &mut World, collection_id: i32, entry: crate::world::EventRef) {
    if let Some(site_id) = site_of(world, collection_id) {
        if let Some(site) = world.site_mut(site_id) {
            ordered_insert(&mut site.events, entry);
        }
    }
}

fn insert_at_beast(world: &mut World, collection_id: i32, entry: crate::world::EventRef) {
    if let Some(beast_id) = beast_of(world, collection_id) {
        if let Some(figure) = world.figure_mut(beast_id) {
            ordered_insert(&mut figure.events, entry);
        }
    }
}

/// A beast attack with a known defender against a site with no
/// recorded ownership synthesizes an ancestral claim for the defender,
/// then for each lineage ancestor, stopping as soon as any period
/// exists.
fn infer_ownership(world: &mut World, collection_id: i32) {
    let info = world.collection(collection_id).and_then(|c| match &c.kind {
        CollectionKind::BeastAttack {
            defender: Some(defender),
            ..
        } => c.site.map(|site| (site, *defender)),
        _ => None,
    });
    let Some((site_id, defender)) = info else {
        return;
    };
    let unowned = world
        .site(site_id)
        .map(|s| s.owner_history.is_empty())
        .unwrap_or(false);
    if !unowned {
        return;
    }
    if let Some(site) = world.site_mut(site_id) {
        site.owner_history.push(ancestral_claim(defender));
    }
    let mut ancestor = world.entity(defender).and_then(|e| e.parent());
    while let Some(parent) = ancestor {
        let owned = world
            .site(site_id)
            .map(|s| !s.owner_history.is_empty())
            .unwrap_or(true);
        if owned {
            break;
        }
        if let Some(site) = world.site_mut(site_id) {
            site.owner_history.push(ancestral_claim(parent));
        }
        ancestor = world.entity(parent).and_then(|e| e.parent());
    }
}

fn ancestral_claim(entity: i32) -> OwnerPeriod {
    OwnerPeriod {
        owner: SiteOwner::Entity(entity),
        start_year: -1,
        end_year: -1,
        kind: "ancestral claim".to_string(),
    }
}

// ---------------------------------------------------------------------
// Collection field accessors
// ---------------------------------------------------------------------

fn beast_of(world: &World, collection_id: i32) -> Option<i32> {
    match world.collection(collection_id).map(|c| &c.kind) {
        Some(CollectionKind::BeastAttack { beast, .. }) => *beast,
        _ => None,
    }
}

fn set_beast(world: &mut World, collection_id: i32, new_beast: Option<i32>) {
    if new_beast.is_none() {
        return;
    }
    if let Some(collection) = world.collection_mut(collection_id) {
        if let CollectionKind::BeastAttack { beast, .. } = &mut collection.kind {
            *beast = new_beast;
        }
    }
}

fn site_of(world: &World, collection_id: i32) -> Option<i32> {
    world.collection(collection_id).and_then(|c| c.site)
}

fn set_site(world: &mut World, collection_id: i32, site: Option<i32>) {
    if site.is_none() {
        return;
    }
    if let Some(collection) = world.collection_mut(collection_id) {
        collection.site = site;
    }
}

// ---------------------------------------------------------------------
// Conquests and raids
// ---------------------------------------------------------------------

/// Each conquest links to the nearest battle below its own id; the
/// battle gets the back-edge and, when it lacks a defender the
/// conquest knows, the defender too.
fn link_conquests(world: &mut World) {
    let conquests: Vec<(i32, Option<i32>)> = world
        .collections
        .iter()
        .filter_map(|c| match &c.kind {
            CollectionKind::SiteConquered { defender, .. } => Some((c.id, *defender)),
            _ => None,
        })
        .collect();

    for (conquest_id, conquest_defender) in conquests {
        let mut found = None;
        for candidate in (0..conquest_id).rev() {
            if let Some(collection) = world.collection(candidate) {
                if collection.is_battle() {
                    found = Some(candidate);
                    break;
                }
            }
        }
        let Some(battle_id) = found else {
            continue;
        };
        if let Some(conquest) = world.collection_mut(conquest_id) {
            if let CollectionKind::SiteConquered { battle, .. } = &mut conquest.kind {
                *battle = Some(battle_id);
            }
        }
        if let Some(battle) = world.collection_mut(battle_id) {
            if let CollectionKind::Battle {
                conquering,
                defender,
                ..
            } = &mut battle.kind
            {
                *conquering = Some(conquest_id);
                if defender.is_none() && conquest_defender.is_some() {
                    *defender = conquest_defender;
                }
            }
        }
    }
}

/// Raids with a known site propagate it onto contained thefts that
/// still lack one.
fn backfill_raids(world: &mut World) {
    let raids: Vec<(i32, i32)> = world
        .collections
        .iter()
        .filter_map(|c| match &c.kind {
            CollectionKind::Raid { .. } => c.site.map(|site| (c.id, site)),
            _ => None,
        })
        .collect();

    for (raid_id, site) in raids {
        for event_id in world.collection_event_ids_recursive(raid_id) {
            if let Some(event) = world.event_mut(event_id) {
                if let EventKind::ItemStolen { site: slot, .. } = &mut event.kind {
                    if slot.is_none() {
                        *slot = Some(site);
                    }
                }
            }
        }
    }
}
