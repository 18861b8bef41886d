//! Cross-index passes: name-keyed and relation-keyed lookups

use crate::world::World;
use std::collections::BTreeMap;

/// After the figures section: sorted name index for binary search.
pub(super) fn index_figures(world: &mut World) {
    let mut by_name: Vec<(String, i32)> = world
        .figures
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| (f.name.to_lowercase(), f.id))
        .collect();
    by_name.sort();
    world.index.figures_by_name = by_name;
}

/// After the entities section: entity name index plus the
/// figure↔entity, figure↔site, and entity↔entity relation maps.
pub(super) fn index_entities(world: &mut World) {
    let mut by_name: Vec<(String, i32)> = world
        .entities
        .iter()
        .filter(|e| !e.name.is_empty())
        .map(|e| (e.name.to_lowercase(), e.id))
        .collect();
    by_name.sort();
    world.index.entities_by_name = by_name;

    let mut figure_entities: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    let mut entity_figures: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    let mut figure_sites: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    let mut site_figures: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for figure in &world.figures {
        for link in &figure.entity_links {
            figure_entities.entry(figure.id).or_default().push(link.entity);
            entity_figures.entry(link.entity).or_default().push(figure.id);
        }
        for link in &figure.site_links {
            figure_sites.entry(figure.id).or_default().push(link.site);
            site_figures.entry(link.site).or_default().push(figure.id);
        }
    }

    let mut entity_entities: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for entity in &world.entities {
        for relation in &entity.relations {
            entity_entities.entry(entity.id).or_default().push(relation.target);
            entity_entities.entry(relation.target).or_default().push(entity.id);
        }
    }

    for map in [
        &mut figure_entities,
        &mut entity_figures,
        &mut figure_sites,
        &mut site_figures,
        &mut entity_entities,
    ] {
        for ids in map.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }
    }

    world.index.figure_entities = figure_entities;
    world.index.entity_figures = entity_figures;
    world.index.figure_sites = figure_sites;
    world.index.site_figures = site_figures;
    world.index.entity_entities = entity_entities;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{
        Entity, EntityLink, EntityLinkRole, EntityRelation, EntityRelationKind, HistoricalFigure,
        SiteLink, SiteLinkRole,
    };

    #[test]
    fn name_index_is_sorted_and_searchable() {
        let mut world = World::new();
        for (id, name) in [(0, "Zasit"), (1, "Atir"), (2, "Meng")] {
            let mut figure = HistoricalFigure::new(id);
            figure.name = name.to_string();
            world.add_figure(figure);
        }
        index_figures(&mut world);
        let names: Vec<_> = world
            .index
            .figures_by_name
            .iter()
            .map(|(n, _)| n.clone())
            .collect();
        assert_eq!(names, ["atir", "meng", "zasit"]);
        assert_eq!(world.figure_by_name("MENG").unwrap().id, 2);
        assert!(world.figure_by_name("nobody").is_none());
    }

    #[test]
    fn relation_maps_cover_both_directions() {
        let mut world = World::new();
        let mut figure = HistoricalFigure::new(7);
        figure.name = "Urist".into();
        figure.entity_links.push(EntityLink {
            role: EntityLinkRole::Member,
            entity: 2,
            strength: None,
        });
        figure.site_links.push(SiteLink {
            role: SiteLinkRole::Home,
            site: 4,
            entity: None,
        });
        world.add_figure(figure);
        let mut entity = Entity::new(2);
        entity.name = "The Bronze Union".into();
        entity.relations.push(EntityRelation {
            kind: EntityRelationKind::Parent,
            target: 9,
            strength: None,
        });
        world.add_entity(entity);

        index_entities(&mut world);
        assert_eq!(world.index.figure_entities[&7], vec![2]);
        assert_eq!(world.index.entity_figures[&2], vec![7]);
        assert_eq!(world.index.figure_sites[&7], vec![4]);
        assert_eq!(world.index.site_figures[&4], vec![7]);
        assert_eq!(world.index.entity_entities[&2], vec![9]);
        assert_eq!(world.index.entity_entities[&9], vec![2]);
    }

    #[test]
    fn duplicate_links_are_deduplicated() {
        let mut world = World::new();
        let mut figure = HistoricalFigure::new(1);
        figure.name = "Asob".into();
        for _ in 0..2 {
            figure.entity_links.push(EntityLink {
                role: EntityLinkRole::Member,
                entity: 5,
                strength: None,
            });
        }
        world.add_figure(figure);
        index_entities(&mut world);
        assert_eq!(world.index.figure_entities[&1], vec![5]);
    }
}
