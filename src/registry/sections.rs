//! Factories for the non-polymorphic sections
//!
//! Each factory is one mechanical mapping from property names to a
//! record's attributes. Recognized properties are flagged known; the
//! registry reports whatever is left over.

use super::{consume_sub, owned_value, sub_i32, sub_string, Factory};
use crate::parser::property::Property;
use crate::parser::section::Section;
use crate::world::{
    Artifact, ArtForm, Entity, EntityLink, EntityLinkRole, EntityPopulation, EntityPosition,
    EntityRelation, EntityRelationKind, Era, FigureLink, HistoricalFigure, Occasion,
    PositionAssignment, Region, Site, SiteLink, SiteLinkRole, Structure, UndergroundRegion, World,
    WorldConstruction, WrittenContent,
};

pub(super) const SECTION_FACTORIES: &[(Section, Factory)] = &[
    (Section::Name, world_name),
    (Section::AlternativeName, world_alternative_name),
    (Section::Regions, region),
    (Section::UndergroundRegions, underground_region),
    (Section::Sites, site),
    (Section::WorldConstructions, world_construction),
    (Section::Artifacts, artifact),
    (Section::HistoricalFigures, historical_figure),
    (Section::EntityPopulations, entity_population),
    (Section::Entities, entity),
    (Section::Eras, era),
    (Section::WrittenContent, written_content),
    (Section::PoeticForms, poetic_form),
    (Section::MusicalForms, musical_form),
    (Section::DanceForms, dance_form),
];

fn world_name(world: &mut World, properties: &mut Vec<Property>) {
    if let Some(first) = properties.first_mut() {
        first.known = true;
        world.name = first.value_str().to_string();
    }
}

fn world_alternative_name(world: &mut World, properties: &mut Vec<Property>) {
    if let Some(first) = properties.first_mut() {
        first.known = true;
        world.alternative_name = first.value_str().to_string();
    }
}

fn region(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = Region {
        id: -1,
        name: String::new(),
        kind: None,
    };
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "type" => record.kind = owned_value(property),
            _ => continue,
        }
        property.known = true;
    }
    world.regions.push(record);
}

fn underground_region(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = UndergroundRegion {
        id: -1,
        kind: None,
        depth: None,
    };
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "type" => record.kind = owned_value(property),
            "depth" => record.depth = property.value_i32(),
            _ => continue,
        }
        property.known = true;
    }
    world.underground_regions.push(record);
}

fn site(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = Site::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "type" => record.kind = owned_value(property),
            "coords" => record.coords = property.value_coords(),
            "civ_id" => record.civ = property.value_i32(),
            "cur_owner_id" => record.current_owner = property.value_i32(),
            "structures" => {
                for child in property.sub_properties.iter_mut() {
                    child.known = true;
                    record.structures.push(Structure {
                        id: sub_i32(child, "id").unwrap_or(-1),
                        kind: sub_string(child, "type"),
                        name: sub_string(child, "name"),
                    });
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.add_site(record);
}

fn world_construction(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = WorldConstruction {
        id: -1,
        name: String::new(),
        kind: None,
        coords: None,
    };
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "type" => record.kind = owned_value(property),
            "coords" => record.coords = property.value_coords(),
            _ => continue,
        }
        property.known = true;
    }
    world.world_constructions.push(record);
}

fn artifact(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = Artifact::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "item" => {
                record.item = owned_value(property).or_else(|| sub_string(property, "name_string"));
            }
            "mat" => record.material = owned_value(property),
            "site_id" => record.site = property.value_i32(),
            "holder_hfid" => record.holder = property.value_i32(),
            "writing" => {
                if let Some(id) = property.value_i32() {
                    record.writings.push(id);
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.add_artifact(record);
}

fn historical_figure(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = HistoricalFigure::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "race" => record.race = owned_value(property),
            "caste" => record.caste = owned_value(property),
            "appeared" => record.appeared_year = property.value_i32().unwrap_or(-1),
            "birth_year" => record.birth_year = property.value_i32().unwrap_or(-1),
            "death_year" => record.death_year = property.value_i32().unwrap_or(-1),
            "associated_type" => record.associated_kind = owned_value(property),
            "deity" => record.deity = true,
            "force" => record.force = true,
            "goal" => {
                if let Some(goal) = owned_value(property) {
                    record.goals.push(goal);
                }
            }
            "sphere" => {
                if let Some(sphere) = owned_value(property) {
                    record.spheres.push(sphere);
                }
            }
            "entity_link" => {
                let role = sub_string(property, "link_type")
                    .map(|raw| EntityLinkRole::parse(&raw))
                    .unwrap_or(EntityLinkRole::Other);
                if let Some(entity) = sub_i32(property, "entity_id") {
                    record.entity_links.push(EntityLink {
                        role,
                        entity,
                        strength: sub_i32(property, "link_strength"),
                    });
                }
            }
            "site_link" => {
                let role = sub_string(property, "link_type")
                    .map(|raw| SiteLinkRole::parse(&raw))
                    .unwrap_or(SiteLinkRole::Other);
                if let Some(site) = sub_i32(property, "site_id") {
                    record.site_links.push(SiteLink {
                        role,
                        site,
                        entity: sub_i32(property, "entity_id"),
                    });
                }
            }
            "hf_link" => {
                if let Some(target) = sub_i32(property, "hfid") {
                    record.figure_links.push(FigureLink {
                        role: sub_string(property, "link_type").unwrap_or_default(),
                        target,
                        strength: sub_i32(property, "link_strength"),
                    });
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.add_figure(record);
}

fn entity_population(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = EntityPopulation::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "civ_id" => record.civ = property.value_i32(),
            "race" => {
                if let Some((race, count)) = property
                    .value_str()
                    .split_once(':')
                    .and_then(|(race, count)| Some((race.to_string(), count.trim().parse().ok()?)))
                {
                    record.races.push((race, count));
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.entity_populations.push(record);
}

fn entity(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = Entity::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "name" => record.name = property.value_str().to_string(),
            "race" => record.race = owned_value(property),
            "type" => record.kind = owned_value(property),
            "entity_link" => {
                let kind = sub_string(property, "type")
                    .map(|raw| EntityRelationKind::parse(&raw))
                    .unwrap_or(EntityRelationKind::Other);
                if let Some(target) = sub_i32(property, "target") {
                    record.relations.push(EntityRelation {
                        kind,
                        target,
                        strength: sub_i32(property, "strength"),
                    });
                }
            }
            "child" => {
                if let Some(child) = property.value_i32() {
                    record.children.push(child);
                }
            }
            "histfig_id" => {
                if let Some(member) = property.value_i32() {
                    record.members.push(member);
                }
            }
            "entity_position" => {
                record.positions.push(EntityPosition {
                    id: sub_i32(property, "id").unwrap_or(-1),
                    name: sub_string(property, "name"),
                });
            }
            "entity_position_assignment" => {
                record.position_assignments.push(PositionAssignment {
                    id: sub_i32(property, "id").unwrap_or(-1),
                    figure: sub_i32(property, "histfig"),
                    position: sub_i32(property, "position_id"),
                });
            }
            "occasion" => {
                record.occasions.push(Occasion {
                    id: sub_i32(property, "id").unwrap_or(-1),
                    name: sub_string(property, "name"),
                });
            }
            "weapon" => {
                if let Some(weapon) = owned_value(property) {
                    record.weapons.push(weapon);
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.add_entity(record);
}

fn era(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = Era::new("", -1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "name" => record.name = property.value_str().to_string(),
            "start_year" => record.start_year = property.value_i32().unwrap_or(-1),
            _ => continue,
        }
        property.known = true;
    }
    world.eras.push(record);
}

fn written_content(world: &mut World, properties: &mut Vec<Property>) {
    let mut record = WrittenContent::new(-1);
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "title" => record.title = property.value_str().to_string(),
            "author_hfid" => record.author = property.value_i32(),
            "form" => record.form = owned_value(property),
            "style" => {
                if let Some(style) = owned_value(property) {
                    record.styles.push(style);
                }
            }
            _ => continue,
        }
        property.known = true;
    }
    world.written_contents.push(record);
}

fn art_form(properties: &mut Vec<Property>) -> ArtForm {
    let mut record = ArtForm {
        id: -1,
        description: None,
    };
    for property in properties.iter_mut() {
        match property.name.as_str() {
            "id" => record.id = property.value_i32().unwrap_or(-1),
            "description" => record.description = owned_value(property),
            _ => continue,
        }
        property.known = true;
    }
    record
}

fn poetic_form(world: &mut World, properties: &mut Vec<Property>) {
    let form = art_form(properties);
    world.poetic_forms.push(form);
}

fn musical_form(world: &mut World, properties: &mut Vec<Property>) {
    let form = art_form(properties);
    world.musical_forms.push(form);
}

fn dance_form(world: &mut World, properties: &mut Vec<Property>) {
    let form = art_form(properties);
    world.dance_forms.push(form);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, value: &str) -> Property {
        Property::scalar(name, value)
    }

    #[test]
    fn figure_factory_maps_core_fields() {
        let mut world = World::new();
        let mut props = vec![
            scalar("id", "12"),
            scalar("name", "urist mcfounder"),
            scalar("race", "DWARF"),
            scalar("birth_year", "20"),
            scalar("death_year", "95"),
            Property::empty("deity"),
        ];
        historical_figure(&mut world, &mut props);
        let figure = world.figure(12).unwrap();
        assert_eq!(figure.birth_year, 20);
        assert!(figure.is_dead());
        assert!(figure.deity);
        assert!(props.iter().all(|p| p.known));
    }

    #[test]
    fn figure_links_parse_from_subtrees() {
        let mut world = World::new();
        let mut link = Property::empty("entity_link");
        link.sub_properties.push(scalar("link_type", "enemy"));
        link.sub_properties.push(scalar("entity_id", "3"));
        let mut props = vec![scalar("id", "0"), link];
        historical_figure(&mut world, &mut props);
        let figure = world.figure(0).unwrap();
        assert_eq!(figure.entity_links.len(), 1);
        assert_eq!(figure.entity_links[0].role, EntityLinkRole::Enemy);
        assert_eq!(figure.entity_links[0].entity, 3);
    }

    #[test]
    fn site_factory_collects_structures() {
        let mut world = World::new();
        let mut structures = Property::empty("structures");
        let mut keep = Property::empty("structure");
        keep.sub_properties.push(scalar("id", "0"));
        keep.sub_properties.push(scalar("name", "keep"));
        structures.sub_properties.push(keep);
        let mut props = vec![scalar("id", "5"), scalar("name", "Boatmurdered"), structures];
        site(&mut world, &mut props);
        let site = world.site(5).unwrap();
        assert_eq!(site.structures.len(), 1);
        assert_eq!(site.structures[0].name.as_deref(), Some("keep"));
    }

    #[test]
    fn population_race_pairs_split_on_colon() {
        let mut world = World::new();
        let mut props = vec![scalar("id", "0"), scalar("race", "dwarves:104")];
        entity_population(&mut world, &mut props);
        assert_eq!(world.entity_populations[0].races, vec![("dwarves".to_string(), 104)]);
    }

    #[test]
    fn unrecognized_property_stays_unknown() {
        let mut world = World::new();
        let mut props = vec![scalar("id", "1"), scalar("holiness", "9")];
        region(&mut world, &mut props);
        assert!(props[0].known);
        assert!(!props[1].known);
    }
}
