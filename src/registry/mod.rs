//! Materializer registry: dispatch from parsed items to typed records
//!
//! An open, declaratively populated table. Plain sections map straight
//! to one factory; polymorphic sections (events, event collections)
//! dispatch on the value of the property literally named `type`, with
//! absence defaulting to the `undefined` bucket. Unregistered sections
//! or discriminators are logged and the record is dropped whole — no
//! partial materialization.
//!
//! Growing the catalog means adding a row to the tables in
//! `sections`/`events`/`collections`; the protocol components never
//! change for a new variant.

mod collections;
mod events;
mod sections;

use crate::parser::property::{find_property, find_property_mut, Property};
use crate::parser::section::Section;
use crate::world::World;
use std::collections::HashMap;

/// A factory consumes an item's property list and appends one concrete
/// record to the World, marking every property it recognized.
pub type Factory = fn(&mut World, &mut Vec<Property>);

enum SectionMaterializer {
    Single(Factory),
    Discriminated(HashMap<&'static str, Factory>),
}

pub struct MaterializerRegistry {
    sections: HashMap<Section, SectionMaterializer>,
}

impl Default for MaterializerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MaterializerRegistry {
    pub fn empty() -> Self {
        Self {
            sections: HashMap::new(),
        }
    }

    /// The full catalog: every plain section plus the event and
    /// collection variant tables.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for &(section, factory) in sections::SECTION_FACTORIES {
            registry.register(section, factory);
        }
        for &(name, factory) in events::EVENT_FACTORIES {
            registry.register_variant(Section::Events, name, factory);
        }
        for &(name, factory) in collections::COLLECTION_FACTORIES {
            registry.register_variant(Section::EventCollections, name, factory);
        }
        registry
    }

    pub fn register(&mut self, section: Section, factory: Factory) {
        self.sections
            .insert(section, SectionMaterializer::Single(factory));
    }

    pub fn register_variant(
        &mut self,
        section: Section,
        discriminator: &'static str,
        factory: Factory,
    ) {
        let entry = self
            .sections
            .entry(section)
            .or_insert_with(|| SectionMaterializer::Discriminated(HashMap::new()));
        if let SectionMaterializer::Discriminated(variants) = entry {
            variants.insert(discriminator, factory);
        }
    }

    /// Materialize one item, or log and drop it when no factory matches.
    pub fn materialize(&self, world: &mut World, section: Section, mut properties: Vec<Property>) {
        let Some(materializer) = self.sections.get(&section) else {
            world
                .diagnostics
                .report(format!("no materializer for section: {section}"));
            return;
        };
        match materializer {
            SectionMaterializer::Single(factory) => {
                factory(world, &mut properties);
                world.report_unknown_properties(&section.to_string(), &properties);
            }
            SectionMaterializer::Discriminated(variants) => {
                let discriminator = find_property(&properties, "type")
                    .map(|p| p.value_str().to_string())
                    .unwrap_or_else(|| "undefined".to_string());
                let Some(factory) = variants.get(discriminator.as_str()) else {
                    world.diagnostics.report_detail(
                        format!("unknown {section} variant"),
                        discriminator,
                    );
                    return;
                };
                if let Some(kind) = find_property_mut(&mut properties, "type") {
                    kind.known = true;
                }
                factory(world, &mut properties);
                world.report_unknown_properties(
                    &format!("{section} '{discriminator}'"),
                    &properties,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------
// Shared field-consumption helpers for factories
// ---------------------------------------------------------------------

/// Find a sub-property by name, marking it known.
pub(crate) fn consume_sub<'a>(
    property: &'a mut Property,
    name: &str,
) -> Option<&'a mut Property> {
    for sub in property.sub_properties.iter_mut() {
        if sub.name == name {
            sub.known = true;
            return Some(sub);
        }
    }
    None
}

pub(crate) fn sub_i32(property: &mut Property, name: &str) -> Option<i32> {
    consume_sub(property, name).and_then(|s| s.value_i32())
}

pub(crate) fn sub_string(property: &mut Property, name: &str) -> Option<String> {
    consume_sub(property, name).and_then(|s| s.value.clone())
}

/// A non-empty owned copy of the scalar value.
pub(crate) fn owned_value(property: &Property) -> Option<String> {
    property.value.as_deref().and_then(|v| {
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    })
}
