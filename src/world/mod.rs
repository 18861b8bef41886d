//! Typed records and the World graph they are materialized into

mod artifact;
mod collection;
mod diagnostics;
mod entity;
mod era;
mod event;
mod figure;
mod graph;
mod site;

pub use artifact::{Artifact, ArtForm, Region, UndergroundRegion, WorldConstruction, WrittenContent};
pub use collection::{CollectionKind, EventCollection};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use entity::{
    Entity, EntityPopulation, EntityPosition, EntityRelation, EntityRelationKind, Occasion,
    PositionAssignment,
};
pub use era::Era;
pub use event::{
    ordered_insert, EntityLinkRole, EventKind, EventRef, SiteLinkRole, WorldEvent,
};
pub use figure::{EntityLink, FigureLink, HistoricalFigure, SiteLink};
pub use graph::{World, WorldIndex};
pub use site::{OwnerPeriod, Site, SiteOwner, Structure};
