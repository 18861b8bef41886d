//! Post-ingestion resolution passes
//!
//! Each pass derives data the raw export never states explicitly, and
//! each is gated on its section having just finished so that everything
//! it reads already exists. Records are mutated here and nowhere else
//! after materialization.

mod collections;
mod eras;
mod indices;

use crate::parser::section::Section;
use crate::world::World;
use tracing::debug;

/// Run the pass (if any) gated on `section` having just closed.
pub fn section_finished(world: &mut World, section: Section) {
    match section {
        Section::Events => {
            debug!(target: "chronicler::resolve", "computing figure ages");
            compute_ages(world);
        }
        Section::HistoricalFigures => {
            debug!(target: "chronicler::resolve", "indexing figures");
            indices::index_figures(world);
        }
        Section::Entities => {
            debug!(target: "chronicler::resolve", "indexing entities and relations");
            indices::index_entities(world);
        }
        Section::Eras => {
            debug!(target: "chronicler::resolve", "segmenting eras");
            eras::segment(world);
        }
        Section::EventCollections => {
            debug!(target: "chronicler::resolve", "resolving collections");
            collections::resolve(world);
        }
        _ => {}
    }
}

/// Age = (death year if dead, else last recorded event year) − birth
/// year; undefined while the birth year is unknown, and undefined for
/// living figures when nothing was recorded at all.
fn compute_ages(world: &mut World) {
    let last_year = world.last_event_year();
    for figure in &mut world.figures {
        if figure.birth_year < 0 {
            continue;
        }
        if figure.death_year >= 0 {
            figure.age = Some(figure.death_year - figure.birth_year);
        } else if let Some(last_year) = last_year {
            figure.age = Some(last_year - figure.birth_year);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{EventKind, HistoricalFigure, WorldEvent};

    fn year_marker(id: i32, year: i32) -> WorldEvent {
        WorldEvent {
            id,
            year,
            seconds: -1,
            kind: EventKind::ChangeHfState {
                figure: None,
                state: None,
                site: None,
                region: None,
            },
        }
    }

    #[test]
    fn dead_figures_age_from_death_year() {
        let mut world = World::new();
        let mut figure = HistoricalFigure::new(1);
        figure.birth_year = 10;
        figure.death_year = 50;
        world.add_figure(figure);
        world.add_event(year_marker(0, 300));
        compute_ages(&mut world);
        assert_eq!(world.figure(1).unwrap().age, Some(40));
    }

    #[test]
    fn living_figures_age_from_last_recorded_year() {
        let mut world = World::new();
        let mut figure = HistoricalFigure::new(1);
        figure.birth_year = 10;
        world.add_figure(figure);
        world.add_event(year_marker(0, 300));
        compute_ages(&mut world);
        assert_eq!(world.figure(1).unwrap().age, Some(290));
    }

    #[test]
    fn unknown_birth_year_leaves_age_undefined() {
        let mut world = World::new();
        world.add_figure(HistoricalFigure::new(1));
        world.add_event(year_marker(0, 300));
        compute_ages(&mut world);
        assert_eq!(world.figure(1).unwrap().age, None);
    }
}
