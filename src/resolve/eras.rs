//! Era segmentation: derived end years and per-era partitions

use crate::world::World;

/// Each era's end year is the next era's start year minus one; the last
/// era ends at the last recorded event year. Events partition by year
/// containment, collections by interval overlap. -1 stands for an
/// undefined boundary year throughout.
pub(super) fn segment(world: &mut World) {
    if world.eras.is_empty() {
        return;
    }
    let last_recorded = world.last_event_year().unwrap_or(-1);

    let starts: Vec<i32> = world.eras.iter().map(|e| e.start_year).collect();
    let count = world.eras.len();
    for (position, era) in world.eras.iter_mut().enumerate() {
        era.end_year = if position + 1 < count {
            starts[position + 1] - 1
        } else {
            last_recorded
        };
    }

    let events: Vec<(i32, i32)> = world.events.iter().map(|e| (e.id, e.year)).collect();
    let collections: Vec<(i32, i32, i32)> = world
        .collections
        .iter()
        .map(|c| (c.id, c.start_year, c.end_year))
        .collect();

    for era in &mut world.eras {
        let (start, end) = (era.start_year, era.end_year);

        let mut members: Vec<(i32, i32)> = events
            .iter()
            .filter(|(_, year)| *year >= start && *year <= end)
            .copied()
            .collect();
        members.sort_by_key(|&(id, year)| (year, id));
        era.events = members.into_iter().map(|(id, _)| id).collect();

        let mut overlapping: Vec<(i32, i32)> = collections
            .iter()
            .filter(|&&(_, s, e)| overlaps(s, e, start, end))
            .map(|&(id, s, _)| (id, s))
            .collect();
        overlapping.sort_by_key(|&(id, s)| (s, id));
        era.collections = overlapping.into_iter().map(|(id, _)| id).collect();

        era.duration = if start == -1 && end > 0 {
            format!("{end} years")
        } else {
            format!("{} years", end - start)
        };
        let left = if start == -1 {
            "..".to_string()
        } else {
            start.to_string()
        };
        let right = if end == last_recorded {
            "..".to_string()
        } else {
            end.to_string()
        };
        era.label = format!("{left} - {right}");
    }
}

/// The five-clause interval-overlap rule. -1 end years mean open-ended.
fn overlaps(s: i32, e: i32, start: i32, end: i32) -> bool {
    // fully inside
    (s >= start && e <= end && e != -1)
        // starts inside, ends open or after
        || (s >= start && s <= end)
        // starts before, ends inside
        || (e >= start && e <= end && e != -1)
        // spans the whole era
        || (s <= start && e >= end)
        // open-ended, starting at or before the era start
        || (s <= start && e == -1)
}
