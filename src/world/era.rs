//! Named eras bucketing events and collections by year range

use serde::Serialize;

/// A named epoch. The start year comes from the export (-1 when the era
/// predates recorded history); the end year, the member lists, and the
/// display strings are derived by the resolver's segmentation pass.
#[derive(Debug, Clone, Serialize)]
pub struct Era {
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    /// Event ids within the era's range, chronological.
    pub events: Vec<i32>,
    /// Collection ids overlapping the era's range, by start year.
    pub collections: Vec<i32>,
    /// Human-readable length, e.g. "250 years".
    pub duration: String,
    /// "start - end" label; ".." stands for an undefined boundary.
    pub label: String,
}

impl Era {
    pub fn new(name: impl Into<String>, start_year: i32) -> Self {
        Self {
            name: name.into(),
            start_year,
            end_year: -1,
            events: Vec::new(),
            collections: Vec::new(),
            duration: String::new(),
            label: String::new(),
        }
    }
}
