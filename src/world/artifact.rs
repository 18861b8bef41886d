//! Artifacts, regions, constructions, and written works

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub id: i32,
    pub name: String,
    pub item: Option<String>,
    pub material: Option<String>,
    pub site: Option<i32>,
    pub holder: Option<i32>,
    /// Written-content ids inscribed on the artifact; supplement-appended.
    pub writings: Vec<i32>,
}

impl Artifact {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
            item: None,
            material: None,
            site: None,
            holder: None,
            writings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub id: i32,
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UndergroundRegion {
    pub id: i32,
    pub kind: Option<String>,
    pub depth: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldConstruction {
    pub id: i32,
    pub name: String,
    pub kind: Option<String>,
    pub coords: Option<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenContent {
    pub id: i32,
    pub title: String,
    pub author: Option<i32>,
    pub form: Option<String>,
    /// Style descriptors; supplement-appended.
    pub styles: Vec<String>,
}

impl WrittenContent {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            title: String::new(),
            author: None,
            form: None,
            styles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtForm {
    pub id: i32,
    pub description: Option<String>,
}
