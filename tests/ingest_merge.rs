//! Dual-stream ingestion: merge protocol over real file pairs

mod common;

use chronicler::world::EntityRelationKind;
use common::write_export;
use tempfile::TempDir;

#[tokio::test]
async fn site_structures_replace_wholesale() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<sites><site><id>5</id><name>X</name><structures></structures></site></sites>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<sites><site><id>5</id><structures>\
         <structure><id>0</id><name>A</name></structure>\
         <structure><id>1</id><name>B</name></structure>\
         </structures></site></sites>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    let site = world.site(5).unwrap();
    assert_eq!(site.name, "X");
    let names: Vec<_> = site
        .structures
        .iter()
        .map(|s| s.name.clone().unwrap_or_default())
        .collect();
    // Wholesale replace, not concatenation.
    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
async fn supplement_fields_enrich_matching_items() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<sites>\
         <site><id>0</id><name>Reveredtour</name></site>\
         <site><id>1</id><name>Boatmurdered</name></site>\
         </sites>",
    );
    // Supplement covers a strict subset: only site 1.
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<sites><site><id>1</id><civ_id>42</civ_id><cur_owner_id>7</cur_owner_id></site></sites>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    assert_eq!(world.site(0).unwrap().civ, None);
    assert_eq!(world.site(1).unwrap().civ, Some(42));
    assert_eq!(world.site(1).unwrap().current_owner, Some(7));
    // A found supplement produces no missing-supplement note.
    assert!(world
        .diagnostics
        .entries()
        .iter()
        .all(|d| !d.message.contains("supplementary export")));
}

#[tokio::test]
async fn entity_links_append_across_streams() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<entities><entity><id>0</id><name>The Bronze Union</name></entity></entities>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<entities><entity><id>0</id>\
         <entity_link><type>PARENT</type><target>9</target></entity_link>\
         <histfig_id>4</histfig_id>\
         <histfig_id>5</histfig_id>\
         <weapon>battle axe</weapon>\
         </entity></entities>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    let entity = world.entity(0).unwrap();
    assert_eq!(entity.name, "The Bronze Union");
    assert_eq!(entity.relations.len(), 1);
    assert_eq!(entity.relations[0].kind, EntityRelationKind::Parent);
    assert_eq!(entity.relations[0].target, 9);
    assert_eq!(entity.parent(), Some(9));
    assert_eq!(entity.members, vec![4, 5]);
    assert_eq!(entity.weapons, vec!["battle axe"]);
}

#[tokio::test]
async fn authoritative_event_fields_keep_primary_values() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<historical_events>\
         <historical_event><id>0</id><year>10</year><type>change hf state</type><hfid>1</hfid><state>settled</state></historical_event>\
         </historical_events>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<historical_events>\
         <historical_event><id>0</id><state>wandering</state><site_id>3</site_id></historical_event>\
         </historical_events>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    match &world.events[0].kind {
        chronicler::world::EventKind::ChangeHfState { state, site, .. } => {
            // The primary's state code wins; the new site is adopted.
            assert_eq!(state.as_deref(), Some("settled"));
            assert_eq!(*site, Some(3));
        }
        other => panic!("wrong kind: {other:?}"),
    }
}

#[tokio::test]
async fn placeholder_records_are_stepped_over() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<sites><site><id>3</id><name>Last</name></site></sites>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<sites>\
         <site><id>-1</id></site>\
         <site><id>3</id><civ_id>8</civ_id></site>\
         </sites>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();
    assert_eq!(world.site(3).unwrap().civ, Some(8));
}

#[tokio::test]
async fn stale_supplement_sections_commit_when_primary_moves_on() {
    let dir = TempDir::new().unwrap();
    // Primary has no artifacts at all; supplement carries one. When the
    // primary reaches a later section, the pending artifact is committed
    // to the graph on the way through.
    let primary = write_export(
        &dir,
        "legends.xml",
        "<historical_figures><historical_figure><id>0</id><name>Meng</name></historical_figure></historical_figures>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<artifacts><artifact><id>0</id><name>Oilyfurnace</name></artifact></artifacts>\
         <historical_figures><historical_figure><id>0</id><caste>FEMALE</caste></historical_figure></historical_figures>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    assert_eq!(world.artifacts.len(), 1);
    assert_eq!(world.artifacts[0].name, "Oilyfurnace");
    assert_eq!(world.figure(0).unwrap().caste.as_deref(), Some("FEMALE"));
}

#[tokio::test]
async fn diverged_supplement_is_silently_ignored() {
    let dir = TempDir::new().unwrap();
    // Supplement ids can never realign with the primary's.
    let primary = write_export(
        &dir,
        "legends.xml",
        "<sites>\
         <site><id>10</id><name>Ten</name></site>\
         <site><id>11</id><name>Eleven</name></site>\
         </sites>",
    );
    let supplement = write_export(
        &dir,
        "legends_plus.xml",
        "<sites><site><id>2</id><civ_id>5</civ_id></site></sites>",
    );

    let world = chronicler::ingest(&primary, Some(supplement.as_path())).await.unwrap();

    assert_eq!(world.sites.len(), 2);
    assert!(world.sites.iter().all(|s| s.civ.is_none()));
    // Divergence is by design not a diagnostic.
    assert!(world.diagnostics.is_empty());
}

#[tokio::test]
async fn missing_supplement_path_is_informational_only() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<sites><site><id>0</id><name>Boatmurdered</name></site></sites>",
    );
    let missing = dir.path().join("legends_plus.xml");

    let world = chronicler::ingest(&primary, Some(missing.as_path())).await.unwrap();

    assert_eq!(world.sites.len(), 1);
    assert_eq!(world.diagnostics.len(), 1);
    assert!(world.diagnostics.entries()[0]
        .message
        .contains("supplementary export not found"));
}
