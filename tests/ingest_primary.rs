//! Primary-only ingestion: end-to-end over real files

mod common;

use common::{write_export, write_raw};
use tempfile::TempDir;

const THREE_FIGURES: &str = "\
<historical_figures>
<historical_figure><id>0</id><name>Atir Mournedtours</name><birth_year>-1</birth_year><death_year>-1</death_year></historical_figure>
<historical_figure><id>1</id><name>Meng Roomysnarls</name><birth_year>10</birth_year><death_year>50</death_year></historical_figure>
<historical_figure><id>2</id><name>Zasit Matchedbolted</name><birth_year>200</birth_year><death_year>-1</death_year></historical_figure>
</historical_figures>
<historical_events>
<historical_event><id>0</id><year>300</year><type>change hf state</type><hfid>2</hfid><state>wandering</state></historical_event>
</historical_events>";

#[tokio::test]
async fn figures_materialize_and_age_without_supplement() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(&dir, "legends.xml", THREE_FIGURES);

    let world = chronicler::ingest(&primary, None).await.unwrap();

    assert_eq!(world.figures.len(), 3);
    // Dead figure: death year minus birth year.
    assert_eq!(world.figure(1).unwrap().age, Some(40));
    // Living figure: last recorded event year minus birth year.
    assert_eq!(world.figure(2).unwrap().age, Some(100));
    // Unknown birth year: undefined.
    assert_eq!(world.figure(0).unwrap().age, None);

    // Exactly one informational diagnostic: the missing supplement.
    assert_eq!(world.diagnostics.len(), 1);
    assert!(world.diagnostics.entries()[0]
        .message
        .contains("supplementary export"));
}

#[tokio::test]
async fn world_names_come_from_bare_text_sections() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<name>Ubendeb Okag</name>\n<altname>The Universe of Fortune</altname>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.name, "Ubendeb Okag");
    assert_eq!(world.alternative_name, "The Universe of Fortune");
}

#[tokio::test]
async fn unknown_sections_are_reported_and_skipped() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<rivers><river><name>Riddledriver</name><path>1,2|3,4</path></river></rivers>\n\
         <sites><site><id>0</id><name>Boatmurdered</name></site></sites>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    // The unknown section did not derail the sites that follow it.
    assert_eq!(world.sites.len(), 1);
    assert!(world
        .diagnostics
        .entries()
        .iter()
        .any(|d| d.message.contains("unknown section: rivers")));
}

#[tokio::test]
async fn excluded_geographic_layers_never_materialize() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<landmasses><landmass><id>0</id><name>Omon Ethi</name></landmass></landmasses>\n\
         <mountain_peaks><mountain_peak><id>0</id><name>Spirehold</name></mountain_peak></mountain_peaks>\n\
         <sites><site><id>0</id><name>Boatmurdered</name></site></sites>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.sites.len(), 1);
    // Recognized layers are skipped without diagnostics; only the
    // missing-supplement note remains.
    assert_eq!(world.diagnostics.len(), 1);
}

#[tokio::test]
async fn unknown_event_variants_are_dropped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<historical_events>
         <historical_event><id>0</id><year>5</year><type>hf learned power</type></historical_event>
         <historical_event><id>1</id><year>6</year><type>change hf state</type><hfid>0</hfid><state>settled</state></historical_event>
         </historical_events>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.events.len(), 1);
    assert_eq!(world.events[0].id, 1);
    assert!(world
        .diagnostics
        .entries()
        .iter()
        .any(|d| d.detail.as_deref() == Some("hf learned power")));
}

#[tokio::test]
async fn unrecognized_properties_are_flagged_and_kept_nonfatal() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<regions><region><id>0</id><name>The Plains of Ash</name><holiness>9</holiness></region></regions>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.regions.len(), 1);
    assert!(world
        .diagnostics
        .entries()
        .iter()
        .any(|d| d.message.contains("unrecognized property") && d.message.contains("holiness")));
}

#[tokio::test]
async fn control_bytes_become_spaces_before_decoding() {
    let dir = TempDir::new().unwrap();
    let body = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<df_world>\n<sites><site><id>0</id><name>Bell\x07tower</name></site></sites>\n</df_world>\n";
    let primary = write_raw(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.site(0).unwrap().name, "Bell tower");
}

#[tokio::test]
async fn structural_violations_abort_ingestion() {
    let dir = TempDir::new().unwrap();
    let primary = write_raw(
        &dir,
        "legends.xml",
        b"<df_world><sites><site><id>0</id></sites></df_world>",
    );
    assert!(chronicler::ingest(&primary, None).await.is_err());
}

#[tokio::test]
async fn missing_primary_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.xml");
    assert!(chronicler::ingest(&missing, None).await.is_err());
}

#[tokio::test]
async fn comments_and_instructions_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(
        &dir,
        "legends.xml",
        "<!-- exported for testing -->\n<?pi data?>\n\
         <sites><site><id>0</id><name>Boatmurdered</name></site></sites>",
    );
    let world = chronicler::ingest(&primary, None).await.unwrap();
    assert_eq!(world.sites.len(), 1);
}
