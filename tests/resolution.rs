//! Resolver passes driven through full file-backed ingestion

mod common;

use chronicler::world::{CollectionKind, EventKind, EventRef};
use common::write_export;
use tempfile::TempDir;

const BEAST_ATTACK_WORLD: &str = "\
<sites>
<site><id>3</id><name>Monumentlanced</name><type>fortress</type></site>
</sites>
<historical_figures>
<historical_figure><id>7</id><name>Osp Splatteredtrusts</name><race>DRAGON</race><birth_year>-1</birth_year></historical_figure>
<historical_figure><id>8</id><name>Meng</name><birth_year>80</birth_year></historical_figure>
<historical_figure><id>9</id><name>Zasit</name><birth_year>81</birth_year></historical_figure>
</historical_figures>
<entities>
<entity><id>11</id><name>The Bronze Union</name></entity>
</entities>
<historical_events>
<historical_event><id>0</id><year>100</year><type>hf died</type><hfid>8</hfid><slayer_hfid>7</slayer_hfid></historical_event>
<historical_event><id>1</id><year>100</year><type>hf died</type><hfid>9</hfid><slayer_hfid>7</slayer_hfid></historical_event>
<historical_event><id>2</id><year>100</year><type>item stolen</type><item>gold crown</item></historical_event>
<historical_event><id>3</id><year>200</year><type>change hf state</type><hfid>7</hfid><state>wandering</state></historical_event>
</historical_events>
<historical_event_collections>
<historical_event_collection><id>0</id><start_year>100</start_year><end_year>100</end_year><type>beast attack</type><site_id>3</site_id><defending_enemy_id>11</defending_enemy_id><event>0</event><event>1</event><event>2</event></historical_event_collection>
</historical_event_collections>
<historical_eras>
<historical_era><name>Age of Myth</name><start_year>-1</start_year></historical_era>
<historical_era><name>Age of Iron</name><start_year>150</start_year></historical_era>
</historical_eras>";

#[tokio::test]
async fn beast_attack_resolves_and_backfills() {
    let dir = TempDir::new().unwrap();
    let primary = write_export(&dir, "legends.xml", BEAST_ATTACK_WORLD);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    // The unique repeat slayer is attributed as the beast.
    let attack = world.collection(0).unwrap();
    match &attack.kind {
        CollectionKind::BeastAttack { beast, defender, .. } => {
            assert_eq!(*beast, Some(7));
            assert_eq!(*defender, Some(11));
        }
        other => panic!("wrong kind: {other:?}"),
    }

    // The theft inherited the collection's site and the beast as thief.
    match &world.event(2).unwrap().kind {
        EventKind::ItemStolen { site, thief, .. } => {
            assert_eq!(*site, Some(3));
            assert_eq!(*thief, Some(7));
        }
        other => panic!("wrong kind: {other:?}"),
    }

    // Back-filled theft inserted into the site's and beast's chronologies.
    let theft = EventRef { year: 100, id: 2 };
    assert!(world.site(3).unwrap().events.contains(&theft));
    let beast = world.figure(7).unwrap();
    assert!(beast.events.contains(&theft));
    assert_eq!(beast.beast_attacks, vec![0]);

    // Ownership synthesized for the defender as an ancestral claim.
    let history = &world.site(3).unwrap().owner_history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, "ancestral claim");

    // Era segmentation: derived end years, labels, and total partition.
    assert_eq!(world.eras[0].end_year, 149);
    assert_eq!(world.eras[1].end_year, 200);
    assert_eq!(world.eras[0].label, ".. - 149");
    assert_eq!(world.eras[1].label, "150 - ..");
    assert_eq!(world.eras[0].events, vec![0, 1, 2]);
    assert_eq!(world.eras[1].events, vec![3]);
    assert_eq!(world.eras[0].collections, vec![0]);
    assert!(world.eras[1].collections.is_empty());
}

#[tokio::test]
async fn ambiguous_slayers_leave_beast_unresolved() {
    let dir = TempDir::new().unwrap();
    let body = "\
<historical_events>
<historical_event><id>0</id><year>10</year><type>hf died</type><hfid>1</hfid><slayer_hfid>6</slayer_hfid></historical_event>
<historical_event><id>1</id><year>10</year><type>hf died</type><hfid>2</hfid><slayer_hfid>6</slayer_hfid></historical_event>
<historical_event><id>2</id><year>10</year><type>hf died</type><hfid>3</hfid><slayer_hfid>7</slayer_hfid></historical_event>
<historical_event><id>3</id><year>10</year><type>hf died</type><hfid>4</hfid><slayer_hfid>7</slayer_hfid></historical_event>
</historical_events>
<historical_event_collections>
<historical_event_collection><id>0</id><start_year>10</start_year><end_year>10</end_year><type>beast attack</type><event>0</event><event>1</event><event>2</event><event>3</event></historical_event_collection>
</historical_event_collections>";
    let primary = write_export(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    match &world.collection(0).unwrap().kind {
        CollectionKind::BeastAttack { beast, .. } => assert_eq!(*beast, None),
        other => panic!("wrong kind: {other:?}"),
    }
}

#[tokio::test]
async fn conquests_link_to_their_deciding_battle() {
    let dir = TempDir::new().unwrap();
    let body = "\
<historical_event_collections>
<historical_event_collection><id>0</id><start_year>5</start_year><end_year>5</end_year><type>battle</type><name>The Clash of Ash</name></historical_event_collection>
<historical_event_collection><id>1</id><start_year>5</start_year><end_year>5</end_year><type>journey</type></historical_event_collection>
<historical_event_collection><id>2</id><start_year>5</start_year><end_year>5</end_year><type>site conquered</type><defending_enemy_id>30</defending_enemy_id></historical_event_collection>
</historical_event_collections>";
    let primary = write_export(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    match &world.collection(2).unwrap().kind {
        CollectionKind::SiteConquered { battle, .. } => assert_eq!(*battle, Some(0)),
        other => panic!("wrong kind: {other:?}"),
    }
    match &world.collection(0).unwrap().kind {
        CollectionKind::Battle {
            conquering,
            defender,
            ..
        } => {
            assert_eq!(*conquering, Some(2));
            assert_eq!(*defender, Some(30));
        }
        other => panic!("wrong kind: {other:?}"),
    }
}

#[tokio::test]
async fn raids_propagate_sites_onto_thefts() {
    let dir = TempDir::new().unwrap();
    let body = "\
<historical_events>
<historical_event><id>0</id><year>10</year><type>item stolen</type><item>silver goblet</item></historical_event>
</historical_events>
<historical_event_collections>
<historical_event_collection><id>0</id><start_year>10</start_year><end_year>10</end_year><type>raid</type><site_id>4</site_id><event>0</event></historical_event_collection>
</historical_event_collections>";
    let primary = write_export(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    match &world.event(0).unwrap().kind {
        EventKind::ItemStolen { site, .. } => assert_eq!(*site, Some(4)),
        other => panic!("wrong kind: {other:?}"),
    }
}

#[tokio::test]
async fn nested_collections_resolve_after_forward_references() {
    let dir = TempDir::new().unwrap();
    // The beast attack references duel 1 before it exists in the graph.
    let body = "\
<historical_figures>
<historical_figure><id>3</id><name>Osp</name></historical_figure>
</historical_figures>
<historical_events>
<historical_event><id>0</id><year>10</year><type>hf simple battle event</type><group_1_hfid>3</group_1_hfid><group_2_hfid>4</group_2_hfid></historical_event>
</historical_events>
<historical_event_collections>
<historical_event_collection><id>0</id><start_year>10</start_year><end_year>10</end_year><type>beast attack</type><eventcol>1</eventcol></historical_event_collection>
<historical_event_collection><id>1</id><start_year>10</start_year><end_year>10</end_year><type>duel</type><attacking_hfid>3</attacking_hfid><defending_hfid>4</defending_hfid><event>0</event></historical_event_collection>
</historical_event_collections>";
    let primary = write_export(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    assert_eq!(world.collection(0).unwrap().sub_collections, vec![1]);
    // Beast attribution looked through the nested duel's combat event.
    match &world.collection(0).unwrap().kind {
        CollectionKind::BeastAttack { beast, .. } => assert_eq!(*beast, Some(3)),
        other => panic!("wrong kind: {other:?}"),
    }
}

#[tokio::test]
async fn name_indices_support_binary_search() {
    let dir = TempDir::new().unwrap();
    let body = "\
<historical_figures>
<historical_figure><id>0</id><name>Zasit Matchedbolted</name></historical_figure>
<historical_figure><id>1</id><name>Atir Mournedtours</name></historical_figure>
</historical_figures>
<entities>
<entity><id>0</id><name>The Bronze Union</name></entity>
</entities>";
    let primary = write_export(&dir, "legends.xml", body);
    let world = chronicler::ingest(&primary, None).await.unwrap();

    assert_eq!(world.figure_by_name("atir mournedtours").unwrap().id, 1);
    assert_eq!(world.entity_by_name("The Bronze Union").unwrap().id, 0);
    assert!(world.figure_by_name("nobody at all").is_none());
}
