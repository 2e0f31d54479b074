use exhibit_sound::{GalleryConfig, GallerySound, TriggerOutcome};
use exhibit_sound_audio::{AudioManager, PlaybackState, DEFAULT_SOUND_PREFIX};
use exhibit_sound_catalog::{load_catalog, CatalogSources};
use exhibit_sound_core::{CreatureId, SceneLookup};
use exhibit_sound_testkit::{ClipEvent, ClipLog, MemoryScene, RecordingBackend, ScriptedSource, LION_CATALOG};
use glam::Vec3;

fn gallery_with(scene: &MemoryScene, backend: RecordingBackend) -> GallerySound<MemoryScene> {
    let audio = AudioManager::new(backend, DEFAULT_SOUND_PREFIX);
    GallerySound::new(scene.clone(), audio, &GalleryConfig::default())
}

fn gallery(scene: &MemoryScene, log: &ClipLog) -> GallerySound<MemoryScene> {
    gallery_with(scene, RecordingBackend::new(log.clone()))
}

fn lion_sources() -> CatalogSources {
    CatalogSources::new()
        .with(ScriptedSource::status("api", 404))
        .with(ScriptedSource::payload("static", LION_CATALOG))
}

fn two_creature_catalog() -> CatalogSources {
    CatalogSources::new().with(ScriptedSource::payload(
        "api",
        r#"[
            {"id":"artwork1","sound":"lion.mp3"},
            {"id":"artwork2","sound":"owl call.mp3"},
            {"id":"artwork3"}
        ]"#,
    ))
}

fn lion_scene() -> MemoryScene {
    MemoryScene::new()
        .with("rig", Vec3::ZERO)
        .with("artwork1", Vec3::new(0.0, 0.0, 4.0))
}

fn current(gallery: &GallerySound<MemoryScene>) -> Option<String> {
    gallery.audio().current().map(|id| id.to_string())
}

#[tokio::test]
async fn key_press_near_exhibit_plays_its_sound() {
    let log = ClipLog::default();
    let scene = lion_scene();
    let mut gallery = gallery(&scene, &log);
    gallery.load_catalog(&lion_sources()).await;

    let outcome = gallery.on_key("KeyX");
    assert!(matches!(
        outcome,
        TriggerOutcome::Played { ref creature, .. } if creature.as_str() == "artwork1"
    ));
    assert_eq!(log.played(), ["/sound/lion.mp3"]);
    assert_eq!(current(&gallery).as_deref(), Some("artwork1"));

    let snapshot = gallery.debug_snapshot();
    assert_eq!(snapshot.catalog_source.as_deref(), Some("static"));
    assert_eq!(snapshot.catalog_size, 1);
    assert_eq!(snapshot.loaded_sounds, vec![CreatureId::new("artwork1")]);
}

#[tokio::test]
async fn other_keys_are_ignored() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;
    assert_eq!(gallery.on_key("KeyZ"), TriggerOutcome::Ignored);
    assert!(log.played().is_empty());
}

#[tokio::test]
async fn outside_museum_never_plays() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;
    gallery.set_inside_museum(false);

    assert_eq!(gallery.on_key("KeyX"), TriggerOutcome::OutsideMuseum);
    assert!(log.played().is_empty());

    gallery.set_inside_museum(true);
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));
}

#[tokio::test]
async fn missing_rig_aborts_quietly() {
    let log = ClipLog::default();
    let scene = lion_scene();
    let mut gallery = gallery(&scene, &log);
    gallery.load_catalog(&lion_sources()).await;
    scene.remove("rig");
    assert!(gallery.scene().entity_position("rig").is_none());

    assert_eq!(gallery.on_key("KeyX"), TriggerOutcome::NoPlayerPosition);
    assert!(log.played().is_empty());
    assert!(!gallery.audio().is_playing());
}

#[tokio::test]
async fn rig_entity_can_be_overridden() {
    let log = ClipLog::default();
    let scene = MemoryScene::new()
        .with("rig", Vec3::new(100.0, 0.0, 0.0))
        .with("camera", Vec3::new(0.0, 0.0, 1.0))
        .with("artwork1", Vec3::ZERO);
    let mut gallery = gallery(&scene, &log);
    gallery.load_catalog(&lion_sources()).await;

    assert_eq!(gallery.on_key("KeyX"), TriggerOutcome::NoExhibitInRange);
    gallery.set_player_rig("camera");
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));
}

#[tokio::test]
async fn nearest_exhibit_within_radius_wins() {
    let log = ClipLog::default();
    let scene = MemoryScene::new()
        .with("rig", Vec3::ZERO)
        .with("artwork1", Vec3::new(9.0, 0.0, 0.0))
        .with("artwork2", Vec3::new(0.0, 7.0, 0.0))
        .with("artwork3", Vec3::new(0.0, 0.0, 5.0))
        .with("artwork4", Vec3::new(-3.0, 0.0, 0.0));
    let mut gallery = gallery(&scene, &log);
    gallery.set_catalog(
        (1..=4)
            .map(|n| exhibit_sound_core::CreatureRecord::new(format!("artwork{n}"), format!("c{n}.mp3")))
            .collect(),
    );

    let outcome = gallery.on_key("KeyX");
    assert!(matches!(
        outcome,
        TriggerOutcome::Played { ref creature, .. } if creature.as_str() == "artwork4"
    ));

    scene.remove("artwork4");
    gallery.resnapshot_exhibits();
    scene.place("rig", Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(gallery.on_key("KeyX"), TriggerOutcome::NoExhibitInRange);
}

#[tokio::test]
async fn second_trigger_stops_first_sound_before_starting() {
    let log = ClipLog::default();
    let scene = MemoryScene::new()
        .with("rig", Vec3::ZERO)
        .with("artwork1", Vec3::new(1.0, 0.0, 0.0))
        .with("artwork2", Vec3::new(30.0, 0.0, 0.0));
    let mut gallery = gallery(&scene, &log);
    gallery.load_catalog(&two_creature_catalog()).await;
    log.clear();

    gallery.on_key("KeyX");
    scene.place("rig", Vec3::new(29.0, 0.0, 0.0));
    gallery.on_key("KeyX");

    let lion = "/sound/lion.mp3".to_string();
    let owl = "/sound/owl%20call.mp3".to_string();
    assert_eq!(
        log.transport(),
        vec![
            ClipEvent::Rewind(lion.clone()),
            ClipEvent::Play(lion.clone()),
            ClipEvent::Pause(lion.clone()),
            ClipEvent::Rewind(lion),
            ClipEvent::Rewind(owl.clone()),
            ClipEvent::Play(owl),
        ]
    );
    assert_eq!(current(&gallery).as_deref(), Some("artwork2"));
}

#[tokio::test]
async fn completion_of_replaced_sound_keeps_new_one() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;

    gallery.on_key("KeyX");
    gallery.on_key("KeyX");
    assert!(log.finish(0));
    gallery.update();
    assert_eq!(current(&gallery).as_deref(), Some("artwork1"));

    assert!(log.finish_last());
    gallery.update();
    assert_eq!(gallery.audio().state(), &PlaybackState::Idle);
}

#[tokio::test]
async fn stop_when_idle_is_harmless() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.stop();
    gallery.load_catalog(&lion_sources()).await;
    gallery.stop();
    assert!(log.transport().is_empty());
}

#[tokio::test]
async fn trigger_before_catalog_load_is_a_lookup_miss() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);

    let sources = lion_sources();
    let pending = load_catalog(&sources);
    // The key press lands while the fetch is still in flight.
    assert_eq!(
        gallery.on_key("KeyX"),
        TriggerOutcome::NotLoaded {
            creature: CreatureId::new("artwork1")
        }
    );
    gallery.apply_catalog(pending.await);
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));
}

#[tokio::test]
async fn unavailable_catalog_degrades_to_no_sounds() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    let api = ScriptedSource::status("api", 500);
    let api_calls = api.calls();
    let sources = CatalogSources::new()
        .with(api)
        .with(ScriptedSource::payload("static", "<!doctype html>"))
        .with(ScriptedSource::status("relative", 404));

    assert_eq!(gallery.load_catalog(&sources).await, 0);
    assert_eq!(api_calls.get(), 1);
    assert!(gallery.catalog().is_empty());
    assert!(gallery.debug_snapshot().catalog_source.is_none());
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::NotLoaded { .. }));
}

#[tokio::test]
async fn winning_source_stops_the_chain() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    let fallback = ScriptedSource::payload("relative", "[]");
    let fallback_calls = fallback.calls();
    let sources = CatalogSources::new()
        .with(ScriptedSource::payload("api", LION_CATALOG))
        .with(fallback);

    gallery.load_catalog(&sources).await;
    assert_eq!(fallback_calls.get(), 0);
    assert_eq!(gallery.catalog().len(), 1);
}

#[tokio::test]
async fn exhibits_are_frozen_until_resnapshot() {
    let log = ClipLog::default();
    let scene = lion_scene();
    let mut gallery = gallery(&scene, &log);
    gallery.load_catalog(&lion_sources()).await;

    scene.place("artwork1", Vec3::new(0.0, 0.0, 50.0));
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));

    gallery.resnapshot_exhibits();
    assert_eq!(gallery.on_key("KeyX"), TriggerOutcome::NoExhibitInRange);
}

#[tokio::test]
async fn exhibits_are_snapshotted_once_the_catalog_arrives() {
    let log = ClipLog::default();
    let scene = MemoryScene::new()
        .with("rig", Vec3::ZERO)
        .with("artwork1", Vec3::new(0.0, 0.0, 50.0));
    let mut gallery = gallery(&scene, &log);

    let sources = lion_sources();
    let pending = load_catalog(&sources);
    // The exhibit settles into place while the fetch is in flight.
    scene.place("artwork1", Vec3::new(0.0, 0.0, 4.0));
    gallery.apply_catalog(pending.await);
    assert_eq!(gallery.exhibits()[0].position, Vec3::new(0.0, 0.0, 4.0));
    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));

    // Later loads leave the snapshot alone.
    scene.place("artwork1", Vec3::new(0.0, 0.0, 50.0));
    gallery.load_catalog(&lion_sources()).await;
    assert_eq!(gallery.exhibits()[0].position, Vec3::new(0.0, 0.0, 4.0));
}

#[tokio::test]
async fn muted_settings_reach_the_clip() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;
    gallery.audio_mut().settings_mut().set_master(0.5);
    gallery.on_key("KeyX");
    gallery.audio_mut().settings_mut().toggle_mute();
    gallery.on_key("KeyX");

    let volumes: Vec<f32> = log
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ClipEvent::Volume(_, v) => Some(v),
            _ => None,
        })
        .collect();
    assert_eq!(volumes, vec![0.5, 0.0]);
}

#[tokio::test]
async fn reload_sounds_stops_current_and_rebuilds() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;
    gallery.on_key("KeyX");
    log.clear();

    assert_eq!(gallery.reload_sounds(), 1);
    assert!(!gallery.audio().is_playing());
    let events = log.events();
    assert_eq!(events[0], ClipEvent::Pause("/sound/lion.mp3".into()));
    assert!(events.iter().any(|e| matches!(e, ClipEvent::Loaded { .. })));
}

#[tokio::test]
async fn playback_start_failure_is_contained() {
    let log = ClipLog::default();
    let backend = RecordingBackend::new(log.clone()).failing_play();
    let mut gallery = gallery_with(&lion_scene(), backend);
    gallery.load_catalog(&lion_sources()).await;

    assert!(matches!(gallery.on_key("KeyX"), TriggerOutcome::Played { .. }));
    assert_eq!(current(&gallery).as_deref(), Some("artwork1"));
    gallery.stop();
    assert!(!gallery.audio().is_playing());
}

#[tokio::test]
async fn debug_snapshot_serializes() {
    let log = ClipLog::default();
    let mut gallery = gallery(&lion_scene(), &log);
    gallery.load_catalog(&lion_sources()).await;
    gallery.on_key("KeyX");

    let json: serde_json::Value =
        serde_json::from_str(&gallery.debug_snapshot().to_json().unwrap()).unwrap();
    assert_eq!(json["inside_museum"], true);
    assert_eq!(json["trigger_key"], "KeyX");
    assert_eq!(json["sound_prefix"], "/sound/");
    assert_eq!(json["playback"]["state"], "playing");
    assert_eq!(json["playback"]["creature"], "artwork1");
    assert_eq!(json["exhibits"][0]["id"], "artwork1");
    assert_eq!(json["backend"], "recording");
}
