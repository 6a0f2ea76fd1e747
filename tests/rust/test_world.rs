//! World port tests: recording world, geometry, configuration

use mcscript_lang::config::WorldConfig;
use mcscript_lang::world::recording::{RecordingWorld, WorldCall};
use mcscript_lang::world::{
    Direction, EntityHandle, MessageSink, Position, World, DEFAULT_ENTITY_TYPES,
    DEFAULT_UNIT_TYPES,
};

// ── Geometry ────────────────────────────────────────────────

#[test]
fn position_arithmetic_and_display() {
    let p = Position::new(1, 2, 3) + Position::new(-1, 1, 0).scale(3);
    assert_eq!(p, Position::new(-2, 5, 3));
    assert_eq!(p.to_string(), "(-2, 5, 3)");
}

#[test]
fn position_arithmetic_wraps() {
    let p = Position::new(i64::MAX, 0, 0) + Position::new(1, 0, 0);
    assert_eq!(p.x, i64::MIN);
    assert_eq!(Position::new(0, i64::MAX, 0).scale(2).y, -2);
}

#[test]
fn direction_names() {
    assert_eq!(Direction::from_name("North"), Some(Direction::North));
    assert_eq!(Direction::from_name("UP"), Some(Direction::Up));
    assert_eq!(Direction::from_name("northeast"), None);
    assert_eq!(Direction::West.to_string(), "west");
}

#[test]
fn direction_steps() {
    assert_eq!(Direction::North.step(), Position::new(0, 0, -1));
    assert_eq!(Direction::South.step(), Position::new(0, 0, 1));
    assert_eq!(Direction::East.step(), Position::new(1, 0, 0));
    assert_eq!(Direction::West.step(), Position::new(-1, 0, 0));
    assert_eq!(Direction::Down.step(), Position::new(0, -1, 0));
    assert!(Direction::Up.is_vertical());
    assert!(!Direction::East.is_vertical());
}

#[test]
fn facing_yaw() {
    assert_eq!(Direction::South.yaw(), 0.0);
    assert_eq!(Direction::West.yaw(), 90.0);
    assert_eq!(Direction::North.yaw(), 180.0);
    assert_eq!(Direction::East.yaw(), -90.0);
}

// ── Recording world ─────────────────────────────────────────

#[test]
fn default_world() {
    let world = RecordingWorld::default();
    assert_eq!(world.actor_position(), Position::new(0, 64, 0));
    assert_eq!(world.actor_facing(), Direction::North);
    assert_eq!(world.actor_yaw(), 180.0);
    assert_eq!(world.known_unit_types().len(), DEFAULT_UNIT_TYPES.len());
    assert_eq!(world.known_entity_types().len(), DEFAULT_ENTITY_TYPES.len());
    assert!(world.known_unit_types().contains("stone"));
    assert!(world.known_entity_types().contains("zombie"));
}

#[test]
fn records_calls_in_order() {
    let mut world = RecordingWorld::default();
    assert!(world.set_unit(Position::new(1, 1, 1), "stone"));
    let first = world.spawn_entity("cow", Position::new(0, 0, 0), 0.0);
    let second = world.spawn_entity("pig", Position::new(0, 0, 0), 0.0);
    assert_eq!(first, Some(EntityHandle(1)));
    assert_eq!(second, Some(EntityHandle(2)));
    assert_eq!(world.calls().len(), 3);
    assert!(matches!(world.calls()[0], WorldCall::SetUnit { placed: true, .. }));
}

#[test]
fn blocked_and_failing_spawns() {
    let config = WorldConfig {
        blocked: vec![Position::new(5, 5, 5)],
        spawn_fails: vec!["creeper".into()],
        ..WorldConfig::default()
    };
    let mut world = RecordingWorld::from_config(&config);
    assert!(!world.set_unit(Position::new(5, 5, 5), "stone"));
    assert!(world.set_unit(Position::new(5, 5, 6), "stone"));
    assert_eq!(world.spawn_entity("creeper", Position::default(), 0.0), None);
    assert_eq!(world.placed(), vec![(Position::new(5, 5, 6), "stone")]);
}

#[test]
fn clear_resets_calls_and_handles() {
    let mut world = RecordingWorld::default();
    world.spawn_entity("cow", Position::default(), 0.0);
    world.clear();
    assert!(world.calls().is_empty());
    assert_eq!(
        world.spawn_entity("cow", Position::default(), 0.0),
        Some(EntityHandle(1))
    );
}

#[test]
fn with_actor_changes_yaw() {
    let world = RecordingWorld::default().with_actor(Position::new(3, 4, 5), Direction::East);
    assert_eq!(world.actor_position(), Position::new(3, 4, 5));
    assert_eq!(world.actor_yaw(), -90.0);
}

#[test]
fn configured_yaw_overrides_facing() {
    let config = WorldConfig::from_json(r#"{"actor": {"facing": "south", "yaw": 45.0}}"#).unwrap();
    let world = RecordingWorld::from_config(&config);
    assert_eq!(world.actor_facing(), Direction::South);
    assert_eq!(world.actor_yaw(), 45.0);
}

#[test]
fn digest_tracks_call_trace() {
    let mut a = RecordingWorld::default();
    let mut b = RecordingWorld::default();
    let empty = a.digest();
    assert_eq!(empty.len(), 64);

    a.set_unit(Position::new(0, 0, 0), "stone");
    b.set_unit(Position::new(0, 0, 0), "stone");
    assert_eq!(a.digest(), b.digest());
    assert_ne!(a.digest(), empty);

    b.set_unit(Position::new(0, 0, 1), "stone");
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn call_trace_serializes_tagged() {
    let mut world = RecordingWorld::default();
    world.set_unit(Position::new(1, 2, 3), "dirt");
    let json = serde_json::to_value(world.calls()).unwrap();
    assert_eq!(json[0]["call"], "set_unit");
    assert_eq!(json[0]["unit"], "dirt");
    assert_eq!(json[0]["position"]["y"], 2);
    assert_eq!(json[0]["placed"], true);
}

// ── Configuration ───────────────────────────────────────────

#[test]
fn world_config_from_json() {
    let config = WorldConfig::from_json(
        r#"{
            "actor": {"position": {"x": 1, "y": 70, "z": -4}, "facing": "west"},
            "unit_types": ["stone", "lava"],
            "entity_types": ["ghast"]
        }"#,
    )
    .unwrap();
    let world = RecordingWorld::from_config(&config);
    assert_eq!(world.actor_position(), Position::new(1, 70, -4));
    assert_eq!(world.actor_facing(), Direction::West);
    assert!(world.known_unit_types().contains("lava"));
    assert!(!world.known_unit_types().contains("dirt"));
    assert_eq!(world.known_entity_types().len(), 1);
}

#[test]
fn world_config_rejects_bad_facing() {
    assert!(WorldConfig::from_json(r#"{"actor": {"facing": "sideways"}}"#).is_err());
}

#[test]
fn world_config_load_missing_file() {
    let err = WorldConfig::load(std::path::Path::new("/nonexistent/world.json")).unwrap_err();
    assert!(err.contains("cannot read world file"));
}

// ── Message sink ────────────────────────────────────────────

#[test]
fn vec_sink_collects_messages() {
    let mut sink: Vec<String> = Vec::new();
    sink.emit("one");
    sink.emit("two");
    assert_eq!(sink, vec!["one", "two"]);
}
