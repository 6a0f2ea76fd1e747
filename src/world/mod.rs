//! Ports to the host world.
//!
//! The interpreter never touches a world directly. Placement, spawning and
//! actor queries go through [`World`]; every message a script produces goes
//! through [`MessageSink`].

pub mod recording;

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Unit types a default world knows about.
pub const DEFAULT_UNIT_TYPES: &[&str] = &[
    "stone",
    "dirt",
    "grass",
    "oak_planks",
    "cobblestone",
    "sand",
    "gravel",
    "glass",
    "obsidian",
    "air",
];

/// Entity types a default world knows about.
pub const DEFAULT_ENTITY_TYPES: &[&str] = &[
    "zombie", "skeleton", "creeper", "spider", "cow", "pig", "sheep", "chicken", "villager",
    "enderman",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise multiply. Overflow wraps, like script arithmetic.
    pub fn scale(self, factor: i64) -> Self {
        Position::new(
            self.x.wrapping_mul(factor),
            self.y.wrapping_mul(factor),
            self.z.wrapping_mul(factor),
        )
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Case-insensitive direction name.
    pub fn from_name(name: &str) -> Option<Direction> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    /// Unit offset one step in this direction. North is -z, east is +x.
    pub fn step(self) -> Position {
        match self {
            Direction::Up => Position::new(0, 1, 0),
            Direction::Down => Position::new(0, -1, 0),
            Direction::North => Position::new(0, 0, -1),
            Direction::South => Position::new(0, 0, 1),
            Direction::East => Position::new(1, 0, 0),
            Direction::West => Position::new(-1, 0, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Yaw in degrees for a horizontal facing (south 0, west 90, north 180,
    /// east -90). Vertical directions have no yaw.
    pub fn yaw(self) -> f32 {
        match self {
            Direction::South | Direction::Up | Direction::Down => 0.0,
            Direction::West => 90.0,
            Direction::North => 180.0,
            Direction::East => -90.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// Opaque handle to an entity the world spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// The world mutation service plus the actor the script runs on behalf of.
pub trait World {
    /// Place `unit` at an absolute position. `false` if the world refused.
    fn set_unit(&mut self, position: Position, unit: &str) -> bool;

    fn spawn_entity(&mut self, entity: &str, position: Position, yaw: f32) -> Option<EntityHandle>;

    fn actor_position(&self) -> Position;

    fn actor_facing(&self) -> Direction;

    fn actor_yaw(&self) -> f32 {
        self.actor_facing().yaw()
    }

    fn known_unit_types(&self) -> &BTreeSet<String>;

    fn known_entity_types(&self) -> &BTreeSet<String>;
}

/// Fire-and-forget text output: diagnostics and `print` results.
pub trait MessageSink {
    fn emit(&mut self, text: &str);
}

impl MessageSink for Vec<String> {
    fn emit(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Writes every message as one line on stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}
