use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::world::{Direction, Position, DEFAULT_ENTITY_TYPES, DEFAULT_UNIT_TYPES};

/// Knobs for one interpreter session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Mirror debug trace lines into the message sink.
    pub verbose: bool,
    /// Upper bound on `While` iterations. `None` runs until the condition
    /// turns false, however long that takes.
    pub max_loop_iterations: Option<u64>,
}

impl InterpreterOptions {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn max_loop_iterations(mut self, limit: Option<u64>) -> Self {
        self.max_loop_iterations = limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub position: Position,
    pub facing: Direction,
    /// Overrides the yaw derived from `facing`.
    pub yaw: Option<f32>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            position: Position::new(0, 64, 0),
            facing: Direction::North,
            yaw: None,
        }
    }
}

/// Description of a stand-in world, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub actor: ActorConfig,
    pub unit_types: Vec<String>,
    pub entity_types: Vec<String>,
    /// Absolute positions where placement is refused.
    pub blocked: Vec<Position>,
    /// Entity types whose spawn yields no handle.
    pub spawn_fails: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig::default(),
            unit_types: DEFAULT_UNIT_TYPES.iter().map(|s| s.to_string()).collect(),
            entity_types: DEFAULT_ENTITY_TYPES.iter().map(|s| s.to_string()).collect(),
            blocked: Vec::new(),
            spawn_fails: Vec::new(),
        }
    }
}

impl WorldConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read world file {}: {}", path.display(), e))?;
        Self::from_json(&text)
            .map_err(|e| format!("invalid world file {}: {}", path.display(), e))
    }
}
