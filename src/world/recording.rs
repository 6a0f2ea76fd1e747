use std::collections::BTreeSet;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::WorldConfig;
use crate::world::{Direction, EntityHandle, Position, World};

/// One call the interpreter made into the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum WorldCall {
    SetUnit {
        position: Position,
        unit: String,
        placed: bool,
    },
    SpawnEntity {
        entity: String,
        position: Position,
        yaw: f32,
        handle: Option<EntityHandle>,
    },
}

/// A world that only records what it is asked to do.
///
/// Placement succeeds everywhere except at configured `blocked` positions;
/// spawning succeeds for every entity not listed in `spawn_fails`.
#[derive(Debug, Clone)]
pub struct RecordingWorld {
    actor_position: Position,
    actor_facing: Direction,
    actor_yaw: Option<f32>,
    unit_types: BTreeSet<String>,
    entity_types: BTreeSet<String>,
    blocked: BTreeSet<Position>,
    spawn_fails: BTreeSet<String>,
    next_handle: u64,
    calls: Vec<WorldCall>,
}

impl Default for RecordingWorld {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

impl RecordingWorld {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            actor_position: config.actor.position,
            actor_facing: config.actor.facing,
            actor_yaw: config.actor.yaw,
            unit_types: config.unit_types.iter().cloned().collect(),
            entity_types: config.entity_types.iter().cloned().collect(),
            blocked: config.blocked.iter().copied().collect(),
            spawn_fails: config.spawn_fails.iter().cloned().collect(),
            next_handle: 1,
            calls: Vec::new(),
        }
    }

    pub fn with_actor(mut self, position: Position, facing: Direction) -> Self {
        self.actor_position = position;
        self.actor_facing = facing;
        self
    }

    pub fn calls(&self) -> &[WorldCall] {
        &self.calls
    }

    /// Positions of successful placements, in call order.
    pub fn placed(&self) -> Vec<(Position, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                WorldCall::SetUnit {
                    position,
                    unit,
                    placed: true,
                } => Some((*position, unit.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.next_handle = 1;
    }

    /// SHA-256 over the canonical JSON of the call trace. Two runs of the
    /// same script from the same start state produce the same digest.
    pub fn digest(&self) -> String {
        let json = serde_json::to_string(&self.calls).unwrap_or_else(|_| "[]".to_string());
        sha256_hex(json.as_bytes())
    }
}

impl World for RecordingWorld {
    fn set_unit(&mut self, position: Position, unit: &str) -> bool {
        let placed = !self.blocked.contains(&position);
        tracing::trace!(%position, unit, placed, "set_unit");
        self.calls.push(WorldCall::SetUnit {
            position,
            unit: unit.to_string(),
            placed,
        });
        placed
    }

    fn spawn_entity(&mut self, entity: &str, position: Position, yaw: f32) -> Option<EntityHandle> {
        let handle = if self.spawn_fails.contains(entity) {
            None
        } else {
            let handle = EntityHandle(self.next_handle);
            self.next_handle += 1;
            Some(handle)
        };
        tracing::trace!(%position, entity, yaw, ?handle, "spawn_entity");
        self.calls.push(WorldCall::SpawnEntity {
            entity: entity.to_string(),
            position,
            yaw,
            handle,
        });
        handle
    }

    fn actor_position(&self) -> Position {
        self.actor_position
    }

    fn actor_facing(&self) -> Direction {
        self.actor_facing
    }

    fn actor_yaw(&self) -> f32 {
        self.actor_yaw.unwrap_or_else(|| self.actor_facing.yaw())
    }

    fn known_unit_types(&self) -> &BTreeSet<String> {
        &self.unit_types
    }

    fn known_entity_types(&self) -> &BTreeSet<String> {
        &self.entity_types
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
