use crate::error::ScriptError;
use crate::parser::{
    call_arguments, has_arithmetic_operator, is_quoted, parse_declaration, parse_int,
    parse_place_block, parse_place_wall, parse_spawn, strip_quotes, DeclValue,
};
use crate::world::{Direction, Position};

use super::{Interpreter, Value};

impl Interpreter<'_> {
    /// `Let name = value`.
    pub(crate) fn execute_declaration(&mut self, line: &str) -> Result<(), ScriptError> {
        let declaration = parse_declaration(line)?;
        let value = match declaration.value {
            DeclValue::Text(text) => Value::Str(text),
            DeclValue::Block(unit) => {
                self.ensure_unit(&unit)?;
                Value::Str(unit)
            }
            DeclValue::Arithmetic(expr) => Value::Int(self.eval_arithmetic(&expr)),
            DeclValue::Integer(n) => Value::Int(n),
            DeclValue::Reference(other) => self
                .env
                .get(&other)
                .cloned()
                .ok_or(ScriptError::InvalidValue(other))?,
        };

        self.debug(format!("Defined variable: {} = {}", declaration.name, value));
        self.env.define(declaration.name, value);
        Ok(())
    }

    pub(crate) fn execute_print(&mut self, line: &str) -> Result<(), ScriptError> {
        let content = call_arguments(line, "print")?;
        let text = if is_quoted(content) {
            strip_quotes(content).to_string()
        } else if let Some(n) = parse_int(content) {
            n.to_string()
        } else if has_arithmetic_operator(content) {
            self.eval_arithmetic(content).to_string()
        } else {
            self.env.lookup(content)?.to_string()
        };
        self.say(&text);
        Ok(())
    }

    pub(crate) fn execute_place_block(&mut self, line: &str) -> Result<(), ScriptError> {
        let args = parse_place_block(line)?;
        let offset = Position::new(
            self.resolve_operand(args.x)?,
            self.resolve_operand(args.y)?,
            self.resolve_operand(args.z)?,
        );
        let unit = self.resolve_name(args.unit);
        self.ensure_unit(&unit)?;

        let position = self.world.actor_position() + offset;
        if self.world.set_unit(position, &unit) {
            self.say(&format!("Placed {} at {}", unit, position));
        } else {
            self.say(&format!("Block placement failed at {}", position));
        }
        Ok(())
    }

    /// Fill a `width` x `height` rectangle starting at the actor.
    ///
    /// A horizontal direction runs the width that way and the height up. For
    /// `up`/`down` the width follows the actor's facing and the height the
    /// given direction. Units are placed row by row, bottom row first.
    pub(crate) fn execute_place_wall(&mut self, line: &str) -> Result<(), ScriptError> {
        let args = parse_place_wall(line)?;
        let width = self.resolve_operand(args.width)?;
        let height = self.resolve_operand(args.height)?;
        let unit = self.resolve_name(args.unit);
        self.ensure_unit(&unit)?;

        let direction_name = self.resolve_name(args.direction);
        let direction = Direction::from_name(&direction_name)
            .ok_or(ScriptError::InvalidDirection(direction_name))?;

        let (width_axis, height_axis) = if direction.is_vertical() {
            (self.world.actor_facing(), direction)
        } else {
            (direction, Direction::Up)
        };

        let origin = self.world.actor_position();
        self.debug(format!("Player position: {}", origin));

        let mut placed: i64 = 0;
        let mut attempted: i64 = 0;
        for h in 0..height {
            for w in 0..width {
                let position = origin + width_axis.step().scale(w) + height_axis.step().scale(h);
                attempted += 1;
                if self.world.set_unit(position, &unit) {
                    placed += 1;
                } else {
                    self.debug(format!("Block placement failed at {}", position));
                }
            }
        }

        if placed == attempted {
            self.say(&format!("Placed {} {} blocks as a wall", placed, unit));
        } else {
            self.say(&format!(
                "Placed {} of {} {} blocks as a wall",
                placed, attempted, unit
            ));
        }
        Ok(())
    }

    pub(crate) fn execute_spawn(&mut self, line: &str) -> Result<(), ScriptError> {
        let args = parse_spawn(line)?;
        let offset = Position::new(
            self.resolve_operand(args.x)?,
            self.resolve_operand(args.y)?,
            self.resolve_operand(args.z)?,
        );
        let entity = self.resolve_name(args.entity);
        if !self.world.known_entity_types().contains(&entity) {
            return Err(ScriptError::UnknownEntityType(entity));
        }

        let position = self.world.actor_position() + offset;
        let yaw = self.world.actor_yaw();
        match self.world.spawn_entity(&entity, position, yaw) {
            Some(handle) => {
                tracing::debug!(entity = %entity, handle = handle.0, "spawned");
                self.say(&format!("Spawned {} at {}", entity, position));
            }
            None => self.say(&format!("Could not spawn {} at {}", entity, position)),
        }
        Ok(())
    }

    /// A unit or entity name: quoted text, the text held by a variable of
    /// that name, or the bare word itself.
    fn resolve_name(&self, text: &str) -> String {
        if is_quoted(text) {
            return strip_quotes(text).to_string();
        }
        match self.env.get(text).and_then(Value::as_text) {
            Some(name) => name.to_string(),
            None => text.to_string(),
        }
    }

    fn ensure_unit(&self, unit: &str) -> Result<(), ScriptError> {
        if self.world.known_unit_types().contains(unit) {
            Ok(())
        } else {
            Err(ScriptError::UnknownWorldUnit(unit.to_string()))
        }
    }
}
