//! Operand extraction for every statement shape.
//!
//! Parsing here is purely textual: it slices a trimmed line into the raw
//! operand strings each statement needs. Resolving those operands against
//! the environment or the world is left to the runtime.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ScriptError;

pub const ARITHMETIC_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// `"text"` with at least the two quote characters present.
pub fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

pub fn strip_quotes(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

pub fn strip_semicolon(text: &str) -> &str {
    match text.strip_suffix(';') {
        Some(rest) => rest.trim(),
        None => text,
    }
}

/// Integer literal, accepting an optional leading sign.
pub fn parse_int(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

pub fn has_arithmetic_operator(text: &str) -> bool {
    text.contains(ARITHMETIC_OPERATORS)
}

/// Text between the first `(` and the first `)` after it.
pub fn parenthesized(line: &str) -> Result<&str, ScriptError> {
    let open = line
        .find('(')
        .ok_or_else(|| ScriptError::malformed(format!("missing parentheses: {}", line)))?;
    let close = line[open..]
        .find(')')
        .map(|offset| open + offset)
        .ok_or_else(|| ScriptError::malformed(format!("missing parentheses: {}", line)))?;
    Ok(line[open + 1..close].trim())
}

/// Argument text of a call-style statement such as `print(...)`: everything
/// between `name(` and the last `)` on the line.
pub fn call_arguments<'a>(line: &'a str, name: &str) -> Result<&'a str, ScriptError> {
    let opener = format!("{}(", name);
    let start = line
        .find(&opener)
        .map(|i| i + opener.len())
        .ok_or_else(|| ScriptError::malformed(format!("invalid {} statement: {}", name, line)))?;
    let end = line
        .rfind(')')
        .filter(|end| *end >= start)
        .ok_or_else(|| ScriptError::malformed(format!("invalid {} statement: {}", name, line)))?;
    Ok(line[start..end].trim())
}

fn split_arguments<'a, const N: usize>(
    args: &'a str,
    usage: &str,
) -> Result<[&'a str; N], ScriptError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    parts
        .try_into()
        .map_err(|_| ScriptError::malformed(format!("{} requires {} parameters", usage, N)))
}

// ── Declarations and assignments ────────────────────────────────────

/// Right-hand side of `Let name = value`, in the order the shapes are tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclValue {
    Text(String),
    Block(String),
    Arithmetic(String),
    Integer(i64),
    /// Not a literal: copy of another variable, or an invalid value.
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: DeclValue,
}

fn split_binding(line: &str) -> Result<(&str, &str), ScriptError> {
    let (target, value) = line
        .split_once('=')
        .ok_or_else(|| ScriptError::malformed(format!("invalid variable declaration: {}", line)))?;
    let value = strip_semicolon(value.trim());
    if !is_quoted(value) && value.contains('=') {
        return Err(ScriptError::malformed(format!(
            "invalid variable declaration: {}",
            line
        )));
    }
    Ok((target.trim(), value))
}

pub fn parse_declaration(line: &str) -> Result<Declaration, ScriptError> {
    let (target, value) = split_binding(line)?;
    let name = target.strip_prefix("Let").unwrap_or(target).trim();
    if name.is_empty() {
        return Err(ScriptError::malformed(format!(
            "missing variable name: {}",
            line
        )));
    }

    let value = if is_quoted(value) {
        DeclValue::Text(strip_quotes(value).to_string())
    } else if let Some(inner) = value
        .strip_prefix("block(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        DeclValue::Block(strip_quotes(inner.trim()).to_string())
    } else if has_arithmetic_operator(value) {
        DeclValue::Arithmetic(value.to_string())
    } else if let Some(n) = parse_int(value) {
        DeclValue::Integer(n)
    } else {
        DeclValue::Reference(value.to_string())
    };

    Ok(Declaration {
        name: name.to_string(),
        value,
    })
}

/// Bare `name = expr` as used inside loop bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub expr: String,
}

pub fn parse_assignment(line: &str) -> Result<Assignment, ScriptError> {
    let (name, expr) = split_binding(line)?;
    if name.is_empty() {
        return Err(ScriptError::malformed(format!("invalid assignment: {}", line)));
    }
    Ok(Assignment {
        name: name.to_string(),
        expr: expr.to_string(),
    })
}

// ── Loop headers ────────────────────────────────────────────────────

/// `For(var upto end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHeader {
    pub var: String,
    pub end: String,
}

pub fn parse_for_header(line: &str) -> Result<ForHeader, ScriptError> {
    let content = parenthesized(line)?;
    let parts: Vec<&str> = content.split("upto").map(str::trim).collect();
    match parts.as_slice() {
        [var, end] if !var.is_empty() && !end.is_empty() => Ok(ForHeader {
            var: var.to_string(),
            end: end.to_string(),
        }),
        _ => Err(ScriptError::malformed(
            "invalid For loop syntax, expected For(var upto end)",
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
    Equal,
}

/// Condition of a `While` header: two integer operands and one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopCondition {
    pub left: String,
    pub op: Comparison,
    pub right: String,
}

/// Recognizes `<`, then `>`, then `==`, splitting on the first occurrence.
pub fn parse_loop_condition(condition: &str) -> Result<LoopCondition, ScriptError> {
    let shapes = [
        ("<", Comparison::Less),
        (">", Comparison::Greater),
        ("==", Comparison::Equal),
    ];
    for (symbol, op) in shapes {
        if let Some((left, right)) = condition.split_once(symbol) {
            return Ok(LoopCondition {
                left: left.trim().to_string(),
                op,
                right: right.trim().to_string(),
            });
        }
    }
    Err(ScriptError::UnsupportedCondition(condition.to_string()))
}

// ── Branch conditions ───────────────────────────────────────────────

/// Condition of an `If` / `Elif` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `var % divisor == remainder`
    Modulo {
        var: String,
        divisor: String,
        remainder: String,
    },
    /// `left == right`
    Equals { left: String, right: String },
}

fn modulo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<var>[^%]+?)\s*%\s*(?P<div>[^=]+?)\s*==\s*(?P<rem>.+?)\s*$")
            .expect("modulo condition pattern is valid")
    })
}

pub fn parse_condition(condition: &str) -> Result<Condition, ScriptError> {
    if condition.contains('%') {
        let caps = modulo_pattern()
            .captures(condition)
            .ok_or_else(|| ScriptError::UnsupportedCondition(condition.to_string()))?;
        return Ok(Condition::Modulo {
            var: caps["var"].to_string(),
            divisor: caps["div"].to_string(),
            remainder: caps["rem"].to_string(),
        });
    }
    if let Some((left, right)) = condition.split_once("==") {
        return Ok(Condition::Equals {
            left: left.trim().to_string(),
            right: right.trim().to_string(),
        });
    }
    Err(ScriptError::UnsupportedCondition(condition.to_string()))
}

// ── Action statements ───────────────────────────────────────────────

/// `placeBlock(x, y, z, unit)` operands, unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceBlockArgs<'a> {
    pub x: &'a str,
    pub y: &'a str,
    pub z: &'a str,
    pub unit: &'a str,
}

pub fn parse_place_block(line: &str) -> Result<PlaceBlockArgs<'_>, ScriptError> {
    let args = call_arguments(line, "placeBlock")?;
    let [x, y, z, unit] = split_arguments(args, "placeBlock(x, y, z, blockType)")?;
    Ok(PlaceBlockArgs { x, y, z, unit })
}

/// `placeWall(unit, direction, width, height)` operands, unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceWallArgs<'a> {
    pub unit: &'a str,
    pub direction: &'a str,
    pub width: &'a str,
    pub height: &'a str,
}

pub fn parse_place_wall(line: &str) -> Result<PlaceWallArgs<'_>, ScriptError> {
    let args = call_arguments(line, "placeWall")?;
    let [unit, direction, width, height] =
        split_arguments(args, "placeWall(blockType, direction, width, height)")?;
    Ok(PlaceWallArgs {
        unit,
        direction,
        width,
        height,
    })
}

/// `spawn(entity, x, y, z)` operands, unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnArgs<'a> {
    pub entity: &'a str,
    pub x: &'a str,
    pub y: &'a str,
    pub z: &'a str,
}

pub fn parse_spawn(line: &str) -> Result<SpawnArgs<'_>, ScriptError> {
    let args = call_arguments(line, "spawn")?;
    let [entity, x, y, z] = split_arguments(args, "spawn(mobType, x, y, z)")?;
    Ok(SpawnArgs { entity, x, y, z })
}
