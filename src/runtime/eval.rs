use crate::error::ScriptError;
use crate::parser::{
    is_quoted, parenthesized, parse_condition, parse_int, strip_quotes, Comparison, Condition,
    LoopCondition, ARITHMETIC_OPERATORS,
};

use super::{Interpreter, Value};

/// Split `expr` around the first occurrence of the first operator of `ops`
/// that appears in it. Operators are tried in the order given, not by
/// position or precedence, so `a+b*c` always splits on `+`.
///
/// A sign in front of the first operand belongs to that literal and is not
/// considered an operator.
pub(crate) fn split_operator<'e>(expr: &'e str, ops: &[char]) -> Option<(char, &'e str, &'e str)> {
    let skip = usize::from(expr.starts_with(['+', '-']));
    let body = &expr[skip..];
    let op = ops.iter().copied().find(|op| body.contains(*op))?;
    let at = skip + body.find(op)?;
    Some((op, expr[..at].trim(), expr[at + op.len_utf8()..].trim()))
}

impl Interpreter<'_> {
    /// An integer operand: literal first, then an integer variable.
    pub(crate) fn resolve_operand(&self, operand: &str) -> Result<i64, ScriptError> {
        match parse_int(operand) {
            Some(n) => Ok(n),
            None => self.env.lookup_int(operand),
        }
    }

    pub(crate) fn operand_or_zero(&mut self, operand: &str) -> i64 {
        let result = self.resolve_operand(operand);
        self.recover(result)
    }

    /// Evaluate a single-operator integer expression.
    ///
    /// Failing operands are reported and count as `0`; dividing by zero is
    /// reported and yields `0`. Neither stops the statement.
    pub(crate) fn eval_arithmetic(&mut self, expr: &str) -> i64 {
        let expr = expr.trim();
        let Some((op, left, right)) = split_operator(expr, &ARITHMETIC_OPERATORS) else {
            return self.operand_or_zero(expr);
        };
        let left = self.operand_or_zero(left);
        let right = self.operand_or_zero(right);
        match op {
            '+' => left.wrapping_add(right),
            '-' => left.wrapping_sub(right),
            '*' => left.wrapping_mul(right),
            _ => {
                if right == 0 {
                    self.report(ScriptError::DivisionByZero);
                    0
                } else {
                    left.wrapping_div(right)
                }
            }
        }
    }

    /// Evaluate the parenthesized condition of an `If` or `Elif` line.
    /// Any failure is reported and the condition counts as false.
    pub(crate) fn eval_branch_condition(&mut self, line: &str) -> bool {
        let result = parenthesized(line)
            .and_then(parse_condition)
            .and_then(|condition| self.test_condition(&condition));
        let outcome = self.recover(result);
        self.debug(format!("Condition {} is {}", line, outcome));
        outcome
    }

    fn test_condition(&self, condition: &Condition) -> Result<bool, ScriptError> {
        match condition {
            Condition::Modulo {
                var,
                divisor,
                remainder,
            } => {
                let value = self.env.lookup_int(var)?;
                let divisor =
                    parse_int(divisor).ok_or_else(|| ScriptError::InvalidValue(divisor.clone()))?;
                let remainder = parse_int(remainder)
                    .ok_or_else(|| ScriptError::InvalidValue(remainder.clone()))?;
                if divisor == 0 {
                    return Err(ScriptError::DivisionByZero);
                }
                Ok(value.wrapping_rem(divisor) == remainder)
            }
            Condition::Equals { left, right } => {
                let left = self.condition_value(left)?;
                let right = self.condition_value(right)?;
                Ok(left == right)
            }
        }
    }

    /// One side of an equality: quoted text, integer literal, or variable.
    fn condition_value(&self, text: &str) -> Result<Value, ScriptError> {
        if is_quoted(text) {
            return Ok(Value::Str(strip_quotes(text).to_string()));
        }
        if let Some(n) = parse_int(text) {
            return Ok(Value::Int(n));
        }
        self.env.lookup(text).cloned()
    }

    pub(crate) fn eval_loop_condition(&mut self, condition: &LoopCondition) -> bool {
        let left = self.eval_arithmetic(&condition.left);
        let right = self.eval_arithmetic(&condition.right);
        match condition.op {
            Comparison::Less => left < right,
            Comparison::Greater => left > right,
            Comparison::Equal => left == right,
        }
    }
}
