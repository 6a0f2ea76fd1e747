use crate::error::ScriptError;
use crate::lexer::tokens::{classify, StatementKind};
use crate::lexer::Script;
use crate::parser::{parenthesized, parse_assignment, parse_for_header, parse_loop_condition};

use super::eval::split_operator;
use super::{Interpreter, Value};

impl Interpreter<'_> {
    /// `For(var upto end)`: for each value of the inclusive range, bind the
    /// loop variable and evaluate the script's conditional chain once.
    pub(crate) fn execute_for(&mut self, script: &Script, line: &str) -> Result<(), ScriptError> {
        let header = parse_for_header(line)?;
        let start = self.env.lookup_int(&header.var)?;
        let end = self.resolve_operand(&header.end)?;

        self.debug(format!("Starting loop from {} to {}", start, end));
        for i in start..=end {
            self.env.define(header.var.as_str(), Value::Int(i));
            self.evaluate_conditional_chain(script);
        }
        Ok(())
    }

    /// Scan the whole script for `If` / `Elif` / `Else` lines and run at most
    /// one branch per chain. Every `If` starts a new chain; the scan ends
    /// once an `If` header itself has fired.
    pub(crate) fn evaluate_conditional_chain(&mut self, script: &Script) {
        let mut fired = false;
        let mut index = 0;
        while let Some(line) = script.line(index) {
            let header = index;
            index += 1;

            let kind = classify(line);
            if !kind.is_conditional() {
                continue;
            }
            if kind == StatementKind::If {
                fired = false;
            } else if fired {
                continue;
            }

            let taken = match kind {
                StatementKind::Else => true,
                _ => self.with_line(header, |s| s.eval_branch_condition(line)),
            };
            if !taken {
                continue;
            }
            fired = true;
            index = self.execute_branch(script, header);
            if kind == StatementKind::If {
                break;
            }
        }
    }

    /// A taken branch runs exactly the next executable line, which has to be
    /// a `print` or a `placeBlock`. Returns the index after that line.
    fn execute_branch(&mut self, script: &Script, header: usize) -> usize {
        let Some((index, next)) = script.next_statement(header + 1) else {
            return script.len();
        };
        self.with_line(index, |s| {
            let result = match classify(next) {
                StatementKind::Print => s.execute_print(next),
                StatementKind::PlaceBlock => s.execute_place_block(next),
                _ => Err(ScriptError::malformed(format!(
                    "expected print or placeBlock statement, found: {}",
                    next
                ))),
            };
            if let Err(e) = result {
                s.report(e);
            }
        });
        index + 1
    }

    /// `While(condition)` followed by a braced body. Returns the index of
    /// the first line after the body.
    pub(crate) fn execute_while(
        &mut self,
        script: &Script,
        index: usize,
        line: &str,
    ) -> Result<usize, ScriptError> {
        let condition_text = parenthesized(line)?;
        let body = script.capture_body(index)?;
        let resume = body.end + 1;

        self.debug(format!("While loop condition: {}", condition_text));
        self.debug(format!("Loop body size: {}", body.statements.len()));
        if !body.closed {
            tracing::debug!(line = index + 1, "While body runs to end of script");
        }

        let condition = match parse_loop_condition(condition_text) {
            Ok(condition) => condition,
            Err(e) => {
                self.report(e);
                return Ok(resume);
            }
        };

        let mut iterations: u64 = 0;
        while self.eval_loop_condition(&condition) {
            if let Some(limit) = self.options.max_loop_iterations {
                if iterations >= limit {
                    self.report(ScriptError::IterationLimit(limit));
                    break;
                }
            }
            iterations += 1;
            for statement in &body.statements {
                self.with_line(statement.index, |s| s.execute_body_statement(&statement.text));
            }
        }
        tracing::debug!(line = index + 1, iterations, "While loop finished");
        Ok(resume)
    }

    /// Loop bodies only know `print`, bare assignment and `spawn`; any other
    /// line is ignored. Any non-`print` line holding `=` is an assignment,
    /// whatever keyword it starts with.
    fn execute_body_statement(&mut self, text: &str) {
        let kind = match classify(text) {
            StatementKind::Print => StatementKind::Print,
            _ if text.contains('=') => StatementKind::Assignment,
            kind => kind,
        };
        let result = match kind {
            StatementKind::Print => self.execute_print(text),
            StatementKind::Assignment => self.execute_assignment(text),
            StatementKind::Spawn => self.execute_spawn(text),
            _ => Ok(()),
        };
        if let Err(e) = result {
            self.report(e);
        }
    }

    /// `name = expr` where `expr` is `a + b`, another variable, or an
    /// integer literal.
    pub(crate) fn execute_assignment(&mut self, line: &str) -> Result<(), ScriptError> {
        let assignment = parse_assignment(line)?;
        let expr = assignment.expr.as_str();

        let value = if let Some((_, left, right)) = split_operator(expr, &['+']) {
            let left = self.operand_or_zero(left);
            let right = self.operand_or_zero(right);
            Value::Int(left.wrapping_add(right))
        } else if let Some(existing) = self.env.get(expr) {
            existing.clone()
        } else if let Ok(n) = expr.parse::<i64>() {
            Value::Int(n)
        } else {
            return Err(ScriptError::InvalidValue(expr.to_string()));
        };

        self.debug(format!("Assigned {} = {}", assignment.name, value));
        self.env.define(assignment.name, value);
        Ok(())
    }
}
