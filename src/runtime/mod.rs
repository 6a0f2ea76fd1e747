mod actions;
mod control;
mod eval;
pub mod value;

use std::fmt;
use std::mem;

pub use value::{Environment, Value};

use crate::config::InterpreterOptions;
use crate::error::{Diagnostic, ScriptError};
use crate::lexer::tokens::{classify, StatementKind};
use crate::lexer::Script;
use crate::world::{MessageSink, World};

/// Outcome of one run. Failures never escape `run`; they end up here and
/// in the message sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Lines in the statement sequence, blank and comment lines included.
    pub lines: usize,
    /// Top-level statements dispatched.
    pub statements_executed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_kinds(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(|d| d.error.kind()).collect()
    }
}

/// One interpreter session: an environment plus the two host ports.
///
/// Execution is synchronous and runs to completion. A `While` whose
/// condition never turns false keeps the calling thread busy forever unless
/// [`InterpreterOptions::max_loop_iterations`] is set.
pub struct Interpreter<'a> {
    env: Environment,
    world: &'a mut dyn World,
    sink: &'a mut dyn MessageSink,
    options: InterpreterOptions,
    current_line: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Interpreter<'a> {
    pub fn new(world: &'a mut dyn World, sink: &'a mut dyn MessageSink) -> Self {
        Self {
            env: Environment::new(),
            world,
            sink,
            options: InterpreterOptions::default(),
            current_line: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: InterpreterOptions) -> Self {
        self.options = options;
        self
    }

    /// Start from pre-seeded variables instead of an empty environment.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn into_environment(self) -> Environment {
        self.env
    }

    /// Execute `source` line by line. Variables persist in this session's
    /// environment after the run.
    pub fn run(&mut self, source: &str) -> RunReport {
        let script = Script::new(source);
        self.debug(format!(
            "Starting script execution with {} lines",
            script.len()
        ));

        let mut statements_executed = 0;
        let mut index = 0;
        while let Some(line) = script.line(index) {
            let kind = classify(line);
            if !kind.is_top_level() {
                index += 1;
                continue;
            }

            self.current_line = index;
            statements_executed += 1;
            self.debug(format!("Processing line: {}", line));
            index = match self.dispatch(&script, index, kind, line) {
                Ok(next) => next,
                Err(e) => {
                    self.report(e);
                    index + 1
                }
            };
        }

        RunReport {
            lines: script.len(),
            statements_executed,
            diagnostics: mem::take(&mut self.diagnostics),
        }
    }

    /// Like [`Interpreter::run`], announcing the script by name before and
    /// after, as a host item does when it triggers a script.
    pub fn run_named(&mut self, name: &str, source: &str) -> RunReport {
        self.say(&format!("Executing script: {}", name));
        let report = self.run(source);
        self.say("Script execution completed.");
        report
    }

    /// Execute one top-level statement and return the index to continue at.
    fn dispatch(
        &mut self,
        script: &Script,
        index: usize,
        kind: StatementKind,
        line: &str,
    ) -> Result<usize, ScriptError> {
        match kind {
            StatementKind::Let => self.execute_declaration(line)?,
            StatementKind::For => self.execute_for(script, line)?,
            StatementKind::While => return self.execute_while(script, index, line),
            StatementKind::Print => self.execute_print(line)?,
            StatementKind::PlaceBlock => self.execute_place_block(line)?,
            StatementKind::PlaceWall => self.execute_place_wall(line)?,
            StatementKind::Spawn => self.execute_spawn(line)?,
            _ => {}
        }
        Ok(index + 1)
    }

    // ── Reporting ───────────────────────────────────────────────────

    fn with_line<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = mem::replace(&mut self.current_line, index);
        let result = f(self);
        self.current_line = saved;
        result
    }

    fn report(&mut self, error: ScriptError) {
        let diagnostic = Diagnostic {
            line: self.current_line + 1,
            error,
        };
        tracing::debug!(
            line = diagnostic.line,
            kind = diagnostic.error.kind(),
            "{}",
            diagnostic.error
        );
        self.sink.emit(&diagnostic.to_string());
        self.diagnostics.push(diagnostic);
    }

    /// Report a failed evaluation and carry on with the type's default
    /// (`0` for integers, `false` for conditions).
    fn recover<T: Default>(&mut self, result: Result<T, ScriptError>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.report(e);
                T::default()
            }
        }
    }

    fn say(&mut self, text: &str) {
        self.sink.emit(text);
    }

    fn debug(&mut self, message: impl fmt::Display) {
        tracing::debug!("{}", message);
        if self.options.verbose {
            self.sink.emit(&message.to_string());
        }
    }
}

/// Run `source` in a fresh session with default options.
pub fn run<'a>(
    source: &str,
    world: &'a mut dyn World,
    sink: &'a mut dyn MessageSink,
) -> RunReport {
    Interpreter::new(world, sink).run(source)
}
