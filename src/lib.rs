pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod world;

pub use config::{InterpreterOptions, WorldConfig};
pub use error::{Diagnostic, ScriptError};
pub use runtime::{run, Environment, Interpreter, RunReport, Value};
pub use world::recording::{RecordingWorld, WorldCall};
pub use world::{Direction, EntityHandle, MessageSink, Position, World};
