use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use tracing_subscriber::EnvFilter;

use mcscript_lang::config::{InterpreterOptions, WorldConfig};
use mcscript_lang::lexer::tokens::classify;
use mcscript_lang::lexer::{is_blank_or_comment, Script};
use mcscript_lang::world::recording::RecordingWorld;
use mcscript_lang::world::StdoutSink;
use mcscript_lang::Interpreter;

#[derive(ClapParser)]
#[command(name = "mcscript", version, about = "Run MCScript world-building scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script against a recording world
    Run {
        /// Path to .mcsl file
        file: PathBuf,
        /// JSON description of the actor and known unit/entity types
        #[arg(short, long)]
        world: Option<PathBuf>,
        /// Echo interpreter debug lines as messages
        #[arg(short, long)]
        verbose: bool,
        /// Stop a While loop after this many iterations (0 = unbounded)
        #[arg(long, default_value_t = 1_000_000)]
        max_iterations: u64,
        /// Print the recorded world calls as JSON
        #[arg(long)]
        trace: bool,
        /// Print the SHA-256 digest of the recorded world calls
        #[arg(long)]
        digest: bool,
    },
    /// Show the statement kind of every line (debug)
    Classify {
        /// Path to .mcsl file
        file: PathBuf,
    },
    /// Show the statement sequence, marking lines that do not execute
    Lines {
        /// Path to .mcsl file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Run {
            file,
            world,
            verbose,
            max_iterations,
            trace,
            digest,
        } => {
            let options = InterpreterOptions::default()
                .verbose(verbose)
                .max_loop_iterations((max_iterations > 0).then_some(max_iterations));
            cmd_run(&file, world.as_deref(), options, trace, digest)
        }
        Commands::Classify { file } => cmd_classify(&file),
        Commands::Lines { file } => cmd_lines(&file),
    };
    process::exit(exit_code);
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

fn read_source(path: &Path) -> Result<(String, String), i32> {
    let filename = path.to_string_lossy().to_string();

    match std::fs::metadata(path) {
        Ok(meta) => {
            if meta.len() > MAX_SOURCE_SIZE {
                eprintln!(
                    "Error: file {} is too large ({} bytes, max {} bytes)",
                    filename,
                    meta.len(),
                    MAX_SOURCE_SIZE
                );
                return Err(1);
            }
        }
        Err(e) => {
            eprintln!("Error: cannot read file {}: {}", filename, e);
            return Err(1);
        }
    }

    match std::fs::read_to_string(path) {
        Ok(source) => Ok((source, filename)),
        Err(e) => {
            eprintln!("Error: cannot read file {}: {}", filename, e);
            Err(1)
        }
    }
}

fn cmd_run(
    path: &Path,
    world_path: Option<&Path>,
    options: InterpreterOptions,
    trace: bool,
    digest: bool,
) -> i32 {
    let (source, filename) = match read_source(path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let config = match world_path {
        Some(p) => match WorldConfig::load(p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
        None => WorldConfig::default(),
    };

    let mut world = RecordingWorld::from_config(&config);
    let mut sink = StdoutSink;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or(filename);

    let report = Interpreter::new(&mut world, &mut sink)
        .with_options(options)
        .run_named(&name, &source);
    tracing::info!(
        lines = report.lines,
        statements = report.statements_executed,
        diagnostics = report.diagnostics.len(),
        "run finished"
    );

    if trace {
        match serde_json::to_string_pretty(world.calls()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: cannot serialize world calls: {}", e);
                return 1;
            }
        }
    }
    if digest {
        println!("digest: {}", world.digest());
    }

    if report.is_clean() {
        0
    } else {
        2
    }
}

fn cmd_classify(path: &Path) -> i32 {
    let (source, _) = match read_source(path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let script = Script::new(&source);
    for (index, line) in script.iter() {
        println!("{:>4}  {:<12} {}", index + 1, classify(line).to_string(), line);
    }
    0
}

fn cmd_lines(path: &Path) -> i32 {
    let (source, _) = match read_source(path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let script = Script::new(&source);
    for (index, line) in script.iter() {
        let marker = if is_blank_or_comment(line) { '-' } else { '>' };
        println!("{:>4} {} {}", index + 1, marker, line);
    }
    0
}
