//! animparse: inspect and run animation scene scripts from the command line.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use animparse::config::RunConfig;
use animparse::context::{AnimationContext, SteppingHooks};
use animparse::dsl;
use animparse::runner::{Player, RunError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print every token with its position
    Tokens,
    /// Print top-level commands, loops unexpanded
    Ast,
    /// Print the flattened atomic command stream
    Flat,
    /// Execute the script and print the final objects
    Run,
}

/// Animation scene script tool
#[derive(Parser)]
#[command(name = "animparse", version)]
#[command(about = "Tokenize, parse, flatten, or run an animation scene script")]
struct Cli {
    /// Script file to read
    script: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Mode::Run)]
    mode: Mode,

    /// Config file (defaults to ~/.animparse/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Stop after this many atomic commands
    #[arg(long)]
    limit: Option<usize>,

    /// Distance a shift moves an object
    #[arg(long)]
    step: Option<f32>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match RunConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load config {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => RunConfig::load().unwrap_or_default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(step) = cli.step {
        config.shift_step = step;
    }
    if cli.limit.is_some() {
        config.command_limit = cli.limit;
    }

    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    let source = match std::fs::read_to_string(&cli.script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("failed to read {}: {e}", cli.script.display());
            std::process::exit(1);
        }
    };
    info!(script = %cli.script.display(), mode = ?cli.mode, "animparse v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.mode {
        Mode::Tokens => print_tokens(&source),
        Mode::Ast => print_ast(&source),
        Mode::Flat => print_flat(&source, &config),
        Mode::Run => run(&source, &config),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn print_tokens(source: &str) -> Result<(), RunError> {
    for token in dsl::tokenize(source) {
        let token = token?;
        println!("{:?} '{}' {}", token.kind, token.text(), token.position);
    }
    Ok(())
}

fn print_ast(source: &str) -> Result<(), RunError> {
    for command in dsl::parse(dsl::tokenize(source)) {
        println!("{}", command?);
    }
    Ok(())
}

fn print_flat(source: &str, config: &RunConfig) -> Result<(), RunError> {
    let limit = config.command_limit.unwrap_or(usize::MAX);
    for command in dsl::commands(source).take(limit) {
        println!("{}", command?);
    }
    Ok(())
}

fn run(source: &str, config: &RunConfig) -> Result<(), RunError> {
    let context = AnimationContext::with_hooks(SteppingHooks::new(config.shift_step));
    let mut player = Player::new(source, context);

    let executed = player.run(config.command_limit);
    if let Some(e) = player.take_error() {
        return Err(e);
    }
    info!(executed, finished = player.is_finished(), "run complete");

    let mut objects: Vec<_> = player.context().objects().collect();
    objects.sort_by_key(|(name, _)| *name);
    for (name, object) in objects {
        println!(
            "{name}\t({}, {})\t{} shapes",
            object.position.x,
            object.position.y,
            object.shapes().len()
        );
    }
    Ok(())
}
