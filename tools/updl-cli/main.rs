use clap::{ArgAction, Parser, ValueEnum};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use updl::prelude::*;

/// Output targets as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetCli {
    SceneGraph,
    Mmoomm,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameModeCli {
    Singleplayer,
    Multiplayer,
}

/// Compiles a UPDL flow into a scene graph or a PlayCanvas bundle
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow JSON exported by the editor
    flow_path: String,

    /// The output to generate
    #[arg(short, long, value_enum, default_value = "scene-graph")]
    target: TargetCli,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Path to a generation options JSON file
    #[arg(long)]
    options: Option<String>,

    /// Force the game mode instead of detecting it
    #[arg(short = 'm', long, value_enum)]
    game_mode: Option<GameModeCli>,

    /// Print the assembled scene tree(s) to stderr
    #[arg(long)]
    tree: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Loading ---
    let flow_json = fs::read_to_string(&cli.flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", cli.flow_path, e))
    });
    let mut options = match &cli.options {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read options file '{}': {}", path, e))
            });
            GenerationOptions::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid options: {}", e)))
        }
        None => GenerationOptions::default(),
    };
    if let Some(mode) = cli.game_mode {
        options = options.with_game_mode(match mode {
            GameModeCli::Singleplayer => GameMode::SinglePlayer,
            GameModeCli::Multiplayer => GameMode::Multiplayer,
        });
    }

    // --- 2. Processing ---
    let process_start = Instant::now();
    let result = process_flow_data(&flow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to process flow: {}", e)));
    let process_duration = process_start.elapsed();

    if !updl::mode::has_content(&result) {
        eprintln!("Warning: the flow produced no playable content");
    }
    if cli.tree {
        for space in result.spaces() {
            eprintln!("{}", DisplaySpace { space });
        }
    }

    // --- 3. Emission ---
    let target = match cli.target {
        TargetCli::SceneGraph => EmitTarget::SceneGraph,
        TargetCli::Mmoomm => EmitTarget::Mmoomm,
    };
    let emit_start = Instant::now();
    let output = emitter_for(target)
        .emit(&result, &options)
        .unwrap_or_else(|e| exit_with_error(&format!("Generation failed: {}", e)));
    let emit_duration = emit_start.elapsed();

    match &cli.output {
        Some(path) => {
            fs::write(path, &output.content).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output '{}': {}", path, e))
            });
            eprintln!("Wrote {} ({}) to '{}'", output.media_type, output.content.len(), path);
        }
        None => println!("{}", output.content),
    }

    eprintln!("\n--- Summary ---");
    eprintln!("Scenes:      {}", result.spaces().len());
    eprintln!("Multi-scene: {}", result.is_multi_scene());
    eprintln!("Game mode:   {}", determine_game_mode(&result, &options));
    eprintln!("Processing:  {:?}", process_duration);
    eprintln!("Generation:  {:?}", emit_duration);
    eprintln!("Total:       {:?}", total_start.elapsed());
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "updl=warn",
        1 => "updl=debug",
        _ => "updl=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
