//! Teneke CLI - JSON bridge over the avatar engine
//!
//! Commands: options, seed, random, render, compile, validate
//! Outputs JSON to stdout (or raw SVG with --svg); logs go to stderr.
//! Returns 1 on bad input, 2 on validation failure.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use teneke_core::{
    config_from_names, generate_from_seed, generate_random, list_container_options,
    list_expression_options, list_palette_options, render_svg, AvatarConfig, AvatarPipeline,
    CompileRequest, EngineConfig, PipelineError, TOTAL_COMBINATIONS,
};

#[derive(Parser)]
#[command(name = "teneke-cli")]
#[command(about = "Teneke CLI - deterministic procedural avatars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an engine config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct Output {
    /// Pixel size (defaults to the engine config's default size)
    #[arg(short, long)]
    size: Option<u32>,

    /// Print raw SVG instead of JSON
    #[arg(long)]
    svg: bool,

    /// Write the SVG document to this file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every trait option and the combination count
    Options,

    /// Generate an avatar from a seed (e.g. a username)
    Seed {
        seed: String,

        #[command(flatten)]
        output: Output,
    },

    /// Generate a random avatar
    Random {
        #[command(flatten)]
        output: Output,
    },

    /// Render an explicit trait selection
    Render {
        #[arg(long)]
        container: String,

        #[arg(long)]
        expression: String,

        #[arg(long)]
        palette: String,

        #[arg(long)]
        accent: Option<String>,

        #[command(flatten)]
        output: Output,
    },

    /// Validate an SVG document against the avatar rules
    Validate {
        /// Path to the SVG document
        #[arg(short, long)]
        file: PathBuf,

        /// Instance id the document's ids must carry
        #[arg(short, long)]
        instance_id: String,

        /// Expected pixel size (defaults to the engine config's default size)
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Compile a validated avatar with manifest
    Compile {
        /// JSON payload (CompileRequest)
        #[arg(short, long)]
        payload: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = match cli.config.as_deref().map(EngineConfig::load).transpose() {
        Ok(c) => c.unwrap_or_default(),
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": format!("Failed to load config: {e}") }));
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Options => {
            let options = serde_json::json!({
                "containers": list_container_options(),
                "expressions": list_expression_options(),
                "palettes": list_palette_options(),
                "totalCombinations": TOTAL_COMBINATIONS,
            });
            print_json(&options)
        }

        Commands::Seed { seed, output } => emit(&generate_from_seed(&seed), &output, &engine),

        Commands::Random { output } => emit(&generate_random(), &output, &engine),

        Commands::Render { container, expression, palette, accent, output } => {
            match config_from_names(&container, &expression, &palette, accent.as_deref()) {
                Ok(config) => emit(&config, &output, &engine),
                Err(e) => fail(ExitCode::FAILURE, &e.into()),
            }
        }

        Commands::Validate { file, instance_id, size } => {
            let doc = match fs::read_to_string(&file) {
                Ok(doc) => doc,
                Err(e) => return fail(ExitCode::FAILURE, &e.into()),
            };
            let size = size.unwrap_or(engine.default_size);

            let result = AvatarPipeline::new(engine).validate_document(&doc, &instance_id, size);
            let valid = result.valid;
            let code = print_json(&serde_json::json!(result));
            if valid {
                code
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Compile { payload } => {
            let request: CompileRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => return fail(ExitCode::FAILURE, &e.into()),
            };

            match AvatarPipeline::new(engine).compile(&request) {
                Ok(asset) => print_json(&serde_json::json!({ "success": true, "asset": asset })),
                Err(e @ PipelineError::ValidationFailed(_)) => fail(ExitCode::from(2), &e),
                Err(e) => fail(ExitCode::FAILURE, &e),
            }
        }
    }
}

fn emit(config: &AvatarConfig, output: &Output, engine: &EngineConfig) -> ExitCode {
    let size = match engine.check_size(output.size.unwrap_or(engine.default_size)) {
        Ok(size) => size,
        Err(e) => return fail(ExitCode::FAILURE, &e),
    };
    let svg = match render_svg(config, size) {
        Ok(svg) => svg,
        Err(e) => return fail(ExitCode::FAILURE, &e),
    };

    if let Some(path) = &output.out {
        if let Err(e) = fs::write(path, &svg) {
            return fail(ExitCode::FAILURE, &e.into());
        }
    }

    if output.svg {
        println!("{svg}");
        return ExitCode::SUCCESS;
    }
    print_json(&serde_json::json!({ "config": config, "size": size, "svg": svg }))
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(ExitCode::FAILURE, &e.into()),
    }
}

fn fail(code: ExitCode, error: &PipelineError) -> ExitCode {
    println!("{}", serde_json::json!({ "success": false, "error": error.to_string() }));
    code
}
