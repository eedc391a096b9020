use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use serde_json::{json, Value};
use twigdoc_engine::extract_fragments;
use twigdoc_loader::{
    Docgen, ExportNameDocgen, Loader, LoaderOptions, RegexSlotScanner, SlotScanner, StaticDocgen,
};
use twigdoc_panel::render_panel;

#[derive(Parser)]
#[command(name = "twigdoc")]
#[command(about = "Twig block and slot documentation for administration components", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a component module and print it with injected metadata
    Load(LoadArgs),
    /// Extract the blocks of a template
    Blocks(BlocksArgs),
    /// List the slots a template declares, as JSON
    Slots(SlotsArgs),
    /// Render the Twig blocks panel for a story or component metadata JSON file
    Panel(PanelArgs),
}

#[derive(Args)]
struct LoadArgs {
    /// Component module (index.js)
    file: PathBuf,

    /// Property the metadata is assigned to
    #[arg(long)]
    inject_at: Option<String>,

    /// JSON file with docgen output to use instead of the built-in docgen
    #[arg(long)]
    docgen: Option<PathBuf>,

    /// Loader options as JSON, e.g. '{"injectAt": "__docgenInfo"}'
    #[arg(long)]
    options: Option<String>,
}

#[derive(Args)]
struct BlocksArgs {
    /// Twig template file
    template: PathBuf,

    /// Print the fragments as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SlotsArgs {
    /// Twig template file
    template: PathBuf,
}

#[derive(Args)]
struct PanelArgs {
    /// Story data or component metadata JSON file
    metadata: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let result = match cli.command {
        Commands::Load(args) => run_load(args),
        Commands::Blocks(args) => run_blocks(args),
        Commands::Slots(args) => run_slots(args),
        Commands::Panel(args) => run_panel(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_load(args: LoadArgs) -> Result<()> {
    let mut options = match &args.options {
        Some(json) => LoaderOptions::from_json(json).context("Invalid loader options")?,
        None => LoaderOptions::default(),
    };
    if let Some(inject_at) = args.inject_at {
        options = options.with_inject_at(inject_at);
    }

    let content = read(&args.file)?;
    match &args.docgen {
        Some(path) => {
            let docgen = StaticDocgen::from_file(path)
                .with_context(|| format!("Failed to load docgen output {}", path.display()))?;
            print_loaded(Loader::new(options, docgen), &content, &args.file)
        }
        None => print_loaded(Loader::new(options, ExportNameDocgen), &content, &args.file),
    }
}

fn print_loaded<D: Docgen>(loader: Loader<D>, content: &str, path: &Path) -> Result<()> {
    let output = loader.load(content, path);
    for warning in &output.warnings {
        // the loader logs warnings itself unless logging is filtered below warn
        if log::max_level() < log::LevelFilter::Warn {
            eprintln!("{}", warning);
        }
    }
    print!("{}", output.code);
    Ok(())
}

fn run_blocks(args: BlocksArgs) -> Result<()> {
    let content = read(&args.template)?;
    let fragments = extract_fragments(&content)
        .with_context(|| format!("Failed to extract blocks from {}", args.template.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fragments)?);
        return Ok(());
    }

    for fragment in &fragments {
        println!("== {} ==", fragment.name);
        if fragment.is_empty() {
            println!("(empty block)");
        } else {
            println!("{}", fragment.code);
        }
    }
    Ok(())
}

fn run_slots(args: SlotsArgs) -> Result<()> {
    let content = read(&args.template)?;
    let slots = RegexSlotScanner.scan(&content);
    println!("{}", serde_json::to_string_pretty(&slots)?);
    Ok(())
}

fn run_panel(args: PanelArgs) -> Result<()> {
    let value: Value = serde_json::from_str(&read(&args.metadata)?)
        .with_context(|| format!("Invalid JSON in {}", args.metadata.display()))?;

    // bare metadata is wrapped into the story shape the panel reads
    let story = if value.get("parameters").is_some() {
        value
    } else {
        json!({"parameters": {"component": {"__docgenInfo": value}}})
    };

    let html = render_panel(Some(&story));
    if html.is_empty() {
        warn!("Nothing to render for {}", args.metadata.display());
    }
    print!("{}", html);
    Ok(())
}
