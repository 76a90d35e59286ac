// ABOUTME: Main entry point for the md2pptx program.
// ABOUTME: Provides the CLI interface and runs the parse-then-render conversion.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Convert a slide-deck style markdown file into a PowerPoint presentation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the markdown file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to output PPTX file (defaults to the input path with a .pptx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title stored in the presentation properties
    #[arg(long)]
    title: Option<String>,

    /// Slide aspect ratio: '4:3' or '16:9'
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Print the parsed slide outline instead of writing a presentation
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = md2pptx::Config::with_paths(cli.input.clone(), cli.output.clone());

    match md2pptx::utils::validate_file_exists(&config.input_path) {
        Ok(()) => {}
        Err(md2pptx::DeckError::PathNotFoundError(path)) => {
            println!("❌ File not found: {}", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &md2pptx::Config) -> anyhow::Result<()> {
    println!("📖 Reading: {}", config.input_path.display());
    let slides = md2pptx::parse_markdown_file(&config.input_path)
        .with_context(|| format!("Failed to parse {}", config.input_path.display()))?;
    println!("📊 Parsed {} slides", slides.len());

    if cli.dry_run {
        for (i, slide) in slides.iter().enumerate() {
            println!("{}. {}", i + 1, slide.outline());
        }
        return Ok(());
    }

    let output_path = config.resolved_output_path();
    let title = cli
        .title
        .clone()
        .unwrap_or_else(|| config.document_title(&slides));
    let pptx_config = config.get_pptx_config(Some(title), cli.aspect_ratio.clone());

    println!("📝 Creating PowerPoint...");
    md2pptx::generate_pptx(&slides, &output_path, &pptx_config)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("✅ PowerPoint presentation created: {}", output_path.display());
    println!("   Total slides: {}", slides.len());
    println!("✅ Done! You can now open {}", output_path.display());
    Ok(())
}
