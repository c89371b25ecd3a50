//! pdfrank CLI - persona-driven section ranking for PDF collections

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfrank::embed::DEFAULT_MODEL;
use pdfrank::{
    build_query, render, EmbeddingBackend, ExtractOptions, InputRecord, JsonFormat,
    PdfTextExtractor, Pipeline, PipelineOptions, SectionAnalyzer, TextExtractor,
};

#[derive(Parser)]
#[command(name = "pdfrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank PDF sections by relevance to a persona and a task", long_about = None)]
struct Cli {
    /// Input record (JSON)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PDFRANK_INPUT",
        default_value = "challenge1b_input.json"
    )]
    input: PathBuf,

    /// Output record (JSON)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PDFRANK_OUTPUT",
        default_value = "challenge1b_output.json"
    )]
    output: PathBuf,

    /// Directory holding the PDFs (overrides the input record)
    #[arg(long, value_name = "DIR", env = "PDFRANK_PDF_DIR")]
    pdf_dir: Option<PathBuf>,

    /// Sentence-embedding model
    #[arg(long, value_name = "NAME", env = "PDFRANK_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Directory for cached model weights
    #[arg(long, value_name = "DIR", env = "PDFRANK_MODEL_CACHE")]
    model_cache: Option<PathBuf>,

    /// Use the hashing stub instead of a model (no download, lexical only)
    #[arg(long)]
    offline: bool,

    /// Number of sections to keep
    #[arg(short = 'k', long, default_value = "10")]
    top_k: usize,

    /// Extract documents in parallel
    #[arg(long)]
    parallel: bool,

    /// Fail a document on the first unreadable page
    #[arg(long)]
    strict: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sections found in one PDF
    Sections {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the ranking query built from an input record
    Query {
        /// Input record (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Sections { input, json }) => cmd_sections(input, *json),
        Some(Commands::Query { input }) => cmd_query(input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    // A bad input record is fatal; nothing is written.
    let record = InputRecord::from_path(&cli.input)
        .map_err(|e| format!("cannot read input {}: {}", cli.input.display(), e))?;

    let extract = if cli.strict {
        ExtractOptions::new().strict()
    } else {
        ExtractOptions::new().lenient()
    };
    let embedding = if cli.offline {
        EmbeddingBackend::Hashing
    } else {
        EmbeddingBackend::Model {
            name: cli.model.clone(),
            cache_dir: cli.model_cache.clone(),
        }
    };
    let mut options = PipelineOptions::new()
        .with_top_k(cli.top_k)
        .with_parallel(cli.parallel)
        .with_extract_options(extract)
        .with_embedding(embedding);
    if let Some(dir) = &cli.pdf_dir {
        options = options.with_pdf_dir(dir);
    }

    // Model load failures are fatal too.
    let pipeline = Pipeline::with_defaults(options)?;
    log::info!(
        "ranking {} documents from {}",
        record.documents.len(),
        pipeline.pdf_dir_for(&record).display()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Ranking sections...");

    let result = pipeline.process(&record);
    pb.finish_and_clear();

    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    render::write_json(&result.output, &cli.output, format)
        .map_err(|e| format!("cannot write output {}: {}", cli.output.display(), e))?;

    for report in result.documents.iter().filter(|d| !d.is_resolved()) {
        println!("{} {}", "Missing".yellow(), report.path.display());
    }

    let stats = &result.stats;
    println!(
        "{} {} documents, {} of {} sections kept, {} ranked",
        "Done!".green().bold(),
        stats.documents_processed,
        stats.kept_sections,
        stats.candidate_sections,
        stats.ranked_sections
    );
    println!("{} {}", "Saved to".green(), cli.output.display());

    Ok(())
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pages = PdfTextExtractor::new().extract(input)?;
    let analysis = SectionAnalyzer::new().analyze_pages(&pages);

    if json {
        println!("{}", render::to_json(&analysis.sections, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &analysis.sections {
        println!(
            "{} {} {}",
            format!("p.{:<4}", section.page).dimmed(),
            format!("[{}]", section.content_type).yellow(),
            section.title.bold()
        );
    }

    println!();
    println!(
        "{}: {} of {} candidates kept",
        "Total".bold(),
        analysis.sections.len(),
        analysis.candidates
    );

    Ok(())
}

fn cmd_query(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record = InputRecord::from_path(input)?;
    println!("{}", build_query(&record.persona, &record.job_to_be_done));
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Persona-driven PDF section ranking");
    println!();
    println!("License: MIT");
}
