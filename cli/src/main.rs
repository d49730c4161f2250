//! pdfoutline CLI - infer heading outlines from PDFs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::BatchOutcome;
use pdfoutline::{
    render, BatchRunner, JsonFormat, OutlineConfig, OutlineExtractor, ParseOptions, PdfParser,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer a title and heading outline from PDF layout", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Minimum heading length in characters
        #[arg(long, default_value = "4")]
        min_length: usize,

        /// Maximum number of heading levels
        #[arg(long, default_value = "3")]
        max_levels: usize,

        /// Skip pages whose text cannot be read instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Process every PDF in a directory, writing one JSON file per document
    Batch {
        /// Directory containing PDF files
        #[arg(
            value_name = "INPUT_DIR",
            env = "PDFOUTLINE_INPUT",
            default_value = "/app/input"
        )]
        input: PathBuf,

        /// Directory for the JSON results
        #[arg(
            value_name = "OUTPUT_DIR",
            env = "PDFOUTLINE_OUTPUT",
            default_value = "/app/output"
        )]
        output: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show candidate spans with their size and tier
    Spans {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only show spans from this page
        #[arg(long)]
        page: Option<u32>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON document with title and outline
    Json,
    /// Indented plain text listing
    Text,
}

struct OutlineArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    compact: bool,
    format: OutputFormat,
    min_length: usize,
    max_levels: usize,
    lenient: bool,
}

impl<'a> OutlineArgs<'a> {
    fn defaults(input: &'a Path, output: Option<&'a Path>) -> Self {
        Self {
            input,
            output,
            compact: false,
            format: OutputFormat::Json,
            min_length: 4,
            max_levels: 3,
            lenient: false,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            format,
            min_length,
            max_levels,
            lenient,
        }) => cmd_outline(OutlineArgs {
            input: &input,
            output: output.as_deref(),
            compact,
            format,
            min_length,
            max_levels,
            lenient,
        }),
        Some(Commands::Batch {
            input,
            output,
            sequential,
        }) => cmd_batch(&input, &output, sequential),
        Some(Commands::Spans { input, page }) => cmd_spans(&input, page),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: outline the given file
            if let Some(input) = cli.input {
                cmd_outline(OutlineArgs::defaults(&input, cli.output.as_deref()))
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [-o OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(args: OutlineArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let config = OutlineConfig::new()
        .with_min_heading_length(args.min_length)
        .with_max_tiers(args.max_levels);

    let mut parse_options = ParseOptions::new();
    if args.lenient {
        parse_options = parse_options.lenient();
    }

    let extractor = OutlineExtractor::with_config(config)?.with_parse_options(parse_options);
    log::debug!("Inferring outline of {}", args.input.display());
    let result = extractor.extract_file(args.input)?;

    let content = match args.format {
        OutputFormat::Json if args.compact => render::to_json(&result, JsonFormat::Compact)?,
        OutputFormat::Json => render::to_json(&result, JsonFormat::Pretty)?,
        OutputFormat::Text => render::to_text(&result),
    };

    if let Some(path) = args.output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content.trim_end());
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = BatchRunner::discover(input)?;
    log::debug!(
        "Batch: {} files, output to {}",
        files.len(),
        output.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let runner = BatchRunner::new(OutlineExtractor::new()).parallel(!sequential);
    let report = runner.run_files(&files, output, |outcome: &BatchOutcome| {
        // suspend() still prints when the bar is hidden (no terminal)
        pb.suspend(|| match outcome {
            Ok(item) => println!(
                "Processed {} -> {}",
                file_name(&item.input),
                file_name(&item.output)
            ),
            Err(failure) => eprintln!(
                "{} {}: {}",
                "Failed".red(),
                file_name(&failure.input),
                failure.error
            ),
        });
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    println!(
        "\n{} {} processed, {} failed",
        "Done!".green().bold(),
        report.processed.len(),
        report.failed.len()
    );

    Ok(())
}

fn cmd_spans(input: &Path, page: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient: show whatever text is readable
    let parser = PdfParser::open_with_options(input, ParseOptions::new().lenient())?;
    let doc = parser.parse()?;

    if let Some(n) = page {
        if n == 0 || n > doc.page_count() {
            return Err(pdfoutline::Error::PageOutOfRange(n, doc.page_count()).into());
        }
    }

    let analysis = OutlineExtractor::new().analyze(&doc);

    println!("{}: {}", "Title".bold(), analysis.title);
    let centers: Vec<String> = analysis
        .clusters
        .tiers()
        .iter()
        .map(|t| format!("{}={:.1}", t.level, t.rounded))
        .collect();
    println!("{}: {}", "Tiers".bold(), centers.join(" "));
    println!("{}", "─".repeat(40).dimmed());

    for span in analysis
        .spans
        .iter()
        .filter(|s| page.map_or(true, |n| s.page == n))
    {
        let tier = analysis
            .clusters
            .level_of(&span.key())
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "p.{:<4} {:>6.1}  {:<3} {}",
            span.page,
            span.font_size,
            tier.cyan(),
            span.text
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline inference tool");
    println!();
    println!("License: MIT");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
