//! untextract CLI - document-analysis response extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untextract::export::{write_forms_xlsx, write_tables_xlsx, ExportOptions};
use untextract::{
    parse_files, DocumentGraph, Extraction, ExtractionStats, JsonFormat, PageSelection,
    ReduceOptions, Reducer, RenderOptions, Sections, TextNormalization,
};

#[derive(Parser)]
#[command(name = "untextract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(
    about = "Extract text, forms, and tables from document-analysis responses",
    long_about = None
)]
struct Cli {
    /// Analysis response files (several files are read as pages of one job)
    #[arg(value_name = "FILE")]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", env = "UNTEXTRACT_OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct InputArgs {
    /// Analysis response files (several files are read as pages of one job)
    #[arg(value_name = "FILE", required = true)]
    input: Vec<PathBuf>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Unicode normalization of extracted text
    #[arg(long, value_enum, default_value = "none")]
    normalize: Normalize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to all formats (Markdown, text, JSON, xlsx)
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "UNTEXTRACT_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Convert to Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Sections to render (e.g., "text,forms,tables")
        #[arg(long, default_value = "all")]
        sections: String,
    },

    /// Convert to plain text
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Sections to render (e.g., "text,forms,tables")
        #[arg(long, default_value = "text")]
        sections: String,
    },

    /// Convert to JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output form entries only, as a key to value object
        #[arg(long)]
        forms: bool,
    },

    /// Write forms and tables workbooks
    Xlsx {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Write source column indices above each table
        #[arg(long)]
        column_header: bool,
    },

    /// Show response information
    Info {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Normalize {
    /// Keep text as recognized
    None,
    /// Canonical composition
    Nfc,
    /// Compatibility composition
    Nfkc,
}

impl From<Normalize> for TextNormalization {
    fn from(n: Normalize) -> Self {
        match n {
            Normalize::None => TextNormalization::None,
            Normalize::Nfc => TextNormalization::Nfc,
            Normalize::Nfkc => TextNormalization::Nfkc,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref()),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            sections,
        }) => cmd_markdown(&input, output.as_deref(), frontmatter, &sections),
        Some(Commands::Text {
            input,
            output,
            sections,
        }) => cmd_text(&input, output.as_deref(), &sections),
        Some(Commands::Json {
            input,
            output,
            compact,
            forms,
        }) => cmd_json(&input, output.as_deref(), compact, forms),
        Some(Commands::Xlsx {
            input,
            output,
            column_header,
        }) => cmd_xlsx(&input, output.as_deref(), column_header),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if cli.input.is_empty() {
                println!("{}", "Usage: untextract <FILE>... [-o DIR]".yellow());
                println!("       untextract --help for more information");
                Ok(())
            } else {
                let input = InputArgs {
                    input: cli.input,
                    pages: None,
                    normalize: Normalize::None,
                };
                cmd_convert(&input, cli.output.as_deref())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn reduce_options(args: &InputArgs) -> Result<ReduceOptions, Box<dyn std::error::Error>> {
    let pages = match args.pages.as_deref() {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };
    Ok(ReduceOptions::new()
        .with_pages(pages)
        .with_normalization(args.normalize.into()))
}

fn load(args: &InputArgs) -> Result<Extraction, Box<dyn std::error::Error>> {
    let options = reduce_options(args)?;
    let graph = parse_files(&args.input)?;
    Ok(Reducer::new(options).reduce(&graph))
}

fn parse_sections(s: &str) -> Result<Sections, Box<dyn std::error::Error>> {
    Sections::parse(s).map_err(|e| format!("Invalid sections: {}", e).into())
}

fn write_or_print(output: Option<&Path>, content: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn default_output_dir(inputs: &[PathBuf]) -> PathBuf {
    let stem = inputs
        .first()
        .and_then(|p| p.file_stem())
        .unwrap_or_default()
        .to_string_lossy();
    PathBuf::from(format!("{}_output", stem))
}

fn title_of(inputs: &[PathBuf]) -> String {
    inputs
        .first()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn cmd_convert(args: &InputArgs, output: Option<&Path>) -> CmdResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(&args.input));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reducing blocks...");
    let extraction = load(args)?;
    pb.inc(1);

    let render_options = RenderOptions::new()
        .with_frontmatter(true)
        .with_title(title_of(&args.input));

    pb.set_message("Generating Markdown...");
    let markdown = untextract::render::to_markdown(&extraction, &render_options)?;
    fs::write(output_dir.join("extract.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text and JSON...");
    let text = untextract::render::to_text(&extraction, &render_options)?;
    fs::write(output_dir.join("extract.txt"), &text)?;
    let json = untextract::render::to_json(&extraction, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;
    pb.inc(1);

    pb.set_message("Writing workbooks...");
    let export_options = ExportOptions::default();
    write_forms_xlsx(
        &extraction.forms,
        output_dir.join("forms_output.xlsx"),
        &export_options,
    )?;
    write_tables_xlsx(
        &extraction.tables,
        output_dir.join("tables_output.xlsx"),
        &export_options,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "├─".dimmed());
    println!("  {} forms_output.xlsx", "├─".dimmed());
    println!("  {} tables_output.xlsx", "└─".dimmed());

    Ok(())
}

fn cmd_markdown(
    args: &InputArgs,
    output: Option<&Path>,
    frontmatter: bool,
    sections: &str,
) -> CmdResult {
    let extraction = load(args)?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_title(title_of(&args.input))
        .with_sections(parse_sections(sections)?);

    let markdown = untextract::render::to_markdown(&extraction, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(args: &InputArgs, output: Option<&Path>, sections: &str) -> CmdResult {
    let extraction = load(args)?;

    let render_options = RenderOptions::new().with_sections(parse_sections(sections)?);
    let text = untextract::render::to_text(&extraction, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(args: &InputArgs, output: Option<&Path>, compact: bool, forms: bool) -> CmdResult {
    let extraction = load(args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if forms {
        untextract::render::to_forms_json(&extraction, format)?
    } else {
        untextract::render::to_json(&extraction, format)?
    };
    write_or_print(output, &json)
}

fn cmd_xlsx(args: &InputArgs, output: Option<&Path>, column_header: bool) -> CmdResult {
    let extraction = load(args)?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let options = ExportOptions::new().with_column_header(column_header);

    let forms_path = output_dir.join("forms_output.xlsx");
    write_forms_xlsx(&extraction.forms, &forms_path, &options)?;
    println!(
        "{} {} ({} entries)",
        "Saved".green(),
        forms_path.display(),
        extraction.forms.len()
    );

    let tables_path = output_dir.join("tables_output.xlsx");
    write_tables_xlsx(&extraction.tables, &tables_path, &options)?;
    println!(
        "{} {} ({} tables)",
        "Saved".green(),
        tables_path.display(),
        extraction.tables.len()
    );

    Ok(())
}

fn cmd_info(inputs: &[PathBuf]) -> CmdResult {
    println!("{}", "Response Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut responses = Vec::new();
    for path in inputs {
        let data = fs::read(path)?;
        println!("{}: {}", "File".bold(), path.display());
        responses.extend(untextract::parse_document(&data)?.into_responses());
    }

    if let Some(first) = responses.first() {
        let status = first
            .job_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        println!("{}: {}", "Job status".bold(), status);
        if let Some(ref message) = first.status_message {
            println!("{}: {}", "Status message".bold(), message);
        }
        if let Some(ref metadata) = first.document_metadata {
            println!("{}: {}", "Pages".bold(), metadata.pages);
        }
    }
    println!("{}: {}", "Response pages".bold(), responses.len());

    let warnings: usize = responses.iter().map(|r| r.warnings.len()).sum();
    if warnings > 0 {
        println!("{}: {}", "Warnings".bold().yellow(), warnings);
    }

    let graph = DocumentGraph::from_responses(responses)?;

    println!();
    println!("{}", "Blocks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Total".bold(), graph.len());
    for (block_type, count) in graph.type_counts() {
        println!("{}: {}", format!("{:?}", block_type).bold(), count);
    }
    println!(
        "{}: {}",
        "Dangling references".bold(),
        graph.dangling_references()
    );

    let extraction = untextract::reduce(&graph);
    let stats = ExtractionStats::from_extraction(&extraction);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!(
        "{}: {} ({} without value)",
        "Form entries".bold(),
        stats.form_count,
        stats.empty_value_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!(
        "{}: {} ({} empty)",
        "Table cells".bold(),
        stats.cell_count,
        stats.empty_cell_count
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untextract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document-analysis response extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/untextract".dimmed()
    );
    println!("License: MIT");
}
