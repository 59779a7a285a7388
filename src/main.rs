//! folio - Standard manuscript format generator

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use folio::export::export_to_path;
use folio::manuscript::PaperSize;
use folio::{AssembleOptions, ManuscriptStyle, SceneOrder, build_manuscript};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Standard manuscript format generator", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio                             Format ./scenes into manuscript.docx
    folio my-story out/story.docx     Format a project into a chosen file
    folio my-story proof.txt          Write a plain-text proof
    folio -i my-story                 Show the title page summary")]
struct Cli {
    /// Project directory containing project.json and scenes/
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    /// Output file (DOCX or TXT)
    #[arg(value_name = "OUTPUT", default_value = "manuscript.docx")]
    output: PathBuf,

    /// Order scenes by their number instead of by file name
    #[arg(long)]
    numeric_order: bool,

    /// Count words in the prose when project.json gives no word count
    #[arg(long)]
    count_words: bool,

    /// Paper size
    #[arg(long, value_enum, default_value_t = Paper::Letter)]
    paper: Paper,

    /// Show the title page summary without writing a manuscript
    #[arg(short, long)]
    info: bool,

    /// Log each scene as it is processed
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    Letter,
    A4,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Letter => PaperSize::Letter,
            Paper::A4 => PaperSize::A4,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = AssembleOptions {
        scene_order: if cli.numeric_order {
            SceneOrder::Numeric
        } else {
            SceneOrder::Lexicographic
        },
        count_words: cli.count_words,
        style: ManuscriptStyle::default().with_paper(cli.paper.into()),
    };

    let result = if cli.info {
        show_info(&cli.project_dir, &options)
    } else {
        format_manuscript(&cli.project_dir, &cli.output, &options, cli.quiet)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "folio=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn show_info(project_dir: &Path, options: &AssembleOptions) -> folio::Result<()> {
    let doc = build_manuscript(project_dir, options)?;

    println!("Project: {}", project_dir.display());
    println!("Title: {}", doc.title);
    println!("Author: {}", doc.author);
    println!("Header: {}", doc.header);
    println!("Word count: {}", doc.word_count);
    println!("Scenes: {}", doc.scene_count);
    println!("Paragraphs: {}", doc.paragraphs().count());

    Ok(())
}

fn format_manuscript(
    project_dir: &Path,
    output: &Path,
    options: &AssembleOptions,
    quiet: bool,
) -> folio::Result<()> {
    let doc = build_manuscript(project_dir, options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    export_to_path(&doc, output)?;

    if !quiet {
        println!("Created: {}", output.display());
    }
    Ok(())
}
