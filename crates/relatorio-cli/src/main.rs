//! Boundary binary: JSON input record in, filled `.docx` report out.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use relatorio_core::{FieldCatalog, FillEngine, FillOptions, ReportInput, ReportType};
use relatorio_docx::DocxTemplate;

mod templates;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with the report's field values
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding the official .docx models
    #[arg(long, default_value = "templates")]
    templates: PathBuf,

    /// Directory the generated report is written to
    #[arg(short, long, default_value = "files")]
    out_dir: PathBuf,

    /// Write values even into cells that already hold text
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading input record {}", args.input.display()))?;
    let input: ReportInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing input record {}", args.input.display()))?;

    // Validated before any template I/O; an unknown type never mutates
    // anything. An absent selector keeps the original default.
    let report_type = match input.tipo.as_deref() {
        Some(tipo) => tipo.parse::<ReportType>()?,
        None => ReportType::default(),
    };

    let template_path = templates::resolve(&args.templates, report_type)?;
    let mut template = DocxTemplate::open(&template_path)
        .with_context(|| format!("opening template {}", template_path.display()))?;

    let catalog = FieldCatalog::new();
    let engine = FillEngine::with_options(
        &catalog,
        FillOptions {
            overwrite: args.overwrite,
        },
    );
    let stats = engine.fill(template.document_mut(), report_type, &input);
    tracing::info!(
        report_type = %report_type,
        paired = stats.paired_written,
        block = stats.block_written,
        renamed = stats.headings_renamed,
        "report filled"
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H%M%S");
    let out_path = args
        .out_dir
        .join(format!("Relatorio_{report_type}_{stamp}.docx"));
    template
        .save(&out_path)
        .with_context(|| format!("writing report {}", out_path.display()))?;

    println!("{}", out_path.display());
    Ok(())
}
