//! foliant CLI - convert Markdown files to self-contained HTML pages.

use anyhow::{Result, bail};
use facet::Facet;
use facet_args as args;
use foliant::{ConvertOptions, ProcessOptions, Processor, convert_file};
use foliant_highlight::TreeSitterEngine;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Instant;

/// Convert a Markdown file (or a directory of them) to self-contained HTML
/// pages.
///
/// Pages get GitHub-flavored rendering, fenced code blocks highlighted at
/// build time, and the CJK font families verified and embedded before the
/// page commits to them.
#[derive(Debug, Facet)]
struct Args {
    /// Markdown file or directory to convert
    #[facet(args::positional)]
    input: PathBuf,

    /// Output file (for a single input) or directory (for a directory input)
    #[facet(args::positional, default)]
    output: Option<PathBuf>,

    /// Title of the generated page (defaults to the file stem)
    #[facet(args::named, args::short = 't', default)]
    title: Option<String>,

    /// Overwrite existing output files
    #[facet(args::named, args::short = 'f', default)]
    force: bool,

    /// Allow raw HTML and dangerous URLs
    #[facet(args::named, default)]
    no_safe: bool,

    /// Do not highlight fenced code blocks
    #[facet(args::named, default)]
    no_highlight: bool,

    /// Do not verify or embed the CJK font families
    #[facet(args::named, default)]
    no_fonts: bool,

    /// Directory holding the CJK font files (CJK-Regular.ttf, CJK-Bold.ttf,
    /// CJKMono-Regular.ttf, CJKMono-Bold.ttf)
    #[facet(args::named, default)]
    font_dir: Option<PathBuf>,

    /// Custom stylesheet replacing the default markdown CSS
    #[facet(args::named, default)]
    css_path: Option<PathBuf>,

    /// Custom palette replacing the default highlight CSS
    #[facet(args::named, default)]
    highlight_css_path: Option<PathBuf>,

    /// Show verbose output
    #[facet(args::named, args::short = 'v', default)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args: Args = facet_args::from_std_args()?;

    if !args.input.exists() {
        bail!("Input does not exist: {}", args.input.display());
    }

    let convert = ConvertOptions {
        title: args.title.clone(),
        output: None,
        force: args.force,
        allow_raw_html: args.no_safe,
        highlight: !args.no_highlight,
        fonts: !args.no_fonts,
        font_dir: args.font_dir.clone(),
        page_css: args.css_path.clone(),
        highlight_css: args.highlight_css_path.clone(),
    };

    if args.input.is_dir() {
        run_batch(&args, convert)
    } else {
        run_single(&args, convert)
    }
}

fn run_single(args: &Args, mut convert: ConvertOptions) -> Result<()> {
    convert.output = args.output.clone();

    let start = Instant::now();
    let mut engine = TreeSitterEngine::new();
    let report = convert_file(&args.input, &convert, &mut engine)?;
    let elapsed = start.elapsed();

    eprintln!(
        "{} {} -> {}",
        "foliant".green().bold(),
        args.input.display(),
        report.output.display()
    );
    eprintln!(
        "  {} code blocks highlighted, {} skipped",
        report.summary.blocks_highlighted.to_string().green(),
        report.summary.blocks_skipped.to_string().yellow()
    );

    if !report.summary.unsupported_languages.is_empty() {
        eprintln!(
            "  {} unsupported languages: {}",
            "Note:".yellow(),
            report.summary.unsupported_languages.join(", ")
        );
    }
    for notice in &report.notices {
        eprintln!("  {} {}", "Fonts:".cyan().bold(), notice);
    }

    eprintln!("  Completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn run_batch(args: &Args, convert: ConvertOptions) -> Result<()> {
    if args.title.is_some() {
        bail!("--title only applies to a single input file");
    }

    eprintln!(
        "{} Converting Markdown under: {}",
        "foliant".green().bold(),
        args.input.display()
    );
    if let Some(output) = &args.output {
        eprintln!("  Output: {}", output.display());
    } else {
        eprintln!("  {} Writing pages next to their sources", "Note:".yellow());
    }
    eprintln!();

    let mut processor = Processor::new(ProcessOptions {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        convert,
        verbose: args.verbose,
    });

    let start = Instant::now();
    let stats = processor.process(TreeSitterEngine::new)?;
    let elapsed = start.elapsed();

    eprintln!("{}", "Results:".bold());
    eprintln!(
        "  {} files converted",
        stats.files_converted.to_string().cyan()
    );
    if stats.files_failed > 0 {
        eprintln!("  {} files failed", stats.files_failed.to_string().red());
    }
    eprintln!(
        "  {} code blocks highlighted, {} skipped",
        stats.blocks_highlighted.to_string().green(),
        stats.blocks_skipped.to_string().yellow()
    );
    eprintln!(
        "  {:.1} MB/s, output {:.2}x the input size",
        stats.throughput_mb_s(),
        stats.expansion_ratio()
    );

    if !stats.unsupported_languages.is_empty() {
        eprintln!(
            "\n  {} Unsupported languages: {}",
            "Note:".yellow(),
            stats.unsupported_languages.join(", ")
        );
    }
    for notice in &stats.notices {
        eprintln!("  {} {}", "Fonts:".cyan().bold(), notice);
    }

    eprintln!("\n  Completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
