// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ybot CLI - WCAG accessibility evaluator for HTML pages

use a11ybot::config;
use a11ybot::error::A11yError;
use a11ybot::evaluator::Evaluator;
use a11ybot::overlay::BadgeOverlay;
use a11ybot::report::{export, OutputFormat};
use a11ybot::scanner;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG accessibility evaluator for HTML pages
#[derive(Parser)]
#[command(name = "a11ybot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an HTML file or every page under a directory
    Check {
        /// File or directory to evaluate
        path: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging, including overlay badge plans
        #[arg(long, short)]
        verbose: bool,
    },

    /// Evaluate one page and export the results
    Export {
        /// HTML file to evaluate
        file: PathBuf,

        /// Export format: json, csv or html
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to a11ybot-report.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11ybot=debug")
    } else {
        EnvFilter::new("a11ybot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path, format, output, verbose } => {
            init_logging(verbose);
            let evaluator = if verbose {
                Evaluator::new().with_overlay(Box::new(BadgeOverlay::new()))
            } else {
                Evaluator::new()
            };
            let results = scanner::scan_path(&path, &evaluator)?;
            let report = scanner::render_results(&results, format)?;
            write_output(&report, output.as_deref())?;

            if results.iter().any(|r| r.has_critical()) {
                std::process::exit(1);
            }
        }

        Commands::Export { file, format, output, verbose } => {
            init_logging(verbose);
            let page = scanner::scan_file(&file, &Evaluator::new())?;
            let content = match format {
                OutputFormat::Json => export::to_json(&page.report)?,
                OutputFormat::Csv => export::to_csv(&page.report),
                OutputFormat::Html => export::to_html(&page.report),
                OutputFormat::Text => return Err(A11yError::UnsupportedFormat(format.to_string()).into()),
            };
            let path = output.unwrap_or_else(|| PathBuf::from(default_export_file(format)));
            write_output(&content, Some(&path))?;
        }
    }

    Ok(())
}

fn default_export_file(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Csv => config::CSV_REPORT_FILE,
        OutputFormat::Html => config::HTML_REPORT_FILE,
        _ => config::JSON_REPORT_FILE,
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
