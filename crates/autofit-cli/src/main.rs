//! `autofit` - size the columns of a grid document.
//!
//! ```text
//! autofit people.yaml
//! autofit people.json --width 900 --format json
//! autofit people.yaml --debug
//! ```

mod document;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use autofit_grid::GridSizer;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::document::GridDocument;

#[derive(Parser, Debug)]
#[command(
    name = "autofit",
    version,
    about = "Compute content-aware column widths for a data grid"
)]
struct Cli {
    /// Grid document (JSON, or YAML with a .yaml/.yml extension)
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Container width in px, replacing the document's
    #[arg(long)]
    width: Option<f64>,

    /// Trace every sizing decision to stderr
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ColumnReport {
    header: String,
    #[serde(rename = "type")]
    column_type: String,
    width: f64,
    content_ceiling: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    container_width: f64,
    available_width: f64,
    grid_template_columns: String,
    columns: Vec<ColumnReport>,
    groups: std::collections::BTreeMap<String, f64>,
}

impl Report {
    fn new(headers: &[String], sizer: &GridSizer) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, header)| ColumnReport {
                header: header.clone(),
                column_type: sizer
                    .column_type(i)
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                width: sizer.widths().get(i).copied().unwrap_or_default(),
                content_ceiling: sizer.content_ceiling(i).unwrap_or_default(),
            })
            .collect();
        Report {
            container_width: sizer.container().width,
            available_width: sizer.available_width(),
            grid_template_columns: autofit_grid::grid_template_columns(sizer.widths()),
            columns,
            groups: sizer.group_widths().clone(),
        }
    }

    fn render_text(&self) -> String {
        let header_width = self
            .columns
            .iter()
            .map(|c| c.header.chars().count())
            .max()
            .unwrap_or(0)
            .max("header".len());

        let mut out = String::new();
        out.push_str(&format!(
            "grid-template-columns: {}\n",
            self.grid_template_columns
        ));
        out.push_str(&format!(
            "container {}px, available {}px\n\n",
            self.container_width, self.available_width
        ));
        for (i, column) in self.columns.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}  {:<hw$}  {:<8}  {:>10}  (content {})\n",
                i,
                column.header,
                column.column_type,
                format!("{}px", round(column.width)),
                format!("{}px", round(column.content_ceiling)),
                hw = header_width
            ));
        }
        if !self.groups.is_empty() {
            out.push('\n');
            for (name, width) in &self.groups {
                out.push_str(&format!("group {}: {}px\n", name, round(*width)));
            }
        }
        out
    }
}

/// Round to two decimals for display.
fn round(px: f64) -> f64 {
    (px * 100.0).round() / 100.0
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("autofit_grid=debug"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.debug {
        init_tracing();
    }

    let document = GridDocument::load(&cli.file)?;
    tracing::debug!(
        file = %cli.file.display(),
        columns = document.headers.len(),
        rows = document.rows.len(),
        "loaded grid document"
    );
    let sizer = document.sizer(cli.width, cli.debug)?;
    let report = Report::new(&document.header_texts(), &sizer);

    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
