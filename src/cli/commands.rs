use crate::bot;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::NormalizedObservation;
use crate::processors::{classify_rows, normalize, RowBreakdown, UploadProcessor};
use crate::readers::{ResolvedColumns, WindCsvReader};
use crate::utils::filename::generate_default_chart_filename;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::utils::settings::Settings;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");

    match cli.command {
        Commands::WindBot => bot::wind::run(settings).await?,

        Commands::GameBot => bot::game::run(settings).await?,

        Commands::Render { input, output } => {
            let output = output.unwrap_or_else(generate_default_chart_filename);
            render_file(&settings, &input, &output)?;
        }

        Commands::Inspect {
            input,
            sample,
            json,
        } => {
            let report = inspect_file(&settings, &input, sample)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary());
            }
        }
    }

    Ok(())
}

fn render_file(settings: &Settings, input: &Path, output: &Path) -> Result<()> {
    UploadProcessor::check_file_name(input.file_name().and_then(|n| n.to_str()))?;

    println!("Rendering wind rose...");
    println!("Input file: {}", input.display());
    println!("Output file: {}", output.display());

    let progress = ProgressReporter::new_spinner("Reading observations...", false);
    let processor = UploadProcessor::from_settings(settings);
    let report = processor.process_file(input)?;
    progress.set_message("Writing chart...");

    // Create output directory if it doesn't exist
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, &report.chart.bytes)?;

    progress.finish_with_message(&format!(
        "Rendered {} of {} rows",
        report.summary.records, report.summary.source_rows
    ));

    if let Some(direction) = report.summary.dominant_direction {
        println!("Dominant direction: {} ({:.1}°)", direction, direction.degrees());
    }
    if let (Some(mean), Some(max)) = (report.summary.mean_speed, report.summary.max_speed) {
        println!("Wind speed: mean {:.1} m/s, max {:.1} m/s", mean, max);
    }
    if !report.chart.legend.is_empty() {
        println!("Speed bins (m/s): {}", report.chart.legend.join(", "));
    }
    println!("Chart written to {}", output.display());
    Ok(())
}

/// What the reader detected in a file and how its rows fared.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub file: PathBuf,
    pub encoding: &'static str,
    pub header_line: usize,
    pub delimiter: char,
    pub columns: ResolvedColumns,
    pub total_rows: usize,
    pub skipped_records: usize,
    pub breakdown: RowBreakdown,
    pub sample: Vec<NormalizedObservation>,
}

impl InspectReport {
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("File: {}", self.file.display()),
            format!("Encoding: {}", self.encoding),
            format!("Header line: {}", self.header_line + 1),
            format!("Delimiter: '{}'", self.delimiter),
            format!(
                "Columns: direction='{}', speed='{}'",
                self.columns.direction, self.columns.speed
            ),
            format!(
                "Rows: {} total, {} usable, {} calm, {} unrecognized direction, {} unparseable speed",
                self.total_rows,
                self.breakdown.usable,
                self.breakdown.calm,
                self.breakdown.unrecognized_direction,
                self.breakdown.unparseable_speed
            ),
        ];
        if self.skipped_records > 0 {
            lines.push(format!("Malformed records skipped: {}", self.skipped_records));
        }
        if !self.sample.is_empty() {
            lines.push(format!("Sample ({} rows):", self.sample.len()));
            for (i, observation) in self.sample.iter().enumerate() {
                lines.push(format!(
                    "{}. {:>5.1}° ({}) {:.1} m/s",
                    i + 1,
                    observation.direction_degrees,
                    observation.compass_point(),
                    observation.speed
                ));
            }
        }
        lines.join("\n")
    }
}

pub fn inspect_file(settings: &Settings, input: &Path, sample: usize) -> Result<InspectReport> {
    let reader = WindCsvReader::from_settings(&settings.reader);
    let table = reader.read_file(input)?;
    let breakdown = classify_rows(&table.rows);
    let set = normalize(&table.rows);

    Ok(InspectReport {
        file: input.to_path_buf(),
        encoding: table.encoding,
        header_line: table.header_line,
        delimiter: table.delimiter,
        total_rows: table.rows.len(),
        skipped_records: table.skipped_records,
        columns: table.columns,
        breakdown,
        sample: set.observations().iter().take(sample).copied().collect(),
    })
}
