use crate::error::{ProcessingError, Result};
use crate::models::{CompassPoint, ObservationSet};
use crate::processors::normalizer::normalize;
use crate::readers::{ParsedTable, WindCsvReader};
use crate::utils::constants::CSV_EXTENSION;
use crate::utils::settings::Settings;
use crate::writers::{ChartRenderer, RasterRoseRenderer, RenderedChart};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Figures reported back to the user alongside the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindRoseSummary {
    pub records: usize,
    pub source_rows: usize,
    pub skipped_records: usize,
    pub dominant_direction: Option<CompassPoint>,
    pub mean_speed: Option<f64>,
    pub max_speed: Option<f64>,
}

impl WindRoseSummary {
    fn new(table: &ParsedTable, set: &ObservationSet) -> Self {
        Self {
            records: set.len(),
            source_rows: set.source_rows(),
            skipped_records: table.skipped_records,
            dominant_direction: set.dominant_direction(),
            mean_speed: set.mean_speed(),
            max_speed: set.max_speed(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindRoseReport {
    pub chart: RenderedChart,
    pub summary: WindRoseSummary,
}

/// One uploaded file in, one chart out.
///
/// Stateless between calls; a single instance is shared by all requests.
pub struct UploadProcessor {
    reader: WindCsvReader,
    renderer: Box<dyn ChartRenderer>,
}

impl UploadProcessor {
    pub fn new(reader: WindCsvReader, renderer: impl ChartRenderer + 'static) -> Self {
        Self {
            reader,
            renderer: Box::new(renderer),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            WindCsvReader::from_settings(&settings.reader),
            RasterRoseRenderer::from_settings(&settings.chart),
        )
    }

    /// Reject uploads that are not named `*.csv` (ASCII case-insensitive).
    pub fn check_file_name(file_name: Option<&str>) -> Result<()> {
        let name = file_name.unwrap_or_default();
        let is_csv = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));

        if is_csv {
            Ok(())
        } else {
            Err(ProcessingError::UnsupportedExtension {
                file_name: name.to_string(),
            })
        }
    }

    /// Parse and normalize; an empty result is reported as `EmptyResult`.
    pub fn prepare(&self, bytes: &[u8]) -> Result<(ParsedTable, ObservationSet)> {
        let table = self.reader.read_bytes(bytes)?;
        let set = normalize(&table.rows);

        debug!(
            rows = table.rows.len(),
            usable = set.len(),
            dropped = set.dropped_rows(),
            "normalized observations"
        );

        if set.is_empty() {
            return Err(ProcessingError::EmptyResult {
                total_rows: table.rows.len(),
            });
        }
        Ok((table, set))
    }

    pub fn process_bytes(&self, bytes: &[u8]) -> Result<WindRoseReport> {
        let (table, set) = self.prepare(bytes)?;
        let chart = self.renderer.render(&set)?;
        let summary = WindRoseSummary::new(&table, &set);

        info!(
            records = summary.records,
            source_rows = summary.source_rows,
            chart_bytes = chart.bytes.len(),
            "rendered wind rose"
        );

        Ok(WindRoseReport { chart, summary })
    }

    pub fn process_file(&self, path: &Path) -> Result<WindRoseReport> {
        let bytes = std::fs::read(path)?;
        self.process_bytes(&bytes)
    }
}
