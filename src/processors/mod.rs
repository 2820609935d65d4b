pub mod normalizer;
pub mod upload_processor;
pub mod wind_rose;

pub use normalizer::{classify_rows, map_direction, normalize, parse_speed, RowBreakdown};
pub use upload_processor::{UploadProcessor, WindRoseReport, WindRoseSummary};
pub use wind_rose::WindRoseHistogram;
