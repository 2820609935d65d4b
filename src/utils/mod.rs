pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;
pub mod settings;
pub mod temp_file;

pub use constants::*;
pub use filename::generate_default_chart_filename;
pub use logging::init_logging;
pub use progress::ProgressReporter;
pub use settings::{ChartSettings, ReaderSettings, Settings};
pub use temp_file::TempDownload;
