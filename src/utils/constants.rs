/// Column names RP5 uses for wind direction and speed
pub const DIRECTION_COLUMN: &str = "DD";
pub const SPEED_COLUMN: &str = "Ff";

/// Lowercase fragments tried when the exact column names are absent
pub const DIRECTION_SYNONYMS: &[&str] = &["направлен", "dd"];
pub const SPEED_SYNONYMS: &[&str] = &["скорост", "ff"];

/// Number of leading lines searched for the header row
pub const DEFAULT_HEADER_SCAN_LINES: usize = 10;

/// Accepted upload extension
pub const CSV_EXTENSION: &str = "csv";

/// Chart defaults
pub const DEFAULT_CHART_SIZE: u32 = 1024;
pub const DEFAULT_WEDGE_OPENING: f64 = 0.8;
pub const DEFAULT_SPEED_BINS: usize = 6;
pub const DEFAULT_CHART_TITLE: &str = "Роза ветров для аэропорта Храброво";
pub const CHART_FILE_NAME: &str = "wind_rose.png";

/// Configuration sources
pub const DEFAULT_CONFIG_FILE: &str = "windrose.toml";
pub const ENV_PREFIX: &str = "WINDROSE";
