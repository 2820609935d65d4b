use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Label RP5 uses for observations with no directional wind component.
pub const CALM_LABEL: &str = "Штиль";

/// One of the 16 points of the compass rose (rumbs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points clockwise from north.
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Angular width of one point in degrees.
    pub const SECTOR_WIDTH: f64 = 360.0 / 16.0;

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Meteorological bearing the wind blows from, clockwise from north.
    pub fn degrees(&self) -> f64 {
        self.index() as f64 * Self::SECTOR_WIDTH
    }

    /// Nearest point for an arbitrary bearing.
    pub fn nearest(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        Self::from_index((normalized / Self::SECTOR_WIDTH).round() as usize)
    }

    /// Abbreviated Cyrillic label as used in RP5 exports (e.g. "ЮВ").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::N => "С",
            CompassPoint::NNE => "ССВ",
            CompassPoint::NE => "СВ",
            CompassPoint::ENE => "ВСВ",
            CompassPoint::E => "В",
            CompassPoint::ESE => "ВЮВ",
            CompassPoint::SE => "ЮВ",
            CompassPoint::SSE => "ЮЮВ",
            CompassPoint::S => "Ю",
            CompassPoint::SSW => "ЮЮЗ",
            CompassPoint::SW => "ЮЗ",
            CompassPoint::WSW => "ЗЮЗ",
            CompassPoint::W => "З",
            CompassPoint::WNW => "ЗСЗ",
            CompassPoint::NW => "СЗ",
            CompassPoint::NNW => "ССЗ",
        }
    }

    /// Full-text label as used in RP5 exports.
    pub fn description(&self) -> &'static str {
        match self {
            CompassPoint::N => "Ветер, дующий с севера",
            CompassPoint::NNE => "Ветер, дующий с северо-северо-востока",
            CompassPoint::NE => "Ветер, дующий с северо-востока",
            CompassPoint::ENE => "Ветер, дующий с востоко-северо-востока",
            CompassPoint::E => "Ветер, дующий с востока",
            CompassPoint::ESE => "Ветер, дующий с востоко-юго-востока",
            CompassPoint::SE => "Ветер, дующий с юго-востока",
            CompassPoint::SSE => "Ветер, дующий с юго-юго-востока",
            CompassPoint::S => "Ветер, дующий с юга",
            CompassPoint::SSW => "Ветер, дующий с юго-юго-запада",
            CompassPoint::SW => "Ветер, дующий с юго-запада",
            CompassPoint::WSW => "Ветер, дующий с западо-юго-запада",
            CompassPoint::W => "Ветер, дующий с запада",
            CompassPoint::WNW => "Ветер, дующий с западо-северо-запада",
            CompassPoint::NW => "Ветер, дующий с северо-запада",
            CompassPoint::NNW => "Ветер, дующий с северо-северо-запада",
        }
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Result of interpreting a direction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionReading {
    Bearing(CompassPoint),
    Calm,
    Unrecognized,
}

impl DirectionReading {
    pub fn degrees(&self) -> Option<f64> {
        match self {
            DirectionReading::Bearing(point) => Some(point.degrees()),
            DirectionReading::Calm | DirectionReading::Unrecognized => None,
        }
    }
}

// Both surface forms of every point index back to the same variant.
static LABEL_INDEX: LazyLock<HashMap<&'static str, CompassPoint>> = LazyLock::new(|| {
    let mut index = HashMap::with_capacity(CompassPoint::ALL.len() * 2);
    for point in CompassPoint::ALL {
        index.insert(point.abbreviation(), point);
        index.insert(point.description(), point);
    }
    index
});

/// Exact, case-sensitive lookup of an RP5 direction label.
pub fn read_direction(label: &str) -> DirectionReading {
    if label == CALM_LABEL {
        return DirectionReading::Calm;
    }
    match LABEL_INDEX.get(label) {
        Some(point) => DirectionReading::Bearing(*point),
        None => DirectionReading::Unrecognized,
    }
}

/// Number of labels the lookup recognizes, calm included.
pub fn recognized_label_count() -> usize {
    LABEL_INDEX.len() + 1
}
