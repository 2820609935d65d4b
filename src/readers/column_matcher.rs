use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DIRECTION_COLUMN, DIRECTION_SYNONYMS, SPEED_COLUMN, SPEED_SYNONYMS};
use crate::utils::settings::ReaderSettings;
use serde::Serialize;

/// A column the normalizer needs, known by an exact key and a list of
/// lowercase name fragments that also identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalColumn {
    pub key: String,
    pub synonyms: Vec<String>,
}

impl LogicalColumn {
    pub fn new<S: AsRef<str>>(key: impl Into<String>, synonyms: &[S]) -> Self {
        Self {
            key: key.into(),
            synonyms: synonyms
                .iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Exact key when present, else the first column whose lowercase name
    /// contains any synonym fragment.
    pub fn resolve<'a, S: AsRef<str>>(&self, column_names: &'a [S]) -> Option<&'a str> {
        let mut names = column_names.iter().map(|c| c.as_ref());
        if let Some(exact) = names.clone().find(|name| *name == self.key) {
            return Some(exact);
        }

        names.find(|name| {
            let lowered = name.to_lowercase();
            self.synonyms.iter().any(|s| lowered.contains(s.as_str()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub direction: String,
    pub speed: String,
}

/// Matching policy for the direction and speed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatcher {
    pub direction: LogicalColumn,
    pub speed: LogicalColumn,
}

impl ColumnMatcher {
    pub fn new(direction: LogicalColumn, speed: LogicalColumn) -> Self {
        Self { direction, speed }
    }

    /// RP5 column names with Russian and English fragments.
    pub fn rp5() -> Self {
        Self::with_keys(DIRECTION_COLUMN, SPEED_COLUMN)
    }

    pub fn with_keys(direction_key: &str, speed_key: &str) -> Self {
        Self::new(
            LogicalColumn::new(direction_key, DIRECTION_SYNONYMS),
            LogicalColumn::new(speed_key, SPEED_SYNONYMS),
        )
    }

    pub fn from_settings(settings: &ReaderSettings) -> Self {
        Self::new(
            LogicalColumn::new(settings.direction_key.clone(), &settings.direction_synonyms),
            LogicalColumn::new(settings.speed_key.clone(), &settings.speed_synonyms),
        )
    }

    pub fn resolve<S: AsRef<str>>(&self, column_names: &[S]) -> Result<ResolvedColumns> {
        match (
            self.direction.resolve(column_names),
            self.speed.resolve(column_names),
        ) {
            (Some(direction), Some(speed)) => Ok(ResolvedColumns {
                direction: direction.to_string(),
                speed: speed.to_string(),
            }),
            _ => Err(ProcessingError::MissingColumns {
                direction: self.direction.key.clone(),
                speed: self.speed.key.clone(),
            }),
        }
    }
}

impl Default for ColumnMatcher {
    fn default() -> Self {
        Self::rp5()
    }
}

/// Resolve the direction and speed columns using the default RP5 synonyms.
pub fn resolve_columns<S: AsRef<str>>(
    column_names: &[S],
    direction_key: &str,
    speed_key: &str,
) -> Result<ResolvedColumns> {
    ColumnMatcher::with_keys(direction_key, speed_key).resolve(column_names)
}
