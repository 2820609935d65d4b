use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::CompassPoint;

/// One data row as read from the CSV, before any conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservationRow {
    pub direction: String,
    pub speed: String,
}

impl RawObservationRow {
    pub fn new(direction: impl Into<String>, speed: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
            speed: speed.into(),
        }
    }
}

impl<D: Into<String>, S: Into<String>> From<(D, S)> for RawObservationRow {
    fn from((direction, speed): (D, S)) -> Self {
        Self::new(direction, speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct NormalizedObservation {
    #[validate(range(min = 0.0, exclusive_max = 360.0))]
    pub direction_degrees: f64,

    #[validate(range(min = 0.0))]
    pub speed: f64,
}

impl NormalizedObservation {
    pub fn new(direction_degrees: f64, speed: f64) -> Self {
        Self {
            direction_degrees,
            speed,
        }
    }

    pub fn compass_point(&self) -> CompassPoint {
        CompassPoint::nearest(self.direction_degrees)
    }
}

/// Ordered result of normalizing one uploaded file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObservationSet {
    observations: Vec<NormalizedObservation>,
    source_rows: usize,
}

impl ObservationSet {
    pub fn new(observations: Vec<NormalizedObservation>, source_rows: usize) -> Self {
        Self {
            observations,
            source_rows,
        }
    }

    pub fn observations(&self) -> &[NormalizedObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of raw rows the set was built from.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    pub fn dropped_rows(&self) -> usize {
        self.source_rows.saturating_sub(self.observations.len())
    }

    /// (degrees, speed) pairs in original order, the shape chart renderers consume.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.observations
            .iter()
            .map(|o| (o.direction_degrees, o.speed))
            .collect()
    }

    pub fn mean_speed(&self) -> Option<f64> {
        if self.observations.is_empty() {
            return None;
        }
        let total: f64 = self.observations.iter().map(|o| o.speed).sum();
        Some(total / self.observations.len() as f64)
    }

    pub fn min_speed(&self) -> Option<f64> {
        self.observations
            .iter()
            .map(|o| o.speed)
            .fold(None, |acc, s| Some(acc.map_or(s, |m: f64| m.min(s))))
    }

    pub fn max_speed(&self) -> Option<f64> {
        self.observations
            .iter()
            .map(|o| o.speed)
            .fold(None, |acc, s| Some(acc.map_or(s, |m: f64| m.max(s))))
    }

    /// Most frequent compass point; ties go to the earliest point clockwise from north.
    pub fn dominant_direction(&self) -> Option<CompassPoint> {
        let mut counts = [0usize; 16];
        for observation in &self.observations {
            counts[observation.compass_point().index()] += 1;
        }
        let (index, count) = counts
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
        (count > 0).then(|| CompassPoint::from_index(index))
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a NormalizedObservation;
    type IntoIter = std::slice::Iter<'a, NormalizedObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_validation() {
        assert!(NormalizedObservation::new(135.0, 3.2).validate().is_ok());
        assert!(NormalizedObservation::new(360.0, 3.2).validate().is_err());
        assert!(NormalizedObservation::new(90.0, -1.0).validate().is_err());
    }

    #[test]
    fn test_set_statistics() {
        let set = ObservationSet::new(
            vec![
                NormalizedObservation::new(0.0, 5.0),
                NormalizedObservation::new(135.0, 3.0),
                NormalizedObservation::new(135.0, 1.0),
            ],
            5,
        );

        assert_eq!(set.len(), 3);
        assert_eq!(set.dropped_rows(), 2);
        assert_eq!(set.mean_speed(), Some(3.0));
        assert_eq!(set.max_speed(), Some(5.0));
        assert_eq!(set.min_speed(), Some(1.0));
        assert_eq!(set.dominant_direction(), Some(CompassPoint::SE));
        assert_eq!(set.pairs(), vec![(0.0, 5.0), (135.0, 3.0), (135.0, 1.0)]);
    }

    #[test]
    fn test_empty_set() {
        let set = ObservationSet::new(Vec::new(), 4);
        assert!(set.is_empty());
        assert_eq!(set.mean_speed(), None);
        assert_eq!(set.max_speed(), None);
        assert_eq!(set.dominant_direction(), None);
    }
}
