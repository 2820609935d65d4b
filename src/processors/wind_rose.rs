use crate::models::{CompassPoint, ObservationSet};
use serde::Serialize;

/// Direction x speed frequency table behind a wind-rose chart.
///
/// Sectors are centred on the 16 compass points. Speed bins start at edges
/// spaced linearly from the lowest to the highest observed speed; the last
/// bin is open-ended. Frequencies are percentages of all observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindRoseHistogram {
    bin_edges: Vec<f64>,
    frequencies: Vec<Vec<f64>>,
    total: usize,
}

impl WindRoseHistogram {
    pub fn from_observations(set: &ObservationSet, speed_bins: usize) -> Self {
        let bin_edges = speed_bin_edges(set, speed_bins.max(1));
        let mut counts = vec![vec![0usize; bin_edges.len()]; CompassPoint::ALL.len()];

        for observation in set {
            let sector = observation.compass_point().index();
            let bin = bin_edges
                .iter()
                .rposition(|&edge| observation.speed >= edge)
                .unwrap_or(0);
            counts[sector][bin] += 1;
        }

        let total = set.len();
        let frequencies = counts
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|count| {
                        if total == 0 {
                            0.0
                        } else {
                            count as f64 * 100.0 / total as f64
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            bin_edges,
            frequencies,
            total,
        }
    }

    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    pub fn bin_count(&self) -> usize {
        self.bin_edges.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of observations in `point` falling into speed bin `bin`.
    pub fn frequency(&self, point: CompassPoint, bin: usize) -> f64 {
        self.frequencies[point.index()].get(bin).copied().unwrap_or(0.0)
    }

    pub fn sector_total(&self, point: CompassPoint) -> f64 {
        self.frequencies[point.index()].iter().sum()
    }

    pub fn max_sector_total(&self) -> f64 {
        CompassPoint::ALL
            .iter()
            .map(|&p| self.sector_total(p))
            .fold(0.0, f64::max)
    }

    /// Legend text for a speed bin, e.g. "[2.0 : 4.0)" or ">=10.0".
    pub fn bin_label(&self, bin: usize) -> String {
        match (self.bin_edges.get(bin), self.bin_edges.get(bin + 1)) {
            (Some(low), Some(high)) => format!("[{:.1} : {:.1})", low, high),
            (Some(low), None) => format!(">={:.1}", low),
            _ => String::new(),
        }
    }
}

fn speed_bin_edges(set: &ObservationSet, bins: usize) -> Vec<f64> {
    let (min, max) = match (set.min_speed(), set.max_speed()) {
        (Some(min), Some(max)) => (min, max),
        _ => (0.0, 0.0),
    };

    if bins == 1 {
        return vec![min];
    }

    let step = (max - min) / (bins - 1) as f64;
    (0..bins).map(|i| min + step * i as f64).collect()
}
