use crate::models::{
    read_direction, DirectionReading, NormalizedObservation, ObservationSet, RawObservationRow,
};
use serde::Serialize;

/// Why rows were kept or dropped, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowBreakdown {
    pub usable: usize,
    pub calm: usize,
    pub unrecognized_direction: usize,
    pub unparseable_speed: usize,
}

/// Degrees for a recognized compass label; `None` for calm or unknown labels.
pub fn map_direction(label: &str) -> Option<f64> {
    read_direction(label).degrees()
}

/// Parse a wind speed written with either `.` or `,` as decimal separator.
///
/// Placeholders, negative values and non-finite numbers yield `None`.
pub fn parse_speed(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".").parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Convert raw rows, keeping a row only when both fields convert.
///
/// Input order is preserved; an empty result is for the caller to report.
pub fn normalize(rows: &[RawObservationRow]) -> ObservationSet {
    let observations = rows
        .iter()
        .filter_map(|row| {
            let direction = map_direction(&row.direction)?;
            let speed = parse_speed(&row.speed)?;
            Some(NormalizedObservation::new(direction, speed))
        })
        .collect();

    ObservationSet::new(observations, rows.len())
}

/// Tally rows by the first reason they would be dropped.
pub fn classify_rows(rows: &[RawObservationRow]) -> RowBreakdown {
    let mut breakdown = RowBreakdown::default();
    for row in rows {
        match read_direction(&row.direction) {
            DirectionReading::Calm => breakdown.calm += 1,
            DirectionReading::Unrecognized => breakdown.unrecognized_direction += 1,
            DirectionReading::Bearing(_) => match parse_speed(&row.speed) {
                Some(_) => breakdown.usable += 1,
                None => breakdown.unparseable_speed += 1,
            },
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompassPoint;
    use pretty_assertions::assert_eq;

    fn rows(pairs: &[(&str, &str)]) -> Vec<RawObservationRow> {
        pairs.iter().map(|&p| RawObservationRow::from(p)).collect()
    }

    #[test]
    fn test_map_direction_forms_agree() {
        for point in CompassPoint::ALL {
            let abbreviated = map_direction(point.abbreviation());
            let full_text = map_direction(point.description());
            assert_eq!(abbreviated, Some(point.degrees()));
            assert_eq!(abbreviated, full_text);
        }

        assert_eq!(map_direction("С"), Some(0.0));
        assert_eq!(map_direction("Ветер, дующий с севера"), Some(0.0));
        assert_eq!(map_direction("ЮВ"), Some(135.0));
        assert_eq!(map_direction("Ветер, дующий с юго-востока"), Some(135.0));
    }

    #[test]
    fn test_map_direction_undefined() {
        assert_eq!(map_direction("Штиль"), None);
        assert_eq!(map_direction("??"), None);
        assert_eq!(map_direction(""), None);
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(parse_speed("5,5"), Some(5.5));
        assert_eq!(parse_speed("5.5"), Some(5.5));
        assert_eq!(parse_speed(" 3 "), Some(3.0));
        assert_eq!(parse_speed("0"), Some(0.0));
        assert_eq!(parse_speed("abc"), None);
        assert_eq!(parse_speed(""), None);
        assert_eq!(parse_speed("1,2,3"), None);
        assert_eq!(parse_speed("-1"), None);
        assert_eq!(parse_speed("NaN"), None);
        assert_eq!(parse_speed("inf"), None);
    }

    #[test]
    fn test_normalize_end_to_end() {
        let input = rows(&[("С", "5"), ("ЮВ", "3,2"), ("Штиль", "0"), ("??", "1")]);
        let set = normalize(&input);

        assert_eq!(set.pairs(), vec![(0.0, 5.0), (135.0, 3.2)]);
        assert_eq!(set.source_rows(), 4);
        assert_eq!(set.dropped_rows(), 2);
    }

    #[test]
    fn test_normalize_drops_unparseable_speed() {
        let input = rows(&[("З", "н/д"), ("З", "7")]);
        assert_eq!(normalize(&input).pairs(), vec![(270.0, 7.0)]);
    }

    #[test]
    fn test_normalize_only_calm_or_unknown_is_empty() {
        let input = rows(&[("Штиль", "0"), ("штиль", "0"), ("N", "4")]);
        let set = normalize(&input);
        assert!(set.is_empty());
        assert_eq!(set.source_rows(), 3);
    }

    #[test]
    fn test_classify_rows() {
        let input = rows(&[("С", "5"), ("ЮВ", "3,2"), ("Штиль", "0"), ("??", "1"), ("З", "")]);
        let breakdown = classify_rows(&input);
        assert_eq!(
            breakdown,
            RowBreakdown {
                usable: 2,
                calm: 1,
                unrecognized_direction: 1,
                unparseable_speed: 1,
            }
        );
        assert_eq!(breakdown.usable, normalize(&input).len());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = rows(&[("СЗ", "2"), ("Ветер, дующий с запада", "6,1"), ("x", "1")]);
        assert_eq!(normalize(&input), normalize(&input));
    }
}
