pub mod compass;
pub mod observation;

pub use compass::{read_direction, CompassPoint, DirectionReading, CALM_LABEL};
pub use observation::{NormalizedObservation, ObservationSet, RawObservationRow};
