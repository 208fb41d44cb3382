pub mod snapshot;

pub use snapshot::StateSnapshot;

/// Domain prefix for slug-derived sensor entities.
pub const SENSOR_DOMAIN: &str = "sensor";

/// Looks up a numeric reading by entity id.
///
/// `None` means the reading is unresolved (missing, non-numeric or not
/// finite). That is a normal outcome and callers fall back instead of failing.
pub trait ReadingSource {
    fn reading(&self, entity_id: &str) -> Option<f64>;
}

impl<F> ReadingSource for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn reading(&self, entity_id: &str) -> Option<f64> {
        self(entity_id).filter(|value| value.is_finite())
    }
}

/// A source that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReadings;

impl ReadingSource for NoReadings {
    fn reading(&self, _entity_id: &str) -> Option<f64> {
        None
    }
}

/// `sensor.<slug>_<suffix>`
pub fn sensor_entity(slug: &str, suffix: &str) -> String {
    format!("{SENSOR_DOMAIN}.{slug}_{suffix}")
}
