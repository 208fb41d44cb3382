use crate::readings::{sensor_entity, ReadingSource};
use crate::types::config::{CardConfig, Override, TemperatureUnit};
use crate::types::scoring::{ResolvedEnvironment, ValueSource};

pub const DEFAULT_TEMPERATURE: f64 = 21.0;
pub const DEFAULT_HUMIDITY: f64 = 45.0;

pub const TEMPERATURE_SUFFIX: &str = "sen55_temperature";
pub const HUMIDITY_SUFFIX: &str = "sen55_humidity";

#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub temperature: Option<&'a Override>,
    pub humidity: Option<&'a Override>,
}

impl<'a> Overrides<'a> {
    pub fn from_config(config: &'a CardConfig) -> Self {
        Self {
            temperature: config.temp_value.as_ref(),
            humidity: config.hum_value.as_ref(),
        }
    }
}

/// Resolves temperature and humidity: override, then slug sensor, then default.
///
/// Temperatures are read in the display `unit` and always returned in Celsius.
pub fn resolve_environment<L>(
    overrides: Overrides<'_>,
    slug: Option<&str>,
    unit: TemperatureUnit,
    lookup: &L,
) -> ResolvedEnvironment
where
    L: ReadingSource + ?Sized,
{
    let (humidity, humidity_source) = resolve_quantity(
        overrides.humidity,
        slug,
        HUMIDITY_SUFFIX,
        DEFAULT_HUMIDITY,
        lookup,
    );
    let (temperature, temperature_source) = resolve_quantity(
        overrides.temperature,
        slug,
        TEMPERATURE_SUFFIX,
        DEFAULT_TEMPERATURE,
        lookup,
    );
    let temperature_c = unit.to_celsius(temperature);

    tracing::debug!(
        temperature_c,
        temperature_source = temperature_source.label(),
        humidity,
        humidity_source = humidity_source.label(),
        "resolved environment"
    );

    ResolvedEnvironment {
        temperature_c,
        humidity,
        temperature_source,
        humidity_source,
    }
}

pub fn resolve_for_card<L>(config: &CardConfig, lookup: &L) -> ResolvedEnvironment
where
    L: ReadingSource + ?Sized,
{
    resolve_environment(
        Overrides::from_config(config),
        config.slug.as_deref(),
        config.unit(),
        lookup,
    )
}

fn resolve_quantity<L>(
    value_override: Option<&Override>,
    slug: Option<&str>,
    suffix: &str,
    default: f64,
    lookup: &L,
) -> (f64, ValueSource)
where
    L: ReadingSource + ?Sized,
{
    match value_override {
        Some(Override::Entity(entity_id)) => {
            if let Some(value) = lookup.reading(entity_id) {
                return (value, ValueSource::Entity);
            }
            tracing::debug!(entity_id = %entity_id, "override entity unresolved, falling through");
        }
        Some(Override::Literal(value)) if value.is_finite() => {
            return (*value, ValueSource::Literal);
        }
        Some(Override::Literal(_)) | None => {}
    }

    if let Some(slug) = slug {
        let entity_id = sensor_entity(slug, suffix);
        if let Some(value) = lookup.reading(&entity_id) {
            return (value, ValueSource::Sensor);
        }
    }

    (default, ValueSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::{NoReadings, StateSnapshot};

    fn snapshot(entries: &[(&str, &str)]) -> StateSnapshot {
        entries
            .iter()
            .map(|(entity, state)| (entity.to_string(), serde_json::Value::from(*state)))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_resolves() {
        let env = resolve_environment(
            Overrides::default(),
            Some("test"),
            TemperatureUnit::Celsius,
            &NoReadings,
        );
        assert_eq!(env.temperature_c, 21.0);
        assert_eq!(env.humidity, 45.0);
        assert_eq!(env.temperature_source, ValueSource::Default);
        assert_eq!(env.humidity_source, ValueSource::Default);
    }

    #[test]
    fn slug_sensors_are_used_when_no_override() {
        let states = snapshot(&[
            ("sensor.test_sen55_temperature", "24.5"),
            ("sensor.test_sen55_humidity", "38"),
        ]);
        let env = resolve_environment(
            Overrides::default(),
            Some("test"),
            TemperatureUnit::Celsius,
            &states,
        );
        assert_eq!(env.temperature_c, 24.5);
        assert_eq!(env.humidity, 38.0);
        assert_eq!(env.temperature_source, ValueSource::Sensor);
    }

    #[test]
    fn literal_humidity_beats_slug_sensor() {
        let states = snapshot(&[("sensor.test_sen55_humidity", "80")]);
        let humidity = Override::Literal(55.0);
        let env = resolve_environment(
            Overrides {
                temperature: None,
                humidity: Some(&humidity),
            },
            Some("test"),
            TemperatureUnit::Celsius,
            &states,
        );
        assert_eq!(env.humidity, 55.0);
        assert_eq!(env.humidity_source, ValueSource::Literal);
    }

    #[test]
    fn entity_override_beats_slug_sensor() {
        let states = snapshot(&[
            ("sensor.office_humidity", "61.2"),
            ("sensor.test_sen55_humidity", "80"),
        ]);
        let humidity = Override::Entity("sensor.office_humidity".to_string());
        let env = resolve_environment(
            Overrides {
                temperature: None,
                humidity: Some(&humidity),
            },
            Some("test"),
            TemperatureUnit::Celsius,
            &states,
        );
        assert_eq!(env.humidity, 61.2);
        assert_eq!(env.humidity_source, ValueSource::Entity);
    }

    #[test]
    fn unresolved_entity_override_falls_through_to_sensor_then_default() {
        let states = snapshot(&[
            ("sensor.office_temperature", "unavailable"),
            ("sensor.test_sen55_temperature", "19"),
        ]);
        let temperature = Override::Entity("sensor.office_temperature".to_string());
        let overrides = Overrides {
            temperature: Some(&temperature),
            humidity: None,
        };

        let env = resolve_environment(overrides, Some("test"), TemperatureUnit::Celsius, &states);
        assert_eq!(env.temperature_c, 19.0);
        assert_eq!(env.temperature_source, ValueSource::Sensor);

        let env = resolve_environment(overrides, None, TemperatureUnit::Celsius, &states);
        assert_eq!(env.temperature_c, DEFAULT_TEMPERATURE);
        assert_eq!(env.temperature_source, ValueSource::Default);
    }

    #[test]
    fn non_finite_literal_is_skipped() {
        let humidity = Override::Literal(f64::NAN);
        let env = resolve_environment(
            Overrides {
                temperature: None,
                humidity: Some(&humidity),
            },
            None,
            TemperatureUnit::Celsius,
            &NoReadings,
        );
        assert_eq!(env.humidity, DEFAULT_HUMIDITY);
    }

    #[test]
    fn fahrenheit_override_is_converted_to_celsius() {
        for temperature in [Override::Literal(73.4), Override::parse("73.4")] {
            let env = resolve_environment(
                Overrides {
                    temperature: Some(&temperature),
                    humidity: None,
                },
                None,
                TemperatureUnit::Fahrenheit,
                &NoReadings,
            );
            assert!((env.temperature_c - 23.0).abs() < 0.01);
        }
    }

    #[test]
    fn fahrenheit_default_is_converted_too() {
        let env = resolve_environment(
            Overrides::default(),
            None,
            TemperatureUnit::Fahrenheit,
            &NoReadings,
        );
        assert!((env.temperature_c - (21.0 - 32.0) * 5.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn humidity_is_not_clamped() {
        let states = snapshot(&[("sensor.test_sen55_humidity", "104.5")]);
        let env = resolve_environment(
            Overrides::default(),
            Some("test"),
            TemperatureUnit::Celsius,
            &states,
        );
        assert_eq!(env.humidity, 104.5);
    }

    #[test]
    fn resolve_for_card_reads_overrides_from_config() {
        let config: CardConfig = toml::from_str(
            r#"
slug = "test"
hum_value = 55
use_fahrenheit = true
"#,
        )
        .expect("config should parse");
        let states = snapshot(&[
            ("sensor.test_sen55_humidity", "80"),
            ("sensor.test_sen55_temperature", "212"),
        ]);
        let env = resolve_for_card(&config, &states);
        assert_eq!(env.humidity, 55.0);
        assert!((env.temperature_c - 100.0).abs() < 1e-9);
    }
}
