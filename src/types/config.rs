use crate::error::AirscoreError;
use serde::Deserialize;

/// Temperature or humidity override as written in the card config.
///
/// Strings are entity ids looked up in the state snapshot; numbers are used
/// as-is. A string that parses as a finite number is treated as a literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawOverride")]
pub enum Override {
    Entity(String),
    Literal(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverride {
    Number(f64),
    Text(String),
}

impl From<RawOverride> for Override {
    fn from(raw: RawOverride) -> Self {
        match raw {
            RawOverride::Number(value) => Override::Literal(value),
            RawOverride::Text(text) => Override::parse(&text),
        }
    }
}

impl Override {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Override::Literal(value),
            _ => Override::Entity(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_flag(use_fahrenheit: bool) -> Self {
        if use_fahrenheit {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        }
    }

    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub slug: Option<String>,
    pub pct_entity: Option<String>,
    pub temp_value: Option<Override>,
    pub hum_value: Option<Override>,
    #[serde(default)]
    pub use_fahrenheit: bool,
    #[serde(default = "default_true")]
    pub show_temp: bool,
    #[serde(default = "default_true")]
    pub show_hum: bool,
}

fn default_name() -> String {
    "Air Quality".to_string()
}

fn default_icon() -> String {
    "mdi:sprout".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            icon: default_icon(),
            slug: None,
            pct_entity: None,
            temp_value: None,
            hum_value: None,
            use_fahrenheit: false,
            show_temp: true,
            show_hum: true,
        }
    }
}

impl CardConfig {
    pub fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_flag(self.use_fahrenheit)
    }

    pub fn validate(&self) -> Result<(), AirscoreError> {
        if self.pct_entity.is_none() && self.slug.is_none() {
            return Err(AirscoreError::InvalidConfig(
                "either pct_entity or slug must be set".to_string(),
            ));
        }

        if let Some(slug) = &self.slug {
            if slug.trim().is_empty() {
                return Err(AirscoreError::InvalidConfig(
                    "slug must not be empty".to_string(),
                ));
            }
            if slug.contains('.') || slug.chars().any(char::is_whitespace) {
                return Err(AirscoreError::InvalidConfig(format!(
                    "slug must not contain dots or whitespace: {slug}"
                )));
            }
        }

        if let Some(entity) = &self.pct_entity {
            validate_entity_id("pct_entity", entity)?;
        }
        for (key, value) in [("temp_value", &self.temp_value), ("hum_value", &self.hum_value)] {
            if let Some(Override::Entity(entity)) = value {
                validate_entity_id(key, entity)?;
            }
        }

        Ok(())
    }
}

fn validate_entity_id(key: &str, entity: &str) -> Result<(), AirscoreError> {
    match entity.split_once('.') {
        Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => Ok(()),
        _ => Err(AirscoreError::InvalidConfig(format!(
            "{key} must be an entity id of the form <domain>.<object_id> (found '{entity}')"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let cfg: CardConfig = toml::from_str(r#"slug = "apollo_air_max""#)
            .expect("minimal config should parse");
        assert_eq!(cfg.slug.as_deref(), Some("apollo_air_max"));
        assert_eq!(cfg.name, "Air Quality");
        assert_eq!(cfg.icon, "mdi:sprout");
        assert!(cfg.show_temp);
        assert!(cfg.show_hum);
        assert!(!cfg.use_fahrenheit);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
name = "Air Quality - Max"
icon = "mdi:leaf"
slug = "apollo_air_max"
pct_entity = "number.airmax_helper"
temp_value = "sensor.office_temperature"
hum_value = 55
use_fahrenheit = true
show_temp = false
show_hum = true
"#;
        let cfg: CardConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.name, "Air Quality - Max");
        assert_eq!(
            cfg.temp_value,
            Some(Override::Entity("sensor.office_temperature".to_string()))
        );
        assert_eq!(cfg.hum_value, Some(Override::Literal(55.0)));
        assert_eq!(cfg.unit(), TemperatureUnit::Fahrenheit);
        assert!(!cfg.show_temp);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn numeric_string_override_is_a_literal() {
        let cfg: CardConfig = toml::from_str(
            r#"
slug = "test"
temp_value = "73.4"
hum_value = 41.5
"#,
        )
        .expect("config should parse");
        assert_eq!(cfg.temp_value, Some(Override::Literal(73.4)));
        assert_eq!(cfg.hum_value, Some(Override::Literal(41.5)));
    }

    #[test]
    fn override_parse_keeps_non_finite_text_as_entity() {
        assert_eq!(Override::parse("NaN"), Override::Entity("NaN".to_string()));
        assert_eq!(
            Override::parse(" sensor.x_humidity "),
            Override::Entity("sensor.x_humidity".to_string())
        );
        assert_eq!(Override::parse("-4"), Override::Literal(-4.0));
    }

    #[test]
    fn validate_requires_slug_or_pct_entity() {
        let cfg: CardConfig = toml::from_str(r#"name = "Bedroom""#).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("either pct_entity or slug"));
    }

    #[test]
    fn validate_accepts_pct_entity_without_slug() {
        let cfg: CardConfig = toml::from_str(r#"pct_entity = "number.airmax_helper""#)
            .expect("config should parse");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_dotted_slug() {
        let cfg: CardConfig =
            toml::from_str(r#"slug = "sensor.apollo""#).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("slug must not contain dots"));
    }

    #[test]
    fn validate_rejects_empty_slug() {
        let cfg: CardConfig = toml::from_str(r#"slug = "  ""#).expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_entity_override() {
        let cfg: CardConfig = toml::from_str(
            r#"
slug = "apollo"
hum_value = "office_humidity"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("hum_value must be an entity id"));
    }

    #[test]
    fn fahrenheit_round_trip_is_stable() {
        let unit = TemperatureUnit::Fahrenheit;
        let celsius = unit.to_celsius(73.4);
        assert!((celsius - 23.0).abs() < 0.01);
        assert!((unit.from_celsius(celsius) - 73.4).abs() < 1e-9);
        assert_eq!(TemperatureUnit::Celsius.to_celsius(21.0), 21.0);
    }
}
