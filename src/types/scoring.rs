use serde::Serialize;

pub type Score = f64;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Override naming an entity in the state snapshot.
    Entity,
    /// Literal override, or a value handed in directly by the caller.
    Literal,
    /// Slug-derived sensor reading.
    Sensor,
    Default,
}

impl ValueSource {
    pub fn label(self) -> &'static str {
        match self {
            ValueSource::Entity => "override entity",
            ValueSource::Literal => "override literal",
            ValueSource::Sensor => "sensor",
            ValueSource::Default => "default",
        }
    }
}

/// Temperature (always Celsius) and relative humidity fed to the score engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedEnvironment {
    pub temperature_c: f64,
    pub humidity: f64,
    pub temperature_source: ValueSource,
    pub humidity_source: ValueSource,
}

impl ResolvedEnvironment {
    pub fn new(temperature_c: f64, humidity: f64) -> Self {
        Self {
            temperature_c,
            humidity,
            temperature_source: ValueSource::Literal,
            humidity_source: ValueSource::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Co2,
    Pm2_5,
    Voc,
    Ammonia,
    CarbonMonoxide,
    Pressure,
    Ethanol,
    Hydrogen,
    Methane,
    NitrogenDioxide,
    Pm10,
    Pm1,
    Pm4,
    NoxIndex,
    Temperature,
    Humidity,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Co2 => "CO2",
            Category::Pm2_5 => "PM2.5",
            Category::Voc => "VOC",
            Category::Ammonia => "Ammonia",
            Category::CarbonMonoxide => "Carbon monoxide",
            Category::Pressure => "Pressure",
            Category::Ethanol => "Ethanol",
            Category::Hydrogen => "Hydrogen",
            Category::Methane => "Methane",
            Category::NitrogenDioxide => "NO2",
            Category::Pm10 => "PM10",
            Category::Pm1 => "PM1",
            Category::Pm4 => "PM4",
            Category::NoxIndex => "NOx index",
            Category::Temperature => "Temperature",
            Category::Humidity => "Humidity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScore {
    pub category: Category,
    pub reading: f64,
    pub source: ValueSource,
    pub points: f64,
    pub max_points: f64,
    /// Whether this category is averaged with its group before summing.
    pub averaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: Score,
    pub raw_total: f64,
    pub max_total: f64,
    pub sub_scores: Vec<SubScore>,
}

impl Evaluation {
    pub fn sub_score(&self, category: Category) -> Option<&SubScore> {
        self.sub_scores
            .iter()
            .find(|sub_score| sub_score.category == category)
    }

    pub fn defaulted(&self) -> impl Iterator<Item = &SubScore> {
        self.sub_scores
            .iter()
            .filter(|sub_score| sub_score.source == ValueSource::Default)
    }
}
