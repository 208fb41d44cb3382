use super::scoring::{Evaluation, ResolvedEnvironment, Score, ValueSource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PercentageSource {
    /// Precomputed percentage read from a helper entity.
    Helper { entity_id: String, resolved: bool },
    /// Computed by the score engine from the slug's sensors.
    Computed { slug: String },
    /// Neither a helper entity nor a slug was configured.
    Unconfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureAnnotation {
    pub value: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub icon: String,
    pub percentage: Score,
    pub label: String,
    pub bar_color: &'static str,
    pub bar_width: f64,
    pub temperature: Option<TemperatureAnnotation>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub view: CardView,
    pub percentage_source: PercentageSource,
    pub environment: ResolvedEnvironment,
    pub evaluation: Option<Evaluation>,
}

impl Card {
    /// Readings that fell back to a built-in default, helper entity included.
    pub fn defaulted_readings(&self) -> usize {
        if let Some(evaluation) = &self.evaluation {
            return evaluation.defaulted().count();
        }
        let helper = usize::from(matches!(
            self.percentage_source,
            PercentageSource::Helper {
                resolved: false,
                ..
            }
        ));
        let environment = [
            self.environment.temperature_source,
            self.environment.humidity_source,
        ]
        .iter()
        .filter(|source| **source == ValueSource::Default)
        .count();
        helper + environment
    }
}
