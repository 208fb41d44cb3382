use crate::readings::ReadingSource;
use crate::resolve::resolve_for_card;
use crate::score::{evaluate, round2};
use crate::types::config::CardConfig;
use crate::types::report::{Card, CardView, PercentageSource, TemperatureAnnotation};
use crate::types::scoring::{ResolvedEnvironment, Score};

pub const COLOR_EXCELLENT: &str = "#9EDF9C";
pub const COLOR_GOOD: &str = "#78B3CE";
pub const COLOR_FAIR: &str = "#FBD288";
pub const COLOR_POOR: &str = "#FF9C73";
pub const COLOR_BAD: &str = "#F95454";

/// Evaluates one card against a reading source.
///
/// A configured `pct_entity` bypasses the score engine; its value is shown
/// as-is, or `0` when it does not resolve.
pub fn build_card<L>(config: &CardConfig, lookup: &L) -> Card
where
    L: ReadingSource + ?Sized,
{
    let environment = resolve_for_card(config, lookup);

    let (percentage, percentage_source, evaluation) = match (&config.pct_entity, &config.slug) {
        (Some(entity_id), _) => {
            let value = lookup.reading(entity_id);
            if value.is_none() {
                tracing::warn!(entity_id = %entity_id, "percentage helper unresolved, showing 0");
            }
            (
                value.unwrap_or(0.0),
                PercentageSource::Helper {
                    entity_id: entity_id.clone(),
                    resolved: value.is_some(),
                },
                None,
            )
        }
        (None, Some(slug)) => {
            let evaluation = evaluate(slug, lookup, &environment);
            (
                evaluation.score,
                PercentageSource::Computed { slug: slug.clone() },
                Some(evaluation),
            )
        }
        (None, None) => (0.0, PercentageSource::Unconfigured, None),
    };

    tracing::info!(
        card = %config.name,
        percentage,
        defaulted = evaluation.as_ref().map(|e| e.defaulted().count()).unwrap_or(0),
        "evaluated card"
    );

    Card {
        view: card_view(config, percentage, &environment),
        percentage_source,
        environment,
        evaluation,
    }
}

fn card_view(config: &CardConfig, percentage: Score, environment: &ResolvedEnvironment) -> CardView {
    let unit = config.unit();
    CardView {
        title: config.name.clone(),
        icon: config.icon.clone(),
        percentage,
        label: format_percentage(percentage),
        bar_color: bar_color(percentage),
        bar_width: bar_width(percentage),
        temperature: config.show_temp.then(|| TemperatureAnnotation {
            value: unit.from_celsius(environment.temperature_c),
            unit: unit.symbol(),
        }),
        humidity: config.show_hum.then_some(environment.humidity),
    }
}

/// Two decimals with trailing zeros and a dangling dot removed.
pub fn format_percentage(value: f64) -> String {
    let fixed = format!("{:.2}", round2(value));
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

pub fn bar_color(percentage: Score) -> &'static str {
    if percentage >= 80.0 {
        COLOR_EXCELLENT
    } else if percentage >= 60.0 {
        COLOR_GOOD
    } else if percentage >= 40.0 {
        COLOR_FAIR
    } else if percentage >= 20.0 {
        COLOR_POOR
    } else {
        COLOR_BAD
    }
}

pub fn bar_width(percentage: Score) -> f64 {
    if percentage <= 0.0 {
        0.0
    } else {
        percentage.min(100.0)
    }
}
