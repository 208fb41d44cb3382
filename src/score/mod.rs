//! Weighted air-quality score.
//!
//! Each category in [`categories::CATEGORIES`] turns one reading into a
//! bounded sub-score. The sub-scores are summed with the particulate group
//! averaged, normalized against [`categories::max_total`], rounded to two
//! decimals and clamped to `[0, 100]`.

pub mod categories;
pub mod rules;

use crate::readings::{sensor_entity, ReadingSource};
use crate::types::scoring::{Evaluation, ResolvedEnvironment, Score, SubScore, ValueSource};
use categories::{aggregate, max_total, Input, CATEGORIES};

pub fn compute_score<L>(slug: &str, lookup: &L, environment: &ResolvedEnvironment) -> Score
where
    L: ReadingSource + ?Sized,
{
    evaluate(slug, lookup, environment).score
}

pub fn evaluate<L>(slug: &str, lookup: &L, environment: &ResolvedEnvironment) -> Evaluation
where
    L: ReadingSource + ?Sized,
{
    let sub_scores = CATEGORIES
        .iter()
        .map(|spec| {
            let (reading, source) = match spec.input {
                Input::Sensor { suffix, default } => {
                    match lookup.reading(&sensor_entity(slug, suffix)) {
                        Some(value) => (value, ValueSource::Sensor),
                        None => (default, ValueSource::Default),
                    }
                }
                Input::Temperature => (environment.temperature_c, environment.temperature_source),
                Input::Humidity => (environment.humidity, environment.humidity_source),
            };
            let points = spec.rule.points(reading, spec.max_points);
            tracing::trace!(
                category = spec.category.label(),
                reading,
                source = source.label(),
                points,
                "scored category"
            );
            SubScore {
                category: spec.category,
                reading,
                source,
                points,
                max_points: spec.max_points,
                averaged: spec.weighting == categories::Weighting::Averaged,
            }
        })
        .collect::<Vec<_>>();

    let raw_total = aggregate(
        CATEGORIES
            .iter()
            .zip(&sub_scores)
            .map(|(spec, sub_score)| (spec.weighting, sub_score.points)),
    );
    let max_total = max_total();
    let score = normalize(raw_total, max_total);

    tracing::debug!(slug, raw_total, max_total, score, "computed air score");

    Evaluation {
        score,
        raw_total,
        max_total,
        sub_scores,
    }
}

fn normalize(raw_total: f64, max_total: f64) -> Score {
    let normalized = round2(raw_total / max_total * 100.0);
    if normalized.is_finite() {
        normalized.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
