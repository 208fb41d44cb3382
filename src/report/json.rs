use super::Detail;
use crate::types::report::{Card, CardView, PercentageSource};
use crate::types::scoring::{Evaluation, ResolvedEnvironment};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct CardDocument<'a> {
    version: &'static str,
    evaluated_at: String,
    card: &'a CardView,
    percentage_source: &'a PercentageSource,
    environment: &'a ResolvedEnvironment,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<&'a Evaluation>,
}

pub fn to_json(card: &Card, detail: Detail) -> Result<String, serde_json::Error> {
    to_json_at(card, detail, Utc::now())
}

pub fn to_json_at(
    card: &Card,
    detail: Detail,
    evaluated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let document = CardDocument {
        version: env!("CARGO_PKG_VERSION"),
        evaluated_at: evaluated_at.to_rfc3339(),
        card: &card.view,
        percentage_source: &card.percentage_source,
        environment: &card.environment,
        evaluation: match detail {
            Detail::Breakdown => card.evaluation.as_ref(),
            Detail::Card => None,
        },
    };
    serde_json::to_string_pretty(&document)
}
