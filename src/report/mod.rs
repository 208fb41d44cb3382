pub mod json;
pub mod md;

use crate::error::AirscoreError;
use crate::types::report::Card;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// How much of the evaluation to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Card,
    Breakdown,
}

pub fn render(card: &Card, format: OutputFormat, detail: Detail) -> Result<String, AirscoreError> {
    match format {
        OutputFormat::Json => json::to_json(card, detail).map_err(AirscoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(card, detail)),
    }
}
