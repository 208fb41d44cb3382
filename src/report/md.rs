use super::Detail;
use crate::types::report::{Card, PercentageSource};

const BAR_CELLS: usize = 20;

pub fn to_markdown(card: &Card, detail: Detail) -> String {
    let view = &card.view;
    let mut output = String::new();
    output.push_str(&format!("# {} ({})\n\n", view.title, view.icon));
    output.push_str(&format!("**{}%**\n\n", view.label));

    let mut env_parts = Vec::new();
    if let Some(temperature) = &view.temperature {
        env_parts.push(format!("{:.1}{}", temperature.value, temperature.unit));
    }
    if let Some(humidity) = view.humidity {
        env_parts.push(format!("{humidity:.0}%"));
    }
    if !env_parts.is_empty() {
        output.push_str(&env_parts.join(" · "));
        output.push_str("\n\n");
    }

    output.push_str(&format!("`{}` {}\n", text_bar(view.bar_width), view.bar_color));

    if detail == Detail::Breakdown {
        output.push('\n');
        push_breakdown(&mut output, card);
    }

    output
}

fn text_bar(width: f64) -> String {
    let filled = ((width / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

fn push_breakdown(output: &mut String, card: &Card) {
    output.push_str("## Breakdown\n\n");

    match &card.percentage_source {
        PercentageSource::Helper {
            entity_id,
            resolved,
        } => {
            output.push_str(&format!(
                "Percentage read from helper `{}`{}.\n",
                entity_id,
                if *resolved { "" } else { " (unresolved, shown as 0)" }
            ));
        }
        PercentageSource::Unconfigured => {
            output.push_str("No helper entity or slug configured.\n");
        }
        PercentageSource::Computed { slug } => {
            output.push_str(&format!("Computed from `sensor.{slug}_*` readings.\n"));
        }
    }

    let environment = &card.environment;
    output.push_str(&format!(
        "\n- temperature: {:.2}°C ({})\n- humidity: {:.2}% ({})\n",
        environment.temperature_c,
        environment.temperature_source.label(),
        environment.humidity,
        environment.humidity_source.label()
    ));

    let Some(evaluation) = &card.evaluation else {
        return;
    };

    output.push_str("\n| Category | Reading | Source | Points | Max |\n");
    output.push_str("|---|---:|---|---:|---:|\n");
    for sub_score in &evaluation.sub_scores {
        output.push_str(&format!(
            "| {}{} | {} | {} | {:.2} | {} |\n",
            sub_score.category.label(),
            if sub_score.averaged { " *" } else { "" },
            sub_score.reading,
            sub_score.source.label(),
            sub_score.points,
            sub_score.max_points
        ));
    }
    output.push_str(&format!(
        "\n\\* averaged as a group\n\nRaw total: {:.2} / {:.2}\n",
        evaluation.raw_total, evaluation.max_total
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::build_card;
    use crate::readings::NoReadings;
    use crate::types::config::CardConfig;

    fn card(toml_str: &str) -> Card {
        let config: CardConfig = toml::from_str(toml_str).expect("config should parse");
        build_card(&config, &NoReadings)
    }

    #[test]
    fn markdown_card_contains_label_and_annotations() {
        let rendered = to_markdown(&card(r#"slug = "test""#), Detail::Card);
        assert!(rendered.contains("# Air Quality (mdi:sprout)"));
        assert!(rendered.contains("**19.89%**"));
        assert!(rendered.contains("21.0°C · 45%"));
        assert!(rendered.contains("#F95454"));
        assert!(!rendered.contains("## Breakdown"));
    }

    #[test]
    fn markdown_breakdown_lists_categories() {
        let rendered = to_markdown(&card(r#"slug = "test""#), Detail::Breakdown);
        assert!(rendered.contains("## Breakdown"));
        assert!(rendered.contains("| CO2 | 4500 | default | 0.00 | 20 |"));
        assert!(rendered.contains("| PM10 * |"));
        assert!(rendered.contains("Raw total: 24.60 / 123.67"));
    }

    #[test]
    fn markdown_helper_breakdown_has_no_table() {
        let rendered = to_markdown(&card(r#"pct_entity = "number.helper""#), Detail::Breakdown);
        assert!(rendered.contains("helper `number.helper` (unresolved, shown as 0)"));
        assert!(!rendered.contains("| Category |"));
    }

    #[test]
    fn text_bar_fills_proportionally() {
        assert_eq!(text_bar(0.0), "░".repeat(20));
        assert_eq!(text_bar(100.0), "█".repeat(20));
        assert_eq!(text_bar(50.0), format!("{}{}", "█".repeat(10), "░".repeat(10)));
    }
}
