//! Human-readable text output formatter

use crate::api::RecommendedCoach;
use crate::error::Result;
use crate::format::{OutputFormatter, SearchOutcome};

/// Text formatter - outputs result cards
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable result cards"
    }

    fn format(&self, outcome: &SearchOutcome) -> Result<String> {
        let mut output = String::new();

        if let Some(location) = &outcome.location {
            output.push_str(&format!("Location: {}\n\n", location.message));
        }

        if let Some(error) = &outcome.error {
            output.push_str(&format!("Error: {}\n\n", error));
        }

        if let Some(message) = outcome.empty_message() {
            output.push_str(message);
            output.push('\n');
            return Ok(output);
        }

        if outcome.results.is_empty() {
            output.push_str("Searching...\n");
            return Ok(output);
        }

        output.push_str("Top matches\n");
        if let Some(summary) = &outcome.summary {
            output.push_str(&format!(
                "[Avg rating {}] [Plans from ${}]\n",
                summary.rating_label(),
                summary.price_label()
            ));
        }
        output.push('\n');

        for coach in &outcome.results {
            output.push_str(&card(coach));
            output.push('\n');
        }

        Ok(output)
    }
}

fn card(coach: &RecommendedCoach) -> String {
    let mut card = format!(
        "{} ({})\n  {:.1} / 5, {} reviews\n  Training out of {} - {:.1} km away - plans from ${:.0}\n",
        coach.coach_name,
        coach.specialization,
        coach.avg_rating,
        coach.reviews_count,
        coach.gym_name,
        coach.distance_km,
        coach.min_plan_price,
    );

    if let Some(titles) = coach.matching_plan_titles.as_ref().filter(|t| !t.is_empty()) {
        card.push_str(&format!("  Matches: {}\n", titles.join(", ")));
    }

    card
}
