//! Coach workspace
//!
//! Validators for the three workspace forms (portfolio posts, training
//! plans, reviews) and roster statistics for the coach directory.

use crate::api::{CoachSummary, CreatePortfolioPost, CreateReview, CreateTrainingPlan};
use crate::form::{lenient_string, optional_text, parse_number, FieldErrors, RawInput};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const EXPECTED_NUMBER: &str = "Expected a number";

/// Raw portfolio post form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub media_url: Option<String>,
}

/// Raw training plan form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub focus: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration_weeks: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Raw review form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comment: Option<String>,
}

/// Validate a portfolio post for `coach_id`
pub fn validate_portfolio(
    form: &PortfolioForm,
    coach_id: i64,
) -> Result<CreatePortfolioPost, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = min_text(&form.title, 3, "title", "Add a descriptive title", &mut errors);
    let description = min_text(
        &form.description,
        10,
        "description",
        "Share at least a sentence about the result or session.",
        &mut errors,
    );

    let media_url = optional_text(&form.media_url);
    if let Some(url) = &media_url {
        if !is_web_url(url) {
            errors.insert("mediaUrl", "Include a valid URL");
        }
    }

    match (title, description) {
        (Some(title), Some(description)) if errors.is_empty() => Ok(CreatePortfolioPost {
            coach_id,
            title,
            description,
            media_url,
        }),
        _ => Err(errors),
    }
}

/// Validate a training plan for `coach_id`
pub fn validate_plan(form: &PlanForm, coach_id: i64) -> Result<CreateTrainingPlan, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = min_text(&form.name, 3, "name", "Give the plan a name", &mut errors);
    let focus = min_text(&form.focus, 3, "focus", "Describe the focus", &mut errors);

    let price = required_number("price", &form.price, &mut errors).and_then(|price| {
        if price < 0.0 {
            errors.insert("price", "Set a non-negative price");
            None
        } else {
            Some(price)
        }
    });

    let duration_weeks =
        required_number("durationWeeks", &form.duration_weeks, &mut errors).and_then(|weeks| {
            if weeks < 1.0 {
                errors.insert("durationWeeks", "Duration must be at least 1 week");
                None
            } else if weeks > 52.0 {
                errors.insert("durationWeeks", "Cap at 52 weeks");
                None
            } else if weeks.fract() != 0.0 {
                errors.insert("durationWeeks", "Must be a whole number");
                None
            } else {
                Some(weeks as u32)
            }
        });

    match (name, focus, price, duration_weeks) {
        (Some(name), Some(focus), Some(price), Some(duration_weeks)) if errors.is_empty() => {
            Ok(CreateTrainingPlan {
                coach_id,
                name,
                focus,
                price,
                duration_weeks,
                description: optional_text(&form.description),
            })
        }
        _ => Err(errors),
    }
}

/// Validate a review of `coach_id`
pub fn validate_review(form: &ReviewForm, coach_id: i64) -> Result<CreateReview, FieldErrors> {
    let mut errors = FieldErrors::new();

    let client_id = required_number("clientId", &form.client_id, &mut errors).and_then(|id| {
        if id < 1.0 {
            errors.insert("clientId", "Client ID required");
            None
        } else if id.fract() != 0.0 {
            errors.insert("clientId", "Must be a whole number");
            None
        } else {
            Some(id as i64)
        }
    });

    let rating = required_number("rating", &form.rating, &mut errors).and_then(|rating| {
        if rating.fract() != 0.0 {
            errors.insert("rating", "Must be a whole number");
            None
        } else if !(1.0..=5.0).contains(&rating) {
            errors.insert("rating", "Rating must be between 1 and 5");
            None
        } else {
            Some(rating as u8)
        }
    });

    let comment = min_text(&form.comment, 5, "comment", "Add a short summary", &mut errors);

    match (client_id, rating, comment) {
        (Some(client_id), Some(rating), Some(comment)) if errors.is_empty() => Ok(CreateReview {
            coach_id,
            client_id,
            rating,
            comment,
        }),
        _ => Err(errors),
    }
}

/// Headline numbers for a coach roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub roster_size: usize,
    pub unique_specializations: usize,
}

impl From<&[CoachSummary]> for RosterStats {
    fn from(coaches: &[CoachSummary]) -> Self {
        let specializations: HashSet<&str> =
            coaches.iter().map(|c| c.specialization.as_str()).collect();
        Self {
            roster_size: coaches.len(),
            unique_specializations: specializations.len(),
        }
    }
}

/// Trimmed text of at least `min` characters
fn min_text(
    value: &Option<String>,
    min: usize,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match RawInput::of(value) {
        RawInput::Value(text) if text.chars().count() >= min => Some(text.to_string()),
        _ => {
            errors.insert(field, message);
            None
        }
    }
}

fn required_number(field: &str, value: &Option<String>, errors: &mut FieldErrors) -> Option<f64> {
    let parsed = match RawInput::of(value) {
        RawInput::Value(text) => parse_number(text),
        _ => None,
    };
    if parsed.is_none() {
        errors.insert(field, EXPECTED_NUMBER);
    }
    parsed
}

fn is_web_url(text: &str) -> bool {
    match reqwest::Url::parse(text) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
