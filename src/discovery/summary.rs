//! Aggregates shown above the result list

use crate::api::RecommendedCoach;
use serde::{Deserialize, Serialize};

/// Average rating and price across a result list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    /// Mean rating, rounded to one decimal
    pub avg_rating: f64,
    /// Mean minimum plan price, rounded to whole units
    pub avg_price: f64,
}

impl ResultSummary {
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.avg_rating)
    }

    pub fn price_label(&self) -> String {
        format!("{:.0}", self.avg_price)
    }
}

/// Summarize a result list; `None` when there is nothing to summarize
pub fn summarize(results: &[RecommendedCoach]) -> Option<ResultSummary> {
    if results.is_empty() {
        return None;
    }

    let count = results.len() as f64;
    let rating = results.iter().map(|c| c.avg_rating).sum::<f64>() / count;
    let price = results.iter().map(|c| c.min_plan_price).sum::<f64>() / count;

    Some(ResultSummary {
        avg_rating: (rating * 10.0).round() / 10.0,
        avg_price: price.round(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coach(rating: f64, price: f64) -> RecommendedCoach {
        RecommendedCoach {
            coach_id: 1,
            coach_name: "Coach".to_string(),
            specialization: "Strength".to_string(),
            distance_km: 1.0,
            gym_id: 1,
            gym_name: "Gym".to_string(),
            min_plan_price: price,
            avg_rating: rating,
            reviews_count: 3,
            matching_plan_titles: None,
        }
    }

    #[test]
    fn test_summary_of_three_coaches() {
        let results = vec![coach(4.0, 100.0), coach(4.5, 150.0), coach(5.0, 200.0)];
        let summary = summarize(&results).unwrap();

        assert_relative_eq!(summary.avg_rating, 4.5);
        assert_relative_eq!(summary.avg_price, 150.0);
        assert_eq!(summary.rating_label(), "4.5");
        assert_eq!(summary.price_label(), "150");
    }

    #[test]
    fn test_empty_results_have_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_rounding() {
        let results = vec![coach(4.0, 99.0), coach(4.3, 100.0), coach(4.3, 100.0)];
        let summary = summarize(&results).unwrap();

        assert_eq!(summary.rating_label(), "4.2");
        assert_eq!(summary.price_label(), "100");
    }
}
