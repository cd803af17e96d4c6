//! Backend request and response contracts
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fitness goals a client can search by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessGoal {
    GeneralFitness,
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    Rehab,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 6] = [
        FitnessGoal::GeneralFitness,
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::Flexibility,
        FitnessGoal::Rehab,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::GeneralFitness => "GeneralFitness",
            FitnessGoal::WeightLoss => "WeightLoss",
            FitnessGoal::MuscleGain => "MuscleGain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::Flexibility => "Flexibility",
            FitnessGoal::Rehab => "Rehab",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::GeneralFitness => "General fitness",
            FitnessGoal::WeightLoss => "Weight loss",
            FitnessGoal::MuscleGain => "Muscle gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::Flexibility => "Flexibility",
            FitnessGoal::Rehab => "Rehab",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FitnessGoal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| format!("Unknown goal: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSummary {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymSummary {
    pub id: i64,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A coach ranked by the recommendation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedCoach {
    pub coach_id: i64,
    pub coach_name: String,
    pub specialization: String,
    pub distance_km: f64,
    pub gym_id: i64,
    pub gym_name: String,
    pub min_plan_price: f64,
    pub avg_rating: f64,
    pub reviews_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_plan_titles: Option<Vec<String>>,
}

/// Body of `POST /api/Recommendations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<FitnessGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPost {
    pub id: i64,
    pub coach_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioPost {
    pub coach_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    pub id: i64,
    pub coach_id: i64,
    pub name: String,
    pub focus: String,
    pub price: f64,
    pub duration_weeks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingPlan {
    pub coach_id: i64,
    pub name: String,
    pub focus: String,
    pub price: f64,
    pub duration_weeks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub coach_id: i64,
    pub client_name: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub coach_id: i64,
    pub client_id: i64,
    pub rating: u8,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_wire_names() {
        assert_eq!(serde_json::to_string(&FitnessGoal::WeightLoss).unwrap(), "\"WeightLoss\"");
        assert_eq!(FitnessGoal::from_str("MuscleGain").unwrap(), FitnessGoal::MuscleGain);
        assert!(FitnessGoal::from_str("musclegain").is_err());
        assert!(FitnessGoal::from_str(" Rehab").is_err());
        assert!(FitnessGoal::from_str("Yoga").is_err());
        assert_eq!(FitnessGoal::Rehab.label(), "Rehab");
    }

    #[test]
    fn test_request_omits_absent_fields() {
        let request = RecommendationRequest {
            goal: None,
            budget_min: None,
            budget_max: Some(250.0),
            latitude: 24.7,
            longitude: 46.7,
            max_distance_km: Some(15.0),
            take: Some(6),
        };
        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("goal"));
        assert!(!object.contains_key("budgetMin"));
        assert_eq!(json["budgetMax"], 250.0);
        assert_eq!(json["maxDistanceKm"], 15.0);
        assert_eq!(json["take"], 6);
    }

    #[test]
    fn test_recommended_coach_without_titles() {
        let json = r#"{
            "coachId": 7, "coachName": "Sara", "specialization": "Strength",
            "distanceKm": 2.4, "gymId": 3, "gymName": "Iron House",
            "minPlanPrice": 120, "avgRating": 4.6, "reviewsCount": 18
        }"#;
        let coach: RecommendedCoach = serde_json::from_str(json).unwrap();
        assert_eq!(coach.coach_id, 7);
        assert_eq!(coach.min_plan_price, 120.0);
        assert!(coach.matching_plan_titles.is_none());
    }

    #[test]
    fn test_recommended_coach_missing_field_rejected() {
        let json = r#"{"coachId": 7, "coachName": "Sara"}"#;
        assert!(serde_json::from_str::<RecommendedCoach>(json).is_err());
    }
}
