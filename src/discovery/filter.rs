//! Discovery form validation
//!
//! Turns raw, possibly-string form values into a [`DiscoveryFilter`] or the
//! full set of field errors. Nothing is dispatched unless every field passes.

use crate::api::FitnessGoal;
use crate::config::defaults::{DEFAULT_MAX_DISTANCE_KM, DEFAULT_TAKE};
use crate::discovery::location::LocationMode;
use crate::form::{lenient_string, parse_number, FieldErrors, RawInput};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DISTANCE_RANGE: (f64, f64) = (1.0, 150.0);
const TAKE_RANGE: (f64, f64) = (1.0, 20.0);

const EXPECTED_NUMBER: &str = "Expected a number";

/// Raw discovery form values as submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub budget_min: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub budget_max: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_distance_km: Option<String>,
    #[serde(default, alias = "results", deserialize_with = "lenient_string")]
    pub take: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub longitude: Option<String>,
}

/// Form fields, named as the form names them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryField {
    Goal,
    BudgetMin,
    BudgetMax,
    MaxDistanceKm,
    Take,
    LocationMode,
    Latitude,
    Longitude,
}

impl DiscoveryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryField::Goal => "goal",
            DiscoveryField::BudgetMin => "budgetMin",
            DiscoveryField::BudgetMax => "budgetMax",
            DiscoveryField::MaxDistanceKm => "maxDistanceKm",
            DiscoveryField::Take => "take",
            DiscoveryField::LocationMode => "locationMode",
            DiscoveryField::Latitude => "latitude",
            DiscoveryField::Longitude => "longitude",
        }
    }
}

/// Validated search criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryFilter {
    pub goal: Option<FitnessGoal>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub max_distance_km: f64,
    pub take: u32,
    pub location_mode: LocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Values used for fields left out of the form entirely
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryDefaults {
    pub max_distance_km: f64,
    pub take: u32,
    pub location_mode: LocationMode,
}

impl Default for DiscoveryDefaults {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            take: DEFAULT_TAKE,
            location_mode: LocationMode::Auto,
        }
    }
}

/// Validate with the built-in defaults
pub fn validate_discovery(form: &DiscoveryForm) -> Result<DiscoveryFilter, FieldErrors> {
    validate_discovery_with(form, &DiscoveryDefaults::default())
}

/// Validate a discovery form
///
/// Blank optional numbers mean "absent", never zero. Defaults apply only to
/// fields that were not submitted at all.
pub fn validate_discovery_with(
    form: &DiscoveryForm,
    defaults: &DiscoveryDefaults,
) -> Result<DiscoveryFilter, FieldErrors> {
    let mut errors = FieldErrors::new();

    let goal = match RawInput::of(&form.goal) {
        RawInput::Absent | RawInput::Empty => None,
        RawInput::Value(text) => match FitnessGoal::from_str(text) {
            Ok(goal) => Some(goal),
            Err(_) => {
                errors.insert(DiscoveryField::Goal.as_str(), "Select a valid goal");
                None
            }
        },
    };

    let budget_min = optional_amount(&form.budget_min, DiscoveryField::BudgetMin, &mut errors);
    let budget_max = optional_amount(&form.budget_max, DiscoveryField::BudgetMax, &mut errors);

    let max_distance_km = ranged_number(
        &form.max_distance_km,
        DiscoveryField::MaxDistanceKm,
        DISTANCE_RANGE,
        &mut errors,
    )
    .or_default(defaults.max_distance_km);

    let take = match ranged_number(&form.take, DiscoveryField::Take, TAKE_RANGE, &mut errors) {
        NumberInput::Value(n) if n.fract() != 0.0 => {
            errors.insert(DiscoveryField::Take.as_str(), "Must be a whole number");
            None
        }
        NumberInput::Value(n) => Some(n as u32),
        NumberInput::Invalid => None,
        NumberInput::Absent => Some(defaults.take),
    };

    let location_mode = match RawInput::of(&form.location_mode) {
        RawInput::Absent | RawInput::Empty => Some(defaults.location_mode),
        RawInput::Value(text) => match LocationMode::from_str(text) {
            Ok(mode) => Some(mode),
            Err(message) => {
                errors.insert(DiscoveryField::LocationMode.as_str(), message);
                None
            }
        },
    };

    let latitude = coordinate(
        &form.latitude,
        DiscoveryField::Latitude,
        90.0,
        "Latitude must be between -90 and 90",
        &mut errors,
    );
    let longitude = coordinate(
        &form.longitude,
        DiscoveryField::Longitude,
        180.0,
        "Longitude must be between -180 and 180",
        &mut errors,
    );

    // A value that failed its range check still counts as provided
    let provided = |value: &Option<String>| matches!(RawInput::of(value), RawInput::Value(_));
    let coordinates_parsed = errors.get(DiscoveryField::Latitude.as_str()) != Some(EXPECTED_NUMBER)
        && errors.get(DiscoveryField::Longitude.as_str()) != Some(EXPECTED_NUMBER);
    if location_mode == Some(LocationMode::Manual)
        && coordinates_parsed
        && !(provided(&form.latitude) && provided(&form.longitude))
    {
        errors.insert(
            DiscoveryField::Latitude.as_str(),
            "Provide latitude and longitude",
        );
    }

    if let (Some(min), Some(max)) = (budget_min, budget_max) {
        if min > max {
            errors.insert(
                DiscoveryField::BudgetMax.as_str(),
                "Budget min must be less than max",
            );
        }
    }

    match (max_distance_km, take, location_mode) {
        (Some(max_distance_km), Some(take), Some(location_mode)) if errors.is_empty() => {
            Ok(DiscoveryFilter {
                goal,
                budget_min,
                budget_max,
                max_distance_km,
                take,
                location_mode,
                latitude,
                longitude,
            })
        }
        _ => Err(errors),
    }
}

/// Optional non-negative amount; blank means absent
fn optional_amount(
    value: &Option<String>,
    field: DiscoveryField,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match RawInput::of(value) {
        RawInput::Absent | RawInput::Empty => None,
        RawInput::Value(text) => match parse_number(text) {
            Some(n) if n >= 0.0 => Some(n),
            Some(_) => {
                errors.insert(field.as_str(), "Must be positive");
                None
            }
            None => {
                errors.insert(field.as_str(), EXPECTED_NUMBER);
                None
            }
        },
    }
}

/// A numeric field after validation
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberInput {
    /// Not submitted; the caller's default applies
    Absent,
    /// Submitted but rejected, with the error already recorded
    Invalid,
    Value(f64),
}

impl NumberInput {
    fn or_default(self, default: f64) -> Option<f64> {
        match self {
            NumberInput::Absent => Some(default),
            NumberInput::Invalid => None,
            NumberInput::Value(n) => Some(n),
        }
    }
}

/// Required number within `low..=high`, defaulted when absent
fn ranged_number(
    value: &Option<String>,
    field: DiscoveryField,
    (low, high): (f64, f64),
    errors: &mut FieldErrors,
) -> NumberInput {
    match RawInput::of(value) {
        RawInput::Absent => NumberInput::Absent,
        RawInput::Empty => {
            errors.insert(field.as_str(), EXPECTED_NUMBER);
            NumberInput::Invalid
        }
        RawInput::Value(text) => match parse_number(text) {
            Some(n) if (low..=high).contains(&n) => NumberInput::Value(n),
            Some(_) => {
                errors.insert(
                    field.as_str(),
                    format!("Must be between {} and {}", low, high),
                );
                NumberInput::Invalid
            }
            None => {
                errors.insert(field.as_str(), EXPECTED_NUMBER);
                NumberInput::Invalid
            }
        },
    }
}

/// Optional coordinate component within ±`bound`
fn coordinate(
    value: &Option<String>,
    field: DiscoveryField,
    bound: f64,
    range_message: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match RawInput::of(value) {
        RawInput::Absent | RawInput::Empty => None,
        RawInput::Value(text) => match parse_number(text) {
            Some(n) if (-bound..=bound).contains(&n) => Some(n),
            Some(_) => {
                errors.insert(field.as_str(), range_message);
                None
            }
            None => {
                errors.insert(field.as_str(), EXPECTED_NUMBER);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> DiscoveryForm {
        let mut form = DiscoveryForm::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "goal" => form.goal = value,
                "budgetMin" => form.budget_min = value,
                "budgetMax" => form.budget_max = value,
                "maxDistanceKm" => form.max_distance_km = value,
                "take" => form.take = value,
                "locationMode" => form.location_mode = value,
                "latitude" => form.latitude = value,
                "longitude" => form.longitude = value,
                other => panic!("unknown field {}", other),
            }
        }
        form
    }

    #[test]
    fn test_empty_form_uses_defaults() {
        let filter = validate_discovery(&DiscoveryForm::default()).unwrap();
        assert_eq!(filter.max_distance_km, 15.0);
        assert_eq!(filter.take, 6);
        assert_eq!(filter.location_mode, LocationMode::Auto);
        assert!(filter.goal.is_none());
        assert!(filter.budget_min.is_none());
        assert!(filter.latitude.is_none());
    }

    #[test]
    fn test_blank_optional_numbers_are_absent() {
        let filter = validate_discovery(&form(&[
            ("goal", ""),
            ("budgetMin", ""),
            ("budgetMax", "  "),
            ("latitude", ""),
        ]))
        .unwrap();
        assert!(filter.goal.is_none());
        assert!(filter.budget_min.is_none());
        assert!(filter.budget_max.is_none());
        assert!(filter.latitude.is_none());
    }

    #[test]
    fn test_budget_ordering_accepts_valid_bounds() {
        for (min, max) in [("100", "250"), ("100", "100"), ("0", "0"), ("", "40"), ("40", "")] {
            let result = validate_discovery(&form(&[("budgetMin", min), ("budgetMax", max)]));
            assert!(result.is_ok(), "min={} max={}", min, max);
        }
    }

    #[test]
    fn test_budget_min_above_max_reported_on_max() {
        let errors = validate_discovery(&form(&[("budgetMin", "300"), ("budgetMax", "250")]))
            .unwrap_err();
        assert_eq!(errors.get("budgetMax"), Some("Budget min must be less than max"));
        assert!(!errors.contains("budgetMin"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let errors = validate_discovery(&form(&[("budgetMin", "-5")])).unwrap_err();
        assert_eq!(errors.get("budgetMin"), Some("Must be positive"));
    }

    #[test]
    fn test_manual_mode_requires_both_coordinates() {
        for (lat, lng) in [("", ""), ("24.7", ""), ("", "46.7")] {
            let errors = validate_discovery(&form(&[
                ("locationMode", "manual"),
                ("latitude", lat),
                ("longitude", lng),
            ]))
            .unwrap_err();
            assert_eq!(errors.get("latitude"), Some("Provide latitude and longitude"));
            assert!(!errors.contains("longitude"));
        }
    }

    #[test]
    fn test_missing_coordinate_flagged_beside_range_error() {
        let errors = validate_discovery(&form(&[
            ("locationMode", "manual"),
            ("longitude", "200"),
        ]))
        .unwrap_err();
        assert_eq!(errors.get("latitude"), Some("Provide latitude and longitude"));
        assert_eq!(errors.get("longitude"), Some("Longitude must be between -180 and 180"));
    }

    #[test]
    fn test_unparsable_coordinate_suppresses_missing_check() {
        let errors = validate_discovery(&form(&[
            ("locationMode", "manual"),
            ("longitude", "abc"),
        ]))
        .unwrap_err();
        assert!(!errors.contains("latitude"));
        assert_eq!(errors.get("longitude"), Some("Expected a number"));
    }

    #[test]
    fn test_defaulted_number_states() {
        let mut errors = FieldErrors::new();
        let range = (1.0, 20.0);
        assert_eq!(ranged_number(&None, DiscoveryField::Take, range, &mut errors), NumberInput::Absent);
        assert_eq!(
            ranged_number(&Some("4".into()), DiscoveryField::Take, range, &mut errors),
            NumberInput::Value(4.0)
        );
        assert!(errors.is_empty());
        assert_eq!(
            ranged_number(&Some("40".into()), DiscoveryField::Take, range, &mut errors),
            NumberInput::Invalid
        );
        assert_eq!(errors.get("take"), Some("Must be between 1 and 20"));
        assert_eq!(NumberInput::Absent.or_default(15.0), Some(15.0));
        assert_eq!(NumberInput::Invalid.or_default(15.0), None);
    }

    #[test]
    fn test_manual_mode_with_coordinates_accepted() {
        let filter = validate_discovery(&form(&[
            ("locationMode", "manual"),
            ("latitude", "24.7"),
            ("longitude", "46.7"),
        ]))
        .unwrap();
        assert_eq!(filter.location_mode, LocationMode::Manual);
        assert_eq!(filter.latitude, Some(24.7));
        assert_eq!(filter.longitude, Some(46.7));
    }

    #[test]
    fn test_auto_mode_without_coordinates_accepted() {
        assert!(validate_discovery(&form(&[("locationMode", "auto")])).is_ok());
    }

    #[test]
    fn test_coordinate_ranges() {
        let errors = validate_discovery(&form(&[("latitude", "91"), ("longitude", "-181")]))
            .unwrap_err();
        assert_eq!(errors.get("latitude"), Some("Latitude must be between -90 and 90"));
        assert_eq!(errors.get("longitude"), Some("Longitude must be between -180 and 180"));
    }

    #[test]
    fn test_manual_mode_range_error_not_masked() {
        let errors = validate_discovery(&form(&[
            ("locationMode", "manual"),
            ("latitude", "24.7"),
            ("longitude", "200"),
        ]))
        .unwrap_err();
        assert!(!errors.contains("latitude"));
        assert_eq!(errors.get("longitude"), Some("Longitude must be between -180 and 180"));
    }

    #[test]
    fn test_distance_and_take_bounds() {
        let errors = validate_discovery(&form(&[("maxDistanceKm", "0"), ("take", "21")]))
            .unwrap_err();
        assert_eq!(errors.get("maxDistanceKm"), Some("Must be between 1 and 150"));
        assert_eq!(errors.get("take"), Some("Must be between 1 and 20"));

        let filter = validate_discovery(&form(&[("maxDistanceKm", "150"), ("take", "1")])).unwrap();
        assert_eq!(filter.max_distance_km, 150.0);
        assert_eq!(filter.take, 1);
    }

    #[test]
    fn test_take_must_be_whole() {
        let errors = validate_discovery(&form(&[("take", "2.5")])).unwrap_err();
        assert_eq!(errors.get("take"), Some("Must be a whole number"));
    }

    #[test]
    fn test_blank_required_number_does_not_fall_back_to_default() {
        let errors = validate_discovery(&form(&[("maxDistanceKm", "")])).unwrap_err();
        assert_eq!(errors.get("maxDistanceKm"), Some("Expected a number"));
    }

    #[test]
    fn test_unknown_goal_and_mode() {
        let errors = validate_discovery(&form(&[("goal", "Yoga"), ("locationMode", "gps")]))
            .unwrap_err();
        assert_eq!(errors.get("goal"), Some("Select a valid goal"));
        assert_eq!(errors.get("locationMode"), Some("Location mode must be auto or manual"));
    }

    #[test]
    fn test_goal_is_case_sensitive() {
        let errors = validate_discovery(&form(&[("goal", "weightloss")])).unwrap_err();
        assert_eq!(errors.get("goal"), Some("Select a valid goal"));

        let filter = validate_discovery(&form(&[("goal", "WeightLoss")])).unwrap();
        assert_eq!(filter.goal, Some(FitnessGoal::WeightLoss));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = validate_discovery(&form(&[
            ("budgetMin", "abc"),
            ("maxDistanceKm", "500"),
            ("latitude", "100"),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("budgetMin"), Some("Expected a number"));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = DiscoveryDefaults {
            max_distance_km: 40.0,
            take: 10,
            location_mode: LocationMode::Manual,
        };
        let filter = validate_discovery_with(
            &form(&[("latitude", "1"), ("longitude", "2")]),
            &defaults,
        )
        .unwrap();
        assert_eq!(filter.max_distance_km, 40.0);
        assert_eq!(filter.take, 10);
        assert_eq!(filter.location_mode, LocationMode::Manual);
    }

    #[test]
    fn test_form_from_json_accepts_numbers() {
        let form: DiscoveryForm = serde_json::from_str(
            r#"{"goal":"WeightLoss","budgetMin":100,"results":"5","locationMode":"manual","latitude":24.7,"longitude":"46.7"}"#,
        )
        .unwrap();
        let filter = validate_discovery(&form).unwrap();
        assert_eq!(filter.goal, Some(FitnessGoal::WeightLoss));
        assert_eq!(filter.budget_min, Some(100.0));
        assert_eq!(filter.take, 5);
        assert_eq!(filter.latitude, Some(24.7));
    }
}
