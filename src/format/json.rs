//! JSON output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, SearchOutcome};

/// JSON formatter - outputs the outcome as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Results and summary as JSON"
    }

    fn format(&self, outcome: &SearchOutcome) -> Result<String> {
        Ok(serde_json::to_string_pretty(outcome)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::ResultsPanel;
    use crate::format::sample_coach;

    #[test]
    fn test_json_format() {
        let mut panel = ResultsPanel::new();
        let ticket = panel.begin();
        panel.complete(ticket, Ok(vec![sample_coach(1, 4.0, 100.0), sample_coach(2, 5.0, 200.0)]));

        let output = JsonFormatter.format(&SearchOutcome::from_panel(&panel)).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["view"], "results");
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["results"][0]["coachId"], 1);
        assert_eq!(parsed["summary"]["avgRating"], 4.5);
        assert_eq!(parsed["summary"]["avgPrice"], 150.0);
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
