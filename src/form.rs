//! Structured trip form
//!
//! Holds the fields of the trip planner form, checks the required ones, and
//! turns a submitted form into the plan prompt and the context prefix used
//! for follow-up questions.

use crate::error::FormError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the form's date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the trip planner form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFormData {
    pub source: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub travelers: String,
    pub interests: String,
    #[serde(default)]
    pub include_flights: bool,
}

/// Whether the form has been submitted in this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStage {
    AwaitingSubmission,
    Submitted,
}

impl Default for FormStage {
    fn default() -> Self {
        Self::AwaitingSubmission
    }
}

impl TravelFormData {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn with_travelers(mut self, travelers: impl Into<String>) -> Self {
        self.travelers = travelers.into();
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_flights(mut self, include: bool) -> Self {
        self.include_flights = include;
        self
    }

    /// Display names of required fields that are empty, in form order
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("Source", &self.source),
            ("Destination", &self.destination),
            ("Start Date", &self.start_date),
            ("End Date", &self.end_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Check the required fields
    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Parse both date fields
    pub fn dates(&self) -> Result<(NaiveDate, NaiveDate), FormError> {
        Ok((
            parse_date("startDate", &self.start_date)?,
            parse_date("endDate", &self.end_date)?,
        ))
    }

    /// Whole days between the start and end dates
    ///
    /// `None` when either date is missing or unparsable, or the end comes
    /// before the start.
    pub fn trip_days(&self) -> Option<i64> {
        let (start, end) = self.dates().ok()?;
        let days = (end - start).num_days();
        (days >= 0).then_some(days)
    }

    /// Prompt requesting a full plan for this trip
    pub fn to_prompt(&self) -> String {
        let mut prompt = format!(
            "Create a detailed travel plan for a trip from {} to {} from {} to {}.",
            self.source.trim(),
            self.destination.trim(),
            self.start_date.trim(),
            self.end_date.trim()
        );
        if !self.budget.trim().is_empty() {
            prompt.push_str(&format!(" Budget: {}.", self.budget.trim()));
        }
        if !self.travelers.trim().is_empty() {
            prompt.push_str(&format!(
                " Number of travelers: {}.",
                self.travelers.trim()
            ));
        }
        if !self.interests.trim().is_empty() {
            prompt.push_str(&format!(" Interests: {}.", self.interests.trim()));
        }
        prompt.push_str(
            " Please include transportation options, recommended accommodations, \
             must-see attractions, a daily itinerary, local food recommendations, \
             an estimated budget breakdown, and travel tips.",
        );
        if self.include_flights {
            prompt.push_str(" Also suggest how best to book flights for these dates.");
        }
        prompt
    }

    /// Prefix `question` with this trip's details
    pub fn with_trip_context(&self, question: &str) -> String {
        let mut context = format!(
            "Context: I'm planning a trip from {} to {} from {} to {}",
            self.source.trim(),
            self.destination.trim(),
            self.start_date.trim(),
            self.end_date.trim()
        );
        if !self.budget.trim().is_empty() {
            context.push_str(&format!(" with a budget of {}", self.budget.trim()));
        }
        if !self.travelers.trim().is_empty() {
            context.push_str(&format!(" for {} travelers", self.travelers.trim()));
        }
        context.push('.');
        if !self.interests.trim().is_empty() {
            context.push_str(&format!(
                " My interests include: {}.",
                self.interests.trim()
            ));
        }
        format!("{}\n\nMy question: {}", context, question)
    }
}

/// Parse a `YYYY-MM-DD` form date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FormError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_form() -> TravelFormData {
        TravelFormData::new("New York", "Paris, France")
            .with_dates("2025-06-01", "2025-06-08")
            .with_budget("$3000")
            .with_travelers("2")
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(paris_form().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let form = TravelFormData::new("", "Paris").with_dates("2025-06-01", " ");
        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(vec![
                "Source".to_string(),
                "End Date".to_string()
            ]))
        );
    }

    #[test]
    fn test_optional_fields_not_required() {
        let form = TravelFormData::new("Delhi", "Hanoi").with_dates("2025-03-06", "2025-03-10");
        assert!(form.missing_fields().is_empty());
    }

    #[test]
    fn test_trip_days() {
        assert_eq!(paris_form().trip_days(), Some(7));

        let same_day = paris_form().with_dates("2025-06-01", "2025-06-01");
        assert_eq!(same_day.trip_days(), Some(0));

        let backwards = paris_form().with_dates("2025-06-08", "2025-06-01");
        assert_eq!(backwards.trip_days(), None);

        let garbage = paris_form().with_dates("June 1st", "2025-06-08");
        assert_eq!(garbage.trip_days(), None);
    }

    #[test]
    fn test_parse_date_error() {
        let err = parse_date("startDate", "06/01/2025").unwrap_err();
        assert!(matches!(err, FormError::InvalidDate { ref field, .. } if field == "startDate"));
    }

    #[test]
    fn test_prompt_mentions_trip_details() {
        let prompt = paris_form().with_interests("museums, food").to_prompt();
        assert!(prompt.contains("from New York to Paris, France"));
        assert!(prompt.contains("from 2025-06-01 to 2025-06-08"));
        assert!(prompt.contains("Budget: $3000."));
        assert!(prompt.contains("Number of travelers: 2."));
        assert!(prompt.contains("Interests: museums, food."));
        assert!(!prompt.contains("flights"));
    }

    #[test]
    fn test_prompt_skips_empty_optionals() {
        let prompt = TravelFormData::new("A", "B")
            .with_dates("2025-01-01", "2025-01-02")
            .to_prompt();
        assert!(!prompt.contains("Budget"));
        assert!(!prompt.contains("Interests"));
    }

    #[test]
    fn test_trip_context_prefix() {
        let text = paris_form().with_trip_context("What should we eat?");
        assert!(text.starts_with("Context: I'm planning a trip from New York to Paris, France"));
        assert!(text.contains("with a budget of $3000 for 2 travelers."));
        assert!(text.ends_with("My question: What should we eat?"));
    }

    #[test]
    fn test_form_wire_names() {
        let value = serde_json::to_value(paris_form().with_flights(true)).unwrap();
        assert_eq!(value["startDate"], "2025-06-01");
        assert_eq!(value["includeFlights"], true);
    }
}
