use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::models::scrim::{FinalScore, ProposeScrimRequest};
use crate::scrim::error::ScrimError;

/// Centralized validation for scrim operations. All checks run locally,
/// before any write is attempted.
#[derive(Clone)]
pub struct ScrimValidator;

impl ScrimValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a scrim proposal against the current instant.
    /// `now` is injected so callers and tests share the same clock.
    pub fn validate_proposal(
        &self,
        request: &ProposeScrimRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ScrimError> {
        if request.region.trim().is_empty() {
            return Err(ScrimError::Validation("Region is required".into()));
        }

        if request.game.trim().is_empty() {
            return Err(ScrimError::Validation("Game is required".into()));
        }

        let today = now.date_naive();
        if request.scheduled_date < today {
            return Err(ScrimError::Validation(
                "Scrim date cannot be in the past".into(),
            ));
        }

        // Same-day proposals must still be strictly in the future
        if request.scheduled_date == today && request.scheduled_time <= now.time() {
            return Err(ScrimError::Validation(
                "Scrim time must be in the future".into(),
            ));
        }

        if request.is_recurring {
            if request.recurring_weekdays.is_empty() {
                return Err(ScrimError::Validation(
                    "Select at least one weekday for a recurring scrim".into(),
                ));
            }

            if let Some(end_date) = request.recurring_end_date {
                if end_date <= request.scheduled_date {
                    return Err(ScrimError::Validation(
                        "Recurring end date must be after the start date".into(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parse and validate an "A-B" final score.
    pub fn validate_final_score(&self, raw: &str) -> Result<FinalScore, ScrimError> {
        FinalScore::from_str(raw)
            .map_err(|e| ScrimError::Validation(format!("Invalid final score: {}", e)))
    }
}

impl Default for ScrimValidator {
    fn default() -> Self {
        Self::new()
    }
}
