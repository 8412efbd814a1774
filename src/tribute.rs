//! Shared validation pipeline applied by both store adapters before a
//! tribute is persisted.

use chrono::{DateTime, Utc};

use crate::moderation::{self, SubmissionThrottle};
use crate::store::StoreError;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_MESSAGE_LEN: usize = 200;

/// A submission that passed every moderation step and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTribute {
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Runs the pipeline in order: trim, required-field and length checks, the
/// profanity filter on both fields, then the per-name throttle. Each step
/// short-circuits with its own `StoreError` variant; nothing is persisted
/// on failure.
pub fn prepare_submission(
    name: &str,
    message: &str,
    throttle: &SubmissionThrottle,
) -> Result<PreparedTribute, StoreError> {
    let trimmed_name = name.trim();
    let trimmed_message = message.trim();
    if trimmed_name.is_empty() || trimmed_message.is_empty() {
        return Err(StoreError::Validation(
            "Name and message are required".to_string(),
        ));
    }

    // The cap applies to the raw message, matching the character counter
    // submitters see in the form.
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(StoreError::Validation(
            "Message must be 200 characters or less".to_string(),
        ));
    }
    if trimmed_name.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::Validation(
            "Name must be 50 characters or less".to_string(),
        ));
    }

    if moderation::contains_profanity(trimmed_name)
        || moderation::contains_profanity(trimmed_message)
    {
        return Err(StoreError::ContentRejected);
    }

    // Throttle on the folded name alone. Keying by name plus submission
    // time would mint a fresh key per call and never trigger.
    if throttle.check_and_record(&trimmed_name.to_lowercase()) {
        return Err(StoreError::RateLimited);
    }

    Ok(PreparedTribute {
        name: trimmed_name.to_string(),
        message: trimmed_message.to_string(),
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttle() -> SubmissionThrottle {
        SubmissionThrottle::new()
    }

    #[test]
    fn valid_submission_is_trimmed_and_timestamped() {
        let prepared = prepare_submission("  Jane Doe  ", " Thinking of you every day ", &throttle())
            .expect("submission passes");
        assert_eq!(prepared.name, "Jane Doe");
        assert_eq!(prepared.message, "Thinking of you every day");
        assert!(prepared.created_at <= Utc::now());
    }

    #[test]
    fn blank_fields_are_rejected() {
        for (name, message) in [("", "hello"), ("Jane", ""), ("   ", "hello"), ("Jane", " \t ")] {
            let err = prepare_submission(name, message, &throttle()).expect_err("must fail");
            assert!(matches!(err, StoreError::Validation(_)), "{name:?}/{message:?}");
            assert_eq!(err.to_string(), "Name and message are required");
        }
    }

    #[test]
    fn oversized_message_is_rejected() {
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = prepare_submission("Jane", &long, &throttle()).expect_err("must fail");
        assert_eq!(err.to_string(), "Message must be 200 characters or less");

        let exact = "x".repeat(MAX_MESSAGE_LEN);
        assert!(prepare_submission("Jane", &exact, &throttle()).is_ok());
    }

    #[test]
    fn oversized_name_is_rejected() {
        let long = "n".repeat(MAX_NAME_LEN + 1);
        let err = prepare_submission(&long, "hello", &throttle()).expect_err("must fail");
        assert_eq!(err.to_string(), "Name must be 50 characters or less");
    }

    #[test]
    fn profane_name_or_message_is_rejected() {
        let err = prepare_submission("spammer", "buy now", &throttle()).expect_err("must fail");
        assert!(matches!(err, StoreError::ContentRejected));

        let err = prepare_submission("Jane", "pure SPAM here", &throttle()).expect_err("must fail");
        assert!(matches!(err, StoreError::ContentRejected));
    }

    #[test]
    fn repeat_submission_under_same_name_is_rate_limited() {
        let throttle = throttle();
        assert!(prepare_submission("Jane Doe", "first", &throttle).is_ok());
        let err = prepare_submission("  jane doe ", "second", &throttle).expect_err("must fail");
        assert!(matches!(err, StoreError::RateLimited));
        assert_eq!(err.to_string(), "Please wait before adding another entry");

        // A different submitter is unaffected.
        assert!(prepare_submission("John Doe", "third", &throttle).is_ok());
    }

    #[test]
    fn rejected_submission_does_not_arm_the_throttle() {
        let throttle = throttle();
        // Fails at the profanity step, before the throttle check-and-set.
        assert!(prepare_submission("Jane", "spam", &throttle).is_err());
        assert!(prepare_submission("Jane", "a kind word", &throttle).is_ok());
    }
}
