//! Moderation primitives shared by both tribute stores: a fixed profanity
//! denylist and a per-name submission throttle.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Denylist checked as case-insensitive substrings. A match on either field
/// rejects the whole submission; no partial redaction.
const PROFANITY_DENYLIST: &[&str] = &["spam", "test123", "badword"];

/// Minimum spacing between accepted submissions under one name.
pub const THROTTLE_WINDOW: Duration = Duration::from_secs(30);

pub fn contains_profanity(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PROFANITY_DENYLIST.iter().any(|word| lowered.contains(word))
}

/// Check-and-set throttle keyed by lowercased submitter name.
///
/// The map is process-local and unbounded; keys are folded names, so the
/// working set stays proportional to distinct submitters. The mutex keeps
/// check-and-set atomic across worker threads.
#[derive(Debug)]
pub struct SubmissionThrottle {
    window: Duration,
    last_accepted: Mutex<HashMap<String, Instant>>,
}

impl SubmissionThrottle {
    pub fn new() -> Self {
        Self::with_window(THROTTLE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        assert!(
            window <= Duration::from_secs(3600),
            "Throttle window exceeds defensive bound"
        );
        Self {
            window,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true when `identifier` was accepted within the window. When
    /// not throttled, the current time is recorded immediately, even if the
    /// caller later abandons the submission for other reasons.
    pub fn check_and_record(&self, identifier: &str) -> bool {
        let now = Instant::now();
        let mut last_accepted = self
            .last_accepted
            .lock()
            .expect("throttle lock poisoned");
        if let Some(last) = last_accepted.get(identifier) {
            if now.duration_since(*last) < self.window {
                return true;
            }
        }
        last_accepted.insert(identifier.to_string(), now);
        false
    }
}

impl Default for SubmissionThrottle {
    fn default() -> Self {
        Self::new()
    }
}
