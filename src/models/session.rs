use chrono::{DateTime, Utc};

use crate::models::question::Question;

/// Per-user quiz progress. Owned exclusively by the session store; every
/// request re-fetches it by user id.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub question_count: u32,
    pub correct_count: u32,
    /// The question currently awaiting an answer, if any.
    pub pending: Option<Question>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            question_count: 0,
            correct_count: 0,
            pending: None,
            started_at: Utc::now(),
        }
    }
}
