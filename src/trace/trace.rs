use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::service::message::{Response, Status};

/// One line of the operation journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp_ms: u128,
    pub operation: String,
    pub status: Status,
    pub changed: Option<usize>,
    pub message: String,
}

impl JournalEntry {
    pub fn from_response(response: &Response) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            operation: response.operation.clone(),
            status: response.status,
            changed: response.changed,
            message: response.message.clone(),
        }
    }
}
