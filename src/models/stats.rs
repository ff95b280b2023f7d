use serde::{Deserialize, Serialize};

use crate::models::ValidationResult;

/// One logged day together with its evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    pub completed_items: u32,
    pub total_items: u32,
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}
