use serde::{Deserialize, Serialize};

/// Raw counts for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    /// Tasks and routines scheduled for the day.
    pub total_items: u32,
    pub completed_items: u32,
    /// Completed items that count toward the minimum-tasks requirement.
    pub completed_qualifying: u32,
    pub focus_sessions: Option<u32>,
}

/// Thresholds a day has to meet to keep the streak alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCriteria {
    /// Percent, 0-100.
    pub required_completion_rate: u32,
    pub required_min_tasks: u32,
    /// `None` leaves focus sessions out of the check entirely.
    pub required_focus_sessions: Option<u32>,
}

/// Per-requirement outcome of evaluating a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub overall_rate: u32,
    pub meets_completion_rate: bool,
    pub meets_min_tasks: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_focus_sessions: Option<bool>,
    pub is_valid: bool,
}

/// Day snapshot as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayValidationResponse {
    pub total_items: u32,
    pub completed_items: u32,
    pub required_completion_rate: u32,
    pub required_min_tasks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_focus_sessions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_focus_sessions: Option<u32>,
    /// Falls back to `completed_items` when the backend does not split it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_qualifying_items: Option<u32>,
}

impl DayValidationResponse {
    pub fn activity(&self) -> DayActivity {
        DayActivity {
            total_items: self.total_items,
            completed_items: self.completed_items,
            completed_qualifying: self
                .completed_qualifying_items
                .unwrap_or(self.completed_items),
            focus_sessions: self.actual_focus_sessions,
        }
    }

    pub fn criteria(&self) -> ValidationCriteria {
        ValidationCriteria {
            required_completion_rate: self.required_completion_rate,
            required_min_tasks: self.required_min_tasks,
            required_focus_sessions: self.required_focus_sessions,
        }
    }

    pub fn from_parts(activity: DayActivity, criteria: ValidationCriteria) -> Self {
        Self {
            total_items: activity.total_items,
            completed_items: activity.completed_items,
            required_completion_rate: criteria.required_completion_rate,
            required_min_tasks: criteria.required_min_tasks,
            required_focus_sessions: criteria.required_focus_sessions,
            actual_focus_sessions: activity.focus_sessions,
            completed_qualifying_items: Some(activity.completed_qualifying),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_snapshot_without_optional_fields() {
        let json = r#"{
            "totalItems": 9,
            "completedItems": 7,
            "requiredCompletionRate": 60,
            "requiredMinTasks": 1
        }"#;
        let response: DayValidationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.required_focus_sessions, None);

        let activity = response.activity();
        assert_eq!(activity.completed_qualifying, 7);
        assert_eq!(activity.focus_sessions, None);
        assert_eq!(response.criteria().required_completion_rate, 60);
    }

    #[test]
    fn parses_focus_session_fields() {
        let json = r#"{
            "totalItems": 4,
            "completedItems": 2,
            "requiredCompletionRate": 50,
            "requiredMinTasks": 2,
            "requiredFocusSessions": 3,
            "actualFocusSessions": 1,
            "completedQualifyingItems": 1
        }"#;
        let response: DayValidationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.criteria().required_focus_sessions, Some(3));
        assert_eq!(response.activity().focus_sessions, Some(1));
        assert_eq!(response.activity().completed_qualifying, 1);
    }
}
