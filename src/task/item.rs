use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::TaskId;

/// A single task as held in memory and in the list cache.
///
/// `created_at`/`updated_at` are kept as the store's own timestamp strings;
/// the client never parses or reorders by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Task {
    /// Placeholder shown at the head of the list while a create is in flight.
    /// Carries a temporary id and a local clock time until the store answers.
    pub fn optimistic(title: String, description: Option<String>) -> Self {
        Self {
            id: TaskId::new_temporary(),
            title,
            description,
            completed: false,
            created_at: Utc::now().to_rfc3339(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimistic_defaults() {
        let task = Task::optimistic("Buy milk".to_string(), None);
        assert!(task.id.is_temporary());
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.updated_at.is_none());
        assert!(!task.created_at.is_empty());
    }

    #[test]
    fn test_serde_round_trip_keeps_id_and_title() {
        let task = Task {
            id: TaskId::Persisted("7".to_string()),
            title: "Water plants".to_string(),
            description: Some("balcony first".to_string()),
            completed: true,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: None,
        };

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }
}
