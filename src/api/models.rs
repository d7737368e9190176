use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// A task as the store returns it. Ids on the wire are always store-issued.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<RemoteTask> for Task {
    fn from(remote: RemoteTask) -> Self {
        Self {
            id: TaskId::Persisted(remote.id),
            title: remote.title,
            description: remote.description,
            completed: remote.completed,
            created_at: remote.created_at,
            updated_at: remote.updated_at,
        }
    }
}

/// Payload for creating a task. The title is already trimmed and non-empty
/// by the time a draft is built.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update. Absent fields are left untouched by the store.
///
/// `description` is doubly optional: the outer `None` omits the field, the
/// inner `None` serializes as null and clears it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch produced by the edit form: title plus description, together.
    pub fn edit(title: String, description: Option<String>) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            completed: None,
        }
    }

    /// Patch produced by toggling the completion marker.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_task_converts_to_persisted() {
        let remote = RemoteTask {
            id: "srv-1".to_string(),
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: None,
        };

        let task = Task::from(remote);
        assert_eq!(task.id, TaskId::Persisted("srv-1".to_string()));
        assert!(!task.id.is_temporary());
    }

    #[test]
    fn test_completion_patch_serializes_only_completed() {
        let json = serde_json::to_string(&TaskPatch::completion(true)).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn test_edit_patch_clears_description_with_null() {
        let json = serde_json::to_string(&TaskPatch::edit("Buy milk".to_string(), None)).unwrap();
        assert_eq!(json, r#"{"title":"Buy milk","description":null}"#);
    }

    #[test]
    fn test_edit_patch_sets_description() {
        let patch = TaskPatch::edit("Buy milk".to_string(), Some("2 liters".to_string()));
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"title":"Buy milk","description":"2 liters"}"#);
    }

    #[test]
    fn test_draft_omits_missing_description() {
        let draft = TaskDraft {
            title: "Buy milk".to_string(),
            description: None,
        };
        assert_eq!(serde_json::to_string(&draft).unwrap(), r#"{"title":"Buy milk"}"#);
    }

    #[test]
    fn test_remote_task_tolerates_missing_optionals() {
        let task: RemoteTask =
            serde_json::from_str(r#"{"id":"1","title":"t","created_at":"now"}"#).unwrap();
        assert!(task.description.is_none());
        assert!(!task.completed);
        assert!(task.updated_at.is_none());
    }
}
