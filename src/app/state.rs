use std::time::Instant;

use ratatui::widgets::ListState;
use tracing::debug;

use crate::api::TaskDraft;
use crate::app::controller::TaskController;
use crate::app::mode::Mode;
use crate::clipboard::{CopyResult, copy_to_clipboard};
use crate::task::Task;
use crate::ui::theme::Theme;

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Which input the form cursor sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

impl FormField {
    pub fn toggled(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Title,
        }
    }
}

/// Which of the revealed row actions is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionFocus {
    #[default]
    Edit,
    Delete,
}

impl ActionFocus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Edit => Self::Delete,
            Self::Delete => Self::Edit,
        }
    }
}

/// Validated payload leaving the form. The title is trimmed and non-empty;
/// a description that trims to nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmit {
    pub title: String,
    pub description: Option<String>,
}

/// The bottom-sheet create/edit form. Validation lives here; the controller
/// only ever sees payloads that passed it.
#[derive(Debug, Clone)]
pub struct FormState {
    /// Task being edited, or `None` when creating.
    pub editing: Option<Task>,
    pub title: String,
    pub title_cursor: usize,
    pub description: String,
    pub description_cursor: usize,
    pub focus: FormField,
    pub error: Option<String>,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            title_cursor: 0,
            description: String::new(),
            description_cursor: 0,
            focus: FormField::default(),
            error: None,
        }
    }

    pub fn edit(task: Task) -> Self {
        let title = task.title.clone();
        let description = task.description.clone().unwrap_or_default();
        Self {
            title_cursor: title.len(),
            description_cursor: description.len(),
            title,
            description,
            editing: Some(task),
            focus: FormField::default(),
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() { "Edit Task" } else { "New Task" }
    }

    pub fn focused_buffer_mut(&mut self) -> (&mut String, &mut usize) {
        match self.focus {
            FormField::Title => (&mut self.title, &mut self.title_cursor),
            FormField::Description => (&mut self.description, &mut self.description_cursor),
        }
    }

    /// Validates the fields. Returns the payload, or `None` with an inline
    /// message set when the trimmed title is empty — in which case nothing
    /// must reach the controller.
    pub fn submit(&mut self) -> Option<FormSubmit> {
        let title = self.title.trim();
        if title.is_empty() {
            self.error = Some("Please enter a task title.".to_string());
            return None;
        }

        let description = self.description.trim();
        Some(FormSubmit {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

pub struct AppState {
    pub controller: TaskController,
    pub cursor_position: usize,
    pub mode: Mode,
    pub action_focus: ActionFocus,
    pub form: Option<FormState>,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub tick_rate_ms: u64,
    pub status_message: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub list_state: ListState,
}

impl AppState {
    pub fn new(controller: TaskController, theme: Theme, tick_rate_ms: u64) -> Self {
        let mut state = Self {
            controller,
            cursor_position: 0,
            mode: Mode::Normal,
            action_focus: ActionFocus::default(),
            form: None,
            show_help: false,
            should_quit: false,
            theme,
            tick_rate_ms,
            status_message: None,
            spinner_frame: 0,
            list_state: ListState::default(),
        };
        state.sync_list_state();
        state
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.controller.tasks().get(self.cursor_position)
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
        self.sync_list_state();
    }

    pub fn move_cursor_down(&mut self) {
        let last = self.controller.tasks().len().saturating_sub(1);
        self.cursor_position = (self.cursor_position + 1).min(last);
        self.sync_list_state();
    }

    /// Keep the cursor on a real row after the collection changed underneath
    /// it (completion applied, item removed, list replaced).
    fn clamp_cursor(&mut self) {
        let last = self.controller.tasks().len().saturating_sub(1);
        self.cursor_position = self.cursor_position.min(last);
        self.sync_list_state();
    }

    fn sync_list_state(&mut self) {
        if self.controller.tasks().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.cursor_position));
        }
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(FormState::create());
        self.mode = Mode::Form;
    }

    /// Opens the edit form for the selected row, pre-filled. Rows with a
    /// call in flight stay read-only until it settles.
    pub fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if self.controller.is_item_locked(&task.id) {
            debug!(id = %task.id, "edit ignored while item is in flight");
            return;
        }
        self.form = Some(FormState::edit(task));
        self.mode = Mode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::Normal;
    }

    /// Validation failures keep the form open with its inline message; a
    /// valid payload closes the form and hands the intent to the controller.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else { return };
        let Some(payload) = form.submit() else { return };

        let editing = form.editing.clone();
        self.form = None;
        self.mode = Mode::Normal;

        match editing {
            Some(task) => self
                .controller
                .edit(&task.id, payload.title, payload.description),
            None => self.controller.create(TaskDraft {
                title: payload.title,
                description: payload.description,
            }),
        }
    }

    pub fn open_actions(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if self.controller.is_item_locked(&task.id) {
            return;
        }
        self.action_focus = ActionFocus::default();
        self.mode = Mode::Actions;
    }

    pub fn close_actions(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn toggle_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            let id = task.id.clone();
            self.controller.toggle(&id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            let id = task.id.clone();
            self.controller.delete(&id);
            self.clamp_cursor();
        }
    }

    pub fn refresh(&mut self) {
        self.controller.refresh();
    }

    pub fn yank_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let text = match &task.description {
            Some(description) => format!("{}\n{description}", task.title),
            None => task.title.clone(),
        };
        match copy_to_clipboard(&text) {
            Ok(CopyResult::SystemClipboard) => {
                self.status_message = Some(("Copied to clipboard".to_string(), Instant::now()));
            }
            Ok(CopyResult::InternalBuffer { .. }) => {
                self.status_message =
                    Some(("Copied to internal buffer".to_string(), Instant::now()));
            }
            Err(e) => {
                self.status_message = Some((format!("Copy failed: {e}"), Instant::now()));
            }
        }
    }

    /// One pass of the event loop: apply finished remote calls and advance
    /// the spinner while anything is in flight.
    pub fn on_tick(&mut self) {
        if self.controller.poll() {
            self.clamp_cursor();
        }
        if self.controller.busy() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{RemoteTask, TaskPatch};
    use crate::api::{StoreError, TaskStore};
    use crate::task::TaskId;
    use std::sync::Arc;

    /// Store stub for form/intent tests; the calls themselves are not
    /// exercised here.
    struct NullStore;

    impl TaskStore for NullStore {
        fn list(&self) -> Result<Vec<RemoteTask>, StoreError> {
            Ok(vec![])
        }

        fn create(&self, draft: &crate::api::TaskDraft) -> Result<RemoteTask, StoreError> {
            Ok(RemoteTask {
                id: "srv-1".to_string(),
                title: draft.title.clone(),
                description: draft.description.clone(),
                completed: false,
                created_at: "2026-08-01T10:00:00Z".to_string(),
                updated_at: None,
            })
        }

        fn update(&self, _id: &str, _patch: &TaskPatch) -> Result<Option<RemoteTask>, StoreError> {
            Ok(None)
        }

        fn delete(&self, _id: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn app_state() -> AppState {
        let controller = TaskController::new(Arc::new(NullStore), None);
        AppState::new(controller, Theme::default(), 100)
    }

    fn sample_task() -> Task {
        Task {
            id: TaskId::Persisted("1".to_string()),
            title: "Buy milk".to_string(),
            description: Some("2 liters".to_string()),
            completed: false,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_submit_trims_title_and_drops_empty_description() {
        let mut form = FormState::create();
        form.title = "  Buy milk  ".to_string();
        form.description = "   ".to_string();

        let payload = form.submit().expect("valid title should submit");
        assert_eq!(payload.title, "Buy milk");
        assert_eq!(payload.description, None);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_submit_rejects_empty_title() {
        let mut form = FormState::create();
        assert_eq!(form.submit(), None);
        assert_eq!(form.error.as_deref(), Some("Please enter a task title."));
    }

    #[test]
    fn test_submit_rejects_whitespace_title() {
        let mut form = FormState::create();
        form.title = "   ".to_string();
        assert_eq!(form.submit(), None);
        assert_eq!(form.error.as_deref(), Some("Please enter a task title."));
    }

    #[test]
    fn test_edit_form_prefills_fields() {
        let form = FormState::edit(sample_task());
        assert_eq!(form.title, "Buy milk");
        assert_eq!(form.description, "2 liters");
        assert_eq!(form.title_cursor, form.title.len());
        assert_eq!(form.heading(), "Edit Task");
        assert_eq!(FormState::create().heading(), "New Task");
    }

    #[test]
    fn test_invalid_submit_keeps_form_open_and_controller_idle() {
        let mut state = app_state();
        state.open_create_form();
        state.submit_form();

        assert_eq!(state.mode, Mode::Form);
        let form = state.form.as_ref().expect("form should stay open");
        assert_eq!(form.error.as_deref(), Some("Please enter a task title."));
        assert!(!state.controller.busy());
        assert!(state.controller.tasks().is_empty());
    }

    #[test]
    fn test_valid_submit_closes_form_and_creates() {
        let mut state = app_state();
        state.open_create_form();
        state.form.as_mut().unwrap().title = "  Buy milk  ".to_string();
        state.submit_form();

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.form.is_none());
        // Optimistic placeholder already at the head, trimmed.
        assert_eq!(state.controller.tasks()[0].title, "Buy milk");
        assert!(state.controller.tasks()[0].id.is_temporary());
    }

    #[test]
    fn test_open_actions_requires_a_row() {
        let mut state = app_state();
        state.open_actions();
        assert_eq!(state.mode, Mode::Normal);
    }
}
