use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Edit/delete pair revealed on the selected row.
    Actions,
    /// Bottom-sheet create/edit form.
    Form,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "NORMAL"),
            Mode::Actions => write!(f, "ACTIONS"),
            Mode::Form => write!(f, "FORM"),
        }
    }
}
