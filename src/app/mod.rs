pub mod controller;
pub mod event;
pub mod mode;
pub mod state;

pub use controller::TaskController;
pub use state::AppState;
