//! Dashboard runtime: refresh scheduling and presentation.
//!
//! Network work runs inside the refresh loop's task; presenters receive
//! finished snapshots only.

pub mod commands;
pub mod presenter;
pub mod scheduler;
pub mod state;

pub use commands::{handle_commands, spawn_stdin_reader, Command};
pub use presenter::{Presenter, TextPresenter};
pub use scheduler::{CycleOutcome, RefreshScheduler};
pub use state::{DisplayState, RefreshState};
