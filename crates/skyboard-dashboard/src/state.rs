//! Refresh state machine and the per-cycle display snapshot.
//!
//! Only one refresh cycle runs at a time. Used by `RefreshScheduler`.

use skyboard_core::Units;
use skyboard_weather::{CurrentConditions, DailySummary};

/// Whether a refresh cycle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Refreshing,
}

impl RefreshState {
    /// True if a new refresh can be started.
    pub fn can_start_refresh(self) -> bool {
        matches!(self, RefreshState::Idle)
    }

    /// State after a cycle finishes, whether it succeeded or failed.
    pub fn on_refresh_done(self) -> Self {
        RefreshState::Idle
    }
}

/// Everything the dashboard shows after one successful cycle.
///
/// Built whole at the end of a cycle and replaced whole by the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub current: CurrentConditions,
    pub days: Vec<DailySummary>,
    pub units: Units,
}
