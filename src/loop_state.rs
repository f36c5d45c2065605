//! Animation loop state
//!
//! Shared by the browser frame loop and the headless CLI.

/// Whether the frame loop keeps rescheduling itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    Running,
    #[default]
    Stopped,
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }
}
