//! Close confirmation for windows with unsaved changes.
//!
//! ```text
//! Idle ──request(clean)──────────────────────────────▶ Accepted
//!  │
//!  └─request(modified)─▶ ConfirmingSave ─Save────▶ SavingThenClose ─ok──▶ Accepted
//!                              │                          └─failed─▶ BlockedStayOpen
//!                              ├─Discard─▶ ClosingWithoutSave ─accept─▶ Accepted
//!                              └─Cancel──▶ BlockedStayOpen
//! ```

use log::{debug, warn};

/// The user's answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

/// Where a window is in its close sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseState {
    #[default]
    Idle,
    /// Waiting for a [`CloseChoice`]
    ConfirmingSave,
    /// Save chosen; waiting for the save result
    SavingThenClose,
    /// Discard chosen
    ClosingWithoutSave,
    /// The close was refused; the window stays open
    BlockedStayOpen,
    /// The window may be destroyed
    Accepted,
}

/// Per-window close state machine.
#[derive(Debug, Clone, Default)]
pub struct ClosePolicy {
    state: CloseState,
}

impl ClosePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CloseState {
        self.state
    }

    /// Whether a prompt is waiting on the user.
    pub fn is_confirming(&self) -> bool {
        self.state == CloseState::ConfirmingSave
    }

    /// A close was requested. Clean windows close straight away.
    pub fn request(&mut self, is_modified: bool) -> CloseState {
        self.state = if is_modified {
            CloseState::ConfirmingSave
        } else {
            CloseState::Accepted
        };
        debug!("Close requested (modified: {}) -> {:?}", is_modified, self.state);
        self.state
    }

    /// Apply the user's answer to the prompt.
    pub fn choose(&mut self, choice: CloseChoice) -> CloseState {
        if self.state != CloseState::ConfirmingSave {
            warn!("Ignoring close choice {:?} in state {:?}", choice, self.state);
            return self.state;
        }
        self.state = match choice {
            CloseChoice::Save => CloseState::SavingThenClose,
            CloseChoice::Discard => CloseState::ClosingWithoutSave,
            CloseChoice::Cancel => CloseState::BlockedStayOpen,
        };
        self.state
    }

    /// Report the result of the save started by [`CloseChoice::Save`].
    pub fn save_finished(&mut self, saved: bool) -> CloseState {
        if self.state == CloseState::SavingThenClose {
            self.state = if saved {
                CloseState::Accepted
            } else {
                CloseState::BlockedStayOpen
            };
        }
        self.state
    }

    /// Complete a discard.
    pub fn accept(&mut self) -> CloseState {
        if self.state == CloseState::ClosingWithoutSave {
            self.state = CloseState::Accepted;
        }
        self.state
    }

    /// Return to `Idle` after a refused close so the next request starts fresh.
    pub fn reset(&mut self) {
        self.state = CloseState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_window_closes_without_prompt() {
        let mut policy = ClosePolicy::new();
        assert_eq!(policy.request(false), CloseState::Accepted);
        assert!(!policy.is_confirming());
    }

    #[test]
    fn test_modified_window_prompts() {
        let mut policy = ClosePolicy::new();
        assert_eq!(policy.request(true), CloseState::ConfirmingSave);
        assert!(policy.is_confirming());
    }

    #[test]
    fn test_save_then_close() {
        let mut policy = ClosePolicy::new();
        policy.request(true);
        assert_eq!(policy.choose(CloseChoice::Save), CloseState::SavingThenClose);
        assert_eq!(policy.save_finished(true), CloseState::Accepted);
    }

    #[test]
    fn test_failed_save_blocks_close() {
        let mut policy = ClosePolicy::new();
        policy.request(true);
        policy.choose(CloseChoice::Save);
        assert_eq!(policy.save_finished(false), CloseState::BlockedStayOpen);
    }

    #[test]
    fn test_discard() {
        let mut policy = ClosePolicy::new();
        policy.request(true);
        assert_eq!(
            policy.choose(CloseChoice::Discard),
            CloseState::ClosingWithoutSave
        );
        assert_eq!(policy.accept(), CloseState::Accepted);
    }

    #[test]
    fn test_cancel_blocks_then_reset() {
        let mut policy = ClosePolicy::new();
        policy.request(true);
        assert_eq!(policy.choose(CloseChoice::Cancel), CloseState::BlockedStayOpen);
        policy.reset();
        assert_eq!(policy.state(), CloseState::Idle);
    }

    #[test]
    fn test_choice_outside_prompt_is_ignored() {
        let mut policy = ClosePolicy::new();
        assert_eq!(policy.choose(CloseChoice::Discard), CloseState::Idle);
        assert_eq!(policy.save_finished(true), CloseState::Idle);
        assert_eq!(policy.accept(), CloseState::Idle);
    }
}
