//! WizardError for the action wizard state machine

/// Error type for rejected wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// The event is not valid in the current state.
    #[error("cannot apply '{event}' while in '{state}'")]
    InvalidTransition { state: &'static str, event: &'static str },

    /// A job type was selected with a blank name.
    #[error("job type must not be empty")]
    EmptyType,
}
