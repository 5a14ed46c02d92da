//! Multi-step action wizard.
//!
//! The console's action forms walk the user through picking an action, the
//! platform to run it on and a job type. Each step is a named state and
//! only the listed events move between them.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// What the wizard will do once ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    CreateProject,
    ExportResults,
    RunPipeline,
    IngestVendorData,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::CreateProject => "create-project",
            ActionKind::ExportResults => "export-results",
            ActionKind::RunPipeline => "run-pipeline",
            ActionKind::IngestVendorData => "ingest-vendor-data",
        })
    }
}

/// Where the action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Arvados,
    SevenBridges,
    Aws,
    Local,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Arvados => "arvados",
            Platform::SevenBridges => "seven-bridges",
            Platform::Aws => "aws",
            Platform::Local => "local",
        })
    }
}

/// A wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WizardState {
    #[default]
    ChoosingAction,
    SelectingPlatform {
        action: ActionKind,
    },
    SelectingType {
        action: ActionKind,
        platform: Platform,
    },
    Ready {
        action: ActionKind,
        platform: Platform,
        job_type: String,
    },
}

/// Input moving the wizard between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    ChooseAction(ActionKind),
    SelectPlatform(Platform),
    SelectType(String),
    /// Go back one step.
    Back,
    /// Start over.
    Reset,
}

impl WizardEvent {
    fn name(&self) -> &'static str {
        match self {
            WizardEvent::ChooseAction(_) => "choose-action",
            WizardEvent::SelectPlatform(_) => "select-platform",
            WizardEvent::SelectType(_) => "select-type",
            WizardEvent::Back => "back",
            WizardEvent::Reset => "reset",
        }
    }
}

impl WizardState {
    /// Name of the step, for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::ChoosingAction => "choosing-action",
            WizardState::SelectingPlatform { .. } => "selecting-platform",
            WizardState::SelectingType { .. } => "selecting-type",
            WizardState::Ready { .. } => "ready",
        }
    }

    /// Zero-based position of the step.
    pub fn step_index(&self) -> usize {
        match self {
            WizardState::ChoosingAction => 0,
            WizardState::SelectingPlatform { .. } => 1,
            WizardState::SelectingType { .. } => 2,
            WizardState::Ready { .. } => 3,
        }
    }

    /// Compute the state after an event.
    pub fn apply(self, event: WizardEvent) -> Result<WizardState, WizardError> {
        use WizardEvent as E;
        use WizardState as S;

        match (self, event) {
            (_, E::Reset) => Ok(S::ChoosingAction),

            (S::ChoosingAction, E::Back) => Ok(S::ChoosingAction),
            (S::SelectingPlatform { .. }, E::Back) => Ok(S::ChoosingAction),
            (S::SelectingType { action, .. }, E::Back) => Ok(S::SelectingPlatform { action }),
            (S::Ready { action, platform, .. }, E::Back) => {
                Ok(S::SelectingType { action, platform })
            }

            (S::ChoosingAction, E::ChooseAction(action)) => Ok(S::SelectingPlatform { action }),
            (S::SelectingPlatform { action }, E::SelectPlatform(platform)) => {
                Ok(S::SelectingType { action, platform })
            }
            (S::SelectingType { action, platform }, E::SelectType(job_type)) => {
                let job_type = job_type.trim();
                if job_type.is_empty() {
                    return Err(WizardError::EmptyType);
                }
                Ok(S::Ready {
                    action,
                    platform,
                    job_type: job_type.to_string(),
                })
            }

            (state, event) => Err(WizardError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }
}

/// A wizard instance holding its current step.
#[derive(Debug, Clone, Default)]
pub struct ActionWizard {
    state: WizardState,
}

impl ActionWizard {
    /// Create a wizard at the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Zero-based position of the current step.
    pub fn step_index(&self) -> usize {
        self.state.step_index()
    }

    /// Returns `true` once action, platform and type are all chosen.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, WizardState::Ready { .. })
    }

    /// Apply an event. On error the wizard stays where it was.
    pub fn send(&mut self, event: WizardEvent) -> Result<&WizardState, WizardError> {
        let from = self.state.name();
        let next = self.state.clone().apply(event)?;
        debug!("Wizard transition: {} -> {}", from, next.name());
        self.state = next;
        Ok(&self.state)
    }
}
