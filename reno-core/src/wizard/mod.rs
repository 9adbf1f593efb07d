//! The five-step questionnaire state machine.

mod controller;
mod stage;

pub use controller::{WizardController, WizardEvent, WizardOutput, WizardSnapshot};
pub use stage::{TOTAL_STEPS, WizardStage};
