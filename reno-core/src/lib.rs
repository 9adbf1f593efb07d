//! Core of the renovation cost estimator: questionnaire models, the pricing
//! calculation, the wizard state machine and the result reveal animation.

pub mod calculations;
pub mod models;
pub mod reveal;
pub mod wizard;

pub use calculations::{CostEstimator, EstimateError};
pub use models::*;
pub use reveal::{RevealSink, RevealTarget, Revealer};
pub use wizard::{WizardController, WizardEvent, WizardOutput, WizardSnapshot, WizardStage};
