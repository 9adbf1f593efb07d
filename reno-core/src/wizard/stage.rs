//! Wizard position and the progress figures derived from it.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of question steps.
pub const TOTAL_STEPS: u8 = 5;

/// Where the customer currently is in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStage {
    /// Answering question `n`, 1-based.
    Step(u8),
    /// Looking at the computed estimate.
    Results,
}

impl Default for WizardStage {
    fn default() -> Self {
        WizardStage::Step(1)
    }
}

impl WizardStage {
    /// Step number while answering, clamped to `1..=TOTAL_STEPS`.
    pub fn step_number(&self) -> Option<u8> {
        match self {
            WizardStage::Step(n) => Some((*n).clamp(1, TOTAL_STEPS)),
            WizardStage::Results => None,
        }
    }

    pub fn is_results(&self) -> bool {
        matches!(self, WizardStage::Results)
    }

    /// Steps strictly before the current one; every step once results show.
    pub fn completed_steps(&self) -> BTreeSet<u8> {
        match self.step_number() {
            Some(n) => (1..n).collect(),
            None => (1..=TOTAL_STEPS).collect(),
        }
    }

    /// The step being answered, if any.
    pub fn active_step(&self) -> Option<u8> {
        self.step_number()
    }

    /// Share of the wizard completed, from 0 to 1.
    ///
    /// `(n - 1) / (TOTAL_STEPS - 1)` while answering step `n`, and 1 on the
    /// results screen.
    pub fn completion_fraction(&self) -> Decimal {
        match self.step_number() {
            Some(n) => Decimal::from(n - 1) / Decimal::from(TOTAL_STEPS - 1),
            None => Decimal::ONE,
        }
    }

    /// [`completion_fraction`](Self::completion_fraction) as a percentage.
    pub fn completion_percent(&self) -> Decimal {
        self.completion_fraction() * Decimal::ONE_HUNDRED
    }
}
