//! Step sequencing for the cost estimation wizard.
//!
//! [`WizardController`] owns one customer's answers and position. The host UI
//! feeds it [`WizardEvent`]s and renders the [`WizardOutput`] that comes back.
//! Nothing here is global; each controller is independent.
//!
//! ```text
//!            Next (valid)          Next (valid)                Submit (valid)
//!   Step(1) ─────────────▶ Step(2) ─────────────▶ … Step(5) ─────────────────▶ Results
//!      ▲     ◀─────────────        ◀─────────────                                 │
//!      │         Previous              Previous                                   │
//!      └───────────────────────────── Restart (from anywhere) ◀───────────────────┘
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::stage::{TOTAL_STEPS, WizardStage};
use crate::calculations::CostEstimator;
use crate::models::{Answer, AnswerSet, AreaTag, PriceEstimate, PricingTable, Question};

/// Discrete actions from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Select(Answer),
    ToggleArea(AreaTag),
    Next,
    Previous,
    Submit,
    Restart,
}

/// Everything the host UI needs to draw the wizard chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot {
    pub stage: WizardStage,
    pub completed_steps: BTreeSet<u8>,
    pub active_step: Option<u8>,
    pub completion_fraction: Decimal,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub is_submit_enabled: bool,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutput {
    /// State or answers changed.
    Updated(WizardSnapshot),
    /// The move was refused because `question` (asked at `step`) has no
    /// answer yet. State is unchanged; the UI should flag the step briefly.
    Invalid {
        step: u8,
        question: Question,
        snapshot: WizardSnapshot,
    },
    /// The event does not apply in the current state.
    Ignored(WizardSnapshot),
    /// The answers were priced and the results screen is showing.
    Completed {
        snapshot: WizardSnapshot,
        estimate: PriceEstimate,
    },
}

impl WizardOutput {
    pub fn snapshot(&self) -> &WizardSnapshot {
        match self {
            WizardOutput::Updated(snapshot) | WizardOutput::Ignored(snapshot) => snapshot,
            WizardOutput::Invalid { snapshot, .. } | WizardOutput::Completed { snapshot, .. } => {
                snapshot
            }
        }
    }
}

/// State container for one run through the wizard.
#[derive(Debug, Clone)]
pub struct WizardController {
    table: Arc<PricingTable>,
    stage: WizardStage,
    answers: AnswerSet,
    estimate: Option<PriceEstimate>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Arc::new(PricingTable::standard()))
    }
}

impl WizardController {
    /// Starts a wizard at step 1 priced with `table`.
    pub fn new(table: Arc<PricingTable>) -> Self {
        Self {
            table,
            stage: WizardStage::default(),
            answers: AnswerSet::new(),
            estimate: None,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Estimate from the last successful submission, until restart.
    pub fn last_estimate(&self) -> Option<&PriceEstimate> {
        self.estimate.as_ref()
    }

    /// The question on screen, if the wizard is not showing results.
    pub fn current_question(&self) -> Option<Question> {
        self.stage.step_number().and_then(Question::for_step)
    }

    /// Whether `step` has been answered well enough to leave it.
    pub fn validate(
        &self,
        step: u8,
    ) -> bool {
        Question::for_step(step).is_some_and(|question| self.answers.is_answered(question))
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let step = self.stage.step_number();
        let step_is_valid = step.is_some_and(|n| self.validate(n));

        WizardSnapshot {
            stage: self.stage,
            completed_steps: self.stage.completed_steps(),
            active_step: self.stage.active_step(),
            completion_fraction: self.stage.completion_fraction(),
            can_go_next: step.is_some_and(|n| n < TOTAL_STEPS) && step_is_valid,
            can_go_previous: step.is_some_and(|n| n > 1),
            is_submit_enabled: step == Some(TOTAL_STEPS) && step_is_valid,
        }
    }

    pub fn handle(
        &mut self,
        event: WizardEvent,
    ) -> WizardOutput {
        debug!(?event, stage = ?self.stage, "wizard event");
        match event {
            WizardEvent::Select(answer) => self.select(answer),
            WizardEvent::ToggleArea(tag) => self.toggle_area(tag),
            WizardEvent::Next => self.next(),
            WizardEvent::Previous => self.previous(),
            WizardEvent::Submit => self.submit(),
            WizardEvent::Restart => self.restart(),
        }
    }

    /// Records a single-valued answer. Ignored while results are showing.
    pub fn select(
        &mut self,
        answer: Answer,
    ) -> WizardOutput {
        if self.stage.is_results() {
            return WizardOutput::Ignored(self.snapshot());
        }
        self.answers.set(answer);
        WizardOutput::Updated(self.snapshot())
    }

    /// Flips an area tag, keeping "whole house" exclusive of rooms.
    /// Ignored while results are showing.
    pub fn toggle_area(
        &mut self,
        tag: AreaTag,
    ) -> WizardOutput {
        if self.stage.is_results() {
            return WizardOutput::Ignored(self.snapshot());
        }
        let selected = self.answers.toggle_area(tag);
        debug!(tag = tag.as_str(), selected, "area toggled");
        WizardOutput::Updated(self.snapshot())
    }

    /// Moves forward one step once the current step is answered.
    pub fn next(&mut self) -> WizardOutput {
        let step = match self.stage.step_number() {
            Some(n) if n < TOTAL_STEPS => n,
            _ => return WizardOutput::Ignored(self.snapshot()),
        };

        if let Some(rejected) = self.reject_unanswered(step) {
            return rejected;
        }

        self.stage = WizardStage::Step(step + 1);
        WizardOutput::Updated(self.snapshot())
    }

    /// Moves back one step. Never validates.
    pub fn previous(&mut self) -> WizardOutput {
        match self.stage.step_number() {
            Some(n) if n > 1 => {
                self.stage = WizardStage::Step(n - 1);
                WizardOutput::Updated(self.snapshot())
            }
            _ => WizardOutput::Ignored(self.snapshot()),
        }
    }

    /// Prices the answers and shows the results. Only available on the last
    /// step.
    pub fn submit(&mut self) -> WizardOutput {
        if self.stage.step_number() != Some(TOTAL_STEPS) {
            return WizardOutput::Ignored(self.snapshot());
        }

        if let Some(rejected) = self.reject_unanswered(TOTAL_STEPS) {
            return rejected;
        }

        // Earlier answers can be withdrawn after their step was passed.
        let completed = match self.answers.complete() {
            Ok(completed) => completed,
            Err(incomplete) => {
                return self.invalid(incomplete.question);
            }
        };

        let estimate = CostEstimator::new(&self.table).estimate_completed(&completed);
        info!(min = %estimate.min, max = %estimate.max, "estimate submitted");

        self.estimate = Some(estimate.clone());
        self.stage = WizardStage::Results;
        WizardOutput::Completed {
            snapshot: self.snapshot(),
            estimate,
        }
    }

    /// Clears every answer and returns to step 1.
    pub fn restart(&mut self) -> WizardOutput {
        self.answers.clear();
        self.estimate = None;
        self.stage = WizardStage::default();
        info!("wizard restarted");
        WizardOutput::Updated(self.snapshot())
    }

    fn reject_unanswered(
        &self,
        step: u8,
    ) -> Option<WizardOutput> {
        if self.validate(step) {
            return None;
        }
        Question::for_step(step).map(|question| self.invalid(question))
    }

    fn invalid(
        &self,
        question: Question,
    ) -> WizardOutput {
        debug!(step = question.step(), ?question, "step is not answered");
        WizardOutput::Invalid {
            step: question.step(),
            question,
            snapshot: self.snapshot(),
        }
    }
}
