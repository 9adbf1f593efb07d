//! Plain-text screens for the terminal wizard.
//!
//! Every function returns a `String`; nothing here touches the terminal.

use std::fmt::Write as _;

use reno_core::wizard::TOTAL_STEPS;
use reno_core::{AnswerSet, PriceEstimate, Question, WizardEvent, WizardSnapshot};
use rust_decimal::Decimal;

use crate::input::{is_selected, options};
use crate::utils::format_range;

pub const HELP: &str = "\
Commands:
  <number>   pick an option (areas: several at once, e.g. 1,3)
  <key>      pick an option by name (e.g. condo, kitchen, modern)
  n          next step
  p          previous step
  s          get your estimate (last step)
  r          start over
  h          show this help
  q          quit";

/// The step indicator, e.g. `[✓][✓][●][ ][ ] 50%`.
pub fn render_progress(snapshot: &WizardSnapshot) -> String {
    let mut line = String::new();
    for step in 1..=TOTAL_STEPS {
        let marker = if snapshot.completed_steps.contains(&step) {
            "✓"
        } else if snapshot.active_step == Some(step) {
            "●"
        } else {
            " "
        };
        line.push('[');
        line.push_str(marker);
        line.push(']');
    }
    let percent = (snapshot.completion_fraction * Decimal::ONE_HUNDRED).round();
    let _ = write!(line, " {percent}%");
    line
}

/// The screen for `question`: progress, prompt, numbered options and the
/// commands available from here.
pub fn render_question(
    question: Question,
    answers: &AnswerSet,
    snapshot: &WizardSnapshot,
) -> String {
    let mut screen = String::new();
    let _ = writeln!(screen, "{}", render_progress(snapshot));
    let _ = writeln!(
        screen,
        "Step {} of {}: {}",
        question.step(),
        TOTAL_STEPS,
        question.label()
    );
    let _ = writeln!(screen, "{}", question.prompt());

    let (open, close) = if question == Question::Areas {
        ('[', ']')
    } else {
        ('(', ')')
    };
    for (index, option) in options(question).iter().enumerate() {
        let mark = if is_selected(answers, question, option.key) {
            'x'
        } else {
            ' '
        };
        let _ = writeln!(
            screen,
            "  {open}{mark}{close} {}. {}",
            index + 1,
            option.label
        );
    }

    screen.push_str(&render_hints(snapshot));
    screen
}

/// The commands that will do something from the current state.
pub fn render_hints(snapshot: &WizardSnapshot) -> String {
    let mut hints = Vec::new();
    if snapshot.can_go_previous {
        hints.push("p: previous");
    }
    if snapshot.can_go_next {
        hints.push("n: next");
    }
    if snapshot.is_submit_enabled {
        hints.push("s: get estimate");
    }
    hints.push("r: restart");
    hints.push("h: help");
    hints.push("q: quit");
    hints.join("  ")
}

/// Shown when a step is left unanswered.
pub fn render_feedback(question: Question) -> String {
    format!(
        "Please answer step {} ({}) before continuing.",
        question.step(),
        question.label()
    )
}

/// Explains why `event` did nothing.
pub fn render_ignored(
    event: WizardEvent,
    snapshot: &WizardSnapshot,
) -> String {
    if snapshot.stage.is_results() {
        return "Your estimate is shown above. Type r to start over or q to quit.".to_string();
    }
    match event {
        WizardEvent::Next => "This is the last step. Type s to get your estimate.".to_string(),
        WizardEvent::Previous => "This is the first step.".to_string(),
        WizardEvent::Submit => {
            format!("Answer all {TOTAL_STEPS} steps first. Type n to move on.")
        }
        _ => "Nothing to change here.".to_string(),
    }
}

/// One frame of the range line while the bounds count up.
pub fn render_range(
    min: Decimal,
    max: Decimal,
) -> String {
    format!("Estimated cost: {}", format_range(min, max))
}

/// The answer summary printed under the final range.
pub fn render_breakdown(estimate: &PriceEstimate) -> String {
    let width = estimate
        .breakdown
        .iter()
        .map(|item| item.label.len())
        .max()
        .unwrap_or(0);

    let mut text = String::from("Your selections:\n");
    for item in &estimate.breakdown {
        let _ = writeln!(text, "  {:<width$}  {}", item.label, item.value);
    }
    text.push_str("This is an estimate only; a site visit confirms the final quote.\n");
    text.push_str("r: start over  q: quit");
    text
}
