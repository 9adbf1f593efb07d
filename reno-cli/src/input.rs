//! Turning a line of user input into wizard events.
//!
//! | Input            | Meaning                                   |
//! |------------------|-------------------------------------------|
//! | `2`              | pick option 2 of the current question     |
//! | `condo`, `semi-d`| pick an option by its key                 |
//! | `1,3` or `1 3`   | toggle several areas (areas step only)    |
//! | `n` / `next`     | next step                                 |
//! | `p` / `back`     | previous step                             |
//! | `s` / `submit`   | get the estimate (last step only)         |
//! | `r` / `restart`  | start over                                |
//! | `h` / `?`        | show help                                 |
//! | `q` / `quit`     | leave                                     |

use reno_core::{
    Answer, AnswerSet, AreaTag, Choice, PropertySize, PropertyType, Question, RenovationType,
    Style, WizardEvent,
};
use thiserror::Error;

/// One selectable option of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Answer changes, applied in order.
    Answer(Vec<WizardEvent>),
    Next,
    Previous,
    Submit,
    Restart,
    Help,
    Quit,
}

/// Errors that can occur when reading a line of input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAnswerError {
    #[error("Type an option number or a command (h for help).")]
    Empty,

    #[error("'{input}' is not a command here. Type r to start over or q to quit.")]
    NoQuestion { input: String },

    #[error("'{input}' is not an option for {question}.")]
    UnknownOption { question: Question, input: String },

    #[error("Option {number} does not exist; {question} has options 1 to {count}.")]
    OutOfRange {
        question: Question,
        number: usize,
        count: usize,
    },

    #[error("{question} takes a single answer.")]
    SingleAnswerOnly { question: Question },
}

fn choice_options<C: Choice>() -> Vec<QuestionOption> {
    C::ALL
        .iter()
        .map(|choice| QuestionOption {
            key: choice.as_str(),
            label: choice.label(),
        })
        .collect()
}

/// The options of `question`, in display order.
pub fn options(question: Question) -> Vec<QuestionOption> {
    match question {
        Question::PropertyType => choice_options::<PropertyType>(),
        Question::PropertySize => choice_options::<PropertySize>(),
        Question::Areas => AreaTag::all()
            .into_iter()
            .map(|tag| QuestionOption {
                key: tag.as_str(),
                label: tag.label(),
            })
            .collect(),
        Question::RenovationType => choice_options::<RenovationType>(),
        Question::Style => choice_options::<Style>(),
    }
}

/// Whether the option keyed `key` is part of the current answers.
pub fn is_selected(
    answers: &AnswerSet,
    question: Question,
    key: &str,
) -> bool {
    match question {
        Question::PropertyType => answers.property_type().is_some_and(|v| v.as_str() == key),
        Question::PropertySize => answers.property_size().is_some_and(|v| v.as_str() == key),
        Question::Areas => AreaTag::parse(key).is_some_and(|tag| answers.areas().contains(tag)),
        Question::RenovationType => answers.renovation_type().is_some_and(|v| v.as_str() == key),
        Question::Style => answers.style().is_some_and(|v| v.as_str() == key),
    }
}

/// Maps an option key (or alias) of `question` to the event that picks it.
fn event_for(
    question: Question,
    key: &str,
) -> Option<WizardEvent> {
    let answer = match question {
        Question::PropertyType => PropertyType::parse(key).map(Answer::PropertyType),
        Question::PropertySize => PropertySize::parse(key).map(Answer::PropertySize),
        Question::Areas => return AreaTag::parse(key).map(WizardEvent::ToggleArea),
        Question::RenovationType => RenovationType::parse(key).map(Answer::RenovationType),
        Question::Style => Style::parse(key).map(Answer::Style),
    };
    answer.map(WizardEvent::Select)
}

fn parse_option(
    question: Question,
    token: &str,
) -> Result<WizardEvent, ParseAnswerError> {
    if let Ok(number) = token.parse::<usize>() {
        let available = options(question);
        let option = number
            .checked_sub(1)
            .and_then(|index| available.get(index))
            .ok_or(ParseAnswerError::OutOfRange {
                question,
                number,
                count: available.len(),
            })?;
        return event_for(question, option.key).ok_or_else(|| ParseAnswerError::UnknownOption {
            question,
            input: token.to_string(),
        });
    }

    event_for(question, token).ok_or_else(|| ParseAnswerError::UnknownOption {
        question,
        input: token.to_string(),
    })
}

/// Parses one line of input.
///
/// `question` is the question on screen, or `None` while results are shown.
///
/// # Errors
///
/// Returns a [`ParseAnswerError`] describing what was wrong with the input.
pub fn parse_command(
    line: &str,
    question: Option<Question>,
) -> Result<Command, ParseAnswerError> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Err(ParseAnswerError::Empty),
        "n" | "next" => return Ok(Command::Next),
        "p" | "prev" | "previous" | "back" => return Ok(Command::Previous),
        "s" | "submit" => return Ok(Command::Submit),
        "r" | "restart" => return Ok(Command::Restart),
        "h" | "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let Some(question) = question else {
        return Err(ParseAnswerError::NoQuestion {
            input: trimmed.to_string(),
        });
    };

    let tokens: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() > 1 && question != Question::Areas {
        return Err(ParseAnswerError::SingleAnswerOnly { question });
    }

    let events = tokens
        .into_iter()
        .map(|token| parse_option(question, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Command::Answer(events))
}
