//! The customer's accumulated answers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::area::{AreaSelection, AreaTag};
use super::finish::{RenovationType, Style};
use super::property::{PropertySize, PropertyType};

/// One question of the questionnaire. Each question owns exactly one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Question {
    PropertyType,
    PropertySize,
    Areas,
    RenovationType,
    Style,
}

impl Question {
    /// Questions in the order they are asked.
    pub const ALL: [Question; 5] = [
        Question::PropertyType,
        Question::PropertySize,
        Question::Areas,
        Question::RenovationType,
        Question::Style,
    ];

    /// 1-based step number that asks this question.
    pub fn step(&self) -> u8 {
        match self {
            Question::PropertyType => 1,
            Question::PropertySize => 2,
            Question::Areas => 3,
            Question::RenovationType => 4,
            Question::Style => 5,
        }
    }

    /// The question asked at `step`, if `step` is in range.
    pub fn for_step(step: u8) -> Option<Question> {
        Question::ALL.iter().copied().find(|q| q.step() == step)
    }

    /// Breakdown label.
    pub fn label(&self) -> &'static str {
        match self {
            Question::PropertyType => "Property Type",
            Question::PropertySize => "Property Size",
            Question::Areas => "Areas",
            Question::RenovationType => "Renovation Type",
            Question::Style => "Style",
        }
    }

    /// Prompt shown above the options.
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::PropertyType => "What type of property is it?",
            Question::PropertySize => "How big is the property?",
            Question::Areas => "Which areas need work? (pick one or more)",
            Question::RenovationType => "What kind of renovation?",
            Question::Style => "Which design style do you prefer?",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single-valued answer. Areas are multi-valued and change through
/// [`AnswerSet::toggle_area`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    PropertyType(PropertyType),
    PropertySize(PropertySize),
    RenovationType(RenovationType),
    Style(Style),
}

impl Answer {
    pub fn question(&self) -> Question {
        match self {
            Answer::PropertyType(_) => Question::PropertyType,
            Answer::PropertySize(_) => Question::PropertySize,
            Answer::RenovationType(_) => Question::RenovationType,
            Answer::Style(_) => Question::Style,
        }
    }
}

/// Returned when an answer set is used for pricing before every question
/// has been answered.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("answer set is incomplete: '{question}' has not been answered")]
pub struct IncompleteAnswers {
    pub question: Question,
}

/// Answers collected so far. Every field starts unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    property_type: Option<PropertyType>,
    property_size: Option<PropertySize>,
    areas: AreaSelection,
    renovation_type: Option<RenovationType>,
    style: Option<Style>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_type(&self) -> Option<PropertyType> {
        self.property_type
    }

    pub fn property_size(&self) -> Option<PropertySize> {
        self.property_size
    }

    pub fn areas(&self) -> &AreaSelection {
        &self.areas
    }

    pub fn renovation_type(&self) -> Option<RenovationType> {
        self.renovation_type
    }

    pub fn style(&self) -> Option<Style> {
        self.style
    }

    /// Records a single-valued answer, replacing any earlier choice.
    pub fn set(
        &mut self,
        answer: Answer,
    ) {
        match answer {
            Answer::PropertyType(value) => self.property_type = Some(value),
            Answer::PropertySize(value) => self.property_size = Some(value),
            Answer::RenovationType(value) => self.renovation_type = Some(value),
            Answer::Style(value) => self.style = Some(value),
        }
    }

    /// Flips an area tag, returning whether it is selected afterwards.
    /// See [`AreaSelection::select`] for the whole-house rule.
    pub fn toggle_area(
        &mut self,
        tag: AreaTag,
    ) -> bool {
        self.areas.toggle(tag)
    }

    pub fn select_area(
        &mut self,
        tag: AreaTag,
    ) {
        self.areas.select(tag);
    }

    pub fn deselect_area(
        &mut self,
        tag: AreaTag,
    ) {
        self.areas.deselect(tag);
    }

    /// Forgets every answer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_answered(
        &self,
        question: Question,
    ) -> bool {
        match question {
            Question::PropertyType => self.property_type.is_some(),
            Question::PropertySize => self.property_size.is_some(),
            Question::Areas => !self.areas.is_empty(),
            Question::RenovationType => self.renovation_type.is_some(),
            Question::Style => self.style.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Question::ALL.iter().all(|q| !self.is_answered(*q))
    }

    /// The earliest question still without an answer.
    pub fn first_unanswered(&self) -> Option<Question> {
        Question::ALL.iter().copied().find(|q| !self.is_answered(*q))
    }

    /// Freezes the answers for pricing.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteAnswers`] naming the earliest unanswered question.
    pub fn complete(&self) -> Result<CompletedAnswers, IncompleteAnswers> {
        let missing = |question| IncompleteAnswers { question };

        let property_type = self
            .property_type
            .ok_or_else(|| missing(Question::PropertyType))?;
        let property_size = self
            .property_size
            .ok_or_else(|| missing(Question::PropertySize))?;
        if self.areas.is_empty() {
            return Err(missing(Question::Areas));
        }
        let renovation_type = self
            .renovation_type
            .ok_or_else(|| missing(Question::RenovationType))?;
        let style = self.style.ok_or_else(|| missing(Question::Style))?;

        Ok(CompletedAnswers {
            property_type,
            property_size,
            areas: self.areas.clone(),
            renovation_type,
            style,
        })
    }
}

/// A fully answered questionnaire. Only obtainable through
/// [`AnswerSet::complete`], so the area selection is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedAnswers {
    property_type: PropertyType,
    property_size: PropertySize,
    areas: AreaSelection,
    renovation_type: RenovationType,
    style: Style,
}

impl CompletedAnswers {
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn property_size(&self) -> PropertySize {
        self.property_size
    }

    pub fn areas(&self) -> &AreaSelection {
        &self.areas
    }

    pub fn renovation_type(&self) -> RenovationType {
        self.renovation_type
    }

    pub fn style(&self) -> Style {
        self.style
    }
}
