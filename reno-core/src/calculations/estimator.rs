//! Renovation cost estimate.
//!
//! Turns a completed questionnaire into a price range using a
//! [`PricingTable`]. The calculation runs in this order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base cost: base amount of the property size |
//! | 2    | Base cost × property type multiplier |
//! | 3    | Area cost: sum of selected room costs, or every room × 0.85 for the whole house |
//! | 4    | Area cost × property size multiplier |
//! | 5    | Subtotal: (base + area) × renovation multiplier × style multiplier |
//! | 6    | Upper bound: subtotal × 1.25 |
//! | 7    | Both bounds rounded to the nearest 1,000 |
//!
//! Rounding happens once, at step 7. The upper bound is taken from the
//! unrounded subtotal.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reno_core::calculations::CostEstimator;
//! use reno_core::models::*;
//!
//! let mut answers = AnswerSet::new();
//! answers.set(Answer::PropertyType(PropertyType::Condo));
//! answers.set(Answer::PropertySize(PropertySize::Medium));
//! answers.toggle_area(AreaTag::Room(Area::Living));
//! answers.toggle_area(AreaTag::Room(Area::Kitchen));
//! answers.set(Answer::RenovationType(RenovationType::Full));
//! answers.set(Answer::Style(Style::Modern));
//!
//! let table = PricingTable::standard();
//! let estimate = CostEstimator::new(&table).estimate(&answers).unwrap();
//!
//! assert_eq!(estimate.min, dec!(51000));
//! assert_eq!(estimate.max, dec!(64000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::calculations::common::round_to_nearest_thousand;
use crate::models::{
    AnswerSet, AreaSelection, BreakdownItem, Choice, CompletedAnswers, IncompleteAnswers,
    PriceEstimate, PricingTable, Question,
};

/// Discount applied when the whole house is renovated as one job.
pub const WHOLE_HOUSE_DISCOUNT: Decimal = dec!(0.85);

/// Ratio of the upper bound to the lower bound of the range.
pub const UPPER_RANGE_FACTOR: Decimal = dec!(1.25);

/// Errors that can occur while estimating.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// The caller asked for a price before every question was answered.
    /// This is a caller bug; the wizard only submits complete answers.
    #[error(transparent)]
    IncompleteAnswers(#[from] IncompleteAnswers),
}

/// Calculator for renovation cost estimates.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    table: &'a PricingTable,
}

impl<'a> CostEstimator<'a> {
    pub fn new(table: &'a PricingTable) -> Self {
        Self { table }
    }

    /// Estimates the price range for `answers`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::IncompleteAnswers`] when any question is
    /// unanswered. No default is substituted for a missing answer.
    pub fn estimate(
        &self,
        answers: &AnswerSet,
    ) -> Result<PriceEstimate, EstimateError> {
        let completed = answers.complete().map_err(|err| {
            error!(question = ?err.question, "estimate requested for incomplete answers");
            EstimateError::from(err)
        })?;

        Ok(self.estimate_completed(&completed))
    }

    /// Estimates the price range for answers already known to be complete.
    pub fn estimate_completed(
        &self,
        answers: &CompletedAnswers,
    ) -> PriceEstimate {
        let size = self.table.size_rate(answers.property_size());

        let base = self.base_cost(
            size.base,
            self.table.property_type_multiplier(answers.property_type()),
        );
        let area_cost = self.scaled_area_cost(self.area_cost(answers.areas()), size.multiplier);
        let subtotal = self.subtotal(
            base,
            area_cost,
            self.table.renovation_multiplier(answers.renovation_type()),
            self.table.style_multiplier(answers.style()),
        );
        let upper = self.upper_bound(subtotal);

        debug!(%base, %area_cost, %subtotal, %upper, "estimated renovation cost");

        PriceEstimate {
            min: round_to_nearest_thousand(subtotal),
            max: round_to_nearest_thousand(upper),
            breakdown: self.breakdown(answers),
        }
    }

    /// Base cost scaled by the property type.
    fn base_cost(
        &self,
        size_base: Decimal,
        property_type_multiplier: Decimal,
    ) -> Decimal {
        size_base * property_type_multiplier
    }

    /// Unscaled cost of the selected areas.
    ///
    /// Rooms absent from the pricing table cost nothing. The whole house is
    /// the discounted sum of every room the table prices.
    fn area_cost(
        &self,
        areas: &AreaSelection,
    ) -> Decimal {
        match areas {
            AreaSelection::WholeHouse => {
                let every_room: Decimal = self.table.room_costs().map(|(_, cost)| cost).sum();
                every_room * WHOLE_HOUSE_DISCOUNT
            }
            AreaSelection::Rooms(rooms) => rooms
                .iter()
                .map(|area| {
                    self.table.room_cost(*area).unwrap_or_else(|| {
                        warn!(room = area.as_str(), "room has no price; counting it as zero");
                        Decimal::ZERO
                    })
                })
                .sum(),
        }
    }

    /// Area cost scaled by the property size.
    fn scaled_area_cost(
        &self,
        area_cost: Decimal,
        size_multiplier: Decimal,
    ) -> Decimal {
        area_cost * size_multiplier
    }

    /// Unrounded lower bound.
    fn subtotal(
        &self,
        base: Decimal,
        area_cost: Decimal,
        renovation_multiplier: Decimal,
        style_multiplier: Decimal,
    ) -> Decimal {
        (base + area_cost) * renovation_multiplier * style_multiplier
    }

    /// Unrounded upper bound.
    fn upper_bound(
        &self,
        subtotal: Decimal,
    ) -> Decimal {
        subtotal * UPPER_RANGE_FACTOR
    }

    fn breakdown(
        &self,
        answers: &CompletedAnswers,
    ) -> Vec<BreakdownItem> {
        Question::ALL
            .iter()
            .map(|question| {
                let value = match question {
                    Question::PropertyType => answers.property_type().label().to_string(),
                    Question::PropertySize => answers.property_size().label().to_string(),
                    Question::Areas => answers.areas().describe(),
                    Question::RenovationType => answers.renovation_type().label().to_string(),
                    Question::Style => answers.style().label().to_string(),
                };
                BreakdownItem {
                    label: question.label().to_string(),
                    value,
                }
            })
            .collect()
    }
}
