mod answer_set;
mod area;
mod choice;
mod finish;
mod price_estimate;
mod pricing_table;
mod property;

pub use answer_set::{Answer, AnswerSet, CompletedAnswers, IncompleteAnswers, Question};
pub use area::{Area, AreaSelection, AreaTag, WHOLE_HOUSE_KEY, WHOLE_HOUSE_LABEL};
pub use choice::{Choice, UnknownChoice};
pub use finish::{RenovationType, Style};
pub use price_estimate::{BreakdownItem, PriceEstimate};
pub use pricing_table::{
    PricingTable, PricingTableBuilder, PricingTableError, RateTable, SizeRate, TableKind,
};
pub use property::{PropertySize, PropertyType};
