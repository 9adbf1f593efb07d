//! Integration tests for loading the shipped pricing table.

use pretty_assertions::assert_eq;
use reno_core::{
    Answer, AnswerSet, Area, AreaTag, CostEstimator, PricingTable, PropertySize, PropertyType,
    RenovationType, Style,
};
use reno_data::{PricingTableLoader, PricingTableLoaderError};
use rust_decimal_macros::dec;

const STANDARD_CSV: &str = include_str!("../../pricing/standard.csv");
const PARTIAL_ROOMS_CSV: &str = include_str!("fixtures/partial_rooms.csv");

fn living_and_kitchen_condo() -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.set(Answer::PropertyType(PropertyType::Condo));
    answers.set(Answer::PropertySize(PropertySize::Medium));
    answers.toggle_area(AreaTag::Room(Area::Living));
    answers.toggle_area(AreaTag::Room(Area::Kitchen));
    answers.set(Answer::RenovationType(RenovationType::Full));
    answers.set(Answer::Style(Style::Modern));
    answers
}

#[test]
fn test_standard_csv_matches_built_in_table() {
    let table = PricingTableLoader::load(STANDARD_CSV.as_bytes()).expect("Failed to load");

    assert_eq!(table, PricingTable::standard());
}

#[test]
fn test_standard_csv_has_one_row_per_option() {
    let records = PricingTableLoader::parse(STANDARD_CSV.as_bytes()).expect("Failed to parse");

    assert_eq!(records.len(), 23);
}

#[test]
fn test_estimate_with_loaded_table() {
    let table = PricingTableLoader::load(STANDARD_CSV.as_bytes()).expect("Failed to load");

    let estimate = CostEstimator::new(&table)
        .estimate(&living_and_kitchen_condo())
        .expect("Failed to estimate");

    assert_eq!(estimate.min, dec!(51000));
    assert_eq!(estimate.max, dec!(64000));
}

#[test]
fn test_missing_room_is_priced_at_zero() {
    let table = PricingTableLoader::load(PARTIAL_ROOMS_CSV.as_bytes()).expect("Failed to load");

    let estimate = CostEstimator::new(&table)
        .estimate(&living_and_kitchen_condo())
        .expect("Failed to estimate");

    // (25000 + 8000 x 1.3) x 1.0 x 1.0 = 35400
    assert_eq!(table.room_cost(Area::Kitchen), None);
    assert_eq!(estimate.min, dec!(35000));
    assert_eq!(estimate.max, dec!(44000));
}

#[test]
fn test_load_from_path() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../pricing/standard.csv");

    let table = PricingTableLoader::load_from_path(&path).expect("Failed to load");

    assert_eq!(table, PricingTable::standard());
}

#[test]
fn test_missing_style_row_is_rejected() {
    let csv = STANDARD_CSV.replace("style,classic,,1.2\n", "");

    let err = PricingTableLoader::load(csv.as_bytes()).expect_err("Should fail");

    assert!(matches!(err, PricingTableLoaderError::Table(_)));
    assert_eq!(
        err.to_string(),
        "Invalid pricing table: style table has no rate for 'classic'"
    );
}
