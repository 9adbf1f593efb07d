use std::fs::File;
use std::io::Read;
use std::path::Path;

use reno_core::{
    Area, Choice, PricingTable, PricingTableBuilder, PricingTableError, PropertySize,
    PropertyType, RenovationType, Style, TableKind, WHOLE_HOUSE_KEY,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when loading a pricing table.
///
/// Row numbers count data rows from 1; the header is not counted.
#[derive(Debug, Error)]
pub enum PricingTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to read pricing file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown table '{table}' on row {row}")]
    UnknownTable { table: String, row: usize },

    #[error("Unknown {table} key '{key}' on row {row}")]
    UnknownKey {
        table: TableKind,
        key: String,
        row: usize,
    },

    #[error("{table} '{key}' on row {row} needs a value in the '{column}' column")]
    MissingColumn {
        table: TableKind,
        key: String,
        column: &'static str,
        row: usize,
    },

    #[error("Invalid pricing table: {0}")]
    Table(#[from] PricingTableError),
}

impl From<csv::Error> for PricingTableLoaderError {
    fn from(err: csv::Error) -> Self {
        PricingTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a pricing CSV file.
///
/// - `table`: one of `property_type`, `property_size`, `room`,
///   `renovation_type`, `style`
/// - `key`: the option key within that table (e.g. `condo`, `kitchen`)
/// - `amount`: a Ringgit amount; the base cost for sizes, the flat cost for
///   rooms, empty otherwise
/// - `multiplier`: a factor for every table except `room`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PricingRecord {
    pub table: String,
    pub key: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub multiplier: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl PricingRecord {
    fn parse_key<K: Choice>(
        &self,
        table: TableKind,
        row: usize,
    ) -> Result<K, PricingTableLoaderError> {
        K::parse(&self.key).ok_or_else(|| PricingTableLoaderError::UnknownKey {
            table,
            key: self.key.clone(),
            row,
        })
    }

    fn required(
        &self,
        table: TableKind,
        column: &'static str,
        value: Option<Decimal>,
        row: usize,
    ) -> Result<Decimal, PricingTableLoaderError> {
        value.ok_or_else(|| PricingTableLoaderError::MissingColumn {
            table,
            key: self.key.clone(),
            column,
            row,
        })
    }

    fn amount(
        &self,
        table: TableKind,
        row: usize,
    ) -> Result<Decimal, PricingTableLoaderError> {
        self.required(table, "amount", self.amount, row)
    }

    fn multiplier(
        &self,
        table: TableKind,
        row: usize,
    ) -> Result<Decimal, PricingTableLoaderError> {
        self.required(table, "multiplier", self.multiplier, row)
    }
}

/// Loader for pricing tables stored as CSV.
///
/// Every multiplier table must list every option exactly once. The room table
/// may leave rooms out; the estimator prices those at zero. A `room` row for
/// the whole house is skipped, since that cost is always derived from the
/// individual rooms.
pub struct PricingTableLoader;

impl PricingTableLoader {
    /// Parse pricing records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PricingRecord>, PricingTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PricingRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble a [`PricingTable`] from parsed records.
    ///
    /// # Errors
    ///
    /// * [`PricingTableLoaderError::UnknownTable`] or
    ///   [`PricingTableLoaderError::UnknownKey`] for rows naming something
    ///   the estimator does not know.
    /// * [`PricingTableLoaderError::MissingColumn`] when a row lacks the
    ///   amount or multiplier its table needs.
    /// * [`PricingTableLoaderError::Table`] when the rates do not form a
    ///   valid table (duplicates, gaps, negative values).
    pub fn build(records: &[PricingRecord]) -> Result<PricingTable, PricingTableLoaderError> {
        let mut builder = PricingTable::builder();

        for (index, record) in records.iter().enumerate() {
            builder = Self::apply(builder, record, index + 1)?;
        }

        let table = builder.build()?;
        info!(rows = records.len(), rooms = table.room_costs().count(), "pricing table loaded");
        Ok(table)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<PricingTable, PricingTableLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }

    /// Load a pricing table from a CSV file on disk.
    pub fn load_from_path(path: &Path) -> Result<PricingTable, PricingTableLoaderError> {
        let file = File::open(path)?;
        Self::load(file)
    }

    fn apply(
        builder: PricingTableBuilder,
        record: &PricingRecord,
        row: usize,
    ) -> Result<PricingTableBuilder, PricingTableLoaderError> {
        let table =
            TableKind::parse(&record.table).ok_or_else(|| PricingTableLoaderError::UnknownTable {
                table: record.table.clone(),
                row,
            })?;

        let builder = match table {
            TableKind::PropertyType => builder.property_type(
                record.parse_key::<PropertyType>(table, row)?,
                record.multiplier(table, row)?,
            ),
            TableKind::PropertySize => builder.property_size(
                record.parse_key::<PropertySize>(table, row)?,
                record.amount(table, row)?,
                record.multiplier(table, row)?,
            ),
            TableKind::Room if record.key.eq_ignore_ascii_case(WHOLE_HOUSE_KEY) => {
                warn!(row, "whole house cost is derived from room costs; row ignored");
                builder
            }
            TableKind::Room => builder.room(
                record.parse_key::<Area>(table, row)?,
                record.amount(table, row)?,
            ),
            TableKind::RenovationType => builder.renovation(
                record.parse_key::<RenovationType>(table, row)?,
                record.multiplier(table, row)?,
            ),
            TableKind::Style => builder.style(
                record.parse_key::<Style>(table, row)?,
                record.multiplier(table, row)?,
            ),
        };

        Ok(builder)
    }
}
