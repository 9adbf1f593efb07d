//! Static pricing configuration.
//!
//! A [`PricingTable`] is built once, either from [`PricingTable::standard`]
//! or through [`PricingTableBuilder`], and never changes afterwards. The four
//! multiplier tables are total: every enumeration value has a rate, checked
//! when the table is built. The room-cost table may be partial; rooms it
//! omits are priced at zero by the estimator.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::area::Area;
use super::choice::Choice;
use super::finish::{RenovationType, Style};
use super::property::{PropertySize, PropertyType};

/// Identifies one of the five tables inside a [`PricingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    PropertyType,
    PropertySize,
    Room,
    RenovationType,
    Style,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::PropertyType,
        TableKind::PropertySize,
        TableKind::Room,
        TableKind::RenovationType,
        TableKind::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::PropertyType => "property_type",
            TableKind::PropertySize => "property_size",
            TableKind::Room => "room",
            TableKind::RenovationType => "renovation_type",
            TableKind::Style => "style",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        TableKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for TableKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while assembling a [`PricingTable`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingTableError {
    /// A multiplier table has no rate for one of its keys.
    #[error("{table} table has no rate for '{key}'")]
    MissingRate { table: TableKind, key: &'static str },

    /// The same key was given twice for one table.
    #[error("{table} table has more than one rate for '{key}'")]
    DuplicateRate { table: TableKind, key: &'static str },

    /// Amounts and multipliers must be zero or positive.
    #[error("{table} rate for '{key}' is negative ({value})")]
    NegativeRate {
        table: TableKind,
        key: &'static str,
        value: Decimal,
    },
}

/// Base amount and area-cost multiplier for one property size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRate {
    pub base: Decimal,
    pub multiplier: Decimal,
}

/// A rate for every value of `K`, indexed by [`Choice::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable<K: Choice, V> {
    values: Vec<V>,
    _keys: PhantomData<K>,
}

impl<K: Choice, V> RateTable<K, V> {
    /// Builds a table by asking `rate` for every key.
    pub fn total(rate: impl Fn(K) -> V) -> Self {
        Self {
            values: K::ALL.iter().map(|key| rate(*key)).collect(),
            _keys: PhantomData,
        }
    }

    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// * [`PricingTableError::DuplicateRate`] if a key appears twice.
    /// * [`PricingTableError::MissingRate`] if a key does not appear.
    pub fn from_entries(
        table: TableKind,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, PricingTableError> {
        let mut slots: Vec<Option<V>> = K::ALL.iter().map(|_| None).collect();

        for (key, value) in entries {
            let slot = &mut slots[key.index()];
            if slot.is_some() {
                return Err(PricingTableError::DuplicateRate {
                    table,
                    key: key.as_str(),
                });
            }
            *slot = Some(value);
        }

        let values = slots
            .into_iter()
            .zip(K::ALL)
            .map(|(slot, key)| {
                slot.ok_or(PricingTableError::MissingRate {
                    table,
                    key: key.as_str(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            values,
            _keys: PhantomData,
        })
    }

    pub fn get(
        &self,
        key: K,
    ) -> &V {
        &self.values[key.index()]
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        K::ALL.iter().copied().zip(self.values.iter())
    }
}

/// Process-wide pricing configuration, in Ringgit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    property_types: RateTable<PropertyType, Decimal>,
    sizes: RateTable<PropertySize, SizeRate>,
    rooms: BTreeMap<Area, Decimal>,
    renovations: RateTable<RenovationType, Decimal>,
    styles: RateTable<Style, Decimal>,
}

impl PricingTable {
    /// The rates published on the company site.
    pub fn standard() -> Self {
        Self {
            property_types: RateTable::total(|property_type| match property_type {
                PropertyType::Condo => dec!(1.0),
                PropertyType::Apartment => dec!(0.9),
                PropertyType::Terrace => dec!(1.2),
                PropertyType::SemiDetached => dec!(1.4),
                PropertyType::Bungalow => dec!(1.6),
            }),
            sizes: RateTable::total(|size| {
                let (base, multiplier) = match size {
                    PropertySize::Small => (dec!(15000), dec!(1.0)),
                    PropertySize::Medium => (dec!(25000), dec!(1.3)),
                    PropertySize::Large => (dec!(35000), dec!(1.6)),
                    PropertySize::XLarge => (dec!(50000), dec!(2.0)),
                    PropertySize::XXLarge => (dec!(70000), dec!(2.5)),
                };
                SizeRate { base, multiplier }
            }),
            rooms: BTreeMap::from([
                (Area::Living, dec!(8000)),
                (Area::Bedroom, dec!(6000)),
                (Area::Kitchen, dec!(12000)),
                (Area::Bathroom, dec!(8000)),
                (Area::Dining, dec!(5000)),
            ]),
            renovations: RateTable::total(|renovation| match renovation {
                RenovationType::Furniture => dec!(0.6),
                RenovationType::Partial => dec!(0.85),
                RenovationType::Full => dec!(1.0),
            }),
            styles: RateTable::total(|style| match style {
                Style::Modern => dec!(1.0),
                Style::Minimalist => dec!(0.9),
                Style::Contemporary => dec!(1.1),
                Style::Classic => dec!(1.2),
                Style::Scandinavian => dec!(1.05),
            }),
        }
    }

    pub fn builder() -> PricingTableBuilder {
        PricingTableBuilder::default()
    }

    pub fn property_type_multiplier(
        &self,
        property_type: PropertyType,
    ) -> Decimal {
        *self.property_types.get(property_type)
    }

    pub fn size_rate(
        &self,
        size: PropertySize,
    ) -> SizeRate {
        *self.sizes.get(size)
    }

    /// Flat cost of one room, or `None` when the table does not price it.
    pub fn room_cost(
        &self,
        area: Area,
    ) -> Option<Decimal> {
        self.rooms.get(&area).copied()
    }

    /// Every priced room, in display order.
    pub fn room_costs(&self) -> impl Iterator<Item = (Area, Decimal)> + '_ {
        self.rooms.iter().map(|(area, cost)| (*area, *cost))
    }

    pub fn renovation_multiplier(
        &self,
        renovation: RenovationType,
    ) -> Decimal {
        *self.renovations.get(renovation)
    }

    pub fn style_multiplier(
        &self,
        style: Style,
    ) -> Decimal {
        *self.styles.get(style)
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for PricingTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Property type multipliers:")?;
        for (key, rate) in self.property_types.iter() {
            writeln!(f, "  {:<16} x{}", key.as_str(), rate)?;
        }
        writeln!(f, "Property sizes (base, area multiplier):")?;
        for (key, rate) in self.sizes.iter() {
            writeln!(f, "  {:<16} {} x{}", key.as_str(), rate.base, rate.multiplier)?;
        }
        writeln!(f, "Room costs:")?;
        for area in Area::ALL {
            match self.room_cost(*area) {
                Some(cost) => writeln!(f, "  {:<16} {}", area.as_str(), cost)?,
                None => writeln!(f, "  {:<16} (not priced)", area.as_str())?,
            }
        }
        writeln!(f, "Renovation multipliers:")?;
        for (key, rate) in self.renovations.iter() {
            writeln!(f, "  {:<16} x{}", key.as_str(), rate)?;
        }
        write!(f, "Style multipliers:")?;
        for (key, rate) in self.styles.iter() {
            write!(f, "\n  {:<16} x{}", key.as_str(), rate)?;
        }
        Ok(())
    }
}

/// Collects rates one at a time and validates them on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct PricingTableBuilder {
    property_types: Vec<(PropertyType, Decimal)>,
    sizes: Vec<(PropertySize, SizeRate)>,
    rooms: Vec<(Area, Decimal)>,
    renovations: Vec<(RenovationType, Decimal)>,
    styles: Vec<(Style, Decimal)>,
}

impl PricingTableBuilder {
    pub fn property_type(
        mut self,
        property_type: PropertyType,
        multiplier: Decimal,
    ) -> Self {
        self.property_types.push((property_type, multiplier));
        self
    }

    pub fn property_size(
        mut self,
        size: PropertySize,
        base: Decimal,
        multiplier: Decimal,
    ) -> Self {
        self.sizes.push((size, SizeRate { base, multiplier }));
        self
    }

    pub fn room(
        mut self,
        area: Area,
        cost: Decimal,
    ) -> Self {
        self.rooms.push((area, cost));
        self
    }

    pub fn renovation(
        mut self,
        renovation: RenovationType,
        multiplier: Decimal,
    ) -> Self {
        self.renovations.push((renovation, multiplier));
        self
    }

    pub fn style(
        mut self,
        style: Style,
        multiplier: Decimal,
    ) -> Self {
        self.styles.push((style, multiplier));
        self
    }

    /// Validates and freezes the collected rates.
    ///
    /// # Errors
    ///
    /// * [`PricingTableError::NegativeRate`] for any negative amount.
    /// * [`PricingTableError::DuplicateRate`] for a key given twice.
    /// * [`PricingTableError::MissingRate`] when a multiplier table is not
    ///   total. Missing rooms are allowed.
    pub fn build(self) -> Result<PricingTable, PricingTableError> {
        check_non_negative(TableKind::PropertyType, &self.property_types, |v| *v)?;
        check_non_negative(TableKind::PropertySize, &self.sizes, |r| r.base)?;
        check_non_negative(TableKind::PropertySize, &self.sizes, |r| r.multiplier)?;
        check_non_negative(TableKind::Room, &self.rooms, |v| *v)?;
        check_non_negative(TableKind::RenovationType, &self.renovations, |v| *v)?;
        check_non_negative(TableKind::Style, &self.styles, |v| *v)?;

        let mut rooms = BTreeMap::new();
        for (area, cost) in self.rooms {
            if rooms.insert(area, cost).is_some() {
                return Err(PricingTableError::DuplicateRate {
                    table: TableKind::Room,
                    key: area.as_str(),
                });
            }
        }

        Ok(PricingTable {
            property_types: RateTable::from_entries(TableKind::PropertyType, self.property_types)?,
            sizes: RateTable::from_entries(TableKind::PropertySize, self.sizes)?,
            rooms,
            renovations: RateTable::from_entries(TableKind::RenovationType, self.renovations)?,
            styles: RateTable::from_entries(TableKind::Style, self.styles)?,
        })
    }
}

fn check_non_negative<K: Choice, V>(
    table: TableKind,
    entries: &[(K, V)],
    amount: impl Fn(&V) -> Decimal,
) -> Result<(), PricingTableError> {
    match entries.iter().find(|(_, value)| amount(value) < Decimal::ZERO) {
        Some((key, value)) => Err(PricingTableError::NegativeRate {
            table,
            key: key.as_str(),
            value: amount(value),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn complete_builder() -> PricingTableBuilder {
        let standard = PricingTable::standard();
        let mut builder = PricingTable::builder();
        for (key, rate) in standard.property_types.iter() {
            builder = builder.property_type(key, *rate);
        }
        for (key, rate) in standard.sizes.iter() {
            builder = builder.property_size(key, rate.base, rate.multiplier);
        }
        for (area, cost) in standard.room_costs() {
            builder = builder.room(area, cost);
        }
        for (key, rate) in standard.renovations.iter() {
            builder = builder.renovation(key, *rate);
        }
        for (key, rate) in standard.styles.iter() {
            builder = builder.style(key, *rate);
        }
        builder
    }

    // =========================================================================
    // standard table
    // =========================================================================

    #[test]
    fn standard_table_matches_published_rates() {
        let table = PricingTable::standard();

        assert_eq!(table.property_type_multiplier(PropertyType::SemiDetached), dec!(1.4));
        assert_eq!(
            table.size_rate(PropertySize::Medium),
            SizeRate {
                base: dec!(25000),
                multiplier: dec!(1.3),
            }
        );
        assert_eq!(table.room_cost(Area::Kitchen), Some(dec!(12000)));
        assert_eq!(table.renovation_multiplier(RenovationType::Partial), dec!(0.85));
        assert_eq!(table.style_multiplier(Style::Scandinavian), dec!(1.05));
    }

    #[test]
    fn standard_room_costs_sum_to_39000() {
        let total: Decimal = PricingTable::standard().room_costs().map(|(_, c)| c).sum();

        assert_eq!(total, dec!(39000));
    }

    // =========================================================================
    // builder
    // =========================================================================

    #[test]
    fn builder_reproduces_standard_table() {
        let table = complete_builder().build().unwrap();

        assert_eq!(table, PricingTable::standard());
    }

    #[test]
    fn builder_rejects_missing_multiplier() {
        let mut builder = complete_builder();
        builder.styles.retain(|(style, _)| *style != Style::Classic);

        let err = builder.build().unwrap_err();

        assert_eq!(
            err,
            PricingTableError::MissingRate {
                table: TableKind::Style,
                key: "classic",
            }
        );
    }

    #[test]
    fn builder_rejects_duplicate_rate() {
        let builder = complete_builder().property_type(PropertyType::Condo, dec!(2.0));

        let err = builder.build().unwrap_err();

        assert_eq!(
            err,
            PricingTableError::DuplicateRate {
                table: TableKind::PropertyType,
                key: "condo",
            }
        );
    }

    #[test]
    fn builder_rejects_negative_amount() {
        let builder = complete_builder().room(Area::Dining, dec!(-1));

        let err = builder.build().unwrap_err();

        assert!(matches!(
            err,
            PricingTableError::NegativeRate {
                table: TableKind::Room,
                key: "dining",
                ..
            }
        ));
    }

    #[test]
    fn builder_allows_partial_room_table() {
        let mut builder = complete_builder();
        builder.rooms.retain(|(area, _)| *area != Area::Bathroom);

        let table = builder.build().unwrap();

        assert_eq!(table.room_cost(Area::Bathroom), None);
        assert_eq!(table.room_costs().count(), 4);
    }

    #[test]
    fn table_kind_round_trips_through_parse() {
        for kind in TableKind::ALL {
            assert_eq!(TableKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TableKind::parse("areas"), None);
    }
}
