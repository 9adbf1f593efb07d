//! Target areas of a renovation.
//!
//! A customer either picks individual rooms or the whole house. The two are
//! mutually exclusive, so [`AreaSelection`] is a sum type rather than a set
//! of tags: a selection holding "whole house" together with a room cannot be
//! represented at all.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::choice::{Choice, UnknownChoice, choice_enum};

choice_enum! {
    /// A single room that can be priced on its own.
    pub enum Area as "area" {
        Living => ("living", "Living Room"),
        Bedroom => ("bedroom", "Bedroom(s)"),
        Kitchen => ("kitchen", "Kitchen"),
        Bathroom => ("bathroom", "Bathroom(s)"),
        Dining => ("dining", "Dining Area"),
    }
}

/// Key accepted for the whole-house tag.
pub const WHOLE_HOUSE_KEY: &str = "all";

/// Label shown for the whole-house tag.
pub const WHOLE_HOUSE_LABEL: &str = "Whole House";

/// One selectable area option, as presented to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AreaTag {
    Room(Area),
    WholeHouse,
}

impl AreaTag {
    /// Every tag in display order: the rooms, then the whole house.
    pub fn all() -> Vec<AreaTag> {
        Area::ALL
            .iter()
            .copied()
            .map(AreaTag::Room)
            .chain(std::iter::once(AreaTag::WholeHouse))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaTag::Room(area) => area.as_str(),
            AreaTag::WholeHouse => WHOLE_HOUSE_KEY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaTag::Room(area) => area.label(),
            AreaTag::WholeHouse => WHOLE_HOUSE_LABEL,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case(WHOLE_HOUSE_KEY) {
            return Some(AreaTag::WholeHouse);
        }
        Area::parse(s).map(AreaTag::Room)
    }
}

impl fmt::Display for AreaTag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AreaTag {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaTag::parse(s).ok_or_else(|| UnknownChoice {
            kind: Area::KIND,
            value: s.to_string(),
        })
    }
}

/// The areas chosen so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaSelection {
    /// Individual rooms; empty until the customer picks one.
    Rooms(BTreeSet<Area>),
    /// Every room, priced as a bundle.
    WholeHouse,
}

impl Default for AreaSelection {
    fn default() -> Self {
        AreaSelection::Rooms(BTreeSet::new())
    }
}

impl AreaSelection {
    pub fn is_empty(&self) -> bool {
        matches!(self, AreaSelection::Rooms(rooms) if rooms.is_empty())
    }

    pub fn is_whole_house(&self) -> bool {
        matches!(self, AreaSelection::WholeHouse)
    }

    pub fn contains(
        &self,
        tag: AreaTag,
    ) -> bool {
        match (self, tag) {
            (AreaSelection::WholeHouse, AreaTag::WholeHouse) => true,
            (AreaSelection::Rooms(rooms), AreaTag::Room(area)) => rooms.contains(&area),
            _ => false,
        }
    }

    /// Marks `tag` as selected.
    ///
    /// Selecting the whole house drops every room; selecting a room while the
    /// whole house is selected drops the whole house.
    pub fn select(
        &mut self,
        tag: AreaTag,
    ) {
        match tag {
            AreaTag::WholeHouse => *self = AreaSelection::WholeHouse,
            AreaTag::Room(area) => match self {
                AreaSelection::Rooms(rooms) => {
                    rooms.insert(area);
                }
                AreaSelection::WholeHouse => {
                    *self = AreaSelection::Rooms(BTreeSet::from([area]));
                }
            },
        }
    }

    /// Removes `tag` from the selection. Removing something that is not
    /// selected does nothing.
    pub fn deselect(
        &mut self,
        tag: AreaTag,
    ) {
        match tag {
            AreaTag::WholeHouse => {
                if self.is_whole_house() {
                    *self = AreaSelection::default();
                }
            }
            AreaTag::Room(area) => {
                if let AreaSelection::Rooms(rooms) = self {
                    rooms.remove(&area);
                }
            }
        }
    }

    /// Flips `tag`, returning whether it is selected afterwards.
    pub fn toggle(
        &mut self,
        tag: AreaTag,
    ) -> bool {
        if self.contains(tag) {
            self.deselect(tag);
            false
        } else {
            self.select(tag);
            true
        }
    }

    /// Selected tags in display order.
    pub fn tags(&self) -> Vec<AreaTag> {
        match self {
            AreaSelection::WholeHouse => vec![AreaTag::WholeHouse],
            AreaSelection::Rooms(rooms) => rooms.iter().copied().map(AreaTag::Room).collect(),
        }
    }

    /// Comma-separated labels of the selected tags.
    pub fn describe(&self) -> String {
        self.tags()
            .iter()
            .map(AreaTag::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
