//! Grid coordinate model.
//!
//! Slots are numbered row by row. A slot id maps to a 1-based column
//! (`id % width + 1`) and a 1-based row (`id / width + 1`). Columns are
//! split into three contiguous zones:
//!
//! ```text
//! 1 ..= k        good party
//! k+1 ..= m      disabled separator
//! m+1 ..= width  evil party
//! ```
//!
//! Zone membership is a pure function of the slot id and is never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};

/// Identifier of one grid cell, in `[0, width * height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Raw index into the tile store.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two opposing parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The player's own party (left columns).
    Good,
    /// The opposing party (right columns).
    Evil,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Good => Side::Evil,
            Side::Evil => Side::Good,
        }
    }
}

/// Column zone of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Columns owned by one party.
    Party(Side),
    /// Non-playable separator columns.
    Separator,
}

/// 1-based column/row pair derived from a slot id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Column, starting at 1.
    pub x: u32,
    /// Row, starting at 1.
    pub y: u32,
}

impl Coordinates {
    /// Create a new coordinate pair.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Exact, so it is used for ranking.
    ///
    /// Fits in a `u32` for any two slots of a validated [`GridLayout`].
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance, for display.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }
}

/// Fixed grid dimensions and zone boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Last column of the good zone (`k`).
    pub good_columns: u32,
    /// Last column of the separator zone (`m`).
    pub separator_end: u32,
}

impl Default for GridLayout {
    /// The standard board: four good columns, six separator columns and
    /// four evil columns, four rows deep.
    fn default() -> Self {
        Self {
            width: 14,
            height: 4,
            good_columns: 4,
            separator_end: 10,
        }
    }
}

impl GridLayout {
    /// Create a layout. Use [`GridLayout::validate`] before trusting
    /// user-supplied values.
    #[must_use]
    pub const fn new(width: u32, height: u32, good_columns: u32, separator_end: u32) -> Self {
        Self {
            width,
            height,
            good_columns,
            separator_end,
        }
    }

    /// Check that the three zones are non-empty and ordered.
    ///
    /// The grid must also be small enough that every slot id and every
    /// squared distance between two slots fits in a `u32`.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 {
            return Err(PreviewError::InvalidState(
                "grid height must be at least 1".into(),
            ));
        }
        if self.good_columns == 0
            || self.separator_end < self.good_columns
            || self.width <= self.separator_end
        {
            return Err(PreviewError::InvalidState(format!(
                "zone boundaries 1..={}, ..={}, ..={} do not describe three ordered zones",
                self.good_columns, self.separator_end, self.width
            )));
        }

        let limit = u64::from(u32::MAX);
        let (width, height) = (u64::from(self.width), u64::from(self.height));
        if width * height > limit || (width - 1).pow(2) + (height - 1).pow(2) > limit {
            return Err(PreviewError::InvalidState(format!(
                "a {}x{} grid is too large to address",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Total number of slots.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.width * self.height
    }

    /// Whether the grid has no slots at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `slot` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, slot: SlotId) -> bool {
        slot.0 < self.len()
    }

    /// 1-based column of a slot.
    #[must_use]
    pub const fn position_in_row(&self, slot: SlotId) -> u32 {
        slot.0 % self.width + 1
    }

    /// 1-based row of a slot.
    #[must_use]
    pub const fn position_in_column(&self, slot: SlotId) -> u32 {
        slot.0 / self.width + 1
    }

    /// Both coordinates of a slot.
    #[must_use]
    pub const fn coordinates(&self, slot: SlotId) -> Coordinates {
        Coordinates::new(self.position_in_row(slot), self.position_in_column(slot))
    }

    /// Zone of a column.
    #[must_use]
    pub const fn zone_of_column(&self, column: u32) -> Zone {
        if column <= self.good_columns {
            Zone::Party(Side::Good)
        } else if column <= self.separator_end {
            Zone::Separator
        } else {
            Zone::Party(Side::Evil)
        }
    }

    /// Zone of a slot.
    #[must_use]
    pub const fn zone(&self, slot: SlotId) -> Zone {
        self.zone_of_column(self.position_in_row(slot))
    }

    /// Whether a slot can hold a character.
    #[must_use]
    pub const fn is_playable(&self, slot: SlotId) -> bool {
        self.contains(slot) && !matches!(self.zone(slot), Zone::Separator)
    }

    /// Side owning a slot.
    ///
    /// Fails with [`PreviewError::InvalidZone`] for separator slots and for
    /// slots outside the grid.
    pub fn side(&self, slot: SlotId) -> Result<Side> {
        let column = self.position_in_row(slot);
        match self.zone(slot) {
            Zone::Party(side) if self.contains(slot) => Ok(side),
            _ => Err(PreviewError::InvalidZone {
                slot: slot.0,
                column,
            }),
        }
    }

    /// All slots of one side, in id order.
    pub fn slots_of(&self, side: Side) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.len())
            .map(SlotId)
            .filter(move |slot| self.zone(*slot) == Zone::Party(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_in_row_and_column() {
        let layout = GridLayout::new(11, 4, 4, 10);

        assert_eq!(layout.position_in_row(SlotId(0)), 1);
        assert_eq!(layout.position_in_column(SlotId(0)), 1);
        assert_eq!(layout.position_in_row(SlotId(10)), 11);
        assert_eq!(layout.position_in_row(SlotId(11)), 1);
        assert_eq!(layout.position_in_column(SlotId(11)), 2);
        assert_eq!(layout.coordinates(SlotId(25)), Coordinates::new(4, 3));
    }

    #[test]
    fn test_last_column_of_second_row_is_evil() {
        let layout = GridLayout::new(11, 4, 4, 10);
        let slot = SlotId(layout.width * 2 - 1);

        assert_eq!(layout.position_in_row(slot), 11);
        assert_eq!(layout.side(slot), Ok(Side::Evil));
    }

    #[test]
    fn test_separator_column_has_no_side() {
        let layout = GridLayout::new(11, 4, 4, 10);
        // Column 7 of the first row
        let slot = SlotId(6);

        assert_eq!(layout.zone(slot), Zone::Separator);
        assert_eq!(
            layout.side(slot),
            Err(PreviewError::InvalidZone { slot: 6, column: 7 })
        );
        assert!(!layout.is_playable(slot));
    }

    #[test]
    fn test_zone_boundaries() {
        let layout = GridLayout::default();

        assert_eq!(layout.zone_of_column(4), Zone::Party(Side::Good));
        assert_eq!(layout.zone_of_column(5), Zone::Separator);
        assert_eq!(layout.zone_of_column(10), Zone::Separator);
        assert_eq!(layout.zone_of_column(11), Zone::Party(Side::Evil));
        assert_eq!(layout.zone_of_column(14), Zone::Party(Side::Evil));
    }

    #[test]
    fn test_out_of_range_slot_has_no_side() {
        let layout = GridLayout::default();
        let slot = SlotId(layout.len());

        assert!(!layout.contains(slot));
        assert!(matches!(
            layout.side(slot),
            Err(PreviewError::InvalidZone { .. })
        ));
    }

    #[test]
    fn test_slots_partition_into_zones() {
        let layout = GridLayout::default();
        let good = layout.slots_of(Side::Good).count() as u32;
        let evil = layout.slots_of(Side::Evil).count() as u32;
        let separator = (0..layout.len())
            .filter(|id| layout.zone(SlotId(*id)) == Zone::Separator)
            .count() as u32;

        assert_eq!(good, 16);
        assert_eq!(evil, 16);
        assert_eq!(good + evil + separator, layout.len());
    }

    #[test]
    fn test_distance() {
        let a = Coordinates::new(1, 1);
        let b = Coordinates::new(4, 5);

        assert_eq!(a.distance_squared(b), 25);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(b.distance_squared(a), 25);
    }

    #[test]
    fn test_validate_rejects_unordered_zones() {
        assert!(GridLayout::default().validate().is_ok());
        assert!(GridLayout::new(10, 4, 4, 10).validate().is_err());
        assert!(GridLayout::new(14, 4, 0, 10).validate().is_err());
        assert!(GridLayout::new(14, 4, 6, 5).validate().is_err());
        assert!(GridLayout::new(14, 0, 4, 10).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unaddressable_grids() {
        // 69_999² alone exceeds u32::MAX
        let wide = GridLayout::new(70_000, 1, 1, 2).validate();
        assert!(matches!(wide, Err(PreviewError::InvalidState(_))));
        assert!(GridLayout::new(100_000, 100_000, 1, 2).validate().is_err());

        let widest = GridLayout::new(65_536, 1, 1, 2);
        assert!(widest.validate().is_ok());
        let first = widest.coordinates(SlotId(0));
        let last = widest.coordinates(SlotId(widest.len() - 1));
        assert_eq!(first.distance_squared(last), 65_535 * 65_535);
    }
}
