//! Position-points table: final rank to team points.

use serde::{Deserialize, Serialize};

/// One explicit row of a [`PositionPointsTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionEntry {
    /// 1-based final rank.
    pub position: u32,

    /// Team points awarded for that rank.
    pub points: u32,

    /// Marks the catch-all row: every rank at or beyond `position` earns
    /// `points`. Only allowed on the last row.
    #[serde(default, rename = "andAbove", skip_serializing_if = "std::ops::Not::not")]
    pub and_above: bool,
}

impl PositionEntry {
    pub fn new(position: u32, points: u32) -> Self {
        Self {
            position,
            points,
            and_above: false,
        }
    }

    pub fn and_above(position: u32, points: u32) -> Self {
        Self {
            position,
            points,
            and_above: true,
        }
    }
}

/// Declarative rank → points mapping with an optional open-ended tail.
///
/// # Examples
///
/// ```
/// use u_standings::formula::PositionPointsTable;
///
/// let table = PositionPointsTable::default();
/// assert_eq!(table.points_for(1), Some(15));
/// assert_eq!(table.points_for(8), Some(6));
/// assert_eq!(table.points_for(40), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionPointsTable {
    pub positions: Vec<PositionEntry>,
}

impl Default for PositionPointsTable {
    /// 1→15, 2→13, 3→11, 4→10, 5→9, 6→8, 7→7, 8→6, 9→5, 10→4, 11→3,
    /// 12→2, 13+→1.
    fn default() -> Self {
        const POINTS: [u32; 12] = [15, 13, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

        let mut positions: Vec<PositionEntry> = POINTS
            .iter()
            .enumerate()
            .map(|(i, &points)| PositionEntry::new(i as u32 + 1, points))
            .collect();
        positions.push(PositionEntry::and_above(13, 1));
        Self { positions }
    }
}

impl PositionPointsTable {
    pub fn new(positions: Vec<PositionEntry>) -> Self {
        Self { positions }
    }

    /// Returns `true` if the last row is an "and above" catch-all.
    pub fn is_open_ended(&self) -> bool {
        self.positions.last().is_some_and(|e| e.and_above)
    }

    /// Highest rank this table can answer, or `None` when open-ended.
    pub fn max_position(&self) -> Option<u32> {
        if self.is_open_ended() {
            None
        } else {
            self.positions.last().map(|e| e.position)
        }
    }

    /// Points earned by `rank`.
    ///
    /// Returns `None` for rank 0 and for ranks beyond a table that has no
    /// catch-all row.
    pub fn points_for(&self, rank: u32) -> Option<u32> {
        if rank == 0 {
            return None;
        }
        if let Some(entry) = self.positions.iter().find(|e| e.position == rank) {
            return Some(entry.points);
        }
        match self.positions.last() {
            Some(last) if last.and_above && rank > last.position => Some(last.points),
            _ => None,
        }
    }

    /// Validates the table.
    ///
    /// Positions must start at 1 and be contiguous; only the last row may
    /// be marked "and above".
    pub fn validate(&self) -> Result<(), String> {
        if self.positions.is_empty() {
            return Err("position-points table is empty".into());
        }
        for (i, entry) in self.positions.iter().enumerate() {
            let expected = i as u32 + 1;
            if entry.position != expected {
                return Err(format!(
                    "positions[{i}]: expected position {expected}, got {}",
                    entry.position
                ));
            }
            if entry.and_above && i + 1 != self.positions.len() {
                return Err(format!(
                    "positions[{i}]: 'andAbove' is only allowed on the last entry"
                ));
            }
        }
        Ok(())
    }
}
