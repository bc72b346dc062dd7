//! Tie-break criteria for event team standings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Secondary criteria applied, in order, when event totals are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamTieBreak {
    /// More competitions won (position 1).
    MostFirstPlaces,
    /// More top-three competition finishes.
    MostPodiums,
    /// Higher points in the team's single best competition.
    BestSingleCompetition,
}

/// A team's accumulated event record, used for ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStanding {
    pub team_id: String,
    pub total_points: u32,
    pub first_places: u32,
    pub podiums: u32,
    pub best_single: u32,
}

impl TeamStanding {
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            ..Self::default()
        }
    }

    /// Folds one competition result into the standing. Totals saturate at
    /// `u32::MAX`.
    pub fn record(&mut self, points: u32, position: u32) {
        self.total_points = self.total_points.saturating_add(points);
        if position == 1 {
            self.first_places += 1;
        }
        if position <= 3 {
            self.podiums += 1;
        }
        self.best_single = self.best_single.max(points);
    }
}

impl TeamTieBreak {
    /// Returns [`Ordering::Less`] when `a` ranks above `b`.
    pub fn compare(self, a: &TeamStanding, b: &TeamStanding) -> Ordering {
        match self {
            TeamTieBreak::MostFirstPlaces => b.first_places.cmp(&a.first_places),
            TeamTieBreak::MostPodiums => b.podiums.cmp(&a.podiums),
            TeamTieBreak::BestSingleCompetition => b.best_single.cmp(&a.best_single),
        }
    }
}

/// Applies `criteria` in order; the first one that separates the teams wins.
pub fn compare_standings(criteria: &[TeamTieBreak], a: &TeamStanding, b: &TeamStanding) -> Ordering {
    criteria
        .iter()
        .map(|c| c.compare(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
