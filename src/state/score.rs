use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two sides of the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Team listed on the left of the board.
    Home,
    /// Visiting team.
    Away,
}

/// Point totals for both teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScoreState {
    /// Home team points.
    pub home: u32,
    /// Away team points.
    pub away: u32,
}

impl ScoreState {
    /// Credit `points` to `team`.
    pub fn added(self, team: Team, points: u32) -> Self {
        self.map(team, |score| score.saturating_add(points))
    }

    /// Take back a single point from `team`, never going below zero.
    pub fn undone(self, team: Team) -> Self {
        self.map(team, |score| score.saturating_sub(1))
    }

    fn map(mut self, team: Team, f: impl FnOnce(u32) -> u32) -> Self {
        let slot = match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        };
        *slot = f(*slot);
        self
    }
}
