use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::{Match, Player, PlayerStats, Team};
use crate::error::{Error, Result};

/// One match worth of parsed or hand-entered data, still using
/// bundle-local ids that reconciliation remaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchData {
    #[serde(rename = "match")]
    pub game: Match,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub stats: Vec<PlayerStats>,
}

impl MatchData {
    /// Check that the match references two distinct teams from the bundle's
    /// own stub list, under two different names
    pub fn validate(&self) -> Result<()> {
        let mut names = Vec::with_capacity(2);
        for team_id in [&self.game.team1_id, &self.game.team2_id] {
            match self.teams.iter().find(|t| &t.id == team_id) {
                Some(team) => names.push(team.name.trim()),
                None => {
                    return Err(Error::InvalidBundle(format!(
                        "match {} references team {} which is not part of the bundle",
                        self.game.id, team_id
                    )))
                }
            }
        }

        if self.game.team1_id == self.game.team2_id {
            return Err(Error::InvalidBundle(format!(
                "match {} uses team {} on both sides",
                self.game.id, self.game.team1_id
            )));
        }
        if names[0] == names[1] {
            return Err(Error::InvalidBundle(format!(
                "match {} names both sides {:?}",
                self.game.id, names[0]
            )));
        }

        Ok(())
    }
}

/// Fresh opaque id such as `player-8d3c...`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
