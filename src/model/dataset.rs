use serde::{Deserialize, Serialize};

use super::entities::{Championship, ChampionshipTeam, Match, Player, PlayerStats, Team};

/// The whole normalized state: what storage loads and saves, what commands
/// transform and what views read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub stats: Vec<PlayerStats>,
    pub championships: Vec<Championship>,
    pub championship_teams: Vec<ChampionshipTeam>,
}

impl Dataset {
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn main_team(&self) -> Option<&Team> {
        self.teams.iter().find(|t| t.is_main)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn find_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn championship(&self, id: &str) -> Option<&Championship> {
        self.championships.iter().find(|c| c.id == id)
    }

    /// Look a championship up by id first, then by exact name
    pub fn resolve_championship(&self, id_or_name: &str) -> Option<&Championship> {
        self.championship(id_or_name)
            .or_else(|| self.championships.iter().find(|c| c.name == id_or_name))
    }

    /// Look a team up by id first, then by exact name
    pub fn resolve_team(&self, id_or_name: &str) -> Option<&Team> {
        self.team(id_or_name).or_else(|| self.team_by_name(id_or_name))
    }

    pub fn is_member(&self, championship_id: &str, team_id: &str) -> bool {
        self.championship_teams
            .iter()
            .any(|ct| ct.championship_id == championship_id && ct.team_id == team_id)
    }
}
