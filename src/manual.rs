//! Hand-entered box scores.
//!
//! A manual entry carries the counting stats a scorer can fill in by hand.
//! It is assembled into the same [`MatchData`] bundle the text parser
//! produces, with derived percentages computed by [`fill_derived`].

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::metrics::fill_derived;
use crate::model::{new_id, Match, MatchData, Player, PlayerStats, Team};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualStatLine {
    pub player_name: String,
    pub player_number: String,
    pub minutes: f64,
    pub pts: f64,
    pub rebs: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub fg: f64,
    pub fga: f64,
    pub three_pt: f64,
    pub three_pt_a: f64,
    pub ft: f64,
    pub fta: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualTeam {
    pub name: String,
    pub players: Vec<ManualStatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntry {
    pub date: Option<NaiveDate>,
    pub team1: ManualTeam,
    pub team2: ManualTeam,
}

impl ManualEntry {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build a bundle. Lines without a player name are ignored; each team's
    /// score is the sum of its players' points.
    pub fn assemble(&self) -> Result<MatchData> {
        if self.team1.name.trim().is_empty() || self.team2.name.trim().is_empty() {
            return Err(Error::malformed("both teams need a name"));
        }
        if self.team1.name.trim() == self.team2.name.trim() {
            return Err(Error::malformed(format!(
                "both sides are named {:?}",
                self.team1.name.trim()
            )));
        }

        let match_id = new_id("match");
        let teams = vec![
            Team::stub(new_id("team"), self.team1.name.trim()),
            Team::stub(new_id("team"), self.team2.name.trim()),
        ];

        let mut players = Vec::new();
        let mut stats = Vec::new();
        let mut scores = [0.0; 2];

        for (side, manual_team) in [&self.team1, &self.team2].into_iter().enumerate() {
            let team_id = &teams[side].id;
            for entry in manual_team
                .players
                .iter()
                .filter(|p| !p.player_name.trim().is_empty())
            {
                let player = Player {
                    id: new_id("player"),
                    name: entry.player_name.trim().to_string(),
                    number: entry.player_number.trim().to_string(),
                    team_id: team_id.clone(),
                    picture_url: None,
                };

                let mut line = PlayerStats {
                    id: new_id("stat"),
                    match_id: match_id.clone(),
                    player_id: player.id.clone(),
                    team_id: team_id.clone(),
                    player_name: player.name.clone(),
                    player_number: player.number.clone(),
                    minutes: entry.minutes,
                    pts: entry.pts,
                    rebs: entry.rebs,
                    ast: entry.ast,
                    stl: entry.stl,
                    blk: entry.blk,
                    fg: entry.fg,
                    fga: entry.fga,
                    three_pt: entry.three_pt,
                    three_pt_a: entry.three_pt_a,
                    ft: entry.ft,
                    fta: entry.fta,
                    ..Default::default()
                };
                fill_derived(&mut line);

                scores[side] += entry.pts;
                players.push(player);
                stats.push(line);
            }
        }

        let game = Match {
            id: match_id,
            date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            championship_id: String::new(),
            team1_id: teams[0].id.clone(),
            team2_id: teams[1].id.clone(),
            team1_name: teams[0].name.clone(),
            team2_name: teams[1].name.clone(),
            team1_score: scores[0],
            team2_score: scores[1],
            team1_periods: None,
            team2_periods: None,
        };

        Ok(MatchData {
            game,
            teams,
            players,
            stats,
        })
    }
}
