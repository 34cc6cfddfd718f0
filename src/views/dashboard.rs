use std::fmt;

use crate::model::{Dataset, Match, PlayerStats, Team};

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub main_team: Option<&'a Team>,
    pub latest_match: Option<&'a Match>,
    pub top_scorer: Option<&'a PlayerStats>,
    pub teams: usize,
    pub players: usize,
    pub matches: usize,
    pub championships: usize,
}

/// Overview centred on the main team, falling back to the first team
pub fn dashboard(dataset: &Dataset) -> Dashboard<'_> {
    let main_team = dataset.main_team().or_else(|| dataset.teams.first());

    // max_by_key keeps the last maximum, i.e. the later ingestion on equal dates
    let latest_match = main_team.and_then(|team| {
        dataset
            .matches
            .iter()
            .filter(|m| m.team1_id == team.id || m.team2_id == team.id)
            .max_by_key(|m| m.date)
    });

    let top_scorer = main_team.zip(latest_match).and_then(|(team, game)| {
        dataset
            .stats
            .iter()
            .filter(|s| s.match_id == game.id && s.team_id == team.id)
            .fold(None, |best: Option<&PlayerStats>, line| match best {
                Some(b) if b.pts >= line.pts => Some(b),
                _ => Some(line),
            })
    });

    Dashboard {
        main_team,
        latest_match,
        top_scorer,
        teams: dataset.teams.len(),
        players: dataset.players.len(),
        matches: dataset.matches.len(),
        championships: dataset.championships.len(),
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.main_team {
            Some(team) => writeln!(f, "Main team:     {}", team.name)?,
            None => writeln!(f, "Main team:     (none)")?,
        }
        if let Some(game) = self.latest_match {
            writeln!(
                f,
                "Latest match:  {} {} {} - {} {}",
                game.date, game.team1_name, game.team1_score, game.team2_score, game.team2_name
            )?;
        }
        if let Some(line) = self.top_scorer {
            writeln!(
                f,
                "Top scorer:    {} ({} pts, {} reb, {} ast)",
                line.player_name, line.pts, line.rebs, line.ast
            )?;
        }
        writeln!(
            f,
            "Teams: {}  Players: {}  Matches: {}  Championships: {}",
            self.teams, self.players, self.matches, self.championships
        )
    }
}
