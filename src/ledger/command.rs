//! State transitions over the dataset.
//!
//! [`apply`] is the only way the dataset changes: it takes the current
//! state by reference and returns either a complete new state or an error,
//! so a rejected command never leaves a half-applied dataset behind.

use chrono::NaiveDate;
use tracing::info;

use super::merge::merge;
use crate::error::{Error, Result};
use crate::model::{
    new_id, Championship, ChampionshipTeam, Dataset, MatchData, PeriodScores, Player, Team,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Reconcile a parsed or hand-entered match into a championship
    IngestMatch {
        bundle: MatchData,
        championship_id: String,
    },
    AddTeam {
        name: String,
        logo_url: Option<String>,
    },
    /// Replace a team's name and logo. The main flag is not taken from the
    /// payload; use `SetMainTeam`.
    UpdateTeam(Team),
    /// Remove a team and its championship memberships. Its matches and stat
    /// lines stay, pointing at the removed id.
    DeleteTeam {
        team_id: String,
    },
    SetMainTeam {
        team_id: String,
    },
    UpdatePlayer(Player),
    /// Correct a match. A supplied period breakdown replaces the stored one
    /// and that side's score becomes the breakdown's total.
    UpdateMatch {
        match_id: String,
        date: Option<NaiveDate>,
        team1_periods: Option<PeriodScores>,
        team2_periods: Option<PeriodScores>,
    },
    AddChampionship {
        name: String,
    },
    UpdateChampionship {
        championship_id: String,
        name: String,
    },
    /// Remove a championship with its matches, their stat lines and its
    /// memberships
    DeleteChampionship {
        championship_id: String,
    },
    AddChampionshipTeam {
        championship_id: String,
        team_id: String,
    },
    RemoveChampionshipTeam {
        championship_id: String,
        team_id: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::IngestMatch { .. } => "ingest-match",
            Command::AddTeam { .. } => "add-team",
            Command::UpdateTeam(_) => "update-team",
            Command::DeleteTeam { .. } => "delete-team",
            Command::SetMainTeam { .. } => "set-main-team",
            Command::UpdatePlayer(_) => "update-player",
            Command::UpdateMatch { .. } => "update-match",
            Command::AddChampionship { .. } => "add-championship",
            Command::UpdateChampionship { .. } => "update-championship",
            Command::DeleteChampionship { .. } => "delete-championship",
            Command::AddChampionshipTeam { .. } => "add-championship-team",
            Command::RemoveChampionshipTeam { .. } => "remove-championship-team",
        }
    }
}

/// Apply one command to `state`, returning the new state
pub fn apply(state: &Dataset, command: Command) -> Result<Dataset> {
    let name = command.name();
    let next = match command {
        Command::IngestMatch {
            bundle,
            championship_id,
        } => ingest_match(state, &bundle, &championship_id)?,
        Command::AddTeam { name, logo_url } => add_team(state, name, logo_url)?,
        Command::UpdateTeam(team) => update_team(state, team)?,
        Command::DeleteTeam { team_id } => delete_team(state, &team_id)?,
        Command::SetMainTeam { team_id } => set_main_team(state, &team_id)?,
        Command::UpdatePlayer(player) => update_player(state, player)?,
        Command::UpdateMatch {
            match_id,
            date,
            team1_periods,
            team2_periods,
        } => update_match(state, &match_id, date, team1_periods, team2_periods)?,
        Command::AddChampionship { name } => add_championship(state, name)?,
        Command::UpdateChampionship {
            championship_id,
            name,
        } => update_championship(state, &championship_id, name)?,
        Command::DeleteChampionship { championship_id } => {
            delete_championship(state, &championship_id)?
        }
        Command::AddChampionshipTeam {
            championship_id,
            team_id,
        } => add_championship_team(state, &championship_id, &team_id)?,
        Command::RemoveChampionshipTeam {
            championship_id,
            team_id,
        } => {
            let mut next = state.clone();
            next.championship_teams
                .retain(|ct| !(ct.championship_id == championship_id && ct.team_id == team_id));
            next
        }
    };

    info!(command = name, "applied command");
    Ok(next)
}

fn ingest_match(state: &Dataset, bundle: &MatchData, championship_id: &str) -> Result<Dataset> {
    bundle.validate()?;
    if state.championship(championship_id).is_none() {
        return Err(Error::not_found(format!("championship {}", championship_id)));
    }

    let mut next = merge(state, bundle, championship_id);
    if let Some(game) = next.matches.last() {
        if game.team1_id == game.team2_id {
            return Err(Error::InvalidBundle(format!(
                "both sides of match {} resolve to team {}",
                game.id, game.team1_id
            )));
        }
        let team_ids = [game.team1_id.clone(), game.team2_id.clone()];
        for team_id in team_ids {
            if !next.is_member(championship_id, &team_id) {
                next.championship_teams.push(ChampionshipTeam {
                    championship_id: championship_id.to_string(),
                    team_id,
                });
            }
        }
    }
    Ok(next)
}

fn require_name(kind: &str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::malformed(format!("{} name must not be empty", kind)));
    }
    Ok(name.to_string())
}

fn add_team(state: &Dataset, name: String, logo_url: Option<String>) -> Result<Dataset> {
    let name = require_name("team", &name)?;
    if state.team_by_name(&name).is_some() {
        return Err(Error::conflict(format!("team {:?} already exists", name)));
    }

    let mut next = state.clone();
    next.teams.push(Team {
        id: new_id("team"),
        name,
        logo_url,
        is_main: state.teams.is_empty(),
    });
    Ok(next)
}

fn update_team(state: &Dataset, team: Team) -> Result<Dataset> {
    let name = require_name("team", &team.name)?;
    if state
        .teams
        .iter()
        .any(|t| t.name == name && t.id != team.id)
    {
        return Err(Error::conflict(format!("team {:?} already exists", name)));
    }

    let mut next = state.clone();
    let slot = next
        .teams
        .iter_mut()
        .find(|t| t.id == team.id)
        .ok_or_else(|| Error::not_found(format!("team {}", team.id)))?;
    slot.name = name;
    slot.logo_url = team.logo_url;
    Ok(next)
}

fn delete_team(state: &Dataset, team_id: &str) -> Result<Dataset> {
    let removed = state
        .team(team_id)
        .ok_or_else(|| Error::not_found(format!("team {}", team_id)))?;

    let mut next = state.clone();
    next.teams.retain(|t| t.id != team_id);
    next.championship_teams.retain(|ct| ct.team_id != team_id);

    if removed.is_main {
        if let Some(first) = next.teams.first_mut() {
            first.is_main = true;
        }
    }
    Ok(next)
}

fn set_main_team(state: &Dataset, team_id: &str) -> Result<Dataset> {
    if state.team(team_id).is_none() {
        return Err(Error::not_found(format!("team {}", team_id)));
    }

    let mut next = state.clone();
    for team in &mut next.teams {
        team.is_main = team.id == team_id;
    }
    Ok(next)
}

fn update_player(state: &Dataset, player: Player) -> Result<Dataset> {
    if state.player(&player.id).is_none() {
        return Err(Error::not_found(format!("player {}", player.id)));
    }
    if state
        .players
        .iter()
        .any(|p| p.id != player.id && p.team_id == player.team_id && p.number == player.number)
    {
        return Err(Error::conflict(format!(
            "number {} is already taken in team {}",
            player.number, player.team_id
        )));
    }

    let mut next = state.clone();
    if let Some(slot) = next.players.iter_mut().find(|p| p.id == player.id) {
        *slot = player;
    }
    Ok(next)
}

fn update_match(
    state: &Dataset,
    match_id: &str,
    date: Option<NaiveDate>,
    team1_periods: Option<PeriodScores>,
    team2_periods: Option<PeriodScores>,
) -> Result<Dataset> {
    let mut next = state.clone();
    let game = next
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or_else(|| Error::not_found(format!("match {}", match_id)))?;

    if let Some(date) = date {
        game.date = date;
    }
    if let Some(periods) = team1_periods {
        game.team1_score = periods.total();
        game.team1_periods = Some(periods);
    }
    if let Some(periods) = team2_periods {
        game.team2_score = periods.total();
        game.team2_periods = Some(periods);
    }
    Ok(next)
}

fn add_championship(state: &Dataset, name: String) -> Result<Dataset> {
    let name = require_name("championship", &name)?;
    if state.championships.iter().any(|c| c.name == name) {
        return Err(Error::conflict(format!("championship {:?} already exists", name)));
    }

    let mut next = state.clone();
    next.championships.push(Championship {
        id: new_id("championship"),
        name,
    });
    Ok(next)
}

fn update_championship(state: &Dataset, championship_id: &str, name: String) -> Result<Dataset> {
    let name = require_name("championship", &name)?;
    if state
        .championships
        .iter()
        .any(|c| c.name == name && c.id != championship_id)
    {
        return Err(Error::conflict(format!("championship {:?} already exists", name)));
    }

    let mut next = state.clone();
    let slot = next
        .championships
        .iter_mut()
        .find(|c| c.id == championship_id)
        .ok_or_else(|| Error::not_found(format!("championship {}", championship_id)))?;
    slot.name = name;
    Ok(next)
}

fn delete_championship(state: &Dataset, championship_id: &str) -> Result<Dataset> {
    if state.championship(championship_id).is_none() {
        return Err(Error::not_found(format!("championship {}", championship_id)));
    }

    let mut next = state.clone();
    let removed_matches: std::collections::HashSet<String> = next
        .matches
        .iter()
        .filter(|m| m.championship_id == championship_id)
        .map(|m| m.id.clone())
        .collect();

    next.championships.retain(|c| c.id != championship_id);
    next.matches.retain(|m| !removed_matches.contains(&m.id));
    next.stats.retain(|s| !removed_matches.contains(&s.match_id));
    next.championship_teams
        .retain(|ct| ct.championship_id != championship_id);
    Ok(next)
}

fn add_championship_team(state: &Dataset, championship_id: &str, team_id: &str) -> Result<Dataset> {
    if state.championship(championship_id).is_none() {
        return Err(Error::not_found(format!("championship {}", championship_id)));
    }
    if state.team(team_id).is_none() {
        return Err(Error::not_found(format!("team {}", team_id)));
    }

    let mut next = state.clone();
    if !next.is_member(championship_id, team_id) {
        next.championship_teams.push(ChampionshipTeam {
            championship_id: championship_id.to_string(),
            team_id: team_id.to_string(),
        });
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    fn with_championship(name: &str) -> (Dataset, String) {
        let state = apply(
            &Dataset::default(),
            Command::AddChampionship {
                name: name.to_string(),
            },
        )
        .unwrap();
        let id = state.championships[0].id.clone();
        (state, id)
    }

    fn ingest(state: &Dataset, championship_id: &str, csv: &str) -> Dataset {
        apply(
            state,
            Command::IngestMatch {
                bundle: parse_csv(csv).unwrap(),
                championship_id: championship_id.to_string(),
            },
        )
        .unwrap()
    }

    const GAME: &str = "Player;No.;-Pt\nA;1;10\nTeam A Totals;;10\nB;901;8\nTeam B Totals;;8";

    #[test]
    fn test_ingest_requires_championship() {
        let err = apply(
            &Dataset::default(),
            Command::IngestMatch {
                bundle: parse_csv(GAME).unwrap(),
                championship_id: "missing".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_ingest_rejects_inconsistent_bundle() {
        let (state, champ) = with_championship("League");
        let mut bundle = parse_csv(GAME).unwrap();
        bundle.game.team1_id = "team-ghost".to_string();
        let err = apply(
            &state,
            Command::IngestMatch {
                bundle,
                championship_id: champ,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidBundle(_)));
    }

    #[test]
    fn test_ingest_rejects_team_playing_itself() {
        let (state, champ) = with_championship("League");
        let mut bundle = parse_csv(GAME).unwrap();
        bundle.teams[1].name = "Team A".to_string();

        let err = apply(
            &state,
            Command::IngestMatch {
                bundle,
                championship_id: champ,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidBundle(_)));
    }

    #[test]
    fn test_ingest_registers_memberships_once() {
        let (state, champ) = with_championship("League");
        let state = ingest(&state, &champ, GAME);
        let state = ingest(&state, &champ, GAME);
        assert_eq!(state.championship_teams.len(), 2);
        assert_eq!(state.matches.len(), 2);
    }

    #[test]
    fn test_add_team_main_and_duplicates() {
        let state = apply(
            &Dataset::default(),
            Command::AddTeam {
                name: "Hawks".to_string(),
                logo_url: None,
            },
        )
        .unwrap();
        let state = apply(
            &state,
            Command::AddTeam {
                name: "Owls".to_string(),
                logo_url: Some("owl.png".to_string()),
            },
        )
        .unwrap();
        assert!(state.teams[0].is_main);
        assert!(!state.teams[1].is_main);

        let err = apply(
            &state,
            Command::AddTeam {
                name: "Hawks".to_string(),
                logo_url: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_update_team_keeps_main_flag() {
        let state = apply(
            &Dataset::default(),
            Command::AddTeam {
                name: "Hawks".to_string(),
                logo_url: None,
            },
        )
        .unwrap();
        let mut team = state.teams[0].clone();
        team.name = "Sea Hawks".to_string();
        team.is_main = false;
        let state = apply(&state, Command::UpdateTeam(team)).unwrap();
        assert_eq!(state.teams[0].name, "Sea Hawks");
        assert!(state.teams[0].is_main);
    }

    #[test]
    fn test_delete_main_team_moves_flag() {
        let (state, champ) = with_championship("League");
        let state = ingest(&state, &champ, GAME);
        let main_id = state.main_team().unwrap().id.clone();

        let state = apply(&state, Command::DeleteTeam { team_id: main_id.clone() }).unwrap();
        assert_eq!(state.teams.len(), 1);
        assert!(state.teams[0].is_main);
        assert_ne!(state.teams[0].id, main_id);
        assert!(state.championship_teams.iter().all(|ct| ct.team_id != main_id));
        // Historical rows stay attached to the removed id
        assert_eq!(state.matches[0].team1_id, main_id);
        assert_eq!(state.stats.len(), 2);
    }

    #[test]
    fn test_set_main_team() {
        let (state, champ) = with_championship("League");
        let state = ingest(&state, &champ, GAME);
        let other = state.teams[1].id.clone();
        let state = apply(&state, Command::SetMainTeam { team_id: other.clone() }).unwrap();
        assert_eq!(state.teams.iter().filter(|t| t.is_main).count(), 1);
        assert_eq!(state.main_team().unwrap().id, other);

        let err = apply(&state, Command::SetMainTeam { team_id: "nope".to_string() }).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_update_player_number_collision() {
        let (state, champ) = with_championship("League");
        let state = ingest(
            &state,
            &champ,
            "Player;No.;-Pt\nA;1;1\nB;2;1\nX Totals;;2\nY Totals;;0",
        );
        let mut b = state.players[1].clone();
        b.number = "1".to_string();
        let err = apply(&state, Command::UpdatePlayer(b.clone())).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        b.number = "12".to_string();
        b.picture_url = Some("b.png".to_string());
        let state = apply(&state, Command::UpdatePlayer(b)).unwrap();
        assert_eq!(state.players[1].number, "12");
        assert_eq!(state.players[1].picture_url.as_deref(), Some("b.png"));
    }

    #[test]
    fn test_update_match_recomputes_scores() {
        let (state, champ) = with_championship("League");
        let state = ingest(&state, &champ, GAME);
        let match_id = state.matches[0].id.clone();

        let state = apply(
            &state,
            Command::UpdateMatch {
                match_id,
                date: NaiveDate::from_ymd_opt(2024, 1, 20),
                team1_periods: Some(PeriodScores {
                    quarters: vec![20.0, 15.0, 18.0, 17.0],
                    overtimes: vec![9.0],
                }),
                team2_periods: None,
            },
        )
        .unwrap();

        let game = &state.matches[0];
        assert_eq!(game.team1_score, 79.0);
        assert_eq!(game.team2_score, 8.0);
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn test_delete_championship_cascades() {
        let (state, league) = with_championship("League");
        let state = apply(
            &state,
            Command::AddChampionship {
                name: "Cup".to_string(),
            },
        )
        .unwrap();
        let cup = state.resolve_championship("Cup").unwrap().id.clone();

        let state = ingest(&state, &league, GAME);
        let state = ingest(&state, &cup, GAME);
        let state = ingest(&state, &league, GAME);
        assert_eq!(state.matches.len(), 3);

        let state = apply(
            &state,
            Command::DeleteChampionship {
                championship_id: league.clone(),
            },
        )
        .unwrap();

        assert_eq!(state.championships.len(), 1);
        assert_eq!(state.matches.len(), 1);
        assert!(state.matches.iter().all(|m| m.championship_id == cup));
        assert!(state
            .stats
            .iter()
            .all(|s| state.find_match(&s.match_id).is_some()));
        assert_eq!(state.stats.len(), 2);
        assert!(state
            .championship_teams
            .iter()
            .all(|ct| ct.championship_id != league));
        // Teams and players survive
        assert_eq!(state.teams.len(), 2);
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn test_membership_is_idempotent() {
        let (state, champ) = with_championship("League");
        let state = apply(
            &state,
            Command::AddTeam {
                name: "Hawks".to_string(),
                logo_url: None,
            },
        )
        .unwrap();
        let team = state.teams[0].id.clone();
        let add = Command::AddChampionshipTeam {
            championship_id: champ.clone(),
            team_id: team.clone(),
        };
        let state = apply(&state, add.clone()).unwrap();
        let state = apply(&state, add).unwrap();
        assert_eq!(state.championship_teams.len(), 1);

        let state = apply(
            &state,
            Command::RemoveChampionshipTeam {
                championship_id: champ,
                team_id: team,
            },
        )
        .unwrap();
        assert!(state.championship_teams.is_empty());
    }

    #[test]
    fn test_rename_championship() {
        let (state, champ) = with_championship("League");
        let state = apply(
            &state,
            Command::UpdateChampionship {
                championship_id: champ.clone(),
                name: "Premier League".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.championship(&champ).unwrap().name, "Premier League");
    }
}
