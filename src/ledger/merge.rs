//! Reconciliation of a match bundle into the dataset.
//!
//! Teams are identified by name, players by (team, jersey number). Bundle
//! ids are remapped to canonical ids; the inputs are never modified. New
//! teams keep their stub id unless it is already taken, matches and stat
//! lines always get fresh ids.

use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::model::{new_id, Dataset, MatchData, Player, PlayerStats};

/// Merge `bundle` into `current`, attaching the match to `championship_id`.
///
/// Every call appends one match and its stat lines, even for a bundle that
/// was merged before; only teams and players are deduplicated. Stat lines
/// whose player stub or team cannot be resolved are dropped, as is any
/// further line for a (team, number) slot already seen in this bundle.
///
/// # Panics
///
/// Panics if the bundle's match references a team that is not in the
/// bundle's own team list. Use [`MatchData::validate`] first when the bundle
/// was not produced by this crate.
pub fn merge(current: &Dataset, bundle: &MatchData, championship_id: &str) -> Dataset {
    let mut next = current.clone();

    // Teams
    let mut team_ids: HashMap<&str, String> = HashMap::new();
    let any_main = current.teams.iter().any(|t| t.is_main);
    let mut created_teams = 0;

    for stub in &bundle.teams {
        if let Some(existing) = next.team_by_name(&stub.name) {
            debug!(team = %stub.name, id = %existing.id, "reusing team");
            team_ids.insert(stub.id.as_str(), existing.id.clone());
            continue;
        }

        let first_ever = current.teams.is_empty() && created_teams == 0;
        let mut team = stub.clone();
        team.is_main = !any_main && first_ever;
        if next.team(&team.id).is_some() {
            team.id = new_id("team");
        }
        debug!(team = %team.name, main = team.is_main, "creating team");

        team_ids.insert(stub.id.as_str(), team.id.clone());
        next.teams.push(team);
        created_teams += 1;
    }

    // Players and stat lines
    let stubs: HashMap<&str, &Player> = bundle
        .players
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();
    let mut roster: HashMap<(String, String), usize> = next
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| ((p.team_id.clone(), p.number.clone()), i))
        .collect();

    let match_id = new_id("match");
    let mut seen_slots: HashSet<(String, String)> = HashSet::new();
    let mut created_players = 0;
    let mut final_stats: Vec<PlayerStats> = Vec::with_capacity(bundle.stats.len());

    for raw in &bundle.stats {
        let Some(stub) = stubs.get(raw.player_id.as_str()) else {
            debug!(stat = %raw.id, "dropping stat line without player stub");
            continue;
        };
        let Some(team_id) = team_ids.get(raw.team_id.as_str()) else {
            debug!(stat = %raw.id, team = %raw.team_id, "dropping stat line with unknown team");
            continue;
        };

        let key = (team_id.clone(), stub.number.clone());
        if !seen_slots.insert(key.clone()) {
            warn!(
                player = %stub.name,
                number = %stub.number,
                pts = raw.pts,
                "dropping second stat line for the same jersey in one match"
            );
            continue;
        }

        let player_id = match roster.get(&key) {
            Some(&index) => {
                let existing = &mut next.players[index];
                if existing.name != stub.name {
                    debug!(from = %existing.name, to = %stub.name, number = %stub.number, "renaming player");
                    existing.name = stub.name.clone();
                }
                existing.id.clone()
            }
            None => {
                let player = Player {
                    id: new_id("player"),
                    name: stub.name.clone(),
                    number: stub.number.clone(),
                    team_id: team_id.clone(),
                    picture_url: None,
                };
                let id = player.id.clone();
                roster.insert(key, next.players.len());
                next.players.push(player);
                created_players += 1;
                id
            }
        };

        let mut line = raw.clone();
        line.id = new_id("stat");
        line.match_id = match_id.clone();
        line.team_id = team_id.clone();
        line.player_id = player_id;
        final_stats.push(line);
    }

    // Match
    let canonical = |bundle_team: &str| -> String {
        match team_ids.get(bundle_team) {
            Some(id) => id.clone(),
            None => panic!(
                "match {} references team {} which is not part of its bundle",
                bundle.game.id, bundle_team
            ),
        }
    };
    let team1_id = canonical(&bundle.game.team1_id);
    let team2_id = canonical(&bundle.game.team2_id);
    let name_of = |id: &str| {
        next.team(id)
            .map(|t| t.name.clone())
            .unwrap_or_default()
    };

    let mut game = bundle.game.clone();
    game.id = match_id;
    game.team1_name = name_of(&team1_id);
    game.team2_name = name_of(&team2_id);
    game.team1_id = team1_id;
    game.team2_id = team2_id;
    game.championship_id = championship_id.to_string();

    info!(
        match_id = %game.id,
        new_teams = created_teams,
        new_players = created_players,
        stat_lines = final_stats.len(),
        "merged match"
    );

    next.matches.push(game);
    next.stats.extend(final_stats);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    const SCENARIO: &str = "Player;No.;-Pt\nA;1;10\nTeam A Totals;;10\nB;901;8\nTeam B Totals;;8";

    #[test]
    fn test_merge_into_empty() {
        let bundle = parse_csv(SCENARIO).unwrap();
        let state = merge(&Dataset::default(), &bundle, "champ-1");

        assert_eq!(state.teams.len(), 2);
        assert!(state.teams[0].is_main);
        assert!(!state.teams[1].is_main);
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.stats.len(), 2);

        let game = &state.matches[0];
        assert_eq!(game.championship_id, "champ-1");
        assert_eq!(game.team1_name, "Team A");
        assert_eq!(game.team1_id, state.teams[0].id);

        for line in &state.stats {
            assert_eq!(line.match_id, game.id);
            let player = state.player(&line.player_id).unwrap();
            assert_eq!(player.team_id, line.team_id);
        }
    }

    #[test]
    fn test_inputs_untouched() {
        let bundle = parse_csv(SCENARIO).unwrap();
        let bundle_before = bundle.clone();
        let empty = Dataset::default();
        let _ = merge(&empty, &bundle, "c");
        assert_eq!(bundle, bundle_before);
        assert_eq!(empty, Dataset::default());
    }

    #[test]
    fn test_same_bundle_twice() {
        let bundle = parse_csv(SCENARIO).unwrap();
        let once = merge(&Dataset::default(), &bundle, "c");
        let twice = merge(&once, &bundle, "c");

        assert_eq!(twice.teams.len(), 2);
        assert_eq!(twice.players.len(), 2);
        assert_eq!(twice.matches.len(), 2);
        assert_eq!(twice.stats.len(), 4);
        assert_ne!(twice.matches[0].id, twice.matches[1].id);
        assert_ne!(twice.stats[0].id, twice.stats[2].id);
        assert_eq!(twice.teams.iter().filter(|t| t.is_main).count(), 1);
    }

    #[test]
    fn test_team_reused_by_name() {
        let first = parse_csv(SCENARIO).unwrap();
        let state = merge(&Dataset::default(), &first, "c");
        let team_a = state.team_by_name("Team A").unwrap().id.clone();

        let second = parse_csv("Player;No.;-Pt\nA;1;4\nTeam A Totals;;4\nZ;901;2\nTeam C Totals;;2").unwrap();
        let state = merge(&state, &second, "c");

        assert_eq!(state.teams.len(), 3);
        assert_eq!(state.matches[1].team1_id, team_a);
        assert!(!state.team_by_name("Team C").unwrap().is_main);
        assert_eq!(state.players.len(), 3);
    }

    #[test]
    fn test_player_renamed_in_place() {
        let first = parse_csv(SCENARIO).unwrap();
        let state = merge(&Dataset::default(), &first, "c");
        let original_id = state.players[0].id.clone();

        let renamed = parse_csv("Player;No.;-Pt\nAlice;1;7\nTeam A Totals;;7\nB;901;1\nTeam B Totals;;1").unwrap();
        let state = merge(&state, &renamed, "c");

        assert_eq!(state.players.len(), 2);
        assert_eq!(state.players[0].id, original_id);
        assert_eq!(state.players[0].name, "Alice");
        assert_eq!(state.stats[2].player_id, original_id);
    }

    #[test]
    fn test_one_line_per_player_per_match() {
        let bundle = parse_csv("Player;No.;-Pt\nA;1;1\nA2;1;2\nX Totals;;3\nY Totals;;0").unwrap();
        let state = merge(&Dataset::default(), &bundle, "c");
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].name, "A");
        assert_eq!(state.stats.len(), 1);
        assert_eq!(state.stats[0].pts, 1.0);
    }

    #[test]
    fn test_unresolved_team_is_dropped() {
        let mut bundle = parse_csv(SCENARIO).unwrap();
        bundle.stats[1].team_id = "team-nowhere".to_string();
        let state = merge(&Dataset::default(), &bundle, "c");
        assert_eq!(state.stats.len(), 1);
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.matches.len(), 1);
    }

    #[test]
    fn test_second_merge_never_assigns_main() {
        let mut state = Dataset::default();
        state.teams.push(crate::model::Team::stub("t-1", "Existing"));
        let bundle = parse_csv(SCENARIO).unwrap();
        let state = merge(&state, &bundle, "c");
        assert!(state.teams.iter().all(|t| !t.is_main));
    }

    #[test]
    #[should_panic(expected = "not part of its bundle")]
    fn test_match_team_outside_bundle_panics() {
        let mut bundle = parse_csv(SCENARIO).unwrap();
        bundle.game.team2_id = "team-ghost".to_string();
        let _ = merge(&Dataset::default(), &bundle, "c");
    }
}
