use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::metrics::ShootingLine;
use crate::model::{Dataset, PlayerStats};

/// Per-game figures of one player across the selected matches
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAverages {
    pub player_id: String,
    pub name: String,
    pub number: String,
    pub team_name: String,
    pub games: usize,
    pub pts: f64,
    pub rebs: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub fg_pct: f64,
    pub two_pt_pct: f64,
    pub three_pt_pct: f64,
    pub ft_pct: f64,
    pub efg_pct: f64,
}

#[derive(Default)]
struct Totals {
    games: usize,
    pts: f64,
    rebs: f64,
    ast: f64,
    stl: f64,
    blk: f64,
    shooting: ShootingLine,
}

impl Totals {
    fn add(&mut self, line: &PlayerStats) {
        self.games += 1;
        self.pts += line.pts;
        self.rebs += line.rebs;
        self.ast += line.ast;
        self.stl += line.stl;
        self.blk += line.blk;

        let s = &mut self.shooting;
        s.fg += line.fg;
        s.fga += line.fga;
        s.three_pt += line.three_pt;
        s.three_pt_a += line.three_pt_a;
        s.ft += line.ft;
        s.fta += line.fta;
        s.two_pt = Some(s.two_pt.unwrap_or(0.0) + line.two_pt);
        s.two_pt_a = Some(s.two_pt_a.unwrap_or(0.0) + line.two_pt_a);
    }
}

/// Averages for every player with at least one line in the selected
/// matches; `championship` restricts to matches of that championship id.
pub fn player_averages(dataset: &Dataset, championship: Option<&str>) -> Vec<PlayerAverages> {
    let selected: HashSet<&str> = dataset
        .matches
        .iter()
        .filter(|m| championship.map_or(true, |c| m.championship_id == c))
        .map(|m| m.id.as_str())
        .collect();

    let mut totals: HashMap<&str, Totals> = HashMap::new();
    for line in dataset
        .stats
        .iter()
        .filter(|s| selected.contains(s.match_id.as_str()))
    {
        totals.entry(line.player_id.as_str()).or_default().add(line);
    }

    dataset
        .players
        .iter()
        .filter_map(|player| {
            let t = totals.get(player.id.as_str())?;
            let games = t.games as f64;
            let splits = t.shooting.derive();

            Some(PlayerAverages {
                player_id: player.id.clone(),
                name: player.name.clone(),
                number: player.number.clone(),
                team_name: dataset
                    .team(&player.team_id)
                    .map_or_else(|| "N/A".to_string(), |team| team.name.clone()),
                games: t.games,
                pts: t.pts / games,
                rebs: t.rebs / games,
                ast: t.ast / games,
                stl: t.stl / games,
                blk: t.blk / games,
                fg_pct: splits.fg_pct,
                two_pt_pct: splits.two_pt_pct,
                three_pt_pct: splits.three_pt_pct,
                ft_pct: splits.ft_pct,
                efg_pct: splits.efg_pct,
            })
        })
        .collect()
}

/// Plain-text table of averages
pub struct AveragesTable<'a>(pub &'a [PlayerAverages]);

impl fmt::Display for AveragesTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<16} {:>3} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6} {:>6} {:>6}",
            "Player", "Team", "GP", "PTS", "REB", "AST", "STL", "BLK", "FG%", "2P%", "3P%", "FT%", "eFG%"
        )?;
        for a in self.0 {
            writeln!(
                f,
                "{:<24} {:<16} {:>3} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}",
                format!("{} - {}", a.number, a.name),
                a.team_name,
                a.games,
                a.pts,
                a.rebs,
                a.ast,
                a.stl,
                a.blk,
                a.fg_pct,
                a.two_pt_pct,
                a.three_pt_pct,
                a.ft_pct,
                a.efg_pct
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{apply, merge, Command};
    use crate::metrics::pct;
    use crate::parser::{parse_csv, SAMPLE_CSV};

    fn two_championships() -> Dataset {
        let bundle = parse_csv(SAMPLE_CSV).unwrap();
        let state = merge(&Dataset::default(), &bundle, "c1");
        merge(&state, &bundle, "c2")
    }

    #[test]
    fn test_averages_over_all_matches() {
        let state = two_championships();
        let averages = player_averages(&state, None);

        assert_eq!(averages.len(), 4);
        let first = &averages[0];
        assert_eq!(first.name, "Player One");
        assert_eq!(first.team_name, "Team A");
        assert_eq!(first.games, 2);

        let line = &state.stats[0];
        assert_eq!(first.pts, line.pts);
        // Recomputed from makes and attempts, not the exported 47
        assert!((first.fg_pct - pct(line.fg, line.fga)).abs() < 1e-9);
    }

    #[test]
    fn test_championship_filter() {
        let state = two_championships();
        let averages = player_averages(&state, Some("c1"));
        assert!(averages.iter().all(|a| a.games == 1));
        assert!(player_averages(&state, Some("c3")).is_empty());
    }

    #[test]
    fn test_percentages_from_summed_totals() {
        let mut state = merge(&Dataset::default(), &parse_csv(SAMPLE_CSV).unwrap(), "c");
        let player_id = state.stats[0].player_id.clone();
        for line in state.stats.iter_mut().filter(|s| s.player_id == player_id) {
            line.fg = 3.0;
            line.fga = 4.0;
        }
        let mut extra = state.stats[0].clone();
        extra.id = "stat-extra".to_string();
        extra.match_id = "match-extra".to_string();
        extra.fg = 0.0;
        extra.fga = 6.0;
        state.stats.push(extra);
        let mut game = state.matches[0].clone();
        game.id = "match-extra".to_string();
        state.matches.push(game);

        let averages = player_averages(&state, None);
        let first = averages.iter().find(|a| a.player_id == player_id).unwrap();
        assert_eq!(first.games, 2);
        // 3 of 10, not the mean of 75% and 0%
        assert!((first.fg_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_deleted_team_shows_na() {
        let state = merge(&Dataset::default(), &parse_csv(SAMPLE_CSV).unwrap(), "c");
        let team_id = state.teams[1].id.clone();
        let state = apply(&state, Command::DeleteTeam { team_id }).unwrap();

        let averages = player_averages(&state, None);
        assert_eq!(averages.len(), 4);
        assert_eq!(averages[3].team_name, "N/A");
    }

    #[test]
    fn test_table_renders_every_player() {
        let state = two_championships();
        let averages = player_averages(&state, None);
        let rendered = AveragesTable(&averages).to_string();
        assert_eq!(rendered.lines().count(), 5);
        assert!(rendered.contains("902 - Player Four"));
    }
}
