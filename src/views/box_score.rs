use std::fmt;

use crate::model::{Dataset, Match, PlayerStats};

/// One match with both sides' stat lines
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore<'a> {
    pub game: &'a Match,
    pub championship: Option<&'a str>,
    pub team1: Vec<&'a PlayerStats>,
    pub team2: Vec<&'a PlayerStats>,
}

/// Stat lines of `match_id`, split by side in ingestion order
pub fn box_score<'a>(dataset: &'a Dataset, match_id: &str) -> Option<BoxScore<'a>> {
    let game = dataset.find_match(match_id)?;
    let lines = |team_id: &str| -> Vec<&'a PlayerStats> {
        dataset
            .stats
            .iter()
            .filter(|s| s.match_id == game.id && s.team_id == team_id)
            .collect()
    };

    Some(BoxScore {
        game,
        championship: dataset
            .championship(&game.championship_id)
            .map(|c| c.name.as_str()),
        team1: lines(&game.team1_id),
        team2: lines(&game.team2_id),
    })
}

impl fmt::Display for BoxScore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} | {} | {} {} - {} {}",
            self.game.date,
            self.championship.unwrap_or("N/A"),
            self.game.team1_name,
            self.game.team1_score,
            self.game.team2_score,
            self.game.team2_name
        )?;

        for (name, lines) in [
            (&self.game.team1_name, &self.team1),
            (&self.game.team2_name, &self.team2),
        ] {
            writeln!(f, "\n{}", name)?;
            writeln!(
                f,
                "{:<24} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>7} {:>6} {:>7} {:>6} {:>7} {:>5}",
                "Player", "MIN", "PTS", "REB", "AST", "STL", "BLK", "FG", "FG%", "3P", "3P%", "FT", "+/-"
            )?;
            for s in lines.iter() {
                writeln!(
                    f,
                    "{:<24} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>7} {:>6.1} {:>7} {:>6.1} {:>7} {:>5}",
                    format!("{} - {}", s.player_number, s.player_name),
                    s.minutes,
                    s.pts,
                    s.rebs,
                    s.ast,
                    s.stl,
                    s.blk,
                    format!("{}/{}", s.fg, s.fga),
                    s.fg_pct,
                    format!("{}/{}", s.three_pt, s.three_pt_a),
                    s.three_pt_pct,
                    format!("{}/{}", s.ft, s.fta),
                    s.plus_minus
                )?;
            }
        }
        Ok(())
    }
}
