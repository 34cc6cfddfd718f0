use chrono::Local;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, info, warn};

use super::headers::{lookup_header, Column};
use crate::error::{Error, Result};
use crate::metrics::fill_derived;
use crate::model::{new_id, Match, MatchData, Player, PlayerStats, StatField, Team};

/// Marker that identifies a team summary row
pub const TOTALS_MARKER: &str = "Totals";

/// Field separator of the exports
pub const DELIMITER: u8 = b';';

/// Jersey numbers above this value mark the second team's roster.
///
/// Some statistics tools renumber the away side into the 900 range. This is
/// a heuristic tied to that convention, not a general rule.
pub const TEAM_SPLIT_JERSEY_THRESHOLD: i64 = 900;

/// Two-team sample export in the dialect the parser expects
pub const SAMPLE_CSV: &str = "\
Player;No.;-Mins;-2P;-2PA;-2P%;-3P;-3PA;-3P%;-FT;-FTA;-FT%;FGM;FGA;FG %;-DR;-OR;-PF;-DF;-TO;-ST;-AST;-BLK;-BLKA;-Pt;VPS;+/-
Player One;1;25;5;10;50;2;5;40;3;4;75;7;15;47;4;1;2;3;2;1;5;1;0;19;1.27;10
Player Two;2;20;3;6;50;1;2;50;0;0;0;4;8;50;5;2;1;1;3;2;3;0;1;9;0.75;5
Team A Totals;;200;28;53;53;3;18;17;12;23;52;43;94;46;18;17;13;17;30;38;13;1;1;77;;
Player Three;901;28;6;12;50;1;4;25;5;6;83;7;16;44;6;3;3;4;4;0;2;2;1;20;1.11;-8
Player Four;902;22;4;9;44;0;3;0;2;2;100;4;12;33;3;0;2;2;1;3;1;0;0;10;0.56;-5
Team B Totals;;200;30;60;50;5;20;25;15;20;75;50;100;50;25;10;15;18;20;15;10;5;2;90;;
";

/// Tolerant numeric coercion: never fails.
///
/// Blank cells are 0, a trailing `%` is dropped, the longest leading decimal
/// number is used (`"12abc"` is 12, `"1e3"` is 1000) and anything else is 0.
/// A decimal comma reads as a decimal point.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    let mut prefix = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    if let Some(sign) = chars.next_if(|c| *c == '-' || *c == '+') {
        prefix.push(sign);
    }

    let mut seen_digit = false;
    let mut seen_point = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            seen_digit = true;
            prefix.push(c);
        } else if matches!(c, '.' | ',') && !seen_point {
            seen_point = true;
            prefix.push('.');
        } else {
            break;
        }
        chars.next();
    }

    if !seen_digit {
        return 0.0;
    }
    let rest: String = chars.collect();
    if let Some(exponent) = exponent_prefix(&rest) {
        prefix.push_str(exponent);
    }
    prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `e3`, `E-2`, `e+10` at the start of `rest`; only when digits follow
fn exponent_prefix(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix(|c: char| c == 'e' || c == 'E')?;
    let sign_len = usize::from(body.starts_with(|c: char| c == '+' || c == '-'));
    let digits = body[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    (digits > 0).then(|| &rest[..1 + sign_len + digits])
}

/// Read an export from disk and parse it
pub fn parse_file(path: &Path) -> Result<MatchData> {
    let text = std::fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = text.len(), "read box score export");
    parse_csv(&text)
}

/// Parse a semicolon-separated box score into a [`MatchData`] bundle.
///
/// The first line is the header. Rows containing `Totals` are the two team
/// summaries (in order: first team, second team); every other row is a
/// player line.
pub fn parse_csv(text: &str) -> Result<MatchData> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::malformed(format!("unreadable record: {}", e)))?;
        if record.iter().any(|cell| !cell.is_empty()) {
            records.push(record);
        }
    }

    let mut records = records.into_iter();
    let header_record = records
        .next()
        .ok_or_else(|| Error::malformed("CSV is empty"))?;
    let headers: Vec<Option<Column>> = header_record.iter().map(lookup_header).collect();

    let (summary_rows, player_rows): (Vec<StringRecord>, Vec<StringRecord>) =
        records.partition(|record| record.iter().any(|cell| cell.contains(TOTALS_MARKER)));

    let pts_index = headers
        .iter()
        .position(|h| *h == Some(Column::Stat(StatField::Pts)));

    let mut teams = Vec::with_capacity(2);
    let mut scores = Vec::with_capacity(2);
    for row in &summary_rows {
        let name = row.get(0).unwrap_or_default().replace(TOTALS_MARKER, "").trim().to_string();
        let score = pts_index
            .and_then(|i| row.get(i))
            .map(parse_number)
            .unwrap_or(0.0);
        teams.push(Team::stub(new_id("team"), name));
        scores.push(score);
    }

    if teams.len() != 2 {
        return Err(Error::malformed(
            "CSV must contain totals for exactly two teams",
        ));
    }
    if teams[0].name == teams[1].name {
        return Err(Error::malformed(format!(
            "both team totals are named {:?}",
            teams[0].name
        )));
    }

    let number_index = headers
        .iter()
        .position(|h| *h == Some(Column::PlayerNumber))
        .ok_or_else(|| Error::malformed("CSV header must include 'No.' for player numbers"))?;

    let game = Match {
        id: new_id("match"),
        date: Local::now().date_naive(),
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

    let mut players = Vec::with_capacity(player_rows.len());
    let mut stats = Vec::with_capacity(player_rows.len());
    let mut team_index = 0;

    for (row_index, row) in player_rows.iter().enumerate() {
        if row.len() < headers.len() {
            warn!(
                row = row_index,
                cells = row.len(),
                expected = headers.len(),
                "skipping short player row"
            );
            continue;
        }

        let jersey = row.get(number_index).unwrap_or_default();
        if row_index > 0
            && jersey
                .parse::<i64>()
                .map_or(false, |n| n > TEAM_SPLIT_JERSEY_THRESHOLD)
        {
            team_index = 1;
        }
        let team = &teams[team_index];

        let mut line = PlayerStats::default();
        for (column, value) in headers.iter().zip(row.iter()) {
            match column {
                Some(Column::PlayerName) => line.player_name = value.to_string(),
                Some(Column::PlayerNumber) => line.player_number = value.to_string(),
                Some(Column::Stat(field)) => line.set(*field, parse_number(value)),
                None => {}
            }
        }
        fill_derived(&mut line);

        let player = Player {
            id: new_id("player"),
            name: line.player_name.clone(),
            number: line.player_number.clone(),
            team_id: team.id.clone(),
            picture_url: None,
        };
        debug!(player = %player.name, number = %player.number, team = %team.name, "parsed player row");

        line.id = new_id("stat");
        line.match_id = game.id.clone();
        line.player_id = player.id.clone();
        line.team_id = team.id.clone();

        players.push(player);
        stats.push(line);
    }

    info!(
        team1 = %game.team1_name,
        team2 = %game.team2_name,
        players = players.len(),
        "parsed box score"
    );

    Ok(MatchData {
        game,
        teams,
        players,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("47"), 47.0);
        assert_eq!(parse_number("47%"), 47.0);
        assert_eq!(parse_number(" 52.5 % "), 52.5);
        assert_eq!(parse_number("-8"), -8.0);
        assert_eq!(parse_number("+3"), 3.0);
        assert_eq!(parse_number("1,27"), 1.27);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("12abc"), 12.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_parse_number_exponent() {
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("2.5E-1"), 0.25);
        assert_eq!(parse_number("4e+2"), 400.0);
        assert_eq!(parse_number("7e"), 7.0);
        assert_eq!(parse_number("7eX"), 7.0);
        assert_eq!(parse_number("1e400"), 0.0);
    }

    #[test]
    fn test_quoted_cell_keeps_columns_aligned() {
        let data = parse_csv(
            "Player;No.;-Pt\n\"Smith; J\";4;10\nTeam A Totals;;10\nB;901;8\nTeam B Totals;;8",
        )
        .unwrap();
        assert_eq!(data.players[0].name, "Smith; J");
        assert_eq!(data.players[0].number, "4");
        assert_eq!(data.stats[0].pts, 10.0);
    }

    #[test]
    fn test_same_team_on_both_totals_rejected() {
        let err = parse_csv(
            "Player;No.;-Pt\nA;1;10\nHawks Totals;;10\nB;901;8\nZ;1;5\nHawks Totals;;8",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("Hawks"));
    }

    #[test]
    fn test_two_team_scenario() {
        let data = parse_csv("Player;No.;-Pt\nA;1;10\nTeam A Totals;;10\nB;901;8\nTeam B Totals;;8")
            .unwrap();

        assert_eq!(data.game.team1_score, 10.0);
        assert_eq!(data.game.team2_score, 8.0);
        assert_eq!(data.teams.len(), 2);
        assert_eq!(data.teams[0].name, "Team A");
        assert_eq!(data.teams[1].name, "Team B");
        assert_eq!(data.game.team1_name, "Team A");

        assert_eq!(data.players.len(), 2);
        assert_eq!(data.players[0].name, "A");
        assert_eq!(data.players[0].team_id, data.teams[0].id);
        assert_eq!(data.players[1].name, "B");
        assert_eq!(data.players[1].number, "901");
        assert_eq!(data.players[1].team_id, data.teams[1].id);

        assert_eq!(data.stats[0].pts, 10.0);
        assert_eq!(data.stats[1].pts, 8.0);
        assert_eq!(data.stats[1].match_id, data.game.id);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_team_count_must_be_two() {
        let err = parse_csv("Player;No.;-Pt\nA;1;10\nTeam A Totals;;10").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("exactly two teams"));

        let err = parse_csv(
            "Player;No.;-Pt\nA Totals;;1\nB Totals;;2\nC Totals;;3",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_missing_number_column() {
        let err = parse_csv("Player;-Pt\nA;10\nTeam A Totals;10\nB;8\nTeam B Totals;8").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("No."));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_csv("  \n "), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_alias_header_and_crlf() {
        let data = parse_csv("Player;N.;Pts\r\nA;4;12\r\nX Totals;;12\r\nB;905;3\r\nY Totals;;3\r\n")
            .unwrap();
        assert_eq!(data.players[0].number, "4");
        assert_eq!(data.players[1].team_id, data.teams[1].id);
        assert_eq!(data.game.team2_score, 3.0);
    }

    #[test]
    fn test_first_row_never_switches_team() {
        let data = parse_csv("Player;No.;-Pt\nA;950;1\nB;2;1\nX Totals;;2\nY Totals;;0").unwrap();
        assert!(data.players.iter().all(|p| p.team_id == data.teams[0].id));
    }

    #[test]
    fn test_team_stays_switched() {
        let data = parse_csv(
            "Player;No.;-Pt\nA;1;1\nB;901;1\nC;5;1\nX Totals;;1\nY Totals;;2",
        )
        .unwrap();
        assert_eq!(data.players[0].team_id, data.teams[0].id);
        assert_eq!(data.players[1].team_id, data.teams[1].id);
        assert_eq!(data.players[2].team_id, data.teams[1].id);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let data = parse_csv("Player;No.;-Pt\nA;1\nB;2;4\nX Totals;;4\nY Totals;;0").unwrap();
        assert_eq!(data.players.len(), 1);
        assert_eq!(data.players[0].name, "B");
    }

    #[test]
    fn test_no_points_column_scores_zero() {
        let data = parse_csv("Player;No.;Ast\nA;1;3\nX Totals;;3\nY Totals;;0").unwrap();
        assert_eq!(data.game.team1_score, 0.0);
        assert_eq!(data.stats[0].ast, 3.0);
    }

    #[test]
    fn test_sample_export() {
        let data = parse_csv(SAMPLE_CSV).unwrap();
        assert_eq!(data.game.team1_name, "Team A");
        assert_eq!(data.game.team2_name, "Team B");
        assert_eq!(data.game.team1_score, 77.0);
        assert_eq!(data.game.team2_score, 90.0);
        assert_eq!(data.players.len(), 4);

        let one = &data.stats[0];
        assert_eq!(one.player_name, "Player One");
        assert_eq!(one.minutes, 25.0);
        assert_eq!(one.pts, 19.0);
        assert_eq!(one.fg_pct, 47.0);
        assert_eq!(one.vps, 1.27);
        assert_eq!(one.plus_minus, 10.0);
        assert_eq!(one.rebs, 5.0);
        assert!((one.efg_pct - 53.333_333).abs() < 1e-4);

        let three = &data.stats[2];
        assert_eq!(three.player_number, "901");
        assert_eq!(three.team_id, data.teams[1].id);
        assert_eq!(three.plus_minus, -8.0);
    }
}
