use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction};
use std::path::Path;
use tracing::debug;

use super::schema::{
    TableSchema, ALL_TABLES, CHAMPIONSHIPS, CHAMPIONSHIP_TEAMS, MATCHES, PLAYERS, PLAYER_STATS,
    STAT_IDENTITY_COLUMNS, TEAMS,
};
use super::schema_gen::{generate_create_table, generate_indexes, generate_insert, generate_select};
use super::Storage;
use crate::error::Result;
use crate::model::{
    Championship, ChampionshipTeam, Dataset, Match, PeriodScores, Player, PlayerStats, StatField,
    Team,
};

/// One table per collection; `save` rewrites every table in one transaction
pub struct SqliteStore {
    conn: Connection,
    label: String,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Self::init(conn, format!("sqlite {}", db_path.display()))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, "sqlite :memory:".to_string())
    }

    fn init(conn: Connection, label: String) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        for schema in ALL_TABLES {
            conn.execute(&generate_create_table(schema), [])?;
            for index_sql in generate_indexes(schema) {
                conn.execute(&index_sql, [])?;
            }
        }

        Ok(Self { conn, label })
    }

    fn read_table<T>(
        &self,
        schema: &TableSchema,
        map: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = self.conn.prepare(&generate_select(schema))?;
        let rows = stmt.query_map([], |row| map(row))?;
        let items = rows.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(items)
    }
}

impl Storage for SqliteStore {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset {
            teams: self.read_table(&TEAMS, team_from_row)?,
            players: self.read_table(&PLAYERS, player_from_row)?,
            matches: self.read_table(&MATCHES, match_from_row)?,
            stats: self.read_table(&PLAYER_STATS, stats_from_row)?,
            championships: self.read_table(&CHAMPIONSHIPS, |row| {
                Ok(Championship {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?,
            championship_teams: self.read_table(&CHAMPIONSHIP_TEAMS, |row| {
                Ok(ChampionshipTeam {
                    championship_id: row.get(0)?,
                    team_id: row.get(1)?,
                })
            })?,
        })
    }

    fn save(&mut self, dataset: &Dataset) -> Result<()> {
        let tx = self.conn.transaction()?;

        // Children first so foreign keys never dangle mid-transaction
        for schema in ALL_TABLES.iter().rev() {
            tx.execute(&format!("DELETE FROM {}", schema.name), [])?;
        }

        insert_rows(&tx, &TEAMS, dataset.teams.iter().map(team_values))?;
        insert_rows(
            &tx,
            &CHAMPIONSHIPS,
            dataset
                .championships
                .iter()
                .map(|c| vec![text(&c.id), text(&c.name)]),
        )?;
        insert_rows(&tx, &PLAYERS, dataset.players.iter().map(player_values))?;

        let mut match_rows = Vec::with_capacity(dataset.matches.len());
        for game in &dataset.matches {
            match_rows.push(match_values(game)?);
        }
        insert_rows(&tx, &MATCHES, match_rows.into_iter())?;

        insert_rows(&tx, &PLAYER_STATS, dataset.stats.iter().map(stats_values))?;
        insert_rows(
            &tx,
            &CHAMPIONSHIP_TEAMS,
            dataset
                .championship_teams
                .iter()
                .map(|ct| vec![text(&ct.championship_id), text(&ct.team_id)]),
        )?;

        tx.commit()?;
        debug!(store = %self.label, stats = dataset.stats.len(), "saved ledger");
        Ok(())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn insert_rows(
    tx: &Transaction<'_>,
    schema: &TableSchema,
    rows: impl Iterator<Item = Vec<Value>>,
) -> Result<()> {
    let mut stmt = tx.prepare_cached(&generate_insert(schema))?;
    for row in rows {
        stmt.execute(params_from_iter(row))?;
    }
    Ok(())
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn optional_text(value: &Option<String>) -> Value {
    value.as_deref().map(text).unwrap_or(Value::Null)
}

fn team_values(team: &Team) -> Vec<Value> {
    vec![
        text(&team.id),
        text(&team.name),
        optional_text(&team.logo_url),
        Value::Integer(i64::from(team.is_main)),
    ]
}

fn player_values(player: &Player) -> Vec<Value> {
    vec![
        text(&player.id),
        text(&player.name),
        text(&player.number),
        text(&player.team_id),
        optional_text(&player.picture_url),
    ]
}

fn periods_value(periods: &Option<PeriodScores>) -> Result<Value> {
    Ok(match periods {
        Some(p) => Value::Text(serde_json::to_string(p)?),
        None => Value::Null,
    })
}

fn match_values(game: &Match) -> Result<Vec<Value>> {
    Ok(vec![
        text(&game.id),
        Value::Text(game.date.format("%Y-%m-%d").to_string()),
        text(&game.championship_id),
        text(&game.team1_id),
        text(&game.team2_id),
        text(&game.team1_name),
        text(&game.team2_name),
        Value::Real(game.team1_score),
        Value::Real(game.team2_score),
        periods_value(&game.team1_periods)?,
        periods_value(&game.team2_periods)?,
    ])
}

fn stats_values(stats: &PlayerStats) -> Vec<Value> {
    let mut values = vec![
        text(&stats.id),
        text(&stats.match_id),
        text(&stats.player_id),
        text(&stats.team_id),
        text(&stats.player_name),
        text(&stats.player_number),
    ];
    values.extend(StatField::ALL.iter().map(|f| Value::Real(stats.get(*f))));
    values
}

fn conversion_error(column: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        logo_url: row.get(2)?,
        is_main: row.get(3)?,
    })
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        number: row.get(2)?,
        team_id: row.get(3)?,
        picture_url: row.get(4)?,
    })
}

fn periods_from_row(row: &Row<'_>, column: usize) -> rusqlite::Result<Option<PeriodScores>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|json| serde_json::from_str(&json).map_err(|e| conversion_error(column, e)))
        .transpose()
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<Match> {
    let date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| conversion_error(1, e))?;

    Ok(Match {
        id: row.get(0)?,
        date,
        championship_id: row.get(2)?,
        team1_id: row.get(3)?,
        team2_id: row.get(4)?,
        team1_name: row.get(5)?,
        team2_name: row.get(6)?,
        team1_score: row.get(7)?,
        team2_score: row.get(8)?,
        team1_periods: periods_from_row(row, 9)?,
        team2_periods: periods_from_row(row, 10)?,
    })
}

fn stats_from_row(row: &Row<'_>) -> rusqlite::Result<PlayerStats> {
    let mut stats = PlayerStats {
        id: row.get(0)?,
        match_id: row.get(1)?,
        player_id: row.get(2)?,
        team_id: row.get(3)?,
        player_name: row.get(4)?,
        player_number: row.get(5)?,
        ..Default::default()
    };
    for (i, field) in StatField::ALL.iter().enumerate() {
        stats.set(*field, row.get(STAT_IDENTITY_COLUMNS + i)?);
    }
    Ok(stats)
}
