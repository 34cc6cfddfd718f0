//! Table definitions for the SQLite store.
//!
//! Tables are listed parents first in [`ALL_TABLES`]. Teams may be deleted
//! while matches, players and stat lines still reference them, so those
//! references carry no foreign key.

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Real,
    Text,
    Boolean,
    /// JSON blob stored as text
    Json,
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: true,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: false,
        }
    }
}

/// Foreign key reference
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ForeignKey {
    pub const fn new(column: &'static str, references_table: &'static str) -> Self {
        Self {
            column,
            references_table,
            references_column: "id",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Index {
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl Index {
    /// Create a non-unique index
    pub const fn on(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            unique: false,
        }
    }

    /// Create a unique index
    pub const fn unique(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            unique: true,
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub foreign_keys: &'static [ForeignKey],
    pub indexes: &'static [Index],
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

pub static TEAMS: TableSchema = TableSchema {
    name: "teams",
    columns: &[
        Column::required("id", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::new("logo_url", ColumnType::Text),
        Column::required("is_main", ColumnType::Boolean),
    ],
    foreign_keys: &[],
    indexes: &[Index::unique(&["name"])],
};

pub static CHAMPIONSHIPS: TableSchema = TableSchema {
    name: "championships",
    columns: &[
        Column::required("id", ColumnType::Text),
        Column::required("name", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub static PLAYERS: TableSchema = TableSchema {
    name: "players",
    columns: &[
        Column::required("id", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::required("number", ColumnType::Text),
        Column::required("team_id", ColumnType::Text),
        Column::new("picture_url", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[Index::unique(&["team_id", "number"])],
};

pub static MATCHES: TableSchema = TableSchema {
    name: "matches",
    columns: &[
        Column::required("id", ColumnType::Text),
        Column::required("date", ColumnType::Text),
        Column::required("championship_id", ColumnType::Text),
        Column::required("team1_id", ColumnType::Text),
        Column::required("team2_id", ColumnType::Text),
        Column::required("team1_name", ColumnType::Text),
        Column::required("team2_name", ColumnType::Text),
        Column::required("team1_score", ColumnType::Real),
        Column::required("team2_score", ColumnType::Real),
        Column::new("team1_periods", ColumnType::Json),
        Column::new("team2_periods", ColumnType::Json),
    ],
    foreign_keys: &[ForeignKey::new("championship_id", "championships")],
    indexes: &[Index::on(&["team1_id"]), Index::on(&["team2_id"])],
};

/// Identity columns of a stat line, followed by every `StatField` column
pub static PLAYER_STATS: TableSchema = TableSchema {
    name: "player_stats",
    columns: &[
        Column::required("id", ColumnType::Text),
        Column::required("match_id", ColumnType::Text),
        Column::required("player_id", ColumnType::Text),
        Column::required("team_id", ColumnType::Text),
        Column::required("player_name", ColumnType::Text),
        Column::required("player_number", ColumnType::Text),
        Column::required("two_pt", ColumnType::Real),
        Column::required("two_pt_a", ColumnType::Real),
        Column::required("two_pt_pct", ColumnType::Real),
        Column::required("three_pt", ColumnType::Real),
        Column::required("three_pt_a", ColumnType::Real),
        Column::required("three_pt_pct", ColumnType::Real),
        Column::required("fg", ColumnType::Real),
        Column::required("fga", ColumnType::Real),
        Column::required("fg_pct", ColumnType::Real),
        Column::required("efg_pct", ColumnType::Real),
        Column::required("ft", ColumnType::Real),
        Column::required("fta", ColumnType::Real),
        Column::required("ft_pct", ColumnType::Real),
        Column::required("pts", ColumnType::Real),
        Column::required("layup", ColumnType::Real),
        Column::required("layup_a", ColumnType::Real),
        Column::required("layup_pct", ColumnType::Real),
        Column::required("paint_pt", ColumnType::Real),
        Column::required("paint_att", ColumnType::Real),
        Column::required("to_pts", ColumnType::Real),
        Column::required("o_reb", ColumnType::Real),
        Column::required("d_reb", ColumnType::Real),
        Column::required("rebs", ColumnType::Real),
        Column::required("ast", ColumnType::Real),
        Column::required("turnovers", ColumnType::Real),
        Column::required("stl", ColumnType::Real),
        Column::required("blk", ColumnType::Real),
        Column::required("blka", ColumnType::Real),
        Column::required("foul", ColumnType::Real),
        Column::required("fouled", ColumnType::Real),
        Column::required("minutes", ColumnType::Real),
        Column::required("vps", ColumnType::Real),
        Column::required("plus_minus", ColumnType::Real),
        Column::required("effic", ColumnType::Real),
    ],
    foreign_keys: &[ForeignKey::new("match_id", "matches")],
    indexes: &[
        Index::unique(&["match_id", "player_id"]),
        Index::on(&["player_id"]),
    ],
};

/// Number of identity columns before the numeric ones in [`PLAYER_STATS`]
pub const STAT_IDENTITY_COLUMNS: usize = 6;

pub static CHAMPIONSHIP_TEAMS: TableSchema = TableSchema {
    name: "championship_teams",
    columns: &[
        Column::required("championship_id", ColumnType::Text),
        Column::required("team_id", ColumnType::Text),
    ],
    foreign_keys: &[
        ForeignKey::new("championship_id", "championships"),
        ForeignKey::new("team_id", "teams"),
    ],
    indexes: &[Index::unique(&["championship_id", "team_id"])],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[
    &TEAMS,
    &CHAMPIONSHIPS,
    &PLAYERS,
    &MATCHES,
    &PLAYER_STATS,
    &CHAMPIONSHIP_TEAMS,
];
