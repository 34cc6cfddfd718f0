use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StoreKind;

#[derive(Parser, Debug)]
#[command(name = "boxscore-ledger")]
#[command(version, about = "Import basketball box scores and keep a season ledger")]
pub struct Cli {
    /// Ledger file (defaults to the per-user data directory)
    #[arg(long, global = true, env = "BOXSCORE_DATA")]
    pub data: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, value_enum, default_value_t = StoreKind::Json, env = "BOXSCORE_STORE")]
    pub store: StoreKind,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a semicolon-separated statistics export
    Import {
        /// Export file
        file: PathBuf,

        /// Championship id or name
        #[arg(short, long)]
        championship: String,

        /// Match date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Import a hand-entered match from a JSON form
    ImportManual {
        /// JSON form
        file: PathBuf,

        /// Championship id or name
        #[arg(short, long)]
        championship: String,

        /// Match date (YYYY-MM-DD), overrides the form's date
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Print (or write) a sample export in the accepted format
    Sample {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage championships
    #[command(subcommand)]
    Championship(ChampionshipCommand),

    /// Manage teams
    #[command(subcommand)]
    Team(TeamCommand),

    /// List and correct players
    #[command(subcommand)]
    Player(PlayerCommand),

    /// List, show and correct matches
    #[command(subcommand)]
    Match(MatchCommand),

    /// Per-player averages
    Stats {
        /// Only matches of this championship (id or name)
        #[arg(short, long)]
        championship: Option<String>,
    },

    /// Main team overview
    Dashboard,
}

#[derive(Subcommand, Debug)]
pub enum ChampionshipCommand {
    Add {
        name: String,
    },
    Rename {
        /// Championship id or name
        championship: String,
        name: String,
    },
    Delete {
        /// Championship id or name
        championship: String,
    },
    List,
    /// Register a team in a championship
    AddTeam {
        championship: String,
        team: String,
    },
    RemoveTeam {
        championship: String,
        team: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    Add {
        name: String,

        #[arg(long)]
        logo_url: Option<String>,
    },
    Rename {
        /// Team id or name
        team: String,
        name: String,

        #[arg(long)]
        logo_url: Option<String>,
    },
    Delete {
        team: String,
    },
    SetMain {
        team: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommand {
    List {
        /// Only players of this team (id or name)
        #[arg(short, long)]
        team: Option<String>,
    },
    Update {
        /// Player id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        picture_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MatchCommand {
    List,
    /// Print the box score of a match
    Show {
        id: String,
    },
    /// Replace the period breakdown; scores become the period totals
    SetPeriods(SetPeriodsArgs),
}

#[derive(Args, Debug)]
pub struct SetPeriodsArgs {
    pub id: String,

    /// Team 1 quarter scores (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub team1: Option<Vec<f64>>,

    /// Team 1 overtime scores (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "team1")]
    pub team1_ot: Vec<f64>,

    /// Team 2 quarter scores (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub team2: Option<Vec<f64>>,

    /// Team 2 overtime scores (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "team2")]
    pub team2_ot: Vec<f64>,

    /// New match date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
