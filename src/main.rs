use anyhow::{bail, Context, Result};
use boxscore_ledger::{
    cli::{ChampionshipCommand, Cli, Commands, MatchCommand, PlayerCommand, TeamCommand},
    config::{open_store, resolve_data_path},
    ledger::{Command, Coordinator},
    logging::initialize_logging,
    manual::ManualEntry,
    model::{Dataset, PeriodScores},
    parser::{parse_file, SAMPLE_CSV},
    views::{box_score, dashboard, player_averages, AveragesTable},
};
use std::fs;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    initialize_logging(cli.verbose, cli.quiet)?;

    // Sample needs no ledger
    if let Commands::Sample { output } = &cli.command {
        match output {
            Some(path) => {
                fs::write(path, SAMPLE_CSV)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Sample export written to {}", path.display());
            }
            None => print!("{}", SAMPLE_CSV),
        }
        return Ok(());
    }

    let data_path = resolve_data_path(cli.store, cli.data)?;
    let store = open_store(cli.store, data_path.as_deref())?;
    let mut ledger = Coordinator::open(store).context("Failed to load ledger")?;

    match cli.command {
        Commands::Sample { .. } => {}

        Commands::Import {
            file,
            championship,
            date,
        } => {
            let mut bundle =
                parse_file(&file).with_context(|| format!("Failed to import {}", file.display()))?;
            if let Some(date) = date {
                bundle.game.date = date;
            }
            let championship_id = championship_id(ledger.state(), &championship)?;
            let state = ledger.dispatch(Command::IngestMatch {
                bundle,
                championship_id,
            })?;
            report_ingested(state);
        }

        Commands::ImportManual {
            file,
            championship,
            date,
        } => {
            let entry = ManualEntry::from_file(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut bundle = entry.assemble()?;
            if let Some(date) = date {
                bundle.game.date = date;
            }
            let championship_id = championship_id(ledger.state(), &championship)?;
            let state = ledger.dispatch(Command::IngestMatch {
                bundle,
                championship_id,
            })?;
            report_ingested(state);
        }

        Commands::Championship(command) => run_championship(&mut ledger, command)?,
        Commands::Team(command) => run_team(&mut ledger, command)?,
        Commands::Player(command) => run_player(&mut ledger, command)?,
        Commands::Match(command) => run_match(&mut ledger, command)?,

        Commands::Stats { championship } => {
            let state = ledger.state();
            let championship_id = championship
                .map(|c| championship_id(state, &c))
                .transpose()?;
            let averages = player_averages(state, championship_id.as_deref());
            if averages.is_empty() {
                println!("No statistics yet");
            } else {
                print!("{}", AveragesTable(&averages));
            }
        }

        Commands::Dashboard => print!("{}", dashboard(ledger.state())),
    }

    Ok(())
}

fn championship_id(state: &Dataset, id_or_name: &str) -> Result<String> {
    match state.resolve_championship(id_or_name) {
        Some(c) => Ok(c.id.clone()),
        None => bail!("Unknown championship '{}'", id_or_name),
    }
}

fn team_id(state: &Dataset, id_or_name: &str) -> Result<String> {
    match state.resolve_team(id_or_name) {
        Some(t) => Ok(t.id.clone()),
        None => bail!("Unknown team '{}'", id_or_name),
    }
}

fn report_ingested(state: &Dataset) {
    if let Some(game) = state.matches.last() {
        info!(match_id = %game.id, "ingested");
        println!(
            "Imported {} {} - {} {} on {} ({})",
            game.team1_name, game.team1_score, game.team2_score, game.team2_name, game.date, game.id
        );
    }
}

fn run_championship(ledger: &mut Coordinator, command: ChampionshipCommand) -> Result<()> {
    match command {
        ChampionshipCommand::Add { name } => {
            let state = ledger.dispatch(Command::AddChampionship { name })?;
            if let Some(c) = state.championships.last() {
                println!("Added championship {} ({})", c.name, c.id);
            }
        }
        ChampionshipCommand::Rename { championship, name } => {
            let championship_id = championship_id(ledger.state(), &championship)?;
            ledger.dispatch(Command::UpdateChampionship {
                championship_id,
                name,
            })?;
        }
        ChampionshipCommand::Delete { championship } => {
            let championship_id = championship_id(ledger.state(), &championship)?;
            ledger.dispatch(Command::DeleteChampionship { championship_id })?;
        }
        ChampionshipCommand::List => {
            let state = ledger.state();
            for c in &state.championships {
                let teams: Vec<&str> = state
                    .championship_teams
                    .iter()
                    .filter(|ct| ct.championship_id == c.id)
                    .filter_map(|ct| state.team(&ct.team_id))
                    .map(|t| t.name.as_str())
                    .collect();
                let matches = state
                    .matches
                    .iter()
                    .filter(|m| m.championship_id == c.id)
                    .count();
                println!(
                    "{}  {}  ({} matches) {}",
                    c.id,
                    c.name,
                    matches,
                    teams.join(", ")
                );
            }
        }
        ChampionshipCommand::AddTeam { championship, team } => {
            let state = ledger.state();
            let championship_id = championship_id(state, &championship)?;
            let team_id = team_id(state, &team)?;
            ledger.dispatch(Command::AddChampionshipTeam {
                championship_id,
                team_id,
            })?;
        }
        ChampionshipCommand::RemoveTeam { championship, team } => {
            let state = ledger.state();
            let championship_id = championship_id(state, &championship)?;
            let team_id = team_id(state, &team)?;
            ledger.dispatch(Command::RemoveChampionshipTeam {
                championship_id,
                team_id,
            })?;
        }
    }
    Ok(())
}

fn run_team(ledger: &mut Coordinator, command: TeamCommand) -> Result<()> {
    match command {
        TeamCommand::Add { name, logo_url } => {
            let state = ledger.dispatch(Command::AddTeam { name, logo_url })?;
            if let Some(t) = state.teams.last() {
                println!("Added team {} ({})", t.name, t.id);
            }
        }
        TeamCommand::Rename {
            team,
            name,
            logo_url,
        } => {
            let mut updated = match ledger.state().resolve_team(&team) {
                Some(t) => t.clone(),
                None => bail!("Unknown team '{}'", team),
            };
            updated.name = name;
            if logo_url.is_some() {
                updated.logo_url = logo_url;
            }
            ledger.dispatch(Command::UpdateTeam(updated))?;
        }
        TeamCommand::Delete { team } => {
            let team_id = team_id(ledger.state(), &team)?;
            ledger.dispatch(Command::DeleteTeam { team_id })?;
        }
        TeamCommand::SetMain { team } => {
            let team_id = team_id(ledger.state(), &team)?;
            ledger.dispatch(Command::SetMainTeam { team_id })?;
        }
        TeamCommand::List => {
            let state = ledger.state();
            for t in &state.teams {
                let players = state.players.iter().filter(|p| p.team_id == t.id).count();
                let marker = if t.is_main { "*" } else { " " };
                println!("{} {}  {}  ({} players)", marker, t.id, t.name, players);
            }
        }
    }
    Ok(())
}

fn run_player(ledger: &mut Coordinator, command: PlayerCommand) -> Result<()> {
    match command {
        PlayerCommand::List { team } => {
            let state = ledger.state();
            let team_id = team.map(|t| team_id(state, &t)).transpose()?;
            for p in state
                .players
                .iter()
                .filter(|p| team_id.as_ref().map_or(true, |id| &p.team_id == id))
            {
                let team_name = state.team(&p.team_id).map_or("N/A", |t| t.name.as_str());
                println!("{}  #{:<3} {:<24} {}", p.id, p.number, p.name, team_name);
            }
        }
        PlayerCommand::Update {
            id,
            name,
            number,
            picture_url,
        } => {
            let mut player = match ledger.state().player(&id) {
                Some(p) => p.clone(),
                None => bail!("Unknown player '{}'", id),
            };
            if let Some(name) = name {
                player.name = name;
            }
            if let Some(number) = number {
                player.number = number;
            }
            if picture_url.is_some() {
                player.picture_url = picture_url;
            }
            ledger.dispatch(Command::UpdatePlayer(player))?;
        }
    }
    Ok(())
}

fn run_match(ledger: &mut Coordinator, command: MatchCommand) -> Result<()> {
    match command {
        MatchCommand::List => {
            let state = ledger.state();
            for m in &state.matches {
                let championship = state
                    .championship(&m.championship_id)
                    .map_or("N/A", |c| c.name.as_str());
                println!(
                    "{}  {}  {:<16} {} {} - {} {}",
                    m.id, m.date, championship, m.team1_name, m.team1_score, m.team2_score, m.team2_name
                );
            }
        }
        MatchCommand::Show { id } => match box_score(ledger.state(), &id) {
            Some(score) => print!("{}", score),
            None => bail!("Unknown match '{}'", id),
        },
        MatchCommand::SetPeriods(args) => {
            let periods = |quarters: Option<Vec<f64>>, overtimes: Vec<f64>| {
                quarters.map(|quarters| PeriodScores {
                    quarters,
                    overtimes,
                })
            };
            let state = ledger.dispatch(Command::UpdateMatch {
                match_id: args.id.clone(),
                date: args.date,
                team1_periods: periods(args.team1, args.team1_ot),
                team2_periods: periods(args.team2, args.team2_ot),
            })?;
            if let Some(m) = state.find_match(&args.id) {
                println!(
                    "{} {} - {} {}",
                    m.team1_name, m.team1_score, m.team2_score, m.team2_name
                );
            }
        }
    }
    Ok(())
}
