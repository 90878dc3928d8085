use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_pairing::config::AppConfig;
use swiss_pairing::engine::{EngineError, SwissEngine};
use swiss_pairing::models::{EntityId, Pairing, RankedStanding};
use swiss_pairing::storage::{JsonlStore, StorageConfig, TournamentStore};

#[derive(Parser)]
#[command(name = "swiss-pairing")]
#[command(about = "Swiss-system tournament standings and pairings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./swiss.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a player
    RegisterPlayer {
        /// Player's full name
        name: String,
    },

    /// Register a tournament
    RegisterTournament {
        /// Tournament name
        name: String,
    },

    /// Enroll a registered player in a tournament
    Enroll { player: u64, tournament: u64 },

    /// Report the outcome of a match
    Report {
        tournament: u64,

        /// Winning player (or either side of a draw)
        winner: u64,

        /// Losing player (or the other side of a draw)
        loser: u64,

        /// The match ended in a draw
        #[arg(long)]
        draw: bool,
    },

    /// Count the players enrolled in a tournament
    CountPlayers { tournament: u64 },

    /// Show ranked standings
    Standings {
        tournament: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate next-round pairings
    Pairings {
        tournament: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a tournament and all of its matches, results and enrollments
    DeleteTournament { tournament: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::debug!("Using data directory {:?}", config.data_dir);

    let mut store = JsonlStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::RegisterPlayer { name } => {
            let id = store.register_player(&name)?;
            println!("Registered player {} ({})", id, name);
        }
        Commands::RegisterTournament { name } => {
            let id = store.register_tournament(&name)?;
            println!("Registered tournament {} ({})", id, name);
        }
        Commands::Enroll { player, tournament } => {
            store.enroll(EntityId::new(player), EntityId::new(tournament))?;
            println!("Enrolled player {} in tournament {}", player, tournament);
        }
        Commands::Report {
            tournament,
            winner,
            loser,
            draw,
        } => {
            let id = store.report_match(
                EntityId::new(tournament),
                EntityId::new(winner),
                EntityId::new(loser),
                draw,
            )?;
            println!("Recorded match {}", id);
        }
        Commands::CountPlayers { tournament } => {
            let count = store.count_players(EntityId::new(tournament))?;
            println!("{}", count);
        }
        Commands::Standings { tournament, json } => {
            let engine = SwissEngine::new(&store, config.scoring);
            let standings = engine.rank_standings(EntityId::new(tournament))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print_standings(&standings);
            }
        }
        Commands::Pairings { tournament, json } => {
            let engine = SwissEngine::new(&store, config.scoring);
            match engine.generate_pairings(EntityId::new(tournament)) {
                Ok(pairings) if json => println!("{}", serde_json::to_string_pretty(&pairings)?),
                Ok(pairings) => print_pairings(&pairings),
                Err(e @ (EngineError::OddPlayerCount(_) | EngineError::PairingExhausted { .. })) => {
                    tracing::error!("Tournament {} cannot be paired: {}", tournament, e);
                    eprintln!("Cannot pair tournament {}: {}", tournament, e);
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::DeleteTournament { tournament } => {
            store.delete_tournament(EntityId::new(tournament))?;
            println!("Deleted tournament {}", tournament);
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so command output stays pipeable.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_standings(standings: &[RankedStanding]) {
    if standings.is_empty() {
        println!("No players enrolled.");
        return;
    }

    println!(
        "{:>4}  {:>6}  {:<24} {:>4} {:>4} {:>4} {:>6} {:>6}",
        "#", "ID", "Name", "W", "L", "D", "Played", "Score"
    );
    for (rank, s) in standings.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:<24} {:>4} {:>4} {:>4} {:>6} {:>6.1}",
            rank + 1,
            s.player_id.to_string(),
            s.name,
            s.wins,
            s.losses,
            s.draws,
            s.matches_played,
            s.score
        );
    }
}

fn print_pairings(pairings: &[Pairing]) {
    if pairings.is_empty() {
        println!("No pairings.");
        return;
    }

    for (table, p) in pairings.iter().enumerate() {
        println!(
            "Table {:>3}: {} ({}) vs {} ({})",
            table + 1,
            p.player_a_name,
            p.player_a_id,
            p.player_b_name,
            p.player_b_id
        );
    }
}
