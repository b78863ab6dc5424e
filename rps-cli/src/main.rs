mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Two-player Rock-Paper-Scissors games")]
#[command(version)]
struct Cli {
    /// Data directory for game storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new game with two empty slots
    New,
    /// Generate a random participant address
    Address,
    /// Join a game
    Join {
        /// Game ID
        game_id: String,
        /// Participant address (0x + 40 hex)
        address: String,
    },
    /// Choose an option for the current round
    Choose {
        /// Game ID
        game_id: String,
        /// Participant address
        address: String,
        /// rock, paper, scissors or their codes 1, 2, 3
        choice: String,
    },
    /// Show the players of a game
    Players {
        /// Game ID
        game_id: String,
    },
    /// Show game status
    Status {
        /// Game ID
        game_id: String,
    },
    /// List stored games
    List,
    /// Play a local game between two players at this terminal
    Play,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = CliConfig::with_overrides(cli.data_dir, cli.verbose);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ensure data directory exists
    tokio::fs::create_dir_all(&config.data_dir).await?;

    // Execute command
    let result = match cli.command {
        Commands::New => commands::new_game(&config).await,
        Commands::Address => commands::generate_address().await,
        Commands::Join { game_id, address } => {
            commands::join_game(&config, &game_id, &address).await
        }
        Commands::Choose {
            game_id,
            address,
            choice,
        } => commands::choose_option(&config, &game_id, &address, &choice).await,
        Commands::Players { game_id } => commands::show_players(&config, &game_id).await,
        Commands::Status { game_id } => commands::show_game_status(&config, &game_id).await,
        Commands::List => commands::list_games(&config).await,
        Commands::Play => commands::play::play_local().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
