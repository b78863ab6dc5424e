pub mod play;

use crate::config::CliConfig;
use chrono::{DateTime, Local, Utc};
use comfy_table::{presets::UTF8_FULL, Table};
use rps_game::{Address, Choice, GameCoordinator, GameState, RoundResult, Slot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

type CommandResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Games keyed by id. Each entry holds only the live state of its round.
#[derive(Debug, Default, Serialize, Deserialize)]
struct GameStorage {
    games: HashMap<String, GameCoordinator>,
}

impl GameStorage {
    fn game(&self, game_id_str: &str) -> CommandResult<&GameCoordinator> {
        let game_id = Uuid::parse_str(game_id_str)?;
        Ok(self
            .games
            .get(&game_id.to_string())
            .ok_or_else(|| format!("Game not found: {}", game_id))?)
    }

    fn game_mut(&mut self, game_id_str: &str) -> CommandResult<&mut GameCoordinator> {
        let game_id = Uuid::parse_str(game_id_str)?;
        Ok(self
            .games
            .get_mut(&game_id.to_string())
            .ok_or_else(|| format!("Game not found: {}", game_id))?)
    }
}

fn load_storage(config: &CliConfig) -> CommandResult<GameStorage> {
    let path = config.storage_path();
    if !path.exists() {
        return Ok(GameStorage::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let storage = serde_json::from_str(&content)
        .map_err(|e| format!("Corrupt game storage at {}: {}", path.display(), e))?;
    Ok(storage)
}

fn save_storage(config: &CliConfig, storage: &GameStorage) -> CommandResult {
    let path = config.storage_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(storage)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Timestamp in the local timezone of whoever runs the CLI
fn local_time(at: DateTime<Utc>, fmt: &str) -> String {
    at.with_timezone(&Local).format(fmt).to_string()
}

fn print_result(result: &RoundResult) {
    println!("Round {} finished", result.round);
    println!("{}", result.loser_announcement);
    println!("{}", result.winner_announcement);
    match result.winner {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("Draw! Winner: {}", result.winner_address()),
    }
}

pub async fn new_game(config: &CliConfig) -> CommandResult {
    let game = rps_game::create_game();
    let game_id = game.id();

    let mut storage = load_storage(config)?;
    storage.games.insert(game_id.to_string(), game);
    save_storage(config, &storage)?;

    tracing::info!("Created game {}", game_id);

    println!("Created new game!");
    println!("Game ID: {}", game_id);
    println!();
    println!("Players join with:");
    println!("rps join {} <address>", game_id);

    Ok(())
}

pub async fn generate_address() -> CommandResult {
    println!("{}", Address::random());
    Ok(())
}

pub async fn join_game(config: &CliConfig, game_id_str: &str, address: &str) -> CommandResult {
    let address: Address = address.parse()?;

    let mut storage = load_storage(config)?;
    let game = storage.game_mut(game_id_str)?;
    let slot = game.join(address)?;
    let ready = game.state() == GameState::ReadyToPlay;
    let game_id = game.id();
    save_storage(config, &storage)?;

    println!("Joined game {} as player {}", game_id, slot);
    if ready {
        println!("Both players are in. Choose with:");
        println!("rps choose {} <address> <rock|paper|scissors>", game_id);
    } else {
        println!("Waiting for a second player to join...");
    }

    Ok(())
}

pub async fn choose_option(
    config: &CliConfig,
    game_id_str: &str,
    address: &str,
    choice: &str,
) -> CommandResult {
    let address: Address = address.parse()?;
    let choice: Choice = choice.parse()?;

    let mut storage = load_storage(config)?;
    let outcome = storage.game_mut(game_id_str)?.choose_option(address, choice)?;
    save_storage(config, &storage)?;

    match outcome {
        Some(result) => print_result(&result),
        None => println!("Choice recorded. Waiting for the other player..."),
    }

    Ok(())
}

pub async fn show_players(config: &CliConfig, game_id_str: &str) -> CommandResult {
    let storage = load_storage(config)?;
    let game = storage.game(game_id_str)?;

    for (slot, address) in Slot::BOTH.iter().zip(game.player_addresses()) {
        println!("Player {}: {}", slot, address);
    }

    Ok(())
}

pub async fn show_game_status(config: &CliConfig, game_id_str: &str) -> CommandResult {
    let storage = load_storage(config)?;
    let info = storage.game(game_id_str)?.get_info();

    println!("Game Status: {}", info.id);
    println!("═══════════════════════════════════");
    println!("State: {:?}", info.state);
    println!("Players: {}/2", info.player_count);
    println!("Round: {}", info.round);
    println!(
        "Created: {}",
        local_time(info.created_at, "%Y-%m-%d %H:%M:%S %Z")
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slot", "Address", "Played This Round"]);

    for slot in Slot::BOTH {
        let address = info.players[slot.index()]
            .map(|a| a.to_string())
            .unwrap_or_else(|| "(empty)".to_string());

        table.add_row(vec![
            slot.to_string(),
            address,
            info.played[slot.index()].to_string(),
        ]);
    }

    println!("{}", table);

    Ok(())
}

pub async fn list_games(config: &CliConfig) -> CommandResult {
    let storage = load_storage(config)?;

    if storage.games.is_empty() {
        println!("No games.");
        return Ok(());
    }

    let mut games: Vec<&GameCoordinator> = storage.games.values().collect();
    games.sort_by_key(|game| game.created_at());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Game ID", "State", "Players", "Round", "Created"]);

    for game in games {
        table.add_row(vec![
            game.id().to_string(),
            format!("{:?}", game.state()),
            format!("{}/2", game.player_count()),
            game.round().to_string(),
            local_time(game.created_at(), "%Y-%m-%d %H:%M"),
        ]);
    }

    println!("Games:");
    println!("{}", table);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ALICE: &str = "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1";
    const BOB: &str = "0xb2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2";

    fn temp_config(dir: &std::path::Path) -> CliConfig {
        CliConfig::with_overrides(Some(dir.to_path_buf()), false)
    }

    fn only_game_id(config: &CliConfig) -> String {
        let storage = load_storage(config).unwrap();
        assert_eq!(storage.games.len(), 1);
        storage.games.keys().next().unwrap().clone()
    }

    #[test]
    fn test_local_time_matches_utc_instant() {
        let at = DateTime::parse_from_rfc3339("2026-10-15T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let expected = at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();

        assert_eq!(local_time(at, "%Y-%m-%d %H:%M"), expected);
        assert_eq!(local_time(at, "%Y").len(), 4);
    }

    #[test]
    fn test_missing_storage_is_empty() {
        let dir = tempdir().unwrap();
        let storage = load_storage(&temp_config(dir.path())).unwrap();
        assert!(storage.games.is_empty());
    }

    #[test]
    fn test_corrupt_storage_is_an_error() {
        let dir = tempdir().unwrap();
        let config = temp_config(dir.path());
        std::fs::write(config.storage_path(), "{ not json").unwrap();

        assert!(load_storage(&config).is_err());
    }

    #[tokio::test]
    async fn test_full_round_through_storage() {
        let dir = tempdir().unwrap();
        let config = temp_config(dir.path());

        new_game(&config).await.unwrap();
        let game_id = only_game_id(&config);

        assert!(choose_option(&config, &game_id, ALICE, "rock").await.is_err());

        join_game(&config, &game_id, ALICE).await.unwrap();
        join_game(&config, &game_id, BOB).await.unwrap();
        assert!(join_game(&config, &game_id, ALICE).await.is_err());

        choose_option(&config, &game_id, ALICE, "1").await.unwrap();
        {
            let storage = load_storage(&config).unwrap();
            let game = storage.game(&game_id).unwrap();
            assert!(game.has_played(Slot::One));
            assert!(!game.has_played(Slot::Two));
        }

        assert!(choose_option(&config, &game_id, ALICE, "paper").await.is_err());
        choose_option(&config, &game_id, BOB, "scissors").await.unwrap();

        let storage = load_storage(&config).unwrap();
        let game = storage.game(&game_id).unwrap();
        assert_eq!(game.round(), 1);
        assert!(!game.has_played(Slot::One));
        assert_eq!(
            game.player_addresses(),
            [ALICE.parse().unwrap(), BOB.parse().unwrap()]
        );
    }

    #[tokio::test]
    async fn test_unknown_game_and_bad_input() {
        let dir = tempdir().unwrap();
        let config = temp_config(dir.path());
        new_game(&config).await.unwrap();
        let game_id = only_game_id(&config);

        let missing = Uuid::new_v4().to_string();
        assert!(join_game(&config, &missing, ALICE).await.is_err());
        assert!(join_game(&config, "not-a-uuid", ALICE).await.is_err());
        assert!(join_game(&config, &game_id, "0x1234").await.is_err());

        join_game(&config, &game_id, ALICE).await.unwrap();
        join_game(&config, &game_id, BOB).await.unwrap();
        assert!(choose_option(&config, &game_id, ALICE, "0").await.is_err());
        assert!(choose_option(&config, &game_id, ALICE, "lizard").await.is_err());

        show_players(&config, &game_id).await.unwrap();
        show_game_status(&config, &game_id).await.unwrap();
        list_games(&config).await.unwrap();
    }
}
