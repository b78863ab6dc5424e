use super::{print_result, CommandResult};
use dialoguer::{theme::ColorfulTheme, Select};
use rps_game::{Address, Choice, GameConfig, RoundResult, Slot};

const OPTIONS: [&str; 4] = ["Rock", "Paper", "Scissors", "Quit"];

/// Menu entry to choice; `None` means quit
fn menu_choice(picked: usize) -> Option<Choice> {
    match picked {
        0 => Some(Choice::Rock),
        1 => Some(Choice::Paper),
        2 => Some(Choice::Scissors),
        _ => None,
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Score {
    wins: [u32; 2],
    draws: u32,
}

impl Score {
    fn record(&mut self, result: &RoundResult, players: &[Address; 2]) {
        match result.winner {
            Some(winner) if winner == players[0] => self.wins[0] += 1,
            Some(_) => self.wins[1] += 1,
            None => self.draws += 1,
        }
    }
}

/// Hot-seat game: both players pick at this terminal until one quits
pub async fn play_local() -> CommandResult {
    let game = rps_game::create_shared_game(&GameConfig::default())?;
    let mut results = game.subscribe();

    let players = [Address::random(), Address::random()];
    for address in players {
        let slot = game.join(address)?;
        println!("Player {}: {}", slot, address);
    }
    println!();

    let theme = ColorfulTheme::default();
    let mut score = Score::default();

    'rounds: loop {
        for slot in Slot::BOTH {
            let picked = Select::with_theme(&theme)
                .with_prompt(format!("Player {}, choose an option", slot))
                .items(&OPTIONS)
                .default(0)
                .interact()?;

            let Some(choice) = menu_choice(picked) else {
                break 'rounds;
            };

            game.choose_option(players[slot.index()], choice)?;
        }

        let result = results.recv().await?;
        println!();
        print_result(&result);
        println!();

        score.record(&result, &players);
    }

    println!(
        "Final score: player 1 {} - {} player 2 ({} draws)",
        score.wins[0], score.wins[1], score.draws
    );

    Ok(())
}
