use crate::{
    Address, Choice, GameConfig, GameCoordinator, GameInfo, Result, RoundResult, Slot,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Thread-safe handle to a game.
///
/// Each call holds the lock for the whole check-then-mutate sequence, so
/// concurrent callers are applied one at a time. Completed rounds are
/// published to every subscriber.
#[derive(Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameCoordinator>>,
    results: broadcast::Sender<RoundResult>,
}

impl SharedGame {
    pub fn new(game: GameCoordinator) -> Self {
        let capacity = GameConfig::default().result_channel_capacity;
        let (results, _) = broadcast::channel(capacity);

        Self {
            inner: Arc::new(Mutex::new(game)),
            results,
        }
    }

    pub fn with_config(game: GameCoordinator, config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let (results, _) = broadcast::channel(config.result_channel_capacity);

        Ok(Self {
            inner: Arc::new(Mutex::new(game)),
            results,
        })
    }

    pub fn id(&self) -> Uuid {
        self.inner.lock().id()
    }

    /// Receive every round result published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<RoundResult> {
        self.results.subscribe()
    }

    pub fn join(&self, caller: Address) -> Result<Slot> {
        self.inner.lock().join(caller)
    }

    pub fn choose_option(&self, caller: Address, choice: Choice) -> Result<Option<RoundResult>> {
        let mut game = self.inner.lock();
        let result = game.choose_option(caller, choice)?;

        // Published under the lock so subscribers see rounds in order
        if let Some(result) = &result {
            if self.results.send(result.clone()).is_err() {
                tracing::debug!("No subscribers for round {} result", result.round);
            }
        }
        drop(game);

        Ok(result)
    }

    pub fn players(&self) -> [Option<Address>; 2] {
        self.inner.lock().players()
    }

    pub fn get_info(&self) -> GameInfo {
        self.inner.lock().get_info()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> GameCoordinator {
        self.inner.lock().clone()
    }
}

impl std::fmt::Debug for SharedGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedGame")
            .field("game", &*self.inner.lock())
            .field("subscribers", &self.results.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameError;

    fn alice() -> Address {
        Address::new([0xa1; Address::LEN])
    }

    fn bob() -> Address {
        Address::new([0xb2; Address::LEN])
    }

    #[tokio::test]
    async fn test_results_are_broadcast() {
        let game = SharedGame::new(GameCoordinator::new());
        let mut first = game.subscribe();
        let mut second = game.subscribe();

        game.join(alice()).unwrap();
        game.join(bob()).unwrap();
        assert!(game.choose_option(alice(), Choice::Rock).unwrap().is_none());
        let returned = game.choose_option(bob(), Choice::Scissors).unwrap().unwrap();

        let received = first.recv().await.unwrap();
        assert_eq!(received, returned);
        assert_eq!(received.winner, Some(alice()));
        assert_eq!(second.recv().await.unwrap(), returned);

        assert!(first.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_concurrent_moves_resolve_once() {
        let game = SharedGame::new(GameCoordinator::new());
        game.join(alice()).unwrap();
        game.join(bob()).unwrap();
        let mut results = game.subscribe();

        let handles: Vec<_> = [(alice(), Choice::Paper), (bob(), Choice::Rock)]
            .into_iter()
            .map(|(caller, choice)| {
                let game = game.clone();
                tokio::spawn(async move { game.choose_option(caller, choice) })
            })
            .collect();

        let mut resolved = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                resolved += 1;
            }
        }

        assert_eq!(resolved, 1);
        let result = results.recv().await.unwrap();
        assert_eq!(result.winner, Some(alice()));
        assert_eq!(game.get_info().played, [false, false]);
        assert_eq!(game.get_info().round, 1);
    }

    #[tokio::test]
    async fn test_rounds_arrive_in_order_across_threads() {
        let game = SharedGame::new(GameCoordinator::new());
        game.join(alice()).unwrap();
        game.join(bob()).unwrap();
        let mut results = game.subscribe();

        let handles: Vec<_> = [alice(), bob()]
            .into_iter()
            .map(|caller| {
                let game = game.clone();
                std::thread::spawn(move || {
                    while game.get_info().round < 40 {
                        match game.choose_option(caller, Choice::Rock) {
                            Ok(_) | Err(GameError::AlreadyPlayed) => std::thread::yield_now(),
                            Err(e) => panic!("unexpected error: {}", e),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let rounds = game.get_info().round;
        assert!(rounds >= 40);
        for expected in 0..rounds {
            assert_eq!(results.recv().await.unwrap().round, expected);
        }
    }

    #[tokio::test]
    async fn test_rejections_publish_nothing() {
        let game = SharedGame::new(GameCoordinator::new());
        let mut results = game.subscribe();

        game.join(alice()).unwrap();
        assert!(matches!(
            game.choose_option(alice(), Choice::Rock),
            Err(GameError::NotEnoughPlayers)
        ));
        assert!(results.try_recv().is_err());
        assert_eq!(game.players(), [Some(alice()), None]);
    }

    #[test]
    fn test_with_config_validates() {
        let config = GameConfig {
            result_channel_capacity: 0,
        };
        assert!(SharedGame::with_config(GameCoordinator::new(), &config).is_err());

        let game = GameCoordinator::new();
        let id = game.id();
        let shared = SharedGame::with_config(game, &GameConfig::default()).unwrap();
        assert_eq!(shared.id(), id);
        assert_eq!(shared.snapshot().id(), id);
    }
}
