use crate::catalog::models::RoundDefinition;
use crate::game::errors::GameActionError;
use crate::game::models::RoundResult;
use crate::game::state::GameState;
use crate::game::views::{GameView, ResultsView};
use crate::geo::models::LatLng;
use crate::storage::interface::{GameFlowHandler, GameImageryRepo, GameRepo, IGameStorage};
use crate::storage::consts::DEFAULT_GAME_IDLE_TIMEOUT;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct StoredGame {
    state: GameState,
    last_touched: Instant,
}

/// Every transition runs under the write lock, so actions on a game never interleave.
///
/// Games nobody acted on for `idle_timeout` are dropped the next time a game is created.
/// Reads don't count as activity.
#[derive(Clone)]
pub struct HashMapGamesStorage {
    storage: Arc<RwLock<HashMap<String, StoredGame>>>,
    idle_timeout: Duration,
}

impl Default for HashMapGamesStorage {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_IDLE_TIMEOUT)
    }
}

impl HashMapGamesStorage {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    async fn mutate<T>(
        &self,
        game_id: &str,
        action: impl FnOnce(&mut GameState) -> Result<T, GameActionError>,
    ) -> Result<T, GameActionError> {
        let mut storage_guard = self.storage.write().await;
        let game = storage_guard
            .get_mut(game_id)
            .ok_or(GameActionError::GameNotFound)?;
        game.last_touched = Instant::now();
        action(&mut game.state)
    }
}

impl IGameStorage for HashMapGamesStorage {}

impl GameRepo for HashMapGamesStorage {
    async fn create(
        &self,
        catalog_generation: u64,
        rounds: Vec<RoundDefinition>,
    ) -> (String, GameView) {
        let mut storage_guard = self.storage.write().await;
        let before = storage_guard.len();
        storage_guard.retain(|_, game| game.last_touched.elapsed() < self.idle_timeout);
        let evicted = before - storage_guard.len();
        if evicted > 0 {
            tracing::debug!("Dropped {evicted} idle game(s).");
        }
        let mut game_id = generate_game_id();
        while storage_guard.contains_key(&game_id) {
            game_id = generate_game_id();
        }
        let state = GameState::new(catalog_generation, rounds);
        let view = GameView::from(&state);
        storage_guard.insert(
            game_id.clone(),
            StoredGame {
                state,
                last_touched: Instant::now(),
            },
        );
        (game_id, view)
    }

    async fn view(&self, game_id: &str) -> Option<GameView> {
        self
            .storage
            .read()
            .await
            .get(game_id)
            .map(|game| GameView::from(&game.state))
    }

    async fn results(&self, game_id: &str) -> Option<ResultsView> {
        self
            .storage
            .read()
            .await
            .get(game_id)
            .map(|game| ResultsView::from(&game.state))
    }
}

impl GameFlowHandler for HashMapGamesStorage {
    async fn set_guess(&self, game_id: &str, guess: LatLng) -> Result<GameView, GameActionError> {
        self.mutate(game_id, |game| {
            game.set_guess(guess)?;
            Ok(GameView::from(&*game))
        })
        .await
    }

    async fn submit(&self, game_id: &str) -> Result<(RoundResult, GameView), GameActionError> {
        self.mutate(game_id, |game| {
            let result = game.submit()?.clone();
            Ok((result, GameView::from(&*game)))
        })
        .await
    }

    async fn advance(&self, game_id: &str) -> Result<GameView, GameActionError> {
        self.mutate(game_id, |game| {
            game.advance()?;
            Ok(GameView::from(&*game))
        })
        .await
    }

    async fn restart(&self, game_id: &str) -> Result<GameView, GameActionError> {
        self.mutate(game_id, |game| {
            game.restart();
            Ok(GameView::from(&*game))
        })
        .await
    }
}

impl GameImageryRepo for HashMapGamesStorage {
    async fn apply_imagery(
        &self,
        catalog_generation: u64,
        location_id: &str,
        image_id: &str,
    ) -> usize {
        self.storage
            .write()
            .await
            .values_mut()
            .map(|game| &mut game.state)
            .filter(|game| game.catalog_generation() == catalog_generation)
            .map(|game| game.resolve_imagery(location_id, image_id))
            .filter(|resolved| *resolved)
            .count()
    }
}

fn generate_game_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}
