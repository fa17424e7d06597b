use crate::catalog::models::RoundDefinition;
use crate::game::errors::GameActionError;
use crate::game::models::RoundResult;
use crate::game::views::{GameView, ResultsView};
use crate::geo::models::LatLng;

pub trait IGameStorage: GameRepo + GameFlowHandler + GameImageryRepo {}

pub trait GameRepo {
    async fn create(
        &self,
        catalog_generation: u64,
        rounds: Vec<RoundDefinition>,
    ) -> (String, GameView);

    async fn view(&self, game_id: &str) -> Option<GameView>;

    async fn results(&self, game_id: &str) -> Option<ResultsView>;
}

pub trait GameFlowHandler {
    async fn set_guess(&self, game_id: &str, guess: LatLng) -> Result<GameView, GameActionError>;

    async fn submit(&self, game_id: &str) -> Result<(RoundResult, GameView), GameActionError>;

    async fn advance(&self, game_id: &str) -> Result<GameView, GameActionError>;

    async fn restart(&self, game_id: &str) -> Result<GameView, GameActionError>;
}

pub trait GameImageryRepo {
    /// Publishes a resolved imagery reference to every game built from `catalog_generation`.
    /// Returns how many games picked it up.
    async fn apply_imagery(&self, catalog_generation: u64, location_id: &str, image_id: &str)
        -> usize;
}
