use crate::app_context::{AppContext, RequestContext};
use crate::game::errors::GameActionError;
use crate::game::responses::{
    CreateGameResponse, GameErrorCode, GameResponse, GameResultsResponse,
};
use crate::game::views::GameView;
use crate::geo::models::LatLng;
use crate::storage::games::HashMapGamesStorage;
use crate::storage::interface::{GameFlowHandler, GameRepo};

pub struct CreateGameHttpHandler {
    app_context: AppContext<HashMapGamesStorage>,
}

impl CreateGameHttpHandler {
    pub fn new(app_context: AppContext<HashMapGamesStorage>) -> Self {
        Self { app_context }
    }

    pub async fn create(&self) -> CreateGameResponse {
        let catalog = self.app_context.catalog.snapshot().await;
        if catalog.rounds.is_empty() {
            tracing::warn!("Creating a game from an empty catalog, there is nothing to play.");
        }
        let (game_id, game) = self
            .app_context
            .games
            .create(catalog.generation, catalog.rounds)
            .await;
        CreateGameResponse {
            error: false,
            game_id,
            game,
        }
    }
}

pub struct GameHttpHandler<'rc> {
    app_context: AppContext<HashMapGamesStorage>,
    request_context: &'rc RequestContext,
}

impl<'rc> GameHttpHandler<'rc> {
    pub fn new(
        app_context: AppContext<HashMapGamesStorage>,
        request_context: &'rc RequestContext,
    ) -> Self {
        Self {
            app_context,
            request_context,
        }
    }

    fn game_id(&self) -> &str {
        &self.request_context.game_id
    }

    pub async fn view(&self) -> GameResponse {
        match self.app_context.games.view(self.game_id()).await {
            Some(game) => GameResponse {
                error: false,
                error_code: None,
                game: Some(game),
            },
            None => self.rejected(GameActionError::GameNotFound).await,
        }
    }

    pub async fn set_guess(&self, guess: LatLng) -> GameResponse {
        let result = self.app_context.games.set_guess(self.game_id(), guess).await;
        self.respond(result).await
    }

    pub async fn submit(&self) -> GameResponse {
        match self.app_context.games.submit(self.game_id()).await {
            Ok((result, game)) => {
                tracing::info!(
                    task = "round_submitted",
                    game_id = self.game_id(),
                    client_ip = self.request_context.client_ip.as_str(),
                    location_id = result.location_id.as_str(),
                    round_index = result.round_index as u64,
                    outcome = ?result.outcome,
                    player_distance_m = result.player_distance.round() as u64,
                    opponent_distance_m = result.opponent_distance.round() as u64,
                );
                self.respond(Ok(game)).await
            }
            Err(err) => self.rejected(err).await,
        }
    }

    pub async fn advance(&self) -> GameResponse {
        let result = self.app_context.games.advance(self.game_id()).await;
        self.respond(result).await
    }

    pub async fn restart(&self) -> GameResponse {
        let result = self.app_context.games.restart(self.game_id()).await;
        self.respond(result).await
    }

    pub async fn results(&self) -> GameResultsResponse {
        match self.app_context.games.results(self.game_id()).await {
            Some(results) => GameResultsResponse {
                error: false,
                error_code: None,
                results: Some(results),
            },
            None => GameResultsResponse {
                error: true,
                error_code: Some(GameErrorCode::GameNotFound),
                results: None,
            },
        }
    }

    async fn respond(&self, result: Result<GameView, GameActionError>) -> GameResponse {
        match result {
            Ok(game) => GameResponse {
                error: false,
                error_code: None,
                game: Some(game),
            },
            Err(err) => self.rejected(err).await,
        }
    }

    async fn rejected(&self, err: GameActionError) -> GameResponse {
        tracing::debug!("Rejected action on game `{}`: {err}", self.game_id());
        GameResponse {
            error: true,
            error_code: Some(GameErrorCode::from(&err)),
            game: self.app_context.games.view(self.game_id()).await,
        }
    }
}
