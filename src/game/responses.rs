use crate::game::errors::{GameActionError, InvalidAction};
use crate::game::views::{GameView, ResultsView};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub error: bool,
    pub game_id: String,
    pub game: GameView,
}

/// Answer to every game action. On a rejected action `game` still carries the (unchanged)
/// state so the client can re-render.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<GameErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameView>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultsResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<GameErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsView>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameErrorCode {
    GameNotFound,
    NoCurrentRound,
    NoPendingGuess,
    AlreadyRevealed,
    NotRevealed,
    NoNextRound,
    InvalidCoordinate,
}

impl From<&GameActionError> for GameErrorCode {
    fn from(err: &GameActionError) -> Self {
        match err {
            GameActionError::GameNotFound => Self::GameNotFound,
            GameActionError::InvalidAction(action) => match action {
                InvalidAction::NoCurrentRound => Self::NoCurrentRound,
                InvalidAction::NoPendingGuess => Self::NoPendingGuess,
                InvalidAction::AlreadyRevealed => Self::AlreadyRevealed,
                InvalidAction::NotRevealed => Self::NotRevealed,
                InvalidAction::NoNextRound => Self::NoNextRound,
                InvalidAction::InvalidCoordinate => Self::InvalidCoordinate,
            },
        }
    }
}
