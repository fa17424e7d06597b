use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An action that is not allowed in the current game state. The state is left untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidAction {
    #[error("there is no round to play")]
    NoCurrentRound,
    #[error("place a guess on the map before submitting")]
    NoPendingGuess,
    #[error("the current round has already been revealed")]
    AlreadyRevealed,
    #[error("the current round has not been revealed yet")]
    NotRevealed,
    #[error("there is no next round")]
    NoNextRound,
    #[error("the guess is not a valid coordinate")]
    InvalidCoordinate,
}

#[derive(Debug, Error)]
pub enum GameActionError {
    #[error("game not found")]
    GameNotFound,
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),
}
