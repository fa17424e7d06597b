use crate::game::models::{Outcome, OverallWinner, Phase, RoundResult, Tally};
use crate::game::state::GameState;
use crate::geo::format::{format_coordinate, format_distance};
use crate::geo::models::LatLng;
use serde::{Deserialize, Serialize};

/// Everything a client needs to render a game, with the answer and the opponent's guess
/// withheld until the round is revealed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub phase: Phase,
    /// 1-based, `0` when there is nothing to play.
    pub round_number: usize,
    pub round_count: usize,
    pub current_round: Option<RoundView>,
    pub pending_guess: Option<LatLng>,
    pub revealed: bool,
    pub round_result: Option<RoundResultView>,
    pub tally: Tally,
    pub finished: bool,
    pub can_advance: bool,
    /// Only set once the game is finished.
    pub overall_winner: Option<OverallWinner>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub id: String,
    pub title: Option<String>,
    pub imagery_ref: Option<String>,
    pub answer: Option<LatLng>,
    pub opponent_guess: Option<LatLng>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResultView {
    pub round_index: usize,
    pub location_id: String,
    pub title: Option<String>,
    pub player_guess: LatLng,
    pub opponent_guess: LatLng,
    pub answer: LatLng,
    pub player_distance: f64,
    pub opponent_distance: f64,
    pub outcome: Outcome,
    pub player_guess_text: String,
    pub opponent_guess_text: String,
    pub answer_text: String,
    pub player_distance_text: String,
    pub opponent_distance_text: String,
}

impl From<&RoundResult> for RoundResultView {
    fn from(result: &RoundResult) -> Self {
        Self {
            round_index: result.round_index,
            location_id: result.location_id.clone(),
            title: result.title.clone(),
            player_guess: result.player_guess,
            opponent_guess: result.opponent_guess,
            answer: result.answer,
            player_distance: result.player_distance,
            opponent_distance: result.opponent_distance,
            outcome: result.outcome,
            player_guess_text: format_coordinate(result.player_guess.lat, result.player_guess.lng),
            opponent_guess_text: format_coordinate(
                result.opponent_guess.lat,
                result.opponent_guess.lng,
            ),
            answer_text: format_coordinate(result.answer.lat, result.answer.lng),
            player_distance_text: format_distance(Some(result.player_distance)),
            opponent_distance_text: format_distance(Some(result.opponent_distance)),
        }
    }
}

impl From<&GameState> for GameView {
    fn from(game: &GameState) -> Self {
        let revealed = game.is_revealed();
        let current_round = game.current_round().map(|round| RoundView {
            id: round.id.clone(),
            title: round.title.clone(),
            imagery_ref: round.imagery().map(str::to_string),
            answer: revealed.then_some(round.answer),
            opponent_guess: revealed.then_some(round.opponent_guess),
        });
        let tally = game.tally();
        let finished = game.is_finished();
        Self {
            phase: game.phase(),
            round_number: if current_round.is_some() {
                game.current_round_index() + 1
            } else {
                0
            },
            round_count: game.round_count(),
            current_round,
            pending_guess: game.pending_guess(),
            revealed,
            round_result: game.current_result().map(RoundResultView::from),
            tally,
            finished,
            can_advance: game.can_advance(),
            overall_winner: finished.then(|| tally.overall_winner()),
        }
    }
}

/// Final (or running) scoreboard of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub results: Vec<RoundResultView>,
    pub tally: Tally,
    pub finished: bool,
    pub overall_winner: OverallWinner,
}

impl From<&GameState> for ResultsView {
    fn from(game: &GameState) -> Self {
        let tally = game.tally();
        Self {
            results: game.results().iter().map(RoundResultView::from).collect(),
            tally,
            finished: game.is_finished(),
            overall_winner: tally.overall_winner(),
        }
    }
}
