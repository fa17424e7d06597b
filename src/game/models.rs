use crate::geo::models::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Tie,
}

impl Outcome {
    /// Exact comparison: only bit-identical distances tie. Guesses a few millimeters apart
    /// do not, however close they look on the map.
    pub fn from_distances(player_distance: f64, opponent_distance: f64) -> Self {
        if player_distance == opponent_distance {
            Self::Tie
        } else if player_distance < opponent_distance {
            Self::PlayerWins
        } else {
            Self::OpponentWins
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round_index: usize,
    pub location_id: String,
    pub title: Option<String>,
    pub player_guess: LatLng,
    pub opponent_guess: LatLng,
    pub answer: LatLng,
    pub player_distance: f64,
    pub opponent_distance: f64,
    pub outcome: Outcome,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub player_wins: usize,
    pub opponent_wins: usize,
    pub ties: usize,
}

impl Tally {
    pub fn from_results(results: &[RoundResult]) -> Self {
        results.iter().fold(Self::default(), |mut tally, result| {
            match result.outcome {
                Outcome::PlayerWins => tally.player_wins += 1,
                Outcome::OpponentWins => tally.opponent_wins += 1,
                Outcome::Tie => tally.ties += 1,
            }
            tally
        })
    }

    /// Ties don't count for anyone; equal win counts make the whole game a tie.
    pub fn overall_winner(&self) -> OverallWinner {
        match self.player_wins.cmp(&self.opponent_wins) {
            std::cmp::Ordering::Greater => OverallWinner::Player,
            std::cmp::Ordering::Less => OverallWinner::Opponent,
            std::cmp::Ordering::Equal => OverallWinner::Tie,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverallWinner {
    Player,
    Opponent,
    Tie,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Playing,
    Revealed,
    Finished,
}
