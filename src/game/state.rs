use crate::catalog::models::RoundDefinition;
use crate::game::errors::InvalidAction;
use crate::game::models::{Outcome, Phase, RoundResult, Tally};
use crate::geo::distance_meters;
use crate::geo::models::LatLng;

/// One playthrough of a catalog. Only the transition methods below mutate it.
#[derive(Clone, Debug)]
pub struct GameState {
    catalog_generation: u64,
    rounds: Vec<RoundDefinition>,
    current_round_index: usize,
    pending_guess: Option<LatLng>,
    revealed: bool,
    results: Vec<RoundResult>,
}

impl GameState {
    pub fn new(catalog_generation: u64, rounds: Vec<RoundDefinition>) -> Self {
        Self {
            catalog_generation,
            rounds,
            current_round_index: 0,
            pending_guess: None,
            revealed: false,
            results: Vec::new(),
        }
    }

    pub fn catalog_generation(&self) -> u64 {
        self.catalog_generation
    }

    #[cfg(test)]
    pub fn rounds(&self) -> &[RoundDefinition] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round_index
    }

    pub fn current_round(&self) -> Option<&RoundDefinition> {
        self.rounds.get(self.current_round_index)
    }

    pub fn pending_guess(&self) -> Option<LatLng> {
        self.pending_guess
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn current_result(&self) -> Option<&RoundResult> {
        self.results
            .iter()
            .find(|result| result.round_index == self.current_round_index)
    }

    pub fn tally(&self) -> Tally {
        Tally::from_results(&self.results)
    }

    pub fn has_next_round(&self) -> bool {
        self.current_round_index + 1 < self.rounds.len()
    }

    pub fn can_advance(&self) -> bool {
        self.revealed && self.has_next_round()
    }

    pub fn phase(&self) -> Phase {
        match self.current_round() {
            None => Phase::Finished,
            Some(_) if !self.revealed => Phase::Playing,
            Some(_) if self.has_next_round() => Phase::Revealed,
            Some(_) => Phase::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Places or moves the player's guess for the current round. The last call wins.
    pub fn set_guess(&mut self, guess: LatLng) -> Result<LatLng, InvalidAction> {
        if self.current_round().is_none() {
            return Err(InvalidAction::NoCurrentRound);
        }
        if self.revealed {
            return Err(InvalidAction::AlreadyRevealed);
        }
        let guess = guess.normalized().ok_or(InvalidAction::InvalidCoordinate)?;
        self.pending_guess = Some(guess);
        Ok(guess)
    }

    /// Scores the pending guess and reveals the round. Submitting the last round finishes
    /// the game.
    pub fn submit(&mut self) -> Result<&RoundResult, InvalidAction> {
        let round = self
            .rounds
            .get(self.current_round_index)
            .ok_or(InvalidAction::NoCurrentRound)?;
        if self.revealed {
            return Err(InvalidAction::AlreadyRevealed);
        }
        let player_guess = self.pending_guess.ok_or(InvalidAction::NoPendingGuess)?;

        let round_index = self.current_round_index;
        let already_scored = self
            .results
            .iter()
            .any(|result| result.round_index == round_index);
        if !already_scored {
            let player_distance = distance_meters(player_guess, round.answer);
            let opponent_distance = distance_meters(round.opponent_guess, round.answer);
            self.results.push(RoundResult {
                round_index,
                location_id: round.id.clone(),
                title: round.title.clone(),
                player_guess,
                opponent_guess: round.opponent_guess,
                answer: round.answer,
                player_distance,
                opponent_distance,
                outcome: Outcome::from_distances(player_distance, opponent_distance),
            });
        }
        self.revealed = true;
        self.current_result().ok_or(InvalidAction::NoCurrentRound)
    }

    pub fn advance(&mut self) -> Result<usize, InvalidAction> {
        if self.current_round().is_none() {
            return Err(InvalidAction::NoCurrentRound);
        }
        if !self.revealed {
            return Err(InvalidAction::NotRevealed);
        }
        if !self.has_next_round() {
            return Err(InvalidAction::NoNextRound);
        }
        self.current_round_index += 1;
        self.pending_guess = None;
        self.revealed = false;
        Ok(self.current_round_index)
    }

    pub fn restart(&mut self) {
        self.current_round_index = 0;
        self.pending_guess = None;
        self.revealed = false;
        self.results.clear();
    }

    /// Fills in a missing imagery reference. Rounds the player has already reached keep
    /// whatever they were shown, except the current one while it is still unrevealed.
    pub fn resolve_imagery(&mut self, location_id: &str, image_id: &str) -> bool {
        let first_open_index = if self.revealed {
            self.current_round_index + 1
        } else {
            self.current_round_index
        };
        let mut resolved = false;
        for round in self.rounds.iter_mut().skip(first_open_index) {
            if round.id == location_id && !round.has_imagery() {
                round.imagery_ref = image_id.to_string();
                resolved = true;
            }
        }
        resolved
    }
}
