use crate::game::errors::{GameActionError, InvalidAction};
use crate::game::models::{Outcome, Phase};
use crate::game::tests::three_rounds;
use crate::geo::models::LatLng;
use crate::storage::games::HashMapGamesStorage;
use crate::storage::interface::{GameFlowHandler, GameImageryRepo, GameRepo};
use std::time::Duration;

#[tokio::test]
async fn test_created_game_is_playable() {
    let games = HashMapGamesStorage::default();
    let (game_id, _) = games.create(1, three_rounds()).await;

    assert_eq!(game_id.len(), 10);
    let view = games.view(&game_id).await.unwrap();
    assert_eq!(view.phase, Phase::Playing);
    assert_eq!(view.round_count, 3);
}

#[tokio::test]
async fn test_unknown_game_is_reported() {
    let games = HashMapGamesStorage::default();

    assert!(games.view("nope").await.is_none());
    assert!(matches!(
        games.submit("nope").await,
        Err(GameActionError::GameNotFound)
    ));
}

#[tokio::test]
async fn test_rejected_action_surfaces_the_reason() {
    let games = HashMapGamesStorage::default();
    let (game_id, _) = games.create(1, three_rounds()).await;

    let err = games.submit(&game_id).await.unwrap_err();

    assert!(matches!(
        err,
        GameActionError::InvalidAction(InvalidAction::NoPendingGuess)
    ));
}

#[tokio::test]
async fn test_concurrent_submits_score_the_round_once() {
    let games = HashMapGamesStorage::default();
    let (game_id, _) = games.create(1, three_rounds()).await;
    games
        .set_guess(&game_id, LatLng::new(0.0, 0.25))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let games = games.clone();
        let game_id = game_id.clone();
        handles.push(tokio::spawn(async move { games.submit(&game_id).await.is_ok() }));
    }
    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    let results = games.results(&game_id).await.unwrap();
    assert_eq!(results.results.len(), 1);
    assert_eq!(results.results[0].outcome, Outcome::PlayerWins);
}

#[tokio::test]
async fn test_imagery_reaches_only_games_of_the_same_generation() {
    let games = HashMapGamesStorage::default();
    let mut rounds = three_rounds();
    rounds[2].imagery_ref = String::new();
    let (current_game, _) = games.create(2, rounds.clone()).await;
    let (stale_game, _) = games.create(1, rounds).await;

    let updated = games.apply_imagery(2, "round_3", "resolved").await;

    assert_eq!(updated, 1);
    for _ in 0..2 {
        games
            .set_guess(&current_game, LatLng::new(0.0, 0.5))
            .await
            .unwrap();
        games.submit(&current_game).await.unwrap();
        games.advance(&current_game).await.unwrap();
    }
    let view = games.view(&current_game).await.unwrap();
    assert_eq!(
        view.current_round.unwrap().imagery_ref.as_deref(),
        Some("resolved")
    );
    let view = games.view(&stale_game).await.unwrap();
    assert_eq!(view.round_count, 3);
}

#[tokio::test]
async fn test_idle_games_are_dropped_on_create() {
    let games = HashMapGamesStorage::new(Duration::from_millis(200));
    let (active_game, _) = games.create(1, three_rounds()).await;
    let (idle_game, _) = games.create(1, three_rounds()).await;

    tokio::time::sleep(Duration::from_millis(120)).await;
    games
        .set_guess(&active_game, LatLng::new(0.0, 0.25))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let (new_game, _) = games.create(1, three_rounds()).await;

    assert!(games.view(&idle_game).await.is_none());
    assert!(matches!(
        games.submit(&idle_game).await,
        Err(GameActionError::GameNotFound)
    ));
    assert!(games.view(&active_game).await.is_some());
    assert!(games.view(&new_game).await.is_some());
}

#[tokio::test]
async fn test_idle_games_stop_receiving_imagery() {
    let games = HashMapGamesStorage::new(Duration::from_millis(50));
    let mut rounds = three_rounds();
    rounds[2].imagery_ref = String::new();
    games.create(1, rounds.clone()).await;

    tokio::time::sleep(Duration::from_millis(80)).await;
    games.create(1, rounds).await;
    let updated = games.apply_imagery(1, "round_3", "resolved").await;

    assert_eq!(updated, 1);
}
