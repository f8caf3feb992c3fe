//! Session vote guard tests
//!
//! Run with: cargo test -p integration-tests --test vote_tests

use std::sync::Arc;

use integration_tests::{handle, sample_content, TestSession};
use party_core::DeviceStore;
use party_db::JsonFileDeviceStore;
use party_service::{ServiceError, VoteState};

const VOTED_KEY: &str = "party.voted";

#[tokio::test]
async fn test_single_vote_persists_flag() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    t.session.gallery().load().await.unwrap();
    assert_eq!(t.session.votes().state(), VoteState::NotVoted);

    t.session.gallery().cast_vote(&handle("x")).await.unwrap();

    assert_eq!(t.session.votes().state(), VoteState::Voted);
    assert_eq!(t.device.get(VOTED_KEY).unwrap().as_deref(), Some("true"));
    assert_eq!(t.votes.increment_calls(), 1);
    assert_eq!(t.votes.votes_for(&handle("x")), 1);

    let err = t.session.gallery().cast_vote(&handle("y")).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyVoted));
    assert_eq!(t.votes.increment_calls(), 1);
}

#[tokio::test]
async fn test_concurrent_casts_issue_one_increment() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    let votes = t.session.votes();
    let x = handle("x");
    let y = handle("y");

    let (a, b, c) = tokio::join!(votes.cast_vote(&x), votes.cast_vote(&y), votes.cast_vote(&x));

    let results = [a, b, c];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::AlreadyVoted)))
            .count(),
        2
    );
    assert_eq!(t.votes.increment_calls(), 1);
}

#[tokio::test]
async fn test_failed_vote_stays_not_voted_and_can_retry() {
    let t = TestSession::new(sample_content(&["x"], 0));
    t.votes.fail_increments(true);

    let err = t.session.votes().cast_vote(&handle("x")).await.unwrap_err();
    assert!(matches!(err, ServiceError::VoteFailed(_)));
    assert!(err.is_retryable());
    assert_eq!(t.session.votes().state(), VoteState::NotVoted);
    assert_eq!(t.device.get(VOTED_KEY).unwrap(), None);

    t.votes.fail_increments(false);
    t.session.votes().cast_vote(&handle("x")).await.unwrap();
    assert!(t.session.votes().has_voted());
    assert_eq!(t.votes.increment_calls(), 2);
}

#[tokio::test]
async fn test_flag_survives_reload() {
    let t = TestSession::new(sample_content(&["x"], 0));
    t.session.votes().cast_vote(&handle("x")).await.unwrap();

    let reloaded = t.reload();
    assert_eq!(reloaded.session.votes().state(), VoteState::Voted);

    let err = reloaded.session.votes().cast_vote(&handle("x")).await.unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_VOTED");
    assert_eq!(t.votes.increment_calls(), 1);
}

#[tokio::test]
async fn test_flag_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("device.json");

    let device = Arc::new(JsonFileDeviceStore::open(&path).unwrap());
    let t = TestSession::with_device(sample_content(&["x"], 0), device);
    t.session.votes().cast_vote(&handle("x")).await.unwrap();
    drop(t);

    let device = Arc::new(JsonFileDeviceStore::open(&path).unwrap());
    let t = TestSession::with_device(sample_content(&["x"], 0), device);
    assert!(t.session.votes().has_voted());
}

#[tokio::test]
async fn test_vote_for_unloaded_nominee_rejected() {
    let t = TestSession::new(sample_content(&["x"], 0));
    t.session.gallery().load().await.unwrap();

    let err = t.session.gallery().cast_vote(&handle("ghost")).await.unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_NOMINEE");
    assert_eq!(t.votes.increment_calls(), 0);
    assert!(!t.session.votes().has_voted());
}
