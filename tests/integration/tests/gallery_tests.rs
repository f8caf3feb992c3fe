//! Gallery merge protocol tests
//!
//! Run with: cargo test -p integration-tests --test gallery_tests

use std::time::Duration;

use integration_tests::{eventually, handle, sample_content, TestSession};
use party_core::VoteEvent;
use party_service::{LoadState, ServiceError};

// ============================================================================
// Load & Merge
// ============================================================================

#[tokio::test]
async fn test_missing_vote_row_merges_as_zero() {
    let t = TestSession::new(sample_content(&["alpha", "bravo"], 0));
    t.votes.seed(&handle("alpha"), 4);

    t.session.gallery().load().await.unwrap();

    let nominees = t.session.gallery().nominees();
    assert_eq!(nominees.len(), 2);
    assert_eq!(nominees[0].votes, 4);
    assert_eq!(nominees[1].handle, handle("bravo"));
    assert_eq!(nominees[1].votes, 0);
}

#[tokio::test]
async fn test_content_order_drives_list() {
    let t = TestSession::new(sample_content(&["zulu", "alpha", "mike"], 0));
    t.votes.seed(&handle("ghost"), 99);

    t.session.gallery().load().await.unwrap();

    let order: Vec<String> = t
        .session
        .gallery()
        .nominees()
        .into_iter()
        .map(|n| n.handle.into_inner())
        .collect();
    assert_eq!(order, vec!["zulu", "alpha", "mike"]);
}

#[tokio::test]
async fn test_either_fetch_failing_fails_whole_load() {
    let t = TestSession::new(sample_content(&["alpha"], 2));
    t.votes.fail_fetches(true);

    let err = t.session.gallery().load().await.unwrap_err();
    assert!(matches!(err, ServiceError::LoadFailed(_)));
    assert_eq!(err.user_message(), "The gallery couldn't be loaded right now.");

    let view = t.session.gallery().view();
    assert_eq!(view.load_state, LoadState::Failed);
    assert!(view.nominees.is_empty());
    assert!(view.archive.is_empty());

    // No automatic retry
    assert_eq!(t.content.fetch_count(), 1);
}

#[tokio::test]
async fn test_content_failure_degrades() {
    let t = TestSession::new(sample_content(&["alpha"], 0));
    t.content.fail_fetches(true);

    assert!(t.session.gallery().load().await.is_err());
    assert_eq!(t.session.gallery().load_state(), LoadState::Failed);

    // A manual retry recovers
    t.content.fail_fetches(false);
    t.session.gallery().load().await.unwrap();
    assert_eq!(t.session.gallery().load_state(), LoadState::Ready);
}

// ============================================================================
// Push Updates
// ============================================================================

#[tokio::test]
async fn test_push_before_merge_completes_is_kept() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    t.votes.seed(&handle("x"), 3);
    let release = t.votes.hold_next_fetch();
    let gallery = t.session.gallery();

    let push = async {
        while gallery.load_state() != LoadState::Loading {
            tokio::task::yield_now().await;
        }
        gallery.apply_event(&VoteEvent::new(handle("x"), 7));
        release.send(()).ok();
    };
    let (loaded, ()) = tokio::join!(gallery.load(), push);
    loaded.unwrap();

    let nominees = gallery.nominees();
    assert_eq!(nominees[0].handle, handle("x"));
    assert_eq!(nominees[0].votes, 7);
}

#[tokio::test]
async fn test_live_updates_patch_counts() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();

    let live = gallery.start_live_updates().await.unwrap();
    assert!(live.is_active());
    t.votes.push(&handle("y"), 12).await;

    assert!(
        eventually(Duration::from_secs(2), || {
            gallery.nominees().iter().any(|n| n.handle == handle("y") && n.votes == 12)
        })
        .await
    );
    live.stop();
}

#[tokio::test]
async fn test_stopping_live_updates_releases_subscription() {
    let t = TestSession::new(sample_content(&["x"], 0));
    let live = t.session.gallery().start_live_updates().await.unwrap();
    assert_eq!(t.votes.live_subscribers(), 1);

    drop(live);

    assert!(eventually(Duration::from_secs(2), || t.votes.live_subscribers() == 0).await);
}

#[tokio::test]
async fn test_push_for_unknown_nominee_is_ignored() {
    let t = TestSession::new(sample_content(&["x"], 0));
    t.session.gallery().load().await.unwrap();

    t.session.gallery().apply_event(&VoteEvent::new(handle("stranger"), 5));

    let nominees = t.session.gallery().nominees();
    assert_eq!(nominees.len(), 1);
    assert_eq!(nominees[0].votes, 0);
}

// ============================================================================
// View Projection
// ============================================================================

#[tokio::test]
async fn test_counts_hidden_until_voted() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    t.votes.seed(&handle("x"), 5);
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();

    let view = gallery.view();
    assert!(!view.has_voted);
    assert!(view.nominees.iter().all(|n| n.votes.is_none() && !n.is_leader));
    assert!(gallery.leader().is_none());

    gallery.cast_vote(&handle("y")).await.unwrap();

    let view = gallery.view();
    assert!(view.has_voted);
    assert_eq!(view.nominees[0].votes, Some(5));
    assert!(view.nominees[0].is_leader);
    assert!(!view.nominees[1].is_leader);
    assert_eq!(gallery.leader().unwrap().handle, handle("x"));
}

#[tokio::test]
async fn test_no_leader_when_all_zero() {
    let t = TestSession::new(sample_content(&["x", "y"], 0));
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();

    // Vote lands remotely but the local list has not been patched yet
    gallery.cast_vote(&handle("x")).await.unwrap();

    let view = gallery.view();
    assert!(view.has_voted);
    assert!(view.nominees.iter().all(|n| !n.is_leader));
    assert!(gallery.leader().is_none());
}

#[tokio::test]
async fn test_tied_leaders_all_marked() {
    let t = TestSession::new(sample_content(&["x", "y", "z"], 0));
    t.votes.seed(&handle("x"), 3);
    t.votes.seed(&handle("z"), 3);
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();
    gallery.cast_vote(&handle("y")).await.unwrap();

    let marked: Vec<bool> = gallery.view().nominees.iter().map(|n| n.is_leader).collect();
    assert_eq!(marked, vec![true, false, true]);
    assert_eq!(gallery.leader().unwrap().handle, handle("x"));
}

#[tokio::test]
async fn test_hero_video_falls_back() {
    let t = TestSession::new(sample_content(&["x"], 0));
    t.session.gallery().load().await.unwrap();
    assert_eq!(
        t.session.gallery().view().hero_video_url,
        "https://cdn.example.com/fallback.mp4"
    );

    let mut content = sample_content(&["x"], 0);
    content.settings.hero_video_url = Some("https://cdn.example.com/hero.mp4".to_string());
    t.content.set_snapshot(content);
    t.session.gallery().load().await.unwrap();
    assert_eq!(
        t.session.gallery().hero_video_url(),
        "https://cdn.example.com/hero.mp4"
    );
}

#[tokio::test]
async fn test_photo_carousel_wraps() {
    let t = TestSession::new(sample_content(&["x"], 0));
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();
    let x = handle("x");

    assert_eq!(
        gallery.view().nominees[0].current_photo.as_deref(),
        Some("https://cdn.example.com/x/1.jpg")
    );
    assert_eq!(gallery.next_photo(&x).unwrap(), 1);
    assert_eq!(
        gallery.view().nominees[0].current_photo.as_deref(),
        Some("https://cdn.example.com/x/2.jpg")
    );
    assert_eq!(gallery.next_photo(&x).unwrap(), 0);
    assert_eq!(gallery.prev_photo(&x).unwrap(), 1);

    let err = gallery.next_photo(&handle("nobody")).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_NOMINEE");
}

#[tokio::test]
async fn test_reload_with_fewer_photos_resets_carousel() {
    let t = TestSession::new(sample_content(&["x"], 0));
    let gallery = t.session.gallery();
    gallery.load().await.unwrap();
    assert_eq!(gallery.next_photo(&handle("x")).unwrap(), 1);

    let mut fewer = sample_content(&["x"], 0);
    fewer.nominees[0].photo_urls.truncate(1);
    t.content.set_snapshot(fewer);
    gallery.load().await.unwrap();

    assert_eq!(
        gallery.view().nominees[0].current_photo.as_deref(),
        Some("https://cdn.example.com/x/1.jpg")
    );
}

#[tokio::test]
async fn test_archive_lightbox() {
    let t = TestSession::new(sample_content(&["x"], 3));
    t.session.gallery().load().await.unwrap();

    let mut lightbox = t.session.gallery().lightbox();
    assert_eq!(lightbox.len(), 3);
    assert_eq!(lightbox.open(1).unwrap().caption.as_deref(), Some("moment 1"));
    assert_eq!(lightbox.slide_number(), Some(2));
    lightbox.next();
    lightbox.next();
    assert_eq!(lightbox.slide_number(), Some(1));
    lightbox.close();
    assert!(lightbox.current().is_none());
}
