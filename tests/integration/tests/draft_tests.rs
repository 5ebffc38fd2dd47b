//! Draft engine integration tests
//!
//! Drive drafts through the public service API with mock search and
//! transport collaborators.
//!
//! Run with: cargo test -p integration-tests --test draft_tests

use std::sync::Arc;

use draft_common::DraftConfig;
use draft_core::{
    DraftChange, DraftError, DraftStatus, InsideSpanPolicy, MentionKind, MentionTarget,
    SearchHit, TextRange,
};
use draft_service::SendOutcome;
use integration_tests::{
    mock_user_hit, test_context, unique_user, FailingSearch, GatedSearch, MockSearch,
    RecordingTransport, UpdateRecorder,
};

fn ranges(draft: &draft_service::Draft) -> Vec<TextRange> {
    draft.spans().iter().map(|s| s.range).collect()
}

// ============================================================================
// Suggestion Flow Tests
// ============================================================================

#[tokio::test]
async fn test_suggestion_replaces_query_with_mention() {
    let search = MockSearch::mock_user();
    let ctx = test_context(search.clone(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "hello @Mo").unwrap();

    let edit = updates.next().await.unwrap();
    assert_eq!(edit.change, DraftChange::TextInserted { offset: 0, len: 9 });
    assert!(edit.suggestions.is_empty());

    let resolved = updates.next().await.unwrap();
    assert_eq!(resolved.change, DraftChange::SuggestionsResolved { count: 1 });
    assert_eq!(resolved.suggestions.len(), 1);
    assert_eq!(search.queries(), vec![("Mo".to_string(), MentionKind::User)]);

    let suggestion = &resolved.suggestions[0];
    assert_eq!(suggestion.source, TextRange::new(6, 3));
    assert_eq!(suggestion.target, MentionTarget::user("mock_user"));

    draft
        .insert_suggested_mention(suggestion, "Mock Usernamiski")
        .unwrap();
    assert_eq!(draft.text(), "hello Mock Usernamiski");
    assert_eq!(ranges(&draft), vec![TextRange::new(6, 16)]);

    let applied = updates.next().await.unwrap();
    assert_eq!(
        applied.change,
        DraftChange::SuggestionApplied { range: TextRange::new(6, 16) }
    );
    assert!(updates.stays_quiet().await);
}

#[tokio::test]
async fn test_edit_notification_precedes_suggestions() {
    let ctx = test_context(
        MockSearch::new(vec![mock_user_hit(), SearchHit::new(unique_user(), "Other")]),
        RecordingTransport::accepting(),
        DraftConfig::default(),
    );
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "@").unwrap();
    draft.insert_text(1, "M").unwrap();

    let first = updates.next().await.unwrap();
    let second = updates.next().await.unwrap();
    let third = updates.next().await.unwrap();
    assert!(matches!(first.change, DraftChange::TextInserted { offset: 0, .. }));
    assert!(matches!(second.change, DraftChange::TextInserted { offset: 1, .. }));
    assert_eq!(third.change, DraftChange::SuggestionsResolved { count: 2 });
    assert_eq!(third.suggestions[0].source_text, "@M");
}

#[tokio::test]
async fn test_channel_trigger_searches_channels() {
    let search = MockSearch::new(vec![SearchHit::new(MentionTarget::channel("c1"), "general")]);
    let ctx = test_context(search.clone(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "see #gen").unwrap();
    updates.next().await.unwrap();
    let resolved = updates.next().await.unwrap();

    assert_eq!(search.queries(), vec![("gen".to_string(), MentionKind::Channel)]);
    draft.accept_suggestion(&resolved.suggestions[0]).unwrap();
    assert_eq!(draft.text(), "see general");
    assert_eq!(draft.spans()[0].target, MentionTarget::channel("c1"));
}

#[tokio::test]
async fn test_superseded_search_is_discarded() {
    let search = GatedSearch::new(vec![mock_user_hit()]);
    let ctx = test_context(search.clone(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "hello @Mo").unwrap();
    updates.next().await.unwrap();
    tokio::task::yield_now().await;
    assert_eq!(draft.status(), DraftStatus::SearchPending);

    draft.insert_text(9, " there").unwrap();
    updates.next().await.unwrap();
    assert_eq!(draft.status(), DraftStatus::Idle);

    search.release();
    assert!(updates.stays_quiet().await);
}

#[tokio::test]
async fn test_stale_suggestion_after_intervening_edit() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "hello @Mo").unwrap();
    updates.next().await.unwrap();
    let suggestion = updates.next().await.unwrap().suggestions[0].clone();

    draft.remove_text(0, 6).unwrap();
    updates.next().await.unwrap();

    let before = draft.snapshot();
    let err = draft.accept_suggestion(&suggestion).unwrap_err();
    assert_eq!(err, DraftError::StaleSuggestion { start: 6, length: 3 });
    assert_eq!(draft.snapshot(), before);
    assert!(updates.drain().is_empty());
}

#[tokio::test]
async fn test_suggestion_stale_once_query_keeps_growing() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "hello @Mo").unwrap();
    updates.next().await.unwrap();
    let early = updates.next().await.unwrap().suggestions[0].clone();

    draft.insert_text(9, "hammed").unwrap();
    let err = draft.accept_suggestion(&early).unwrap_err();
    assert_eq!(err, DraftError::StaleSuggestion { start: 6, length: 3 });
    assert_eq!(draft.text(), "hello @Mohammed");

    updates.next().await.unwrap();
    let fresh = updates.next().await.unwrap();
    assert_eq!(fresh.suggestions[0].source, TextRange::new(6, 9));
    draft.accept_suggestion(&fresh.suggestions[0]).unwrap();
    assert_eq!(draft.text(), "hello Mock Usernamiski");
    assert_eq!(ranges(&draft), vec![TextRange::new(6, 16)]);
}

#[tokio::test]
async fn test_search_failure_emits_no_suggestions() {
    let ctx = test_context(
        Arc::new(FailingSearch),
        RecordingTransport::accepting(),
        DraftConfig::default(),
    );
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "@Mo").unwrap();
    updates.next().await.unwrap();
    assert!(updates.stays_quiet().await);
    assert_eq!(draft.status(), DraftStatus::Idle);
    assert_eq!(draft.text(), "@Mo");
}

#[tokio::test]
async fn test_no_search_without_trigger() {
    let search = MockSearch::mock_user();
    let ctx = test_context(search.clone(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.insert_text(0, "hello @Mo there").unwrap();
    draft.insert_text(0, "plain ").unwrap();
    assert_eq!(updates.drain().len(), 2);
    assert!(updates.stays_quiet().await);
    assert!(search.queries().is_empty());
}

// ============================================================================
// Span Maintenance Tests
// ============================================================================

#[tokio::test]
async fn test_overlapping_mention_rejected() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    draft.insert_text(0, "wololo and stuff").unwrap();

    draft.add_mention(0, 6, MentionTarget::user("mock_user")).unwrap();
    let err = draft.add_mention(3, 4, unique_user()).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.code(), "OVERLAP_ERROR");
    assert_eq!(ranges(&draft), vec![TextRange::new(0, 6)]);
}

#[tokio::test]
async fn test_remove_text_shifts_then_drops_span() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.draft_with_text("abcdefghi").unwrap();
    draft.add_mention(6, 3, MentionTarget::user("u")).unwrap();

    draft.remove_text(0, 2).unwrap();
    assert_eq!(ranges(&draft), vec![TextRange::new(4, 3)]);

    draft.remove_text(4, 3).unwrap();
    assert!(draft.spans().is_empty());
    assert_eq!(draft.text(), "cdef");
}

#[tokio::test]
async fn test_out_of_bounds_edits_leave_draft_untouched() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.draft_with_text("short").unwrap();
    let mut updates = UpdateRecorder::attach(&draft);

    assert!(draft.insert_text(6, "x").unwrap_err().is_range());
    assert!(draft.remove_text(3, 5).unwrap_err().is_range());
    assert!(draft.add_mention(4, 2, unique_user()).unwrap_err().is_range());
    assert_eq!(
        draft.remove_mention_at(0).unwrap_err(),
        DraftError::Index { index: 0, len: 0 }
    );

    assert_eq!(draft.text(), "short");
    assert!(updates.drain().is_empty());
}

#[tokio::test]
async fn test_reject_policy_refuses_inside_insert() {
    let config = DraftConfig::default().with_policy(InsideSpanPolicy::Reject);
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), config);
    let draft = ctx.draft_with_text("hi bob!").unwrap();
    draft.add_mention(3, 3, MentionTarget::user("bob")).unwrap();

    let err = draft.insert_text(4, "o").unwrap_err();
    assert_eq!(err, DraftError::Overlap { start: 3, length: 3 });
    assert_eq!(draft.text(), "hi bob!");

    draft.insert_text(6, "by").unwrap();
    assert_eq!(ranges(&draft), vec![TextRange::new(3, 3)]);
}

#[tokio::test]
async fn test_extend_policy_grows_mention() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.draft_with_text("hi bob!").unwrap();
    draft.add_mention(3, 3, MentionTarget::user("bob")).unwrap();

    draft.insert_text(4, "o").unwrap();
    assert_eq!(draft.text(), "hi boob!");
    assert_eq!(ranges(&draft), vec![TextRange::new(3, 4)]);
}

#[tokio::test]
async fn test_update_replaces_text_and_clears_mentions() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.draft_with_text("hi bob").unwrap();
    draft.add_mention(3, 3, MentionTarget::user("bob")).unwrap();
    let mut updates = UpdateRecorder::attach(&draft);

    draft.update("something else entirely").unwrap();
    let update = updates.next().await.unwrap();
    assert_eq!(update.change, DraftChange::Replaced);
    assert_eq!(update.elements.len(), 1);
    assert!(draft.spans().is_empty());
}

#[tokio::test]
async fn test_max_length_enforced() {
    let config = DraftConfig {
        max_length: 10,
        ..DraftConfig::default()
    };
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), config);
    let draft = ctx.draft_with_text("123456789").unwrap();

    draft.insert_text(9, "0").unwrap();
    assert_eq!(
        draft.insert_text(10, "1").unwrap_err(),
        DraftError::ContentTooLong { max: 10 }
    );
    assert_eq!(draft.update("way too long now").unwrap_err().code(), "CONTENT_TOO_LONG");
    assert_eq!(draft.text(), "1234567890");
}

#[tokio::test]
async fn test_unsubscribed_observer_receives_nothing() {
    let ctx = test_context(MockSearch::mock_user(), RecordingTransport::accepting(), DraftConfig::default());
    let draft = ctx.new_draft();
    let mut kept = UpdateRecorder::attach(&draft);

    let dropped = Arc::new(parking_lot::Mutex::new(0_usize));
    let counter = Arc::clone(&dropped);
    let id = draft.subscribe(move |_: &draft_core::DraftUpdate| *counter.lock() += 1);

    draft.insert_text(0, "one").unwrap();
    assert!(draft.unsubscribe(id));
    draft.insert_text(3, " two").unwrap();

    assert_eq!(*dropped.lock(), 1);
    assert_eq!(kept.drain().len(), 2);
}

// ============================================================================
// Send Tests
// ============================================================================

#[tokio::test]
async fn test_send_delivers_payload_and_consumes_draft() {
    let transport = RecordingTransport::accepting();
    let ctx = test_context(MockSearch::mock_user(), transport.clone(), DraftConfig::default());
    let draft = ctx.draft_with_text("ping bob and bob").unwrap();
    draft.add_mention(13, 3, MentionTarget::user("bob")).unwrap();
    draft.add_mention(5, 3, MentionTarget::user("bob")).unwrap();

    assert_eq!(draft.send().await.unwrap(), SendOutcome::Sent);
    assert_eq!(draft.status(), DraftStatus::Sent);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].draft_id, draft.id());
    assert_eq!(sent[0].text, "ping bob and bob");
    assert_eq!(sent[0].spans[0].range, TextRange::new(5, 3));
    assert_eq!(sent[0].mentioned_users(), vec!["bob"]);

    assert_eq!(draft.insert_text(0, "x").unwrap_err(), DraftError::Consumed);
    assert_eq!(draft.remove_mention_at(0).unwrap_err(), DraftError::Consumed);
    assert!(!draft.send().await.unwrap_err().is_recoverable());
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn test_failed_send_keeps_draft_editable() {
    let transport = RecordingTransport::rejecting("channel closed");
    let ctx = test_context(MockSearch::mock_user(), transport.clone(), DraftConfig::default());
    let draft = ctx.draft_with_text("hello").unwrap();

    let outcome = draft.send().await.unwrap();
    assert!(!outcome.is_sent());
    assert_eq!(outcome.reason(), Some("Rejected: channel closed"));
    assert_eq!(transport.sent().len(), 1);

    draft.insert_text(5, " again").unwrap();
    assert_eq!(draft.send().await.unwrap().reason(), Some("Rejected: channel closed"));
    assert_eq!(transport.sent()[1].text, "hello again");
}

#[tokio::test]
async fn test_send_empty_draft_skips_transport() {
    let transport = RecordingTransport::accepting();
    let ctx = test_context(MockSearch::mock_user(), transport.clone(), DraftConfig::default());
    let draft = ctx.new_draft();

    let outcome = draft.send().await.unwrap();
    assert_eq!(outcome, SendOutcome::failed("message is empty"));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_payload_serializes_with_typed_targets() {
    let transport = RecordingTransport::accepting();
    let ctx = test_context(MockSearch::mock_user(), transport.clone(), DraftConfig::default());
    let draft = ctx.draft_with_text("see #general").unwrap();
    draft.add_mention(4, 8, MentionTarget::channel("c1")).unwrap();
    draft.send().await.unwrap();

    let json = serde_json::to_value(&transport.sent()[0]).unwrap();
    assert_eq!(json["text"], "see #general");
    assert_eq!(json["spans"][0]["target"]["type"], "channel");
    assert_eq!(json["spans"][0]["target"]["id"], "c1");
}
