//! HTTP-level integration tests for the answer lifecycle endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{
    auth_token, body_json, delete, get, post_json, post_json_auth, put_json, put_json_auth,
};
use sqlx::PgPool;

use qboard_db::models::question::CreateQuestion;
use qboard_db::repositories::{AnswerRepo, QuestionRepo, TopicRepo, UserRepo};
use qboard_events::bus::ANSWER_CREATED;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database; password hash is irrelevant for
/// token-based tests.
async fn seed_user(pool: &PgPool, username: &str, email: Option<&str>) -> i64 {
    UserRepo::create(pool, username, None, email, "$argon2id$stub")
        .await
        .expect("user creation should succeed")
        .id
}

/// Create a topic and a question attached to it, returning their ids.
async fn seed_topic_question(pool: &PgPool, author_id: Option<i64>) -> (i64, i64) {
    let topic = TopicRepo::create(pool, "rustlang", "Rust", None)
        .await
        .expect("topic creation should succeed");
    let question = QuestionRepo::create(
        pool,
        &CreateQuestion {
            author_id,
            entity_id: Some(topic.id),
            entity_type: Some("topic".to_string()),
            content: "How do lifetimes work?".to_string(),
        },
    )
    .await
    .expect("question creation should succeed");
    (topic.id, question.id)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// End-to-end creation: 201, answer linked to the question, and an
/// `answer.created` event carrying the notify block observable on the bus.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_end_to_end(pool: PgPool) {
    let author = seed_user(&pool, "asker", Some("asker@test.com")).await;
    let actor = seed_user(&pool, "answerer", Some("answerer@test.com")).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, Some(author)).await;

    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    let mut rx = bus.subscribe();

    let response = post_json_auth(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": question_id, "content": "  Borrow checker.  " }),
        &auth_token(actor),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let answer_id = json["data"]["id"].as_i64().unwrap();
    // Content is stored verbatim; only updates trim.
    assert_eq!(json["data"]["content"], "  Borrow checker.  ");

    let question = QuestionRepo::find_by_id(&pool, question_id)
        .await
        .unwrap()
        .unwrap();
    assert!(
        question.answer_ids.contains(&answer_id),
        "answer id must be appended to the question's answer list"
    );

    let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should be open");
    assert_eq!(event.event_type, ANSWER_CREATED);
    assert_eq!(event.source_entity_id, Some(answer_id));
    let notify = &event.payload["notify"];
    assert_eq!(notify["recipient_id"], author);
    assert_eq!(
        notify["recipient_email"], "asker@test.com",
        "differing emails must allow sending"
    );
}

/// An author without an email on file gets no notification at all: the
/// event carries no notify block, so neither channel fires.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_no_notify_without_author_email(pool: PgPool) {
    let author = seed_user(&pool, "asker", None).await;
    let actor = seed_user(&pool, "answerer", Some("answerer@test.com")).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, Some(author)).await;

    let (app, bus) = common::build_test_app_with_bus(pool);
    let mut rx = bus.subscribe();

    let response = post_json_auth(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": question_id, "content": "quiet" }),
        &auth_token(actor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should be open");
    assert_eq!(event.event_type, ANSWER_CREATED);
    assert!(
        event.payload.get("notify").is_none(),
        "no email on file must suppress the notify block entirely"
    );
}

/// Questions attached to non-topic entities still carry the parent entity
/// id on the event; the search resync simply finds no matching topic.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_forwards_any_parent_entity(pool: PgPool) {
    let actor = seed_user(&pool, "answerer", None).await;
    let question = QuestionRepo::create(
        &pool,
        &CreateQuestion {
            author_id: None,
            entity_id: Some(4242),
            entity_type: Some("link".to_string()),
            content: "What is this link about?".to_string(),
        },
    )
    .await
    .unwrap();

    let (app, bus) = common::build_test_app_with_bus(pool);
    let mut rx = bus.subscribe();

    let response = post_json_auth(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": question.id, "content": "It explains itself." }),
        &auth_token(actor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should be open");
    assert_eq!(event.payload["topic_id"], 4242);
}

/// Missing content is a 400 before any other check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_missing_content(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": 123 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Missing question id is a 400 before any other check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_missing_question(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/answers",
        serde_json::json!({ "content": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A nonexistent question answers 404 even for unauthenticated callers --
/// the existence check precedes the auth check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_question_not_found_before_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": 999999, "content": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Valid input against a real question without a token is a 401, and
/// nothing is persisted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_answer_unauthenticated(pool: PgPool) {
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/answers",
        serde_json::json!({ "question": question_id, "content": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let question = QuestionRepo::find_by_id(&pool, question_id)
        .await
        .unwrap()
        .unwrap();
    assert!(question.answer_ids.is_empty(), "nothing should be saved");
}

// ---------------------------------------------------------------------------
// Get / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_answer_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/answers/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only the author may edit; anyone else gets 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_answer_requires_author(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let other = seed_user(&pool, "other", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    let answer = AnswerRepo::create(&pool, question_id, author, "original")
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/answers/{}", answer.id),
        serde_json::json!({ "content": "hijacked" }),
        &auth_token(other),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/answers/{}", answer.id),
        serde_json::json!({ "content": "revised" }),
        &auth_token(author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "revised");
}

/// Edits share the create precedence: validation and existence are checked
/// before authentication, so an unauthenticated PUT sees 400 and 404, not
/// a blanket 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_answer_error_precedence(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    let answer = AnswerRepo::create(&pool, question_id, author, "original")
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/answers/{}", answer.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/answers/999999",
        serde_json::json!({ "content": "ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/answers/{}", answer.id),
        serde_json::json!({ "content": "anonymous edit" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Soft delete: 200 with the tombstoned record, still fetchable by id with
/// content and votes intact.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_answer_is_soft(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let voter = seed_user(&pool, "voter", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    let answer = AnswerRepo::create(&pool, question_id, author, "keep me")
        .await
        .unwrap();
    AnswerRepo::set_votes(&pool, answer.id, &[voter]).await.unwrap();

    // The delete contract is 404 or 200 and carries no auth gate.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/answers/{}", answer.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], true);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/answers/{}", answer.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "keep me");
    assert_eq!(json["data"]["votes"], serde_json::json!([voter]));
}

// ---------------------------------------------------------------------------
// Vote
// ---------------------------------------------------------------------------

/// Voting twice from the same state returns to the original state.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vote_toggle_involution(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let voter = seed_user(&pool, "voter", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    let answer = AnswerRepo::create(&pool, question_id, author, "vote on me")
        .await
        .unwrap();

    let uri = format!("/api/v1/answers/{}/vote", answer.id);
    let token = auth_token(voter);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["votes"], serde_json::json!([voter]));

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["votes"], serde_json::json!([]));
}

/// Authors cannot vote on their own answers; the vote set is untouched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_vote_rejected(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    let answer = AnswerRepo::create(&pool, question_id, author, "mine")
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/answers/{}/vote", answer.id),
        serde_json::json!({}),
        &auth_token(author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let saved = AnswerRepo::find_by_id(&pool, answer.id).await.unwrap().unwrap();
    assert!(saved.votes.is_empty(), "self-vote must not mutate");
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// The feed excludes soft-deleted answers and annotates each entry for
/// heterogeneous rendering.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_filters_and_annotates(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let (topic_id, question_id) = seed_topic_question(&pool, None).await;
    let kept = AnswerRepo::create(&pool, question_id, author, "kept").await.unwrap();
    let gone = AnswerRepo::create(&pool, question_id, author, "gone").await.unwrap();
    AnswerRepo::soft_delete(&pool, gone.id).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/answers").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], kept.id);
    assert_eq!(data[0]["type"], "answer");
    assert_eq!(data[0]["date"], data[0]["created_at"]);
    assert_eq!(data[0]["topics"], serde_json::json!([topic_id]));
}

/// In production, a request from an unrecognized origin gets an empty feed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_production_origin_bypass(pool: PgPool) {
    let author = seed_user(&pool, "author", None).await;
    let (_topic_id, question_id) = seed_topic_question(&pool, None).await;
    AnswerRepo::create(&pool, question_id, author, "hidden from scrapers")
        .await
        .unwrap();

    let mut config = common::test_config();
    config.production = true;
    config.trusted_feed_origins = vec!["https://qboard.example".to_string()];

    let (app, _bus) =
        common::build_test_app_with(pool.clone(), config.clone(), std::sync::Arc::new(common::StubSigner));
    let response = common::get_with_origin(app, "/api/v1/answers", "https://evil.example").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));

    // A trusted origin still sees the feed.
    let (app, _bus) =
        common::build_test_app_with(pool, config, std::sync::Arc::new(common::StubSigner));
    let response = common::get_with_origin(app, "/api/v1/answers", "https://qboard.example").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
