//! Answer lifecycle handlers: feed listing, lookup, create, update,
//! soft-delete, and vote toggling.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use qboard_core::error::CoreError;
use qboard_core::feed::{annotate_answer, ParentEntity};
use qboard_core::types::DbId;
use qboard_db::models::answer::{Answer, AnswerFeedQuery, CreateAnswer, UpdateAnswer};
use qboard_db::repositories::{AnswerRepo, QuestionRepo, TopicRepo, UserRepo};
use qboard_events::bus::{DomainEvent, ANSWER_CREATED, ANSWER_UPDATED};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /api/v1/answers` -- the unified post feed.
///
/// Applies at most one of the two date bounds (`createdAfter` wins when
/// both are supplied) and annotates each answer for heterogeneous feed
/// rendering. In production, requests whose `Origin` header is not on the
/// trusted list receive an empty feed. That is an operational bypass for
/// unrecognized scrapers, not a security boundary.
pub async fn list_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnswerFeedQuery>,
) -> AppResult<impl IntoResponse> {
    if state.config.production && !feed_origin_trusted(&state, &headers) {
        return Ok(Json(DataResponse {
            data: Vec::<serde_json::Value>::new(),
        }));
    }

    // Mutually exclusive bounds: the lower bound wins when both are given.
    let (created_after, created_before) = if query.created_after.is_some() {
        (query.created_after, None)
    } else {
        (None, query.created_at_before)
    };

    let rows = AnswerRepo::list_feed(&state.pool, created_after, created_before).await?;

    let data: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|row| {
            let parent = match (&row.entity_type, row.entity_id) {
                (Some(entity_type), Some(entity_id)) => Some(ParentEntity {
                    entity_type: entity_type.clone(),
                    entity_id,
                }),
                _ => None,
            };
            let value = json!({
                "id": row.id,
                "question_id": row.question_id,
                "author_id": row.author_id,
                "content": row.content,
                "votes": row.votes,
                "deleted": row.deleted,
                "created_at": row.created_at,
                "updated_at": row.updated_at,
            });
            annotate_answer(value, parent.as_ref())
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// `GET /api/v1/answers/{id}`.
///
/// Soft-deleted answers are still returned here; the tombstone hides them
/// from listings, not from direct lookup.
pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let answer = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "answer",
            id,
        })?;
    Ok(Json(DataResponse { data: answer }))
}

/// `POST /api/v1/answers`.
///
/// Error precedence is input validation (400), then question existence
/// (404), then authentication (401) -- which is why this takes
/// [`MaybeAuthUser`] rather than rejecting unauthenticated requests up
/// front. On success the answer is inserted, its id is appended to the
/// question's answer list in a second write, and an `answer.created`
/// event is published for search resync and notification fanout. The bus
/// publish never blocks and never fails the 201.
pub async fn create_answer(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAnswer>,
) -> AppResult<impl IntoResponse> {
    // Stored verbatim; only edits trim. Whitespace-only still counts as
    // missing input.
    let content = input
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Answer content is required".into()))?;

    let question_id = input
        .question
        .ok_or_else(|| AppError::BadRequest("Question id is required".into()))?;

    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "question",
            id: question_id,
        })?;

    let user = maybe_user.require("Authentication required to answer")?;

    let answer = AnswerRepo::create(&state.pool, question.id, user.user_id, content)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    // Second write; no transaction spans the pair.
    if let Err(err) = QuestionRepo::append_answer(&state.pool, question.id, answer.id).await {
        tracing::warn!(error = %err, question_id = question.id, answer_id = answer.id,
            "Failed to link answer to question");
    }

    let event = build_created_event(&state, &question, &answer, user.user_id).await;
    state.event_bus.publish(event);

    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// `PUT /api/v1/answers/{id}`.
///
/// Only the author may edit. Same error precedence as [`create_answer`]:
/// input validation (400), answer existence (404), then authentication and
/// authorship (401). Publishes `answer.updated` so the topic's search
/// document picks up the new content.
pub async fn update_answer(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnswer>,
) -> AppResult<impl IntoResponse> {
    let content = input
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Answer content is required".into()))?;

    let answer = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "answer",
            id,
        })?;

    let user = maybe_user.require("Authentication required to edit an answer")?;

    if answer.author_id != user.user_id {
        return Err(CoreError::Unauthorized("Only the author can edit an answer".into()).into());
    }

    let saved = AnswerRepo::update_content(&state.pool, id, content)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    if let Some(topic_id) = resolve_topic_id(&state, saved.question_id).await {
        state.event_bus.publish(
            DomainEvent::new(ANSWER_UPDATED)
                .with_source("answer", saved.id)
                .with_actor(user.user_id)
                .with_payload(json!({ "topic_id": topic_id })),
        );
    }

    Ok(Json(DataResponse { data: saved }))
}

/// `DELETE /api/v1/answers/{id}`.
///
/// Soft delete: content and votes persist, the record stays fetchable by
/// id. Takes no auth; the contract is 404 or 200. Deliberately publishes
/// nothing -- deleted answers linger in the search index until the next
/// resync touches their topic.
pub async fn delete_answer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "answer",
            id,
        })?;

    let deleted = AnswerRepo::soft_delete(&state.pool, existing.id)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    Ok(Json(DataResponse { data: deleted }))
}

/// `POST /api/v1/answers/{id}/vote`.
///
/// Set-membership toggle on `votes`: present removes, absent appends.
/// Authors cannot vote on their own answers. Read-modify-write with no
/// locking; concurrent toggles may lose an update, which is accepted.
pub async fn vote_answer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let answer = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "answer",
            id,
        })?;

    if answer.author_id == user.user_id {
        return Err(CoreError::Unauthorized("Can't vote on own answer".into()).into());
    }

    let mut votes = answer.votes.clone();
    match votes.iter().position(|&v| v == user.user_id) {
        Some(idx) => {
            votes.remove(idx);
        }
        None => votes.push(user.user_id),
    }

    let saved = AnswerRepo::set_votes(&state.pool, id, &votes)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    Ok(Json(DataResponse { data: saved }))
}

/// Whether the request's `Origin` header is on the trusted feed list.
fn feed_origin_trusted(state: &AppState, headers: &HeaderMap) -> bool {
    let Some(origin) = headers.get("origin").and_then(|v| v.to_str().ok()) else {
        return false;
    };
    state
        .config
        .trusted_feed_origins
        .iter()
        .any(|trusted| trusted == origin)
}

/// Build the `answer.created` event, including the `notify` block when an
/// email-worthy recipient exists.
///
/// `can_send` requires a question author distinct from the acting user
/// with a different email on file. Lookup failures degrade to an event
/// without a notify block; the answer itself has already been saved.
async fn build_created_event(
    state: &AppState,
    question: &qboard_db::models::question::Question,
    answer: &Answer,
    actor_id: DbId,
) -> DomainEvent {
    // The parent entity id is forwarded whatever its type; reindexing an id
    // that matches no topic is a no-op upsert.
    let topic_id = question.entity_id;

    let mut payload = json!({ "question_id": question.id });
    if let Some(topic_id) = topic_id {
        payload["topic_id"] = json!(topic_id);
    }

    if let Some(notify) = build_notify_block(state, question, answer, actor_id, topic_id).await {
        payload["notify"] = notify;
    }

    DomainEvent::new(ANSWER_CREATED)
        .with_source("answer", answer.id)
        .with_actor(actor_id)
        .with_payload(payload)
}

async fn build_notify_block(
    state: &AppState,
    question: &qboard_db::models::question::Question,
    answer: &Answer,
    actor_id: DbId,
    topic_id: Option<DbId>,
) -> Option<serde_json::Value> {
    let author_id = question.author_id?;
    if author_id == actor_id {
        return None;
    }

    let author = match UserRepo::find_by_id(&state.pool, author_id).await {
        Ok(user) => user?,
        Err(err) => {
            tracing::warn!(error = %err, author_id, "Failed to load question author for notify");
            return None;
        }
    };

    let actor = match UserRepo::find_by_id(&state.pool, actor_id).await {
        Ok(user) => user?,
        Err(err) => {
            tracing::warn!(error = %err, actor_id, "Failed to load acting user for notify");
            return None;
        }
    };

    // One gate for both channels: an author without an email (or sharing
    // the actor's address) gets no in-app notification either.
    let can_send = match (&author.email, &actor.email) {
        (Some(author_email), Some(actor_email)) => author_email != actor_email,
        (Some(_), None) => true,
        _ => false,
    };
    if !can_send {
        return None;
    }

    let url = match topic_id {
        Some(topic_id) => match TopicRepo::find_by_id(&state.pool, topic_id).await {
            Ok(Some(topic)) => Some(format!("/topic/{}/question/{}", topic.slug, question.id)),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, topic_id, "Failed to resolve topic for notify url");
                None
            }
        },
        None => None,
    };

    Some(json!({
        "recipient_id": author.id,
        "recipient_email": author.email.clone(),
        "title": "Someone answered your question",
        "body": answer.content,
        "data": {
            "question_id": question.id,
            "answer_id": answer.id,
            "actor_id": actor_id,
        },
        "url": url,
    }))
}

/// Resolve an answer's topic through its question's entity reference.
async fn resolve_topic_id(state: &AppState, question_id: DbId) -> Option<DbId> {
    match QuestionRepo::find_by_id(&state.pool, question_id).await {
        Ok(Some(question)) => question.entity_id,
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, question_id, "Failed to resolve question for event");
            None
        }
    }
}
