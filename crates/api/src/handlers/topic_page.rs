//! Topic page lifecycle handlers: lazy page read, maintainer updates with
//! revision history, publish state, related links, and image management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use qboard_cloud::coordinator::ImageUploadCoordinator;
use qboard_core::error::CoreError;
use qboard_core::revision::RevisionKind;
use qboard_core::types::DbId;
use qboard_db::models::topic::Topic;
use qboard_db::models::topic_page::{
    SignImageUpload, TopicPage, UpdateTopicPage, PLACEHOLDER_CONTENT,
};
use qboard_db::repositories::{
    ImageRepo, RelatedLinkRepo, RevisionRepo, TopicPageRepo, TopicRepo,
};
use qboard_events::bus::{DomainEvent, TOPIC_PAGE_UPDATED};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /api/v1/topicpages/{slug}`.
///
/// Lazily creates the page on first read: insert with placeholder content,
/// then link it from the topic (two sequential writes). First read answers
/// 201, subsequent reads 200 with the same page.
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;

    if let Some(page) = TopicPageRepo::find_by_topic(&state.pool, topic.id).await? {
        return Ok((
            StatusCode::OK,
            Json(DataResponse {
                data: json!({ "topic": topic, "topic_page": page }),
            }),
        ));
    }

    let page = TopicPageRepo::create(&state.pool, topic.id, PLACEHOLDER_CONTENT)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    let topic = TopicRepo::set_topic_page(&state.pool, topic.id, page.id)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: json!({ "topic": topic, "topic_page": page }),
        }),
    ))
}

/// `PUT /api/v1/topicpages/{slug}`.
///
/// Maintainer-only. The revision event is appended *before* any content
/// change, so a failed save still leaves an audit entry of the attempt.
/// `published` defaults to false when the patch omits it; partial content
/// and logo fields never wipe existing values.
pub async fn update_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(patch): Json<UpdateTopicPage>,
) -> AppResult<impl IntoResponse> {
    let response = apply_page_update(&state, &user, &slug, patch).await?;
    Ok(response)
}

/// `POST /api/v1/topicpages/{slug}/publish`.
pub async fn publish_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let patch = UpdateTopicPage {
        published: Some(true),
        event: Some(RevisionKind::Publish.as_str().to_string()),
        ..Default::default()
    };
    let response = apply_page_update(&state, &user, &slug, patch).await?;
    Ok(response)
}

/// `POST /api/v1/topicpages/{slug}/unpublish`.
pub async fn unpublish_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let patch = UpdateTopicPage {
        published: Some(false),
        event: Some(RevisionKind::Unpublish.as_str().to_string()),
        ..Default::default()
    };
    let response = apply_page_update(&state, &user, &slug, patch).await?;
    Ok(response)
}

/// `GET /api/v1/topicpages/{slug}/content`.
///
/// Read-only; unlike [`get_page`] this never creates the page, but the
/// response carries the same `{topic, topic_page}` pair.
pub async fn show_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;
    let page = find_page(&state, &topic, &slug).await?;
    Ok(Json(DataResponse {
        data: json!({ "topic": topic, "topic_page": page }),
    }))
}

/// `GET /api/v1/topicpages/{slug}/related-links`.
///
/// Pass-through to the link listing; deleted links stay visible to their
/// submitter.
pub async fn related_links(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;
    let page = find_page(&state, &topic, &slug).await?;

    let viewer = maybe_user.0.map(|u| u.user_id);
    let links = RelatedLinkRepo::list_for_page(&state.pool, page.id, viewer).await?;

    Ok(Json(DataResponse { data: links }))
}

/// `GET /api/v1/topicpages/{slug}/images`.
pub async fn get_images(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;
    let page = find_page(&state, &topic, &slug).await?;

    let images = ImageRepo::list_public(&state.pool, page.id).await?;

    Ok(Json(DataResponse { data: images }))
}

/// `POST /api/v1/topicpages/{slug}/images/sign`.
///
/// Hands off to the upload coordinator: presign first, then record the
/// image. A signer failure maps to 503 with nothing persisted. The raw
/// signer payload goes back to the client, which PUTs the binary itself.
pub async fn sign_image(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<SignImageUpload>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;
    let page = find_page(&state, &topic, &slug).await?;

    let signed = ImageUploadCoordinator::request_upload(
        &state.pool,
        state.signer.as_ref(),
        &state.config.topic_bucket,
        page.id,
        user.user_id,
        &input.file_type,
    )
    .await?;

    Ok(Json(signed))
}

/// `DELETE /api/v1/topicpages/{slug}/images/{image_id}`.
///
/// Soft delete, no auth gate: 404 when the image is absent, 200 otherwise.
pub async fn delete_image(
    State(state): State<AppState>,
    Path((slug, image_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, &slug).await?;
    let page = find_page(&state, &topic, &slug).await?;

    let image = ImageRepo::find_for_page(&state.pool, page.id, image_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "image",
            id: image_id,
        })?;

    ImageRepo::soft_delete(&state.pool, page.id, image.id)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    Ok(Json(json!({ "message": "Deleted" })))
}

// ---------------------------------------------------------------------------
// Shared update path
// ---------------------------------------------------------------------------

/// The update path shared by `update_page`, `publish_page`, and
/// `unpublish_page`: authorize, append the revision event, then persist
/// topic and page as two sequential writes.
async fn apply_page_update(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    patch: UpdateTopicPage,
) -> Result<Json<serde_json::Value>, AppError> {
    let topic = find_topic(state, slug).await?;

    if topic.maintainer_id != Some(user.user_id) {
        return Err(
            CoreError::Forbidden("Only the topic maintainer can edit this page".into()).into(),
        );
    }

    let page = find_page(state, &topic, slug).await?;

    let kind = RevisionKind::parse_or_edit(patch.event.as_deref());
    RevisionRepo::append(&state.pool, page.id, user.user_id, kind)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    let published = patch.published.unwrap_or(false);

    // Topic first, then page; no transaction spans the pair.
    TopicRepo::set_topic_page(&state.pool, topic.id, page.id)
        .await
        .map_err(|err| AppError::SaveError(err.to_string()))?;

    let saved = TopicPageRepo::apply_update(
        &state.pool,
        page.id,
        patch.content.as_deref(),
        patch.logo.as_deref(),
        published,
    )
    .await
    .map_err(|err| AppError::SaveError(err.to_string()))?;

    state.event_bus.publish(
        DomainEvent::new(TOPIC_PAGE_UPDATED)
            .with_source("topic_page", saved.id)
            .with_actor(user.user_id)
            .with_payload(json!({ "topic_id": topic.id })),
    );

    Ok(Json(json!({ "message": "Saved", "topic_page": saved })))
}

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

async fn find_topic(state: &AppState, slug: &str) -> Result<Topic, AppError> {
    TopicRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| {
            CoreError::NotFoundBySlug {
                entity: "topic",
                slug: slug.to_string(),
            }
            .into()
        })
}

async fn find_page(state: &AppState, topic: &Topic, slug: &str) -> Result<TopicPage, AppError> {
    TopicPageRepo::find_by_topic(&state.pool, topic.id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFoundBySlug {
                entity: "topic page",
                slug: slug.to_string(),
            }
            .into()
        })
}
