use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::topic_page;
use crate::state::AppState;

/// Topic page routes, registered as `/topicpages`.
///
/// ```text
/// GET    /{slug}                    get_page (lazy create)
/// PUT    /{slug}                    update_page
/// POST   /{slug}/publish            publish_page
/// POST   /{slug}/unpublish          unpublish_page
/// GET    /{slug}/content            show_content
/// GET    /{slug}/related-links      related_links
/// GET    /{slug}/images             get_images
/// POST   /{slug}/images/sign        sign_image
/// DELETE /{slug}/images/{image_id}  delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{slug}",
            get(topic_page::get_page).put(topic_page::update_page),
        )
        .route("/{slug}/publish", post(topic_page::publish_page))
        .route("/{slug}/unpublish", post(topic_page::unpublish_page))
        .route("/{slug}/content", get(topic_page::show_content))
        .route("/{slug}/related-links", get(topic_page::related_links))
        .route("/{slug}/images", get(topic_page::get_images))
        .route("/{slug}/images/sign", post(topic_page::sign_image))
        .route(
            "/{slug}/images/{image_id}",
            delete(topic_page::delete_image),
        )
}
