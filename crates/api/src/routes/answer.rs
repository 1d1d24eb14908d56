use axum::routing::{get, post};
use axum::Router;

use crate::handlers::answer;
use crate::state::AppState;

/// Answer routes, registered as `/answers`.
///
/// ```text
/// GET    /            list_feed
/// POST   /            create_answer
/// GET    /{id}        get_answer
/// PUT    /{id}        update_answer
/// DELETE /{id}        delete_answer
/// POST   /{id}/vote   vote_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(answer::list_feed).post(answer::create_answer))
        .route(
            "/{id}",
            get(answer::get_answer)
                .put(answer::update_answer)
                .delete(answer::delete_answer),
        )
        .route("/{id}/vote", post(answer::vote_answer))
}
