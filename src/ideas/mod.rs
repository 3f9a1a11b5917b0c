mod comment;
mod crud;
mod like;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list_ideas).post(crud::create_idea))
        .route("/debug/all", get(crud::debug_all))
        .route(
            "/{id}",
            get(crud::get_idea)
                .put(crud::update_idea)
                .delete(crud::delete_idea),
        )
        .route("/{id}/like", post(like::toggle_like))
        .route("/{id}/comment", post(comment::add_comment))
        .route("/{id}/comment/{comment_id}", delete(comment::delete_comment))
}
