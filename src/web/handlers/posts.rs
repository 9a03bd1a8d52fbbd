//! Post, like and comment handlers. Reads are public; writes need a caller.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::logging;
use crate::posts;
use crate::validation::TextInput;
use crate::web::auth::AuthUser;
use crate::web::handlers::health::works;
use crate::web::state::SharedState;
use crate::web::utils::{error_response, json_body, ok_json};

pub async fn test_handler() -> impl IntoResponse {
    works("Posts")
}

pub async fn list_posts_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match posts::list(&st.storage) {
        Ok(all) => ok_json(&all),
        Err(e) => error_response(e),
    }
}

pub async fn get_post_handler(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match posts::get(&st.storage, &post_id) {
        Ok(post) => ok_json(&post),
        Err(e) => error_response(e),
    }
}

pub async fn create_post_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Result<axum::Json<TextInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match posts::create(&st.storage, &auth.user_id, &input) {
        Ok(post) => {
            crate::dclog!(
                "post {} created by {}",
                logging::post_id(&post.id),
                logging::user_id(&auth.user_id)
            );
            ok_json(&post)
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_post_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match posts::delete(&st.storage, &auth.user_id, &post_id) {
        Ok(()) => {
            crate::dclog!(
                "post {} deleted by {}",
                logging::post_id(&post_id),
                logging::user_id(&auth.user_id)
            );
            ok_json(&serde_json::json!({ "success": true }))
        }
        Err(e) => error_response(e),
    }
}

pub async fn like_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match posts::like(&st.storage, &auth.user_id, &post_id) {
        Ok(post) => {
            crate::dclog!(
                "{} liked post {}",
                logging::user_id(&auth.user_id),
                logging::post_id(&post_id)
            );
            ok_json(&post)
        }
        Err(e) => error_response(e),
    }
}

pub async fn unlike_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    match posts::unlike(&st.storage, &auth.user_id, &post_id) {
        Ok(post) => {
            crate::dclog!(
                "{} unliked post {}",
                logging::user_id(&auth.user_id),
                logging::post_id(&post_id)
            );
            ok_json(&post)
        }
        Err(e) => error_response(e),
    }
}

pub async fn add_comment_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
    body: Result<axum::Json<TextInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match posts::add_comment(&st.storage, &auth.user_id, &post_id, &input) {
        Ok(post) => {
            crate::dclog!(
                "{} commented on post {}",
                logging::user_id(&auth.user_id),
                logging::post_id(&post_id)
            );
            ok_json(&post)
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_comment_handler(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Response {
    let st = state.lock().await;
    match posts::remove_comment(&st.storage, &auth.user_id, &post_id, &comment_id) {
        Ok(post) => {
            crate::dclog!(
                "comment {} removed from post {}",
                comment_id,
                logging::post_id(&post_id)
            );
            ok_json(&post)
        }
        Err(e) => error_response(e),
    }
}
