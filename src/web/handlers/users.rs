//! Registration and current-user handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::logging;
use crate::users;
use crate::validation::RegisterInput;
use crate::web::auth::AuthUser;
use crate::web::handlers::health::works;
use crate::web::state::SharedState;
use crate::web::utils::{error_response, json_body, ok_json};

pub async fn test_handler() -> impl IntoResponse {
    works("Users")
}

pub async fn register_handler(
    State(state): State<SharedState>,
    body: Result<axum::Json<RegisterInput>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let st = state.lock().await;
    match users::register(&st.storage, &input) {
        Ok((user, token)) => {
            crate::dclog!("registered user {}", logging::user_id(&user.id));
            ok_json(&serde_json::json!({ "user": user, "token": token }))
        }
        Err(e) => error_response(e),
    }
}

pub async fn current_user_handler(auth: AuthUser, State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match users::get_user(&st.storage, &auth.user_id) {
        Ok(user) => ok_json(&user),
        Err(e) => error_response(e),
    }
}
